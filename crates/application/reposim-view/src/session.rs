//! The Idle → Loading → Success | Error machine
//!
//! The session never performs I/O. `submit` hands back a [`Ticket`]; whoever
//! runs the request reports back through `complete` with the ticket's
//! sequence number. Anything that does not match the request in flight is
//! dropped.

use crate::progress::ProgressTicker;
use crate::status::AppStatus;
use crate::tree::TreeState;
use reposim_core::{validate_repo_url, AnalysisResult, Error, Result, Side};
use std::time::{Duration, Instant};

/// One accepted submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub seq: u64,
    /// Trimmed input, as the user typed it
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Now Loading; run the request described by the ticket
    Started(Ticket),
    /// A request is already outstanding; nothing changed
    Busy,
    /// Input failed validation; status is Error
    Rejected,
}

#[derive(Debug)]
pub struct AnalysisSession {
    status: AppStatus,
    result: Option<AnalysisResult>,
    error: Option<String>,
    next_seq: u64,
    in_flight: Option<u64>,
    progress: ProgressTicker,
    frontend_tree: TreeState,
    backend_tree: TreeState,
}

impl AnalysisSession {
    pub fn new(step_interval: Duration) -> Self {
        Self {
            status: AppStatus::Idle,
            result: None,
            error: None,
            next_seq: 0,
            in_flight: None,
            progress: ProgressTicker::new(step_interval),
            frontend_tree: TreeState::default(),
            backend_tree: TreeState::default(),
        }
    }

    /// Validate `input` and, if it passes, enter Loading.
    pub fn submit(&mut self, input: &str, now: Instant) -> SubmitOutcome {
        if self.status == AppStatus::Loading {
            return SubmitOutcome::Busy;
        }

        let url = input.trim();
        if url.is_empty() {
            self.fail(Error::EmptyUrl.user_message());
            return SubmitOutcome::Rejected;
        }
        if let Err(e) = validate_repo_url(url) {
            tracing::debug!(input = url, "rejected repository url");
            self.fail(e.user_message());
            return SubmitOutcome::Rejected;
        }

        self.next_seq += 1;
        let seq = self.next_seq;
        self.status = AppStatus::Loading;
        self.result = None;
        self.error = None;
        self.in_flight = Some(seq);
        self.frontend_tree.reset();
        self.backend_tree.reset();
        self.progress.start(now);

        tracing::info!(seq, url, "analysis started");
        SubmitOutcome::Started(Ticket {
            seq,
            url: url.to_string(),
        })
    }

    /// Apply the outcome of request `seq`. Returns false when it was stale.
    pub fn complete(&mut self, seq: u64, outcome: Result<AnalysisResult>) -> bool {
        if self.in_flight != Some(seq) {
            tracing::debug!(seq, current = ?self.in_flight, "dropping stale completion");
            return false;
        }

        self.in_flight = None;
        self.progress.stop();

        match outcome {
            Ok(result) => {
                tracing::info!(seq, "analysis finished");
                self.status = AppStatus::Success;
                self.result = Some(result);
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(seq, error = %e, "analysis failed");
                self.fail(e.user_message());
            }
        }
        true
    }

    /// Abandon the outstanding request and go back to Idle.
    pub fn cancel(&mut self) -> bool {
        let Some(seq) = self.in_flight.take() else {
            return false;
        };
        tracing::info!(seq, "analysis cancelled");
        self.progress.stop();
        self.status = AppStatus::Idle;
        true
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.progress.tick(now)
    }

    fn fail(&mut self, message: String) {
        self.status = AppStatus::Error;
        self.result = None;
        self.error = Some(message);
    }

    pub fn status(&self) -> AppStatus {
        self.status
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn progress(&self) -> &ProgressTicker {
        &self.progress
    }

    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }

    pub fn tree(&self, side: Side) -> &TreeState {
        match side {
            Side::Frontend => &self.frontend_tree,
            Side::Backend => &self.backend_tree,
        }
    }

    pub fn tree_mut(&mut self, side: Side) -> &mut TreeState {
        match side {
            Side::Frontend => &mut self.frontend_tree,
            Side::Backend => &mut self.backend_tree,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reposim_core::{parse_analysis, CodeAnalysis, FileTreeNode, GENERATION_FAILED};

    const STEP: Duration = Duration::from_millis(1500);

    fn sample(label: &str) -> AnalysisResult {
        let side = CodeAnalysis {
            analysis: label.to_string(),
            technologies: vec!["Rust".to_string()],
            file_tree: vec![FileTreeNode::directory(
                "src",
                vec![FileTreeNode::file("main.rs")],
            )],
        };
        AnalysisResult {
            frontend: side.clone(),
            backend: side,
        }
    }

    fn started(outcome: SubmitOutcome) -> Ticket {
        match outcome {
            SubmitOutcome::Started(ticket) => ticket,
            other => panic!("expected Started, got {:?}", other),
        }
    }

    #[test]
    fn test_starts_idle() {
        let session = AnalysisSession::new(STEP);
        assert_eq!(session.status(), AppStatus::Idle);
        assert!(session.result().is_none());
        assert!(session.error().is_none());
        assert!(!session.progress().is_running());
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let mut session = AnalysisSession::new(STEP);
        assert_eq!(session.submit("   ", Instant::now()), SubmitOutcome::Rejected);
        assert_eq!(session.status(), AppStatus::Error);
        assert_eq!(session.error(), Some("Please enter a GitHub repository URL."));
        assert!(session.in_flight().is_none());
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        let mut session = AnalysisSession::new(STEP);
        assert_eq!(
            session.submit("gitlab.com/a/b", Instant::now()),
            SubmitOutcome::Rejected
        );
        assert_eq!(session.status(), AppStatus::Error);
        assert_eq!(
            session.error(),
            Some("Invalid GitHub repository URL format. Please use format like 'github.com/user/repo'.")
        );
    }

    #[test]
    fn test_success_flow() {
        let mut session = AnalysisSession::new(STEP);
        let ticket = started(session.submit(" github.com/facebook/react ", Instant::now()));
        assert_eq!(ticket.url, "github.com/facebook/react");
        assert_eq!(session.status(), AppStatus::Loading);
        assert!(!session.status().form_enabled());
        assert!(session.progress().is_running());

        assert!(session.complete(ticket.seq, Ok(sample("react"))));
        assert_eq!(session.status(), AppStatus::Success);
        assert_eq!(session.result().unwrap().frontend.analysis, "react");
        assert!(session.error().is_none());
    }

    #[test]
    fn test_submit_while_loading_is_busy() {
        let mut session = AnalysisSession::new(STEP);
        let first = started(session.submit("github.com/a/b", Instant::now()));
        assert_eq!(session.submit("github.com/c/d", Instant::now()), SubmitOutcome::Busy);
        assert_eq!(session.in_flight(), Some(first.seq));
    }

    #[test]
    fn test_provider_failure_shows_generic_message() {
        let mut session = AnalysisSession::new(STEP);
        let ticket = started(session.submit("github.com/a/b", Instant::now()));
        session.complete(ticket.seq, Err(Error::Transport("HTTP 500".into())));

        assert_eq!(session.status(), AppStatus::Error);
        assert_eq!(session.error(), Some(GENERATION_FAILED));
        assert!(session.result().is_none());
    }

    #[test]
    fn test_missing_backend_is_an_error() {
        let mut session = AnalysisSession::new(STEP);
        let ticket = started(session.submit("github.com/a/b", Instant::now()));
        let outcome = parse_analysis(
            r#"{"frontend": {"analysis": "x", "technologies": [], "fileTree": []}}"#,
        );
        session.complete(ticket.seq, outcome);

        assert_eq!(session.status(), AppStatus::Error);
        assert_eq!(session.error(), Some(GENERATION_FAILED));
    }

    #[test]
    fn test_cancel_then_stale_completion_is_ignored() {
        let mut session = AnalysisSession::new(STEP);
        let first = started(session.submit("github.com/slow/first", Instant::now()));
        assert!(session.cancel());
        assert_eq!(session.status(), AppStatus::Idle);
        assert!(!session.progress().is_running());

        let second = started(session.submit("github.com/fast/second", Instant::now()));
        assert!(second.seq > first.seq);

        assert!(session.complete(second.seq, Ok(sample("second"))));
        assert!(!session.complete(first.seq, Ok(sample("first"))));
        assert_eq!(session.result().unwrap().frontend.analysis, "second");
        assert_eq!(session.status(), AppStatus::Success);
    }

    #[test]
    fn test_completion_after_cancel_is_dropped() {
        let mut session = AnalysisSession::new(STEP);
        let ticket = started(session.submit("github.com/a/b", Instant::now()));
        session.cancel();

        assert!(!session.complete(ticket.seq, Ok(sample("late"))));
        assert_eq!(session.status(), AppStatus::Idle);
        assert!(session.result().is_none());
    }

    #[test]
    fn test_cancel_when_idle_does_nothing() {
        let mut session = AnalysisSession::new(STEP);
        assert!(!session.cancel());
        assert_eq!(session.status(), AppStatus::Idle);
    }

    #[test]
    fn test_progress_stops_after_completion() {
        let t0 = Instant::now();
        let mut session = AnalysisSession::new(STEP);
        let ticket = started(session.submit("github.com/a/b", t0));

        assert!(session.tick(t0 + STEP));
        assert_eq!(session.progress().step(), 1);

        session.complete(ticket.seq, Ok(sample("done")));
        assert!(!session.tick(t0 + STEP * 5));
        assert_eq!(session.progress().step(), 1);
    }

    #[test]
    fn test_resubmit_after_error_clears_message_and_trees() {
        let mut session = AnalysisSession::new(STEP);
        let ticket = started(session.submit("github.com/a/b", Instant::now()));
        session.complete(ticket.seq, Ok(sample("one")));
        session.tree_mut(Side::Backend).toggle(&[0]);
        session.tree_mut(Side::Backend).cursor = 1;

        session.submit("nope", Instant::now());
        assert_eq!(session.status(), AppStatus::Error);
        assert!(session.result().is_none());

        started(session.submit("github.com/a/b", Instant::now()));
        assert!(session.error().is_none());
        assert!(session.tree(Side::Backend).is_expanded(&[0]));
        assert_eq!(session.tree(Side::Backend).cursor, 0);
    }
}
