//! Application state and key handling

use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use reposim_core::{CodeAnalysis, Side};
use reposim_view::{AnalysisSession, AnalysisWorker, AppStatus, SubmitOutcome};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

/// Where keystrokes go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    Tree(Side),
}

impl Focus {
    /// Input, then the two result trees when there is something to browse
    pub fn next(self, has_result: bool) -> Self {
        if !has_result {
            return Self::Input;
        }
        match self {
            Self::Input => Self::Tree(Side::Frontend),
            Self::Tree(Side::Frontend) => Self::Tree(Side::Backend),
            Self::Tree(Side::Backend) => Self::Input,
        }
    }
}

pub struct App {
    pub theme: Theme,
    pub focus: Focus,
    pub show_help: bool,

    /// URL as typed
    pub input: String,
    /// Cursor position in chars
    pub input_cursor: usize,
    /// URL of the request shown in the loading panel
    pub submitted_url: Option<String>,

    pub session: AnalysisSession,
    worker: AnalysisWorker,
    request: Option<JoinHandle<()>>,
}

impl App {
    pub fn new(worker: AnalysisWorker, step_interval: Duration, theme: Theme) -> Self {
        Self {
            theme,
            focus: Focus::default(),
            show_help: false,
            input: String::new(),
            input_cursor: 0,
            submitted_url: None,
            session: AnalysisSession::new(step_interval),
            worker,
            request: None,
        }
    }

    pub fn model(&self) -> &str {
        self.worker.model()
    }

    /// Drain finished requests, then advance the progress display
    pub fn on_tick(&mut self) {
        while let Some(done) = self.worker.try_recv() {
            if self.session.complete(done.seq, done.result) {
                self.request = None;
                if self.session.status() != AppStatus::Success {
                    self.focus = Focus::Input;
                }
            }
        }
        self.session.tick(Instant::now());
    }

    /// Handle keyboard input, returns true if should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Global shortcuts that work in any mode
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return true;
            }
            KeyCode::F(1) => {
                self.show_help = !self.show_help;
                return false;
            }
            _ => {}
        }

        // Help overlay consumes all other keys when shown
        if self.show_help {
            self.show_help = false;
            return false;
        }

        match key.code {
            KeyCode::F(2) => {
                self.theme = self.theme.toggle();
                return false;
            }
            KeyCode::Tab => {
                self.focus = self.focus.next(self.session.result().is_some());
                return false;
            }
            KeyCode::Esc => {
                self.escape();
                return false;
            }
            _ => {}
        }

        match self.focus {
            Focus::Input => self.handle_input_key(key),
            Focus::Tree(side) => self.handle_tree_key(side, key),
        }
        false
    }

    fn escape(&mut self) {
        if self.session.cancel() {
            if let Some(request) = self.request.take() {
                request.abort();
            }
        } else {
            self.focus = Focus::Input;
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        // Form is frozen while a request is outstanding
        if !self.session.status().form_enabled() {
            return;
        }

        match key.code {
            KeyCode::Enter => self.submit(),
            KeyCode::Char(c) => {
                let at = self.byte_offset(self.input_cursor);
                self.input.insert(at, c);
                self.input_cursor += 1;
            }
            KeyCode::Backspace => {
                if self.input_cursor > 0 {
                    self.input_cursor -= 1;
                    let at = self.byte_offset(self.input_cursor);
                    self.input.remove(at);
                }
            }
            KeyCode::Delete => {
                if self.input_cursor < self.input_len() {
                    let at = self.byte_offset(self.input_cursor);
                    self.input.remove(at);
                }
            }
            KeyCode::Left => self.input_cursor = self.input_cursor.saturating_sub(1),
            KeyCode::Right => {
                if self.input_cursor < self.input_len() {
                    self.input_cursor += 1;
                }
            }
            KeyCode::Home => self.input_cursor = 0,
            KeyCode::End => self.input_cursor = self.input_len(),
            _ => {}
        }
    }

    fn handle_tree_key(&mut self, side: Side, key: KeyEvent) {
        let Some(result) = self.session.result() else {
            self.focus = Focus::Input;
            return;
        };
        let nodes = result.side(side).file_tree.clone();
        let tree = self.session.tree_mut(side);

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => tree.move_cursor(-1, &nodes),
            KeyCode::Down | KeyCode::Char('j') => tree.move_cursor(1, &nodes),
            KeyCode::Enter | KeyCode::Char(' ') => {
                tree.toggle_at_cursor(&nodes);
            }
            _ => {}
        }
    }

    fn submit(&mut self) {
        match self.session.submit(&self.input, Instant::now()) {
            SubmitOutcome::Started(ticket) => {
                self.submitted_url = Some(ticket.url.clone());
                self.request = Some(self.worker.dispatch(ticket));
            }
            SubmitOutcome::Busy => {}
            SubmitOutcome::Rejected => self.focus = Focus::Input,
        }
    }

    /// Analysis for one column, when the last request succeeded
    pub fn analysis(&self, side: Side) -> Option<&CodeAnalysis> {
        self.session.result().map(|result| result.side(side))
    }

    pub fn is_loading(&self) -> bool {
        self.session.status() == AppStatus::Loading
    }

    fn input_len(&self) -> usize {
        self.input.chars().count()
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.input
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }
}
