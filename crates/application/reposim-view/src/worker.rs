//! Background execution of analysis tickets
//!
//! Each dispatched ticket runs on its own task and reports back over a
//! channel tagged with the ticket's sequence number. Ordering of arrivals is
//! whatever the provider produces; the session sorts out staleness.

use crate::session::Ticket;
use reposim_core::{generate_repo_analysis, AnalysisResult, CompletionProvider, Result};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Finished request, ready for `AnalysisSession::complete`
#[derive(Debug)]
pub struct Completion {
    pub seq: u64,
    pub result: Result<AnalysisResult>,
}

pub struct AnalysisWorker {
    provider: Arc<dyn CompletionProvider>,
    model: String,
    response_tx: mpsc::Sender<Completion>,
    response_rx: mpsc::Receiver<Completion>,
}

impl AnalysisWorker {
    pub fn new(provider: Arc<dyn CompletionProvider>, model: impl Into<String>) -> Self {
        let (response_tx, response_rx) = mpsc::channel::<Completion>(32);
        Self {
            provider,
            model: model.into(),
            response_tx,
            response_rx,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run `ticket` in the background. Must be called inside a tokio runtime.
    pub fn dispatch(&self, ticket: Ticket) -> JoinHandle<()> {
        let provider = Arc::clone(&self.provider);
        let model = self.model.clone();
        let tx = self.response_tx.clone();

        tokio::spawn(async move {
            let result = generate_repo_analysis(provider.as_ref(), &model, &ticket.url).await;
            if tx.send(Completion { seq: ticket.seq, result }).await.is_err() {
                tracing::debug!(seq = ticket.seq, "worker receiver gone, dropping completion");
            }
        })
    }

    pub fn try_recv(&mut self) -> Option<Completion> {
        self.response_rx.try_recv().ok()
    }

    pub async fn recv(&mut self) -> Option<Completion> {
        self.response_rx.recv().await
    }
}
