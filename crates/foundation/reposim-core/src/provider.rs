//! Completion provider seam
//!
//! The analysis pipeline only needs "send this prompt with this schema, give
//! me text back". Concrete HTTP clients live in the integration tier.

use crate::Result;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// MIME type that switches providers into structured (JSON) output
pub const JSON_MIME_TYPE: &str = "application/json";

/// One structured-output completion request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub response_schema: Value,
    pub response_mime_type: String,
}

impl CompletionRequest {
    /// Request constrained to `schema`, answered as JSON
    pub fn structured(model: impl Into<String>, prompt: impl Into<String>, schema: Value) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            response_schema: schema,
            response_mime_type: JSON_MIME_TYPE.to_string(),
        }
    }
}

/// Hosted text-completion service
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider identifier, for logs
    fn name(&self) -> &str;

    /// Send one request and return the raw response text.
    ///
    /// Any failure (network, quota, auth, empty reply) is
    /// [`Error::Transport`](crate::Error::Transport).
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}
