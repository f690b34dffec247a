//! Validate → request → parse, as one call

use crate::model::AnalysisResult;
use crate::parse::parse_analysis;
use crate::prompt::build_prompt;
use crate::provider::{CompletionProvider, CompletionRequest};
use crate::schema::response_schema;
use crate::url::validate_repo_url;
use crate::Result;

/// Produce a fabricated analysis for `repo_url`.
///
/// Invalid URLs fail before anything is sent. Otherwise exactly one request
/// goes to `provider`; there is no retry.
pub async fn generate_repo_analysis(
    provider: &dyn CompletionProvider,
    model: &str,
    repo_url: &str,
) -> Result<AnalysisResult> {
    let repo = validate_repo_url(repo_url)?;
    let request = CompletionRequest::structured(
        model,
        build_prompt(repo_url.trim(), &repo),
        response_schema(),
    );

    tracing::debug!(provider = provider.name(), model, repo = %repo, "requesting analysis");

    let raw = provider.complete(&request).await.map_err(|e| {
        tracing::warn!(provider = provider.name(), repo = %repo, error = %e, "completion failed");
        e
    })?;

    parse_analysis(&raw).map_err(|e| {
        tracing::warn!(repo = %repo, error = %e, "provider reply did not match the schema");
        e
    })
}
