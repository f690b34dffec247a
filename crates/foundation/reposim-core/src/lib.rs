//! # reposim-core
//!
//! Everything the simulator knows about a "repository analysis" without
//! touching the network or the terminal:
//!
//! ```text
//!  user input ──► url::validate_repo_url ──► RepoId
//!                                              │
//!            prompt::build_prompt + schema::response_schema
//!                                              │
//!                                              ▼
//!                        CompletionProvider::complete  (one request)
//!                                              │
//!                                              ▼
//!                      parse::parse_analysis ──► AnalysisResult
//! ```
//!
//! The file tree is a plain recursive type here. The depth bound only exists
//! at the edges: in the descriptor handed to the provider and in the parser.

pub mod analyze;
pub mod model;
pub mod parse;
pub mod prompt;
pub mod provider;
pub mod schema;
pub mod url;

pub use analyze::generate_repo_analysis;
pub use model::{AnalysisResult, CodeAnalysis, FileTreeNode, NodeKind, Side, MAX_TREE_DEPTH};
pub use parse::parse_analysis;
pub use prompt::build_prompt;
pub use provider::{CompletionProvider, CompletionRequest, JSON_MIME_TYPE};
pub use schema::response_schema;
pub use url::{validate_repo_url, RepoId};

/// Shown for every provider-side failure, whatever the cause.
pub const GENERATION_FAILED: &str =
    "Failed to generate repository analysis. The AI model may be temporarily unavailable.";

/// Result type for reposim-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while turning a URL into an analysis
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Please enter a GitHub repository URL.")]
    EmptyUrl,

    #[error("Invalid GitHub repository URL format. Please use format like 'github.com/user/repo'.")]
    InvalidUrl(String),

    #[error("Provider request failed: {0}")]
    Transport(String),

    #[error("Malformed analysis payload: {0}")]
    Parse(String),
}

impl Error {
    /// Message for the form's error box.
    ///
    /// Transport and parse failures share one generic message; their detail
    /// only goes to the log.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) | Self::Parse(_) => GENERATION_FAILED.to_string(),
            other => other.to_string(),
        }
    }

    /// Input problems the user can fix in place
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyUrl | Self::InvalidUrl(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_failures_share_a_message() {
        let transport = Error::Transport("503 Service Unavailable".into());
        let parse = Error::Parse("missing field `backend`".into());

        assert_eq!(transport.user_message(), GENERATION_FAILED);
        assert_eq!(parse.user_message(), GENERATION_FAILED);
        assert!(!transport.is_validation());
    }

    #[test]
    fn test_validation_messages_are_shown_verbatim() {
        let err = Error::InvalidUrl("not-a-url".into());
        assert!(err.is_validation());
        assert!(err.user_message().starts_with("Invalid GitHub repository URL format"));
        assert_eq!(
            Error::EmptyUrl.user_message(),
            "Please enter a GitHub repository URL."
        );
    }
}
