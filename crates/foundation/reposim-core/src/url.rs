//! Repository URL validation

use crate::{Error, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

lazy_static! {
    static ref GITHUB_URL_RE: Regex =
        Regex::new(r"^(?:https?://)?(?:www\.)?github\.com/([a-zA-Z0-9-]+/[a-zA-Z0-9._-]+)/?$")
            .unwrap();
}

/// Canonical `owner/repo` identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    full: String,
    slash: usize,
}

impl RepoId {
    pub fn owner(&self) -> &str {
        &self.full[..self.slash]
    }

    pub fn name(&self) -> &str {
        &self.full[self.slash + 1..]
    }

    pub fn as_str(&self) -> &str {
        &self.full
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}

/// Match `input` against `[http(s)://][www.]github.com/owner/repo[/]` and
/// return `owner/repo`. Surrounding whitespace is ignored; nothing else is.
pub fn validate_repo_url(input: &str) -> Result<RepoId> {
    let trimmed = input.trim();
    let caps = GITHUB_URL_RE
        .captures(trimmed)
        .ok_or_else(|| Error::InvalidUrl(trimmed.to_string()))?;

    let full = caps[1].to_string();
    let slash = full
        .find('/')
        .ok_or_else(|| Error::InvalidUrl(trimmed.to_string()))?;

    Ok(RepoId { full, slash })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical(input: &str) -> String {
        validate_repo_url(input).unwrap().to_string()
    }

    #[test]
    fn test_accepts_bare_host() {
        assert_eq!(canonical("github.com/facebook/react"), "facebook/react");
    }

    #[test]
    fn test_accepts_scheme_and_www() {
        assert_eq!(canonical("https://www.github.com/a-b/c.d_e"), "a-b/c.d_e");
        assert_eq!(canonical("http://github.com/rust-lang/rust"), "rust-lang/rust");
        assert_eq!(canonical("www.github.com/tokio-rs/tokio"), "tokio-rs/tokio");
    }

    #[test]
    fn test_trailing_slash_and_whitespace() {
        assert_eq!(canonical("github.com/facebook/react/"), "facebook/react");
        assert_eq!(canonical("  github.com/facebook/react \n"), "facebook/react");
    }

    #[test]
    fn test_owner_and_name() {
        let repo = validate_repo_url("github.com/serde-rs/serde_json.v2").unwrap();
        assert_eq!(repo.owner(), "serde-rs");
        assert_eq!(repo.name(), "serde_json.v2");
        assert_eq!(repo.as_str(), "serde-rs/serde_json.v2");
    }

    #[test]
    fn test_rejects_other_shapes() {
        let rejected = [
            "github.com/justowner",
            "not-a-url",
            "",
            "gitlab.com/owner/repo",
            "github.com/owner/repo/tree/main",
            "github.com/own_er/repo",
            "ftp://github.com/owner/repo",
            "https://github.com/owner/repo//",
            "github.com//repo",
            "mygithub.com/owner/repo",
        ];
        for input in rejected {
            assert_eq!(
                validate_repo_url(input),
                Err(Error::InvalidUrl(input.trim().to_string())),
                "{input:?} should be rejected"
            );
        }
    }
}
