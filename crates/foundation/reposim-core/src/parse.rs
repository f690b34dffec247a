//! Provider payload → [`AnalysisResult`]

use crate::model::{check_tree_bound, AnalysisResult};
use crate::{Error, Result};

/// Deserialize a raw provider reply. All or nothing: any shape violation,
/// including a tree deeper than the descriptor allows, is a parse error.
pub fn parse_analysis(raw: &str) -> Result<AnalysisResult> {
    let payload = strip_code_fence(raw.trim());

    let result: AnalysisResult =
        serde_json::from_str(payload).map_err(|e| Error::Parse(e.to_string()))?;

    for (side, analysis) in result.sides() {
        check_tree_bound(&analysis.file_tree)
            .map_err(|e| Error::Parse(format!("{}.fileTree: {}", side.key(), e)))?;
    }

    Ok(result)
}

// Some models wrap JSON-mode output in a markdown fence anyway.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    match rest.trim_end().strip_suffix("```") {
        Some(body) => body.trim(),
        None => text,
    }
}
