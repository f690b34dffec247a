//! Response shape descriptor for structured-output mode
//!
//! The provider rejects self-referential schemas, so the tree node is
//! unrolled [`MAX_TREE_DEPTH`] times and the last level admits files only.
//! Types use the provider's OpenAPI-subset spelling (`OBJECT`, `ARRAY`, ...).

use crate::model::MAX_TREE_DEPTH;
use serde_json::{json, Value};

/// Descriptor for the whole [`AnalysisResult`](crate::AnalysisResult)
pub fn response_schema() -> Value {
    let side = code_analysis_schema();
    json!({
        "type": "OBJECT",
        "properties": {
            "frontend": side.clone(),
            "backend": side,
        },
        "required": ["frontend", "backend"],
    })
}

/// Descriptor for one [`CodeAnalysis`](crate::CodeAnalysis)
pub fn code_analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "analysis": {
                "type": "STRING",
                "description": "A brief, one-paragraph analysis of this part of the codebase (frontend or backend).",
            },
            "technologies": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "A list of key technologies, frameworks, or libraries identified.",
            },
            "fileTree": {
                "type": "ARRAY",
                "items": file_tree_node_schema(MAX_TREE_DEPTH),
                "description": "A plausible file and directory structure for this part of the codebase. For nodes of type 'file', do not include a 'children' property.",
            },
        },
        "required": ["analysis", "technologies", "fileTree"],
    })
}

/// Tree node descriptor spanning `levels` levels, this one included.
pub fn file_tree_node_schema(levels: usize) -> Value {
    if levels <= 1 {
        return json!({
            "type": "OBJECT",
            "properties": {
                "name": { "type": "STRING" },
                "type": { "type": "STRING", "enum": ["file"] },
            },
            "required": ["name", "type"],
        });
    }

    json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING" },
            "type": { "type": "STRING", "enum": ["file", "directory"] },
            "children": {
                "type": "ARRAY",
                "items": file_tree_node_schema(levels - 1),
            },
        },
        "required": ["name", "type"],
    })
}
