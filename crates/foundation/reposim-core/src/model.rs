//! Analysis data model
//!
//! Wire names follow the provider payload (`fileTree`, `type`). Internally a
//! tree node is an enum, so a file simply has nowhere to put children.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Deepest level a generated file tree may reach. Top-level entries are
/// level 1; only files may appear at this level.
pub const MAX_TREE_DEPTH: usize = 3;

/// Fabricated breakdown of one repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub frontend: CodeAnalysis,
    pub backend: CodeAnalysis,
}

impl AnalysisResult {
    /// Both halves in display order
    pub fn sides(&self) -> [(Side, &CodeAnalysis); 2] {
        [(Side::Frontend, &self.frontend), (Side::Backend, &self.backend)]
    }

    pub fn side(&self, side: Side) -> &CodeAnalysis {
        match side {
            Side::Frontend => &self.frontend,
            Side::Backend => &self.backend,
        }
    }
}

/// Which half of the analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Frontend,
    Backend,
}

impl Side {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Frontend => "Frontend Analysis",
            Self::Backend => "Backend Analysis",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Frontend => "frontend",
            Self::Backend => "backend",
        }
    }
}

/// One side (frontend or backend) of the analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeAnalysis {
    /// One-paragraph narrative
    pub analysis: String,
    /// Key technologies, in provider order
    pub technologies: Vec<String>,
    pub file_tree: Vec<FileTreeNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Directory,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Directory => write!(f, "directory"),
        }
    }
}

/// Entry of a simulated file tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireNode", into = "WireNode")]
pub enum FileTreeNode {
    File { name: String },
    Directory { name: String, children: Vec<FileTreeNode> },
}

impl FileTreeNode {
    pub fn file(name: impl Into<String>) -> Self {
        Self::File { name: name.into() }
    }

    pub fn directory(name: impl Into<String>, children: Vec<FileTreeNode>) -> Self {
        Self::Directory {
            name: name.into(),
            children,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::File { name } | Self::Directory { name, .. } => name,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::File { .. } => NodeKind::File,
            Self::Directory { .. } => NodeKind::Directory,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Directory { .. })
    }

    /// Children of a directory; always empty for files
    pub fn children(&self) -> &[FileTreeNode] {
        match self {
            Self::File { .. } => &[],
            Self::Directory { children, .. } => children,
        }
    }

    /// Levels spanned by this node and its descendants (a lone node is 1)
    pub fn depth(&self) -> usize {
        1 + tree_depth(self.children())
    }
}

/// Deepest level reached by a sequence of sibling nodes (0 when empty)
pub fn tree_depth(nodes: &[FileTreeNode]) -> usize {
    nodes.iter().map(FileTreeNode::depth).max().unwrap_or(0)
}

/// Check the structural bound the provider was asked to honour: no level
/// past [`MAX_TREE_DEPTH`], and nothing but files on that last level.
pub fn check_tree_bound(nodes: &[FileTreeNode]) -> std::result::Result<(), String> {
    check_level(nodes, 1)
}

fn check_level(nodes: &[FileTreeNode], level: usize) -> std::result::Result<(), String> {
    for node in nodes {
        if let FileTreeNode::Directory { name, children } = node {
            if level >= MAX_TREE_DEPTH {
                return Err(format!(
                    "directory `{}` at level {} (only files allowed at level {})",
                    name, level, MAX_TREE_DEPTH
                ));
            }
            check_level(children, level + 1)?;
        }
    }
    Ok(())
}

/// Node shape as it appears in the provider payload
#[derive(Serialize, Deserialize)]
struct WireNode {
    name: String,
    #[serde(rename = "type")]
    kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Vec<FileTreeNode>>,
}

impl TryFrom<WireNode> for FileTreeNode {
    type Error = String;

    fn try_from(wire: WireNode) -> std::result::Result<Self, Self::Error> {
        match (wire.kind, wire.children) {
            (NodeKind::File, None) => Ok(Self::File { name: wire.name }),
            (NodeKind::File, Some(_)) => {
                Err(format!("file `{}` must not carry children", wire.name))
            }
            (NodeKind::Directory, children) => Ok(Self::Directory {
                name: wire.name,
                children: children.unwrap_or_default(),
            }),
        }
    }
}

impl From<FileTreeNode> for WireNode {
    fn from(node: FileTreeNode) -> Self {
        match node {
            FileTreeNode::File { name } => Self {
                name,
                kind: NodeKind::File,
                children: None,
            },
            FileTreeNode::Directory { name, children } => Self {
                name,
                kind: NodeKind::Directory,
                children: Some(children),
            },
        }
    }
}
