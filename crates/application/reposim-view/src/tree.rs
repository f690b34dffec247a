//! Collapse state for a rendered file tree
//!
//! Directories start expanded. State is keyed by index path and never
//! touches the tree itself.

use reposim_core::FileTreeNode;
use std::collections::HashSet;

/// Child indices from the root sequence down to a node
pub type NodePath = Vec<usize>;

/// A node as it appears on screen
#[derive(Debug, Clone, PartialEq)]
pub struct TreeRow<'a> {
    pub path: NodePath,
    /// 0 for top-level entries
    pub depth: usize,
    pub node: &'a FileTreeNode,
    pub expanded: bool,
}

#[derive(Debug, Clone, Default)]
pub struct TreeState {
    collapsed: HashSet<NodePath>,
    /// Index into the visible rows
    pub cursor: usize,
}

impl TreeState {
    pub fn is_expanded(&self, path: &[usize]) -> bool {
        !self.collapsed.contains(path)
    }

    /// Flip one directory between collapsed and expanded
    pub fn toggle(&mut self, path: &[usize]) {
        if !self.collapsed.remove(path) {
            self.collapsed.insert(path.to_vec());
        }
    }

    /// Depth-first rows, skipping the contents of collapsed directories
    pub fn visible_rows<'a>(&self, nodes: &'a [FileTreeNode]) -> Vec<TreeRow<'a>> {
        let mut rows = Vec::new();
        let mut path = Vec::new();
        self.collect(nodes, &mut path, &mut rows);
        rows
    }

    fn collect<'a>(&self, nodes: &'a [FileTreeNode], path: &mut NodePath, rows: &mut Vec<TreeRow<'a>>) {
        for (index, node) in nodes.iter().enumerate() {
            path.push(index);
            let expanded = node.is_directory() && self.is_expanded(path);
            rows.push(TreeRow {
                path: path.clone(),
                depth: path.len() - 1,
                node,
                expanded,
            });
            if expanded {
                self.collect(node.children(), path, rows);
            }
            path.pop();
        }
    }

    /// Toggle the directory under the cursor. Files are left alone.
    pub fn toggle_at_cursor(&mut self, nodes: &[FileTreeNode]) -> bool {
        let target = self
            .visible_rows(nodes)
            .into_iter()
            .nth(self.cursor)
            .filter(|row| row.node.is_directory())
            .map(|row| row.path);

        match target {
            Some(path) => {
                self.toggle(&path);
                self.clamp_cursor(nodes);
                true
            }
            None => false,
        }
    }

    pub fn move_cursor(&mut self, delta: isize, nodes: &[FileTreeNode]) {
        let len = self.visible_rows(nodes).len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let next = self.cursor as isize + delta;
        self.cursor = next.clamp(0, len as isize - 1) as usize;
    }

    fn clamp_cursor(&mut self, nodes: &[FileTreeNode]) {
        let len = self.visible_rows(nodes).len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    pub fn reset(&mut self) {
        self.collapsed.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Vec<FileTreeNode> {
        vec![
            FileTreeNode::directory(
                "src",
                vec![
                    FileTreeNode::directory("routes", vec![FileTreeNode::file("users.js")]),
                    FileTreeNode::file("server.js"),
                ],
            ),
            FileTreeNode::directory("tests", vec![FileTreeNode::file("api.test.js")]),
            FileTreeNode::file("package.json"),
        ]
    }

    fn names(state: &TreeState, nodes: &[FileTreeNode]) -> Vec<String> {
        state
            .visible_rows(nodes)
            .iter()
            .map(|r| format!("{}{}", "  ".repeat(r.depth), r.node.name()))
            .collect()
    }

    #[test]
    fn test_everything_expanded_by_default() {
        let nodes = tree();
        let state = TreeState::default();
        assert_eq!(
            names(&state, &nodes),
            vec![
                "src",
                "  routes",
                "    users.js",
                "  server.js",
                "tests",
                "  api.test.js",
                "package.json",
            ]
        );
        assert!(state.visible_rows(&nodes)[0].expanded);
        // Files are never reported as expanded
        assert!(!state.visible_rows(&nodes)[2].expanded);
    }

    #[test]
    fn test_collapsing_one_directory_leaves_others() {
        let nodes = tree();
        let mut state = TreeState::default();
        state.toggle(&[0, 0]);

        assert_eq!(
            names(&state, &nodes),
            vec!["src", "  routes", "  server.js", "tests", "  api.test.js", "package.json"]
        );
        assert!(state.is_expanded(&[1]));

        state.toggle(&[0, 0]);
        assert_eq!(state.visible_rows(&nodes).len(), 7);
    }

    #[test]
    fn test_collapsed_parent_keeps_child_state() {
        let nodes = tree();
        let mut state = TreeState::default();
        state.toggle(&[0, 0]);
        state.toggle(&[0]);
        assert_eq!(names(&state, &nodes), vec!["src", "tests", "  api.test.js", "package.json"]);

        state.toggle(&[0]);
        assert!(!state.is_expanded(&[0, 0]));
        assert_eq!(state.visible_rows(&nodes).len(), 6);
    }

    #[test]
    fn test_toggle_at_cursor() {
        let nodes = tree();
        let mut state = TreeState::default();

        state.move_cursor(4, &nodes);
        assert!(state.toggle_at_cursor(&nodes)); // "tests"
        assert_eq!(state.visible_rows(&nodes).len(), 6);

        state.move_cursor(1, &nodes);
        assert_eq!(state.visible_rows(&nodes)[state.cursor].node.name(), "package.json");
        assert!(!state.toggle_at_cursor(&nodes));
    }

    #[test]
    fn test_cursor_is_clamped() {
        let nodes = tree();
        let mut state = TreeState::default();
        state.move_cursor(-3, &nodes);
        assert_eq!(state.cursor, 0);
        state.move_cursor(100, &nodes);
        assert_eq!(state.cursor, 6);

        state.move_cursor(1, &[]);
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn test_collapsing_above_cursor_keeps_it_in_range() {
        let nodes = tree();
        let mut state = TreeState::default();
        state.toggle(&[1]);
        state.move_cursor(100, &nodes);
        assert_eq!(state.cursor, 5);

        state.cursor = 0;
        state.toggle_at_cursor(&nodes);
        assert_eq!(state.visible_rows(&nodes).len(), 3);
        assert!(state.cursor < 3);
    }
}
