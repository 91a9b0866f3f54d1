//! Stable hierarchy paths
//!
//! A node is addressed as `name[siblingIndex]`, joined with `/` down from
//! its root. The path is a position-plus-name fingerprint, not an object
//! identity: renaming a node or reordering siblings changes the paths of
//! every descendant that depends on the changed index, and a pure reorder
//! is indistinguishable from a remove plus an add at the new position.
//! Accepted trade-off; the diff output stays honest about position.

use crate::graph::{SceneGraph, SceneNode};

/// `name[siblingIndex]` segment for one node
pub fn name_with_index(name: &str, sibling_index: usize) -> String {
    format!("{name}[{sibling_index}]")
}

/// Full stable path for a node under an optional parent path
pub fn node_path(parent_path: Option<&str>, name: &str, sibling_index: usize) -> String {
    match parent_path {
        Some(parent) => format!("{parent}/{}", name_with_index(name, sibling_index)),
        None => name_with_index(name, sibling_index),
    }
}

/// Re-locate a node from its stable path
///
/// Returns `None` when any segment fails to match, including when a
/// sibling index refers to a position the node no longer occupies.
pub fn find_by_path<'a>(graph: &'a SceneGraph, path: &str) -> Option<&'a SceneNode> {
    let mut segments = path.split('/');
    let first = segments.next()?;

    let mut current = find_child(&graph.roots, first)?;
    for segment in segments {
        current = find_child(&current.children, segment)?;
    }
    Some(current)
}

fn find_child<'a>(nodes: &'a [SceneNode], segment: &str) -> Option<&'a SceneNode> {
    nodes
        .iter()
        .enumerate()
        .find(|(index, node)| name_with_index(&node.name, *index) == segment)
        .map(|(_, node)| node)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_graph() -> SceneGraph {
        SceneGraph::new("demo.scene").with_root(
            SceneNode::new("Root")
                .with_child(SceneNode::new("Arm").with_child(SceneNode::new("Hand")))
                .with_child(SceneNode::new("Arm")),
        )
    }

    #[test]
    fn path_segments_join_with_slash() {
        assert_eq!(node_path(None, "Root", 0), "Root[0]");
        assert_eq!(node_path(Some("Root[0]"), "Arm", 1), "Root[0]/Arm[1]");
    }

    #[test]
    fn find_by_path_locates_nested_node() {
        let graph = demo_graph();
        let hand = find_by_path(&graph, "Root[0]/Arm[0]/Hand[0]").unwrap();
        assert_eq!(hand.name, "Hand");
    }

    #[test]
    fn same_name_siblings_are_distinguished_by_index() {
        let graph = demo_graph();
        let second_arm = find_by_path(&graph, "Root[0]/Arm[1]").unwrap();
        assert!(second_arm.children.is_empty());
        let first_arm = find_by_path(&graph, "Root[0]/Arm[0]").unwrap();
        assert_eq!(first_arm.children.len(), 1);
    }

    #[test]
    fn stale_index_does_not_match() {
        let graph = demo_graph();
        assert!(find_by_path(&graph, "Root[1]").is_none());
        assert!(find_by_path(&graph, "Root[0]/Arm[2]").is_none());
        assert!(find_by_path(&graph, "Root[0]/Leg[0]").is_none());
    }
}
