//! Snapshot diffing
//!
//! Pure set comparison over two snapshot values; no live scene state is
//! consulted. Output ordering is total and independent of the input
//! iteration order, so equal inputs always produce byte-identical results.

pub mod export;
pub mod filter;

use crate::snapshot::model::SceneSnapshot;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

pub use filter::DiffFilter;

/// Component type recorded on whole-node change items
pub const NODE_ITEM_TYPE: &str = "(GameObject)";

/// Component order recorded on whole-node change items
pub const NODE_ITEM_ORDER: i32 = -1;

/// A presence change: a node, component, or property that exists on only
/// one side of the comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeItem {
    pub node_path: String,
    pub component_type: String,
    pub component_order: i32,
    /// `None` for whole-node and whole-component items
    pub property_path: Option<String>,
}

/// A property present on both sides with different values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifiedItem {
    pub node_path: String,
    pub component_type: String,
    pub component_order: i32,
    pub property_path: String,
    pub before: String,
    pub after: String,
}

/// Result of comparing a baseline snapshot against a current one
///
/// All three lists are sorted by `(node_path, component_type,
/// component_order, property_path)`, absent property paths first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    #[serde(default)]
    pub added: Vec<ChangeItem>,
    #[serde(default)]
    pub removed: Vec<ChangeItem>,
    #[serde(default)]
    pub modified: Vec<ModifiedItem>,
}

impl DiffResult {
    /// Whether the comparison found no differences at all
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }
}

fn node_item(path: &str) -> ChangeItem {
    ChangeItem {
        node_path: path.to_string(),
        component_type: NODE_ITEM_TYPE.to_string(),
        component_order: NODE_ITEM_ORDER,
        property_path: None,
    }
}

fn change_key(item: &ChangeItem) -> (&str, &str, i32, Option<&str>) {
    (
        &item.node_path,
        &item.component_type,
        item.component_order,
        item.property_path.as_deref(),
    )
}

fn modified_key(item: &ModifiedItem) -> (&str, &str, i32, &str) {
    (
        &item.node_path,
        &item.component_type,
        item.component_order,
        &item.property_path,
    )
}

/// Compare two snapshots
///
/// Matching is key-based at every level: nodes by stable path, components
/// by `(type_name, order)`, properties by path with ordinal exact-string
/// value comparison. A node present on only one side surfaces as a single
/// node-level item; the component and property entries beneath it are also
/// emitted, which is accepted redundancy rather than a defect.
pub fn diff(baseline: &SceneSnapshot, current: &SceneSnapshot) -> DiffResult {
    let mut result = DiffResult::default();

    let base_nodes: HashMap<&str, &crate::snapshot::model::NodeSnapshot> = baseline
        .nodes
        .iter()
        .map(|n| (n.path.as_str(), n))
        .collect();
    let cur_nodes: HashMap<&str, &crate::snapshot::model::NodeSnapshot> =
        current.nodes.iter().map(|n| (n.path.as_str(), n)).collect();

    for path in cur_nodes.keys() {
        if !base_nodes.contains_key(path) {
            result.added.push(node_item(path));
        }
    }
    for path in base_nodes.keys() {
        if !cur_nodes.contains_key(path) {
            result.removed.push(node_item(path));
        }
    }

    for (path, base_node) in &base_nodes {
        let Some(cur_node) = cur_nodes.get(path) else {
            continue;
        };
        diff_components(path, base_node, cur_node, &mut result);
    }

    result.added.sort_by(|a, b| change_key(a).cmp(&change_key(b)));
    result
        .removed
        .sort_by(|a, b| change_key(a).cmp(&change_key(b)));
    result
        .modified
        .sort_by(|a, b| modified_key(a).cmp(&modified_key(b)));

    debug!(
        added = result.added.len(),
        removed = result.removed.len(),
        modified = result.modified.len(),
        "Computed snapshot diff"
    );
    result
}

fn diff_components(
    path: &str,
    base_node: &crate::snapshot::model::NodeSnapshot,
    cur_node: &crate::snapshot::model::NodeSnapshot,
    result: &mut DiffResult,
) {
    type CompKey<'a> = (&'a str, i32);
    let base_comps: HashMap<CompKey, &crate::snapshot::model::ComponentSnapshot> = base_node
        .components
        .iter()
        .map(|c| ((c.type_name.as_str(), c.order), c))
        .collect();
    let cur_comps: HashMap<CompKey, &crate::snapshot::model::ComponentSnapshot> = cur_node
        .components
        .iter()
        .map(|c| ((c.type_name.as_str(), c.order), c))
        .collect();

    for (key, comp) in &cur_comps {
        if !base_comps.contains_key(key) {
            result.added.push(ChangeItem {
                node_path: path.to_string(),
                component_type: comp.type_name.clone(),
                component_order: comp.order,
                property_path: None,
            });
        }
    }
    for (key, comp) in &base_comps {
        if !cur_comps.contains_key(key) {
            result.removed.push(ChangeItem {
                node_path: path.to_string(),
                component_type: comp.type_name.clone(),
                component_order: comp.order,
                property_path: None,
            });
        }
    }

    for (key, base_comp) in &base_comps {
        let Some(cur_comp) = cur_comps.get(key) else {
            continue;
        };

        let base_props: HashMap<&str, &str> = base_comp
            .properties
            .iter()
            .map(|p| (p.property_path.as_str(), p.value.as_str()))
            .collect();
        let cur_props: HashMap<&str, &str> = cur_comp
            .properties
            .iter()
            .map(|p| (p.property_path.as_str(), p.value.as_str()))
            .collect();

        for prop in cur_props.keys() {
            if !base_props.contains_key(prop) {
                result.added.push(ChangeItem {
                    node_path: path.to_string(),
                    component_type: cur_comp.type_name.clone(),
                    component_order: cur_comp.order,
                    property_path: Some(prop.to_string()),
                });
            }
        }
        for prop in base_props.keys() {
            if !cur_props.contains_key(prop) {
                result.removed.push(ChangeItem {
                    node_path: path.to_string(),
                    component_type: base_comp.type_name.clone(),
                    component_order: base_comp.order,
                    property_path: Some(prop.to_string()),
                });
            }
        }

        for (prop, before) in &base_props {
            let Some(after) = cur_props.get(prop) else {
                continue;
            };
            if before != after {
                result.modified.push(ModifiedItem {
                    node_path: path.to_string(),
                    component_type: base_comp.type_name.clone(),
                    component_order: base_comp.order,
                    property_path: prop.to_string(),
                    before: before.to_string(),
                    after: after.to_string(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::model::{ComponentSnapshot, NodeSnapshot, PropertyKV};

    fn prop(path: &str, value: &str) -> PropertyKV {
        PropertyKV {
            property_path: path.into(),
            value: value.into(),
        }
    }

    fn comp(type_name: &str, order: i32, properties: Vec<PropertyKV>) -> ComponentSnapshot {
        ComponentSnapshot {
            type_name: type_name.into(),
            order,
            properties,
        }
    }

    fn node(path: &str, components: Vec<ComponentSnapshot>) -> NodeSnapshot {
        NodeSnapshot {
            path: path.into(),
            components,
        }
    }

    fn snapshot(nodes: Vec<NodeSnapshot>) -> SceneSnapshot {
        SceneSnapshot {
            scene_path: "demo.scene".into(),
            nodes,
        }
    }

    fn cube_at(position: &str) -> SceneSnapshot {
        snapshot(vec![node(
            "Cube[0]",
            vec![comp("Transform", 0, vec![prop("local_position", position)])],
        )])
    }

    #[test]
    fn identical_snapshots_diff_empty() {
        let snap = cube_at("(0.000000,0.000000,0.000000)");
        let result = diff(&snap, &snap);
        assert!(result.is_empty());
    }

    #[test]
    fn moved_node_is_a_single_modification() {
        let baseline = cube_at("(0.000000,0.000000,0.000000)");
        let current = cube_at("(1.000000,0.000000,0.000000)");
        let result = diff(&baseline, &current);

        assert!(result.added.is_empty());
        assert!(result.removed.is_empty());
        assert_eq!(result.modified.len(), 1);
        let item = &result.modified[0];
        assert_eq!(item.node_path, "Cube[0]");
        assert_eq!(item.component_type, "Transform");
        assert_eq!(item.property_path, "local_position");
        assert_eq!(item.before, "(0.000000,0.000000,0.000000)");
        assert_eq!(item.after, "(1.000000,0.000000,0.000000)");
    }

    #[test]
    fn added_node_emits_node_level_item() {
        let baseline = cube_at("(0.000000,0.000000,0.000000)");
        let mut current = cube_at("(0.000000,0.000000,0.000000)");
        current.nodes.push(node(
            "Sphere[1]",
            vec![comp("Transform", 0, vec![prop("local_position", "(0.000000,0.000000,0.000000)")])],
        ));
        let result = diff(&baseline, &current);

        let node_level = result
            .added
            .iter()
            .find(|i| i.property_path.is_none() && i.component_type == NODE_ITEM_TYPE)
            .expect("node-level added item");
        assert_eq!(node_level.node_path, "Sphere[1]");
        assert_eq!(node_level.component_order, NODE_ITEM_ORDER);

        // the nested component/property cascade is accepted behavior: the
        // node-level item must exist, anything beneath it may too
        assert!(result
            .added
            .iter()
            .all(|i| i.node_path == "Sphere[1]"));
        assert!(result.removed.is_empty());
        assert!(result.modified.is_empty());
    }

    #[test]
    fn removed_component_is_component_level() {
        let baseline = snapshot(vec![node(
            "Rig[0]",
            vec![
                comp("Transform", 0, vec![prop("local_position", "(0.000000,0.000000,0.000000)")]),
                comp("Light", 1, vec![prop("intensity", "1")]),
            ],
        )]);
        let current = snapshot(vec![node(
            "Rig[0]",
            vec![comp("Transform", 0, vec![prop("local_position", "(0.000000,0.000000,0.000000)")])],
        )]);
        let result = diff(&baseline, &current);

        assert!(result.added.is_empty());
        assert!(result.modified.is_empty());
        let component_level: Vec<_> = result
            .removed
            .iter()
            .filter(|i| i.property_path.is_none())
            .collect();
        assert_eq!(component_level.len(), 1);
        assert_eq!(component_level[0].component_type, "Light");
        assert_eq!(component_level[0].component_order, 1);
    }

    #[test]
    fn same_type_components_matched_by_order() {
        let baseline = snapshot(vec![node(
            "Rig[0]",
            vec![
                comp("Light", 0, vec![prop("intensity", "1")]),
                comp("Light", 1, vec![prop("intensity", "2")]),
            ],
        )]);
        let current = snapshot(vec![node(
            "Rig[0]",
            vec![
                comp("Light", 0, vec![prop("intensity", "1")]),
                comp("Light", 1, vec![prop("intensity", "5")]),
            ],
        )]);
        let result = diff(&baseline, &current);

        assert_eq!(result.modified.len(), 1);
        assert_eq!(result.modified[0].component_order, 1);
        assert_eq!(result.modified[0].before, "2");
        assert_eq!(result.modified[0].after, "5");
    }

    #[test]
    fn diff_is_symmetric() {
        let a = cube_at("(0.000000,0.000000,0.000000)");
        let mut b = cube_at("(0.000000,0.000000,0.000000)");
        b.nodes.push(node("Sphere[1]", vec![comp("Light", 0, vec![prop("intensity", "1")])]));

        let forward = diff(&a, &b);
        let backward = diff(&b, &a);

        let added_keys: Vec<_> = forward.added.iter().map(change_key).collect();
        let removed_keys: Vec<_> = backward.removed.iter().map(change_key).collect();
        assert_eq!(added_keys, removed_keys);
    }

    #[test]
    fn output_order_is_independent_of_input_order() {
        let ordered = snapshot(vec![
            node("A[0]", vec![comp("Transform", 0, vec![prop("p", "1")])]),
            node("B[1]", vec![comp("Transform", 0, vec![prop("p", "2")])]),
        ]);
        let mut permuted = ordered.clone();
        permuted.nodes.reverse();
        permuted.nodes[0].components[0].properties.reverse();

        let empty = snapshot(vec![]);
        assert_eq!(diff(&ordered, &empty), diff(&permuted, &empty));
        assert_eq!(diff(&empty, &ordered), diff(&empty, &permuted));
    }

    #[test]
    fn output_sorts_by_path_type_order_then_property() {
        let baseline = snapshot(vec![node(
            "A[0]",
            vec![comp("Light", 0, vec![prop("a", "1")])],
        )]);
        let current = snapshot(vec![
            node(
                "A[0]",
                vec![
                    comp("Light", 0, vec![prop("a", "1"), prop("b", "2"), prop("aa", "3")]),
                    comp("Camera", 1, vec![]),
                ],
            ),
            node("A[1]", vec![]),
        ]);
        let result = diff(&baseline, &current);

        let keys: Vec<_> = result.added.iter().map(change_key).collect();
        assert_eq!(
            keys,
            vec![
                ("A[0]", "Camera", 1, None),
                ("A[0]", "Light", 0, Some("aa")),
                ("A[0]", "Light", 0, Some("b")),
                ("A[1]", NODE_ITEM_TYPE, NODE_ITEM_ORDER, None),
            ]
        );
    }

    #[test]
    fn added_node_contents_are_not_diffed_as_cascades() {
        // a brand-new node surfaces as one node-level item; its components
        // and properties are covered by that item, not re-reported
        let baseline = snapshot(vec![]);
        let current = snapshot(vec![node(
            "Z[0]",
            vec![comp("Light", 0, vec![prop("intensity", "1")])],
        )]);
        let result = diff(&baseline, &current);

        assert_eq!(result.added.len(), 1);
        assert_eq!(result.added[0].component_type, NODE_ITEM_TYPE);
    }

    #[test]
    fn value_comparison_is_ordinal() {
        // "1.0" and "1" are different strings, therefore a modification
        let baseline = snapshot(vec![node(
            "A[0]",
            vec![comp("Light", 0, vec![prop("intensity", "1.0")])],
        )]);
        let current = snapshot(vec![node(
            "A[0]",
            vec![comp("Light", 0, vec![prop("intensity", "1")])],
        )]);
        assert_eq!(diff(&baseline, &current).modified.len(), 1);
    }
}
