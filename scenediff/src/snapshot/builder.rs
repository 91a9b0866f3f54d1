//! Snapshot construction
//!
//! Walks a scene graph depth-first in pre-order and produces the flat,
//! order-stable snapshot the diff engine consumes. Scenes that are not in
//! the open-scene set are side-loaded for the duration of the walk and
//! closed again afterwards.

use crate::assets::AssetResolver;
use crate::graph::{SceneError, SceneGraph, SceneNode, SceneProvider, ScopedScene};
use crate::snapshot::encode::{encode_value, is_volatile_path};
use crate::snapshot::model::{ComponentSnapshot, NodeSnapshot, PropertyKV, SceneSnapshot};
use crate::snapshot::path::node_path;
use tracing::{debug, info};

/// Synthetic property recorded when a component fails to enumerate fields
pub const ERROR_PROPERTY: &str = "_error";

/// Builds scene snapshots against an asset resolver
pub struct SnapshotBuilder<'a> {
    assets: &'a dyn AssetResolver,
}

impl<'a> SnapshotBuilder<'a> {
    pub fn new(assets: &'a dyn AssetResolver) -> Self {
        Self { assets }
    }

    /// Build a snapshot for a scene by path, side-loading it if needed
    ///
    /// The provider's open-scene set is restored on every exit path.
    pub fn build_for_scene_path(
        &self,
        provider: &mut dyn SceneProvider,
        scene_path: &str,
    ) -> Result<SceneSnapshot, SceneError> {
        let scoped = ScopedScene::open(provider, scene_path)?;
        let graph = scoped
            .graph()
            .ok_or_else(|| SceneError::NotFound(scene_path.to_string()))?;
        Ok(self.build(graph))
    }

    /// Build a snapshot from an already-loaded graph
    pub fn build(&self, graph: &SceneGraph) -> SceneSnapshot {
        let mut snapshot = SceneSnapshot {
            scene_path: graph.scene_path.clone(),
            nodes: Vec::new(),
        };

        for (index, root) in graph.roots.iter().enumerate() {
            self.walk_node(root, None, index, &mut snapshot.nodes);
        }

        info!(
            scene_path = %snapshot.scene_path,
            node_count = snapshot.nodes.len(),
            "Built scene snapshot"
        );
        snapshot
    }

    fn walk_node(
        &self,
        node: &SceneNode,
        parent_path: Option<&str>,
        sibling_index: usize,
        out: &mut Vec<NodeSnapshot>,
    ) {
        let path = node_path(parent_path, &node.name, sibling_index);

        let mut components = Vec::with_capacity(node.components.len());
        for (order, attached) in node.components.iter().enumerate() {
            let mut snapshot = ComponentSnapshot {
                type_name: attached.component.type_name().to_string(),
                order: order as i32,
                properties: Vec::new(),
            };

            // The serialization layer exposes per-copy bookkeeping alongside
            // the real fields; it runs through the same denylist and is
            // dropped there.
            let bookkeeping = [
                ("file_id", attached.file_id.to_string()),
                ("instance_id", attached.instance_id.to_string()),
                ("hide_flags", attached.hide_flags.to_string()),
            ];
            for (prop_path, value) in bookkeeping {
                if is_volatile_path(prop_path) {
                    continue;
                }
                snapshot.properties.push(PropertyKV {
                    property_path: prop_path.to_string(),
                    value,
                });
            }

            match attached.component.fields() {
                Ok(fields) => {
                    for field in fields {
                        if !field.editable {
                            continue;
                        }
                        if is_volatile_path(&field.path) {
                            continue;
                        }
                        snapshot.properties.push(PropertyKV {
                            property_path: field.path,
                            value: encode_value(&field.value, self.assets),
                        });
                    }
                }
                Err(err) => {
                    debug!(
                        node_path = %path,
                        component_type = %snapshot.type_name,
                        error = %err,
                        "Component field walk failed, recording error property"
                    );
                    snapshot.properties.push(PropertyKV {
                        property_path: ERROR_PROPERTY.to_string(),
                        value: err.to_string(),
                    });
                }
            }

            components.push(snapshot);
        }

        out.push(NodeSnapshot {
            path: path.clone(),
            components,
        });

        for (index, child) in node.children.iter().enumerate() {
            self.walk_node(child, Some(&path), index, out);
        }
    }
}
