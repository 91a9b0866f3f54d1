//! Snapshot value model

use serde::{Deserialize, Serialize};

/// Snapshot of one scene at one point in time
///
/// `nodes` is ordered by the depth-first pre-order walk that produced it.
/// The order is diagnostic only; diffing matches nodes by path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub scene_path: String,
    #[serde(default)]
    pub nodes: Vec<NodeSnapshot>,
}

/// One node of the scene hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    /// Stable path, unique within a snapshot
    pub path: String,
    /// Components in attachment order
    #[serde(default)]
    pub components: Vec<ComponentSnapshot>,
}

/// One component attached to a node
///
/// `(type_name, order)` is the identity key for diffing: two components
/// match across snapshots only when both type and position agree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSnapshot {
    pub type_name: String,
    pub order: i32,
    #[serde(default)]
    pub properties: Vec<PropertyKV>,
}

/// One serialized field, canonically encoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyKV {
    pub property_path: String,
    pub value: String,
}
