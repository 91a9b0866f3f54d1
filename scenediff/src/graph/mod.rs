//! In-memory scene graph
//!
//! An ordered tree of nodes, each carrying components in attachment order.
//! Sibling order is part of the model: the stable path namer keys nodes by
//! name plus sibling index, so reordering children changes their identity.

pub mod components;
pub mod provider;
pub mod registry;

use crate::fields::Inspect;
use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

pub use provider::{MemorySceneProvider, SceneLibrary, SceneProvider, ScopedScene};
pub use registry::ComponentRegistry;

/// Errors that can occur while loading or resolving scenes
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown component type: {0}")]
    UnknownComponent(String),

    #[error("Scene not found: {0}")]
    NotFound(String),
}

// Instance ids are handed out per process, so two loads of the same scene
// file never agree on them. The snapshot walk must treat them as noise.
static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

fn next_instance_id() -> u64 {
    NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed)
}

/// A component attached to a node, together with the bookkeeping the
/// serialization layer exposes alongside it
pub struct AttachedComponent {
    /// Assigned when the owning scene was loaded; differs between loads
    pub instance_id: u64,
    /// Identifier of this serialized copy within the scene file
    pub file_id: i64,
    pub hide_flags: u32,
    pub component: Box<dyn Inspect>,
}

impl AttachedComponent {
    /// Attach a component with a fresh instance id
    pub fn new(file_id: i64, component: Box<dyn Inspect>) -> Self {
        Self {
            instance_id: next_instance_id(),
            file_id,
            hide_flags: 0,
            component,
        }
    }
}

impl std::fmt::Debug for AttachedComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttachedComponent")
            .field("instance_id", &self.instance_id)
            .field("file_id", &self.file_id)
            .field("type_name", &self.component.type_name())
            .finish()
    }
}

/// One node in the scene hierarchy
#[derive(Debug, Default)]
pub struct SceneNode {
    pub name: String,
    pub hide_flags: u32,
    /// Components in attachment order
    pub components: Vec<AttachedComponent>,
    /// Children in sibling order
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// Create an empty node with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Attach a component at the end of the attachment order
    pub fn attach(&mut self, component: Box<dyn Inspect>) -> &mut Self {
        let file_id = self.components.len() as i64 + 1;
        self.components
            .push(AttachedComponent::new(file_id, component));
        self
    }

    /// Builder-style variant of [`attach`](Self::attach)
    pub fn with_component(mut self, component: Box<dyn Inspect>) -> Self {
        self.attach(component);
        self
    }

    /// Builder-style child append
    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }
}

/// A loaded scene: ordered roots plus the path it was loaded from
#[derive(Debug, Default)]
pub struct SceneGraph {
    pub scene_path: String,
    pub roots: Vec<SceneNode>,
}

impl SceneGraph {
    /// Create an empty scene graph for the given scene path
    pub fn new(scene_path: impl Into<String>) -> Self {
        Self {
            scene_path: scene_path.into(),
            roots: Vec::new(),
        }
    }

    /// Builder-style root append
    pub fn with_root(mut self, root: SceneNode) -> Self {
        self.roots.push(root);
        self
    }
}
