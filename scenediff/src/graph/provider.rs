//! Scene loading and the open-scene set
//!
//! [`SceneLibrary`] is the file-backed provider used by the tools; tests use
//! hand-built providers. [`ScopedScene`] gives the snapshot builder its
//! temp-load discipline: a scene opened for a walk is closed again on every
//! exit path, so the open-scene set is left exactly as it was found.

use crate::graph::{AttachedComponent, ComponentRegistry, SceneError, SceneGraph, SceneNode};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Serialized form of one scene file
#[derive(Debug, Deserialize)]
struct SceneFile {
    #[serde(default)]
    nodes: Vec<NodeData>,
}

#[derive(Debug, Deserialize)]
struct NodeData {
    name: String,
    #[serde(default)]
    hide_flags: u32,
    #[serde(default)]
    components: Vec<ComponentData>,
    #[serde(default)]
    children: Vec<NodeData>,
}

#[derive(Debug, Deserialize)]
struct ComponentData {
    #[serde(rename = "type")]
    type_name: String,
    /// Identifier of this serialized copy; derived from file order if absent
    file_id: Option<i64>,
    #[serde(default)]
    hide_flags: u32,
    #[serde(default = "default_component_data")]
    data: serde_json::Value,
}

fn default_component_data() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// Access to scenes by path, plus the set of currently open scenes
pub trait SceneProvider {
    /// Whether the scene is currently in the open-scene set
    fn is_loaded(&self, scene_path: &str) -> bool;

    /// The loaded graph for a scene, if it is open
    fn loaded(&self, scene_path: &str) -> Option<&SceneGraph>;

    /// Open a scene additively, leaving already-open scenes untouched
    fn open_scene(&mut self, scene_path: &str) -> Result<(), SceneError>;

    /// Remove a scene from the open-scene set
    fn close_scene(&mut self, scene_path: &str);
}

/// Opens a scene for the duration of a walk and restores the open-scene set
/// on drop, including when the walk panics or errors out early
pub struct ScopedScene<'a, P: SceneProvider + ?Sized> {
    provider: &'a mut P,
    scene_path: String,
    opened_here: bool,
}

impl<'a, P: SceneProvider + ?Sized> ScopedScene<'a, P> {
    /// Ensure the scene is loaded, side-loading it if necessary
    pub fn open(provider: &'a mut P, scene_path: &str) -> Result<Self, SceneError> {
        let opened_here = !provider.is_loaded(scene_path);
        if opened_here {
            debug!(scene_path = scene_path, "Side-loading scene for walk");
            provider.open_scene(scene_path)?;
        }
        Ok(Self {
            provider,
            scene_path: scene_path.to_string(),
            opened_here,
        })
    }

    /// The graph of the scoped scene
    pub fn graph(&self) -> Option<&SceneGraph> {
        self.provider.loaded(&self.scene_path)
    }
}

impl<P: SceneProvider + ?Sized> Drop for ScopedScene<'_, P> {
    fn drop(&mut self) {
        if self.opened_here {
            debug!(scene_path = %self.scene_path, "Closing side-loaded scene");
            self.provider.close_scene(&self.scene_path);
        }
    }
}

/// File-backed scene provider rooted at a project directory
pub struct SceneLibrary {
    root: PathBuf,
    registry: ComponentRegistry,
    open: Vec<SceneGraph>,
}

impl SceneLibrary {
    /// Create a library reading scene files under `root`
    pub fn new(root: impl Into<PathBuf>, registry: ComponentRegistry) -> Self {
        Self {
            root: root.into(),
            registry,
            open: Vec::new(),
        }
    }

    /// Paths of all currently open scenes, in open order
    pub fn open_scene_paths(&self) -> Vec<&str> {
        self.open.iter().map(|g| g.scene_path.as_str()).collect()
    }

    fn scene_file_path(&self, scene_path: &str) -> PathBuf {
        self.root.join(scene_path)
    }

    fn load_graph(&self, scene_path: &str) -> Result<SceneGraph, SceneError> {
        let file_path = self.scene_file_path(scene_path);
        info!(path = ?file_path, "Loading scene");

        let json = fs::read_to_string(&file_path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => SceneError::NotFound(scene_path.to_string()),
            _ => SceneError::Io(e),
        })?;
        let file: SceneFile = serde_json::from_str(&json)?;

        let mut graph = SceneGraph::new(scene_path);
        for node in &file.nodes {
            graph.roots.push(self.build_node(node));
        }

        info!(
            scene_path = scene_path,
            root_count = graph.roots.len(),
            "Scene loaded"
        );
        Ok(graph)
    }

    fn build_node(&self, data: &NodeData) -> SceneNode {
        let mut node = SceneNode::new(&data.name);
        node.hide_flags = data.hide_flags;

        for (index, comp) in data.components.iter().enumerate() {
            match self
                .registry
                .deserialize_component(&comp.type_name, &comp.data)
            {
                Ok(component) => {
                    let file_id = comp.file_id.unwrap_or(index as i64 + 1);
                    let mut attached = AttachedComponent::new(file_id, component);
                    attached.hide_flags = comp.hide_flags;
                    node.components.push(attached);
                }
                Err(e) => {
                    warn!(
                        node = %data.name,
                        component_type = %comp.type_name,
                        error = %e,
                        "Skipping component that failed to deserialize"
                    );
                }
            }
        }

        for child in &data.children {
            node.children.push(self.build_node(child));
        }
        node
    }
}

impl SceneProvider for SceneLibrary {
    fn is_loaded(&self, scene_path: &str) -> bool {
        self.open.iter().any(|g| g.scene_path == scene_path)
    }

    fn loaded(&self, scene_path: &str) -> Option<&SceneGraph> {
        self.open.iter().find(|g| g.scene_path == scene_path)
    }

    fn open_scene(&mut self, scene_path: &str) -> Result<(), SceneError> {
        if self.is_loaded(scene_path) {
            return Ok(());
        }
        let graph = self.load_graph(scene_path)?;
        self.open.push(graph);
        Ok(())
    }

    fn close_scene(&mut self, scene_path: &str) {
        self.open.retain(|g| g.scene_path != scene_path);
    }
}

/// In-memory provider holding pre-built graphs; used by tests and by
/// callers that already hold a live graph
#[derive(Default)]
pub struct MemorySceneProvider {
    scenes: Vec<SceneGraph>,
    open: Vec<String>,
}

impl MemorySceneProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scene to the library without opening it
    pub fn insert(&mut self, graph: SceneGraph) {
        self.scenes.push(graph);
    }

    /// Paths of all currently open scenes, in open order
    pub fn open_scene_paths(&self) -> &[String] {
        &self.open
    }
}

impl SceneProvider for MemorySceneProvider {
    fn is_loaded(&self, scene_path: &str) -> bool {
        self.open.iter().any(|p| p == scene_path)
    }

    fn loaded(&self, scene_path: &str) -> Option<&SceneGraph> {
        if !self.is_loaded(scene_path) {
            return None;
        }
        self.scenes.iter().find(|g| g.scene_path == scene_path)
    }

    fn open_scene(&mut self, scene_path: &str) -> Result<(), SceneError> {
        if !self.scenes.iter().any(|g| g.scene_path == scene_path) {
            return Err(SceneError::NotFound(scene_path.to_string()));
        }
        if !self.is_loaded(scene_path) {
            self.open.push(scene_path.to_string());
        }
        Ok(())
    }

    fn close_scene(&mut self, scene_path: &str) {
        self.open.retain(|p| p != scene_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::components::Name;

    fn demo_scene_json() -> &'static str {
        r#"{
            "nodes": [
                {
                    "name": "Cube",
                    "components": [
                        {
                            "type": "Transform",
                            "data": {
                                "position": [0.0, 0.0, 0.0],
                                "rotation": [0.0, 0.0, 0.0, 1.0],
                                "scale": [1.0, 1.0, 1.0]
                            }
                        },
                        { "type": "Rigidbody", "data": {} }
                    ],
                    "children": [
                        { "name": "Child", "components": [] }
                    ]
                }
            ]
        }"#
    }

    fn library_with_demo_scene() -> (tempfile::TempDir, SceneLibrary) {
        let dir = tempfile::tempdir().unwrap();
        let scenes = dir.path().join("scenes");
        fs::create_dir_all(&scenes).unwrap();
        fs::write(scenes.join("demo.scene.json"), demo_scene_json()).unwrap();
        let library = SceneLibrary::new(dir.path(), ComponentRegistry::with_builtin_components());
        (dir, library)
    }

    #[test]
    fn open_scene_builds_graph_and_skips_unknown_components() {
        let (_dir, mut library) = library_with_demo_scene();
        library.open_scene("scenes/demo.scene.json").unwrap();

        let graph = library.loaded("scenes/demo.scene.json").unwrap();
        assert_eq!(graph.roots.len(), 1);
        let cube = &graph.roots[0];
        assert_eq!(cube.name, "Cube");
        // the unregistered Rigidbody is dropped, the Transform survives
        assert_eq!(cube.components.len(), 1);
        assert_eq!(cube.components[0].component.type_name(), "Transform");
        assert_eq!(cube.children.len(), 1);
    }

    #[test]
    fn open_missing_scene_is_not_found() {
        let (_dir, mut library) = library_with_demo_scene();
        let err = library.open_scene("scenes/absent.scene.json").unwrap_err();
        assert!(matches!(err, SceneError::NotFound(_)));
        assert!(library.open_scene_paths().is_empty());
    }

    #[test]
    fn scoped_scene_restores_open_set() {
        let mut provider = MemorySceneProvider::new();
        provider.insert(SceneGraph::new("a.scene").with_root(SceneNode::new("Root")));

        {
            let scoped = ScopedScene::open(&mut provider, "a.scene").unwrap();
            assert!(scoped.graph().is_some());
        }
        assert!(provider.open_scene_paths().is_empty());
    }

    #[test]
    fn scoped_scene_leaves_already_open_scene_open() {
        let mut provider = MemorySceneProvider::new();
        provider.insert(
            SceneGraph::new("a.scene")
                .with_root(SceneNode::new("Root").with_component(Box::new(Name::new("Root")))),
        );
        provider.open_scene("a.scene").unwrap();

        {
            let scoped = ScopedScene::open(&mut provider, "a.scene").unwrap();
            assert!(scoped.graph().is_some());
        }
        assert_eq!(provider.open_scene_paths(), ["a.scene"]);
    }

    #[test]
    fn scoped_scene_closes_on_panic() {
        let mut provider = MemorySceneProvider::new();
        provider.insert(SceneGraph::new("a.scene"));

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _scoped = ScopedScene::open(&mut provider, "a.scene").unwrap();
            panic!("walk blew up");
        }));
        assert!(result.is_err());
        assert!(provider.open_scene_paths().is_empty());
    }
}
