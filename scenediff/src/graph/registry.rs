//! Component registry for scene-file deserialization
//!
//! Maps component type names to deserializer functions so scene files can
//! round-trip into boxed [`Inspect`] values without the loader knowing every
//! concrete type.

use crate::fields::Inspect;
use crate::graph::SceneError;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// A function that deserializes a component from a JSON value
pub type ComponentDeserializerFn =
    Arc<dyn Fn(&serde_json::Value) -> Result<Box<dyn Inspect>, serde_json::Error> + Send + Sync>;

/// Registry of component deserializers keyed by type name
#[derive(Default)]
pub struct ComponentRegistry {
    deserializers: HashMap<String, ComponentDeserializerFn>,
}

impl ComponentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            deserializers: HashMap::new(),
        }
    }

    /// Register a component type under the given name
    pub fn register<T>(&mut self, type_name: &str)
    where
        T: Inspect + serde::de::DeserializeOwned + 'static,
    {
        let deserializer: ComponentDeserializerFn = Arc::new(move |value| {
            let component: T = serde_json::from_value(value.clone())?;
            Ok(Box::new(component) as Box<dyn Inspect>)
        });

        self.deserializers
            .insert(type_name.to_string(), deserializer);
        debug!(type_name = type_name, "Registered component deserializer");
    }

    /// Deserialize a component from a JSON value
    pub fn deserialize_component(
        &self,
        type_name: &str,
        value: &serde_json::Value,
    ) -> Result<Box<dyn Inspect>, SceneError> {
        match self.deserializers.get(type_name) {
            Some(deserializer) => Ok(deserializer(value)?),
            None => Err(SceneError::UnknownComponent(type_name.to_string())),
        }
    }

    /// Check whether a component type is registered
    pub fn is_registered(&self, type_name: &str) -> bool {
        self.deserializers.contains_key(type_name)
    }

    /// All registered component type names
    pub fn registered_types(&self) -> impl Iterator<Item = &str> {
        self.deserializers.keys().map(|s| s.as_str())
    }

    /// Number of registered component types
    pub fn len(&self) -> usize {
        self.deserializers.len()
    }

    /// Check whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.deserializers.is_empty()
    }

    /// Create a registry with every built-in component registered
    pub fn with_builtin_components() -> Self {
        use crate::graph::components::{
            Camera, CustomProperties, Light, MeshRenderer, Name, Transform,
        };

        let mut registry = Self::new();
        registry.register::<Name>("Name");
        registry.register::<Transform>("Transform");
        registry.register::<Camera>("Camera");
        registry.register::<Light>("Light");
        registry.register::<MeshRenderer>("MeshRenderer");
        registry.register::<CustomProperties>("CustomProperties");

        debug!(
            component_count = registry.len(),
            "Created registry with built-in components"
        );

        registry
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field(
                "registered_types",
                &self.deserializers.keys().collect::<Vec<_>>(),
            )
            .finish()
    }
}
