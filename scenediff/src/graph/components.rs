//! Built-in component set
//!
//! These cover the common scene contents the diff tooling is pointed at.
//! Anything else goes through [`CustomProperties`], which carries free-form
//! entries straight from the scene file.

use crate::fields::{FieldEntry, FieldValue, Inspect, InspectError, ObjectRef};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// User-facing node label
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Name {
    pub value: String,
}

impl Name {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl Inspect for Name {
    fn type_name(&self) -> &str {
        "Name"
    }

    fn fields(&self) -> Result<Vec<FieldEntry>, InspectError> {
        Ok(vec![FieldEntry::new(
            "value",
            FieldValue::String(self.value.clone()),
        )])
    }
}

/// Local-space position, rotation, and scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a transform with the given position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
}

impl Inspect for Transform {
    fn type_name(&self) -> &str {
        "Transform"
    }

    fn fields(&self) -> Result<Vec<FieldEntry>, InspectError> {
        Ok(vec![
            FieldEntry::new("local_position", FieldValue::Vec3(self.position)),
            FieldEntry::new("local_rotation", FieldValue::Quat(self.rotation)),
            FieldEntry::new("local_scale", FieldValue::Vec3(self.scale)),
        ])
    }
}

/// Camera projection mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectionMode {
    Perspective,
    Orthographic,
}

impl ProjectionMode {
    const NAMES: [&'static str; 2] = ["Perspective", "Orthographic"];

    fn as_enum_value(self) -> FieldValue {
        FieldValue::Enum {
            names: Self::NAMES.iter().map(|s| s.to_string()).collect(),
            index: self as i32,
        }
    }
}

/// Scene camera
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub enabled: bool,
    pub projection: ProjectionMode,
    pub field_of_view: f32,
    pub orthographic_size: f32,
    pub near_plane: f32,
    pub far_plane: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            enabled: true,
            projection: ProjectionMode::Perspective,
            field_of_view: 60.0,
            orthographic_size: 5.0,
            near_plane: 0.1,
            far_plane: 1000.0,
        }
    }
}

impl Inspect for Camera {
    fn type_name(&self) -> &str {
        "Camera"
    }

    fn fields(&self) -> Result<Vec<FieldEntry>, InspectError> {
        Ok(vec![
            FieldEntry::new("enabled", FieldValue::Bool(self.enabled)),
            FieldEntry::new("projection", self.projection.as_enum_value()),
            FieldEntry::new("field_of_view", FieldValue::Float(self.field_of_view)),
            FieldEntry::new(
                "orthographic_size",
                FieldValue::Float(self.orthographic_size),
            ),
            FieldEntry::new("near_plane", FieldValue::Float(self.near_plane)),
            FieldEntry::new("far_plane", FieldValue::Float(self.far_plane)),
        ])
    }
}

/// Light source kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightKind {
    Directional,
    Point,
    Spot,
    Area,
}

impl LightKind {
    const NAMES: [&'static str; 4] = ["Directional", "Point", "Spot", "Area"];

    fn as_enum_value(self) -> FieldValue {
        FieldValue::Enum {
            names: Self::NAMES.iter().map(|s| s.to_string()).collect(),
            index: self as i32,
        }
    }
}

/// Shadow casting mode for lights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShadowMode {
    None,
    Hard,
    Soft,
}

impl ShadowMode {
    const NAMES: [&'static str; 3] = ["None", "Hard", "Soft"];

    fn as_enum_value(self) -> FieldValue {
        FieldValue::Enum {
            names: Self::NAMES.iter().map(|s| s.to_string()).collect(),
            index: self as i32,
        }
    }
}

/// Scene light
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub enabled: bool,
    pub kind: LightKind,
    pub color: [f32; 4],
    pub intensity: f32,
    pub range: f32,
    pub spot_angle: f32,
    pub shadows: ShadowMode,
    /// Projection texture, if any
    pub cookie: ObjectRef,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            enabled: true,
            kind: LightKind::Point,
            color: [1.0, 1.0, 1.0, 1.0],
            intensity: 1.0,
            range: 10.0,
            spot_angle: 30.0,
            shadows: ShadowMode::None,
            cookie: ObjectRef::None,
        }
    }
}

impl Inspect for Light {
    fn type_name(&self) -> &str {
        "Light"
    }

    fn fields(&self) -> Result<Vec<FieldEntry>, InspectError> {
        Ok(vec![
            FieldEntry::new("enabled", FieldValue::Bool(self.enabled)),
            FieldEntry::new("kind", self.kind.as_enum_value()),
            FieldEntry::new("color", FieldValue::Color(self.color)),
            FieldEntry::new("intensity", FieldValue::Float(self.intensity)),
            FieldEntry::new("range", FieldValue::Float(self.range)),
            FieldEntry::new("spot_angle", FieldValue::Float(self.spot_angle)),
            FieldEntry::new("shadows", self.shadows.as_enum_value()),
            FieldEntry::new("cookie", FieldValue::ObjectRef(self.cookie.clone())),
        ])
    }
}

/// Renders a mesh asset with one material per submesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshRenderer {
    pub enabled: bool,
    pub mesh: ObjectRef,
    pub materials: Vec<ObjectRef>,
    pub cast_shadows: bool,
}

impl Default for MeshRenderer {
    fn default() -> Self {
        Self {
            enabled: true,
            mesh: ObjectRef::None,
            materials: Vec::new(),
            cast_shadows: true,
        }
    }
}

impl Inspect for MeshRenderer {
    fn type_name(&self) -> &str {
        "MeshRenderer"
    }

    fn fields(&self) -> Result<Vec<FieldEntry>, InspectError> {
        let mut fields = vec![
            FieldEntry::new("enabled", FieldValue::Bool(self.enabled)),
            FieldEntry::new("mesh", FieldValue::ObjectRef(self.mesh.clone())),
        ];
        for (i, material) in self.materials.iter().enumerate() {
            fields.push(FieldEntry::new(
                format!("materials[{i}]"),
                FieldValue::ObjectRef(material.clone()),
            ));
        }
        fields.push(FieldEntry::new(
            "cast_shadows",
            FieldValue::Bool(self.cast_shadows),
        ));
        Ok(fields)
    }
}

fn default_true() -> bool {
    true
}

/// One free-form entry of a [`CustomProperties`] component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomEntry {
    pub path: String,
    pub value: serde_json::Value,
    #[serde(default = "default_true")]
    pub editable: bool,
}

/// Script-backed component with arbitrary serialized entries
///
/// The backing script reference is enumerated like any other field; the
/// snapshot walk drops it through the volatile denylist, matching how the
/// other identity fields are handled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomProperties {
    #[serde(default)]
    pub script: ObjectRef,
    #[serde(default)]
    pub entries: Vec<CustomEntry>,
}

impl CustomProperties {
    fn entry_value(value: &serde_json::Value) -> FieldValue {
        match value {
            serde_json::Value::Bool(b) => FieldValue::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Int(i)
                } else {
                    FieldValue::Float(n.as_f64().unwrap_or(0.0) as f32)
                }
            }
            serde_json::Value::String(s) => FieldValue::String(s.clone()),
            _ => FieldValue::Unsupported,
        }
    }
}

impl Inspect for CustomProperties {
    fn type_name(&self) -> &str {
        "CustomProperties"
    }

    fn fields(&self) -> Result<Vec<FieldEntry>, InspectError> {
        let mut fields = vec![FieldEntry::new(
            "script_ref",
            FieldValue::ObjectRef(self.script.clone()),
        )];
        for entry in &self.entries {
            fields.push(FieldEntry {
                path: entry.path.clone(),
                value: Self::entry_value(&entry.value),
                editable: entry.editable,
            });
        }
        Ok(fields)
    }
}
