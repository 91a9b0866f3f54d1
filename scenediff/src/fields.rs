//! Field inspection layer for generic component walking
//!
//! Components expose their serializable state as flat (path, value) entries
//! so the snapshot builder can walk any component without knowing its
//! concrete layout.

use glam::{Quat, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reference to another object, rendered to a stable token at encode time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObjectRef {
    /// No target
    None,
    /// A persisted asset, addressed by project-relative path plus the
    /// identifier of the referenced object inside that asset
    Asset { path: String, local_id: i64 },
    /// A component attached to a node in the same scene
    SceneComponent {
        type_name: String,
        node_path: String,
    },
    /// A node in the same scene
    SceneNode { node_path: String },
    /// Anything else we can only address by name and type
    Other { name: String, type_name: String },
}

impl Default for ObjectRef {
    fn default() -> Self {
        ObjectRef::None
    }
}

/// One animation curve keyframe: (time, value, in_tangent, out_tangent)
pub type CurveKey = [f32; 4];

/// A value read from a component field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Bool(bool),
    Float(f32),
    String(String),
    Color([f32; 4]),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Quat(Quat),
    /// (x, y, width, height)
    Rect([f32; 4]),
    Bounds { center: Vec3, size: Vec3 },
    /// Enumerated value with its display names; index may fall outside
    /// `names` when the names are unavailable
    Enum { names: Vec<String>, index: i32 },
    LayerMask(u32),
    Character(u32),
    Curve(Vec<CurveKey>),
    ObjectRef(ObjectRef),
    /// Kinds the walker cannot break down further
    Unsupported,
}

/// One inspectable field of a component
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEntry {
    /// Dotted/bracketed path within the component's serialized layout
    pub path: String,
    pub value: FieldValue,
    /// Non-editable fields are skipped by the snapshot walk
    pub editable: bool,
}

impl FieldEntry {
    /// Create an editable field entry
    pub fn new(path: impl Into<String>, value: FieldValue) -> Self {
        Self {
            path: path.into(),
            value,
            editable: true,
        }
    }

    /// Create a read-only field entry
    pub fn read_only(path: impl Into<String>, value: FieldValue) -> Self {
        Self {
            path: path.into(),
            value,
            editable: false,
        }
    }
}

/// Error raised when a component fails to enumerate its fields
#[derive(Debug, Clone, Error)]
#[error("{type_name}: {message}")]
pub struct InspectError {
    pub type_name: String,
    pub message: String,
}

impl InspectError {
    pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
        }
    }
}

/// Trait for components that expose their serialized state for walking
pub trait Inspect {
    /// Fully-qualified type identifier, stable across loads
    fn type_name(&self) -> &str;

    /// Enumerate every inspectable field in declaration order
    fn fields(&self) -> Result<Vec<FieldEntry>, InspectError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_entry_editable_flag() {
        let entry = FieldEntry::new("intensity", FieldValue::Float(1.0));
        assert!(entry.editable);

        let entry = FieldEntry::read_only("bounds", FieldValue::Unsupported);
        assert!(!entry.editable);
    }

    #[test]
    fn inspect_error_display() {
        let err = InspectError::new("Light", "cookie texture unavailable");
        assert_eq!(err.to_string(), "Light: cookie texture unavailable");
    }
}
