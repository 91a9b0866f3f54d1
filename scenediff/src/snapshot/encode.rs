//! Canonical string encoding of field values
//!
//! Every field value becomes a string that is stable across loads and exact
//! enough for equality comparison: scalar floats use the shortest
//! round-trippable form, tuples use fixed six-decimal precision, references
//! become content-addressed tokens. Encoding never fails; kinds the walker
//! cannot break down become the empty marker.

use crate::assets::AssetResolver;
use crate::fields::{FieldValue, ObjectRef};
use glam::EulerRot;

/// Property paths that differ between serialized copies of logically
/// identical data. Snapshots drop them; they would only produce diff noise.
pub fn is_volatile_path(path: &str) -> bool {
    if path.ends_with(".file_id") {
        return true;
    }
    matches!(
        path,
        "file_id" | "instance_id" | "hide_flags" | "prefab_source" | "script_ref"
    )
}

/// Encode a field value to its canonical string form
pub fn encode_value(value: &FieldValue, assets: &dyn AssetResolver) -> String {
    match value {
        FieldValue::Int(v) => v.to_string(),
        FieldValue::Bool(v) => (if *v { "true" } else { "false" }).to_string(),
        FieldValue::Float(v) => format!("{v}"),
        FieldValue::String(v) => v.clone(),
        FieldValue::Color(c) => format!("({:.6},{:.6},{:.6},{:.6})", c[0], c[1], c[2], c[3]),
        FieldValue::Vec2(v) => format!("({:.6},{:.6})", v.x, v.y),
        FieldValue::Vec3(v) => format!("({:.6},{:.6},{:.6})", v.x, v.y, v.z),
        FieldValue::Vec4(v) => format!("({:.6},{:.6},{:.6},{:.6})", v.x, v.y, v.z, v.w),
        FieldValue::Quat(q) => {
            let (x, y, z) = q.to_euler(EulerRot::XYZ);
            format!(
                "euler({:.6},{:.6},{:.6})",
                x.to_degrees(),
                y.to_degrees(),
                z.to_degrees()
            )
        }
        FieldValue::Rect(r) => format!("({:.6},{:.6},{:.6},{:.6})", r[0], r[1], r[2], r[3]),
        FieldValue::Bounds { center, size } => format!(
            "center({:.6},{:.6},{:.6}) size({:.6},{:.6},{:.6})",
            center.x, center.y, center.z, size.x, size.y, size.z
        ),
        FieldValue::Enum { names, index } => names
            .get(usize::try_from(*index).unwrap_or(usize::MAX))
            .cloned()
            .unwrap_or_else(|| index.to_string()),
        FieldValue::LayerMask(v) => v.to_string(),
        FieldValue::Character(v) => v.to_string(),
        FieldValue::Curve(keys) => {
            let joined: Vec<String> = keys
                .iter()
                .map(|k| format!("{:.6},{:.6},{:.6},{:.6}", k[0], k[1], k[2], k[3]))
                .collect();
            format!("keys:{}", joined.join("|"))
        }
        FieldValue::ObjectRef(r) => encode_object_ref(r, assets),
        FieldValue::Unsupported => String::new(),
    }
}

fn encode_object_ref(reference: &ObjectRef, assets: &dyn AssetResolver) -> String {
    match reference {
        ObjectRef::None => "null".to_string(),
        ObjectRef::Asset { path, local_id } => {
            format!("asset:{}:{}", assets.guid_for_path(path), local_id)
        }
        ObjectRef::SceneComponent {
            type_name,
            node_path,
        } => format!("sceneComp:{type_name}@{node_path}"),
        ObjectRef::SceneNode { node_path } => format!("sceneGO:{node_path}"),
        ObjectRef::Other { name, type_name } => format!("sceneObj:{name}:{type_name}"),
    }
}
