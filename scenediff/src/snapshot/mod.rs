//! Scene snapshots
//!
//! A snapshot is an immutable, serializable record of one scene's structure
//! and property values at one instant. Snapshots are what the diff engine
//! compares and what the baseline store persists.

pub mod builder;
pub mod encode;
pub mod model;
pub mod path;

pub use builder::SnapshotBuilder;
pub use model::{ComponentSnapshot, NodeSnapshot, PropertyKV, SceneSnapshot};
