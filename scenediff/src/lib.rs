//! Scene snapshot and diff toolkit
//!
//! This crate records order-independent snapshots of a scene graph's
//! structure and property values, compares two snapshots into a
//! deterministic added/removed/modified report, and persists baselines
//! with a layered recovery strategy for damaged records.

pub mod assets;
pub mod diff;
pub mod fields;
pub mod graph;
pub mod snapshot;
pub mod store;

// Re-export commonly used types
pub mod prelude {
    pub use crate::assets::{AssetDb, AssetResolver};
    pub use crate::diff::{diff, ChangeItem, DiffFilter, DiffResult, ModifiedItem};
    pub use crate::fields::{FieldEntry, FieldValue, Inspect, ObjectRef};
    pub use crate::graph::{
        ComponentRegistry, SceneError, SceneGraph, SceneLibrary, SceneNode, SceneProvider,
    };
    pub use crate::snapshot::{SceneSnapshot, SnapshotBuilder};
    pub use crate::store::{BaselineRecord, BaselineStore, SaveOutcome};

    pub use glam::{Quat, Vec2, Vec3, Vec4};
}

/// Initialize logging for the toolkit binaries
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
