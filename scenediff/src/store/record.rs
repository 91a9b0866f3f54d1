//! Persisted baseline record

use crate::snapshot::model::SceneSnapshot;
use serde::{Deserialize, Serialize};

/// On-disk form of a saved baseline
///
/// The snapshot travels as an embedded JSON string so the record survives
/// partial schema drift: recovery only needs to pull the payload back out,
/// not understand it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineRecord {
    pub scene_guid: String,
    pub scene_path: String,
    pub snapshot_json: String,
    pub timestamp: String,
}

impl BaselineRecord {
    /// Build a record for a snapshot, stamped with the current local time
    pub fn new(
        scene_guid: impl Into<String>,
        snapshot: &SceneSnapshot,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            scene_guid: scene_guid.into(),
            scene_path: snapshot.scene_path.clone(),
            snapshot_json: serde_json::to_string(snapshot)?,
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        })
    }

    /// Decode the embedded snapshot payload
    pub fn snapshot(&self) -> Result<SceneSnapshot, serde_json::Error> {
        serde_json::from_str(&self.snapshot_json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_embeds_round_trippable_snapshot() {
        let snapshot = SceneSnapshot {
            scene_path: "scenes/demo.scene.json".into(),
            nodes: Vec::new(),
        };
        let record = BaselineRecord::new("abc123", &snapshot).unwrap();
        assert_eq!(record.scene_path, "scenes/demo.scene.json");
        assert_eq!(record.snapshot().unwrap(), snapshot);
        // "%Y-%m-%d %H:%M:%S"
        assert_eq!(record.timestamp.len(), 19);
    }
}
