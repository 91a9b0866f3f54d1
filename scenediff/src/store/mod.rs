//! Baseline persistence
//!
//! Baselines are keyed by the scene's content GUID and stored twice: a YAML
//! primary record and a JSON sidecar with the same fields. Loading walks a
//! four-tier recovery chain so a damaged or relocated primary still yields
//! the saved snapshot. Total failure is "not found", never an error.

pub mod record;
mod recover;

use crate::assets::AssetResolver;
use crate::snapshot::model::SceneSnapshot;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

pub use record::BaselineRecord;

const PRIMARY_SUFFIX: &str = "_baseline.yaml";
const SIDECAR_SUFFIX: &str = "_baseline.json";

/// Errors that can occur while saving a baseline
#[derive(Debug, Error)]
pub enum BaselineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Outcome of a save attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The record was written
    Saved,
    /// A record already exists and `overwrite` was false; nothing was
    /// written, the caller decides whether to retry with overwrite
    AlreadyExists,
}

/// Store for persisted baselines under one directory
pub struct BaselineStore<'a> {
    dir: PathBuf,
    assets: &'a dyn AssetResolver,
}

impl<'a> BaselineStore<'a> {
    pub fn new(dir: impl Into<PathBuf>, assets: &'a dyn AssetResolver) -> Self {
        Self {
            dir: dir.into(),
            assets,
        }
    }

    /// Path of the primary record for a scene
    pub fn record_path(&self, scene_path: &str) -> PathBuf {
        let guid = self.assets.guid_for_path(scene_path);
        self.dir.join(format!("{guid}{PRIMARY_SUFFIX}"))
    }

    fn sidecar_path(&self, scene_path: &str) -> PathBuf {
        let guid = self.assets.guid_for_path(scene_path);
        self.dir.join(format!("{guid}{SIDECAR_SUFFIX}"))
    }

    /// Persist a snapshot as the scene's baseline
    ///
    /// The primary write is all-or-nothing; the sidecar write afterwards is
    /// best-effort and never fails the save.
    pub fn save(
        &self,
        scene_path: &str,
        snapshot: &SceneSnapshot,
        overwrite: bool,
    ) -> Result<SaveOutcome, BaselineError> {
        if !overwrite && self.load(scene_path).is_some() {
            debug!(scene_path = scene_path, "Baseline exists, not overwriting");
            return Ok(SaveOutcome::AlreadyExists);
        }

        fs::create_dir_all(&self.dir)?;

        let guid = self.assets.guid_for_path(scene_path);
        let record = BaselineRecord::new(guid, snapshot)?;

        let primary = self.record_path(scene_path);
        let yaml = serde_yaml::to_string(&record)?;
        write_atomic(&primary, &yaml)?;
        info!(path = ?primary, scene_path = scene_path, "Saved baseline");

        let sidecar = self.sidecar_path(scene_path);
        match serde_json::to_string_pretty(&record) {
            Ok(json) => {
                if let Err(e) = fs::write(&sidecar, json) {
                    warn!(path = ?sidecar, error = %e, "Sidecar write failed");
                }
            }
            Err(e) => warn!(error = %e, "Sidecar encoding failed"),
        }

        Ok(SaveOutcome::Saved)
    }

    /// Load the baseline record for a scene through the recovery chain
    ///
    /// Tiers, first success wins: direct primary parse, sidecar parse,
    /// directory scan by embedded identity, pattern-match recovery from the
    /// damaged primary text. Every tier failure falls through.
    pub fn load(&self, scene_path: &str) -> Option<BaselineRecord> {
        let primary = self.record_path(scene_path);
        let primary_text = fs::read_to_string(&primary).ok();

        if let Some(text) = &primary_text {
            match serde_yaml::from_str::<BaselineRecord>(text) {
                Ok(record) => return Some(record),
                Err(e) => {
                    warn!(path = ?primary, error = %e, "Primary record unreadable, trying recovery")
                }
            }
        }

        if let Some(record) = self.load_sidecar(scene_path) {
            return Some(record);
        }

        if let Some(record) = self.scan_for(scene_path) {
            return Some(record);
        }

        if let Some(text) = &primary_text {
            if let Some(record) = recover::recover_from_text(text) {
                return Some(record);
            }
        }

        debug!(scene_path = scene_path, "No baseline found in any tier");
        None
    }

    /// Whether a baseline is recoverable through any tier
    pub fn exists(&self, scene_path: &str) -> bool {
        self.load(scene_path).is_some()
    }

    fn load_sidecar(&self, scene_path: &str) -> Option<BaselineRecord> {
        let path = self.sidecar_path(scene_path);
        let text = fs::read_to_string(&path).ok()?;

        #[derive(Deserialize)]
        struct Sidecar {
            #[serde(default)]
            scene_guid: String,
            #[serde(default)]
            scene_path: String,
            snapshot_json: String,
            #[serde(default)]
            timestamp: String,
        }

        match serde_json::from_str::<Sidecar>(&text) {
            Ok(sidecar) if !sidecar.snapshot_json.is_empty() => {
                info!(path = ?path, "Loaded baseline from sidecar");
                Some(BaselineRecord {
                    scene_guid: sidecar.scene_guid,
                    scene_path: sidecar.scene_path,
                    snapshot_json: sidecar.snapshot_json,
                    timestamp: sidecar.timestamp,
                })
            }
            Ok(_) => None,
            Err(e) => {
                warn!(path = ?path, error = %e, "Sidecar unreadable");
                None
            }
        }
    }

    /// Scan every record in the store, matching by embedded scene identity.
    /// Handles a primary record that was renamed or relocated within the
    /// baseline directory.
    fn scan_for(&self, scene_path: &str) -> Option<BaselineRecord> {
        let guid = self.assets.guid_for_path(scene_path);
        for record in self.list() {
            if record.scene_guid == guid || record.scene_path == scene_path {
                info!(scene_path = scene_path, "Found baseline by directory scan");
                return Some(record);
            }
        }
        None
    }

    /// All parseable primary records in the store, in file-name order
    pub fn list(&self) -> Vec<BaselineRecord> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .map(|n| n.ends_with(PRIMARY_SUFFIX))
                    .unwrap_or(false)
            })
            .collect();
        paths.sort();

        let mut records = Vec::new();
        for path in paths {
            let Ok(text) = fs::read_to_string(&path) else {
                continue;
            };
            match serde_yaml::from_str::<BaselineRecord>(&text) {
                Ok(record) => records.push(record),
                Err(e) => debug!(path = ?path, error = %e, "Skipping unparseable record in scan"),
            }
        }
        records
    }
}

/// Write a file through a temp sibling and rename, so readers never observe
/// a half-written record
fn write_atomic(path: &Path, contents: &str) -> Result<(), std::io::Error> {
    let tmp = path.with_extension("yaml.tmp");
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)
}
