//! Asset identity resolution
//!
//! Maps project-relative asset paths to content GUIDs so object references
//! and baseline keys survive file moves that keep the manifest updated.
//! Paths missing from the manifest get a GUID derived from the path itself,
//! which is stable but changes when the file is renamed.

use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Errors reading an asset manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Resolves asset paths to content GUIDs
pub trait AssetResolver {
    /// Content GUID for the asset at `path`; always returns something
    fn guid_for_path(&self, path: &str) -> String;
}

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    assets: HashMap<String, String>,
}

/// Manifest-backed asset database
#[derive(Debug, Default)]
pub struct AssetDb {
    guids: HashMap<String, String>,
}

impl AssetDb {
    /// Create an empty database; every lookup falls back to a derived GUID
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a database from a JSON manifest of `{ "assets": { path: guid } }`
    pub fn from_manifest<P: AsRef<Path>>(path: P) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let manifest: Manifest = serde_json::from_str(&json)?;
        info!(path = ?path, asset_count = manifest.assets.len(), "Loaded asset manifest");
        Ok(Self {
            guids: manifest.assets,
        })
    }

    /// Register or replace the GUID for an asset path
    pub fn insert(&mut self, path: impl Into<String>, guid: impl Into<String>) {
        self.guids.insert(path.into(), guid.into());
    }

    fn derived_guid(path: &str) -> String {
        let digest = Sha256::digest(path.as_bytes());
        let mut guid = String::with_capacity(32);
        for byte in &digest[..16] {
            guid.push_str(&format!("{byte:02x}"));
        }
        guid
    }
}

impl AssetResolver for AssetDb {
    fn guid_for_path(&self, path: &str) -> String {
        match self.guids.get(path) {
            Some(guid) => guid.clone(),
            None => {
                let guid = Self::derived_guid(path);
                debug!(path = path, guid = %guid, "Asset path not in manifest, derived GUID");
                guid
            }
        }
    }
}
