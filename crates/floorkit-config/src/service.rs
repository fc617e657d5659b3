//! Settings facade owning the single in-memory copy of [`ToolsConfig`].
//!
//! # Design
//! - Storage is written first; the cached record only advances after the
//!   backend accepted the write, so memory never runs ahead of storage.
//! - Load never fails: unreadable or malformed blobs log and yield defaults.
//! - Saving rewrites the known keys and keeps any other keys already in the blob.
//! - No hidden globals; callers own the store and call [`ConfigStore::reload`] explicitly.

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::defaults::STORAGE_KEY;
use crate::error::{ConfigError, ConfigResult};
use crate::model::{ConfigPatch, StoredConfig, ToolsConfig};
use crate::store::KvStore;

/// Read the settings blob from `store`, defaulting anything missing or unreadable.
#[must_use]
pub fn load_config<S: KvStore>(store: &S) -> ToolsConfig {
    let raw = match store.get(STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key = STORAGE_KEY, "no stored settings; using defaults");
            return ToolsConfig::default();
        }
        Err(err) => {
            warn!(error = %err, key = STORAGE_KEY, "settings read failed; using defaults");
            return ToolsConfig::default();
        }
    };
    match serde_json::from_str::<StoredConfig>(&raw) {
        Ok(stored) => ToolsConfig::from(&stored),
        Err(err) => {
            warn!(error = %err, key = STORAGE_KEY, "stored settings malformed; using defaults");
            ToolsConfig::default()
        }
    }
}

/// Encode and write `config` under the settings key.
///
/// # Errors
///
/// Returns [`ConfigError::Serialize`] if encoding fails or
/// [`ConfigError::Storage`] if the backend refuses the write.
pub fn write_config<S: KvStore>(store: &S, config: &ToolsConfig) -> ConfigResult<()> {
    let mut document = existing_document(store);
    let known = serde_json::to_value(StoredConfig::from(config))
        .map_err(|source| ConfigError::Serialize { source })?;
    if let Value::Object(fields) = known {
        document.extend(fields);
    }
    let encoded = serde_json::to_string(&Value::Object(document))
        .map_err(|source| ConfigError::Serialize { source })?;
    store
        .set(STORAGE_KEY, &encoded)
        .map_err(|source| ConfigError::Storage {
            operation: "config.save",
            source,
        })
}

fn existing_document<S: KvStore>(store: &S) -> Map<String, Value> {
    match store.get(STORAGE_KEY) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_default(),
        Ok(None) | Err(_) => Map::new(),
    }
}

/// Single owner of the loaded settings and their backing store.
#[derive(Debug)]
pub struct ConfigStore<S> {
    store: S,
    current: ToolsConfig,
}

impl<S: KvStore> ConfigStore<S> {
    /// Wrap `store` and load the current settings from it.
    #[must_use]
    pub fn open(store: S) -> Self {
        let current = load_config(&store);
        Self { store, current }
    }

    /// Settings as last loaded or saved.
    #[must_use]
    pub const fn current(&self) -> &ToolsConfig {
        &self.current
    }

    /// Re-read the settings from storage, replacing the cached copy.
    pub fn reload(&mut self) -> &ToolsConfig {
        self.current = load_config(&self.store);
        &self.current
    }

    /// Merge `patch` over the cached settings and persist the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the merged record cannot be written; the
    /// cached settings are left unchanged in that case.
    pub fn save(&mut self, patch: ConfigPatch) -> ConfigResult<&ToolsConfig> {
        let next = self.current.merged(patch);
        if let Err(err) = write_config(&self.store, &next) {
            warn!(error = %err, "settings save failed; keeping previous settings");
            return Err(err);
        }
        self.current = next;
        info!("settings saved");
        Ok(&self.current)
    }

    /// Borrow the backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }
}
