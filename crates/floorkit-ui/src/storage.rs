//! `localStorage`-backed settings store.
//!
//! The blob is read and written as raw text through [`LocalStorage::raw`], not
//! gloo's JSON wrapper, so the value stays the plain object the host page expects.

use floorkit_config::{KvStore, StorageError};
use gloo::storage::{LocalStorage, Storage};

/// Browser `localStorage`, shared by every handle.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStore;

impl KvStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        LocalStorage::raw()
            .get_item(key)
            .map_err(|err| StorageError::Unavailable {
                detail: format!("{err:?}"),
            })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| StorageError::Rejected {
                key: key.to_string(),
                detail: format!("{err:?}"),
            })
    }
}
