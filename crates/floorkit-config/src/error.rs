//! Error types for settings persistence.
//!
//! # Design
//! - Keep error messages constant while carrying context fields for debugging.
//! - Storage backends report through [`StorageError`]; the settings layer wraps it
//!   with the operation that failed.

use std::io;

use thiserror::Error;

/// Failure raised by a key-value storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store is not reachable (no window, storage disabled, ...).
    #[error("storage unavailable")]
    Unavailable {
        /// Backend-specific detail.
        detail: String,
    },
    /// The backend refused the write (quota exceeded, read-only, ...).
    #[error("storage rejected write")]
    Rejected {
        /// Key that was being written.
        key: String,
        /// Backend-specific detail.
        detail: String,
    },
    /// File-backed storage failed at the filesystem level.
    #[error("storage io failed")]
    Io {
        /// Operation identifier.
        operation: &'static str,
        /// Source IO error.
        source: io::Error,
    },
    /// File-backed storage contained a document that is not a JSON object of strings.
    #[error("storage document malformed")]
    Malformed {
        /// Source JSON error.
        source: serde_json::Error,
    },
}

/// Primary error type for settings operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The storage backend failed.
    #[error("settings storage failed")]
    Storage {
        /// Operation identifier.
        operation: &'static str,
        /// Source storage error.
        source: StorageError,
    },
    /// The settings record could not be encoded.
    #[error("settings serialization failed")]
    Serialize {
        /// Source JSON error.
        source: serde_json::Error,
    },
}

/// Convenience alias for settings results.
pub type ConfigResult<T> = Result<T, ConfigError>;
