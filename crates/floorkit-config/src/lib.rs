#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]

//! Persisted settings for the floor tools.
//!
//! Layout: `model.rs` (stored layout, typed record, patches), `validate.rs`
//! (parse-and-default helpers), `store.rs` (key-value seam and native
//! backends), `service.rs` (`ConfigStore` load/save with merge).

pub mod defaults;
pub mod error;
pub mod model;
pub mod service;
pub mod store;
pub mod validate;

pub use defaults::{
    DEFAULT_INIT_DELAY_MS, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_INTERVAL_MS, STORAGE_KEY,
};
pub use error::{ConfigError, ConfigResult, StorageError};
pub use model::{ConfigPatch, FloorFields, RangeFields, RetrySettings, StoredConfig, ToolsConfig};
pub use service::{ConfigStore, load_config, write_config};
pub use store::{JsonFileStore, KvStore, MemoryStore};
