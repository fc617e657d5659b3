//! Default values and storage identifiers for the tool settings.
//!
//! # Design
//! - Keep the persisted key and every default in one place so load and save agree.
//! - Retry defaults double as the fallback for unparseable stored values.

/// Storage key holding the whole settings blob.
pub const STORAGE_KEY: &str = "xiaogongju_config";
/// Default interval between anchor probes, in milliseconds.
pub const DEFAULT_RETRY_INTERVAL_MS: u64 = 1_000;
/// Default number of re-checks before the initializer gives up.
pub const DEFAULT_MAX_RETRIES: u32 = 10;
/// Default delay between anchor discovery and panel initialisation, in milliseconds.
pub const DEFAULT_INIT_DELAY_MS: u64 = 0;
