//! Typed settings models and the flat layout they persist as.
//!
//! # Design
//! - [`StoredConfig`] mirrors the persisted JSON object: every value is kept as text.
//!   Each key is read on its own; a number is read as its decimal text and any
//!   other non-string value leaves only that field unset.
//! - [`ToolsConfig`] is the typed view; conversion happens once, at load.
//! - [`ConfigPatch`] carries partial updates that merge over the current record.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::defaults::{DEFAULT_INIT_DELAY_MS, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_INTERVAL_MS};
use crate::validate::{parse_digits, parse_or_default, render_optional};

/// Persisted settings layout: a flat mapping of camelCase keys to strings.
///
/// Unknown keys are ignored on read and missing keys take their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoredConfig {
    /// Last hide range start.
    #[serde(deserialize_with = "lenient_text")]
    pub hide_start: String,
    /// Last hide range end.
    #[serde(deserialize_with = "lenient_text")]
    pub hide_end: String,
    /// Last unhide range start.
    #[serde(deserialize_with = "lenient_text")]
    pub unhide_start: String,
    /// Last unhide range end.
    #[serde(deserialize_with = "lenient_text")]
    pub unhide_end: String,
    /// Last loaded or edited floor.
    #[serde(deserialize_with = "lenient_text")]
    pub floor_number: String,
    /// Text of the last loaded or edited floor.
    #[serde(deserialize_with = "lenient_text")]
    pub floor_content: String,
    /// Anchor probe interval in milliseconds.
    #[serde(deserialize_with = "lenient_text")]
    pub retry_interval: String,
    /// Maximum number of scheduled re-checks.
    #[serde(deserialize_with = "lenient_text")]
    pub max_retries: String,
    /// Delay before initialisation once the anchor is found, in milliseconds.
    #[serde(deserialize_with = "lenient_text")]
    pub init_delay: String,
}

impl Default for StoredConfig {
    fn default() -> Self {
        Self {
            hide_start: String::new(),
            hide_end: String::new(),
            unhide_start: String::new(),
            unhide_end: String::new(),
            floor_number: String::new(),
            floor_content: String::new(),
            retry_interval: DEFAULT_RETRY_INTERVAL_MS.to_string(),
            max_retries: DEFAULT_MAX_RETRIES.to_string(),
            init_delay: DEFAULT_INIT_DELAY_MS.to_string(),
        }
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        _ => String::new(),
    })
}

/// A remembered start/end pair; `None` means the field was left blank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeFields {
    /// Range start.
    pub start: Option<u64>,
    /// Range end (inclusive).
    pub end: Option<u64>,
}

impl RangeFields {
    /// Both ends set.
    #[must_use]
    pub const fn new(start: u64, end: u64) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }
}

/// The floor editor's remembered state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FloorFields {
    /// Floor index, `None` when blank.
    pub number: Option<u64>,
    /// Floor text as last loaded or applied.
    pub content: String,
}

/// Initializer timing, read once at the start of each initialisation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrySettings {
    /// Interval between anchor probes, in milliseconds.
    pub interval_ms: u64,
    /// Number of scheduled re-checks after the first failed probe.
    pub max_retries: u32,
    /// Delay between anchor discovery and initialisation, in milliseconds.
    pub init_delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_RETRY_INTERVAL_MS,
            max_retries: DEFAULT_MAX_RETRIES,
            init_delay_ms: DEFAULT_INIT_DELAY_MS,
        }
    }
}

impl RetrySettings {
    /// Build settings from raw text, substituting defaults for anything that
    /// is blank, negative, non-numeric or out of range.
    #[must_use]
    pub fn parse_lenient(interval: &str, max_retries: &str, init_delay: &str) -> Self {
        Self {
            interval_ms: parse_or_default(interval, DEFAULT_RETRY_INTERVAL_MS),
            max_retries: parse_or_default(max_retries, DEFAULT_MAX_RETRIES),
            init_delay_ms: parse_or_default(init_delay, DEFAULT_INIT_DELAY_MS),
        }
    }
}

/// Typed tool settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolsConfig {
    /// Remembered hide range.
    pub hide: RangeFields,
    /// Remembered unhide range.
    pub unhide: RangeFields,
    /// Remembered floor editor state.
    pub floor: FloorFields,
    /// Initializer timing.
    pub retry: RetrySettings,
}

impl ToolsConfig {
    /// Apply a partial update; fields absent from the patch are kept.
    pub fn merge(&mut self, patch: ConfigPatch) {
        if let Some(hide) = patch.hide {
            self.hide = hide;
        }
        if let Some(unhide) = patch.unhide {
            self.unhide = unhide;
        }
        if let Some(floor) = patch.floor {
            self.floor = floor;
        }
        if let Some(retry) = patch.retry {
            self.retry = retry;
        }
    }

    /// Return a copy with `patch` merged in.
    #[must_use]
    pub fn merged(&self, patch: ConfigPatch) -> Self {
        let mut next = self.clone();
        next.merge(patch);
        next
    }
}

impl From<&StoredConfig> for ToolsConfig {
    fn from(stored: &StoredConfig) -> Self {
        Self {
            hide: RangeFields {
                start: parse_digits(&stored.hide_start),
                end: parse_digits(&stored.hide_end),
            },
            unhide: RangeFields {
                start: parse_digits(&stored.unhide_start),
                end: parse_digits(&stored.unhide_end),
            },
            floor: FloorFields {
                number: parse_digits(&stored.floor_number),
                content: stored.floor_content.clone(),
            },
            retry: RetrySettings::parse_lenient(
                &stored.retry_interval,
                &stored.max_retries,
                &stored.init_delay,
            ),
        }
    }
}

impl From<&ToolsConfig> for StoredConfig {
    fn from(config: &ToolsConfig) -> Self {
        Self {
            hide_start: render_optional(config.hide.start),
            hide_end: render_optional(config.hide.end),
            unhide_start: render_optional(config.unhide.start),
            unhide_end: render_optional(config.unhide.end),
            floor_number: render_optional(config.floor.number),
            floor_content: config.floor.content.clone(),
            retry_interval: config.retry.interval_ms.to_string(),
            max_retries: config.retry.max_retries.to_string(),
            init_delay: config.retry.init_delay_ms.to_string(),
        }
    }
}

/// Partial settings update. `None` leaves the corresponding group untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigPatch {
    /// Replacement hide range.
    pub hide: Option<RangeFields>,
    /// Replacement unhide range.
    pub unhide: Option<RangeFields>,
    /// Replacement floor editor state.
    pub floor: Option<FloorFields>,
    /// Replacement initializer timing.
    pub retry: Option<RetrySettings>,
}

impl ConfigPatch {
    /// Patch that only records a hide range.
    #[must_use]
    pub fn hide(range: RangeFields) -> Self {
        Self {
            hide: Some(range),
            ..Self::default()
        }
    }

    /// Patch that only records an unhide range.
    #[must_use]
    pub fn unhide(range: RangeFields) -> Self {
        Self {
            unhide: Some(range),
            ..Self::default()
        }
    }

    /// Patch that only records the floor editor state.
    #[must_use]
    pub fn floor(number: u64, content: impl Into<String>) -> Self {
        Self {
            floor: Some(FloorFields {
                number: Some(number),
                content: content.into(),
            }),
            ..Self::default()
        }
    }

    /// Patch that only records initializer timing.
    #[must_use]
    pub fn retry(retry: RetrySettings) -> Self {
        Self {
            retry: Some(retry),
            ..Self::default()
        }
    }
}
