//! DOM-free model of the panel's text fields.
//!
//! # Design
//! - Field values mirror what the inputs display, so the view stays a thin binding.
//! - Element ids keep the `xgj_` prefix the host stylesheet and users' custom CSS target.

use floorkit_config::ToolsConfig;

/// Host element the panel is mounted into once it exists.
pub const ANCHOR_ID: &str = "extensions_settings";

/// Input and button element ids.
pub mod ids {
    /// Hide range start input.
    pub const HIDE_START: &str = "xgj_hide_start";
    /// Hide range end input.
    pub const HIDE_END: &str = "xgj_hide_end";
    /// Hide apply button.
    pub const HIDE_APPLY: &str = "xgj_hide_apply";
    /// Unhide range start input.
    pub const UNHIDE_START: &str = "xgj_unhide_start";
    /// Unhide range end input.
    pub const UNHIDE_END: &str = "xgj_unhide_end";
    /// Unhide apply button.
    pub const UNHIDE_APPLY: &str = "xgj_unhide_apply";
    /// Floor number input.
    pub const FLOOR_NUMBER: &str = "xgj_floor_number";
    /// Floor text area.
    pub const FLOOR_CONTENT: &str = "xgj_floor_content";
    /// Floor load button.
    pub const FLOOR_LOAD: &str = "xgj_load_floor";
    /// Floor apply button.
    pub const FLOOR_APPLY: &str = "xgj_apply_floor";
    /// Retry interval input.
    pub const RETRY_INTERVAL: &str = "xgj_retry_interval";
    /// Max retries input.
    pub const MAX_RETRIES: &str = "xgj_max_retries";
    /// Init delay input.
    pub const INIT_DELAY: &str = "xgj_init_delay";
    /// Settings save button.
    pub const SAVE_SETTINGS: &str = "xgj_save_settings";
}

/// Editable panel fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelForm {
    /// Hide range start.
    pub hide_start: String,
    /// Hide range end.
    pub hide_end: String,
    /// Unhide range start.
    pub unhide_start: String,
    /// Unhide range end.
    pub unhide_end: String,
    /// Floor number.
    pub floor_number: String,
    /// Floor text.
    pub floor_content: String,
    /// Retry interval in milliseconds.
    pub retry_interval: String,
    /// Maximum retries.
    pub max_retries: String,
    /// Init delay in milliseconds.
    pub init_delay: String,
}

/// A single field of [`PanelForm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Hide range start.
    HideStart,
    /// Hide range end.
    HideEnd,
    /// Unhide range start.
    UnhideStart,
    /// Unhide range end.
    UnhideEnd,
    /// Floor number.
    FloorNumber,
    /// Floor text.
    FloorContent,
    /// Retry interval.
    RetryInterval,
    /// Maximum retries.
    MaxRetries,
    /// Init delay.
    InitDelay,
}

impl Field {
    /// Element id of the input bound to this field.
    #[must_use]
    pub const fn element_id(self) -> &'static str {
        match self {
            Self::HideStart => ids::HIDE_START,
            Self::HideEnd => ids::HIDE_END,
            Self::UnhideStart => ids::UNHIDE_START,
            Self::UnhideEnd => ids::UNHIDE_END,
            Self::FloorNumber => ids::FLOOR_NUMBER,
            Self::FloorContent => ids::FLOOR_CONTENT,
            Self::RetryInterval => ids::RETRY_INTERVAL,
            Self::MaxRetries => ids::MAX_RETRIES,
            Self::InitDelay => ids::INIT_DELAY,
        }
    }
}

impl PanelForm {
    /// Fill every field from saved settings; unset numbers show as blank.
    #[must_use]
    pub fn from_config(config: &ToolsConfig) -> Self {
        let show = |value: Option<u64>| value.map(|inner| inner.to_string()).unwrap_or_default();
        Self {
            hide_start: show(config.hide.start),
            hide_end: show(config.hide.end),
            unhide_start: show(config.unhide.start),
            unhide_end: show(config.unhide.end),
            floor_number: show(config.floor.number),
            floor_content: config.floor.content.clone(),
            retry_interval: config.retry.interval_ms.to_string(),
            max_retries: config.retry.max_retries.to_string(),
            init_delay: config.retry.init_delay_ms.to_string(),
        }
    }

    /// Current text of `field`.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::HideStart => &self.hide_start,
            Field::HideEnd => &self.hide_end,
            Field::UnhideStart => &self.unhide_start,
            Field::UnhideEnd => &self.unhide_end,
            Field::FloorNumber => &self.floor_number,
            Field::FloorContent => &self.floor_content,
            Field::RetryInterval => &self.retry_interval,
            Field::MaxRetries => &self.max_retries,
            Field::InitDelay => &self.init_delay,
        }
    }

    /// Copy with `field` replaced by `value`.
    #[must_use]
    pub fn with(&self, field: Field, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let slot = match field {
            Field::HideStart => &mut next.hide_start,
            Field::HideEnd => &mut next.hide_end,
            Field::UnhideStart => &mut next.unhide_start,
            Field::UnhideEnd => &mut next.unhide_end,
            Field::FloorNumber => &mut next.floor_number,
            Field::FloorContent => &mut next.floor_content,
            Field::RetryInterval => &mut next.retry_interval,
            Field::MaxRetries => &mut next.max_retries,
            Field::InitDelay => &mut next.init_delay,
        };
        *slot = value.into();
        next
    }
}
