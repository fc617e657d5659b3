//! Settings panel actions: validate form input, mutate the chat, remember the
//! inputs and notify the user.
//!
//! # Design
//! - Actions take raw field text exactly as typed; all validation happens here.
//! - Validation failures notify and return before anything is mutated.
//! - The settings cell is only borrowed between awaits, so overlapping clicks
//!   from an event loop cannot trip a `RefCell` panic.

use std::cell::{Ref, RefCell};

use floorkit_config::validate::parse_digits;
use floorkit_config::{ConfigPatch, ConfigStore, KvStore, RetrySettings, ToolsConfig};
use tracing::warn;

use crate::chat::{ChatHost, Notifier};
use crate::error::FloorError;
use crate::floors::{
    RangeAction, apply_range_action, latest_floor, load_floor_message, update_floor_message,
};
use crate::validate::{is_valid_number, require_field, validate_floor_range, validate_single_floor};

const RANGE_REQUIRED: &str = "enter both a start and an end floor";
const FLOOR_REQUIRED: &str = "enter a floor number";
const SETTINGS_NOT_SAVED: &str = "settings could not be saved";

/// Backing logic for the tool panel.
pub struct ToolPanel<H, N, S> {
    host: H,
    notifier: N,
    config: RefCell<ConfigStore<S>>,
}

impl<H, N, S> ToolPanel<H, N, S>
where
    H: ChatHost,
    N: Notifier,
    S: KvStore,
{
    /// Assemble a panel over a host, a notifier and loaded settings.
    pub fn new(host: H, notifier: N, config: ConfigStore<S>) -> Self {
        Self {
            host,
            notifier,
            config: RefCell::new(config),
        }
    }

    /// Settings as last loaded or saved.
    #[must_use]
    pub fn config(&self) -> Ref<'_, ToolsConfig> {
        Ref::map(self.config.borrow(), ConfigStore::current)
    }

    /// Re-read settings from storage, returning the fresh copy.
    pub fn reload_config(&self) -> ToolsConfig {
        self.config.borrow_mut().reload().clone()
    }

    /// Chat host the panel mutates.
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Notification sink.
    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Hide the typed range.
    pub async fn apply_hide(&self, start: &str, end: &str) -> bool {
        self.apply_range(RangeAction::Hide, start, end).await
    }

    /// Unhide the typed range.
    pub async fn apply_unhide(&self, start: &str, end: &str) -> bool {
        self.apply_range(RangeAction::Unhide, start, end).await
    }

    /// Load the text of the typed floor; `None` when anything failed.
    pub fn load_floor(&self, floor: &str) -> Option<String> {
        let floor = self.checked_floor(floor)?;
        let content = match load_floor_message(&self.host, floor) {
            Ok(content) => content,
            Err(err) => {
                self.notifier
                    .error(&format!("failed to load floor message: {err}"));
                return None;
            }
        };
        self.remember(ConfigPatch::floor(floor as u64, content.as_str()));
        self.notifier.success(&format!("loaded floor {floor}"));
        Some(content)
    }

    /// Replace the text of the typed floor with `content`.
    pub async fn apply_floor(&self, floor: &str, content: &str) -> bool {
        let Some(floor) = self.checked_floor(floor) else {
            return false;
        };
        if let Err(err) = update_floor_message(&self.host, floor, content).await {
            self.notifier
                .error(&format!("failed to update floor message: {err}"));
            return false;
        }
        self.remember(ConfigPatch::floor(floor as u64, content));
        self.notifier.success(&format!("updated floor {floor}"));
        true
    }

    /// Validate and store initializer timing; blank fields take their default.
    pub fn save_init_settings(&self, interval: &str, max_retries: &str, init_delay: &str) -> bool {
        let checks = [
            (interval, "retry interval must be numeric"),
            (max_retries, "max retries must be numeric"),
            (init_delay, "init delay must be numeric"),
        ];
        if let Some((_, message)) = checks.iter().find(|(value, _)| !is_valid_number(value)) {
            self.notifier.error(message);
            return false;
        }
        let limits = [
            (fits::<u64>(interval), "retry interval is too large"),
            (fits::<u32>(max_retries), "max retries is too large"),
            (fits::<u64>(init_delay), "init delay is too large"),
        ];
        if let Some((_, message)) = limits.iter().find(|(within, _)| !within) {
            self.notifier.error(message);
            return false;
        }
        let retry = RetrySettings::parse_lenient(interval, max_retries, init_delay);
        let saved = self.config.borrow_mut().save(ConfigPatch::retry(retry)).is_ok();
        if saved {
            self.notifier.success("settings saved");
        } else {
            self.notifier.error(SETTINGS_NOT_SAVED);
        }
        saved
    }

    async fn apply_range(&self, action: RangeAction, start: &str, end: &str) -> bool {
        if !is_valid_number(start) || !is_valid_number(end) {
            self.notifier.error(&FloorError::NotNumeric.to_string());
            return false;
        }
        let (Ok(start), Ok(end)) = (require_field(start), require_field(end)) else {
            self.notifier.error(RANGE_REQUIRED);
            return false;
        };
        let range = match validate_floor_range(start, end, latest_floor(&self.host)) {
            Ok(range) => range,
            Err(err) => {
                self.notifier.error(&err.to_string());
                return false;
            }
        };
        if let Err(err) = apply_range_action(&self.host, action, range).await {
            self.notifier.error(&action.failure_message(&err));
            return false;
        }
        let patch = match action {
            RangeAction::Hide => ConfigPatch::hide(range.into()),
            RangeAction::Unhide => ConfigPatch::unhide(range.into()),
        };
        self.remember(patch);
        self.notifier.success(&action.success_message(range));
        true
    }

    fn checked_floor(&self, floor: &str) -> Option<usize> {
        if !is_valid_number(floor) {
            self.notifier.error(&FloorError::NotNumeric.to_string());
            return None;
        }
        let Ok(floor) = require_field(floor) else {
            self.notifier.error(FLOOR_REQUIRED);
            return None;
        };
        match validate_single_floor(floor, latest_floor(&self.host)) {
            Ok(floor) => Some(floor),
            Err(err) => {
                self.notifier.error(&err.to_string());
                None
            }
        }
    }

    // The chat change already happened; a settings failure is reported but
    // does not undo it.
    fn remember(&self, patch: ConfigPatch) {
        if let Err(err) = self.config.borrow_mut().save(patch) {
            warn!(error = %err, "panel inputs not persisted");
            self.notifier.error(SETTINGS_NOT_SAVED);
        }
    }
}

fn fits<T: std::str::FromStr>(value: &str) -> bool {
    value.is_empty() || parse_digits::<T>(value).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{ChatContext, InMemoryChat, MemoryHost, Notice, RecordingNotifier, Visibility};
    use floorkit_config::{MemoryStore, RangeFields, StorageError};

    type Panel = ToolPanel<MemoryHost, RecordingNotifier, MemoryStore>;

    fn panel_with(chat: &InMemoryChat) -> Panel {
        ToolPanel::new(
            MemoryHost::new(chat.clone()),
            RecordingNotifier::new(),
            ConfigStore::open(MemoryStore::new()),
        )
    }

    fn chat_of(len: usize) -> InMemoryChat {
        InMemoryChat::from_texts((0..len).map(|idx| format!("m{idx}")))
    }

    #[tokio::test]
    async fn hide_validates_mutates_and_remembers() {
        let chat = chat_of(6);
        let panel = panel_with(&chat);
        assert!(panel.apply_hide(" 2 ", "4").await);
        assert_eq!(chat.visibility(3), Some(Visibility::HIDDEN));
        assert_eq!(panel.config().hide, RangeFields::new(2, 4));
        assert_eq!(
            panel.notifier().last(),
            Some(Notice::Success("hid floors 2 ~ 4".to_string()))
        );
    }

    #[tokio::test]
    async fn rejected_input_mutates_nothing() {
        let chat = chat_of(3);
        let panel = panel_with(&chat);
        let before = chat.snapshot();

        assert!(!panel.apply_hide("1a", "2").await);
        assert!(!panel.apply_hide("", "2").await);
        assert!(!panel.apply_hide("2", "1").await);
        assert!(!panel.apply_unhide("0", "9").await);

        assert_eq!(chat.snapshot(), before);
        assert_eq!(chat.save_count(), 0);
        assert_eq!(panel.config().hide, RangeFields::default());
        let notices = panel.notifier().notices();
        assert_eq!(notices.len(), 4);
        assert_eq!(notices[1], Notice::Error(RANGE_REQUIRED.to_string()));
        assert!(notices.iter().all(|notice| matches!(notice, Notice::Error(_))));
    }

    #[tokio::test]
    async fn unhide_is_remembered_next_to_hide() {
        let chat = chat_of(5);
        let panel = panel_with(&chat);
        assert!(panel.apply_hide("1", "3").await);
        assert!(panel.apply_unhide("1", "3").await);
        let config = panel.reload_config();
        assert_eq!(config.hide, RangeFields::new(1, 3));
        assert_eq!(config.unhide, RangeFields::new(1, 3));
        assert_eq!(chat.visibility(2), Some(Visibility::SHOWN));
    }

    #[tokio::test]
    async fn missing_chat_is_reported() {
        let panel = ToolPanel::new(
            MemoryHost::without_chat(),
            RecordingNotifier::new(),
            ConfigStore::open(MemoryStore::new()),
        );
        assert!(!panel.apply_hide("0", "0").await);
        assert_eq!(
            panel.notifier().last(),
            Some(Notice::Error(
                "failed to hide floors: chat context unavailable".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn floor_editor_loads_and_applies_text() {
        let chat = chat_of(3);
        let panel = panel_with(&chat);
        assert_eq!(panel.load_floor("1").as_deref(), Some("m1"));
        assert!(panel.apply_floor("1", "edited").await);
        assert_eq!(chat.message_text(1).as_deref(), Some("edited"));
        let config = panel.config();
        assert_eq!(config.floor.number, Some(1));
        assert_eq!(config.floor.content, "edited");
    }

    #[tokio::test]
    async fn floor_editor_rejects_bad_floors() {
        let chat = chat_of(3);
        let panel = panel_with(&chat);
        assert_eq!(panel.load_floor(""), None);
        assert_eq!(panel.load_floor("-1"), None);
        assert_eq!(panel.load_floor("4"), None);
        // Equal to the floor count passes validation but has no message behind it.
        assert_eq!(panel.load_floor("3"), None);
        assert!(!panel.apply_floor("7", "text").await);
        assert_eq!(panel.config().floor.number, None);
        assert_eq!(panel.notifier().notices().len(), 5);
    }

    #[test]
    fn init_settings_default_blank_fields() {
        let panel = panel_with(&chat_of(0));
        assert!(panel.save_init_settings("250", "", "40"));
        let retry = panel.config().retry;
        assert_eq!(retry.interval_ms, 250);
        assert_eq!(retry.max_retries, 10);
        assert_eq!(retry.init_delay_ms, 40);
    }

    #[test]
    fn init_settings_reject_non_numeric_fields() {
        let panel = panel_with(&chat_of(0));
        assert!(!panel.save_init_settings("100", "-1", "0"));
        assert_eq!(
            panel.notifier().last(),
            Some(Notice::Error("max retries must be numeric".to_string()))
        );
        assert_eq!(panel.config().retry, RetrySettings::default());
    }

    #[test]
    fn init_settings_reject_values_too_large_to_store() {
        let panel = panel_with(&chat_of(0));
        assert!(!panel.save_init_settings("100", "99999999999", "0"));
        assert_eq!(
            panel.notifier().last(),
            Some(Notice::Error("max retries is too large".to_string()))
        );
        assert!(!panel.save_init_settings("99999999999999999999999", "3", "0"));
        assert_eq!(
            panel.notifier().last(),
            Some(Notice::Error("retry interval is too large".to_string()))
        );
        assert_eq!(panel.config().retry, RetrySettings::default());
        assert!(panel.save_init_settings("100", "4294967295", "0"));
        assert_eq!(panel.config().retry.max_retries, u32::MAX);
    }

    #[test]
    fn init_settings_reject_whitespace_only_fields() {
        let panel = panel_with(&chat_of(0));
        assert!(!panel.save_init_settings(" ", "3", "0"));
        assert_eq!(
            panel.notifier().last(),
            Some(Notice::Error("retry interval must be numeric".to_string()))
        );
    }

    struct ReadOnlyStore;

    impl KvStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Rejected {
                key: key.to_string(),
                detail: "read-only".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn settings_failure_does_not_undo_chat_change() {
        let chat = chat_of(4);
        let panel = ToolPanel::new(
            MemoryHost::new(chat.clone()),
            RecordingNotifier::new(),
            ConfigStore::open(ReadOnlyStore),
        );
        assert!(panel.apply_hide("0", "1").await);
        assert_eq!(chat.visibility(0), Some(Visibility::HIDDEN));
        assert_eq!(panel.config().hide, RangeFields::default());
        let notices = panel.notifier().notices();
        assert_eq!(
            notices,
            vec![
                Notice::Error(SETTINGS_NOT_SAVED.to_string()),
                Notice::Success("hid floors 0 ~ 1".to_string()),
            ]
        );
        assert!(!panel.save_init_settings("1", "1", "1"));
    }
}
