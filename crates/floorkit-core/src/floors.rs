//! Floor mutations against the host chat.
//!
//! # Design
//! - The chat length is read live; floors that vanished after validation are skipped.
//! - Every mutation awaits the host save before reporting success.

use tracing::{info, warn};

use crate::chat::{ChatContext, ChatHost, Visibility};
use crate::error::FloorOpError;
use crate::validate::FloorRange;

/// Bulk visibility change applied to a floor range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeAction {
    /// Exclude floors from rendering and downstream prompts.
    Hide,
    /// Include floors again.
    Unhide,
}

impl RangeAction {
    /// Flags written to every floor in the range.
    #[must_use]
    pub const fn visibility(self) -> Visibility {
        match self {
            Self::Hide => Visibility::HIDDEN,
            Self::Unhide => Visibility::SHOWN,
        }
    }

    /// Verb used in log and status lines.
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Hide => "hide",
            Self::Unhide => "unhide",
        }
    }

    /// Status line reported after the action succeeded.
    #[must_use]
    pub fn success_message(self, range: FloorRange) -> String {
        let done = match self {
            Self::Hide => "hid",
            Self::Unhide => "unhid",
        };
        format!("{done} floors {} ~ {}", range.start(), range.end())
    }

    /// Status line reported when the action failed.
    #[must_use]
    pub fn failure_message(self, err: &FloorOpError) -> String {
        format!("failed to {} floors: {err}", self.verb())
    }
}

/// Current floor count, or `0` when the host has no chat.
#[must_use]
pub fn latest_floor<H: ChatHost + ?Sized>(host: &H) -> usize {
    host.context().map_or(0, |context| context.floor_count())
}

/// Apply `action` to every existing floor in `range`, then save the chat.
///
/// Returns the number of floors that were updated.
///
/// # Errors
///
/// Returns [`FloorOpError::ContextUnavailable`] without touching anything when
/// the host has no chat, or [`FloorOpError::Persist`] when the save fails
/// (the in-memory flags have already changed at that point).
pub async fn apply_range_action<H: ChatHost + ?Sized>(
    host: &H,
    action: RangeAction,
    range: FloorRange,
) -> Result<usize, FloorOpError> {
    let context = host.context().ok_or(FloorOpError::ContextUnavailable)?;
    let visibility = action.visibility();
    let updated = range
        .floors()
        .filter(|floor| context.set_visibility(*floor, visibility))
        .count();
    context
        .save_chat()
        .await
        .map_err(|source| FloorOpError::Persist {
            operation: "floors.save_chat",
            source,
        })?;
    info!(
        action = action.verb(),
        start = range.start(),
        end = range.end(),
        updated,
        "floor visibility applied"
    );
    Ok(updated)
}

/// Hide every existing floor in `range`.
///
/// # Errors
///
/// See [`apply_range_action`].
pub async fn hide_floors<H: ChatHost + ?Sized>(
    host: &H,
    range: FloorRange,
) -> Result<usize, FloorOpError> {
    apply_range_action(host, RangeAction::Hide, range).await
}

/// Unhide every existing floor in `range`.
///
/// # Errors
///
/// See [`apply_range_action`].
pub async fn unhide_floors<H: ChatHost + ?Sized>(
    host: &H,
    range: FloorRange,
) -> Result<usize, FloorOpError> {
    apply_range_action(host, RangeAction::Unhide, range).await
}

/// Read the text of `floor`.
///
/// # Errors
///
/// Returns [`FloorOpError::ContextUnavailable`] or [`FloorOpError::FloorMissing`].
pub fn load_floor_message<H: ChatHost + ?Sized>(
    host: &H,
    floor: usize,
) -> Result<String, FloorOpError> {
    let context = host.context().ok_or(FloorOpError::ContextUnavailable)?;
    context
        .message_text(floor)
        .ok_or(FloorOpError::FloorMissing { floor })
}

/// Replace the text of `floor`, then save the chat.
///
/// # Errors
///
/// Returns [`FloorOpError::ContextUnavailable`], [`FloorOpError::FloorMissing`]
/// (nothing saved), or [`FloorOpError::Persist`].
pub async fn update_floor_message<H: ChatHost + ?Sized>(
    host: &H,
    floor: usize,
    text: &str,
) -> Result<(), FloorOpError> {
    let context = host.context().ok_or(FloorOpError::ContextUnavailable)?;
    if !context.set_text(floor, text) {
        warn!(floor, "floor vanished before update");
        return Err(FloorOpError::FloorMissing { floor });
    }
    context
        .save_chat()
        .await
        .map_err(|source| FloorOpError::Persist {
            operation: "floors.save_text",
            source,
        })?;
    info!(floor, chars = text.chars().count(), "floor message updated");
    Ok(())
}
