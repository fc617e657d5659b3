//! Error types for floor validation, chat mutations and commands.
//!
//! # Design
//! - Validation messages are user-facing and embed the offending numbers.
//! - Host and mutation errors keep constant messages and carry context fields.

use thiserror::Error;

/// Reasons a floor or floor range is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FloorError {
    /// A required field was left blank.
    #[error("floor value is required")]
    Missing,
    /// A value contained something other than decimal digits.
    #[error("floor values must be numeric")]
    NotNumeric,
    /// A numeric value was below zero.
    #[error("floor values must not be negative")]
    Negative,
    /// The range start is greater than its end.
    #[error("start floor ({start}) must not exceed end floor ({end})")]
    StartAfterEnd {
        /// Requested start.
        start: u64,
        /// Requested end.
        end: u64,
    },
    /// The range end lies past the latest floor.
    #[error("end floor ({end}) exceeds latest floor count ({latest})")]
    EndBeyondLatest {
        /// Requested end.
        end: u64,
        /// Floor count at validation time.
        latest: usize,
    },
    /// A single floor lies past the latest floor.
    #[error("floor ({floor}) exceeds latest floor count ({latest})")]
    FloorBeyondLatest {
        /// Requested floor.
        floor: u64,
        /// Floor count at validation time.
        latest: usize,
    },
}

/// Failures reported by the host application.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// A host API the tools depend on is missing.
    #[error("host api unavailable")]
    Unavailable {
        /// Name of the missing API.
        api: &'static str,
    },
    /// The host failed to persist the chat.
    #[error("chat save failed")]
    SaveFailed {
        /// Host-provided detail.
        detail: String,
    },
}

/// Failures while mutating or reading chat floors.
#[derive(Debug, Error)]
pub enum FloorOpError {
    /// The host chat context is not available.
    #[error("chat context unavailable")]
    ContextUnavailable,
    /// The floor no longer exists in the chat.
    #[error("floor no longer exists")]
    FloorMissing {
        /// Requested floor.
        floor: usize,
    },
    /// Persisting the chat failed after the in-memory change.
    #[error("chat could not be saved")]
    Persist {
        /// Operation identifier.
        operation: &'static str,
        /// Source host error.
        source: HostError,
    },
}

/// Failures while parsing or registering slash commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Fewer than two positional arguments were supplied.
    #[error("missing command arguments")]
    MissingArguments {
        /// Usage line for the command.
        usage: &'static str,
    },
    /// A command with the same name is already registered.
    #[error("command already registered")]
    Duplicate {
        /// Command name.
        name: &'static str,
    },
    /// The host registry refused the command.
    #[error("command registration failed")]
    Registration {
        /// Command name.
        name: &'static str,
        /// Host-provided detail.
        detail: String,
    },
}
