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

//! Floor tools for a chat host: range validation, hide/unhide, single-floor
//! editing, slash commands and the retry initializer that mounts the panel.
//!
//! Layout: `validate.rs` (pure floor checks), `chat.rs` (host seams and
//! in-memory host), `floors.rs` (mutations), `panel.rs` (form actions),
//! `commands.rs` (slash commands), `init.rs` (retry state machine and driver).

pub mod chat;
pub mod commands;
pub mod error;
pub mod floors;
pub mod init;
pub mod panel;
pub mod validate;

pub use chat::{
    ChatContext, ChatHost, ChatMessage, InMemoryChat, MemoryHost, Notice, Notifier,
    RecordingNotifier, Visibility,
};
pub use commands::{
    CommandRegistry, CommandTable, SlashCommand, parse_range_args, register_floor_commands,
};
pub use error::{CommandError, FloorError, FloorOpError, HostError};
pub use floors::{
    RangeAction, apply_range_action, hide_floors, latest_floor, load_floor_message,
    unhide_floors, update_floor_message,
};
#[cfg(not(target_arch = "wasm32"))]
pub use init::TokioTimer;
pub use init::{InitOutcome, InitState, InitStep, Initializer, Timer, run_initializer};
pub use panel::ToolPanel;
pub use validate::{
    FloorRange, check_floor, check_range, is_valid_number, require_field, validate_floor_range,
    validate_single_floor,
};
