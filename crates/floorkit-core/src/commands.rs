//! `/hide` and `/unhide` slash commands.
//!
//! # Design
//! - Commands validate and mutate exactly like the panel but answer with a
//!   status string instead of notifications; they never fail.
//! - Registration goes through [`CommandRegistry`] so the browser host and the
//!   native [`CommandTable`] share one code path.

use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::chat::ChatHost;
use crate::error::{CommandError, FloorError};
use crate::floors::{RangeAction, apply_range_action, latest_floor};
use crate::validate::{is_valid_number, validate_floor_range};

/// Slash commands provided by the tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlashCommand {
    /// `/hide <start> <end>`
    Hide,
    /// `/unhide <start> <end>`
    Unhide,
}

impl SlashCommand {
    /// Every command, in registration order.
    pub const ALL: [Self; 2] = [Self::Hide, Self::Unhide];

    /// Name without the leading slash.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hide => "hide",
            Self::Unhide => "unhide",
        }
    }

    /// Usage line returned when arguments are missing.
    #[must_use]
    pub const fn usage(self) -> &'static str {
        match self {
            Self::Hide => "usage: /hide <start floor> <end floor>",
            Self::Unhide => "usage: /unhide <start floor> <end floor>",
        }
    }

    /// Help text shown by the host's command browser.
    #[must_use]
    pub const fn help(self) -> &'static str {
        match self {
            Self::Hide => "Hide a range of floors. Usage: /hide <start floor> <end floor>",
            Self::Unhide => "Unhide a range of floors. Usage: /unhide <start floor> <end floor>",
        }
    }

    /// Look a command up by name (leading slash optional).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.strip_prefix('/').unwrap_or(name);
        Self::ALL.into_iter().find(|command| command.name() == name)
    }

    /// Visibility change the command performs.
    #[must_use]
    pub const fn action(self) -> RangeAction {
        match self {
            Self::Hide => RangeAction::Hide,
            Self::Unhide => RangeAction::Unhide,
        }
    }

    /// Run the command with its raw argument text and report the outcome.
    pub async fn execute<H: ChatHost + ?Sized>(self, host: &H, args: &str) -> String {
        let (start, end) = match parse_range_args(self, args) {
            Ok(pair) => pair,
            Err(CommandError::MissingArguments { usage }) => return usage.to_string(),
            Err(err) => return format!("error: {err}"),
        };
        if !is_valid_number(start) || !is_valid_number(end) {
            return format!("error: {}", FloorError::NotNumeric);
        }
        let range = match validate_floor_range(start, end, latest_floor(host)) {
            Ok(range) => range,
            Err(err) => return format!("error: {err}"),
        };
        let action = self.action();
        match apply_range_action(host, action, range).await {
            Ok(_) => action.success_message(range),
            Err(err) => action.failure_message(&err),
        }
    }
}

/// Split whitespace-separated arguments into the first two positionals.
///
/// Extra arguments are ignored.
///
/// # Errors
///
/// Returns [`CommandError::MissingArguments`] with the command's usage line
/// when fewer than two arguments are present.
pub fn parse_range_args(command: SlashCommand, args: &str) -> Result<(&str, &str), CommandError> {
    let mut parts = args.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(CommandError::MissingArguments {
            usage: command.usage(),
        }),
    }
}

/// Destination for command definitions.
pub trait CommandRegistry {
    /// Register `command`.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] when the registry refuses the command.
    fn register(&mut self, command: SlashCommand) -> Result<(), CommandError>;
}

/// Register every floor command, logging failures instead of propagating them.
///
/// Returns how many commands were registered.
pub fn register_floor_commands<R: CommandRegistry + ?Sized>(registry: &mut R) -> usize {
    let mut registered = 0;
    for command in SlashCommand::ALL {
        match registry.register(command) {
            Ok(()) => registered += 1,
            Err(err) => warn!(command = command.name(), error = %err, "slash command not registered"),
        }
    }
    info!(registered, "slash commands registered");
    registered
}

/// In-process command registry with name lookup and dispatch.
#[derive(Debug, Default)]
pub struct CommandTable {
    commands: BTreeMap<&'static str, SlashCommand>,
}

impl CommandTable {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered command names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }

    /// Run a full command line such as `/hide 2 4`.
    ///
    /// Returns `None` when the line does not name a registered command.
    pub async fn dispatch<H: ChatHost + ?Sized>(&self, host: &H, line: &str) -> Option<String> {
        let line = line.trim_start();
        let (name, args) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let name = name.strip_prefix('/').unwrap_or(name);
        let command = *self.commands.get(name)?;
        Some(command.execute(host, args).await)
    }
}

impl CommandRegistry for CommandTable {
    fn register(&mut self, command: SlashCommand) -> Result<(), CommandError> {
        if self.commands.contains_key(command.name()) {
            return Err(CommandError::Duplicate {
                name: command.name(),
            });
        }
        self.commands.insert(command.name(), command);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{ChatContext, InMemoryChat, MemoryHost, Visibility};

    fn host_of(len: usize) -> (InMemoryChat, MemoryHost) {
        let chat = InMemoryChat::from_texts((0..len).map(|idx| idx.to_string()));
        (chat.clone(), MemoryHost::new(chat))
    }

    #[test]
    fn args_need_two_positionals() {
        assert_eq!(parse_range_args(SlashCommand::Hide, "  1   3 9"), Ok(("1", "3")));
        assert_eq!(
            parse_range_args(SlashCommand::Unhide, "4"),
            Err(CommandError::MissingArguments {
                usage: SlashCommand::Unhide.usage()
            })
        );
    }

    #[tokio::test]
    async fn hide_command_reports_each_outcome() {
        let (chat, host) = host_of(4);
        let hide = SlashCommand::Hide;
        assert_eq!(hide.execute(&host, "").await, hide.usage());
        assert_eq!(hide.execute(&host, "1 x").await, "error: floor values must be numeric");
        assert_eq!(
            hide.execute(&host, "3 1").await,
            "error: start floor (3) must not exceed end floor (1)"
        );
        assert_eq!(
            hide.execute(&host, "0 5").await,
            "error: end floor (5) exceeds latest floor count (4)"
        );
        assert_eq!(chat.save_count(), 0);
        assert_eq!(hide.execute(&host, "1 2").await, "hid floors 1 ~ 2");
        assert_eq!(chat.visibility(2), Some(Visibility::HIDDEN));
    }

    #[tokio::test]
    async fn table_dispatches_registered_commands() {
        let (chat, host) = host_of(3);
        let mut table = CommandTable::new();
        assert_eq!(register_floor_commands(&mut table), 2);
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["hide", "unhide"]);

        let hid = table.dispatch(&host, "/hide 0 2").await;
        assert_eq!(hid.as_deref(), Some("hid floors 0 ~ 2"));
        let unhid = table.dispatch(&host, "/unhide 0 2").await;
        assert_eq!(unhid.as_deref(), Some("unhid floors 0 ~ 2"));
        assert_eq!(chat.visibility(1), Some(Visibility::SHOWN));
        assert_eq!(table.dispatch(&host, "/echo hi").await, None);
    }

    #[test]
    fn duplicate_registration_is_logged_not_raised() {
        let mut table = CommandTable::new();
        assert_eq!(register_floor_commands(&mut table), 2);
        assert_eq!(register_floor_commands(&mut table), 0);
        assert_eq!(SlashCommand::from_name("/unhide"), Some(SlashCommand::Unhide));
        assert_eq!(SlashCommand::from_name("show"), None);
    }
}
