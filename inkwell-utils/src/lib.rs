/// Generic embed builders shared across commands.
pub mod embed;
/// Shared formatting helpers for prompt and submission text.
pub mod formatting;
/// Single source of truth for the message-command prefix.
pub const COMMAND_PREFIX: char = '!';
/// Pure parser helpers.
pub mod parse;
/// Moderator role checks.
pub mod permissions;
