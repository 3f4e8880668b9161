/// Message cleanup helpers used by purge.
pub mod cleanup;
/// Generic embed builders shared across commands.
pub mod embed;
/// Shared formatting helpers (mentions, user tags, numbered lists).
pub mod formatting;
/// Pure parser helpers.
pub mod parse;
/// Permission and role-rank resolution.
pub mod permissions;
/// Shared time helpers.
pub mod time;
