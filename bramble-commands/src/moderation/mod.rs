pub mod actions;
pub mod gateway;
pub mod muted_role;
mod replies;
#[cfg(test)]
mod testing;

pub mod ban;
pub mod kick;
pub mod lock;
pub mod mute;
pub mod nickname;
pub mod purge;
pub mod slowmode;
pub mod unban;
pub mod unmute;
pub mod warn;
pub mod warnings;

pub use replies::{gateway_for, guild_only_message, moderator_for, send_guild_only, send_reply};
