use tracing::{debug, error, info};

use poise::serenity_prelude as serenity;

use bramble_core::{Data, Decision, HierarchyRanks, Operation};
use bramble_database::impls::warnings::{record_warning, warnings_for};
use bramble_utils::formatting::{format_user_tag, mention, numbered_list, sanitize_mentions};
use bramble_utils::parse::parse_user_tag;

use crate::moderation::gateway::ModerationGateway;
use crate::moderation::muted_role::resolve_muted_role;

pub const DEFAULT_REASON: &str = "No reason provided.";
pub const DEFAULT_PURGE_AMOUNT: u16 = 5;
pub const MAX_PURGE_AMOUNT: u16 = 100;
pub const MAX_SLOWMODE_SECS: u16 = 21_600;
pub const MAX_NICKNAME_CHARS: usize = 32;

/// The single response a moderation command produces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub content: String,
    pub ephemeral: bool,
}

impl Reply {
    pub fn public(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: false,
        }
    }

    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: true,
        }
    }
}

/// The user a command acts upon.
#[derive(Clone, Debug)]
pub struct Target {
    pub id: serenity::UserId,
    pub mention: String,
}

impl Target {
    pub fn new(id: serenity::UserId) -> Self {
        Self {
            id,
            mention: mention(id.get()),
        }
    }
}

impl From<&serenity::User> for Target {
    fn from(user: &serenity::User) -> Self {
        Self::new(user.id)
    }
}

enum ActionError {
    Denied(&'static str),
    Invalid(String),
    Platform(anyhow::Error),
}

impl From<anyhow::Error> for ActionError {
    fn from(source: anyhow::Error) -> Self {
        ActionError::Platform(source)
    }
}

type ActionResult = Result<Reply, ActionError>;

/// Runs moderation operations for one invocation: authorize, act, reply.
pub struct Moderator<'a, G: ModerationGateway> {
    gateway: &'a G,
    data: &'a Data,
    actor_id: serenity::UserId,
    channel_id: serenity::ChannelId,
}

impl<'a, G: ModerationGateway> Moderator<'a, G> {
    pub fn new(
        gateway: &'a G,
        data: &'a Data,
        actor_id: serenity::UserId,
        channel_id: serenity::ChannelId,
    ) -> Self {
        Self {
            gateway,
            data,
            actor_id,
            channel_id,
        }
    }

    pub async fn kick(&self, target: &Target, reason: Option<&str>) -> Reply {
        let result = self.run_kick(target, reason.unwrap_or(DEFAULT_REASON)).await;
        self.finish(Operation::Kick, result)
    }

    pub async fn ban(&self, target: &Target, reason: Option<&str>) -> Reply {
        let result = self.run_ban(target, reason.unwrap_or(DEFAULT_REASON)).await;
        self.finish(Operation::Ban, result)
    }

    pub async fn unban(&self, user_tag: &str) -> Reply {
        let result = self.run_unban(user_tag).await;
        self.finish(Operation::Unban, result)
    }

    pub async fn purge(&self, amount: Option<u16>) -> Reply {
        let result = self.run_purge(amount.unwrap_or(DEFAULT_PURGE_AMOUNT)).await;
        self.finish(Operation::Purge, result)
    }

    pub async fn mute(&self, target: &Target, reason: Option<&str>) -> Reply {
        let result = self.run_mute(target, reason.unwrap_or(DEFAULT_REASON)).await;
        self.finish(Operation::Mute, result)
    }

    pub async fn unmute(&self, target: &Target) -> Reply {
        let result = self.run_unmute(target).await;
        self.finish(Operation::Unmute, result)
    }

    pub async fn warn(&self, target: &Target, reason: Option<&str>) -> Reply {
        let result = self.run_warn(target, reason.unwrap_or(DEFAULT_REASON)).await;
        self.finish(Operation::Warn, result)
    }

    pub async fn warnings(&self, target: &Target) -> Reply {
        let result = self.run_warnings(target).await;
        self.finish(Operation::ListWarnings, result)
    }

    pub async fn slowmode(&self, seconds: u16) -> Reply {
        let result = self.run_slowmode(seconds).await;
        self.finish(Operation::Slowmode, result)
    }

    pub async fn lock(&self) -> Reply {
        let result = self.run_set_send(Operation::Lock, false).await;
        self.finish(Operation::Lock, result)
    }

    pub async fn unlock(&self) -> Reply {
        let result = self.run_set_send(Operation::Unlock, true).await;
        self.finish(Operation::Unlock, result)
    }

    pub async fn nickname(&self, target: &Target, nickname: &str) -> Reply {
        let result = self.run_nickname(target, nickname).await;
        self.finish(Operation::Nickname, result)
    }

    /// Map every failure onto the reply the invoker sees.
    fn finish(&self, operation: Operation, result: ActionResult) -> Reply {
        match result {
            Ok(reply) => reply,
            Err(ActionError::Denied(reason)) => {
                debug!(
                    operation = operation.name(),
                    actor_id = self.actor_id.get(),
                    reason,
                    "moderation request denied"
                );
                Reply::ephemeral(reason)
            }
            Err(ActionError::Invalid(message)) => Reply::ephemeral(message),
            Err(ActionError::Platform(source)) => {
                error!(
                    ?source,
                    operation = operation.name(),
                    guild_id = self.gateway.guild_id().get(),
                    "moderation request failed"
                );
                Reply::ephemeral(operation.rule().failure)
            }
        }
    }

    async fn authorize(
        &self,
        operation: Operation,
        target: Option<serenity::UserId>,
    ) -> Result<(), ActionError> {
        let policy = &self.data.policy;
        if operation.rule().required.is_none() && !policy.hierarchy_applies(operation) {
            return Ok(());
        }

        let actor = self.gateway.member_standing(self.actor_id).await?;

        // Ranks are only fetched for requests that already hold the permission.
        let ranks = match target {
            Some(target_id)
                if policy.hierarchy_applies(operation)
                    && policy
                        .check_permission(operation, actor.permissions)
                        .is_allowed() =>
            {
                let target = self.gateway.member_standing(target_id).await?;
                let bot = self.gateway.member_standing(self.gateway.bot_id()).await?;
                Some(HierarchyRanks {
                    actor: actor.rank,
                    target: target.rank,
                    bot: bot.rank,
                })
            }
            _ => None,
        };

        match policy.authorize(operation, actor.permissions, ranks) {
            Decision::Allowed => Ok(()),
            Decision::Denied(reason) => Err(ActionError::Denied(reason)),
        }
    }

    async fn run_kick(&self, target: &Target, reason: &str) -> ActionResult {
        self.authorize(Operation::Kick, Some(target.id)).await?;
        self.gateway.kick(target.id, reason).await?;

        Ok(Reply::public(format!(
            "{} was kicked. Reason: {}",
            target.mention,
            sanitize_mentions(reason)
        )))
    }

    async fn run_ban(&self, target: &Target, reason: &str) -> ActionResult {
        self.authorize(Operation::Ban, Some(target.id)).await?;
        self.gateway.ban(target.id, reason).await?;

        Ok(Reply::public(format!(
            "{} was banned. Reason: {}",
            target.mention,
            sanitize_mentions(reason)
        )))
    }

    async fn run_unban(&self, user_tag: &str) -> ActionResult {
        self.authorize(Operation::Unban, None).await?;

        let Some(tag) = parse_user_tag(user_tag) else {
            return Err(ActionError::Invalid(
                "Invalid user tag. Use the `name#1234` format.".to_owned(),
            ));
        };

        let banned = self
            .gateway
            .bans()
            .await?
            .into_iter()
            .find(|entry| tag.matches(&entry.name, entry.discriminator));

        let Some(banned) = banned else {
            return Ok(Reply::public("User not found in ban list."));
        };

        self.gateway.unban(banned.id).await?;
        info!(
            guild_id = self.gateway.guild_id().get(),
            user = %format_user_tag(&banned.name, banned.discriminator),
            "user unbanned"
        );
        Ok(Reply::public(format!(
            "{} has been unbanned.",
            mention(banned.id.get())
        )))
    }

    async fn run_purge(&self, amount: u16) -> ActionResult {
        self.authorize(Operation::Purge, None).await?;

        if amount == 0 {
            return Err(ActionError::Invalid("Amount must be at least 1.".to_owned()));
        }

        let limit = amount.min(MAX_PURGE_AMOUNT) as u8;
        let deleted = self.gateway.purge(self.channel_id, limit).await?;

        Ok(Reply::ephemeral(format!("Deleted {} messages.", deleted)))
    }

    async fn run_mute(&self, target: &Target, reason: &str) -> ActionResult {
        self.authorize(Operation::Mute, Some(target.id)).await?;

        let role_id = resolve_muted_role(self.gateway, self.data, true)
            .await?
            .ok_or_else(|| anyhow::anyhow!("muted role could not be resolved"))?;
        self.gateway.add_role(target.id, role_id, reason).await?;

        Ok(Reply::public(format!(
            "{} has been muted. Reason: {}",
            target.mention,
            sanitize_mentions(reason)
        )))
    }

    async fn run_unmute(&self, target: &Target) -> ActionResult {
        self.authorize(Operation::Unmute, Some(target.id)).await?;

        let Some(role_id) = resolve_muted_role(self.gateway, self.data, false).await? else {
            return Ok(Reply::public("User is not muted."));
        };

        if !self.gateway.member_has_role(target.id, role_id).await? {
            return Ok(Reply::public("User is not muted."));
        }

        self.gateway.remove_role(target.id, role_id).await?;
        Ok(Reply::public(format!("{} has been unmuted.", target.mention)))
    }

    async fn run_warn(&self, target: &Target, reason: &str) -> ActionResult {
        self.authorize(Operation::Warn, Some(target.id)).await?;

        let guild_id = self.gateway.guild_id().get();
        let record = record_warning(
            &self.data.store,
            guild_id,
            target.id.get(),
            self.actor_id.get(),
            reason,
        )
        .await?;
        debug!(
            guild_id,
            target_id = target.id.get(),
            warn_number = record.warn_number,
            "warning recorded"
        );

        Ok(Reply::public(format!(
            "{} has been warned. Reason: {}",
            target.mention,
            sanitize_mentions(reason)
        )))
    }

    async fn run_warnings(&self, target: &Target) -> ActionResult {
        self.authorize(Operation::ListWarnings, Some(target.id)).await?;

        let entries = warnings_for(
            &self.data.store,
            self.gateway.guild_id().get(),
            target.id.get(),
        )
        .await?;

        if entries.is_empty() {
            return Ok(Reply::public(format!("{} has no warnings.", target.mention)));
        }

        let list = numbered_list(entries.iter().map(|entry| sanitize_mentions(&entry.reason)));
        Ok(Reply::public(format!(
            "Warnings for {}:\n{}",
            target.mention, list
        )))
    }

    async fn run_slowmode(&self, seconds: u16) -> ActionResult {
        self.authorize(Operation::Slowmode, None).await?;

        if seconds > MAX_SLOWMODE_SECS {
            return Err(ActionError::Invalid(format!(
                "Slowmode must be between 0 and {} seconds.",
                MAX_SLOWMODE_SECS
            )));
        }

        self.gateway.set_rate_limit(self.channel_id, seconds).await?;
        Ok(Reply::public(format!("Slowmode set to {} seconds.", seconds)))
    }

    /// Flip send-messages on the `@everyone` overwrite, keeping its other bits.
    async fn run_set_send(&self, operation: Operation, allow_send: bool) -> ActionResult {
        self.authorize(operation, None).await?;

        let everyone_role_id = serenity::RoleId::new(self.gateway.guild_id().get());
        let mut bits = self
            .gateway
            .channel_overwrite(self.channel_id, everyone_role_id)
            .await?;

        let send = serenity::Permissions::SEND_MESSAGES;
        if allow_send {
            bits.deny.remove(send);
            bits.allow.insert(send);
        } else {
            bits.allow.remove(send);
            bits.deny.insert(send);
        }

        self.gateway
            .set_channel_overwrite(self.channel_id, everyone_role_id, bits)
            .await?;

        Ok(Reply::public(if allow_send {
            "Channel unlocked."
        } else {
            "Channel locked."
        }))
    }

    async fn run_nickname(&self, target: &Target, nickname: &str) -> ActionResult {
        self.authorize(Operation::Nickname, Some(target.id)).await?;

        let nickname = nickname.trim();
        let length = nickname.chars().count();
        if length == 0 || length > MAX_NICKNAME_CHARS {
            return Err(ActionError::Invalid(format!(
                "Nicknames must be between 1 and {} characters.",
                MAX_NICKNAME_CHARS
            )));
        }

        self.gateway.set_nickname(target.id, nickname).await?;
        Ok(Reply::public(format!(
            "{}'s nickname changed to: {}",
            target.mention,
            sanitize_mentions(nickname)
        )))
    }
}
