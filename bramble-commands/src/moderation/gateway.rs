use async_trait::async_trait;

use poise::serenity_prelude as serenity;

use bramble_utils::cleanup::purge_recent_messages;
use bramble_utils::permissions::{MemberStanding, resolve_member_standing};

/// An entry of the guild ban list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BannedUser {
    pub id: serenity::UserId,
    pub name: String,
    pub discriminator: u16,
}

/// Allow/deny pair of one role's permission overwrite on a channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OverwriteBits {
    pub allow: serenity::Permissions,
    pub deny: serenity::Permissions,
}

/// Platform capabilities the moderation actions rely on, scoped to one guild.
///
/// Every call may fail; callers treat failures as platform errors.
#[async_trait]
pub trait ModerationGateway: Send + Sync {
    fn guild_id(&self) -> serenity::GuildId;

    fn bot_id(&self) -> serenity::UserId;

    async fn member_standing(&self, user_id: serenity::UserId) -> anyhow::Result<MemberStanding>;

    async fn kick(&self, user_id: serenity::UserId, reason: &str) -> anyhow::Result<()>;

    async fn ban(&self, user_id: serenity::UserId, reason: &str) -> anyhow::Result<()>;

    async fn bans(&self) -> anyhow::Result<Vec<BannedUser>>;

    async fn unban(&self, user_id: serenity::UserId) -> anyhow::Result<()>;

    /// Delete up to `limit` recent messages, returning how many went away.
    async fn purge(&self, channel_id: serenity::ChannelId, limit: u8) -> anyhow::Result<u64>;

    async fn role_exists(&self, role_id: serenity::RoleId) -> anyhow::Result<bool>;

    async fn roles_named(&self, name: &str) -> anyhow::Result<Vec<serenity::RoleId>>;

    async fn create_role(&self, name: &str) -> anyhow::Result<serenity::RoleId>;

    async fn channels(&self) -> anyhow::Result<Vec<serenity::ChannelId>>;

    async fn channel_overwrite(
        &self,
        channel_id: serenity::ChannelId,
        role_id: serenity::RoleId,
    ) -> anyhow::Result<OverwriteBits>;

    async fn set_channel_overwrite(
        &self,
        channel_id: serenity::ChannelId,
        role_id: serenity::RoleId,
        bits: OverwriteBits,
    ) -> anyhow::Result<()>;

    async fn set_rate_limit(&self, channel_id: serenity::ChannelId, seconds: u16) -> anyhow::Result<()>;

    async fn member_has_role(
        &self,
        user_id: serenity::UserId,
        role_id: serenity::RoleId,
    ) -> anyhow::Result<bool>;

    async fn add_role(
        &self,
        user_id: serenity::UserId,
        role_id: serenity::RoleId,
        reason: &str,
    ) -> anyhow::Result<()>;

    async fn remove_role(&self, user_id: serenity::UserId, role_id: serenity::RoleId) -> anyhow::Result<()>;

    async fn set_nickname(&self, user_id: serenity::UserId, nickname: &str) -> anyhow::Result<()>;
}

/// Gateway backed by the serenity HTTP client.
pub struct SerenityGateway<'a> {
    http: &'a serenity::Http,
    guild_id: serenity::GuildId,
    bot_id: serenity::UserId,
}

impl<'a> SerenityGateway<'a> {
    pub fn new(http: &'a serenity::Http, guild_id: serenity::GuildId, bot_id: serenity::UserId) -> Self {
        Self {
            http,
            guild_id,
            bot_id,
        }
    }
}

#[async_trait]
impl ModerationGateway for SerenityGateway<'_> {
    fn guild_id(&self) -> serenity::GuildId {
        self.guild_id
    }

    fn bot_id(&self) -> serenity::UserId {
        self.bot_id
    }

    async fn member_standing(&self, user_id: serenity::UserId) -> anyhow::Result<MemberStanding> {
        resolve_member_standing(self.http, self.guild_id, user_id).await
    }

    async fn kick(&self, user_id: serenity::UserId, reason: &str) -> anyhow::Result<()> {
        self.guild_id
            .kick_with_reason(self.http, user_id, reason)
            .await?;
        Ok(())
    }

    async fn ban(&self, user_id: serenity::UserId, reason: &str) -> anyhow::Result<()> {
        self.guild_id
            .ban_with_reason(self.http, user_id, 0, reason)
            .await?;
        Ok(())
    }

    async fn bans(&self) -> anyhow::Result<Vec<BannedUser>> {
        let mut banned = Vec::new();
        let mut after: Option<serenity::UserId> = None;

        loop {
            let page = self
                .guild_id
                .bans(self.http, after.map(serenity::UserPagination::After), None)
                .await?;

            let Some(last) = page.last() else {
                break;
            };
            after = Some(last.user.id);

            banned.extend(page.into_iter().map(|ban| BannedUser {
                id: ban.user.id,
                discriminator: ban.user.discriminator.map_or(0, |value| value.get()),
                name: ban.user.name,
            }));
        }

        Ok(banned)
    }

    async fn unban(&self, user_id: serenity::UserId) -> anyhow::Result<()> {
        self.guild_id.unban(self.http, user_id).await?;
        Ok(())
    }

    async fn purge(&self, channel_id: serenity::ChannelId, limit: u8) -> anyhow::Result<u64> {
        purge_recent_messages(self.http, channel_id, limit).await
    }

    async fn role_exists(&self, role_id: serenity::RoleId) -> anyhow::Result<bool> {
        let roles = self.guild_id.roles(self.http).await?;
        Ok(roles.contains_key(&role_id))
    }

    async fn roles_named(&self, name: &str) -> anyhow::Result<Vec<serenity::RoleId>> {
        let roles = self.guild_id.roles(self.http).await?;
        let mut matching: Vec<&serenity::Role> =
            roles.values().filter(|role| role.name == name).collect();
        matching.sort_by_key(|role| std::cmp::Reverse(role.position));

        Ok(matching.into_iter().map(|role| role.id).collect())
    }

    async fn create_role(&self, name: &str) -> anyhow::Result<serenity::RoleId> {
        let role = self
            .guild_id
            .create_role(self.http, serenity::EditRole::new().name(name))
            .await?;
        Ok(role.id)
    }

    async fn channels(&self) -> anyhow::Result<Vec<serenity::ChannelId>> {
        let channels = self.guild_id.channels(self.http).await?;
        Ok(channels.into_keys().collect())
    }

    async fn channel_overwrite(
        &self,
        channel_id: serenity::ChannelId,
        role_id: serenity::RoleId,
    ) -> anyhow::Result<OverwriteBits> {
        let channel = channel_id
            .to_channel(self.http)
            .await?
            .guild()
            .ok_or_else(|| anyhow::anyhow!("channel {} is not a guild channel", channel_id.get()))?;

        let bits = channel
            .permission_overwrites
            .iter()
            .find(|overwrite| {
                matches!(overwrite.kind, serenity::PermissionOverwriteType::Role(id) if id == role_id)
            })
            .map(|overwrite| OverwriteBits {
                allow: overwrite.allow,
                deny: overwrite.deny,
            })
            .unwrap_or_default();

        Ok(bits)
    }

    async fn set_channel_overwrite(
        &self,
        channel_id: serenity::ChannelId,
        role_id: serenity::RoleId,
        bits: OverwriteBits,
    ) -> anyhow::Result<()> {
        channel_id
            .create_permission(
                self.http,
                serenity::PermissionOverwrite {
                    allow: bits.allow,
                    deny: bits.deny,
                    kind: serenity::PermissionOverwriteType::Role(role_id),
                },
            )
            .await?;
        Ok(())
    }

    async fn set_rate_limit(&self, channel_id: serenity::ChannelId, seconds: u16) -> anyhow::Result<()> {
        channel_id
            .edit(
                self.http,
                serenity::EditChannel::new().rate_limit_per_user(seconds),
            )
            .await?;
        Ok(())
    }

    async fn member_has_role(
        &self,
        user_id: serenity::UserId,
        role_id: serenity::RoleId,
    ) -> anyhow::Result<bool> {
        let member = self.guild_id.member(self.http, user_id).await?;
        Ok(member.roles.contains(&role_id))
    }

    async fn add_role(
        &self,
        user_id: serenity::UserId,
        role_id: serenity::RoleId,
        reason: &str,
    ) -> anyhow::Result<()> {
        self.http
            .add_member_role(self.guild_id, user_id, role_id, Some(reason))
            .await?;
        Ok(())
    }

    async fn remove_role(&self, user_id: serenity::UserId, role_id: serenity::RoleId) -> anyhow::Result<()> {
        self.http
            .remove_member_role(self.guild_id, user_id, role_id, None)
            .await?;
        Ok(())
    }

    async fn set_nickname(&self, user_id: serenity::UserId, nickname: &str) -> anyhow::Result<()> {
        self.guild_id
            .edit_member(self.http, user_id, serenity::EditMember::new().nickname(nickname))
            .await?;
        Ok(())
    }
}
