use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use poise::serenity_prelude as serenity;

use bramble_core::{Data, ModerationPolicy};
use bramble_database::ModerationStore;
use bramble_utils::permissions::{MemberStanding, RoleRank};

use crate::moderation::gateway::{BannedUser, ModerationGateway, OverwriteBits};

pub const GUILD: u64 = 1;
pub const BOT: u64 = 2;
pub const ACTOR: u64 = 3;
pub const TARGET: u64 = 4;
pub const CHANNEL: u64 = 50;

/// A mutating call observed by the fake gateway.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Kick(u64, String),
    Ban(u64, String),
    Unban(u64),
    Purge(u64, u8),
    CreateRole(String),
    SetOverwrite(u64, u64),
    SetRateLimit(u64, u16),
    AddRole(u64, u64),
    RemoveRole(u64, u64),
    SetNickname(u64, String),
}

#[derive(Default)]
struct FakeState {
    standings: HashMap<u64, MemberStanding>,
    bans: Vec<BannedUser>,
    roles: Vec<(u64, String)>,
    member_roles: HashMap<u64, HashSet<u64>>,
    channels: Vec<u64>,
    overwrites: HashMap<(u64, u64), OverwriteBits>,
    channel_messages: HashMap<u64, u64>,
    next_role_id: u64,
    failing: HashSet<&'static str>,
    calls: Vec<Call>,
}

/// In-memory guild that records every mutating call.
pub struct FakeGateway {
    state: Mutex<FakeState>,
}

impl FakeGateway {
    pub fn new() -> Self {
        let gateway = Self {
            state: Mutex::new(FakeState {
                next_role_id: 1_000,
                channels: vec![CHANNEL],
                ..FakeState::default()
            }),
        };
        gateway.set_member(BOT, serenity::Permissions::ADMINISTRATOR, 50);
        gateway
    }

    fn with<R>(&self, f: impl FnOnce(&mut FakeState) -> R) -> R {
        let mut state = self.state.lock().unwrap();
        f(&mut state)
    }

    pub fn set_member(&self, user_id: u64, permissions: serenity::Permissions, position: u16) {
        self.with(|state| {
            state.standings.insert(
                user_id,
                MemberStanding {
                    permissions,
                    rank: RoleRank::Position(position),
                },
            );
        });
    }

    pub fn add_ban(&self, user_id: u64, name: &str, discriminator: u16) {
        self.with(|state| {
            state.bans.push(BannedUser {
                id: serenity::UserId::new(user_id),
                name: name.to_owned(),
                discriminator,
            });
        });
    }

    pub fn add_role_named(&self, role_id: u64, name: &str) {
        self.with(|state| state.roles.push((role_id, name.to_owned())));
    }

    pub fn rename_role(&self, role_id: u64, name: &str) {
        self.with(|state| {
            for (id, role_name) in &mut state.roles {
                if *id == role_id {
                    *role_name = name.to_owned();
                }
            }
        });
    }

    pub fn delete_role(&self, role_id: u64) {
        self.with(|state| state.roles.retain(|(id, _)| *id != role_id));
    }

    pub fn set_channels(&self, channels: &[u64]) {
        self.with(|state| state.channels = channels.to_vec());
    }

    pub fn set_messages(&self, channel_id: u64, count: u64) {
        self.with(|state| {
            state.channel_messages.insert(channel_id, count);
        });
    }

    pub fn set_overwrite(&self, channel_id: u64, role_id: u64, bits: OverwriteBits) {
        self.with(|state| {
            state.overwrites.insert((channel_id, role_id), bits);
        });
    }

    pub fn overwrite(&self, channel_id: u64, role_id: u64) -> OverwriteBits {
        self.with(|state| {
            state
                .overwrites
                .get(&(channel_id, role_id))
                .copied()
                .unwrap_or_default()
        })
    }

    pub fn member_roles(&self, user_id: u64) -> HashSet<u64> {
        self.with(|state| state.member_roles.get(&user_id).cloned().unwrap_or_default())
    }

    pub fn ban_names(&self) -> Vec<String> {
        self.with(|state| state.bans.iter().map(|ban| ban.name.clone()).collect())
    }

    pub fn fail_on(&self, operation: &'static str) {
        self.with(|state| {
            state.failing.insert(operation);
        });
    }

    pub fn calls(&self) -> Vec<Call> {
        self.with(|state| state.calls.clone())
    }

    pub fn count_calls(&self, matcher: impl Fn(&Call) -> bool) -> usize {
        self.with(|state| state.calls.iter().filter(|call| matcher(call)).count())
    }

    fn check(&self, operation: &'static str) -> anyhow::Result<()> {
        if self.with(|state| state.failing.contains(operation)) {
            anyhow::bail!("{operation} rejected by platform");
        }
        Ok(())
    }

    fn record(&self, call: Call) {
        self.with(|state| state.calls.push(call));
    }
}

pub fn test_data(enforce_hierarchy: bool) -> Data {
    Data::new(
        ModerationStore::in_memory("test"),
        ModerationPolicy { enforce_hierarchy },
        "Muted",
    )
}

#[async_trait]
impl ModerationGateway for FakeGateway {
    fn guild_id(&self) -> serenity::GuildId {
        serenity::GuildId::new(GUILD)
    }

    fn bot_id(&self) -> serenity::UserId {
        serenity::UserId::new(BOT)
    }

    async fn member_standing(&self, user_id: serenity::UserId) -> anyhow::Result<MemberStanding> {
        tokio::task::yield_now().await;
        self.check("member_standing")?;
        self.with(|state| state.standings.get(&user_id.get()).copied())
            .ok_or_else(|| anyhow::anyhow!("unknown member {}", user_id.get()))
    }

    async fn kick(&self, user_id: serenity::UserId, reason: &str) -> anyhow::Result<()> {
        self.check("kick")?;
        self.record(Call::Kick(user_id.get(), reason.to_owned()));
        Ok(())
    }

    async fn ban(&self, user_id: serenity::UserId, reason: &str) -> anyhow::Result<()> {
        self.check("ban")?;
        self.record(Call::Ban(user_id.get(), reason.to_owned()));
        Ok(())
    }

    async fn bans(&self) -> anyhow::Result<Vec<BannedUser>> {
        self.check("bans")?;
        Ok(self.with(|state| state.bans.clone()))
    }

    async fn unban(&self, user_id: serenity::UserId) -> anyhow::Result<()> {
        self.check("unban")?;
        self.record(Call::Unban(user_id.get()));
        self.with(|state| state.bans.retain(|ban| ban.id != user_id));
        Ok(())
    }

    async fn purge(&self, channel_id: serenity::ChannelId, limit: u8) -> anyhow::Result<u64> {
        self.check("purge")?;
        self.record(Call::Purge(channel_id.get(), limit));
        Ok(self.with(|state| {
            let available = state.channel_messages.entry(channel_id.get()).or_default();
            let deleted = (*available).min(u64::from(limit));
            *available -= deleted;
            deleted
        }))
    }

    async fn role_exists(&self, role_id: serenity::RoleId) -> anyhow::Result<bool> {
        self.check("role_exists")?;
        Ok(self.with(|state| state.roles.iter().any(|(id, _)| *id == role_id.get())))
    }

    async fn roles_named(&self, name: &str) -> anyhow::Result<Vec<serenity::RoleId>> {
        tokio::task::yield_now().await;
        self.check("roles_named")?;
        Ok(self.with(|state| {
            state
                .roles
                .iter()
                .filter(|(_, role_name)| role_name == name)
                .map(|(id, _)| serenity::RoleId::new(*id))
                .collect()
        }))
    }

    async fn create_role(&self, name: &str) -> anyhow::Result<serenity::RoleId> {
        tokio::task::yield_now().await;
        self.check("create_role")?;
        self.record(Call::CreateRole(name.to_owned()));
        Ok(self.with(|state| {
            let id = state.next_role_id;
            state.next_role_id += 1;
            state.roles.push((id, name.to_owned()));
            serenity::RoleId::new(id)
        }))
    }

    async fn channels(&self) -> anyhow::Result<Vec<serenity::ChannelId>> {
        self.check("channels")?;
        Ok(self.with(|state| {
            state
                .channels
                .iter()
                .map(|id| serenity::ChannelId::new(*id))
                .collect()
        }))
    }

    async fn channel_overwrite(
        &self,
        channel_id: serenity::ChannelId,
        role_id: serenity::RoleId,
    ) -> anyhow::Result<OverwriteBits> {
        self.check("channel_overwrite")?;
        Ok(self.overwrite(channel_id.get(), role_id.get()))
    }

    async fn set_channel_overwrite(
        &self,
        channel_id: serenity::ChannelId,
        role_id: serenity::RoleId,
        bits: OverwriteBits,
    ) -> anyhow::Result<()> {
        self.check("set_channel_overwrite")?;
        self.record(Call::SetOverwrite(channel_id.get(), role_id.get()));
        self.set_overwrite(channel_id.get(), role_id.get(), bits);
        Ok(())
    }

    async fn set_rate_limit(&self, channel_id: serenity::ChannelId, seconds: u16) -> anyhow::Result<()> {
        self.check("set_rate_limit")?;
        self.record(Call::SetRateLimit(channel_id.get(), seconds));
        Ok(())
    }

    async fn member_has_role(
        &self,
        user_id: serenity::UserId,
        role_id: serenity::RoleId,
    ) -> anyhow::Result<bool> {
        self.check("member_has_role")?;
        Ok(self.member_roles(user_id.get()).contains(&role_id.get()))
    }

    async fn add_role(
        &self,
        user_id: serenity::UserId,
        role_id: serenity::RoleId,
        _reason: &str,
    ) -> anyhow::Result<()> {
        self.check("add_role")?;
        self.record(Call::AddRole(user_id.get(), role_id.get()));
        self.with(|state| {
            state
                .member_roles
                .entry(user_id.get())
                .or_default()
                .insert(role_id.get());
        });
        Ok(())
    }

    async fn remove_role(&self, user_id: serenity::UserId, role_id: serenity::RoleId) -> anyhow::Result<()> {
        self.check("remove_role")?;
        self.record(Call::RemoveRole(user_id.get(), role_id.get()));
        self.with(|state| {
            if let Some(roles) = state.member_roles.get_mut(&user_id.get()) {
                roles.remove(&role_id.get());
            }
        });
        Ok(())
    }

    async fn set_nickname(&self, user_id: serenity::UserId, nickname: &str) -> anyhow::Result<()> {
        self.check("set_nickname")?;
        self.record(Call::SetNickname(user_id.get(), nickname.to_owned()));
        Ok(())
    }
}
