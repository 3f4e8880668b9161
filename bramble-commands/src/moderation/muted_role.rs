use tracing::{info, warn};

use poise::serenity_prelude as serenity;

use bramble_core::Data;
use bramble_database::impls::muted_role::{
    clear_muted_role_id, get_muted_role_id, set_muted_role_id,
};

use crate::moderation::gateway::{ModerationGateway, OverwriteBits};

/// Permissions a muted member loses in every channel.
pub fn muted_overwrite() -> OverwriteBits {
    OverwriteBits {
        allow: serenity::Permissions::empty(),
        deny: serenity::Permissions::SEND_MESSAGES | serenity::Permissions::SPEAK,
    }
}

/// Find the guild's muted role, creating it when `create` is set.
///
/// Lookup order is the remembered role id, then a role with the configured
/// name. A freshly created role is remembered before channel overwrites are
/// applied so a partial failure never leads to a second role.
pub async fn resolve_muted_role<G>(
    gateway: &G,
    data: &Data,
    create: bool,
) -> anyhow::Result<Option<serenity::RoleId>>
where
    G: ModerationGateway + ?Sized,
{
    let _guard = data.muted_role_lock.lock().await;
    let guild_id = gateway.guild_id().get();

    if let Some(stored) = get_muted_role_id(&data.store, guild_id).await? {
        let role_id = serenity::RoleId::new(stored);
        if gateway.role_exists(role_id).await? {
            return Ok(Some(role_id));
        }

        warn!(guild_id, role_id = stored, "remembered muted role is gone; resolving by name");
        clear_muted_role_id(&data.store, guild_id).await?;
    }

    if let Some(role_id) = gateway
        .roles_named(&data.muted_role_name)
        .await?
        .into_iter()
        .next()
    {
        set_muted_role_id(&data.store, guild_id, role_id.get()).await?;
        return Ok(Some(role_id));
    }

    if !create {
        return Ok(None);
    }

    let role_id = gateway.create_role(&data.muted_role_name).await?;
    set_muted_role_id(&data.store, guild_id, role_id.get()).await?;
    info!(guild_id, role_id = role_id.get(), "created muted role");

    let overwrite = muted_overwrite();
    for channel_id in gateway.channels().await? {
        gateway
            .set_channel_overwrite(channel_id, role_id, overwrite)
            .await?;
    }

    Ok(Some(role_id))
}
