use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::moderation::actions::Target;
use crate::moderation::{gateway_for, moderator_for, send_guild_only, send_reply};
use bramble_core::{Context, Error};

pub const META: CommandMeta = CommandMeta {
    name: "warn",
    desc: "Record a warning against a member.",
    category: "moderation",
    usage: "/warn <user> [reason]",
};

#[poise::command(slash_command, category = "Moderation")]
pub async fn warn(
    ctx: Context<'_>,
    #[description = "The member to warn"] user: serenity::User,
    #[description = "Reason for the warning"] reason: Option<String>,
) -> Result<(), Error> {
    let Some(gateway) = gateway_for(&ctx) else {
        return send_guild_only(ctx).await;
    };

    let reply = moderator_for(&ctx, &gateway)
        .warn(&Target::from(&user), reason.as_deref())
        .await;
    send_reply(ctx, reply).await
}
