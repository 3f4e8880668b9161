use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::moderation::actions::Target;
use crate::moderation::{gateway_for, moderator_for, send_guild_only, send_reply};
use bramble_core::{Context, Error};

pub const META: CommandMeta = CommandMeta {
    name: "unmute",
    desc: "Remove the muted role from a member.",
    category: "moderation",
    usage: "/unmute <user>",
};

#[poise::command(slash_command, category = "Moderation")]
pub async fn unmute(
    ctx: Context<'_>,
    #[description = "The member to unmute"] user: serenity::User,
) -> Result<(), Error> {
    let Some(gateway) = gateway_for(&ctx) else {
        return send_guild_only(ctx).await;
    };

    let reply = moderator_for(&ctx, &gateway)
        .unmute(&Target::from(&user))
        .await;
    send_reply(ctx, reply).await
}
