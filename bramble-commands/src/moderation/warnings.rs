use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::moderation::actions::Target;
use crate::moderation::{gateway_for, moderator_for, send_guild_only, send_reply};
use bramble_core::{Context, Error};

pub const META: CommandMeta = CommandMeta {
    name: "warnings",
    desc: "List the warnings recorded for a member.",
    category: "moderation",
    usage: "/warnings <user>",
};

#[poise::command(slash_command, category = "Moderation")]
pub async fn warnings(
    ctx: Context<'_>,
    #[description = "The member to look up"] user: serenity::User,
) -> Result<(), Error> {
    let Some(gateway) = gateway_for(&ctx) else {
        return send_guild_only(ctx).await;
    };

    let reply = moderator_for(&ctx, &gateway)
        .warnings(&Target::from(&user))
        .await;
    send_reply(ctx, reply).await
}
