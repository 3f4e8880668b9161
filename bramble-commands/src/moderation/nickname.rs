use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::moderation::actions::Target;
use crate::moderation::{gateway_for, moderator_for, send_guild_only, send_reply};
use bramble_core::{Context, Error};

pub const META: CommandMeta = CommandMeta {
    name: "nickname",
    desc: "Change a member's nickname.",
    category: "moderation",
    usage: "/nickname <user> <nickname>",
};

#[poise::command(slash_command, category = "Moderation")]
pub async fn nickname(
    ctx: Context<'_>,
    #[description = "The member to rename"] user: serenity::User,
    #[description = "New nickname (1-32 characters)"] nickname: String,
) -> Result<(), Error> {
    let Some(gateway) = gateway_for(&ctx) else {
        return send_guild_only(ctx).await;
    };

    let reply = moderator_for(&ctx, &gateway)
        .nickname(&Target::from(&user), &nickname)
        .await;
    send_reply(ctx, reply).await
}
