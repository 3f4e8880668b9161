use poise::CreateReply;

use crate::utility::embeds::grouped_help_description;
use crate::{COMMANDS, CommandMeta};
use bramble_core::{Context, Error};
use bramble_utils::embed::build_embed;

pub const META: CommandMeta = CommandMeta {
    name: "help",
    desc: "Lists out all available commands.",
    category: "utility",
    usage: "/help",
};

#[poise::command(slash_command, category = "Utility")]
pub async fn help(ctx: Context<'_>) -> Result<(), Error> {
    let commands = sorted_commands();
    let embed = build_embed("Available Commands", grouped_help_description(&commands));

    ctx.send(CreateReply::default().embed(embed).ephemeral(true))
        .await?;
    Ok(())
}

fn sorted_commands() -> Vec<&'static CommandMeta> {
    let mut sorted: Vec<&'static CommandMeta> = COMMANDS.iter().collect();
    sorted.sort_unstable_by(|left, right| {
        left.category
            .cmp(right.category)
            .then_with(|| left.name.cmp(right.name))
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::sorted_commands;

    #[test]
    fn moderation_sorts_before_utility() {
        let commands = sorted_commands();
        let categories: Vec<&str> = commands.iter().map(|command| command.category).collect();

        let first_utility = categories.iter().position(|c| *c == "utility").unwrap();
        assert!(categories[..first_utility].iter().all(|c| *c == "moderation"));
        assert_eq!(commands[0].name, "ban");
    }
}
