pub mod moderation;
pub mod utility;

use bramble_core::{Data, Error};

pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    utility::help::META,
    moderation::kick::META,
    moderation::ban::META,
    moderation::unban::META,
    moderation::purge::META,
    moderation::purge::CLEAR_META,
    moderation::mute::META,
    moderation::unmute::META,
    moderation::warn::META,
    moderation::warnings::META,
    moderation::slowmode::META,
    moderation::lock::META,
    moderation::lock::UNLOCK_META,
    moderation::nickname::META,
];

pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        utility::help::help(),
        moderation::kick::kick(),
        moderation::ban::ban(),
        moderation::unban::unban(),
        moderation::purge::purge(),
        moderation::purge::clear(),
        moderation::mute::mute(),
        moderation::unmute::unmute(),
        moderation::warn::warn(),
        moderation::warnings::warnings(),
        moderation::slowmode::slowmode(),
        moderation::lock::lock(),
        moderation::lock::unlock(),
        moderation::nickname::nickname(),
    ]
}

#[cfg(test)]
mod tests {
    use super::{COMMANDS, commands};

    #[test]
    fn metadata_matches_registered_commands() {
        let mut registered: Vec<String> = commands().into_iter().map(|command| command.name).collect();
        let mut described: Vec<String> = COMMANDS.iter().map(|meta| meta.name.to_owned()).collect();
        registered.sort();
        described.sort();
        assert_eq!(registered, described);
    }
}
