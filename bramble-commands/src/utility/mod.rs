pub mod embeds;
pub mod help;
