/// Render a user mention (e.g., 42 -> "<@42>").
pub fn mention(user_id: u64) -> String {
    format!("<@{}>", user_id)
}

/// Break `@` so user-supplied text can't ping roles or everyone.
pub fn sanitize_mentions(text: &str) -> String {
    text.replace('@', "@\u{200B}")
}

/// Format a user tag; migrated accounts (discriminator 0) show the bare name.
pub fn format_user_tag(name: &str, discriminator: u16) -> String {
    if discriminator == 0 {
        name.to_owned()
    } else {
        format!("{}#{:04}", name, discriminator)
    }
}

/// Render entries as a one-based numbered list, one per line.
pub fn numbered_list<I, S>(entries: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| format!("{}. {}", index + 1, entry.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::{format_user_tag, mention, numbered_list, sanitize_mentions};

    #[test]
    fn mentions_by_id() {
        assert_eq!(mention(42), "<@42>");
    }

    #[test]
    fn sanitizes_everyone_pings() {
        assert_eq!(sanitize_mentions("hi @everyone"), "hi @\u{200B}everyone");
        assert_eq!(sanitize_mentions("spam"), "spam");
    }

    #[test]
    fn formats_tags_with_padding() {
        assert_eq!(format_user_tag("alice", 1), "alice#0001");
        assert_eq!(format_user_tag("bob", 9999), "bob#9999");
        assert_eq!(format_user_tag("carol", 0), "carol");
    }

    #[test]
    fn numbers_entries_from_one() {
        assert_eq!(numbered_list(["spam", "flood"]), "1. spam\n2. flood");
        assert_eq!(numbered_list(Vec::<String>::new()), "");
    }
}
