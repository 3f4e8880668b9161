/// A `name#discriminator` user tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserTag {
    pub name: String,
    /// Digits exactly as written, leading zeros included.
    pub discriminator: String,
}

impl UserTag {
    /// Exact match against an account's name and numeric discriminator.
    ///
    /// Discriminators render zero-padded to four digits; migrated accounts
    /// (discriminator 0) only match a literal `0`.
    pub fn matches(&self, name: &str, discriminator: u16) -> bool {
        let rendered = if discriminator == 0 {
            "0".to_owned()
        } else {
            format!("{:04}", discriminator)
        };

        self.name == name && self.discriminator == rendered
    }
}

/// Parse a user tag like `alice#0001`.
///
/// The discriminator must be one to four ASCII digits. Accounts migrated to
/// unique usernames carry discriminator `0`.
pub fn parse_user_tag(raw: &str) -> Option<UserTag> {
    let (name, discriminator) = raw.trim().rsplit_once('#')?;
    if name.is_empty() || name.contains('#') {
        return None;
    }

    if discriminator.is_empty()
        || discriminator.len() > 4
        || !discriminator.bytes().all(|byte| byte.is_ascii_digit())
    {
        return None;
    }

    Some(UserTag {
        name: name.to_owned(),
        discriminator: discriminator.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::{UserTag, parse_user_tag};

    #[test]
    fn parses_name_and_discriminator() {
        assert_eq!(
            parse_user_tag("alice#0001"),
            Some(UserTag {
                name: "alice".to_owned(),
                discriminator: "0001".to_owned(),
            })
        );
        assert_eq!(
            parse_user_tag("  bob builder#9999 "),
            Some(UserTag {
                name: "bob builder".to_owned(),
                discriminator: "9999".to_owned(),
            })
        );
        assert_eq!(
            parse_user_tag("carol#0").map(|tag| tag.discriminator),
            Some("0".to_owned())
        );
    }

    #[test]
    fn rejects_malformed_tags() {
        assert_eq!(parse_user_tag("alice"), None);
        assert_eq!(parse_user_tag("#0001"), None);
        assert_eq!(parse_user_tag("alice#"), None);
        assert_eq!(parse_user_tag("alice#12345"), None);
        assert_eq!(parse_user_tag("alice#12a4"), None);
        assert_eq!(parse_user_tag("a#b#0001"), None);
    }

    #[test]
    fn matches_only_the_exact_tag() {
        let padded = parse_user_tag("alice#0001").unwrap();
        assert!(padded.matches("alice", 1));
        assert!(!padded.matches("alice", 2));
        assert!(!padded.matches("Alice", 1));

        assert!(!parse_user_tag("alice#1").unwrap().matches("alice", 1));
        assert!(!parse_user_tag("alice#01").unwrap().matches("alice", 1));

        assert!(parse_user_tag("carol#0").unwrap().matches("carol", 0));
        assert!(!parse_user_tag("carol#0000").unwrap().matches("carol", 0));
    }
}
