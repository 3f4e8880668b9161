use std::time::{SystemTime, UNIX_EPOCH};

/// Return the current unix timestamp in seconds.
pub fn now_unix_secs() -> u64 {
    unix_secs(SystemTime::now())
}

/// Seconds since the unix epoch; instants before it clamp to zero.
pub fn unix_secs(at: SystemTime) -> u64 {
    at.duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_secs())
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, UNIX_EPOCH};

    use super::unix_secs;

    #[test]
    fn clamps_pre_epoch_to_zero() {
        assert_eq!(unix_secs(UNIX_EPOCH + Duration::from_secs(90)), 90);
        assert_eq!(unix_secs(UNIX_EPOCH - Duration::from_secs(5)), 0);
    }
}
