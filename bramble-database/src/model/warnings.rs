use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarningEntry {
    pub reason: String,
    pub moderator_id: u64,
    pub warned_at: u64,
}

#[derive(Clone, Copy, Debug)]
pub struct WarningRecord {
    pub warn_number: u64,
}
