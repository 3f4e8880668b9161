pub mod policy;

use std::sync::Arc;

use tokio::sync::Mutex;

use bramble_database::ModerationStore;

pub use policy::{Decision, HierarchyRanks, ModerationPolicy, Operation};

pub type Error = anyhow::Error;

/// Name of the role applied by `mute` unless configured otherwise.
pub const DEFAULT_MUTED_ROLE_NAME: &str = "Muted";

#[derive(Clone, Debug)]
pub struct Data {
    pub store: ModerationStore,
    pub policy: ModerationPolicy,
    pub muted_role_name: String,
    /// Serializes muted-role lookup and creation so concurrent mutes create one role.
    pub muted_role_lock: Arc<Mutex<()>>,
}

impl Data {
    pub fn new(store: ModerationStore, policy: ModerationPolicy, muted_role_name: impl Into<String>) -> Self {
        Self {
            store,
            policy,
            muted_role_name: muted_role_name.into(),
            muted_role_lock: Arc::new(Mutex::new(())),
        }
    }
}

pub type Context<'a> = poise::Context<'a, Data, Error>;
