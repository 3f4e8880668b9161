pub mod muted_role;
pub mod warnings;
