pub mod impls;
pub mod model;
pub mod store;

pub use store::ModerationStore;
