// Stores layer - Data access behind traits
pub mod credential_store;
pub mod item_store;

pub use credential_store::{CredentialStore, DbCredentialStore};
pub use item_store::{DbItemStore, ItemStore, ItemTransaction};
