// Internal domain types shared by services, providers and stores
pub mod auth;
pub mod item;
pub mod user;

pub use auth::{AccessToken, Claims, Credentials, IssuedToken, RequestUser};
pub use item::{Item, ItemDraft, ItemPatch, ItemStatus, NewItem};
pub use user::{NewUser, User, UserDraft, UserProfile, UserStatus};
