// Providers layer - Work performers
//
// Hashing and token signing sit behind traits so services receive them as
// constructor-supplied dependencies.

pub mod crypto_provider;
pub mod token_provider;

pub use crypto_provider::{generate_secure_password, CryptoProvider, HashParams, PasswordHasher};
pub use token_provider::{TokenIssuer, TokenProvider, TokenVerifier};
