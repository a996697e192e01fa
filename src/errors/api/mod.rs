// API-facing error types
pub mod auth;
pub mod item;

// Re-exports for convenience
pub use auth::AuthError;
pub use item::ItemApiError;

#[cfg(test)]
mod auth_test;
