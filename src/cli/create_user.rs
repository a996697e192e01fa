use crate::errors::InternalError;
use crate::providers::generate_secure_password;
use crate::services::AuthService;
use crate::types::internal::{NewUser, UserProfile, UserStatus};

/// Create an account with a generated password
///
/// Returns the profile and the plaintext password; the caller shows the
/// password once and it is never stored.
pub async fn create_user(
    auth_service: &AuthService,
    name: String,
    email: String,
    status: UserStatus,
) -> Result<(UserProfile, String), InternalError> {
    let password = generate_secure_password();

    let profile = auth_service
        .create_user(NewUser {
            name,
            email,
            password: password.clone(),
            status,
        })
        .await?;

    Ok((profile, password))
}

/// Print the created account; the only place the password is ever shown
pub fn print_created_user(profile: &UserProfile, password: &str) {
    println!("\n=== User created ===\n");
    println!("ID:       {}", profile.id);
    println!("Name:     {}", profile.name);
    println!("Email:    {}", profile.email);
    println!("Status:   {}", profile.status);
    println!("Password: {}", password);
    println!("\nStore this password now; it cannot be shown again.\n");
}
