//! Authentication service - credential parsing, password hashing and
//! signup validation.
//!
//! Both the `/login` handler and the auth middleware authenticate through
//! [`authenticate`], so they accept and reject exactly the same requests.
//!
//! # Credential Header
//!
//! ```text
//! Authorization: Basic base64("email:password")
//! ```
//!
//! Passwords are stored as salted Argon2id hashes; verification compares
//! digests in constant time.

use std::sync::LazyLock;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use base64::{Engine, engine::general_purpose::STANDARD};

use crate::{error::AppError, models::user::User, store::DocumentStore};

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Returned for a missing or undecodable `Authorization` header.
pub const MALFORMED_HEADER: &str = "Authorization header missing or invalid";

/// Returned for an unknown email or a wrong password alike.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Hash checked when the email is unknown, so that path pays the same
/// Argon2 cost as a wrong password.
static UNKNOWN_USER_HASH: LazyLock<String> =
    LazyLock::new(|| hash_password("no user has this password").unwrap_or_default());

/// Email and password decoded from a credential header.
#[derive(Debug, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Decode an `Authorization` header value.
///
/// The payload is split at the first `:`, so passwords may contain colons.
///
/// # Errors
///
/// `AppError::Unauthorized` if the scheme is not `Basic`, the payload is not
/// valid base64 or UTF-8, or no `:` separator is present.
pub fn parse_basic_credentials(header: &str) -> Result<Credentials, AppError> {
    let malformed = || AppError::Unauthorized(MALFORMED_HEADER);

    let encoded = header.strip_prefix("Basic ").ok_or_else(malformed)?;
    let decoded = STANDARD.decode(encoded.trim()).map_err(|_| malformed())?;
    let decoded = String::from_utf8(decoded).map_err(|_| malformed())?;
    let (email, password) = decoded.split_once(':').ok_or_else(malformed)?;

    Ok(Credentials {
        email: email.to_string(),
        password: password.to_string(),
    })
}

/// Resolve a credential header to a stored user.
///
/// # Errors
///
/// - `AppError::Unauthorized` if the header is absent or malformed, the
///   email is unknown, or the password does not match
/// - `AppError::Database` if the lookup fails
pub async fn authenticate(
    store: &dyn DocumentStore,
    header: Option<&str>,
) -> Result<User, AppError> {
    let header = header.ok_or(AppError::Unauthorized(MALFORMED_HEADER))?;
    let credentials = parse_basic_credentials(header)?;

    let user = store.find_user_by_email(&credentials.email).await?;
    let password_matches = verify_password(&credentials.password, hash_to_check(user.as_ref()));

    match user {
        Some(user) if password_matches => Ok(user),
        Some(user) => {
            tracing::debug!(user_id = %user.id, "authentication failed: wrong password");
            Err(AppError::Unauthorized(INVALID_CREDENTIALS))
        }
        None => {
            tracing::debug!(email = %credentials.email, "authentication failed: unknown email");
            Err(AppError::Unauthorized(INVALID_CREDENTIALS))
        }
    }
}

/// The stored hash of `user`, or a real Argon2id hash nobody can match when
/// there is no such user.
fn hash_to_check(user: Option<&User>) -> &str {
    user.map_or(UNKNOWN_USER_HASH.as_str(), |user| user.password_hash.as_str())
}

/// Check the email shape. Only an `@` is required.
pub fn validate_email(email: &str) -> Result<(), AppError> {
    if !email.contains('@') {
        return Err(AppError::Validation("Invalid email".to_string()));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}

/// Validate signup fields in order: email, password length, confirmation.
pub fn validate_signup(
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), AppError> {
    validate_email(email)?;
    validate_password(password)?;
    if password != confirm_password {
        return Err(AppError::Validation("Passwords do not match".to_string()));
    }
    Ok(())
}

/// Hash a password using Argon2id with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AppError::PasswordHash)
}

/// Verify a password against a stored hash. Unparseable hashes never match.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
