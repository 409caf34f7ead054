//! Account password stored in `t_user.password` as an Argon2 PHC string.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::config::MIN_PASSWORD_LENGTH;
use crate::errors::{AppError, AppResult};

/// A salted password hash. Plain text never outlives the call that hashes
/// or checks it.
#[derive(Clone)]
pub struct Password(String);

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

impl Password {
    /// Hash a password chosen at registration or password change.
    ///
    /// Shorter than `MIN_PASSWORD_LENGTH` characters is a validation error.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        let length = plain_text.chars().count();
        if length < MIN_PASSWORD_LENGTH as usize {
            return Err(AppError::validation(format!(
                "Password needs {} or more characters, got {}",
                MIN_PASSWORD_LENGTH, length
            )));
        }

        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map(|phc| Self(phc.to_string()))
            .map_err(|e| AppError::internal(format!("argon2 hashing failed: {}", e)))
    }

    /// Wrap the column value of an existing account.
    pub fn from_hash(hash: String) -> Self {
        Self(hash)
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// `true` when `plain_text` matches; an unparseable stored value never does.
    pub fn verify(&self, plain_text: &str) -> bool {
        match PasswordHash::new(&self.0) {
            Ok(parsed) => Argon2::default()
                .verify_password(plain_text.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!(error = %e, "Stored password is not a PHC string");
                false
            }
        }
    }
}
