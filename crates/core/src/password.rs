//! Argon2id password hashing and the seeded administrator credential.
//!
//! All password hashes use the Argon2id variant with a cryptographically random
//! salt generated via [`OsRng`]. The PHC string format is used for storage so
//! that algorithm parameters and salt are embedded in the hash itself.
//!
//! The administrator password is never hard-coded: it is either supplied by
//! the operator or generated here and handed back exactly once.

use std::fmt;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::Rng;

use crate::error::CoreError;

/// Minimum length of an operator-supplied administrator password.
pub const MIN_PASSWORD_LENGTH: usize = 12;

/// Length of a generated administrator password.
pub const GENERATED_PASSWORD_LENGTH: usize = 24;

// ---------------------------------------------------------------------------
// Hashing
// ---------------------------------------------------------------------------

/// Hash a plaintext password using Argon2id with a random salt.
///
/// Returns the PHC-formatted hash string (includes algorithm, params, salt, and hash).
pub fn hash_password(password: &str) -> Result<String, CoreError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CoreError::Credential(format!("Password hashing failed: {e}")))
}

/// Verify a plaintext password against a stored PHC-formatted Argon2id hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, CoreError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| CoreError::Credential(format!("Malformed password hash: {e}")))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(CoreError::Credential(format!(
            "Password verification failed: {e}"
        ))),
    }
}

/// Validate that a password meets minimum strength requirements.
pub fn validate_password_strength(password: &str, min_length: usize) -> Result<(), CoreError> {
    if password.chars().count() < min_length {
        return Err(CoreError::Credential(format!(
            "Password must be at least {min_length} characters long"
        )));
    }
    Ok(())
}

/// Generate a random alphanumeric password.
pub fn generate_password(length: usize) -> String {
    rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

// ---------------------------------------------------------------------------
// Administrator credential
// ---------------------------------------------------------------------------

/// A plaintext password that must be shown to the operator once and never
/// logged. `Debug` is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct GeneratedPassword(String);

impl GeneratedPassword {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for GeneratedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GeneratedPassword(<redacted>)")
    }
}

/// Identity of the administrative account created on a fresh seed.
#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub email: String,
    pub full_name: String,
    /// Operator-supplied secret. `None` means generate one.
    pub password: Option<String>,
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// A credential ready to be stored.
#[derive(Debug, Clone)]
pub struct PreparedAdmin {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
    /// Set when the password was generated; the account must rotate it.
    pub generated_password: Option<GeneratedPassword>,
}

impl AdminCredentials {
    /// Validate or generate the password and hash it.
    pub fn prepare(&self) -> Result<PreparedAdmin, CoreError> {
        if self.username.trim().is_empty() {
            return Err(CoreError::Credential(
                "Administrator username must not be empty".to_string(),
            ));
        }

        let (plaintext, generated_password) = match &self.password {
            Some(supplied) => {
                validate_password_strength(supplied, MIN_PASSWORD_LENGTH)?;
                (supplied.clone(), None)
            }
            None => {
                let generated = generate_password(GENERATED_PASSWORD_LENGTH);
                (generated.clone(), Some(GeneratedPassword(generated)))
            }
        };

        Ok(PreparedAdmin {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            full_name: self.full_name.trim().to_string(),
            password_hash: hash_password(&plaintext)?,
            generated_password,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn admin(password: Option<&str>) -> AdminCredentials {
        AdminCredentials {
            username: "admin".to_string(),
            email: "admin@clinic.example".to_string(),
            full_name: "Clinic Administrator".to_string(),
            password: password.map(str::to_string),
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let password = "correct-horse-battery-staple";
        let hash = hash_password(password).expect("hashing should succeed");

        assert!(
            hash.starts_with("$argon2id$"),
            "expected argon2id PHC prefix"
        );
        assert!(verify_password(password, &hash).unwrap());
    }

    #[test]
    fn test_wrong_password_fails() {
        let hash = hash_password("real-password").expect("hashing should succeed");
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        assert_matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(CoreError::Credential(_))
        );
    }

    #[test]
    fn test_password_too_short() {
        let err = validate_password_strength("short", 12).unwrap_err();
        assert!(err.to_string().contains("at least 12 characters"));
    }

    #[test]
    fn test_generated_password_shape() {
        let password = generate_password(GENERATED_PASSWORD_LENGTH);
        assert_eq!(password.len(), GENERATED_PASSWORD_LENGTH);
        assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn supplied_password_is_hashed_not_echoed() {
        let prepared = admin(Some("a-long-enough-secret")).prepare().unwrap();
        assert!(prepared.generated_password.is_none());
        assert!(verify_password("a-long-enough-secret", &prepared.password_hash).unwrap());
    }

    #[test]
    fn weak_supplied_password_rejected() {
        assert_matches!(admin(Some("weak")).prepare(), Err(CoreError::Credential(_)));
    }

    #[test]
    fn missing_password_is_generated_once() {
        let prepared = admin(None).prepare().unwrap();
        let generated = prepared.generated_password.expect("password should be generated");
        assert!(verify_password(generated.expose(), &prepared.password_hash).unwrap());
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let prepared = admin(None).prepare().unwrap();
        let generated = prepared.generated_password.clone().unwrap();
        assert!(!format!("{prepared:?}").contains(generated.expose()));
        assert!(!format!("{:?}", admin(Some("a-long-enough-secret"))).contains("secret"));
    }

    #[test]
    fn blank_username_rejected() {
        let mut creds = admin(None);
        creds.username = "  ".to_string();
        assert_matches!(creds.prepare(), Err(CoreError::Credential(_)));
    }
}
