//! Credential verifier: salted one-way hashing and constant-time
//! verification, both delegated to the `argon2` crate.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::rngs::OsRng;

use super::errors::AuthError;

/// Hash a plaintext password with a fresh random salt. Fails only on an
/// internal crypto error, never on valid input.
pub fn hash_password(plaintext: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| AuthError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored hash. The comparison is
/// constant-time with respect to the secret.
pub fn verify_password(plaintext: &str, hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|e| AuthError::Hash(e.to_string()))?;
    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .map_err(|_| AuthError::WrongPassword)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_accepts_matching_password() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(verify_password("correct horse battery staple", &hash).is_ok());
    }

    #[test]
    fn verify_rejects_mismatched_password() {
        let hash = hash_password("secret").unwrap();
        let err = verify_password("wrong", &hash).unwrap_err();
        assert!(matches!(err, AuthError::WrongPassword));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("secret").unwrap();
        let b = hash_password("secret").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("secret", &a).is_ok());
        assert!(verify_password("secret", &b).is_ok());
    }

    #[test]
    fn hash_is_not_plaintext() {
        let hash = hash_password("secret").unwrap();
        assert!(!hash.contains("secret"));
        assert!(hash.starts_with("$argon2"));
    }
}
