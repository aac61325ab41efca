// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Password hashing primitive.
//!
//! One-way hash + verify over Argon2id. The marshaling engine hashes
//! password-marked fields through [`hash_password`] before they ever reach
//! an adapter; the raw value is never retained.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, SaltString};
use argon2::{Argon2, PasswordVerifier};

use crate::error::PasswordError;

/// Hashes a plaintext password into a self-describing PHC string.
///
/// # Errors
///
/// Returns [`PasswordError::HashingFailed`] only if the primitive itself
/// fails; for correct inputs hashing is treated as infallible.
pub fn hash_password(plaintext: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashingFailed {
            message: e.to_string(),
        })?;
    Ok(hash.to_string())
}

/// Verifies a plaintext password against a stored PHC string.
///
/// # Errors
///
/// Returns [`PasswordError::MalformedHash`] if the stored value is not a
/// parseable hash. A parseable hash that does not match yields `Ok(false)`.
pub fn verify_password(plaintext: &str, stored: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored).map_err(|e| PasswordError::MalformedHash {
        message: e.to_string(),
    })?;
    Ok(Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_round_trip() {
        let hash = hash_password("secret123").unwrap();
        assert_ne!(hash, "secret123");
        assert!(verify_password("secret123", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("secret123").unwrap();
        let second = hash_password("secret123").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_malformed_stored_hash() {
        let err = verify_password("secret123", "not-a-hash").unwrap_err();
        assert!(matches!(err, PasswordError::MalformedHash { .. }));
    }
}
