//! Argon2id password hashing and verification for configured accounts.
//!
//! Hashes use the PHC string format so algorithm parameters and salt travel
//! with the hash.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Prefix of an Argon2id PHC string.
const PHC_PREFIX: &str = "$argon2id$";

/// Hash a plaintext password using Argon2id with a random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted hash.
///
/// Returns `Ok(false)` on mismatch and `Err` only for a malformed hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Whether `value` is already an Argon2id PHC hash rather than plaintext.
pub fn is_phc_hash(value: &str) -> bool {
    value.starts_with(PHC_PREFIX) && PasswordHash::new(value).is_ok()
}

/// Hash `password` unless it is already a PHC hash.
pub fn ensure_hashed(password: &str) -> Result<String, argon2::password_hash::Error> {
    if is_phc_hash(password) {
        Ok(password.to_string())
    } else {
        hash_password(password)
    }
}
