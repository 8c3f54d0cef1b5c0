//! Authentication primitives.
//!
//! - [`identity`] -- resolves Basic credentials and bearer tokens to an [`identity::Identity`].
//! - [`users`] -- the configured account directory.
//! - [`password`] -- Argon2id hashing and verification.
//! - [`token`] -- HS256 bearer token generation and validation.

pub mod identity;
pub mod password;
pub mod token;
pub mod users;
