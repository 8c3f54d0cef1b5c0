//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the caller from a Bearer token.
//! - [`rbac::RequireAuth`] -- Any role.
//! - [`rbac::RequireWriter`] -- `admin` or `operator`.
//! - [`rbac::RequireAdmin`] -- `admin` only.

pub mod auth;
pub mod rbac;
