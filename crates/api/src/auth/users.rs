//! In-memory directory of the configured accounts.

use assetman_core::roles::Role;

use super::password::{ensure_hashed, verify_password};
use crate::config::UserEntry;

#[derive(Debug, Clone)]
struct StoredUser {
    username: String,
    password_hash: String,
    role: Role,
}

/// Accounts known to the service, built once from configuration.
///
/// Passwords are held only as Argon2id hashes. Declaration order is kept so
/// the demo account choice is stable.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: Vec<StoredUser>,
}

impl UserDirectory {
    /// Hash every configured password. Later duplicates of a username are
    /// ignored.
    pub fn from_entries(entries: &[UserEntry]) -> Result<Self, argon2::password_hash::Error> {
        let mut users: Vec<StoredUser> = Vec::with_capacity(entries.len());
        for entry in entries {
            if users.iter().any(|u| u.username == entry.username) {
                tracing::warn!(username = %entry.username, "Duplicate user entry ignored");
                continue;
            }
            users.push(StoredUser {
                username: entry.username.clone(),
                password_hash: ensure_hashed(&entry.password)?,
                role: entry.role,
            });
        }
        Ok(Self { users })
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Check a username/password pair. Returns the role on success.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<Role> {
        let user = self.find(username)?;
        match verify_password(password, &user.password_hash) {
            Ok(true) => Some(user.role),
            Ok(false) => None,
            Err(e) => {
                tracing::error!(username, error = %e, "Stored password hash is unreadable");
                None
            }
        }
    }

    /// The account used for demo tokens: the first viewer, else the first
    /// configured user.
    pub fn demo_user(&self) -> Option<(&str, Role)> {
        self.users
            .iter()
            .find(|u| u.role == Role::Viewer)
            .or_else(|| self.users.first())
            .map(|u| (u.username.as_str(), u.role))
    }

    fn find(&self, username: &str) -> Option<&StoredUser> {
        self.users.iter().find(|u| u.username == username)
    }
}
