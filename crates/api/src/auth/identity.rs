//! Maps presented credentials to a caller identity.
//!
//! Two credential forms are accepted: HTTP Basic username/password, checked
//! against the [`UserDirectory`], and bearer tokens minted by
//! [`IdentityResolver::issue`].

use assetman_core::error::CoreError;
use assetman_core::roles::Role;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;

use super::token::{generate_access_token, validate_token, TokenConfig};
use super::users::UserDirectory;
use crate::config::AuthConfig;

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub username: String,
    pub role: Role,
}

/// Response body for token-issuing endpoints.
#[derive(Debug, Serialize)]
pub struct IssuedToken {
    pub access_token: String,
    pub token_type: &'static str,
    /// Lifetime in seconds.
    pub expires_in: i64,
}

/// Resolves credentials against the configured accounts and signing key.
pub struct IdentityResolver {
    users: UserDirectory,
    token: TokenConfig,
}

impl IdentityResolver {
    pub fn new(users: UserDirectory, token: TokenConfig) -> Self {
        Self { users, token }
    }

    /// Build the directory from config, hashing plaintext passwords.
    pub fn from_config(config: &AuthConfig) -> Result<Self, argon2::password_hash::Error> {
        let users = UserDirectory::from_entries(&config.users)?;
        Ok(Self::new(users, config.token.clone()))
    }

    pub fn users(&self) -> &UserDirectory {
        &self.users
    }

    /// Resolve a bearer token. Bad signature, expiry, or an unknown role all
    /// yield `Unauthorized`.
    pub fn resolve_bearer(&self, token: &str) -> Result<Identity, CoreError> {
        let invalid = || CoreError::Unauthorized("Invalid or expired token".into());
        let claims = validate_token(token, &self.token).map_err(|_| invalid())?;
        let role = claims.role.parse::<Role>().map_err(|_| invalid())?;
        Ok(Identity {
            username: claims.sub,
            role,
        })
    }

    /// Resolve the value of an `Authorization: Basic ...` header.
    pub fn resolve_basic(&self, header_value: &str) -> Result<Identity, CoreError> {
        let (username, password) = parse_basic(header_value)
            .ok_or_else(|| CoreError::Unauthorized("Missing credentials".into()))?;
        let role = self
            .users
            .authenticate(&username, &password)
            .ok_or_else(|| CoreError::Unauthorized("Invalid credentials".into()))?;
        Ok(Identity { username, role })
    }

    /// The identity handed out by the demo endpoint, if any user exists.
    pub fn demo_identity(&self) -> Option<Identity> {
        self.users.demo_user().map(|(username, role)| Identity {
            username: username.to_string(),
            role,
        })
    }

    /// Mint a bearer token for `identity`.
    pub fn issue(&self, identity: &Identity) -> Result<IssuedToken, CoreError> {
        let access_token =
            generate_access_token(&identity.username, identity.role.as_str(), &self.token)
                .map_err(|e| CoreError::Internal(format!("Failed to sign token: {e}")))?;
        Ok(IssuedToken {
            access_token,
            token_type: "bearer",
            expires_in: self.token.ttl_secs,
        })
    }
}

/// Decode `Basic <base64(username:password)>`. Returns `None` when the scheme
/// is not Basic or the payload is not valid base64 UTF-8 with a colon.
pub fn parse_basic(header_value: &str) -> Option<(String, String)> {
    let (scheme, encoded) = header_value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::config::parse_user_list;

    fn resolver() -> IdentityResolver {
        let users = UserDirectory::from_entries(&parse_user_list("ops:op123:operator")).unwrap();
        IdentityResolver::new(
            users,
            TokenConfig {
                secret: "unit-test-secret".into(),
                ttl_secs: 600,
            },
        )
    }

    fn basic(raw: &str) -> String {
        format!("Basic {}", STANDARD.encode(raw))
    }

    #[test]
    fn parse_basic_splits_on_first_colon() {
        assert_eq!(
            parse_basic(&basic("ops:pa:ss")),
            Some(("ops".to_string(), "pa:ss".to_string()))
        );
        assert_eq!(parse_basic("Bearer abc"), None);
        assert_eq!(parse_basic("Basic !!!"), None);
        assert_eq!(parse_basic(&basic("no-colon")), None);
    }

    #[test]
    fn basic_credentials_resolve_and_token_round_trips() {
        let resolver = resolver();
        let identity = resolver.resolve_basic(&basic("ops:op123")).unwrap();
        assert_eq!(identity.role, Role::Operator);

        let issued = resolver.issue(&identity).unwrap();
        assert_eq!(issued.token_type, "bearer");
        assert_eq!(issued.expires_in, 600);
        assert_eq!(resolver.resolve_bearer(&issued.access_token).unwrap(), identity);
    }

    #[test]
    fn wrong_password_is_unauthorized() {
        assert_matches!(
            resolver().resolve_basic(&basic("ops:wrong")),
            Err(CoreError::Unauthorized(msg)) if msg == "Invalid credentials"
        );
    }

    #[test]
    fn token_with_unknown_role_is_rejected() {
        let resolver = resolver();
        let token = generate_access_token("ops", "superuser", &resolver.token).unwrap();
        assert_matches!(resolver.resolve_bearer(&token), Err(CoreError::Unauthorized(_)));
    }
}
