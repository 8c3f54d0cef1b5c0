use std::str::FromStr;

use assetman_core::roles::Role;

use crate::auth::token::TokenConfig;

/// Built-in user list used when `APP_USERS` is unset.
pub const DEFAULT_USERS: &str = "admin:admin123:admin;operator:op123:operator;viewer:view123:viewer";

/// Default bearer token lifetime: 12 hours.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 12 * 60 * 60;

/// Startup configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set in the environment")]
    Missing(&'static str),

    #[error("{name} must be a valid {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Pool size (default: `20`).
    pub db_max_connections: u32,
    pub auth: AuthConfig,
}

/// Credential and token settings.
#[derive(Clone)]
pub struct AuthConfig {
    pub token: TokenConfig,
    /// Configured accounts in declaration order.
    pub users: Vec<UserEntry>,
    /// Whether `GET /auth/demo-token` is served.
    pub demo_mode: bool,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_ttl_secs", &self.token.ttl_secs)
            .field("users", &self.users.len())
            .field("demo_mode", &self.demo_mode)
            .finish()
    }
}

/// One `username:password:role` entry from `APP_USERS`.
#[derive(Clone, PartialEq, Eq)]
pub struct UserEntry {
    pub username: String,
    /// Plaintext, or an Argon2 PHC string.
    pub password: String,
    pub role: Role,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `DATABASE_URL`         | **required**               |
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `DB_MAX_CONNECTIONS`   | `20`                       |
    /// | `APP_SECRET_KEY`       | **required**               |
    /// | `APP_TOKEN_TTL_SECS`   | `43200`                    |
    /// | `APP_USERS`            | [`DEFAULT_USERS`]          |
    /// | `APP_DEMO`             | `0`                        |
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = required("DATABASE_URL")?;
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = parsed("PORT", 3000, "u16")?;
        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );
        let request_timeout_secs = parsed("REQUEST_TIMEOUT_SECS", 30, "u64")?;
        let db_max_connections = parsed(
            "DB_MAX_CONNECTIONS",
            assetman_db::DEFAULT_MAX_CONNECTIONS,
            "u32",
        )?;

        let token = TokenConfig {
            secret: required("APP_SECRET_KEY")?,
            ttl_secs: parsed("APP_TOKEN_TTL_SECS", DEFAULT_TOKEN_TTL_SECS, "i64")?,
        };
        let users = parse_user_list(
            &std::env::var("APP_USERS").unwrap_or_else(|_| DEFAULT_USERS.into()),
        );
        let demo_mode = std::env::var("APP_DEMO").is_ok_and(|v| v.trim() == "1");

        Ok(Self {
            database_url,
            host,
            port,
            cors_origins,
            request_timeout_secs,
            db_max_connections,
            auth: AuthConfig {
                token,
                users,
                demo_mode,
            },
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn parsed<T: FromStr>(
    name: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            expected,
            value,
        }),
        Err(_) => Ok(default),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parse a `username:password:role` list separated by semicolons.
///
/// Malformed entries and unknown roles are skipped with a warning. The
/// password may itself contain `:` (PHC strings do), so the role is taken
/// from the last segment.
pub fn parse_user_list(raw: &str) -> Vec<UserEntry> {
    let mut users = Vec::new();
    for entry in raw.split(';').map(str::trim).filter(|e| !e.is_empty()) {
        let Some((username, rest)) = entry.split_once(':') else {
            tracing::warn!("Skipping malformed APP_USERS entry");
            continue;
        };
        let Some((password, role)) = rest.rsplit_once(':') else {
            tracing::warn!(username, "Skipping malformed APP_USERS entry");
            continue;
        };
        if username.is_empty() || password.is_empty() {
            tracing::warn!(username, "Skipping APP_USERS entry with empty field");
            continue;
        }
        match role.trim().parse::<Role>() {
            Ok(role) => users.push(UserEntry {
                username: username.trim().to_string(),
                password: password.to_string(),
                role,
            }),
            Err(e) => tracing::warn!(username, error = %e, "Skipping APP_USERS entry"),
        }
    }
    users
}
