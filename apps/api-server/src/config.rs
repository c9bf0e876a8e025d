//! Application configuration loaded from environment variables.

use std::env;

use blogdesk_core::service::AuthorDeletePolicy;
use blogdesk_infra::{CloudinaryConfig, JwtConfig, StorageBackend};

/// Configuration problems that stop the server from starting.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// The single admin account allowed to log in.
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub username: String,
    /// Argon2 PHC string.
    pub password_hash: String,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageBackend,
    /// `None` leaves uploads failing with a configuration error.
    pub cloudinary: Option<CloudinaryConfig>,
    pub jwt: JwtConfig,
    /// `None` leaves login failing with a configuration error.
    pub admin: Option<AdminAccount>,
    pub delete_policy: AuthorDeletePolicy,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let storage = StorageBackend::from_url(
            &database_url,
            parse_or("DB_MAX_CONNECTIONS", 100)?,
            parse_or("DB_MIN_CONNECTIONS", 10)?,
        );

        let delete_policy = match env::var("AUTHOR_DELETE_POLICY") {
            Ok(raw) => raw.parse().map_err(|reason| ConfigError::Invalid {
                key: "AUTHOR_DELETE_POLICY",
                reason,
            })?,
            Err(_) => AuthorDeletePolicy::default(),
        };

        let admin = match (env::var("ADMIN_USERNAME"), env::var("ADMIN_PASSWORD_HASH")) {
            (Ok(username), Ok(password_hash)) => Some(AdminAccount {
                username,
                password_hash,
            }),
            _ => {
                tracing::warn!("ADMIN_USERNAME/ADMIN_PASSWORD_HASH not set. Login is disabled.");
                None
            }
        };

        let cloudinary = CloudinaryConfig::from_env();
        if cloudinary.is_none() {
            tracing::warn!("Cloudinary is not configured. Uploads will be rejected.");
        }

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_or("PORT", 8080)?,
            storage,
            cloudinary,
            jwt: JwtConfig::from_env(),
            admin,
            delete_policy,
        })
    }
}

fn parse_or<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}
