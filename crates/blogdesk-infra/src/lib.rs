//! # Blogdesk Infrastructure
//!
//! Concrete implementations of the ports defined in `blogdesk-core`.
//! This crate contains the database, in-memory, auth and media host adapters.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory only
//! - `postgres` - PostgreSQL database support via SeaORM
//! - `auth` - JWT + Argon2 authentication
//! - `media` - Cloudinary uploads via reqwest

pub mod database;
pub mod media;
pub mod memory;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use database::{DatabaseConfig, StorageBackend};
pub use media::UnconfiguredMediaHost;
pub use memory::{InMemoryAuthorRepository, InMemoryPostRepository};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};

#[cfg(feature = "media")]
pub use media::{CloudinaryConfig, CloudinaryMediaHost};

#[cfg(feature = "postgres")]
pub use database::{PostgresAuthorRepository, PostgresPostRepository};
