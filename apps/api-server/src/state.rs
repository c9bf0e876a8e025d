//! Application state - shared across all handlers.

use std::sync::Arc;

use blogdesk_core::ports::{AuthorRepository, MediaHost, PasswordService, PostRepository, TokenService};
use blogdesk_core::service::{AuthorDeletePolicy, AuthorService, PostService, StatsService};
use blogdesk_infra::{
    Argon2PasswordService, CloudinaryMediaHost, InMemoryAuthorRepository, InMemoryPostRepository,
    JwtTokenService, StorageBackend, UnconfiguredMediaHost,
};

#[cfg(feature = "postgres")]
use blogdesk_infra::{PostgresAuthorRepository, PostgresPostRepository};

use crate::config::{AdminAccount, AppConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub authors: AuthorService,
    pub posts: PostService,
    pub stats: StatsService,
    pub media: Arc<dyn MediaHost>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    pub admin: Option<AdminAccount>,
}

/// Repository pair backing the resource services.
pub struct Repositories {
    pub authors: Arc<dyn AuthorRepository>,
    pub posts: Arc<dyn PostRepository>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self {
            authors: Arc::new(InMemoryAuthorRepository::new()),
            posts: Arc::new(InMemoryPostRepository::new()),
        }
    }

    /// Open the configured store. Failing to reach it is fatal.
    pub async fn open(storage: &StorageBackend) -> std::io::Result<Self> {
        match storage {
            StorageBackend::Memory => {
                tracing::warn!("DATABASE_URL=memory. Records are lost on restart.");
                Ok(Self::in_memory())
            }
            #[cfg(feature = "postgres")]
            StorageBackend::Postgres(config) => {
                let conn = blogdesk_infra::database::connect(config)
                    .await
                    .map_err(std::io::Error::other)?;
                Ok(Self {
                    authors: Arc::new(PostgresAuthorRepository::new(conn.clone())),
                    posts: Arc::new(PostgresPostRepository::new(conn)),
                })
            }
            #[cfg(not(feature = "postgres"))]
            StorageBackend::Postgres(_) => Err(std::io::Error::other(
                "DATABASE_URL points at PostgreSQL but the postgres feature is disabled",
            )),
        }
    }
}

impl AppState {
    /// Build the application state from loaded configuration.
    pub async fn new(config: &AppConfig) -> std::io::Result<Self> {
        let repos = Repositories::open(&config.storage).await?;

        let media: Arc<dyn MediaHost> = match &config.cloudinary {
            Some(cloudinary) => Arc::new(CloudinaryMediaHost::new(cloudinary.clone())),
            None => Arc::new(UnconfiguredMediaHost),
        };

        let state = Self::assemble(
            repos,
            config.delete_policy,
            media,
            Arc::new(JwtTokenService::new(config.jwt.clone())),
            config.admin.clone(),
        );

        tracing::info!(policy = ?config.delete_policy, "Application state initialized");
        Ok(state)
    }

    /// Wire services over the given adapters.
    pub fn assemble(
        repos: Repositories,
        delete_policy: AuthorDeletePolicy,
        media: Arc<dyn MediaHost>,
        tokens: Arc<dyn TokenService>,
        admin: Option<AdminAccount>,
    ) -> Self {
        Self {
            authors: AuthorService::new(repos.authors.clone(), repos.posts.clone(), delete_policy),
            posts: PostService::new(repos.posts.clone(), repos.authors.clone()),
            stats: StatsService::new(repos.authors, repos.posts),
            media,
            tokens,
            passwords: Arc::new(Argon2PasswordService::new()),
            admin,
        }
    }
}
