use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Author, AuthorFilter, Post, PostFilter};
use crate::error::RepoError;

/// Generic repository trait defining single-record CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity. `RepoError::NotFound` if it is gone.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. `RepoError::NotFound` if nothing was removed.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Author repository.
#[async_trait]
pub trait AuthorRepository: BaseRepository<Author, Uuid> {
    /// Authors matching `filter`, newest `created_at` first.
    async fn list(&self, filter: &AuthorFilter) -> Result<Vec<Author>, RepoError>;

    /// Authors for the given ids, in no particular order. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Author>, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Posts matching `filter`, newest `created_at` first.
    async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError>;

    /// Number of posts per author id. Authors without posts are absent.
    async fn count_by_authors(&self, author_ids: &[Uuid]) -> Result<HashMap<Uuid, u64>, RepoError>;

    /// Delete every post by `author_id`, returning how many were removed.
    async fn delete_by_author(&self, author_id: Uuid) -> Result<u64, RepoError>;
}
