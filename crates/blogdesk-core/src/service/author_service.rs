use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::{parse_id, write_error};
use crate::domain::{Author, AuthorInput, AuthorListQuery, AuthorView};
use crate::error::DomainError;
use crate::ports::{AuthorRepository, BaseRepository, PostRepository};

const ENTITY: &str = "Author";

/// What happens to an author's posts when the author is deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthorDeletePolicy {
    /// Delete the author only; posts keep a dangling `author_id`.
    #[default]
    Detach,
    /// Refuse to delete an author that still has posts.
    Restrict,
    /// Delete the author's posts, then the author.
    Cascade,
}

impl FromStr for AuthorDeletePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "detach" => Ok(Self::Detach),
            "restrict" => Ok(Self::Restrict),
            "cascade" => Ok(Self::Cascade),
            other => Err(format!(
                "unknown author delete policy '{other}' (expected detach, restrict or cascade)"
            )),
        }
    }
}

/// Author CRUD over the repository ports.
#[derive(Clone)]
pub struct AuthorService {
    authors: Arc<dyn AuthorRepository>,
    posts: Arc<dyn PostRepository>,
    delete_policy: AuthorDeletePolicy,
}

impl AuthorService {
    pub fn new(
        authors: Arc<dyn AuthorRepository>,
        posts: Arc<dyn PostRepository>,
        delete_policy: AuthorDeletePolicy,
    ) -> Self {
        Self {
            authors,
            posts,
            delete_policy,
        }
    }

    /// Authors matching the query, newest first, each with its post count.
    pub async fn list(&self, query: AuthorListQuery) -> Result<Vec<AuthorView>, DomainError> {
        let authors = self.authors.list(&query.into_filter()).await?;

        let ids: Vec<Uuid> = authors.iter().map(|a| a.id).collect();
        let counts = self.posts.count_by_authors(&ids).await?;

        Ok(authors
            .into_iter()
            .map(|author| AuthorView {
                posts_count: counts.get(&author.id).copied().unwrap_or(0),
                author,
            })
            .collect())
    }

    pub async fn get(&self, id: &str) -> Result<AuthorView, DomainError> {
        let id = parse_id(ENTITY, id)?;
        let author = self.find(id).await?;
        self.with_posts_count(author).await
    }

    pub async fn create(&self, input: AuthorInput) -> Result<AuthorView, DomainError> {
        let author = Author::new(input, Utc::now())?;
        let saved = self.authors.insert(author).await?;

        tracing::info!(author_id = %saved.id, "Author created");

        Ok(AuthorView {
            author: saved,
            posts_count: 0,
        })
    }

    /// Merge-patch update: only the supplied fields change.
    pub async fn update(&self, id: &str, patch: AuthorInput) -> Result<AuthorView, DomainError> {
        let id = parse_id(ENTITY, id)?;
        let mut author = self.find(id).await?;

        author.apply(patch, Utc::now())?;
        let saved = self
            .authors
            .update(author)
            .await
            .map_err(write_error(ENTITY, id))?;

        tracing::info!(author_id = %id, "Author updated");

        self.with_posts_count(saved).await
    }

    /// Delete an author according to the configured policy. Returns the deleted id.
    pub async fn delete(&self, id: &str) -> Result<Uuid, DomainError> {
        let id = parse_id(ENTITY, id)?;
        self.find(id).await?;

        match self.delete_policy {
            AuthorDeletePolicy::Detach => {}
            AuthorDeletePolicy::Restrict => {
                let count = self.posts_count(id).await?;
                if count > 0 {
                    return Err(DomainError::validation(format!(
                        "Author still has {count} post(s); delete or reassign them first"
                    )));
                }
            }
            AuthorDeletePolicy::Cascade => {
                let removed = self.posts.delete_by_author(id).await?;
                tracing::info!(author_id = %id, removed, "Deleted posts of author");
            }
        }

        self.authors
            .delete(id)
            .await
            .map_err(write_error(ENTITY, id))?;

        tracing::info!(author_id = %id, policy = ?self.delete_policy, "Author deleted");
        Ok(id)
    }

    async fn find(&self, id: Uuid) -> Result<Author, DomainError> {
        self.authors
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))
    }

    async fn posts_count(&self, id: Uuid) -> Result<u64, DomainError> {
        let counts = self.posts.count_by_authors(&[id]).await?;
        Ok(counts.get(&id).copied().unwrap_or(0))
    }

    async fn with_posts_count(&self, author: Author) -> Result<AuthorView, DomainError> {
        let posts_count = self.posts_count(author.id).await?;
        Ok(AuthorView {
            author,
            posts_count,
        })
    }
}
