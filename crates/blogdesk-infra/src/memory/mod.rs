//! In-memory repositories - used for local development (`DATABASE_URL=memory`)
//! and tests.
//!
//! Rows live in a `Vec` behind an async `RwLock`; writers are serialized and
//! readers see the last completed write. Note: data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use blogdesk_core::domain::{Author, AuthorFilter, Post, PostFilter};
use blogdesk_core::error::RepoError;
use blogdesk_core::ports::{AuthorRepository, BaseRepository, PostRepository};

/// A row the in-memory store can key and order.
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> Uuid;
    fn created_at(&self) -> DateTime<Utc>;
}

impl Record for Author {
    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Record for Post {
    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Generic in-memory repository, kept in insertion order.
pub struct InMemoryRepository<T> {
    rows: RwLock<Vec<T>>,
}

pub type InMemoryAuthorRepository = InMemoryRepository<Author>;
pub type InMemoryPostRepository = InMemoryRepository<Post>;

impl<T: Record> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }

    /// Matching rows, newest `created_at` first. Rows created in the same
    /// instant come out newest-inserted first.
    async fn newest_first(&self, keep: impl Fn(&T) -> bool) -> Vec<T> {
        let rows = self.rows.read().await;
        let mut out: Vec<T> = rows.iter().rev().filter(|r| keep(*r)).cloned().collect();
        out.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        out
    }
}

impl<T: Record> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> BaseRepository<T, Uuid> for InMemoryRepository<T> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|r| r.id() == id).cloned())
    }

    async fn insert(&self, entity: T) -> Result<T, RepoError> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|r| r.id() == entity.id()) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }

        rows.push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: T) -> Result<T, RepoError> {
        let mut rows = self.rows.write().await;
        let slot = rows
            .iter_mut()
            .find(|r| r.id() == entity.id())
            .ok_or(RepoError::NotFound)?;

        *slot = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|r| r.id() != id);

        if rows.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl AuthorRepository for InMemoryAuthorRepository {
    async fn list(&self, filter: &AuthorFilter) -> Result<Vec<Author>, RepoError> {
        Ok(self.newest_first(|a| filter.matches(a)).await)
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Author>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().filter(|a| ids.contains(&a.id)).cloned().collect())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError> {
        Ok(self.newest_first(|p| filter.matches(p)).await)
    }

    async fn count_by_authors(&self, author_ids: &[Uuid]) -> Result<HashMap<Uuid, u64>, RepoError> {
        let rows = self.rows.read().await;
        let mut counts = HashMap::new();
        for post in rows.iter().filter(|p| author_ids.contains(&p.author_id)) {
            *counts.entry(post.author_id).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn delete_by_author(&self, author_id: Uuid) -> Result<u64, RepoError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|p| p.author_id != author_id);
        Ok((before - rows.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blogdesk_core::domain::{AuthorInput, PostInput, PostStatus};
    use chrono::TimeDelta;

    fn author_at(name: &str, created_at: DateTime<Utc>) -> Author {
        Author::new(
            AuthorInput {
                name: Some(name.to_string()),
                ..Default::default()
            },
            created_at,
        )
        .unwrap()
    }

    fn post_by(author_id: Uuid, status: PostStatus) -> Post {
        Post::new(
            PostInput {
                title: Some("Title".to_string()),
                content: Some("Body".to_string()),
                author_id: Some(author_id.to_string()),
                status: Some(status),
                ..Default::default()
            },
            Utc::now(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = InMemoryAuthorRepository::new();
        let author = author_at("Jane", Utc::now());

        repo.insert(author.clone()).await.unwrap();

        assert_eq!(repo.find_by_id(author.id).await.unwrap(), Some(author));
        assert_eq!(repo.find_by_id(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_insert_rejected() {
        let repo = InMemoryAuthorRepository::new();
        let author = author_at("Jane", Utc::now());

        repo.insert(author.clone()).await.unwrap();
        assert!(matches!(
            repo.insert(author).await,
            Err(RepoError::Constraint(_))
        ));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let repo = InMemoryAuthorRepository::new();
        let author = author_at("Jane", Utc::now());

        assert!(matches!(
            repo.update(author.clone()).await,
            Err(RepoError::NotFound)
        ));
        assert!(matches!(
            repo.delete(author.id).await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let repo = InMemoryAuthorRepository::new();
        let t0 = Utc::now();

        repo.insert(author_at("middle", t0)).await.unwrap();
        repo.insert(author_at("oldest", t0 - TimeDelta::hours(1)))
            .await
            .unwrap();
        repo.insert(author_at("newest", t0 + TimeDelta::hours(1)))
            .await
            .unwrap();

        let names: Vec<String> = repo
            .list(&AuthorFilter::default())
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["newest", "middle", "oldest"]);
    }

    #[tokio::test]
    async fn test_post_counts_and_cascade_delete() {
        let repo = InMemoryPostRepository::new();
        let jane = Uuid::new_v4();
        let john = Uuid::new_v4();

        repo.insert(post_by(jane, PostStatus::Draft)).await.unwrap();
        repo.insert(post_by(jane, PostStatus::Published)).await.unwrap();
        repo.insert(post_by(john, PostStatus::Draft)).await.unwrap();

        let counts = repo.count_by_authors(&[jane, john]).await.unwrap();
        assert_eq!(counts.get(&jane), Some(&2));
        assert_eq!(counts.get(&john), Some(&1));

        let published = repo
            .list(&PostFilter {
                status: Some(PostStatus::Published),
                author_id: Some(jane),
            })
            .await
            .unwrap();
        assert_eq!(published.len(), 1);

        assert_eq!(repo.delete_by_author(jane).await.unwrap(), 2);
        assert_eq!(repo.list(&PostFilter::default()).await.unwrap().len(), 1);
    }
}
