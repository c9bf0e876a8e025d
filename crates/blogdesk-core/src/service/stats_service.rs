use std::sync::Arc;

use serde::Serialize;

use crate::domain::{AuthorFilter, PostFilter, PostStatus};
use crate::error::DomainError;
use crate::ports::{AuthorRepository, PostRepository};

/// Counters shown on the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_authors: usize,
    pub active_authors: usize,
    pub total_posts: usize,
    pub published_posts: usize,
    pub draft_posts: usize,
    pub archived_posts: usize,
}

#[derive(Clone)]
pub struct StatsService {
    authors: Arc<dyn AuthorRepository>,
    posts: Arc<dyn PostRepository>,
}

impl StatsService {
    pub fn new(authors: Arc<dyn AuthorRepository>, posts: Arc<dyn PostRepository>) -> Self {
        Self { authors, posts }
    }

    pub async fn dashboard(&self) -> Result<DashboardStats, DomainError> {
        let authors = self.authors.list(&AuthorFilter::default()).await?;
        let posts = self.posts.list(&PostFilter::default()).await?;

        let with_status = |status| posts.iter().filter(|p| p.status == status).count();

        Ok(DashboardStats {
            total_authors: authors.len(),
            active_authors: authors.iter().filter(|a| a.is_active).count(),
            total_posts: posts.len(),
            published_posts: with_status(PostStatus::Published),
            draft_posts: with_status(PostStatus::Draft),
            archived_posts: with_status(PostStatus::Archived),
        })
    }
}
