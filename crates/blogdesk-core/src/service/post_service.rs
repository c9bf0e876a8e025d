use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::{parse_id, write_error};
use crate::domain::{Author, AuthorSummary, Post, PostInput, PostListQuery, PostView};
use crate::error::DomainError;
use crate::ports::{AuthorRepository, BaseRepository, PostRepository};

const ENTITY: &str = "Post";

/// Post CRUD over the repository ports, expanding the author on every read.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    authors: Arc<dyn AuthorRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, authors: Arc<dyn AuthorRepository>) -> Self {
        Self { posts, authors }
    }

    /// Posts matching the query, newest first, with author name and image.
    ///
    /// A filter value that cannot match anything yields an empty list.
    pub async fn list(&self, query: PostListQuery) -> Result<Vec<PostView>, DomainError> {
        let Some(filter) = query.into_filter() else {
            return Ok(Vec::new());
        };

        let posts = self.posts.list(&filter).await?;

        let mut author_ids: Vec<Uuid> = posts.iter().map(|p| p.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();

        let authors: HashMap<Uuid, Author> = self
            .authors
            .find_by_ids(&author_ids)
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect();

        Ok(posts
            .into_iter()
            .map(|post| PostView {
                author: authors.get(&post.author_id).map(AuthorSummary::brief),
                post,
            })
            .collect())
    }

    /// A single post with author name, image and bio.
    pub async fn get(&self, id: &str) -> Result<PostView, DomainError> {
        let id = parse_id(ENTITY, id)?;
        let post = self.find(id).await?;
        self.expand(post).await
    }

    pub async fn create(&self, input: PostInput) -> Result<PostView, DomainError> {
        let post = Post::new(input, Utc::now())?;
        self.ensure_author(post.author_id).await?;

        let saved = self.posts.insert(post).await?;
        tracing::info!(post_id = %saved.id, slug = %saved.slug, "Post created");

        self.expand(saved).await
    }

    /// Merge-patch update. A new title re-derives the slug and a new status
    /// re-evaluates the publish timestamp.
    pub async fn update(&self, id: &str, patch: PostInput) -> Result<PostView, DomainError> {
        let id = parse_id(ENTITY, id)?;
        let mut post = self.find(id).await?;

        let previous_author = post.author_id;
        post.apply(patch, Utc::now())?;
        if post.author_id != previous_author {
            self.ensure_author(post.author_id).await?;
        }

        let saved = self
            .posts
            .update(post)
            .await
            .map_err(write_error(ENTITY, id))?;
        tracing::info!(post_id = %id, status = %saved.status, "Post updated");

        self.expand(saved).await
    }

    /// Delete a post. Returns the deleted id.
    pub async fn delete(&self, id: &str) -> Result<Uuid, DomainError> {
        let id = parse_id(ENTITY, id)?;
        self.posts
            .delete(id)
            .await
            .map_err(write_error(ENTITY, id))?;

        tracing::info!(post_id = %id, "Post deleted");
        Ok(id)
    }

    async fn find(&self, id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))
    }

    /// The author reference is only checked here, never by storage.
    async fn ensure_author(&self, author_id: Uuid) -> Result<(), DomainError> {
        match self.authors.find_by_id(author_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::validation("Author not found")),
        }
    }

    async fn expand(&self, post: Post) -> Result<PostView, DomainError> {
        let author = self.authors.find_by_id(post.author_id).await?;
        Ok(PostView {
            author: author.as_ref().map(AuthorSummary::detailed),
            post,
        })
    }
}
