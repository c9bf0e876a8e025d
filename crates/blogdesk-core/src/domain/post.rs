use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::author::AuthorSummary;
use crate::error::DomainError;

/// Publication state of a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
            PostStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            "archived" => Ok(PostStatus::Archived),
            other => Err(DomainError::validation(format!(
                "Invalid status '{other}', expected draft, published or archived"
            ))),
        }
    }
}

/// Post entity - a blog post or article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub metadesc: String,
    pub slug: String,
    pub content: String,
    pub img: String,
    pub tags: Vec<String>,
    pub author_id: Uuid,
    pub status: PostStatus,
    pub view_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Post fields as submitted by a client, for creation and merge-patch updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostInput {
    pub title: Option<String>,
    pub metadesc: Option<String>,
    pub content: Option<String>,
    pub img: Option<String>,
    pub tags: Option<Vec<String>>,
    #[serde(alias = "author_id")]
    pub author_id: Option<String>,
    pub status: Option<PostStatus>,
}

impl Post {
    /// Create a new post, deriving the slug and publish timestamp.
    pub fn new(input: PostInput, now: DateTime<Utc>) -> Result<Self, DomainError> {
        validate_post(&input)?;

        let title = input.title.unwrap_or_default().trim().to_string();
        let author_id = parse_author_id(input.author_id.as_deref().unwrap_or_default())?;
        let status = input.status.unwrap_or_default();

        Ok(Self {
            id: Uuid::new_v4(),
            slug: derive_slug(&title),
            title,
            metadesc: input.metadesc.map(|m| m.trim().to_string()).unwrap_or_default(),
            content: input.content.unwrap_or_default(),
            img: input.img.unwrap_or_default(),
            tags: normalize_tags(input.tags.unwrap_or_default()),
            author_id,
            status,
            view_count: 0,
            published_at: maybe_set_published_at(status, None, now),
            created_at: now,
            updated_at: now,
        })
    }

    /// Merge the supplied fields into this post.
    ///
    /// The slug follows a supplied title and the publish timestamp follows a
    /// supplied status. Nothing is modified when the merged record is invalid.
    pub fn apply(&mut self, patch: PostInput, now: DateTime<Utc>) -> Result<(), DomainError> {
        let mut next = self.clone();

        if let Some(title) = patch.title {
            next.title = title.trim().to_string();
            next.slug = derive_slug(&next.title);
        }
        if let Some(metadesc) = patch.metadesc {
            next.metadesc = metadesc.trim().to_string();
        }
        if let Some(content) = patch.content {
            next.content = content;
        }
        if let Some(img) = patch.img {
            next.img = img;
        }
        if let Some(tags) = patch.tags {
            next.tags = normalize_tags(tags);
        }
        if let Some(author_id) = patch.author_id {
            next.author_id = parse_author_id(&author_id)?;
        }
        if let Some(status) = patch.status {
            next.status = status;
            next.published_at = maybe_set_published_at(status, next.published_at, now);
        }

        if next.title.is_empty() || next.content.trim().is_empty() {
            return Err(DomainError::validation(
                "Title, content, and author are required",
            ));
        }

        next.updated_at = now;
        *self = next;
        Ok(())
    }
}

/// Reject post input missing a title, content or author reference.
pub fn validate_post(input: &PostInput) -> Result<(), DomainError> {
    let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());

    if present(&input.title) && present(&input.content) && present(&input.author_id) {
        Ok(())
    } else {
        Err(DomainError::validation(
            "Title, content, and author are required",
        ))
    }
}

fn parse_author_id(raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw.trim()).map_err(|_| DomainError::validation("Invalid author ID"))
}

/// Turn a title into a URL-safe slug.
///
/// Lowercases, strips everything except ASCII alphanumerics and whitespace,
/// then joins the remaining words with single hyphens.
pub fn derive_slug(title: &str) -> String {
    let kept: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();

    kept.split_whitespace().collect::<Vec<_>>().join("-")
}

/// Publish timestamp after a status is set.
///
/// Entering `published` stamps `now` only when no timestamp exists yet; an
/// existing timestamp always survives, whatever the previous status was.
pub fn maybe_set_published_at(
    new_status: PostStatus,
    existing: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    match (new_status, existing) {
        (PostStatus::Published, None) => Some(now),
        (_, existing) => existing,
    }
}

/// Trim and lowercase tags, dropping blanks. Order and duplicates are kept.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Exact-match filter for listing posts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub status: Option<PostStatus>,
    pub author_id: Option<Uuid>,
}

impl PostFilter {
    pub fn matches(&self, post: &Post) -> bool {
        self.status.is_none_or(|s| post.status == s)
            && self.author_id.is_none_or(|a| post.author_id == a)
    }
}

/// Raw `?status=&author_id=` query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostListQuery {
    pub status: Option<String>,
    #[serde(alias = "authorId")]
    pub author_id: Option<String>,
}

impl PostListQuery {
    /// `None` when a supplied value cannot match any post.
    pub fn into_filter(self) -> Option<PostFilter> {
        let status = match self.status.as_deref().filter(|s| !s.is_empty()) {
            Some(raw) => Some(raw.parse().ok()?),
            None => None,
        };
        let author_id = match self.author_id.as_deref().filter(|s| !s.is_empty()) {
            Some(raw) => Some(Uuid::parse_str(raw).ok()?),
            None => None,
        };

        Some(PostFilter { status, author_id })
    }
}

/// Post as returned to callers, with its author expanded.
///
/// `author` is `None` when the reference dangles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostView {
    #[serde(flatten)]
    pub post: Post,
    pub author: Option<AuthorSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn input() -> PostInput {
        PostInput {
            title: Some("My First Post".to_string()),
            content: Some("<p>hi</p>".to_string()),
            author_id: Some(Uuid::new_v4().to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_derive_slug() {
        assert_eq!(derive_slug("Hello, World! 2024"), "hello-world-2024");
        assert_eq!(derive_slug("  --Trim Me--  "), "trim-me");
        assert_eq!(derive_slug("My First Post"), "my-first-post");
        assert_eq!(derive_slug("a - b\t\tc"), "a-b-c");
        assert_eq!(derive_slug("Café crème"), "caf-crme");
        assert_eq!(derive_slug("!!!"), "");
    }

    #[test]
    fn test_new_post_defaults() {
        let post = Post::new(input(), Utc::now()).unwrap();

        assert_eq!(post.slug, "my-first-post");
        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.published_at, None);
        assert_eq!(post.view_count, 0);
        assert!(post.tags.is_empty());
        assert_eq!(post.metadesc, "");
    }

    #[test]
    fn test_new_published_post_is_stamped() {
        let now = Utc::now();
        let post = Post::new(
            PostInput {
                status: Some(PostStatus::Published),
                ..input()
            },
            now,
        )
        .unwrap();

        assert_eq!(post.published_at, Some(now));
    }

    #[test]
    fn test_validate_post_requires_fields() {
        for missing in ["title", "content", "author"] {
            let mut i = input();
            match missing {
                "title" => i.title = Some("  ".to_string()),
                "content" => i.content = None,
                _ => i.author_id = Some(String::new()),
            }
            assert!(matches!(validate_post(&i), Err(DomainError::Validation(_))));
        }
        assert!(validate_post(&input()).is_ok());
    }

    #[test]
    fn test_malformed_author_id_rejected() {
        let result = Post::new(
            PostInput {
                author_id: Some("not-a-uuid".to_string()),
                ..input()
            },
            Utc::now(),
        );
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_published_at_set_once() {
        let first = Utc::now();
        let later = first + TimeDelta::hours(1);

        assert_eq!(
            maybe_set_published_at(PostStatus::Published, None, first),
            Some(first)
        );
        assert_eq!(
            maybe_set_published_at(PostStatus::Published, Some(first), later),
            Some(first)
        );
        assert_eq!(maybe_set_published_at(PostStatus::Draft, None, later), None);
        assert_eq!(
            maybe_set_published_at(PostStatus::Archived, Some(first), later),
            Some(first)
        );
    }

    #[test]
    fn test_apply_republish_keeps_timestamp() {
        let t0 = Utc::now();
        let mut post = Post::new(input(), t0).unwrap();
        let publish = |status| PostInput {
            status: Some(status),
            ..Default::default()
        };

        post.apply(publish(PostStatus::Published), t0 + TimeDelta::seconds(1))
            .unwrap();
        let stamped = post.published_at;
        assert!(stamped.is_some());

        post.apply(publish(PostStatus::Archived), t0 + TimeDelta::seconds(2))
            .unwrap();
        post.apply(publish(PostStatus::Published), t0 + TimeDelta::seconds(3))
            .unwrap();

        assert_eq!(post.published_at, stamped);
        assert_eq!(post.status, PostStatus::Published);
    }

    #[test]
    fn test_apply_title_rederives_slug() {
        let mut post = Post::new(input(), Utc::now()).unwrap();
        post.apply(
            PostInput {
                title: Some("Second Thoughts!".to_string()),
                ..Default::default()
            },
            Utc::now(),
        )
        .unwrap();

        assert_eq!(post.title, "Second Thoughts!");
        assert_eq!(post.slug, "second-thoughts");
    }

    #[test]
    fn test_apply_rejects_empty_content_without_mutation() {
        let mut post = Post::new(input(), Utc::now()).unwrap();
        let before = post.clone();

        let result = post.apply(
            PostInput {
                content: Some(String::new()),
                title: Some("Changed".to_string()),
                ..Default::default()
            },
            Utc::now(),
        );

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(post, before);
    }

    #[test]
    fn test_tags_normalized_not_deduplicated() {
        let tags = normalize_tags(vec![
            " Rust ".to_string(),
            "rust".to_string(),
            "".to_string(),
            "Web".to_string(),
        ]);
        assert_eq!(tags, vec!["rust", "rust", "web"]);
    }

    #[test]
    fn test_list_query_into_filter() {
        let author = Uuid::new_v4();
        let filter = PostListQuery {
            status: Some("published".to_string()),
            author_id: Some(author.to_string()),
        }
        .into_filter()
        .unwrap();
        assert_eq!(filter.status, Some(PostStatus::Published));
        assert_eq!(filter.author_id, Some(author));

        let empty = PostListQuery {
            status: Some(String::new()),
            author_id: None,
        }
        .into_filter()
        .unwrap();
        assert_eq!(empty, PostFilter::default());

        assert!(
            PostListQuery {
                status: Some("bogus".to_string()),
                author_id: None,
            }
            .into_filter()
            .is_none()
        );
        assert!(
            PostListQuery {
                status: None,
                author_id: Some("123".to_string()),
            }
            .into_filter()
            .is_none()
        );
    }

    #[test]
    fn test_input_accepts_snake_case_author_id() {
        let id = Uuid::new_v4();
        let parsed: PostInput = serde_json::from_value(serde_json::json!({
            "title": "t",
            "content": "c",
            "author_id": id.to_string(),
            "status": "archived"
        }))
        .unwrap();

        assert_eq!(parsed.author_id, Some(id.to_string()));
        assert_eq!(parsed.status, Some(PostStatus::Archived));
    }
}
