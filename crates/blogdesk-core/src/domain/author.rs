use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Author entity - a byline that posts can reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: Uuid,
    pub name: String,
    pub bio: String,
    pub img: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Author fields as submitted by a client.
///
/// Used both for creation and for merge-patch updates: a `None` field is
/// "not supplied" and leaves the stored value untouched on update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorInput {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub img: Option<String>,
    pub is_active: Option<bool>,
}

impl Author {
    /// Create a new author from validated input, with generated ID and timestamps.
    pub fn new(input: AuthorInput, now: DateTime<Utc>) -> Result<Self, DomainError> {
        validate_author(&input)?;

        Ok(Self {
            id: Uuid::new_v4(),
            name: input.name.unwrap_or_default().trim().to_string(),
            bio: input.bio.map(|b| b.trim().to_string()).unwrap_or_default(),
            img: input.img.unwrap_or_default(),
            is_active: input.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        })
    }

    /// Merge the supplied fields into this author.
    ///
    /// Nothing is modified when the merged record would be invalid.
    pub fn apply(&mut self, patch: AuthorInput, now: DateTime<Utc>) -> Result<(), DomainError> {
        let mut next = self.clone();

        if let Some(name) = patch.name {
            next.name = name.trim().to_string();
        }
        if let Some(bio) = patch.bio {
            next.bio = bio.trim().to_string();
        }
        if let Some(img) = patch.img {
            next.img = img;
        }
        if let Some(is_active) = patch.is_active {
            next.is_active = is_active;
        }

        if next.name.is_empty() {
            return Err(DomainError::validation("Author name is required"));
        }

        next.updated_at = now;
        *self = next;
        Ok(())
    }
}

/// Reject author input without a usable name.
pub fn validate_author(input: &AuthorInput) -> Result<(), DomainError> {
    match input.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => Ok(()),
        _ => Err(DomainError::validation("Author name is required")),
    }
}

/// Exact-match filter for listing authors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthorFilter {
    pub is_active: Option<bool>,
}

impl AuthorFilter {
    pub fn matches(&self, author: &Author) -> bool {
        self.is_active.is_none_or(|active| author.is_active == active)
    }
}

/// Raw `?isActive=` query parameter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorListQuery {
    pub is_active: Option<String>,
}

impl AuthorListQuery {
    /// Any supplied value other than `true` selects inactive authors.
    pub fn into_filter(self) -> AuthorFilter {
        AuthorFilter {
            is_active: self.is_active.map(|v| v == "true"),
        }
    }
}

/// Author as returned to callers, with the derived post count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorView {
    #[serde(flatten)]
    pub author: Author,
    pub posts_count: u64,
}

/// Subset of an author embedded into a post on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorSummary {
    pub id: Uuid,
    pub name: String,
    pub img: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl AuthorSummary {
    /// Name and image only, as shown in post listings.
    pub fn brief(author: &Author) -> Self {
        Self {
            id: author.id,
            name: author.name.clone(),
            img: author.img.clone(),
            bio: None,
        }
    }

    /// Name, image and bio, as shown on a single post.
    pub fn detailed(author: &Author) -> Self {
        Self {
            bio: Some(author.bio.clone()),
            ..Self::brief(author)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str) -> AuthorInput {
        AuthorInput {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_author_defaults() {
        let author = Author::new(input("Jane Doe"), Utc::now()).unwrap();

        assert_eq!(author.name, "Jane Doe");
        assert_eq!(author.bio, "");
        assert_eq!(author.img, "");
        assert!(author.is_active);
        assert_eq!(author.created_at, author.updated_at);
    }

    #[test]
    fn test_new_author_trims_name() {
        let author = Author::new(input("  Jane  "), Utc::now()).unwrap();
        assert_eq!(author.name, "Jane");
    }

    #[test]
    fn test_missing_or_blank_name_rejected() {
        assert!(matches!(
            Author::new(AuthorInput::default(), Utc::now()),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            Author::new(input("   "), Utc::now()),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_apply_only_touches_supplied_fields() {
        let mut author = Author::new(
            AuthorInput {
                name: Some("Jane".to_string()),
                img: Some("https://img/jane.png".to_string()),
                is_active: Some(false),
                ..Default::default()
            },
            Utc::now(),
        )
        .unwrap();
        let before = author.clone();

        author
            .apply(
                AuthorInput {
                    bio: Some("x".to_string()),
                    ..Default::default()
                },
                Utc::now(),
            )
            .unwrap();

        assert_eq!(author.bio, "x");
        assert_eq!(author.name, before.name);
        assert_eq!(author.img, before.img);
        assert_eq!(author.is_active, before.is_active);
        assert_eq!(author.created_at, before.created_at);
    }

    #[test]
    fn test_apply_rejects_empty_name_without_mutation() {
        let mut author = Author::new(input("Jane"), Utc::now()).unwrap();
        let before = author.clone();

        let result = author.apply(
            AuthorInput {
                name: Some(String::new()),
                bio: Some("changed".to_string()),
                ..Default::default()
            },
            Utc::now(),
        );

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(author, before);
    }

    #[test]
    fn test_list_query_parsing() {
        let q = |v: Option<&str>| AuthorListQuery {
            is_active: v.map(String::from),
        };

        assert_eq!(q(None).into_filter().is_active, None);
        assert_eq!(q(Some("true")).into_filter().is_active, Some(true));
        assert_eq!(q(Some("false")).into_filter().is_active, Some(false));
        assert_eq!(q(Some("yes")).into_filter().is_active, Some(false));
    }

    #[test]
    fn test_view_serializes_camel_case() {
        let author = Author::new(input("Jane"), Utc::now()).unwrap();
        let json = serde_json::to_value(AuthorView {
            author,
            posts_count: 3,
        })
        .unwrap();

        assert_eq!(json["isActive"], true);
        assert_eq!(json["postsCount"], 3);
        assert!(json.get("createdAt").is_some());
    }
}
