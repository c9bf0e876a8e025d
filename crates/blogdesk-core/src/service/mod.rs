//! Resource services - the list/get/create/update/delete contracts.
//!
//! Each operation is a self-contained cycle against the repositories: no
//! locking, no versioning, and single-record writes only. Concurrent updates
//! to the same record are last-write-wins.

mod author_service;
mod post_service;
mod stats_service;

pub use author_service::{AuthorDeletePolicy, AuthorService};
pub use post_service::PostService;
pub use stats_service::{DashboardStats, StatsService};

use uuid::Uuid;

use crate::error::{DomainError, RepoError};

/// Parse a path id, reporting garbage as a malformed id of `entity_type`.
pub(crate) fn parse_id(entity_type: &'static str, raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw).map_err(|_| DomainError::MalformedId {
        entity_type,
        id: raw.to_string(),
    })
}

/// A write that found nothing to touch means the record is gone.
pub(crate) fn write_error(entity_type: &'static str, id: Uuid) -> impl FnOnce(RepoError) -> DomainError {
    move |err| match err {
        RepoError::NotFound => DomainError::not_found(entity_type, id),
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id("Post", &id.to_string()).unwrap(), id);
        assert!(matches!(
            parse_id("Post", "64b7f0c2e1"),
            Err(DomainError::MalformedId { entity_type: "Post", .. })
        ));
    }

    #[test]
    fn test_malformed_id_message_names_entity_in_lowercase() {
        let err = parse_id("Post", "123").unwrap_err();
        assert_eq!(err.to_string(), "Invalid post ID");

        let err = parse_id("Author", "").unwrap_err();
        assert_eq!(err.to_string(), "Invalid author ID");
    }

    #[test]
    fn test_write_error_maps_not_found() {
        let id = Uuid::new_v4();
        assert!(matches!(
            write_error("Author", id)(RepoError::NotFound),
            DomainError::NotFound { entity_type: "Author", .. }
        ));
        assert!(matches!(
            write_error("Author", id)(RepoError::Query("boom".to_string())),
            DomainError::Internal(_)
        ));
    }
}
