//! Domain entities - the records and their write-path rules.

mod author;
mod post;

pub use author::{
    Author, AuthorFilter, AuthorInput, AuthorListQuery, AuthorSummary, AuthorView,
    validate_author,
};
pub use post::{
    Post, PostFilter, PostInput, PostListQuery, PostStatus, PostView, derive_slug,
    maybe_set_published_at, normalize_tags, validate_post,
};
