//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod media;
mod repository;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use media::{HostedMedia, MediaError, MediaHost, MediaUpload};
pub use repository::{AuthorRepository, BaseRepository, PostRepository};
