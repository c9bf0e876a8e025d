//! Media hosting port - where uploaded images end up.

use async_trait::async_trait;

/// A file received from a client, forwarded as-is.
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub bytes: Vec<u8>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
}

/// Where the host stored an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedMedia {
    /// Public URL of the stored object.
    pub url: String,
    /// Opaque identifier assigned by the host.
    pub public_id: String,
}

/// External image host. Implementations make exactly one attempt per call.
#[async_trait]
pub trait MediaHost: Send + Sync {
    async fn upload(&self, file: MediaUpload) -> Result<HostedMedia, MediaError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("{0}")]
    NotConfigured(String),

    #[error("{0}")]
    Rejected(String),

    #[error("Media host unreachable: {0}")]
    Unreachable(String),
}
