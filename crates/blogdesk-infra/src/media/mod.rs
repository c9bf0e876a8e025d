//! Media host implementations.

#[cfg(feature = "media")]
mod cloudinary;

#[cfg(feature = "media")]
pub use cloudinary::{CloudinaryConfig, CloudinaryMediaHost};

use async_trait::async_trait;

use blogdesk_core::ports::{HostedMedia, MediaError, MediaHost, MediaUpload};

/// Stand-in used when no media host credentials are configured.
/// Every upload fails with a configuration error.
pub struct UnconfiguredMediaHost;

#[async_trait]
impl MediaHost for UnconfiguredMediaHost {
    async fn upload(&self, _file: MediaUpload) -> Result<HostedMedia, MediaError> {
        Err(MediaError::NotConfigured(
            "Cloudinary configuration missing".to_string(),
        ))
    }
}
