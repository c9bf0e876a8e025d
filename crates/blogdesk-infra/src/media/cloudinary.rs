//! Cloudinary unsigned-upload client.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use blogdesk_core::ports::{HostedMedia, MediaError, MediaHost, MediaUpload};

const DEFAULT_API_BASE: &str = "https://api.cloudinary.com/v1_1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    /// Name of the unsigned upload preset, sent with every upload.
    pub upload_preset: String,
    pub api_base: String,
}

impl CloudinaryConfig {
    /// `None` unless both the cloud name and the upload preset are set.
    pub fn from_env() -> Option<Self> {
        let non_empty = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

        Some(Self {
            cloud_name: non_empty("CLOUDINARY_CLOUD_NAME")?,
            upload_preset: non_empty("CLOUDINARY_UPLOAD_PRESET")?,
            api_base: non_empty("CLOUDINARY_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        })
    }

    pub fn upload_url(&self) -> String {
        format!(
            "{}/{}/image/upload",
            self.api_base.trim_end_matches('/'),
            self.cloud_name
        )
    }
}

#[derive(Debug, Deserialize)]
struct UploadReply {
    secure_url: Option<String>,
    public_id: Option<String>,
    error: Option<ReplyError>,
}

#[derive(Debug, Deserialize)]
struct ReplyError {
    message: String,
}

/// Forwards uploads to Cloudinary. One attempt per call, no retries.
pub struct CloudinaryMediaHost {
    config: CloudinaryConfig,
    client: reqwest::Client,
}

impl CloudinaryMediaHost {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl MediaHost for CloudinaryMediaHost {
    async fn upload(&self, file: MediaUpload) -> Result<HostedMedia, MediaError> {
        let size = file.bytes.len();
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name.unwrap_or_else(|| "upload".to_string()));
        let part = match file.content_type {
            Some(content_type) => part
                .mime_str(&content_type)
                .map_err(|e| MediaError::Rejected(e.to_string()))?,
            None => part,
        };

        let form = Form::new()
            .part("file", part)
            .text("upload_preset", self.config.upload_preset.clone());

        tracing::debug!(bytes = size, cloud = %self.config.cloud_name, "Uploading image");

        let response = self
            .client
            .post(self.config.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| MediaError::Unreachable(e.to_string()))?;

        let status = response.status();
        let reply: UploadReply = response.json().await.map_err(|e| {
            MediaError::Rejected(format!("Unreadable response from Cloudinary ({status}): {e}"))
        })?;

        let hosted = interpret_reply(status.is_success(), reply);
        if let Err(e) = &hosted {
            tracing::error!(%status, error = %e, "Cloudinary rejected upload");
        }
        hosted
    }
}

fn interpret_reply(success: bool, reply: UploadReply) -> Result<HostedMedia, MediaError> {
    if let Some(error) = reply.error {
        return Err(MediaError::Rejected(error.message));
    }
    match (success, reply.secure_url, reply.public_id) {
        (true, Some(url), Some(public_id)) => Ok(HostedMedia { url, public_id }),
        _ => Err(MediaError::Rejected("Cloudinary upload failed".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(json: serde_json::Value) -> UploadReply {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_upload_url() {
        let config = CloudinaryConfig {
            cloud_name: "demo".to_string(),
            upload_preset: "blog".to_string(),
            api_base: "https://api.cloudinary.com/v1_1/".to_string(),
        };

        assert_eq!(
            config.upload_url(),
            "https://api.cloudinary.com/v1_1/demo/image/upload"
        );
    }

    #[test]
    fn test_successful_reply() {
        let hosted = interpret_reply(
            true,
            reply(serde_json::json!({
                "secure_url": "https://res.cloudinary.com/demo/image/upload/v1/a.png",
                "public_id": "a",
                "bytes": 1024
            })),
        )
        .unwrap();

        assert_eq!(hosted.public_id, "a");
        assert!(hosted.url.starts_with("https://"));
    }

    #[test]
    fn test_error_reply_message_is_kept() {
        let result = interpret_reply(
            false,
            reply(serde_json::json!({ "error": { "message": "Upload preset not found" } })),
        );

        match result {
            Err(MediaError::Rejected(msg)) => assert_eq!(msg, "Upload preset not found"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_non_success_without_error_body() {
        let result = interpret_reply(false, reply(serde_json::json!({})));
        assert!(matches!(result, Err(MediaError::Rejected(_))));
    }

    #[tokio::test]
    async fn test_unreachable_host() {
        let host = CloudinaryMediaHost::new(CloudinaryConfig {
            cloud_name: "demo".to_string(),
            upload_preset: "blog".to_string(),
            api_base: "http://127.0.0.1:9".to_string(),
        });

        let result = host
            .upload(MediaUpload {
                bytes: vec![1, 2, 3],
                file_name: Some("a.png".to_string()),
                content_type: Some("image/png".to_string()),
            })
            .await;

        assert!(matches!(result, Err(MediaError::Unreachable(_))));
    }
}
