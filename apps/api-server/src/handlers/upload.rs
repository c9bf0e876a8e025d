//! Media upload passthrough.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use futures::TryStreamExt;

use blogdesk_core::DomainError;
use blogdesk_core::ports::MediaUpload;
use blogdesk_shared::ApiResponse;
use blogdesk_shared::dto::UploadResponse;

use crate::middleware::auth::AdminSession;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/upload
///
/// Accepts a multipart form with a required `file` field and forwards the
/// bytes to the media host untouched. Other fields are ignored.
pub async fn upload(
    _session: AdminSession,
    state: web::Data<AppState>,
    mut payload: Multipart,
) -> AppResult<HttpResponse> {
    let mut file: Option<MediaUpload> = None;

    while let Some(mut field) = payload.try_next().await.map_err(bad_multipart)? {
        if field.name() != Some("file") {
            while field.try_next().await.map_err(bad_multipart)?.is_some() {}
            continue;
        }

        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_owned);
        let content_type = field.content_type().map(|mime| mime.to_string());

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(bad_multipart)? {
            bytes.extend_from_slice(&chunk);
        }

        file = Some(MediaUpload {
            bytes,
            file_name,
            content_type,
        });
    }

    let file = file.ok_or_else(|| AppError::Validation("No file provided".to_string()))?;
    tracing::debug!(size = file.bytes.len(), name = ?file.file_name, "Forwarding upload");

    let hosted = state
        .media
        .upload(file)
        .await
        .map_err(DomainError::from)?;

    tracing::info!(public_id = %hosted.public_id, "Upload stored");

    Ok(HttpResponse::Ok().json(ApiResponse::ok(UploadResponse {
        url: hosted.url,
        public_id: hosted.public_id,
    })))
}

fn bad_multipart(err: actix_multipart::MultipartError) -> AppError {
    AppError::Validation(format!("Invalid multipart body: {}", err))
}
