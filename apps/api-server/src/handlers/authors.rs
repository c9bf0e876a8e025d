//! Author resource handlers.

use actix_web::{HttpResponse, web};

use blogdesk_core::domain::{AuthorInput, AuthorListQuery};
use blogdesk_shared::ApiResponse;
use blogdesk_shared::dto::DeletedResponse;

use crate::middleware::auth::AdminSession;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/authors?isActive=true|false
pub async fn list(
    _session: AdminSession,
    state: web::Data<AppState>,
    query: web::Query<AuthorListQuery>,
) -> AppResult<HttpResponse> {
    let authors = state.authors.list(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(authors)))
}

/// GET /api/authors/{id}
pub async fn get(
    _session: AdminSession,
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let author = state.authors.get(&id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(author)))
}

/// POST /api/authors
pub async fn create(
    _session: AdminSession,
    state: web::Data<AppState>,
    body: web::Json<AuthorInput>,
) -> AppResult<HttpResponse> {
    let author = state.authors.create(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(author)))
}

/// PUT /api/authors/{id}
pub async fn update(
    _session: AdminSession,
    state: web::Data<AppState>,
    id: web::Path<String>,
    body: web::Json<AuthorInput>,
) -> AppResult<HttpResponse> {
    let author = state.authors.update(&id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(author)))
}

/// DELETE /api/authors/{id}
pub async fn delete(
    _session: AdminSession,
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = state.authors.delete(&id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        DeletedResponse { id },
        "Author deleted successfully",
    )))
}
