//! Post resource handlers.

use actix_web::{HttpResponse, web};

use blogdesk_core::domain::{PostInput, PostListQuery};
use blogdesk_shared::ApiResponse;
use blogdesk_shared::dto::DeletedResponse;

use crate::middleware::auth::AdminSession;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/posts?status=draft|published|archived&author_id={id}
pub async fn list(
    _session: AdminSession,
    state: web::Data<AppState>,
    query: web::Query<PostListQuery>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.list(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

/// GET /api/posts/{id}
pub async fn get(
    _session: AdminSession,
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get(&id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

/// POST /api/posts
pub async fn create(
    _session: AdminSession,
    state: web::Data<AppState>,
    body: web::Json<PostInput>,
) -> AppResult<HttpResponse> {
    let post = state.posts.create(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(post)))
}

/// PUT /api/posts/{id}
pub async fn update(
    _session: AdminSession,
    state: web::Data<AppState>,
    id: web::Path<String>,
    body: web::Json<PostInput>,
) -> AppResult<HttpResponse> {
    let post = state.posts.update(&id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

/// DELETE /api/posts/{id}
pub async fn delete(
    _session: AdminSession,
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = state.posts.delete(&id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        DeletedResponse { id },
        "Post deleted successfully",
    )))
}
