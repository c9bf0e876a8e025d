//! Admin session handlers.

use actix_web::{HttpResponse, web};

use blogdesk_core::ports::AuthError;
use blogdesk_shared::ApiResponse;
use blogdesk_shared::dto::{AuthResponse, LoginRequest, SessionResponse};

use crate::middleware::auth::{ADMIN_ROLE, Identity};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let admin = state.admin.as_ref().ok_or(AuthError::NotConfigured)?;

    let password_ok = state.passwords.verify(&req.password, &admin.password_hash)?;
    if req.username != admin.username || !password_ok {
        tracing::warn!(username = %req.username, "Rejected admin login");
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = state
        .tokens
        .generate_token(&admin.username, vec![ADMIN_ROLE.to_string()])?;

    tracing::info!(username = %admin.username, "Admin session issued");

    Ok(HttpResponse::Ok().json(ApiResponse::ok(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.expiration_seconds().max(0) as u64,
    })))
}

/// GET /api/auth/me - Protected route
pub async fn me(identity: Identity) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::ok(SessionResponse {
        username: identity.username,
        session_id: identity.session_id,
        roles: identity.roles,
        expires_at: identity
            .expires_at
            .map(|at| at.to_rfc3339())
            .unwrap_or_default(),
    })))
}
