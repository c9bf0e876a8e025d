//! Authentication extractors.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use chrono::{DateTime, Utc};
use std::future::{Ready, ready};
use uuid::Uuid;

use blogdesk_core::ports::{AuthError, TokenClaims};

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Role carried by admin session tokens.
pub const ADMIN_ROLE: &str = "admin";

/// Authenticated session identity extractor.
///
/// Use this in handlers to require a valid session:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub username: String,
    pub session_id: Uuid,
    pub roles: Vec<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            username: claims.subject,
            session_id: claims.session_id,
            roles: claims.roles,
            expires_at: DateTime::from_timestamp(claims.exp, 0),
        }
    }
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map(Identity::from))
    }
}

/// A session that also holds the admin role.
///
/// Resource, upload and stats handlers take this as an argument.
#[derive(Debug, Clone)]
pub struct AdminSession(pub Identity);

impl FromRequest for AdminSession {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = authenticate(req).and_then(|claims| {
            if claims.has_role(ADMIN_ROLE) {
                Ok(AdminSession(Identity::from(claims)))
            } else {
                tracing::warn!(subject = %claims.subject, "Session lacks admin role");
                Err(AuthError::InsufficientPermissions.into())
            }
        });
        ready(result)
    }
}

fn authenticate(req: &HttpRequest) -> Result<TokenClaims, AppError> {
    let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
        AppError::Internal("AppState not found in app data".to_string())
    })?;

    // Extract Bearer token from Authorization header
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    // Parse "Bearer <token>"
    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))?;

    Ok(state.tokens.validate_token(token.trim())?)
}
