//! Dashboard counters.

use actix_web::{HttpResponse, web};
use blogdesk_shared::ApiResponse;

use crate::middleware::auth::AdminSession;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/stats
pub async fn dashboard(
    _session: AdminSession,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let stats = state.stats.dashboard().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(stats)))
}
