//! HTTP handlers and route configuration.

mod auth;
mod authors;
mod health;
mod posts;
mod stats;
mod upload;

use actix_web::{HttpResponse, web};
use blogdesk_shared::{ApiResponse, ErrorKind};

use crate::middleware::error::{json_error_handler, query_error_handler};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(
            web::scope("/api")
                // Public routes
                .route("/health", web::get().to(health::health_check))
                .service(
                    web::scope("/auth")
                        .route("/login", web::post().to(auth::login))
                        .route("/me", web::get().to(auth::me)),
                )
                // Admin routes
                .service(
                    web::resource("/authors")
                        .route(web::get().to(authors::list))
                        .route(web::post().to(authors::create)),
                )
                .service(
                    web::resource("/authors/{id}")
                        .route(web::get().to(authors::get))
                        .route(web::put().to(authors::update))
                        .route(web::delete().to(authors::delete)),
                )
                .service(
                    web::resource("/posts")
                        .route(web::get().to(posts::list))
                        .route(web::post().to(posts::create)),
                )
                .service(
                    web::resource("/posts/{id}")
                        .route(web::get().to(posts::get))
                        .route(web::put().to(posts::update))
                        .route(web::delete().to(posts::delete)),
                )
                .route("/upload", web::post().to(upload::upload))
                .route("/stats", web::get().to(stats::dashboard))
                .default_service(web::to(route_not_found)),
        );
}

async fn route_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error(ErrorKind::NotFound, "Route not found"))
}
