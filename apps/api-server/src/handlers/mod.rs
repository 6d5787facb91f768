//! HTTP handlers and route configuration.

mod ai;
mod auth;
mod comments;
mod health;
mod notifications;
mod toggle;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            // Toggle-action routes
            .route("/toggle/{kind}/{post_id}", web::post().to(toggle::toggle))
            // Notification routes
            .route("/notifications", web::get().to(notifications::list))
            // Comment routes
            .route(
                "/posts/{post_id}/comments",
                web::post().to(comments::create),
            )
            .route(
                "/comments/{comment_id}/delete",
                web::post().to(comments::delete),
            )
            // AI metadata routes
            .service(
                web::scope("/ai")
                    .route("/tags", web::post().to(ai::tags))
                    .route("/seo", web::post().to(ai::seo))
                    .route("/summary", web::post().to(ai::summary)),
            ),
    );
}
