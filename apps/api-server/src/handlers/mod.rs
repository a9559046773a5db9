//! HTTP handlers and route configuration.

mod auth;
mod health;
mod media;
mod posts;


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
                    .route("/signup", web::post().to(auth::signup))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            // Posts
            .route("/posts", web::get().to(posts::index))
            .route("/posts", web::post().to(posts::post_create))
            .route("/posts/{post_id}", web::get().to(posts::post_detail))
            .route("/posts/{post_id}/edit", web::post().to(posts::post_edit))
            // Groups
            .route("/groups", web::get().to(posts::group_index))
            .route("/groups/{slug}/posts", web::get().to(posts::group_posts))
            // Profiles
            .route("/profiles/{username}", web::get().to(posts::profile))
            // Media
            .route("/media/{media_id}", web::get().to(media::media_get)),
    );
}
