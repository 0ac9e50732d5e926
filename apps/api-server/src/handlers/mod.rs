//! HTTP handlers and route configuration.

mod auth;
mod categories;
mod health;
mod posts;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Public service routes
        .route("/", web::get().to(health::service_info))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api")
                // Auth routes
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(auth::register))
                        .route("/login", web::post().to(auth::login))
                        .route("/me", web::get().to(auth::me)),
                )
                // Post routes - reads are public, writes require a token
                .service(
                    web::scope("/posts")
                        .route("", web::get().to(posts::list_posts))
                        .route("", web::post().to(posts::create_post))
                        .route("/{id}", web::get().to(posts::get_post))
                        .route("/{id}", web::put().to(posts::update_post))
                        .route("/{id}", web::delete().to(posts::delete_post)),
                )
                // Category routes
                .service(
                    web::scope("/categories")
                        .route("", web::get().to(categories::list_categories))
                        .route("", web::post().to(categories::create_category))
                        .route("/{id}", web::delete().to(categories::delete_category)),
                ),
        );
}
