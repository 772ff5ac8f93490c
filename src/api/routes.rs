// API route configuration

use crate::api::handlers;
use actix_web::web;

/// Paths serving the update endpoint. The `.php` form keeps existing callers working.
pub const UPDATE_PATHS: [&str; 2] = ["/update_provider", "/update_provider.php"];

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health_check));
    // Method-agnostic: parameters always come from the query string.
    for path in UPDATE_PATHS {
        cfg.route(path, web::route().to(handlers::update_provider));
    }
}
