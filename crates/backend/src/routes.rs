use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // ORDER TAGGING ROUTES
        // ========================================
        .route(
            "/api/get_order/:identifier",
            get(handlers::orders::get_order),
        )
        .route("/api/tag_order", post(handlers::orders::tag_order))
        .route(
            "/api/mark_paid_batch",
            post(handlers::orders::mark_paid_batch),
        )
        .route(
            "/api/check_csv_orders",
            post(handlers::orders::check_csv_orders),
        )
}
