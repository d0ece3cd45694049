pub mod handlers;
pub mod models;
pub mod schemas;

use axum::{Router, routing::get};

use crate::utilities::app_state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/notifications",
            get(handlers::get_notifications_handler).post(handlers::create_notification_handler),
        )
        .route(
            "/api/v1/notifications/{id}",
            get(handlers::get_notification_handler)
                .put(handlers::update_notification_handler)
                .delete(handlers::delete_notification_handler),
        )
}
