pub mod handlers;
pub mod models;
pub mod schemas;

use axum::{Router, routing::get};

use crate::utilities::app_state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/ads",
            get(handlers::get_ads_handler).post(handlers::create_ad_handler),
        )
        .route(
            "/api/v1/ads/{id}",
            get(handlers::get_ad_handler)
                .put(handlers::update_ad_handler)
                .delete(handlers::delete_ad_handler),
        )
}
