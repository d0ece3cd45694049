pub mod handlers;
pub mod models;
pub mod schemas;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::utilities::app_state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/saved-searches",
            get(handlers::get_saved_searches_handler)
                .post(handlers::create_saved_search_handler)
                .delete(handlers::clear_saved_searches_handler),
        )
        .route(
            "/api/v1/saved-searches/{id}",
            delete(handlers::delete_saved_search_handler),
        )
}
