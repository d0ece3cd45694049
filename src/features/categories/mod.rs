pub mod handlers;
pub mod models;
pub mod schemas;

use axum::{Router, routing::get};

use crate::{
    features::categories::models::Category, storage::Store, utilities::app_state::AppState,
};

/// Category routes under `path`, bound to their own collection.
pub fn routes(path: &str, store: Store<Category>) -> Router<AppState> {
    Router::new()
        .route(
            path,
            get(handlers::get_many_categories_handler).post(handlers::create_category_handler),
        )
        .route(
            &format!("{path}/{{id}}"),
            get(handlers::get_one_category_handler)
                .put(handlers::update_category_handler)
                .delete(handlers::delete_category_handler),
        )
        .with_state(store)
}
