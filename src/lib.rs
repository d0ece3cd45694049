pub mod features;
pub mod query;
pub mod services;
pub mod storage;
pub mod utilities;

use axum::{Router, routing::get};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    features::{ads, categories, notifications, properties, saved_searches, vehicles},
    utilities::app_state::AppState,
};

async fn server_status() -> &'static str {
    "live"
}

pub fn app(state: AppState) -> Router {
    let property_categories = state.property_categories.clone();
    let vehicle_categories = state.vehicle_categories.clone();

    Router::new()
        .route("/server-status", get(server_status))
        .merge(properties::routes())
        .merge(vehicles::routes())
        .merge(categories::routes(
            "/api/v1/property-categories",
            property_categories,
        ))
        .merge(categories::routes(
            "/api/v1/vehicle-categories",
            vehicle_categories,
        ))
        .merge(saved_searches::routes())
        .merge(ads::routes())
        .merge(notifications::routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
