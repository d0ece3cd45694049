use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use crate::{
    features::{
        listings::{Listing, VIEWS_FIELD},
        schemas::{MessageResponse, Paginated, path_id},
    },
    query::ListingQuery,
    storage::Store,
    utilities::errors::AppError,
};

fn not_found<L: Listing>() -> AppError {
    AppError::NotFoundError(format!("{} not found", L::TITLE))
}

pub async fn get_many_listings_handler<L: Listing>(
    State(store): State<Store<L>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let ListingQuery {
        filter,
        sort,
        pagination,
    } = ListingQuery::from_params(L::descriptor(), &params)?;

    let (items, total) = tokio::try_join!(
        store.find(&filter, &sort, pagination.skip(), pagination.limit),
        store.count(&filter),
    )
    .map_err(AppError::storage(format!("Failed to fetch {}s", L::NAME)))?;

    debug!(total, returned = items.len(), "fetched {}s", L::NAME);

    Ok(Json(Paginated::new(items, pagination, total)))
}

pub async fn get_one_listing_handler<L: Listing>(
    State(store): State<Store<L>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = path_id(&id)?;

    let listing = store
        .get(id)
        .await
        .map_err(AppError::storage(format!("Failed to fetch {}", L::NAME)))?
        .ok_or_else(not_found::<L>)?;

    Ok(Json(listing))
}

pub async fn create_listing_handler<L: Listing>(
    State(store): State<Store<L>>,
    payload: Result<Json<L::Input>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(input) = payload?;
    input.validate()?;

    let listing = L::create(input, Uuid::new_v4(), Utc::now())?;
    let created = store
        .insert(listing)
        .await
        .map_err(AppError::storage(format!("Failed to create {}", L::NAME)))?;

    info!(id = %created.id(), "{} created", L::NAME);

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_listing_handler<L: Listing>(
    State(store): State<Store<L>>,
    Path(id): Path<String>,
    payload: Result<Json<L::Input>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = path_id(&id)?;
    let Json(input) = payload?;
    input.validate()?;

    let failed = format!("Failed to update {}", L::NAME);
    let mut listing = store
        .get(id)
        .await
        .map_err(AppError::storage(failed.clone()))?
        .ok_or_else(not_found::<L>)?;

    listing.apply(input)?;
    listing.touch(Utc::now());

    let updated = store
        .replace(listing)
        .await
        .map_err(AppError::storage(failed))?
        .ok_or_else(not_found::<L>)?;

    Ok(Json(updated))
}

pub async fn delete_listing_handler<L: Listing>(
    State(store): State<Store<L>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = path_id(&id)?;

    let deleted = store
        .delete(id)
        .await
        .map_err(AppError::storage(format!("Failed to delete {}", L::NAME)))?;
    if !deleted {
        return Err(not_found::<L>());
    }

    info!(%id, "{} deleted", L::NAME);

    Ok(Json(
        MessageResponse::new(format!("{} deleted", L::TITLE)).with_id(id),
    ))
}

pub async fn increment_views_handler<L: Listing>(
    State(store): State<Store<L>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = path_id(&id)?;

    let listing = store
        .increment(id, VIEWS_FIELD)
        .await
        .map_err(AppError::storage("Failed to increment views"))?
        .ok_or_else(not_found::<L>)?;

    Ok(Json(listing))
}
