use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{
    features::{
        ads::{models::Ad, schemas::AdIn},
        schemas::{MessageResponse, Paginated, assign, optional_text, path_id},
    },
    query::{FilterSpec, Pagination, SortSpec},
    storage::{Document, Store},
    utilities::errors::AppError,
};

fn not_found() -> AppError {
    AppError::NotFoundError("Ad not found".to_string())
}

pub async fn create_ad_handler(
    State(store): State<Store<Ad>>,
    payload: Result<Json<AdIn>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(input) = payload?;
    let (Some(title), Some(image)) = (optional_text(input.title), optional_text(input.image))
    else {
        return Err(AppError::ValidationError(
            "title and image are required".to_string(),
        ));
    };

    let now = Utc::now();
    let ad = store
        .insert(Ad {
            id: Uuid::new_v4(),
            title,
            image,
            created_at: now,
            updated_at: now,
        })
        .await
        .map_err(AppError::storage("Failed to create ad"))?;

    info!(id = %ad.id, "ad created");

    Ok((StatusCode::CREATED, Json(ad)))
}

pub async fn get_ads_handler(
    State(store): State<Store<Ad>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let filter = FilterSpec::new();
    let sort = SortSpec::newest_first();
    let pagination = Pagination::from_params(&params);

    let (items, total) = tokio::try_join!(
        store.find(&filter, &sort, pagination.skip(), pagination.limit),
        store.count(&filter),
    )
    .map_err(AppError::storage("Failed to fetch ads"))?;

    Ok(Json(Paginated::new(items, pagination, total)))
}

pub async fn get_ad_handler(
    State(store): State<Store<Ad>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = path_id(&id)?;

    let ad = store
        .get(id)
        .await
        .map_err(AppError::storage("Failed to fetch ad"))?
        .ok_or_else(not_found)?;

    Ok(Json(ad))
}

pub async fn update_ad_handler(
    State(store): State<Store<Ad>>,
    Path(id): Path<String>,
    payload: Result<Json<AdIn>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = path_id(&id)?;
    let Json(input) = payload?;
    input.validate()?;

    let mut ad = store
        .get(id)
        .await
        .map_err(AppError::storage("Failed to update ad"))?
        .ok_or_else(not_found)?;
    assign(&mut ad.title, optional_text(input.title));
    assign(&mut ad.image, optional_text(input.image));
    ad.touch(Utc::now());

    let updated = store
        .replace(ad)
        .await
        .map_err(AppError::storage("Failed to update ad"))?
        .ok_or_else(not_found)?;

    Ok(Json(updated))
}

pub async fn delete_ad_handler(
    State(store): State<Store<Ad>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = path_id(&id)?;

    if !store
        .delete(id)
        .await
        .map_err(AppError::storage("Failed to delete ad"))?
    {
        return Err(not_found());
    }

    Ok(Json(MessageResponse::new("Ad deleted").with_id(id)))
}
