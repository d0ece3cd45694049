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

use crate::{
    features::{
        saved_searches::{
            models::SavedSearch,
            schemas::{SavedSearchIn, SavedSearchOwner},
        },
        schemas::{ItemsResponse, MessageResponse, optional_text, path_id},
    },
    query::{FilterSpec, SortSpec, params::parse_text},
    storage::Store,
    utilities::errors::AppError,
};

/// Effectively unbounded; `LIMIT` is a signed bigint.
const ALL: u64 = i64::MAX as u64;

fn owner_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::invalid_id("user_id"))
}

fn by_owner(user_id: Uuid) -> FilterSpec {
    FilterSpec::by_id("user_id", user_id)
}

pub async fn create_saved_search_handler(
    State(store): State<Store<SavedSearch>>,
    payload: Result<Json<SavedSearchIn>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(input) = payload?;
    let (Some(user_id), Some(search_term)) = (
        optional_text(input.user_id),
        optional_text(input.search_term),
    ) else {
        return Err(AppError::ValidationError(
            "user_id and search_term are required".to_string(),
        ));
    };

    let now = Utc::now();
    let search = SavedSearch {
        id: Uuid::new_v4(),
        user_id: owner_id(&user_id)?,
        search_term,
        created_at: now,
        updated_at: now,
    };

    let saved = store
        .insert(search)
        .await
        .map_err(AppError::storage("Failed to save search"))?;

    Ok((StatusCode::CREATED, Json(saved)))
}

pub async fn get_saved_searches_handler(
    State(store): State<Store<SavedSearch>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let raw = parse_text(params.get("user_id").map(String::as_str))
        .ok_or_else(|| AppError::ValidationError("user_id is required".to_string()))?;
    let filter = by_owner(owner_id(raw)?);

    let items = store
        .find(&filter, &SortSpec::newest_first(), 0, ALL)
        .await
        .map_err(AppError::storage("Failed to fetch saved searches"))?;

    Ok(Json(ItemsResponse {
        total: items.len() as u64,
        items,
    }))
}

pub async fn delete_saved_search_handler(
    State(store): State<Store<SavedSearch>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = path_id(&id)?;

    let deleted = store
        .delete(id)
        .await
        .map_err(AppError::storage("Failed to delete saved search"))?;
    if !deleted {
        return Err(AppError::NotFoundError(
            "Saved search not found".to_string(),
        ));
    }

    Ok(Json(MessageResponse::new("Saved search deleted").with_id(id)))
}

pub async fn clear_saved_searches_handler(
    State(store): State<Store<SavedSearch>>,
    payload: Result<Json<SavedSearchOwner>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(input) = payload?;
    let user_id = owner_id(input.user_id.as_deref().unwrap_or_default())?;

    let deleted = store
        .delete_many(&by_owner(user_id))
        .await
        .map_err(AppError::storage("Failed to clear saved searches"))?;

    info!(%user_id, deleted, "saved searches cleared");

    Ok(Json(
        MessageResponse::new("All saved searches cleared").with_deleted(deleted),
    ))
}
