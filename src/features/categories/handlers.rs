use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    features::{
        categories::{models::Category, schemas::CategoryIn},
        schemas::{MessageResponse, Paginated, path_id, required_text},
    },
    query::{FilterSpec, Pagination, Predicate, SortSpec, params::parse_text},
    storage::{Document, StorageError, Store},
    utilities::errors::AppError,
};

fn not_found() -> AppError {
    AppError::NotFoundError("Category not found".to_string())
}

fn already_exists() -> AppError {
    AppError::ConflictError("Category already exists".to_string())
}

/// A concurrent insert can still race past the lookup; the unique index on
/// `lower(title)` reports it as a unique violation.
fn conflict_or(message: &'static str) -> impl FnOnce(StorageError) -> AppError {
    move |error| {
        let duplicate = matches!(
            &error,
            StorageError::Sqlx(sqlx::Error::Database(db)) if db.is_unique_violation()
        );
        if duplicate {
            already_exists()
        } else {
            AppError::storage(message)(error)
        }
    }
}

/// Whether a category other than `except` already uses `title`, ignoring case.
async fn title_taken(
    store: &Store<Category>,
    title: &str,
    except: Option<Uuid>,
) -> Result<bool, AppError> {
    let filter = FilterSpec::new().and(Predicate::equals_ignore_case("title", title));
    let matches = store
        .find(&filter, &SortSpec::newest_first(), 0, 2)
        .await
        .map_err(AppError::storage("Server error"))?;

    Ok(matches.iter().any(|c| Some(c.id) != except))
}

pub async fn get_many_categories_handler(
    State(store): State<Store<Category>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let mut filter = FilterSpec::new();
    if let Some(q) = parse_text(params.get("q").map(String::as_str)) {
        filter.push(Predicate::contains("title", q));
    }
    let sort = SortSpec::newest_first();
    let pagination = Pagination::from_params(&params);

    let (items, total) = tokio::try_join!(
        store.find(&filter, &sort, pagination.skip(), pagination.limit),
        store.count(&filter),
    )
    .map_err(AppError::storage("Server error"))?;

    Ok(Json(Paginated::new(items, pagination, total)))
}

pub async fn get_one_category_handler(
    State(store): State<Store<Category>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = path_id(&id)?;

    let category = store
        .get(id)
        .await
        .map_err(AppError::storage("Server error"))?
        .ok_or_else(not_found)?;

    Ok(Json(category))
}

pub async fn create_category_handler(
    State(store): State<Store<Category>>,
    payload: Result<Json<CategoryIn>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(input) = payload?;
    let title = required_text("title", input.title)?;

    if title_taken(&store, &title, None).await? {
        warn!(%title, "duplicate category");
        return Err(already_exists());
    }

    let created = store
        .insert(Category::new(title, Utc::now()))
        .await
        .map_err(conflict_or("Server error"))?;

    info!(id = %created.id, title = %created.title, "category created");

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_category_handler(
    State(store): State<Store<Category>>,
    Path(id): Path<String>,
    payload: Result<Json<CategoryIn>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = path_id(&id)?;
    let Json(input) = payload?;
    let title = required_text("title", input.title)?;

    if title_taken(&store, &title, Some(id)).await? {
        return Err(already_exists());
    }

    let mut category = store
        .get(id)
        .await
        .map_err(AppError::storage("Server error"))?
        .ok_or_else(not_found)?;
    category.title = title;
    category.touch(Utc::now());

    let updated = store
        .replace(category)
        .await
        .map_err(conflict_or("Server error"))?
        .ok_or_else(not_found)?;

    Ok(Json(updated))
}

pub async fn delete_category_handler(
    State(store): State<Store<Category>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = path_id(&id)?;

    if !store
        .delete(id)
        .await
        .map_err(AppError::storage("Server error"))?
    {
        return Err(not_found());
    }

    Ok(Json(MessageResponse::new("Category deleted").with_id(id)))
}
