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
        notifications::{models::Notification, schemas::NotificationIn},
        schemas::{MessageResponse, Paginated, assign, optional_text, path_id},
    },
    query::{FilterSpec, Pagination, SortSpec, params::parse_text},
    storage::{Document, Store},
    utilities::errors::AppError,
};

fn not_found() -> AppError {
    AppError::NotFoundError("Notification not found".to_string())
}

fn recipient(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::invalid_id("user_id"))
}

pub async fn create_notification_handler(
    State(store): State<Store<Notification>>,
    payload: Result<Json<NotificationIn>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(input) = payload?;
    let (Some(title), Some(user_id)) = (optional_text(input.title), optional_text(input.user_id))
    else {
        return Err(AppError::ValidationError(
            "title and user_id are required".to_string(),
        ));
    };

    let now = Utc::now();
    let notification = store
        .insert(Notification {
            id: Uuid::new_v4(),
            title,
            description: optional_text(input.description),
            user_id: recipient(&user_id)?,
            created_at: now,
            updated_at: now,
        })
        .await
        .map_err(AppError::storage("Failed to create notification"))?;

    info!(id = %notification.id, user_id = %notification.user_id, "notification created");

    Ok((StatusCode::CREATED, Json(notification)))
}

/// Newest first, optionally narrowed to one recipient with `user_id`.
pub async fn get_notifications_handler(
    State(store): State<Store<Notification>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let filter = match parse_text(params.get("user_id").map(String::as_str)) {
        Some(raw) => FilterSpec::by_id("user_id", recipient(raw)?),
        None => FilterSpec::new(),
    };
    let sort = SortSpec::newest_first();
    let pagination = Pagination::from_params(&params);

    let (items, total) = tokio::try_join!(
        store.find(&filter, &sort, pagination.skip(), pagination.limit),
        store.count(&filter),
    )
    .map_err(AppError::storage("Failed to fetch notifications"))?;

    Ok(Json(Paginated::new(items, pagination, total)))
}

pub async fn get_notification_handler(
    State(store): State<Store<Notification>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = path_id(&id)?;

    let notification = store
        .get(id)
        .await
        .map_err(AppError::storage("Failed to fetch notification"))?
        .ok_or_else(not_found)?;

    Ok(Json(notification))
}

pub async fn update_notification_handler(
    State(store): State<Store<Notification>>,
    Path(id): Path<String>,
    payload: Result<Json<NotificationIn>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = path_id(&id)?;
    let Json(input) = payload?;
    input.validate()?;
    let user_id = input.user_id.as_deref().map(recipient).transpose()?;

    let mut notification = store
        .get(id)
        .await
        .map_err(AppError::storage("Failed to update notification"))?
        .ok_or_else(not_found)?;
    assign(&mut notification.title, optional_text(input.title));
    if input.description.is_some() {
        notification.description = optional_text(input.description);
    }
    assign(&mut notification.user_id, user_id);
    notification.touch(Utc::now());

    let updated = store
        .replace(notification)
        .await
        .map_err(AppError::storage("Failed to update notification"))?
        .ok_or_else(not_found)?;

    Ok(Json(updated))
}

pub async fn delete_notification_handler(
    State(store): State<Store<Notification>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = path_id(&id)?;

    if !store
        .delete(id)
        .await
        .map_err(AppError::storage("Failed to delete notification"))?
    {
        return Err(not_found());
    }

    Ok(Json(MessageResponse::new("Notification deleted").with_id(id)))
}
