use serde::Serialize;
use uuid::Uuid;
use validator::ValidationError;

use crate::{query::Pagination, utilities::errors::AppError};

/// Page of results plus the numbers a client needs to page further.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
    pub has_more: bool,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, pagination: Pagination, total: u64) -> Self {
        Self {
            items,
            page: pagination.page,
            limit: pagination.limit,
            total,
            pages: pagination.pages(total),
            has_more: pagination.has_more(total),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ItemsResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
}

#[derive(Serialize, Debug)]
pub struct MessageResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<u64>,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            id: None,
            deleted: None,
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_deleted(mut self, deleted: u64) -> Self {
        self.deleted = Some(deleted);
        self
    }
}

/// Identifier taken from the request path.
pub fn path_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::invalid_id("id"))
}

/// Identifier referencing another document from a request body.
pub fn reference(field: &str, raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::ValidationError(format!("{field} is invalid")))
}

pub fn required<T>(field: &str, value: Option<T>) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::ValidationError(format!("{field} is required")))
}

/// Trimmed, non-empty text.
pub fn required_text(field: &str, value: Option<String>) -> Result<String, AppError> {
    let text = required(field, value)?.trim().to_string();
    if text.is_empty() {
        return Err(AppError::ValidationError(format!("{field} is required")));
    }
    Ok(text)
}

/// Trimmed text, `None` when blank.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Overwrites `target` when a patch provides a value.
pub fn assign<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

pub fn validate_coords(coords: &[f64]) -> Result<(), ValidationError> {
    if coords.len() != 2 || !coords.iter().all(|c| c.is_finite()) {
        return Err(ValidationError::new("coords")
            .with_message("coords must be an array of exactly 2 numbers".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn envelope_uses_camel_case_has_more() {
        let page = Paginated::new(vec![1, 2], Pagination { page: 1, limit: 2 }, 5);
        assert_eq!(
            serde_json::to_value(page).unwrap(),
            json!({"items": [1, 2], "page": 1, "limit": 2, "total": 5, "pages": 3, "hasMore": true})
        );
    }

    #[test]
    fn references_name_the_offending_field() {
        let error = reference("category", "nope").unwrap_err();
        assert_eq!(error.to_string(), "category is invalid");
        assert!(reference("user_id", &Uuid::new_v4().to_string()).is_ok());
        assert_eq!(path_id("12").unwrap_err().to_string(), "Invalid id");
    }

    #[test]
    fn required_text_is_trimmed() {
        assert_eq!(required_text("name", Some("  Flat ".into())).unwrap(), "Flat");
        assert_eq!(
            required_text("name", Some("   ".into())).unwrap_err().to_string(),
            "name is required"
        );
        assert!(required_text("name", None).is_err());
    }

    #[test]
    fn coords_need_two_finite_numbers() {
        assert!(validate_coords(&[33.9, 35.5]).is_ok());
        assert!(validate_coords(&[33.9]).is_err());
        assert!(validate_coords(&[33.9, 35.5, 1.0]).is_err());
        assert!(validate_coords(&[f64::NAN, 35.5]).is_err());
    }

    #[test]
    fn message_omits_absent_fields() {
        assert_eq!(
            serde_json::to_value(MessageResponse::new("Deleted")).unwrap(),
            json!({"message": "Deleted"})
        );
    }
}
