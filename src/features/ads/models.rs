use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::storage::{Document, Value};

/// Promotional banner shown alongside listings.
#[derive(FromRow, Serialize, Clone, PartialEq, Debug)]
pub struct Ad {
    pub id: Uuid,
    pub title: String,
    pub image: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Document for Ad {
    const COLUMNS: &'static [&'static str] = &["id", "title", "image", "created_at", "updated_at"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn field(&self, name: &str) -> Option<Value> {
        Some(match name {
            "id" => self.id.into(),
            "title" => self.title.as_str().into(),
            "image" => self.image.as_str().into(),
            "created_at" => self.created_at.into(),
            "updated_at" => self.updated_at.into(),
            _ => return None,
        })
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}
