use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::storage::{Document, Value};

/// A property or vehicle category. Both kinds share one shape and live in
/// separate tables.
#[derive(FromRow, Serialize, Clone, PartialEq, Debug)]
pub struct Category {
    pub id: Uuid,
    pub title: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(title: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Document for Category {
    const COLUMNS: &'static [&'static str] = &["id", "title", "created_at", "updated_at"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn field(&self, name: &str) -> Option<Value> {
        Some(match name {
            "id" => self.id.into(),
            "title" => self.title.as_str().into(),
            "created_at" => self.created_at.into(),
            "updated_at" => self.updated_at.into(),
            _ => return None,
        })
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}
