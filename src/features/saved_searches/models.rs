use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::storage::{Document, Value};

#[derive(FromRow, Serialize, Clone, PartialEq, Debug)]
pub struct SavedSearch {
    pub id: Uuid,
    pub user_id: Uuid,
    pub search_term: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Document for SavedSearch {
    const COLUMNS: &'static [&'static str] =
        &["id", "user_id", "search_term", "created_at", "updated_at"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn field(&self, name: &str) -> Option<Value> {
        Some(match name {
            "id" => self.id.into(),
            "user_id" => self.user_id.into(),
            "search_term" => self.search_term.as_str().into(),
            "created_at" => self.created_at.into(),
            "updated_at" => self.updated_at.into(),
            _ => return None,
        })
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}
