//! Document storage behind a small async trait, so handlers receive the
//! backend they run against instead of reaching for a global handle.

pub mod memory;
pub mod postgres;

use std::{cmp::Ordering, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::query::{FilterSpec, SortSpec};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("{0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("{0}")]
    Backend(String),
}

/// A single stored field value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
    Integer(i64),
    Bool(bool),
    Id(Uuid),
    Timestamp(DateTime<Utc>),
    /// `[lat, lng]`.
    Coords(Vec<f64>),
    List(Vec<String>),
    /// A label of a Postgres enum type.
    Enum {
        type_name: &'static str,
        label: &'static str,
    },
    Null,
}

impl Value {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Enum { label, .. } => Some(label),
            _ => None,
        }
    }

    /// Ordering between values of comparable kinds; numbers compare across
    /// `Number` and `Integer`.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            (Self::Id(a), Self::Id(b)) => Some(a.cmp(b)),
            (Self::Timestamp(a), Self::Timestamp(b)) => Some(a.cmp(b)),
            (a, b) => match (a.as_str(), b.as_str()) {
                (Some(a), Some(b)) => Some(a.cmp(b)),
                _ => a.as_f64()?.partial_cmp(&b.as_f64()?),
            },
        }
    }

    /// Equality as the filter layer sees it: numbers compare numerically and
    /// enum labels compare as text.
    pub fn matches(&self, other: &Value) -> bool {
        if let (Some(a), Some(b)) = (self.as_f64(), other.as_f64()) {
            return a == b;
        }
        if let (Some(a), Some(b)) = (self.as_str(), other.as_str()) {
            return a == b;
        }
        self == other
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Uuid> for Value {
    fn from(value: Uuid) -> Self {
        Self::Id(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A Rust enum persisted as a Postgres enum type.
pub trait EnumLabel: Copy {
    const TYPE_NAME: &'static str;

    fn label(self) -> &'static str;

    fn value(self) -> Value {
        Value::Enum {
            type_name: Self::TYPE_NAME,
            label: self.label(),
        }
    }
}

/// A record that can live in a [`DocumentStore`].
pub trait Document: Clone + Send + Sync + Unpin + 'static {
    /// Every persisted column, `id` first.
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> Uuid;

    /// Value of a stored field by column name; `None` for unknown fields and nulls.
    fn field(&self, name: &str) -> Option<Value>;

    fn columns(&self) -> Vec<(&'static str, Value)> {
        Self::COLUMNS
            .iter()
            .map(|&column| (column, self.field(column).unwrap_or(Value::Null)))
            .collect()
    }

    fn touch(&mut self, now: DateTime<Utc>);

    /// Adds one to a counter field. Returns false when `field` is not a counter.
    fn increment(&mut self, _field: &str) -> bool {
        false
    }
}

#[async_trait]
pub trait DocumentStore<T: Document>: Send + Sync {
    async fn find(
        &self,
        filter: &FilterSpec,
        sort: &SortSpec,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<T>, StorageError>;

    async fn count(&self, filter: &FilterSpec) -> Result<u64, StorageError>;

    async fn get(&self, id: Uuid) -> Result<Option<T>, StorageError>;

    async fn insert(&self, document: T) -> Result<T, StorageError>;

    /// Overwrites the stored document with the same id; `None` if absent.
    async fn replace(&self, document: T) -> Result<Option<T>, StorageError>;

    async fn delete(&self, id: Uuid) -> Result<bool, StorageError>;

    async fn delete_many(&self, filter: &FilterSpec) -> Result<u64, StorageError>;

    /// Atomically adds one to `field`, returning the updated document.
    async fn increment(&self, id: Uuid, field: &'static str) -> Result<Option<T>, StorageError>;
}

/// Shared handle to a collection of `T`.
pub struct Store<T: Document>(pub Arc<dyn DocumentStore<T>>);

impl<T: Document> Store<T> {
    pub fn new(store: impl DocumentStore<T> + 'static) -> Self {
        Self(Arc::new(store))
    }
}

impl<T: Document> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: Document> std::ops::Deref for Store<T> {
    type Target = dyn DocumentStore<T>;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}
