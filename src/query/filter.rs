//! Storage-neutral description of a listing query.
//!
//! A [`FilterSpec`] is an implicit AND over its predicates. Field names are
//! always `&'static str` taken from a descriptor, never from the request.

use uuid::Uuid;

use crate::storage::Value;

#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    /// Raw equality.
    Eq { field: &'static str, value: Value },
    /// Case-insensitive regular expression match. `pattern` is already
    /// escaped, so user input only ever matches literally.
    Matches {
        field: &'static str,
        pattern: String,
    },
    /// Inclusive numeric range. At least one bound is set.
    Range {
        field: &'static str,
        min: Option<f64>,
        max: Option<f64>,
    },
    /// Rectangle over a `[lat, lng]` pair.
    BoundingBox {
        field: &'static str,
        lat_min: f64,
        lat_max: f64,
        lng_min: f64,
        lng_max: f64,
    },
    /// Any of the inner predicates.
    AnyOf(Vec<Predicate>),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterSpec {
    pub predicates: Vec<Predicate>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, predicate: Predicate) {
        self.predicates.push(predicate);
    }

    pub fn and(mut self, predicate: Predicate) -> Self {
        self.push(predicate);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Returns the predicate constraining `field`, if any.
    pub fn get(&self, field: &str) -> Option<&Predicate> {
        self.predicates.iter().find(|p| p.field() == Some(field))
    }

    pub fn by_id(field: &'static str, id: Uuid) -> Self {
        Self::new().and(Predicate::Eq {
            field,
            value: Value::Id(id),
        })
    }
}

impl Predicate {
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Eq { field, .. }
            | Self::Matches { field, .. }
            | Self::Range { field, .. }
            | Self::BoundingBox { field, .. } => Some(field),
            Self::AnyOf(_) => None,
        }
    }

    /// Case-insensitive substring match on the literal `text`.
    pub fn contains(field: &'static str, text: &str) -> Self {
        Self::Matches {
            field,
            pattern: regex::escape(text),
        }
    }

    /// Case-insensitive whole-value match on the literal `text`.
    pub fn equals_ignore_case(field: &'static str, text: &str) -> Self {
        Self::Matches {
            field,
            pattern: format!("^{}$", regex::escape(text)),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Sort on one allow-listed field; ties broken by id in the same direction.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SortSpec {
    pub field: &'static str,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn newest_first() -> Self {
        Self {
            field: "created_at",
            direction: SortDirection::Desc,
        }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::newest_first()
    }
}
