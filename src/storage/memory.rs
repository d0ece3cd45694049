use std::{cmp::Ordering, collections::BTreeMap};

use async_trait::async_trait;
use chrono::Utc;
use regex::{Regex, RegexBuilder};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    query::{FilterSpec, Predicate, SortDirection, SortSpec},
    storage::{Document, DocumentStore, StorageError, Value},
};

/// In-process collection. Evaluates filters the same way the SQL backend
/// compiles them.
pub struct MemoryStore<T> {
    documents: RwLock<BTreeMap<Uuid, T>>,
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self {
            documents: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<T: Document> MemoryStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents(documents: impl IntoIterator<Item = T>) -> Self {
        Self {
            documents: RwLock::new(documents.into_iter().map(|d| (d.id(), d)).collect()),
        }
    }
}

enum Compiled<'a> {
    Eq(&'static str, &'a Value),
    Matches(&'static str, Regex),
    Range(&'static str, Option<f64>, Option<f64>),
    BoundingBox(&'static str, [f64; 4]),
    AnyOf(Vec<Compiled<'a>>),
}

fn compile(predicate: &Predicate) -> Result<Compiled<'_>, StorageError> {
    Ok(match predicate {
        Predicate::Eq { field, value } => Compiled::Eq(field, value),
        Predicate::Matches { field, pattern } => Compiled::Matches(
            field,
            RegexBuilder::new(pattern).case_insensitive(true).build()?,
        ),
        Predicate::Range { field, min, max } => Compiled::Range(field, *min, *max),
        Predicate::BoundingBox {
            field,
            lat_min,
            lat_max,
            lng_min,
            lng_max,
        } => Compiled::BoundingBox(field, [*lat_min, *lat_max, *lng_min, *lng_max]),
        Predicate::AnyOf(inner) => {
            Compiled::AnyOf(inner.iter().map(compile).collect::<Result<_, _>>()?)
        }
    })
}

impl Compiled<'_> {
    fn test<T: Document>(&self, document: &T) -> bool {
        match self {
            Self::Eq(field, expected) => document
                .field(field)
                .is_some_and(|actual| actual.matches(expected)),
            Self::Matches(field, regex) => document
                .field(field)
                .and_then(|v| v.as_str().map(|s| regex.is_match(s)))
                .unwrap_or(false),
            Self::Range(field, min, max) => {
                document
                    .field(field)
                    .and_then(|v| v.as_f64())
                    .is_some_and(|n| {
                        min.is_none_or(|min| n >= min) && max.is_none_or(|max| n <= max)
                    })
            }
            Self::BoundingBox(field, [lat_min, lat_max, lng_min, lng_max]) => {
                match document.field(field) {
                    Some(Value::Coords(coords)) if coords.len() == 2 => {
                        (*lat_min..=*lat_max).contains(&coords[0])
                            && (*lng_min..=*lng_max).contains(&coords[1])
                    }
                    _ => false,
                }
            }
            Self::AnyOf(inner) => inner.iter().any(|p| p.test(document)),
        }
    }
}

fn compile_filter(filter: &FilterSpec) -> Result<Vec<Compiled<'_>>, StorageError> {
    filter.predicates.iter().map(compile).collect()
}

fn order<T: Document>(a: &T, b: &T, sort: &SortSpec) -> Ordering {
    // Missing values sort as the largest, like NULLs in Postgres.
    let ordering = match (a.field(sort.field), b.field(sort.field)) {
        (Some(x), Some(y)) => x.compare(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.id().cmp(&b.id()));

    match sort.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

#[async_trait]
impl<T: Document> DocumentStore<T> for MemoryStore<T> {
    async fn find(
        &self,
        filter: &FilterSpec,
        sort: &SortSpec,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<T>, StorageError> {
        let predicates = compile_filter(filter)?;
        let documents = self.documents.read().await;

        let mut matching: Vec<&T> = documents
            .values()
            .filter(|d| predicates.iter().all(|p| p.test(*d)))
            .collect();
        matching.sort_by(|a, b| order(*a, *b, sort));

        Ok(matching
            .into_iter()
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &FilterSpec) -> Result<u64, StorageError> {
        let predicates = compile_filter(filter)?;
        let documents = self.documents.read().await;

        Ok(documents
            .values()
            .filter(|d| predicates.iter().all(|p| p.test(*d)))
            .count() as u64)
    }

    async fn get(&self, id: Uuid) -> Result<Option<T>, StorageError> {
        Ok(self.documents.read().await.get(&id).cloned())
    }

    async fn insert(&self, document: T) -> Result<T, StorageError> {
        let mut documents = self.documents.write().await;
        if documents.contains_key(&document.id()) {
            return Err(StorageError::Backend(format!(
                "duplicate id {}",
                document.id()
            )));
        }
        documents.insert(document.id(), document.clone());
        Ok(document)
    }

    async fn replace(&self, document: T) -> Result<Option<T>, StorageError> {
        let mut documents = self.documents.write().await;
        match documents.get_mut(&document.id()) {
            Some(existing) => {
                *existing = document.clone();
                Ok(Some(document))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StorageError> {
        Ok(self.documents.write().await.remove(&id).is_some())
    }

    async fn delete_many(&self, filter: &FilterSpec) -> Result<u64, StorageError> {
        let predicates = compile_filter(filter)?;
        let mut documents = self.documents.write().await;
        let before = documents.len();
        documents.retain(|_, d| !predicates.iter().all(|p| p.test(d)));
        Ok((before - documents.len()) as u64)
    }

    async fn increment(&self, id: Uuid, field: &'static str) -> Result<Option<T>, StorageError> {
        let mut documents = self.documents.write().await;
        let Some(document) = documents.get_mut(&id) else {
            return Ok(None);
        };
        if !document.increment(field) {
            return Err(StorageError::Backend(format!("{field} is not a counter")));
        }
        document.touch(Utc::now());
        Ok(Some(document.clone()))
    }
}
