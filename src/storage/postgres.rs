use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, postgres::PgRow};
use tracing::debug;
use uuid::Uuid;

use crate::{
    query::{FilterSpec, Predicate, SortSpec},
    storage::{Document, DocumentStore, StorageError, Value},
};

/// A table of `T` rows. Column names only ever come from static descriptors
/// and `Document::columns`, so they are pushed into the SQL unquoted.
pub struct PgStore<T> {
    pool: PgPool,
    table: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> PgStore<T> {
    pub fn new(pool: PgPool, table: &'static str) -> Self {
        Self {
            pool,
            table,
            _marker: PhantomData,
        }
    }
}

fn push_value(qb: &mut QueryBuilder<'_, Postgres>, value: Value) {
    match value {
        Value::Text(text) => {
            qb.push_bind(text);
        }
        Value::Number(number) => {
            qb.push_bind(number);
        }
        Value::Integer(number) => {
            qb.push_bind(number);
        }
        Value::Bool(flag) => {
            qb.push_bind(flag);
        }
        Value::Id(id) => {
            qb.push_bind(id);
        }
        Value::Timestamp(at) => {
            qb.push_bind(at);
        }
        Value::Coords(coords) => {
            qb.push_bind(coords);
        }
        Value::List(items) => {
            qb.push_bind(items);
        }
        Value::Enum { type_name, label } => {
            qb.push_bind(label).push("::").push(type_name);
        }
        Value::Null => {
            qb.push("NULL");
        }
    }
}

fn push_predicate(qb: &mut QueryBuilder<'_, Postgres>, predicate: &Predicate) {
    match predicate {
        // Text equality goes through ::text so enum columns compare by label
        // and unknown labels match nothing instead of failing the cast.
        Predicate::Eq {
            field,
            value: Value::Text(text),
        } => {
            qb.push(*field).push("::text = ").push_bind(text.clone());
        }
        Predicate::Eq {
            field,
            value: Value::Null,
        } => {
            qb.push(*field).push(" IS NULL");
        }
        Predicate::Eq { field, value } => {
            qb.push(*field).push(" = ");
            push_value(qb, value.clone());
        }
        Predicate::Matches { field, pattern } => {
            qb.push(*field).push("::text ~* ").push_bind(pattern.clone());
        }
        Predicate::Range { field, min, max } => match (min, max) {
            (Some(min), Some(max)) => {
                qb.push("(")
                    .push(*field)
                    .push(" >= ")
                    .push_bind(*min)
                    .push(" AND ")
                    .push(*field)
                    .push(" <= ")
                    .push_bind(*max)
                    .push(")");
            }
            (Some(min), None) => {
                qb.push(*field).push(" >= ").push_bind(*min);
            }
            (None, Some(max)) => {
                qb.push(*field).push(" <= ").push_bind(*max);
            }
            (None, None) => {
                qb.push("TRUE");
            }
        },
        Predicate::BoundingBox {
            field,
            lat_min,
            lat_max,
            lng_min,
            lng_max,
        } => {
            qb.push("(")
                .push(*field)
                .push("[1] BETWEEN ")
                .push_bind(*lat_min)
                .push(" AND ")
                .push_bind(*lat_max)
                .push(" AND ")
                .push(*field)
                .push("[2] BETWEEN ")
                .push_bind(*lng_min)
                .push(" AND ")
                .push_bind(*lng_max)
                .push(")");
        }
        Predicate::AnyOf(alternatives) if alternatives.is_empty() => {
            qb.push("FALSE");
        }
        Predicate::AnyOf(alternatives) => {
            qb.push("(");
            for (i, alternative) in alternatives.iter().enumerate() {
                if i > 0 {
                    qb.push(" OR ");
                }
                push_predicate(qb, alternative);
            }
            qb.push(")");
        }
    }
}

pub(crate) fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &FilterSpec) {
    for (i, predicate) in filter.predicates.iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        push_predicate(qb, predicate);
    }
}

pub(crate) fn select_query(
    table: &str,
    filter: &FilterSpec,
    sort: &SortSpec,
    skip: u64,
    limit: u64,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT * FROM {table}"));
    push_filter(&mut qb, filter);

    let direction = sort.direction.as_sql();
    qb.push(format!(
        " ORDER BY {} {direction}, id {direction}",
        sort.field
    ));
    qb.push(" OFFSET ")
        .push_bind(bigint(skip))
        .push(" LIMIT ")
        .push_bind(bigint(limit));
    qb
}

/// `OFFSET` and `LIMIT` are signed; larger values saturate instead of wrapping.
fn bigint(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

pub(crate) fn count_query(table: &str, filter: &FilterSpec) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT COUNT(*) FROM {table}"));
    push_filter(&mut qb, filter);
    qb
}

pub(crate) fn insert_query(table: &str, columns: Vec<(&'static str, Value)>) -> QueryBuilder<'static, Postgres> {
    let names = columns
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ");

    let mut qb = QueryBuilder::new(format!("INSERT INTO {table} ({names}) VALUES ("));
    for (i, (_, value)) in columns.into_iter().enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        push_value(&mut qb, value);
    }
    qb.push(") RETURNING *");
    qb
}

pub(crate) fn update_query(
    table: &str,
    id: Uuid,
    columns: Vec<(&'static str, Value)>,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("UPDATE {table} SET "));
    let assignments = columns
        .into_iter()
        .filter(|(name, _)| !matches!(*name, "id" | "created_at"));

    for (i, (name, value)) in assignments.enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        qb.push(name).push(" = ");
        push_value(&mut qb, value);
    }
    qb.push(" WHERE id = ").push_bind(id).push(" RETURNING *");
    qb
}

#[async_trait]
impl<T> DocumentStore<T> for PgStore<T>
where
    T: Document + for<'r> FromRow<'r, PgRow>,
{
    async fn find(
        &self,
        filter: &FilterSpec,
        sort: &SortSpec,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<T>, StorageError> {
        let mut qb = select_query(self.table, filter, sort, skip, limit);
        debug!(sql = qb.sql(), "find");

        Ok(qb.build_query_as::<T>().fetch_all(&self.pool).await?)
    }

    async fn count(&self, filter: &FilterSpec) -> Result<u64, StorageError> {
        let mut qb = count_query(self.table, filter);
        let total = qb.build_query_scalar::<i64>().fetch_one(&self.pool).await?;

        Ok(total.max(0) as u64)
    }

    async fn get(&self, id: Uuid) -> Result<Option<T>, StorageError> {
        let mut qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new(format!("SELECT * FROM {} WHERE id = ", self.table));
        qb.push_bind(id);

        Ok(qb.build_query_as::<T>().fetch_optional(&self.pool).await?)
    }

    async fn insert(&self, document: T) -> Result<T, StorageError> {
        let mut qb = insert_query(self.table, document.columns());

        Ok(qb.build_query_as::<T>().fetch_one(&self.pool).await?)
    }

    async fn replace(&self, document: T) -> Result<Option<T>, StorageError> {
        let mut qb = update_query(self.table, document.id(), document.columns());

        Ok(qb.build_query_as::<T>().fetch_optional(&self.pool).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StorageError> {
        let mut qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new(format!("DELETE FROM {} WHERE id = ", self.table));
        qb.push_bind(id);

        Ok(qb.build().execute(&self.pool).await?.rows_affected() > 0)
    }

    async fn delete_many(&self, filter: &FilterSpec) -> Result<u64, StorageError> {
        let mut qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new(format!("DELETE FROM {}", self.table));
        push_filter(&mut qb, filter);

        Ok(qb.build().execute(&self.pool).await?.rows_affected())
    }

    async fn increment(&self, id: Uuid, field: &'static str) -> Result<Option<T>, StorageError> {
        let mut qb: QueryBuilder<'_, Postgres> = QueryBuilder::new(format!(
            "UPDATE {table} SET {field} = {field} + 1, updated_at = now() WHERE id = ",
            table = self.table
        ));
        qb.push_bind(id).push(" RETURNING *");

        Ok(qb.build_query_as::<T>().fetch_optional(&self.pool).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{SortDirection, engine::bounding_box};

    #[test]
    fn offsets_beyond_bigint_saturate() {
        assert_eq!(bigint(40), 40);
        assert_eq!(bigint(i64::MAX as u64), i64::MAX);
        assert_eq!(bigint(9_999_999_999_999_999_900), i64::MAX);
        assert_eq!(bigint(u64::MAX), i64::MAX);
    }

    #[test]
    fn empty_filter_selects_everything_newest_first() {
        let qb = select_query("items", &FilterSpec::new(), &SortSpec::newest_first(), 0, 20);
        assert_eq!(
            qb.sql(),
            "SELECT * FROM items ORDER BY created_at DESC, id DESC OFFSET $1 LIMIT $2"
        );
    }

    #[test]
    fn predicates_are_and_combined_with_placeholders() {
        let filter = FilterSpec::new()
            .and(Predicate::AnyOf(vec![
                Predicate::contains("name", "flat"),
                Predicate::contains("description", "flat"),
            ]))
            .and(Predicate::Eq {
                field: "is_rent",
                value: Value::Bool(true),
            })
            .and(Predicate::Eq {
                field: "agent_type",
                value: Value::Text("owner".to_string()),
            })
            .and(Predicate::Range {
                field: "bedrooms",
                min: Some(2.0),
                max: Some(4.0),
            });
        let sort = SortSpec {
            field: "bedrooms",
            direction: SortDirection::Asc,
        };

        let qb = select_query("property_listings", &filter, &sort, 40, 20);
        assert_eq!(
            qb.sql(),
            "SELECT * FROM property_listings \
             WHERE (name::text ~* $1 OR description::text ~* $2) \
             AND is_rent = $3 \
             AND agent_type::text = $4 \
             AND (bedrooms >= $5 AND bedrooms <= $6) \
             ORDER BY bedrooms ASC, id ASC OFFSET $7 LIMIT $8"
        );
    }

    #[test]
    fn one_sided_ranges_and_empty_disjunctions() {
        let filter = FilterSpec::new()
            .and(Predicate::Range {
                field: "year",
                min: None,
                max: Some(2020.0),
            })
            .and(Predicate::AnyOf(Vec::new()));

        let qb = count_query("vehicle_listings", &filter);
        assert_eq!(
            qb.sql(),
            "SELECT COUNT(*) FROM vehicle_listings WHERE year <= $1 AND FALSE"
        );
    }

    #[test]
    fn bounding_box_indexes_the_coordinate_array() {
        let bbox = bounding_box("coords", Some(33.9), Some(35.5), Some(10.0)).unwrap();
        let qb = count_query("property_listings", &FilterSpec::new().and(bbox));
        assert_eq!(
            qb.sql(),
            "SELECT COUNT(*) FROM property_listings \
             WHERE (coords[1] BETWEEN $1 AND $2 AND coords[2] BETWEEN $3 AND $4)"
        );
    }

    #[test]
    fn insert_casts_enums_and_inlines_nulls() {
        let columns = vec![
            ("id", Value::Id(Uuid::new_v4())),
            ("name", Value::Text("Flat".to_string())),
            (
                "agent_type",
                Value::Enum {
                    type_name: "agent_type",
                    label: "owner",
                },
            ),
            ("rental_payment", Value::Null),
        ];

        let qb = insert_query("property_listings", columns);
        assert_eq!(
            qb.sql(),
            "INSERT INTO property_listings (id, name, agent_type, rental_payment) \
             VALUES ($1, $2, $3::agent_type, NULL) RETURNING *"
        );
    }

    #[test]
    fn update_skips_identity_and_creation_time() {
        let id = Uuid::new_v4();
        let columns = vec![
            ("id", Value::Id(id)),
            ("title", Value::Text("Cars".to_string())),
            ("created_at", Value::Timestamp(chrono::Utc::now())),
            ("updated_at", Value::Timestamp(chrono::Utc::now())),
        ];

        let qb = update_query("vehicle_categories", id, columns);
        assert_eq!(
            qb.sql(),
            "UPDATE vehicle_categories SET title = $1, updated_at = $2 WHERE id = $3 RETURNING *"
        );
    }
}
