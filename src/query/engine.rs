//! Translates a flat query string into a [`FilterSpec`], a [`SortSpec`] and
//! a [`Pagination`] window, driven by a static per-entity descriptor.
//!
//! Every malformed value degrades to "absent" except identifier filters,
//! which reject the whole request.

use std::collections::HashMap;

use tracing::debug;
use uuid::Uuid;

use crate::{
    query::{
        filter::{FilterSpec, Predicate, SortDirection, SortSpec},
        pagination::Pagination,
        params::{parse_bool, parse_number, parse_text},
    },
    storage::Value,
    utilities::errors::AppError,
};

/// Kilometres per degree of latitude.
pub const KM_PER_DEGREE: f64 = 111.32;

/// Floor for `|cos(lat)|` so the longitude delta stays finite near the poles.
const MIN_COS_LAT: f64 = 0.01;

/// `{param}_min` / `{param}_max` constrain `field`.
#[derive(Debug)]
pub struct RangeField {
    pub param: &'static str,
    pub field: &'static str,
}

#[derive(Debug)]
pub struct IdField {
    pub param: &'static str,
    pub field: &'static str,
    /// Used in the 400 message, e.g. "Invalid category id".
    pub label: &'static str,
}

/// Public `sortBy` name and the storage field it maps to.
#[derive(Debug)]
pub struct SortField {
    pub name: &'static str,
    pub field: &'static str,
}

#[derive(Debug)]
pub struct ListingDescriptor {
    /// OR-ed substring targets of `q`.
    pub search_fields: &'static [&'static str],
    /// Case-insensitive whole-value match.
    pub exact_text_fields: &'static [&'static str],
    /// Raw equality; values are not checked against the enumeration.
    pub enum_fields: &'static [&'static str],
    pub boolean_fields: &'static [&'static str],
    pub range_fields: &'static [RangeField],
    pub id_fields: &'static [IdField],
    pub coords_field: &'static str,
    pub sort_fields: &'static [SortField],
    pub default_sort: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListingQuery {
    pub filter: FilterSpec,
    pub sort: SortSpec,
    pub pagination: Pagination,
}

impl ListingQuery {
    pub fn from_params(
        descriptor: &ListingDescriptor,
        params: &HashMap<String, String>,
    ) -> Result<Self, AppError> {
        let get = |key: &str| params.get(key).map(String::as_str);
        let mut filter = FilterSpec::new();

        if let Some(q) = parse_text(get("q")) {
            filter.push(Predicate::AnyOf(
                descriptor
                    .search_fields
                    .iter()
                    .map(|&field| Predicate::contains(field, q))
                    .collect(),
            ));
        }

        for id_field in descriptor.id_fields {
            if let Some(raw) = parse_text(get(id_field.param)) {
                let id =
                    Uuid::parse_str(raw).map_err(|_| AppError::invalid_id(id_field.label))?;
                filter.push(Predicate::Eq {
                    field: id_field.field,
                    value: Value::Id(id),
                });
            }
        }

        for &field in descriptor.boolean_fields {
            if let Some(flag) = parse_bool(get(field)) {
                filter.push(Predicate::Eq {
                    field,
                    value: Value::Bool(flag),
                });
            }
        }

        for &field in descriptor.enum_fields {
            if let Some(value) = parse_text(get(field)) {
                filter.push(Predicate::Eq {
                    field,
                    value: Value::Text(value.to_string()),
                });
            }
        }

        for &field in descriptor.exact_text_fields {
            if let Some(value) = parse_text(get(field)) {
                filter.push(Predicate::equals_ignore_case(field, value));
            }
        }

        for range in descriptor.range_fields {
            let min = parse_number(get(&format!("{}_min", range.param)));
            let max = parse_number(get(&format!("{}_max", range.param)));
            if min.is_some() || max.is_some() {
                filter.push(Predicate::Range {
                    field: range.field,
                    min,
                    max,
                });
            }
        }

        if let Some(bbox) = bounding_box(
            descriptor.coords_field,
            parse_number(get("lat")),
            parse_number(get("lng")),
            parse_number(get("radius_km")),
        ) {
            filter.push(bbox);
        }

        let sort = SortSpec {
            field: get("sortBy")
                .and_then(|name| descriptor.sort_fields.iter().find(|s| s.name == name))
                .map_or(descriptor.default_sort, |s| s.field),
            direction: match get("sortDir") {
                Some(dir) if dir.trim().eq_ignore_ascii_case("asc") => SortDirection::Asc,
                _ => SortDirection::Desc,
            },
        };

        let pagination = Pagination::from_params(params);

        debug!(
            predicates = filter.predicates.len(),
            sort_field = sort.field,
            page = pagination.page,
            limit = pagination.limit,
            "translated listing query"
        );

        Ok(Self {
            filter,
            sort,
            pagination,
        })
    }
}

/// Rectangle approximating a radius search around `(lat, lng)`.
pub fn bounding_box(
    field: &'static str,
    lat: Option<f64>,
    lng: Option<f64>,
    radius_km: Option<f64>,
) -> Option<Predicate> {
    let (lat, lng, radius_km) = (lat?, lng?, radius_km?);
    if radius_km <= 0.0 {
        return None;
    }

    let lat_delta = radius_km / KM_PER_DEGREE;
    let lng_delta = radius_km / (KM_PER_DEGREE * lat.to_radians().cos().abs().max(MIN_COS_LAT));

    Some(Predicate::BoundingBox {
        field,
        lat_min: lat - lat_delta,
        lat_max: lat + lat_delta,
        lng_min: lng - lng_delta,
        lng_max: lng + lng_delta,
    })
}
