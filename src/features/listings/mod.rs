//! Handlers shared by every listing kind. Each kind plugs in through the
//! [`Listing`] trait: its query descriptor, its input schema and how an
//! input becomes or updates a stored document.

pub mod handlers;

use axum::{
    Router,
    extract::FromRef,
    routing::{get, patch},
};
use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;
use validator::Validate;

use crate::{
    query::ListingDescriptor,
    storage::{Document, Store},
    utilities::{app_state::AppState, errors::AppError},
};

pub const VIEWS_FIELD: &str = "number_of_views";

pub trait Listing: Document + Serialize {
    /// Request body for both creation and partial updates.
    type Input: DeserializeOwned + Validate + Send + 'static;

    /// Lowercase singular, e.g. "property listing".
    const NAME: &'static str;
    /// Capitalized singular, e.g. "Property listing".
    const TITLE: &'static str;

    fn descriptor() -> &'static ListingDescriptor;

    fn create(input: Self::Input, id: Uuid, now: DateTime<Utc>) -> Result<Self, AppError>;

    /// Applies the fields present in `input` and re-checks cross-field rules.
    fn apply(&mut self, input: Self::Input) -> Result<(), AppError>;
}

pub fn routes<L: Listing>(path: &str) -> Router<AppState>
where
    Store<L>: FromRef<AppState>,
{
    Router::new()
        .route(
            path,
            get(handlers::get_many_listings_handler::<L>)
                .post(handlers::create_listing_handler::<L>),
        )
        .route(
            &format!("{path}/{{id}}"),
            get(handlers::get_one_listing_handler::<L>)
                .put(handlers::update_listing_handler::<L>)
                .delete(handlers::delete_listing_handler::<L>),
        )
        .route(
            &format!("{path}/{{id}}/views"),
            patch(handlers::increment_views_handler::<L>),
        )
}

/// Implements [`EnumLabel`](crate::storage::EnumLabel) for a fieldless enum.
macro_rules! enum_labels {
    ($ty:ty, $type_name:literal, { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl crate::storage::EnumLabel for $ty {
            const TYPE_NAME: &'static str = $type_name;

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }
    };
}

pub(crate) use enum_labels;
