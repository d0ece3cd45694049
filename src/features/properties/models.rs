use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

use crate::{
    features::listings::{VIEWS_FIELD, enum_labels},
    query::engine::{IdField, ListingDescriptor, RangeField, SortField},
    storage::{Document, EnumLabel, Value},
};

#[derive(Type, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "agent_type", rename_all = "lowercase")]
pub enum AgentType {
    #[default]
    Owner,
    Middleman,
}

enum_labels!(AgentType, "agent_type", { Owner => "owner", Middleman => "middleman" });

#[derive(Type, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "rental_payment", rename_all = "lowercase")]
pub enum RentalPayment {
    Daily,
    Monthly,
    Yearly,
}

enum_labels!(RentalPayment, "rental_payment", {
    Daily => "daily",
    Monthly => "monthly",
    Yearly => "yearly",
});

#[derive(FromRow, Serialize, Clone, PartialEq, Debug)]
pub struct PropertyListing {
    pub id: Uuid,
    pub name: String,
    pub images: Vec<String>,
    pub three_sixty: Option<String>,
    pub price: String,
    pub description: String,
    pub category: Uuid,
    /// `[lat, lng]`
    pub coords: Vec<f64>,
    pub bedrooms: i64,
    pub bathrooms: i64,
    pub space: f64,
    pub extra_features: Vec<String>,
    pub is_featured: bool,
    pub is_sponsored: bool,
    pub is_listed: bool,
    pub on_sale: bool,
    pub is_rent: bool,
    pub number_of_views: i64,
    pub agent_type: AgentType,
    pub rental_payment: Option<RentalPayment>,
    pub user_id: Uuid,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Document for PropertyListing {
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "images",
        "three_sixty",
        "price",
        "description",
        "category",
        "coords",
        "bedrooms",
        "bathrooms",
        "space",
        "extra_features",
        "is_featured",
        "is_sponsored",
        "is_listed",
        "on_sale",
        "is_rent",
        "number_of_views",
        "agent_type",
        "rental_payment",
        "user_id",
        "created_at",
        "updated_at",
    ];

    fn id(&self) -> Uuid {
        self.id
    }

    fn field(&self, name: &str) -> Option<Value> {
        let value = match name {
            "id" => self.id.into(),
            "name" => self.name.as_str().into(),
            "images" => self.images.clone().into(),
            "three_sixty" => return self.three_sixty.as_deref().map(Value::from),
            "price" => self.price.as_str().into(),
            "description" => self.description.as_str().into(),
            "category" => self.category.into(),
            "coords" => Value::Coords(self.coords.clone()),
            "bedrooms" => self.bedrooms.into(),
            "bathrooms" => self.bathrooms.into(),
            "space" => self.space.into(),
            "extra_features" => self.extra_features.clone().into(),
            "is_featured" => self.is_featured.into(),
            "is_sponsored" => self.is_sponsored.into(),
            "is_listed" => self.is_listed.into(),
            "on_sale" => self.on_sale.into(),
            "is_rent" => self.is_rent.into(),
            "number_of_views" => self.number_of_views.into(),
            "agent_type" => self.agent_type.value(),
            "rental_payment" => return self.rental_payment.map(EnumLabel::value),
            "user_id" => self.user_id.into(),
            "created_at" => self.created_at.into(),
            "updated_at" => self.updated_at.into(),
            _ => return None,
        };
        Some(value)
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn increment(&mut self, field: &str) -> bool {
        if field != VIEWS_FIELD {
            return false;
        }
        self.number_of_views += 1;
        true
    }
}

pub static PROPERTY_DESCRIPTOR: ListingDescriptor = ListingDescriptor {
    search_fields: &["name", "description"],
    exact_text_fields: &[],
    enum_fields: &["agent_type", "rental_payment"],
    boolean_fields: &["is_featured", "is_sponsored", "is_listed", "on_sale", "is_rent"],
    range_fields: &[
        RangeField {
            param: "bedrooms",
            field: "bedrooms",
        },
        RangeField {
            param: "bathrooms",
            field: "bathrooms",
        },
        RangeField {
            param: "space",
            field: "space",
        },
    ],
    id_fields: &[
        IdField {
            param: "category",
            field: "category",
            label: "category",
        },
        IdField {
            param: "user_id",
            field: "user_id",
            label: "user_id",
        },
    ],
    coords_field: "coords",
    sort_fields: &[
        SortField {
            name: "createdAt",
            field: "created_at",
        },
        SortField {
            name: "updatedAt",
            field: "updated_at",
        },
        SortField {
            name: "number_of_views",
            field: "number_of_views",
        },
        SortField {
            name: "bedrooms",
            field: "bedrooms",
        },
        SortField {
            name: "bathrooms",
            field: "bathrooms",
        },
        SortField {
            name: "space",
            field: "space",
        },
    ],
    default_sort: "created_at",
};
