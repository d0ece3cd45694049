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
#[sqlx(type_name = "listing_type", rename_all = "lowercase")]
pub enum ListingType {
    #[default]
    Vehicle,
    Accessory,
}

enum_labels!(ListingType, "listing_type", { Vehicle => "vehicle", Accessory => "accessory" });

#[derive(Type, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "vehicle_condition", rename_all = "lowercase")]
pub enum Condition {
    #[default]
    New,
    Used,
}

enum_labels!(Condition, "vehicle_condition", { New => "new", Used => "used" });

#[derive(Type, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "fuel_type", rename_all = "lowercase")]
pub enum FuelType {
    Petrol,
    Diesel,
    Electric,
    Hybrid,
    Gas,
}

enum_labels!(FuelType, "fuel_type", {
    Petrol => "petrol",
    Diesel => "diesel",
    Electric => "electric",
    Hybrid => "hybrid",
    Gas => "gas",
});

#[derive(Type, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "payment_option", rename_all = "lowercase")]
pub enum PaymentOption {
    Cash,
    Installment,
}

enum_labels!(PaymentOption, "payment_option", { Cash => "cash", Installment => "installment" });

#[derive(FromRow, Serialize, Clone, PartialEq, Debug)]
pub struct VehicleListing {
    pub id: Uuid,
    pub listing_type: ListingType,
    pub name: String,
    pub images: Vec<String>,
    pub price: String,
    pub description: String,
    pub category: Uuid,
    /// `[lat, lng]`
    pub coords: Vec<f64>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub version: Option<String>,
    pub condition: Condition,
    pub kilometers: f64,
    pub year: Option<i64>,
    pub fuel_type: Option<FuelType>,
    pub transmission_type: Option<String>,
    pub body_type: Option<String>,
    pub power: Option<f64>,
    pub consumption: Option<f64>,
    pub air_conditioning: Option<String>,
    pub color: Option<String>,
    pub number_of_seats: Option<i64>,
    pub number_of_doors: Option<i64>,
    pub interior: Option<String>,
    pub accessory_type: Option<String>,
    pub compatibility: Vec<String>,
    pub warranty_months: Option<i64>,
    pub payment_option: PaymentOption,
    pub extra_features: Vec<String>,
    pub is_featured: bool,
    pub is_sponsored: bool,
    pub is_listed: bool,
    pub on_sale: bool,
    pub number_of_views: i64,
    pub user_id: Uuid,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

fn text(value: &Option<String>) -> Option<Value> {
    value.as_deref().map(Value::from)
}

impl Document for VehicleListing {
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "listing_type",
        "name",
        "images",
        "price",
        "description",
        "category",
        "coords",
        "brand",
        "model",
        "version",
        "condition",
        "kilometers",
        "year",
        "fuel_type",
        "transmission_type",
        "body_type",
        "power",
        "consumption",
        "air_conditioning",
        "color",
        "number_of_seats",
        "number_of_doors",
        "interior",
        "accessory_type",
        "compatibility",
        "warranty_months",
        "payment_option",
        "extra_features",
        "is_featured",
        "is_sponsored",
        "is_listed",
        "on_sale",
        "number_of_views",
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
            "listing_type" => self.listing_type.value(),
            "name" => self.name.as_str().into(),
            "images" => self.images.clone().into(),
            "price" => self.price.as_str().into(),
            "description" => self.description.as_str().into(),
            "category" => self.category.into(),
            "coords" => Value::Coords(self.coords.clone()),
            "brand" => return text(&self.brand),
            "model" => return text(&self.model),
            "version" => return text(&self.version),
            "condition" => self.condition.value(),
            "kilometers" => self.kilometers.into(),
            "year" => return self.year.map(Value::from),
            "fuel_type" => return self.fuel_type.map(EnumLabel::value),
            "transmission_type" => return text(&self.transmission_type),
            "body_type" => return text(&self.body_type),
            "power" => return self.power.map(Value::from),
            "consumption" => return self.consumption.map(Value::from),
            "air_conditioning" => return text(&self.air_conditioning),
            "color" => return text(&self.color),
            "number_of_seats" => return self.number_of_seats.map(Value::from),
            "number_of_doors" => return self.number_of_doors.map(Value::from),
            "interior" => return text(&self.interior),
            "accessory_type" => return text(&self.accessory_type),
            "compatibility" => self.compatibility.clone().into(),
            "warranty_months" => return self.warranty_months.map(Value::from),
            "payment_option" => self.payment_option.value(),
            "extra_features" => self.extra_features.clone().into(),
            "is_featured" => self.is_featured.into(),
            "is_sponsored" => self.is_sponsored.into(),
            "is_listed" => self.is_listed.into(),
            "on_sale" => self.on_sale.into(),
            "number_of_views" => self.number_of_views.into(),
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

pub static VEHICLE_DESCRIPTOR: ListingDescriptor = ListingDescriptor {
    search_fields: &["name", "description", "brand", "model", "color"],
    exact_text_fields: &["brand", "model"],
    enum_fields: &[
        "listing_type",
        "condition",
        "fuel_type",
        "transmission_type",
        "body_type",
        "payment_option",
    ],
    boolean_fields: &["is_featured", "is_sponsored", "is_listed", "on_sale"],
    range_fields: &[
        RangeField {
            param: "km",
            field: "kilometers",
        },
        RangeField {
            param: "year",
            field: "year",
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
            name: "kilometers",
            field: "kilometers",
        },
        SortField {
            name: "year",
            field: "year",
        },
    ],
    default_sort: "created_at",
};
