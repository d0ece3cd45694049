use serde::Deserialize;
use validator::Validate;

use crate::features::{
    schemas::{validate_coords, validate_not_blank},
    vehicles::models::{Condition, FuelType, ListingType, PaymentOption},
};

#[derive(Deserialize, Validate, Default, Debug)]
#[serde(default)]
pub struct VehicleListingIn {
    pub listing_type: Option<ListingType>,
    #[validate(custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    pub images: Option<Vec<String>>,
    #[validate(custom(function = "validate_not_blank"))]
    pub price: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    pub description: Option<String>,
    pub category: Option<String>,
    #[validate(custom(function = "validate_coords"))]
    pub coords: Option<Vec<f64>>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub version: Option<String>,
    pub condition: Option<Condition>,
    #[validate(range(min = 0.0, message = "kilometers must not be negative"))]
    pub kilometers: Option<f64>,
    #[validate(range(min = 1886, max = 2100, message = "year is out of range"))]
    pub year: Option<i64>,
    pub fuel_type: Option<FuelType>,
    pub transmission_type: Option<String>,
    pub body_type: Option<String>,
    pub power: Option<f64>,
    pub consumption: Option<f64>,
    pub air_conditioning: Option<String>,
    pub color: Option<String>,
    #[validate(range(min = 1, message = "number_of_seats must be positive"))]
    pub number_of_seats: Option<i64>,
    #[validate(range(min = 0, message = "number_of_doors must not be negative"))]
    pub number_of_doors: Option<i64>,
    pub interior: Option<String>,
    pub accessory_type: Option<String>,
    pub compatibility: Option<Vec<String>>,
    #[validate(range(min = 0, message = "warranty_months must not be negative"))]
    pub warranty_months: Option<i64>,
    pub payment_option: Option<PaymentOption>,
    pub extra_features: Option<Vec<String>>,
    pub is_featured: Option<bool>,
    pub is_sponsored: Option<bool>,
    pub is_listed: Option<bool>,
    pub on_sale: Option<bool>,
    #[validate(range(min = 0, message = "number_of_views must not be negative"))]
    pub number_of_views: Option<i64>,
    pub user_id: Option<String>,
}
