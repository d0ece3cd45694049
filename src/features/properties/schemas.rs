use serde::Deserialize;
use validator::Validate;

use crate::features::{
    properties::models::{AgentType, RentalPayment},
    schemas::{validate_coords, validate_not_blank},
};

/// Body of `POST` and `PUT`. Every field is optional here; creation decides
/// which ones are required.
#[derive(Deserialize, Validate, Default, Debug)]
#[serde(default)]
pub struct PropertyListingIn {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    pub images: Option<Vec<String>>,
    pub three_sixty: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    pub price: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    pub description: Option<String>,
    pub category: Option<String>,
    #[validate(custom(function = "validate_coords"))]
    pub coords: Option<Vec<f64>>,
    #[validate(range(min = 0, message = "bedrooms must not be negative"))]
    pub bedrooms: Option<i64>,
    #[validate(range(min = 0, message = "bathrooms must not be negative"))]
    pub bathrooms: Option<i64>,
    #[validate(range(min = 0.0, message = "space must not be negative"))]
    pub space: Option<f64>,
    pub extra_features: Option<Vec<String>>,
    pub is_featured: Option<bool>,
    pub is_sponsored: Option<bool>,
    pub is_listed: Option<bool>,
    pub on_sale: Option<bool>,
    pub is_rent: Option<bool>,
    #[validate(range(min = 0, message = "number_of_views must not be negative"))]
    pub number_of_views: Option<i64>,
    pub agent_type: Option<AgentType>,
    pub rental_payment: Option<RentalPayment>,
    pub user_id: Option<String>,
}
