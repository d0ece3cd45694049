pub mod models;
pub mod schemas;

use axum::Router;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    features::{
        listings::{self, Listing},
        properties::{
            models::{PROPERTY_DESCRIPTOR, PropertyListing},
            schemas::PropertyListingIn,
        },
        schemas::{assign, optional_text, reference, required, required_text},
    },
    query::ListingDescriptor,
    utilities::{app_state::AppState, errors::AppError},
};

pub fn routes() -> Router<AppState> {
    listings::routes::<PropertyListing>("/api/v1/property-listings")
}

impl PropertyListing {
    fn check(&self) -> Result<(), AppError> {
        if self.is_rent && self.rental_payment.is_none() {
            return Err(AppError::ValidationError(
                "rental_payment is required when is_rent is true".to_string(),
            ));
        }
        Ok(())
    }
}

impl Listing for PropertyListing {
    type Input = PropertyListingIn;

    const NAME: &'static str = "property listing";
    const TITLE: &'static str = "Property listing";

    fn descriptor() -> &'static ListingDescriptor {
        &PROPERTY_DESCRIPTOR
    }

    fn create(input: Self::Input, id: Uuid, now: DateTime<Utc>) -> Result<Self, AppError> {
        let listing = Self {
            id,
            name: required_text("name", input.name)?,
            images: input.images.unwrap_or_default(),
            three_sixty: optional_text(input.three_sixty),
            price: required_text("price", input.price)?,
            description: required_text("description", input.description)?,
            category: reference("category", &required("category", input.category)?)?,
            coords: required("coords", input.coords)?,
            bedrooms: required("bedrooms", input.bedrooms)?,
            bathrooms: required("bathrooms", input.bathrooms)?,
            space: required("space", input.space)?,
            extra_features: input.extra_features.unwrap_or_default(),
            is_featured: required("is_featured", input.is_featured)?,
            is_sponsored: required("is_sponsored", input.is_sponsored)?,
            is_listed: required("is_listed", input.is_listed)?,
            on_sale: required("on_sale", input.on_sale)?,
            is_rent: required("is_rent", input.is_rent)?,
            number_of_views: input.number_of_views.unwrap_or(0),
            agent_type: input.agent_type.unwrap_or_default(),
            rental_payment: input.rental_payment,
            user_id: reference("user_id", &required("user_id", input.user_id)?)?,
            created_at: now,
            updated_at: now,
        };
        listing.check()?;
        Ok(listing)
    }

    fn apply(&mut self, input: Self::Input) -> Result<(), AppError> {
        assign(&mut self.name, optional_text(input.name));
        assign(&mut self.images, input.images);
        if let Some(three_sixty) = input.three_sixty {
            self.three_sixty = optional_text(Some(three_sixty));
        }
        assign(&mut self.price, optional_text(input.price));
        assign(&mut self.description, optional_text(input.description));
        if let Some(category) = input.category {
            self.category = reference("category", &category)?;
        }
        assign(&mut self.coords, input.coords);
        assign(&mut self.bedrooms, input.bedrooms);
        assign(&mut self.bathrooms, input.bathrooms);
        assign(&mut self.space, input.space);
        assign(&mut self.extra_features, input.extra_features);
        assign(&mut self.is_featured, input.is_featured);
        assign(&mut self.is_sponsored, input.is_sponsored);
        assign(&mut self.is_listed, input.is_listed);
        assign(&mut self.on_sale, input.on_sale);
        assign(&mut self.is_rent, input.is_rent);
        assign(&mut self.agent_type, input.agent_type);
        if input.rental_payment.is_some() {
            self.rental_payment = input.rental_payment;
        }
        if let Some(user_id) = input.user_id {
            self.user_id = reference("user_id", &user_id)?;
        }
        self.check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::properties::models::RentalPayment;

    fn input() -> PropertyListingIn {
        PropertyListingIn {
            name: Some(" Sea view flat ".to_string()),
            price: Some("250000".to_string()),
            description: Some("Three rooms".to_string()),
            category: Some(Uuid::new_v4().to_string()),
            coords: Some(vec![33.9, 35.5]),
            bedrooms: Some(3),
            bathrooms: Some(2),
            space: Some(140.0),
            is_featured: Some(false),
            is_sponsored: Some(false),
            is_listed: Some(true),
            on_sale: Some(true),
            is_rent: Some(false),
            user_id: Some(Uuid::new_v4().to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn creation_applies_defaults_and_trims() {
        let now = Utc::now();
        let listing = PropertyListing::create(input(), Uuid::new_v4(), now).unwrap();
        assert_eq!(listing.name, "Sea view flat");
        assert_eq!(listing.number_of_views, 0);
        assert_eq!(listing.agent_type, Default::default());
        assert_eq!(listing.created_at, now);
        assert!(listing.images.is_empty());
    }

    #[test]
    fn creation_requires_flags_and_valid_references() {
        let error = PropertyListing::create(
            PropertyListingIn {
                is_listed: None,
                ..input()
            },
            Uuid::new_v4(),
            Utc::now(),
        )
        .unwrap_err();
        assert_eq!(error.to_string(), "is_listed is required");

        let error = PropertyListing::create(
            PropertyListingIn {
                category: Some("abc".to_string()),
                ..input()
            },
            Uuid::new_v4(),
            Utc::now(),
        )
        .unwrap_err();
        assert_eq!(error.to_string(), "category is invalid");
    }

    #[test]
    fn renting_requires_a_payment_period() {
        let rent = PropertyListingIn {
            is_rent: Some(true),
            ..input()
        };
        assert!(PropertyListing::create(rent, Uuid::new_v4(), Utc::now()).is_err());

        let rent = PropertyListingIn {
            is_rent: Some(true),
            rental_payment: Some(RentalPayment::Monthly),
            ..input()
        };
        assert!(PropertyListing::create(rent, Uuid::new_v4(), Utc::now()).is_ok());
    }

    #[test]
    fn patches_only_touch_provided_fields() {
        let mut listing = PropertyListing::create(input(), Uuid::new_v4(), Utc::now()).unwrap();
        let before = listing.clone();

        listing
            .apply(PropertyListingIn {
                bedrooms: Some(4),
                number_of_views: Some(999),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(listing.bedrooms, 4);
        assert_eq!(listing.number_of_views, before.number_of_views);
        assert_eq!(listing.name, before.name);

        let error = listing
            .apply(PropertyListingIn {
                is_rent: Some(true),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(error.to_string(), "rental_payment is required when is_rent is true");
    }
}
