pub mod models;
pub mod schemas;

use axum::Router;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    features::{
        listings::{self, Listing},
        schemas::{assign, optional_text, reference, required, required_text},
        vehicles::{
            models::{ListingType, VEHICLE_DESCRIPTOR, VehicleListing},
            schemas::VehicleListingIn,
        },
    },
    query::ListingDescriptor,
    utilities::{app_state::AppState, errors::AppError},
};

pub fn routes() -> Router<AppState> {
    listings::routes::<VehicleListing>("/api/v1/vehicle-listings")
}

fn patch_text(target: &mut Option<String>, value: Option<String>) {
    if value.is_some() {
        *target = optional_text(value);
    }
}

impl VehicleListing {
    /// Attributes a listing must carry given its `listing_type`.
    fn check(&self) -> Result<(), AppError> {
        let (kind, present) = match self.listing_type {
            ListingType::Vehicle => (
                "vehicle",
                vec![
                    ("brand", self.brand.is_some()),
                    ("model", self.model.is_some()),
                    ("year", self.year.is_some()),
                    ("fuel_type", self.fuel_type.is_some()),
                    ("transmission_type", self.transmission_type.is_some()),
                    ("body_type", self.body_type.is_some()),
                    ("air_conditioning", self.air_conditioning.is_some()),
                    ("color", self.color.is_some()),
                    ("number_of_seats", self.number_of_seats.is_some()),
                    ("number_of_doors", self.number_of_doors.is_some()),
                    ("interior", self.interior.is_some()),
                ],
            ),
            ListingType::Accessory => (
                "accessory",
                vec![("accessory_type", self.accessory_type.is_some())],
            ),
        };

        match present.into_iter().find(|(_, present)| !present) {
            Some((field, _)) => Err(AppError::ValidationError(format!(
                "{field} is required for {kind} listings"
            ))),
            None => Ok(()),
        }
    }
}

impl Listing for VehicleListing {
    type Input = VehicleListingIn;

    const NAME: &'static str = "vehicle listing";
    const TITLE: &'static str = "Vehicle listing";

    fn descriptor() -> &'static ListingDescriptor {
        &VEHICLE_DESCRIPTOR
    }

    fn create(input: Self::Input, id: Uuid, now: DateTime<Utc>) -> Result<Self, AppError> {
        let listing = Self {
            id,
            listing_type: input.listing_type.unwrap_or_default(),
            name: required_text("name", input.name)?,
            images: input.images.unwrap_or_default(),
            price: required_text("price", input.price)?,
            description: required_text("description", input.description)?,
            category: reference("category", &required("category", input.category)?)?,
            coords: required("coords", input.coords)?,
            brand: optional_text(input.brand),
            model: optional_text(input.model),
            version: optional_text(input.version),
            condition: input.condition.unwrap_or_default(),
            kilometers: input.kilometers.unwrap_or(0.0),
            year: input.year,
            fuel_type: input.fuel_type,
            transmission_type: optional_text(input.transmission_type),
            body_type: optional_text(input.body_type),
            power: input.power,
            consumption: input.consumption,
            air_conditioning: optional_text(input.air_conditioning),
            color: optional_text(input.color),
            number_of_seats: input.number_of_seats,
            number_of_doors: input.number_of_doors,
            interior: optional_text(input.interior),
            accessory_type: optional_text(input.accessory_type),
            compatibility: input.compatibility.unwrap_or_default(),
            warranty_months: input.warranty_months,
            payment_option: required("payment_option", input.payment_option)?,
            extra_features: input.extra_features.unwrap_or_default(),
            is_featured: required("is_featured", input.is_featured)?,
            is_sponsored: required("is_sponsored", input.is_sponsored)?,
            is_listed: required("is_listed", input.is_listed)?,
            on_sale: required("on_sale", input.on_sale)?,
            number_of_views: input.number_of_views.unwrap_or(0),
            user_id: reference("user_id", &required("user_id", input.user_id)?)?,
            created_at: now,
            updated_at: now,
        };
        listing.check()?;
        Ok(listing)
    }

    fn apply(&mut self, input: Self::Input) -> Result<(), AppError> {
        assign(&mut self.listing_type, input.listing_type);
        assign(&mut self.name, optional_text(input.name));
        assign(&mut self.images, input.images);
        assign(&mut self.price, optional_text(input.price));
        assign(&mut self.description, optional_text(input.description));
        if let Some(category) = input.category {
            self.category = reference("category", &category)?;
        }
        assign(&mut self.coords, input.coords);
        patch_text(&mut self.brand, input.brand);
        patch_text(&mut self.model, input.model);
        patch_text(&mut self.version, input.version);
        assign(&mut self.condition, input.condition);
        assign(&mut self.kilometers, input.kilometers);
        if input.year.is_some() {
            self.year = input.year;
        }
        if input.fuel_type.is_some() {
            self.fuel_type = input.fuel_type;
        }
        patch_text(&mut self.transmission_type, input.transmission_type);
        patch_text(&mut self.body_type, input.body_type);
        if input.power.is_some() {
            self.power = input.power;
        }
        if input.consumption.is_some() {
            self.consumption = input.consumption;
        }
        patch_text(&mut self.air_conditioning, input.air_conditioning);
        patch_text(&mut self.color, input.color);
        if input.number_of_seats.is_some() {
            self.number_of_seats = input.number_of_seats;
        }
        if input.number_of_doors.is_some() {
            self.number_of_doors = input.number_of_doors;
        }
        patch_text(&mut self.interior, input.interior);
        patch_text(&mut self.accessory_type, input.accessory_type);
        assign(&mut self.compatibility, input.compatibility);
        if input.warranty_months.is_some() {
            self.warranty_months = input.warranty_months;
        }
        assign(&mut self.payment_option, input.payment_option);
        assign(&mut self.extra_features, input.extra_features);
        assign(&mut self.is_featured, input.is_featured);
        assign(&mut self.is_sponsored, input.is_sponsored);
        assign(&mut self.is_listed, input.is_listed);
        assign(&mut self.on_sale, input.on_sale);
        if let Some(user_id) = input.user_id {
            self.user_id = reference("user_id", &user_id)?;
        }
        self.check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::vehicles::models::{FuelType, PaymentOption};

    fn accessory() -> VehicleListingIn {
        VehicleListingIn {
            listing_type: Some(ListingType::Accessory),
            name: Some("Roof rack".to_string()),
            price: Some("120".to_string()),
            description: Some("Fits most sedans".to_string()),
            category: Some(Uuid::new_v4().to_string()),
            coords: Some(vec![33.9, 35.5]),
            accessory_type: Some("rack".to_string()),
            payment_option: Some(PaymentOption::Cash),
            is_featured: Some(false),
            is_sponsored: Some(false),
            is_listed: Some(true),
            on_sale: Some(false),
            user_id: Some(Uuid::new_v4().to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn accessories_need_only_an_accessory_type() {
        let listing = VehicleListing::create(accessory(), Uuid::new_v4(), Utc::now()).unwrap();
        assert_eq!(listing.kilometers, 0.0);
        assert_eq!(listing.accessory_type.as_deref(), Some("rack"));

        let error = VehicleListing::create(
            VehicleListingIn {
                accessory_type: Some("  ".to_string()),
                ..accessory()
            },
            Uuid::new_v4(),
            Utc::now(),
        )
        .unwrap_err();
        assert_eq!(
            error.to_string(),
            "accessory_type is required for accessory listings"
        );
    }

    #[test]
    fn vehicles_need_their_technical_sheet() {
        let partial = VehicleListingIn {
            listing_type: Some(ListingType::Vehicle),
            brand: Some("Toyota".to_string()),
            model: Some("Corolla".to_string()),
            ..accessory()
        };
        let error = VehicleListing::create(partial, Uuid::new_v4(), Utc::now()).unwrap_err();
        assert_eq!(error.to_string(), "year is required for vehicle listings");

        let complete = VehicleListingIn {
            listing_type: None,
            brand: Some("Toyota".to_string()),
            model: Some("Corolla".to_string()),
            year: Some(2018),
            fuel_type: Some(FuelType::Petrol),
            transmission_type: Some("automatic".to_string()),
            body_type: Some("sedan".to_string()),
            air_conditioning: Some("automatic".to_string()),
            color: Some("white".to_string()),
            number_of_seats: Some(5),
            number_of_doors: Some(4),
            interior: Some("fabric".to_string()),
            ..accessory()
        };
        let listing = VehicleListing::create(complete, Uuid::new_v4(), Utc::now()).unwrap();
        assert_eq!(listing.listing_type, ListingType::Vehicle);
    }

    #[test]
    fn payment_option_is_required() {
        let error = VehicleListing::create(
            VehicleListingIn {
                payment_option: None,
                ..accessory()
            },
            Uuid::new_v4(),
            Utc::now(),
        )
        .unwrap_err();
        assert_eq!(error.to_string(), "payment_option is required");
    }

    #[test]
    fn switching_to_vehicle_rechecks_requirements() {
        let mut listing = VehicleListing::create(accessory(), Uuid::new_v4(), Utc::now()).unwrap();
        let error = listing
            .apply(VehicleListingIn {
                listing_type: Some(ListingType::Vehicle),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(error.to_string(), "brand is required for vehicle listings");
    }
}
