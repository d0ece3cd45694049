use axum::extract::FromRef;

use crate::{
    features::{
        ads::models::Ad, categories::models::Category, notifications::models::Notification,
        properties::models::PropertyListing, saved_searches::models::SavedSearch,
        vehicles::models::VehicleListing,
    },
    services::database::Database,
    storage::{MemoryStore, PgStore, Store},
};

#[derive(Clone)]
pub struct AppState {
    pub property_listings: Store<PropertyListing>,
    pub vehicle_listings: Store<VehicleListing>,
    pub property_categories: Store<Category>,
    pub vehicle_categories: Store<Category>,
    pub saved_searches: Store<SavedSearch>,
    pub ads: Store<Ad>,
    pub notifications: Store<Notification>,
}

impl AppState {
    pub fn postgres(database: &Database) -> Self {
        let pool = &database.pool;
        Self {
            property_listings: Store::new(PgStore::new(pool.clone(), "property_listings")),
            vehicle_listings: Store::new(PgStore::new(pool.clone(), "vehicle_listings")),
            property_categories: Store::new(PgStore::new(pool.clone(), "property_categories")),
            vehicle_categories: Store::new(PgStore::new(pool.clone(), "vehicle_categories")),
            saved_searches: Store::new(PgStore::new(pool.clone(), "saved_searches")),
            ads: Store::new(PgStore::new(pool.clone(), "ads")),
            notifications: Store::new(PgStore::new(pool.clone(), "notifications")),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            property_listings: Store::new(MemoryStore::new()),
            vehicle_listings: Store::new(MemoryStore::new()),
            property_categories: Store::new(MemoryStore::new()),
            vehicle_categories: Store::new(MemoryStore::new()),
            saved_searches: Store::new(MemoryStore::new()),
            ads: Store::new(MemoryStore::new()),
            notifications: Store::new(MemoryStore::new()),
        }
    }
}

impl FromRef<AppState> for Store<PropertyListing> {
    fn from_ref(state: &AppState) -> Self {
        state.property_listings.clone()
    }
}

impl FromRef<AppState> for Store<VehicleListing> {
    fn from_ref(state: &AppState) -> Self {
        state.vehicle_listings.clone()
    }
}

impl FromRef<AppState> for Store<SavedSearch> {
    fn from_ref(state: &AppState) -> Self {
        state.saved_searches.clone()
    }
}

impl FromRef<AppState> for Store<Ad> {
    fn from_ref(state: &AppState) -> Self {
        state.ads.clone()
    }
}

impl FromRef<AppState> for Store<Notification> {
    fn from_ref(state: &AppState) -> Self {
        state.notifications.clone()
    }
}
