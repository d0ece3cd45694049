pub mod ads;
pub mod categories;
pub mod listings;
pub mod notifications;
pub mod properties;
pub mod saved_searches;
pub mod schemas;
pub mod vehicles;
