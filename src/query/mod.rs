pub mod engine;
pub mod filter;
pub mod pagination;
pub mod params;

pub use engine::{ListingDescriptor, ListingQuery};
pub use filter::{FilterSpec, Predicate, SortDirection, SortSpec};
pub use pagination::Pagination;
