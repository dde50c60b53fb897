pub mod errors;
pub mod ids;
pub mod listings;
pub mod photos;
pub mod repositories;

// Re-exports
pub use errors::{MappingError, RepositoryError};
pub use ids::ListingId;
