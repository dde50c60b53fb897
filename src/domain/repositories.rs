use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::ids::ListingId;
use crate::domain::listings::Listing;

/// Read-only access to listings written by the Telegram bot.
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Active listings, newest first.
    async fn fetch_active_listings(&self) -> Result<Vec<Listing>, RepositoryError>;

    /// A single listing regardless of its active flag.
    async fn fetch_listing_by_id(&self, id: ListingId) -> Result<Option<Listing>, RepositoryError>;

    /// Only the normalized photo ids of a listing.
    async fn fetch_listing_photos(
        &self,
        id: ListingId,
    ) -> Result<Option<Vec<String>>, RepositoryError>;
}
