pub(crate) mod debug;
pub(crate) mod listings;
pub(crate) mod photos;

use axum::routing::get;

use crate::application::state::AppState;

pub(super) fn router() -> axum::Router<AppState> {
    listing_routes().merge(photo_routes())
}

fn listing_routes() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/listings", get(listings::list_active_listings))
        .route("/listings/{id}", get(listings::get_listing))
        .route("/listings/{id}/telegram", get(listings::get_listing_telegram))
}

fn photo_routes() -> axum::Router<AppState> {
    axum::Router::new()
        // `{photo_id}` never matches an empty segment.
        .route("/photos/", get(photos::get_photo_without_id))
        .route("/photos/{photo_id}", get(photos::get_photo))
        .route("/debug/photos/{id}", get(debug::debug_photos))
}
