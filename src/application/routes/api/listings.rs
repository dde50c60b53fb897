use axum::Json;
use axum::extract::{Path, State};

use crate::application::errors::{ApiError, AppError};
use crate::application::state::AppState;
use crate::domain::ids::ListingId;
use crate::domain::listings::{Listing, TelegramListing};

#[tracing::instrument(skip(state))]
pub(crate) async fn list_active_listings(
    State(state): State<AppState>,
) -> Result<Json<Vec<Listing>>, ApiError> {
    let listings = state
        .listing_repo
        .fetch_active_listings()
        .await
        .map_err(AppError::from)?;
    Ok(Json(listings))
}

#[tracing::instrument(skip(state))]
pub(crate) async fn get_listing(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Listing>, ApiError> {
    let listing = load_listing(&state, id).await?;
    Ok(Json(listing))
}

#[tracing::instrument(skip(state))]
pub(crate) async fn get_listing_telegram(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TelegramListing>, ApiError> {
    let listing = load_listing(&state, id).await?;
    Ok(Json(TelegramListing::new(listing, &state.bot_username)))
}

async fn load_listing(state: &AppState, id: i64) -> Result<Listing, AppError> {
    let Some(id) = ListingId::new(id) else {
        return Err(AppError::NotFound);
    };

    state
        .listing_repo
        .fetch_listing_by_id(id)
        .await?
        .ok_or(AppError::NotFound)
}
