use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use crate::application::errors::{ApiError, AppError};
use crate::application::state::AppState;
use crate::domain::ids::ListingId;
use crate::domain::photos::PhotoDebugReport;

const MISSING_PHOTOS_MESSAGE: &str = "Listing topilmadi yoki rasmlar yo'q";

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum DebugPhotosResponse {
    Report(PhotoDebugReport),
    Missing { error: &'static str },
}

/// Raw photo ids of a listing and the local URLs they are served under.
///
/// A missing listing answers 200 with an `error` field rather than 404.
#[tracing::instrument(skip(state))]
pub(crate) async fn debug_photos(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DebugPhotosResponse>, ApiError> {
    let Some(id) = ListingId::new(id) else {
        return Ok(Json(missing()));
    };

    let photos = state
        .listing_repo
        .fetch_listing_photos(id)
        .await
        .map_err(AppError::from)?;

    match photos {
        Some(photos) if !photos.is_empty() => Ok(Json(DebugPhotosResponse::Report(
            PhotoDebugReport::new(id, photos, &state.public_url),
        ))),
        _ => Ok(Json(missing())),
    }
}

fn missing() -> DebugPhotosResponse {
    DebugPhotosResponse::Missing {
        error: MISSING_PHOTOS_MESSAGE,
    }
}
