use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use futures::TryStreamExt;
use tracing::{error, warn};

use crate::application::services::PhotoSource;
use crate::application::state::AppState;
use crate::domain::photos::PlaceholderReason;
use crate::infrastructure::placeholder::JPEG_CONTENT_TYPE;

/// Diagnostic header naming why a placeholder was served.
pub const PLACEHOLDER_REASON_HEADER: &str = "x-placeholder-reason";

#[tracing::instrument(skip(state))]
pub(crate) async fn get_photo(
    State(state): State<AppState>,
    Path(photo_id): Path<String>,
) -> Response {
    serve_photo(&state, &photo_id).await
}

#[tracing::instrument(skip(state))]
pub(crate) async fn get_photo_without_id(State(state): State<AppState>) -> Response {
    serve_photo(&state, "").await
}

async fn serve_photo(state: &AppState, photo_id: &str) -> Response {
    match state.photo_service.resolve(photo_id).await {
        PhotoSource::Remote(response) => stream_remote(response),
        PhotoSource::Placeholder(reason) => placeholder_response(state, reason).await,
    }
}

fn stream_remote(response: reqwest::Response) -> Response {
    let stream = response
        .bytes_stream()
        .inspect_err(|err| warn!(timeout = err.is_timeout(), "photo stream interrupted"));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, JPEG_CONTENT_TYPE)
        .body(Body::from_stream(stream))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

async fn placeholder_response(state: &AppState, reason: PlaceholderReason) -> Response {
    let renderer = Arc::clone(&state.placeholder);
    let rendered =
        tokio::task::spawn_blocking(move || renderer.render(reason.caption_seed())).await;

    match rendered {
        Ok(Ok(bytes)) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, JPEG_CONTENT_TYPE)
            .header(PLACEHOLDER_REASON_HEADER, reason.caption_seed())
            .body(Body::from(bytes))
            .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response()),
        Ok(Err(err)) => {
            error!(error = %err, %reason, "failed to render placeholder");
            placeholder_failure(&err.to_string())
        }
        Err(err) => {
            error!(error = %err, %reason, "placeholder rendering task panicked");
            placeholder_failure(&err.to_string())
        }
    }
}

fn placeholder_failure(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        format!("Photo not found: {message}"),
    )
        .into_response()
}
