pub mod api;

use axum::Json;
use axum::http::{HeaderValue, Request};
use axum::routing::get;
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::{DefaultOnResponse, MakeSpan, TraceLayer};
use tracing::{Level, Span};

use crate::application::state::AppState;

/// Front-ends allowed to call the API from a browser.
const ALLOWED_ORIGINS: [&str; 3] = [
    "https://asadbek669.github.io",
    "https://asadbek669.github.io/uy-ijara-xaritasi",
    "http://localhost:3000",
];

pub fn app_router(state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/", get(root))
        .nest("/api", api::router())
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(UyIjaraMakeSpan)
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(cors_layer())
                .layer(SetResponseHeaderLayer::overriding(
                    axum::http::header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(CompressionLayer::new().gzip(true)),
        )
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(ALLOWED_ORIGINS.map(HeaderValue::from_static))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

#[derive(Clone)]
struct UyIjaraMakeSpan;

impl<B> MakeSpan<B> for UyIjaraMakeSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            version = ?request.version(),
        )
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RootMessage {
    pub message: String,
}

async fn root() -> Json<RootMessage> {
    Json(RootMessage {
        message: "Uy Ijara API ishlamoqda".to_string(),
    })
}
