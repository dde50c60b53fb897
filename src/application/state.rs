use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::application::services::PhotoService;
use crate::domain::repositories::ListingRepository;
use crate::infrastructure::database::Database;
use crate::infrastructure::placeholder::PlaceholderRenderer;
use crate::infrastructure::telegram::FileTimeouts;
use crate::infrastructure::repositories::listings::SqlListingRepository;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Everything that varies between production and test environments.
pub struct AppStateConfig {
    pub bot_token: Option<String>,
    pub bot_username: String,
    pub public_url: String,
    pub telegram_api_url: String,
    pub file_timeouts: FileTimeouts,
    pub placeholder_font: Option<PathBuf>,
}

/// Shared, immutable request context. Nothing in here is mutated per request.
#[derive(Clone)]
pub struct AppState {
    pub listing_repo: Arc<dyn ListingRepository>,
    pub photo_service: PhotoService,
    pub placeholder: Arc<PlaceholderRenderer>,
    pub bot_username: String,
    pub public_url: String,
}

impl AppState {
    pub fn from_database(database: &Database, config: AppStateConfig) -> Self {
        let listing_repo: Arc<dyn ListingRepository> =
            Arc::new(SqlListingRepository::new(database.clone()));

        #[allow(clippy::expect_used)]
        let http_client = reqwest::ClientBuilder::new()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");

        Self {
            listing_repo,
            photo_service: PhotoService::new(
                http_client,
                &config.telegram_api_url,
                config.bot_token,
                config.file_timeouts,
            ),
            placeholder: Arc::new(PlaceholderRenderer::new(config.placeholder_font)),
            bot_username: config.bot_username,
            public_url: config.public_url,
        }
    }
}
