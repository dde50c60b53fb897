use tracing::{info, warn};

use crate::domain::photos::PlaceholderReason;
use crate::infrastructure::telegram::{FileApiError, FileTimeouts, TelegramFiles};

/// Where the bytes for a photo request come from.
pub enum PhotoSource {
    /// A successful download whose body has not been read yet.
    Remote(reqwest::Response),
    Placeholder(PlaceholderReason),
}

/// Resolves Telegram file ids to downloadable photos.
///
/// Every failure along the way collapses into a [`PhotoSource::Placeholder`]
/// so the endpoint never reports an error for a broken reference.
#[derive(Clone)]
pub struct PhotoService {
    files: Option<TelegramFiles>,
}

impl PhotoService {
    pub fn new(
        http_client: reqwest::Client,
        api_url: &str,
        bot_token: Option<String>,
        timeouts: FileTimeouts,
    ) -> Self {
        let files = bot_token
            .filter(|token| !token.trim().is_empty())
            .map(|token| TelegramFiles::new(http_client, api_url, token).with_timeouts(timeouts));
        Self { files }
    }

    #[tracing::instrument(skip(self))]
    pub async fn resolve(&self, photo_id: &str) -> PhotoSource {
        let Some(files) = &self.files else {
            warn!("bot token is not configured, serving placeholder");
            return PhotoSource::Placeholder(PlaceholderReason::CredentialMissing);
        };

        match fetch(files, photo_id).await {
            Ok(response) => PhotoSource::Remote(response),
            Err(err) => {
                let reason = fallback_reason(&err);
                warn!(error = %err, %reason, "photo unavailable, serving placeholder");
                PhotoSource::Placeholder(reason)
            }
        }
    }
}

async fn fetch(files: &TelegramFiles, photo_id: &str) -> Result<reqwest::Response, FileApiError> {
    let file_path = files.file_path(photo_id).await?;
    let response = files.download(&file_path).await?;
    info!(file_path, "streaming photo from Telegram");
    Ok(response)
}

fn fallback_reason(err: &FileApiError) -> PlaceholderReason {
    match err {
        FileApiError::MetadataStatus(_)
        | FileApiError::MetadataRejected(_)
        | FileApiError::MetadataTimeout => PlaceholderReason::MetadataLookupFailed,
        FileApiError::DownloadStatus(_) | FileApiError::DownloadTimeout => {
            PlaceholderReason::DownloadFailed
        }
        FileApiError::MalformedMetadata(_)
        | FileApiError::MissingFilePath
        | FileApiError::Transport(_) => PlaceholderReason::InternalFailure,
    }
}
