use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

pub const TELEGRAM_API_URL: &str = "https://api.telegram.org";
const USER_AGENT: &str = "UyIjara/1.0";
const METADATA_TIMEOUT: Duration = Duration::from_secs(10);
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bounds for the two Bot API calls behind one photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileTimeouts {
    pub metadata: Duration,
    pub download: Duration,
}

impl Default for FileTimeouts {
    fn default() -> Self {
        Self {
            metadata: METADATA_TIMEOUT,
            download: DOWNLOAD_TIMEOUT,
        }
    }
}

/// Failures talking to the Bot API file endpoints.
///
/// Messages never contain request URLs, since those embed the bot token.
#[derive(Debug, Error)]
pub enum FileApiError {
    #[error("getFile returned status {0}")]
    MetadataStatus(StatusCode),
    #[error("getFile rejected the file id: {0}")]
    MetadataRejected(String),
    #[error("getFile timed out")]
    MetadataTimeout,
    #[error("getFile response is malformed: {0}")]
    MalformedMetadata(String),
    #[error("getFile response has no file path")]
    MissingFilePath,
    #[error("file download returned status {0}")]
    DownloadStatus(StatusCode),
    #[error("file download timed out")]
    DownloadTimeout,
    #[error("Bot API request failed: {0}")]
    Transport(String),
}

impl FileApiError {
    fn transport(err: reqwest::Error) -> Self {
        Self::Transport(err.without_url().to_string())
    }
}

/// Client for the `getFile` + file download pair of the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramFiles {
    client: reqwest::Client,
    api_url: String,
    bot_token: String,
    timeouts: FileTimeouts,
}

impl TelegramFiles {
    pub fn new(client: reqwest::Client, api_url: &str, bot_token: String) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            bot_token,
            timeouts: FileTimeouts::default(),
        }
    }

    pub fn with_timeouts(mut self, timeouts: FileTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.api_url, self.bot_token)
    }

    fn file_url(&self, file_path: &str) -> String {
        format!(
            "{}/file/bot{}/{}",
            self.api_url,
            self.bot_token,
            file_path.trim_start_matches('/')
        )
    }

    /// Resolve a `file_id` to the storage path Telegram serves it under.
    pub async fn file_path(&self, file_id: &str) -> Result<String, FileApiError> {
        let response = self
            .client
            .get(self.method_url("getFile"))
            .header("User-Agent", USER_AGENT)
            .query(&[("file_id", file_id)])
            .timeout(self.timeouts.metadata)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    FileApiError::MetadataTimeout
                } else {
                    FileApiError::transport(err)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FileApiError::MetadataStatus(status));
        }

        let body = response.text().await.map_err(|err| {
            if err.is_timeout() {
                FileApiError::MetadataTimeout
            } else {
                FileApiError::transport(err)
            }
        })?;

        let envelope: GetFileResponse = serde_json::from_str(&body)
            .map_err(|err| FileApiError::MalformedMetadata(err.to_string()))?;

        if !envelope.ok {
            return Err(FileApiError::MetadataRejected(
                envelope
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
            ));
        }

        envelope
            .result
            .and_then(|file| file.file_path)
            .filter(|path| !path.trim().is_empty())
            .ok_or(FileApiError::MissingFilePath)
    }

    /// Start downloading a file. The body is left unread for the caller to stream.
    pub async fn download(&self, file_path: &str) -> Result<reqwest::Response, FileApiError> {
        let response = self
            .client
            .get(self.file_url(file_path))
            .header("User-Agent", USER_AGENT)
            .timeout(self.timeouts.download)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    FileApiError::DownloadTimeout
                } else {
                    FileApiError::transport(err)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FileApiError::DownloadStatus(status));
        }

        Ok(response)
    }
}

// --- Bot API types ---

#[derive(Debug, Deserialize)]
struct GetFileResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    result: Option<FileInfo>,
}

#[derive(Debug, Deserialize)]
struct FileInfo {
    #[serde(default)]
    file_path: Option<String>,
}
