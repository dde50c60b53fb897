use std::fmt;

use serde::Serialize;

use crate::domain::ids::ListingId;

/// Seeds longer than this are cut and marked with an ellipsis.
pub const CAPTION_SEED_LIMIT: usize = 15;

/// Why a placeholder was served instead of the real photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderReason {
    CredentialMissing,
    MetadataLookupFailed,
    DownloadFailed,
    InternalFailure,
}

impl PlaceholderReason {
    pub const fn caption_seed(self) -> &'static str {
        match self {
            PlaceholderReason::CredentialMissing => "credential missing",
            PlaceholderReason::MetadataLookupFailed => "metadata lookup failed",
            PlaceholderReason::DownloadFailed => "download failed",
            PlaceholderReason::InternalFailure => "internal failure",
        }
    }
}

impl fmt::Display for PlaceholderReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.caption_seed())
    }
}

pub fn placeholder_caption(seed: &str) -> String {
    if seed.chars().count() > CAPTION_SEED_LIMIT {
        let head: String = seed.chars().take(CAPTION_SEED_LIMIT).collect();
        format!("Rasm: {head}...")
    } else {
        format!("Rasm: {seed}")
    }
}

/// Local proxy URL for a stored photo id.
pub fn photo_url(public_url: &str, photo_id: &str) -> String {
    format!("{}/api/photos/{photo_id}", public_url.trim_end_matches('/'))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhotoDebugReport {
    pub listing_id: ListingId,
    pub photos_count: usize,
    pub photos: Vec<String>,
    pub photo_urls: Vec<String>,
}

impl PhotoDebugReport {
    pub fn new(listing_id: ListingId, photos: Vec<String>, public_url: &str) -> Self {
        let photo_urls = photos.iter().map(|id| photo_url(public_url, id)).collect();
        Self {
            listing_id,
            photos_count: photos.len(),
            photos,
            photo_urls,
        }
    }
}
