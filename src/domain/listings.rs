use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::MappingError;
use crate::domain::ids::ListingId;

const TELEGRAM_LINK_BASE: &str = "https://t.me";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub title: String,
    pub description: String,
    pub total_floors: i64,
    pub floor_number: i64,
    pub price: f64,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub photos: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub owner_name: String,
}

/// A listing together with the bot deep link that opens it in Telegram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelegramListing {
    #[serde(flatten)]
    pub listing: Listing,
    pub telegram_url: String,
}

impl TelegramListing {
    pub fn new(listing: Listing, bot_username: &str) -> Self {
        let telegram_url = telegram_deep_link(bot_username, listing.id);
        Self {
            listing,
            telegram_url,
        }
    }
}

pub fn telegram_deep_link(bot_username: &str, id: ListingId) -> String {
    format!("{TELEGRAM_LINK_BASE}/{bot_username}?start=listing_{id}")
}

/// Columns of the listing/owner join as they come out of the store.
///
/// Every column is optional here; [`map_row`] decides which ones are required.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingRow {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub total_floors: Option<i64>,
    pub floor_number: Option<i64>,
    pub price: Option<f64>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub photos: Option<String>,
    pub is_active: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    pub owner_name: Option<String>,
}

pub fn map_row(row: ListingRow) -> Result<Listing, MappingError> {
    let raw_id = required(row.id, "id")?;
    #[allow(clippy::cast_precision_loss)] // only reported back, never compared
    let id = ListingId::new(raw_id).ok_or(MappingError::OutOfRange {
        column: "id",
        value: raw_id as f64,
    })?;

    let price = required(row.price, "price")?;
    if !price.is_finite() || price < 0.0 {
        return Err(MappingError::OutOfRange {
            column: "price",
            value: price,
        });
    }

    let latitude = within(required(row.latitude, "latitude")?, "latitude", 90.0)?;
    let longitude = within(required(row.longitude, "longitude")?, "longitude", 180.0)?;

    Ok(Listing {
        id,
        title: required(row.title, "title")?,
        description: required(row.description, "description")?,
        total_floors: required(row.total_floors, "total_floors")?,
        floor_number: required(row.floor_number, "floor_number")?,
        price,
        address: required(row.address, "address")?,
        latitude,
        longitude,
        photos: normalize_photos(row.photos.as_deref())?,
        is_active: required(row.is_active, "is_active")?,
        created_at: required(row.created_at, "created_at")?,
        owner_name: required(row.owner_name, "owner_name")?,
    })
}

fn required<T>(value: Option<T>, column: &'static str) -> Result<T, MappingError> {
    value.ok_or(MappingError::MissingField(column))
}

fn within(value: f64, column: &'static str, bound: f64) -> Result<f64, MappingError> {
    if value.is_finite() && (-bound..=bound).contains(&value) {
        Ok(value)
    } else {
        Err(MappingError::OutOfRange { column, value })
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredPhotos {
    Sequence(Vec<String>),
    Scalar(String),
}

/// Resolve the photos column into an ordered list of Telegram file ids.
///
/// The bot has stored this column as a JSON array, a JSON string, or a bare
/// token over time. NULL and blank values mean "no photos".
pub fn normalize_photos(raw: Option<&str>) -> Result<Vec<String>, MappingError> {
    let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(Vec::new());
    };

    if !raw.starts_with('[') && !raw.starts_with('"') {
        return Ok(vec![raw.to_string()]);
    }

    let stored: StoredPhotos =
        serde_json::from_str(raw).map_err(|err| MappingError::PhotosShape(err.to_string()))?;

    Ok(match stored {
        StoredPhotos::Sequence(ids) => ids,
        StoredPhotos::Scalar(id) if id.is_empty() => Vec::new(),
        StoredPhotos::Scalar(id) => vec![id],
    })
}
