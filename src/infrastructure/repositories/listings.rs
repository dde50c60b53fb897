use async_trait::async_trait;
use sqlx::sqlite::{Sqlite, SqliteRow};
use sqlx::{Decode, Row, Type, query};

use crate::domain::errors::{MappingError, RepositoryError};
use crate::domain::ids::ListingId;
use crate::domain::listings::{Listing, ListingRow, map_row, normalize_photos};
use crate::domain::repositories::ListingRepository;
use crate::infrastructure::database::Database;

const SELECT_LISTINGS: &str = r"
    SELECT l.id, l.title, l.description, l.total_floors, l.floor_number,
           l.price, l.address, l.latitude, l.longitude, l.photos,
           l.is_active, l.created_at, u.full_name AS owner_name
    FROM listings l
    JOIN users u ON l.user_id = u.id";

#[derive(Clone)]
pub struct SqlListingRepository {
    database: Database,
}

impl SqlListingRepository {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    fn read_row(row: &SqliteRow) -> Result<ListingRow, MappingError> {
        Ok(ListingRow {
            id: column(row, "id")?,
            title: column(row, "title")?,
            description: column(row, "description")?,
            total_floors: column(row, "total_floors")?,
            floor_number: column(row, "floor_number")?,
            price: column(row, "price")?,
            address: column(row, "address")?,
            latitude: column(row, "latitude")?,
            longitude: column(row, "longitude")?,
            photos: column(row, "photos")?,
            is_active: column(row, "is_active")?,
            created_at: column(row, "created_at")?,
            owner_name: column(row, "owner_name")?,
        })
    }

    fn into_domain(row: &SqliteRow) -> Result<Listing, RepositoryError> {
        let raw = Self::read_row(row)?;
        Ok(map_row(raw)?)
    }
}

fn column<'r, T>(row: &'r SqliteRow, name: &'static str) -> Result<T, MappingError>
where
    T: Decode<'r, Sqlite> + Type<Sqlite>,
{
    row.try_get(name)
        .map_err(|err| MappingError::incompatible(name, err.to_string()))
}

fn db_err(err: sqlx::Error) -> RepositoryError {
    RepositoryError::unexpected(err.to_string())
}

#[async_trait]
impl ListingRepository for SqlListingRepository {
    async fn fetch_active_listings(&self) -> Result<Vec<Listing>, RepositoryError> {
        // datetime() so "YYYY-MM-DD HH:MM:SS" and RFC 3339 rows sort together
        let sql = format!(
            "{SELECT_LISTINGS} WHERE l.is_active = 1 \
             ORDER BY datetime(l.created_at) DESC, l.id DESC"
        );

        let mut connection = self.database.connect().await.map_err(db_err)?;
        let rows = query(&sql).fetch_all(&mut connection).await;
        Database::release(connection).await;

        rows.map_err(db_err)?
            .iter()
            .map(Self::into_domain)
            .collect()
    }

    async fn fetch_listing_by_id(&self, id: ListingId) -> Result<Option<Listing>, RepositoryError> {
        let sql = format!("{SELECT_LISTINGS} WHERE l.id = ?");

        let mut connection = self.database.connect().await.map_err(db_err)?;
        let row = query(&sql)
            .bind(i64::from(id))
            .fetch_optional(&mut connection)
            .await;
        Database::release(connection).await;

        row.map_err(db_err)?
            .as_ref()
            .map(Self::into_domain)
            .transpose()
    }

    async fn fetch_listing_photos(
        &self,
        id: ListingId,
    ) -> Result<Option<Vec<String>>, RepositoryError> {
        let mut connection = self.database.connect().await.map_err(db_err)?;
        let row = query("SELECT photos FROM listings WHERE id = ?")
            .bind(i64::from(id))
            .fetch_optional(&mut connection)
            .await;
        Database::release(connection).await;

        let Some(row) = row.map_err(db_err)? else {
            return Ok(None);
        };

        let raw: Option<String> = column(&row, "photos")?;
        Ok(Some(normalize_photos(raw.as_deref())?))
    }
}
