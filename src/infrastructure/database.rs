use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};
use tracing::warn;

pub type DatabaseConnection = SqliteConnection;

/// Connection settings for the listings store.
///
/// There is no pool: every caller opens its own read-only connection and
/// hands it back to [`Database::release`] when done.
#[derive(Clone, Debug)]
pub struct Database {
    options: SqliteConnectOptions,
}

impl Database {
    pub fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?.read_only(true);
        Ok(Self { options })
    }

    pub async fn connect(&self) -> Result<DatabaseConnection, sqlx::Error> {
        self.options.connect().await
    }

    /// Close a connection, logging instead of failing if the close itself errors.
    pub async fn release(connection: DatabaseConnection) {
        if let Err(err) = connection.close().await {
            warn!(error = %err, "failed to close database connection");
        }
    }

    /// Open and close one connection to prove the store is reachable.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        let mut connection = self.connect().await?;
        let result = connection.ping().await;
        Self::release(connection).await;
        result
    }
}
