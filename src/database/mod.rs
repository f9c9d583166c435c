//! Helps to connect to the catalog database.
//!
//! There's no global pool in here. Whoever needs the database gets a
//! [`CatalogDb`] handed to them.

use std::str::FromStr as _;

use camino::Utf8Path;
use sqlx::{
    pool::PoolConnection,
    query::Query,
    sqlite::{SqliteArguments, SqliteConnectOptions},
    Pool, Sqlite,
};

use crate::error::DatabaseError;

pub const CATALOG_DB_FILE: &str = "catalog.sqlite";

/// A connection pool for the catalog database, with migrations applied.
#[derive(Clone, Debug)]
pub struct CatalogDb {
    pool: Pool<Sqlite>,
}

impl CatalogDb {
    /// Opens (or creates) the catalog database inside the given folder.
    #[tracing::instrument]
    pub async fn connect(folder: &Utf8Path) -> Result<Self, DatabaseError> {
        tokio::fs::create_dir_all(folder)
            .await
            .inspect_err(|e| tracing::error!("Failed to create the database folder. err: {e}"))
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

        let options = SqliteConnectOptions::from_str(&format!(
            "sqlite://{folder}/{CATALOG_DB_FILE}"
        ))
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?
        .create_if_missing(true);

        Self::connect_with(options).await
    }

    /// Connects with the given options and runs migrations.
    #[tracing::instrument(skip_all)]
    pub async fn connect_with(options: SqliteConnectOptions) -> Result<Self, DatabaseError> {
        let pool = sqlx::Pool::<Sqlite>::connect_with(options)
            .await
            .inspect_err(|e| tracing::error!("Failed to connect to the catalog database. err: {e}"))
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

        // we'll also run migrations here real quick
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    "Database connection succeeded, but migrating the database failed! err: {e}"
                )
            })
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

        tracing::debug!("Catalog database is ready.");
        Ok(Self { pool })
    }

    /// Grabs a connection from the pool.
    pub async fn acquire(&self) -> Result<PoolConnection<Sqlite>, DatabaseError> {
        self.pool
            .acquire()
            .await
            .inspect_err(|e| tracing::error!("Failed to get database connection! err: {e}"))
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Closes every connection. Clones of this handle stop working too.
    pub async fn close(&self) {
        self.pool.close().await
    }
}

/// Something that can be written into its table in one statement.
///
/// The query should upsert, so writing the same thing twice is fine.
pub trait InsertIntoTable {
    fn make_insertion_query(&self) -> Query<'_, Sqlite, SqliteArguments<'_>>;
}
