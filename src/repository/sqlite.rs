//! The catalog, kept in SQLite.

use std::sync::Arc;

use sea_query::{SelectStatement, SimpleExpr, SqliteQueryBuilder};
use sea_query_binder::{SqlxBinder as _, SqlxValues};
use sqlx::{query::Query, sqlite::SqliteArguments, Sqlite};
use tokio::sync::watch;
use tokio_stream::{wrappers::WatchStream, StreamExt as _};
use uuid::Uuid;

use crate::{
    database::{CatalogDb, InsertIntoTable},
    error::{CatalogError, DatabaseError, ValidationError},
    models::{destination::DestinationRow, Destination, ImageRef},
    search::{
        filter::FilterState,
        query::{self, ToQuery as _},
    },
};

use super::{CatalogRepository, Subscription};

/// A [`CatalogRepository`] backed by the catalog database.
///
/// Clones share the same database and the same change notifications.
#[derive(Clone, Debug)]
pub struct SqliteCatalog {
    db: CatalogDb,
    /// Bumped after every successful mutation. Live feeds re-query on change.
    changes: Arc<watch::Sender<u64>>,
}

impl SqliteCatalog {
    pub fn new(db: CatalogDb) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            db,
            changes: Arc::new(changes),
        }
    }

    pub fn db(&self) -> &CatalogDb {
        &self.db
    }

    /// Runs the filters in the database instead of in memory.
    ///
    /// For ASCII text, this finds the same destinations as
    /// [`crate::search::engine::apply`] would over the whole catalog.
    #[tracing::instrument(skip_all, fields(conditions = state.filter_count()))]
    pub async fn query(&self, state: &FilterState) -> Result<Vec<Destination>, CatalogError> {
        let (sql, values) = {
            let mut select = query::select_destinations();
            if state.has_active_filters() {
                select.and_where(state.to_query());
            }
            render(&select)
        };

        fetch(&self.db, &sql, values).await
    }

    /// How many destinations there are.
    #[tracing::instrument(skip(self))]
    pub async fn count(&self) -> Result<u64, CatalogError> {
        let mut conn = self.db.acquire().await?;

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM destinations")
            .fetch_one(&mut *conn)
            .await
            .inspect_err(|e| tracing::error!("Failed to count destinations. err: {e}"))
            .map_err(DatabaseError::QueryFailed)?;

        Ok(count.unsigned_abs())
    }

    /// Removes every destination, returning how many there were.
    #[tracing::instrument(skip(self))]
    pub async fn delete_all(&self) -> Result<u64, CatalogError> {
        let mut conn = self.db.acquire().await?;

        let removed = sqlx::query("DELETE FROM destinations")
            .execute(&mut *conn)
            .await
            .inspect_err(|e| tracing::error!("Failed to clear destinations. err: {e}"))
            .map_err(DatabaseError::QueryFailed)?
            .rows_affected();

        tracing::debug!("Deleted {removed} destination(s).");
        self.notify();
        Ok(removed)
    }

    /// Tells every live feed that something changed.
    fn notify(&self) {
        self.changes
            .send_modify(|generation| *generation = generation.wrapping_add(1));
    }

    /// Starts a feed that re-runs `select` now and after every change.
    fn live(&self, select: SelectStatement) -> Subscription<Vec<Destination>> {
        let db = self.db.clone();
        let mut changes = WatchStream::new(self.changes.subscribe());
        let (sql, values) = render(&select);
        let values = values.0;

        Subscription::spawn(move |tx| async move {
            while changes.next().await.is_some() {
                let list = fetch(&db, &sql, SqlxValues(values.clone())).await;
                let failed = list.is_err();

                if tx.send(list).await.is_err() {
                    tracing::debug!("Live feed reader went away. Stopping.");
                    return;
                }

                if failed {
                    tracing::warn!("Live feed failed to query. Closing it.");
                    return;
                }
            }
        })
    }

    /// Runs a one-off select with an extra `WHERE` clause.
    async fn select_where(&self, expr: SimpleExpr) -> Result<Vec<Destination>, CatalogError> {
        let (sql, values) = render(query::select_destinations().and_where(expr));
        fetch(&self.db, &sql, values).await
    }

    /// Writes a destination, replacing anything stored under its id.
    async fn upsert(&self, destination: &Destination) -> Result<(), CatalogError> {
        let mut conn = self.db.acquire().await?;

        destination
            .make_insertion_query()
            .execute(&mut *conn)
            .await
            .inspect_err(|e| tracing::error!("Destination insertion failed! err: {e}"))
            .map_err(|e| DatabaseError::InsertionFailed(e.to_string()))?;

        self.notify();
        Ok(())
    }
}

/// Builds the SQL now, so the statement itself never crosses an `.await`.
fn render(select: &SelectStatement) -> (String, SqlxValues) {
    select.build_sqlx(SqliteQueryBuilder)
}

async fn fetch(
    db: &CatalogDb,
    sql: &str,
    values: SqlxValues,
) -> Result<Vec<Destination>, CatalogError> {
    let mut conn = db.acquire().await?;

    let rows = sqlx::query_as_with::<_, DestinationRow, _>(sql, values)
        .fetch_all(&mut *conn)
        .await
        .inspect_err(|e| tracing::warn!("Failed to query destinations! err: {e}"))
        .map_err(DatabaseError::QueryFailed)?;

    rows.into_iter().map(Destination::try_from).collect()
}

fn require_id(id: &str) -> Result<(), ValidationError> {
    if id.is_empty() {
        return Err(ValidationError::MissingId);
    }
    Ok(())
}

impl CatalogRepository for SqliteCatalog {
    fn stream_all(&self) -> Subscription<Vec<Destination>> {
        self.live(query::select_destinations())
    }

    fn stream_favorites(&self) -> Subscription<Vec<Destination>> {
        self.live(query::select_destinations().and_where(query::is_favorite()).to_owned())
    }

    #[tracing::instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> Result<Option<Destination>, CatalogError> {
        if id.is_empty() {
            return Ok(None);
        }

        let (sql, values) = render(query::select_destinations().and_where(query::id_equals(id)));
        let mut conn = self.db.acquire().await?;

        let row = sqlx::query_as_with::<_, DestinationRow, _>(&sql, values)
            .fetch_optional(&mut *conn)
            .await
            .inspect_err(|e| tracing::warn!("Failed to look up destination! err: {e}"))
            .map_err(DatabaseError::QueryFailed)?;

        row.map(Destination::try_from).transpose()
    }

    #[tracing::instrument(skip(self))]
    async fn search_by_name_prefix(&self, text: &str) -> Result<Vec<Destination>, CatalogError> {
        self.select_where(query::name_prefix(text)).await
    }

    #[tracing::instrument(skip(self))]
    async fn get_by_category(&self, category_id: &str) -> Result<Vec<Destination>, CatalogError> {
        self.select_where(query::category_equals(category_id)).await
    }

    #[tracing::instrument(skip_all, fields(name = %destination.name))]
    async fn add(&self, mut destination: Destination) -> Result<String, CatalogError> {
        destination.id = Uuid::new_v4().to_string();
        self.upsert(&destination).await?;

        tracing::debug!("Added destination with id `{}`.", destination.id);
        Ok(destination.id)
    }

    #[tracing::instrument(skip_all, fields(id = %destination.id))]
    async fn update(&self, destination: Destination) -> Result<(), CatalogError> {
        require_id(&destination.id)?;
        self.upsert(&destination).await
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<(), CatalogError> {
        require_id(id)?;
        let mut conn = self.db.acquire().await?;

        let removed = sqlx::query("DELETE FROM destinations WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .inspect_err(|e| tracing::error!("Failed to delete destination! err: {e}"))
            .map_err(DatabaseError::QueryFailed)?
            .rows_affected();

        // deleting something that's already gone is fine
        if removed > 0 {
            self.notify();
        }
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn set_favorite(&self, id: &str, favorite: bool) -> Result<(), CatalogError> {
        require_id(id)?;
        let mut conn = self.db.acquire().await?;

        let updated = sqlx::query("UPDATE destinations SET is_favorite = $1 WHERE id = $2")
            .bind(favorite)
            .bind(id)
            .execute(&mut *conn)
            .await
            .inspect_err(|e| tracing::error!("Failed to toggle favorite! err: {e}"))
            .map_err(DatabaseError::QueryFailed)?
            .rows_affected();

        if updated == 0 {
            return Err(CatalogError::NotFound { id: id.to_string() });
        }

        self.notify();
        Ok(())
    }
}

impl InsertIntoTable for Destination {
    fn make_insertion_query(&self) -> Query<'_, Sqlite, SqliteArguments<'_>> {
        let (image_url, image_resource) = match &self.image {
            Some(ImageRef::Url(url)) => (Some(url.as_str()), None),
            Some(ImageRef::Resource(handle)) => (None, Some(i64::from(*handle))),
            None => (None, None),
        };

        sqlx::query(
            r#"
        INSERT INTO destinations
        (id, name, description, image_url, image_resource, is_favorite, category_id, place_type_id, province_id, price, latitude, longitude)
        VALUES
        ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        ON CONFLICT(id)
        DO UPDATE SET
            name = excluded.name,
            description = excluded.description,
            image_url = excluded.image_url,
            image_resource = excluded.image_resource,
            is_favorite = excluded.is_favorite,
            category_id = excluded.category_id,
            place_type_id = excluded.place_type_id,
            province_id = excluded.province_id,
            price = excluded.price,
            latitude = excluded.latitude,
            longitude = excluded.longitude;
        "#,
        )
        .bind(self.id.as_str())
        .bind(self.name.as_str())
        .bind(self.description.as_str())
        .bind(image_url)
        .bind(image_resource)
        .bind(self.favorite)
        .bind(self.category_id.as_str())
        .bind(self.place_type_id.as_str())
        .bind(self.province_id.as_str())
        .bind(i64::try_from(self.price).unwrap_or(i64::MAX))
        .bind(self.latitude)
        .bind(self.longitude)
    }
}
