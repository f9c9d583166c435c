//! The first few destinations, so a fresh catalog isn't empty.
//!
//! Seeding happens once per database. A `seeded_at` timestamp in the
//! `catalog_meta` table remembers that it did.

use crate::{
    config::Config,
    database::CatalogDb,
    error::{CatalogError, DatabaseError},
    models::{Destination, DestinationDocument},
    repository::{CatalogRepository as _, SqliteCatalog},
};

/// The embedded seed data, in the same shape as stored documents.
const SEED_DATA: &str = include_str!("../assets/seed.toml");

/// Key for the seeding timestamp in `catalog_meta`.
const SEEDED_AT_KEY: &str = "seeded_at";

#[derive(Debug, serde::Deserialize)]
struct SeedFile {
    destinations: Vec<DestinationDocument>,
}

/// Decodes the bundled destinations. None of them have ids yet.
pub fn initial_destinations() -> Result<Vec<Destination>, CatalogError> {
    let corrupt = |reason: String| CatalogError::CorruptRecord {
        id: "<seed data>".into(),
        reason,
    };

    let file: SeedFile = toml::from_str(SEED_DATA)
        .inspect_err(|e| tracing::error!("Bundled seed data didn't parse! err: {e}"))
        .map_err(|e| corrupt(e.to_string()))?;

    file.destinations
        .into_iter()
        .map(|doc| Destination::from_document(String::new(), doc).map_err(|e| corrupt(e.to_string())))
        .collect()
}

/// Connects to the catalog in the configured data directory.
///
/// When the config asks for it, this seeds the catalog, too.
#[tracing::instrument(skip_all, fields(data_dir = %config.data_dir))]
pub async fn open_catalog(config: &Config) -> Result<SqliteCatalog, CatalogError> {
    let db = CatalogDb::connect(&config.data_dir).await?;
    let catalog = SqliteCatalog::new(db);

    if config.seed_on_first_run {
        seed_if_needed(&catalog).await?;
    }

    Ok(catalog)
}

/// Whether this catalog has been seeded before.
pub async fn is_seeded(catalog: &SqliteCatalog) -> Result<bool, CatalogError> {
    Ok(seeded_at(catalog.db()).await?.is_some())
}

/// Adds the initial destinations, unless that's already happened.
///
/// Returns how many destinations were added.
#[tracing::instrument(skip_all)]
pub async fn seed_if_needed(catalog: &SqliteCatalog) -> Result<usize, CatalogError> {
    if let Some(when) = seeded_at(catalog.db()).await? {
        tracing::debug!("Catalog was already seeded at {when}. Skipping...");
        return Ok(0);
    }

    seed(catalog).await
}

/// Throws away every destination and seeds again from scratch.
#[tracing::instrument(skip_all)]
pub async fn force_reseed(catalog: &SqliteCatalog) -> Result<usize, CatalogError> {
    let removed = catalog.delete_all().await?;
    tracing::info!("Force reseeding. Removed {removed} old destination(s).");

    clear_seeded(catalog.db()).await?;
    seed(catalog).await
}

async fn seed(catalog: &SqliteCatalog) -> Result<usize, CatalogError> {
    let destinations = initial_destinations()?;
    let count = destinations.len();

    for destination in destinations {
        let name = destination.name.clone();
        catalog.add(destination).await?;
        tracing::debug!("Seeded: {name}");
    }

    mark_seeded(catalog.db()).await?;
    tracing::info!("Seeding completed! {count} destination(s) added.");
    Ok(count)
}

async fn seeded_at(db: &CatalogDb) -> Result<Option<String>, DatabaseError> {
    let mut conn = db.acquire().await?;

    let row: Option<(String,)> = sqlx::query_as("SELECT value FROM catalog_meta WHERE key = $1")
        .bind(SEEDED_AT_KEY)
        .fetch_optional(&mut *conn)
        .await
        .inspect_err(|e| tracing::error!("Failed to read the seeding flag. err: {e}"))?;

    Ok(row.map(|(value,)| value))
}

async fn mark_seeded(db: &CatalogDb) -> Result<(), DatabaseError> {
    let mut conn = db.acquire().await?;
    let now = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO catalog_meta (key, value)
        VALUES ($1, $2)
        ON CONFLICT(key)
        DO UPDATE SET value = excluded.value;
        "#,
    )
    .bind(SEEDED_AT_KEY)
    .bind(now)
    .execute(&mut *conn)
    .await
    .inspect_err(|e| tracing::error!("Failed to set the seeding flag. err: {e}"))?;

    Ok(())
}

async fn clear_seeded(db: &CatalogDb) -> Result<(), DatabaseError> {
    let mut conn = db.acquire().await?;

    sqlx::query("DELETE FROM catalog_meta WHERE key = $1")
        .bind(SEEDED_AT_KEY)
        .execute(&mut *conn)
        .await
        .inspect_err(|e| tracing::error!("Failed to clear the seeding flag. err: {e}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, PlaceType, Province};

    #[test]
    fn bundled_data_decodes() {
        let all = initial_destinations().unwrap();
        assert_eq!(all.len(), 12);
        assert!(all.iter().all(|d| d.id.is_empty()));
        assert!(all.iter().all(|d| d.has_coordinates()));
    }

    #[test]
    fn bundled_data_uses_known_taxonomies() {
        for d in initial_destinations().unwrap() {
            assert!(d.category().is_some(), "{}: {}", d.name, d.category_id);
            assert!(d.place_type().is_some(), "{}: {}", d.name, d.place_type_id);
            assert!(d.province().is_some(), "{}: {}", d.name, d.province_id);
        }
    }

    #[test]
    fn free_destinations_are_free() {
        let free: Vec<String> = initial_destinations()
            .unwrap()
            .into_iter()
            .filter(|d| d.price == 0)
            .map(|d| d.name)
            .collect();

        assert_eq!(free, ["Pantai Kuta Bali", "Danau Toba", "Malioboro"]);
    }

    #[test]
    fn malioboro_is_culture_in_yogyakarta() {
        let all = initial_destinations().unwrap();
        let malioboro = all.iter().find(|d| d.name == "Malioboro").unwrap();

        assert_eq!(malioboro.category(), Some(&Category::BUDAYA));
        assert_eq!(malioboro.place_type(), Some(&PlaceType::TAMAN));
        assert_eq!(malioboro.province(), Some(&Province::YOGYAKARTA));
    }
}
