//! This module tests seeding a fresh catalog.

mod common;

#[cfg(test)]
mod tests {
    use travelupa::{
        repository::CatalogRepository as _,
        seed::{self, force_reseed, is_seeded, seed_if_needed},
    };
    use temp_dir::TempDir;

    use crate::common::{config_testing, destination, setup, start_logging};

    #[tokio::test]
    async fn seeds_once() -> anyhow::Result<()> {
        let (_dir, catalog) = setup().await;
        assert!(!is_seeded(&catalog).await?);

        assert_eq!(seed_if_needed(&catalog).await?, 12);
        assert!(is_seeded(&catalog).await?);
        assert_eq!(catalog.count().await?, 12);

        // second time's a no-op
        assert_eq!(seed_if_needed(&catalog).await?, 0);
        assert_eq!(catalog.count().await?, 12);
        Ok(())
    }

    #[tokio::test]
    async fn deleting_everything_doesnt_reseed() -> anyhow::Result<()> {
        let (_dir, catalog) = setup().await;
        seed_if_needed(&catalog).await?;

        catalog.delete_all().await?;
        assert_eq!(seed_if_needed(&catalog).await?, 0);
        assert_eq!(catalog.count().await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn force_reseed_replaces_everything() -> anyhow::Result<()> {
        let (_dir, catalog) = setup().await;
        seed_if_needed(&catalog).await?;

        let extra = catalog
            .add(destination("Pantai Baru", "alam", "bali", 10_000))
            .await?;
        assert_eq!(catalog.count().await?, 13);

        assert_eq!(force_reseed(&catalog).await?, 12);
        assert_eq!(catalog.count().await?, 12);
        assert_eq!(catalog.get_by_id(&extra).await?, None);
        assert!(is_seeded(&catalog).await?);
        Ok(())
    }

    #[tokio::test]
    async fn seeded_destinations_get_ids() -> anyhow::Result<()> {
        let (_dir, catalog) = setup().await;
        seed_if_needed(&catalog).await?;

        let bromo = catalog.search_by_name_prefix("Gunung Bromo").await?;
        assert_eq!(bromo.len(), 1);
        assert!(!bromo[0].id.is_empty());
        assert_eq!(bromo[0].price, 35_000);
        assert_eq!(bromo[0].province_id, "jawa_timur");
        Ok(())
    }

    #[tokio::test]
    async fn open_catalog_follows_the_config() -> anyhow::Result<()> {
        start_logging();

        let seeded_dir = TempDir::new()?;
        let catalog = seed::open_catalog(&config_testing(&seeded_dir, true)).await?;
        assert_eq!(catalog.count().await?, 12);
        catalog.db().close().await;

        // opening it again keeps what's there
        let catalog = seed::open_catalog(&config_testing(&seeded_dir, true)).await?;
        assert_eq!(catalog.count().await?, 12);

        let empty_dir = TempDir::new()?;
        let catalog = seed::open_catalog(&config_testing(&empty_dir, false)).await?;
        assert_eq!(catalog.count().await?, 0);
        assert!(!is_seeded(&catalog).await?);
        Ok(())
    }
}
