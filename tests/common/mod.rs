//! The parent of the other tests.
//!
//! Mostly to import the setup stuff below.

use std::str::FromStr as _;

use camino::Utf8PathBuf;
use temp_dir::TempDir;
use tracing_subscriber::{filter, layer::SubscriberExt as _, util::SubscriberInitExt as _, Layer};

use travelupa::{
    config::{BugReportInfo, Config},
    database::CatalogDb,
    models::{Destination, ImageRef},
    repository::SqliteCatalog,
};

/// call this at the top of any new test func! :)
///
/// The returned folder holds the database. Keep it alive for the whole test.
#[allow(dead_code, reason = "it's used in the other tests")]
pub async fn setup() -> (TempDir, SqliteCatalog) {
    start_logging();

    let dir = TempDir::new().expect("create temp dir");
    let db = CatalogDb::connect(&data_dir(&dir))
        .await
        .expect("connect to catalog db");

    (dir, SqliteCatalog::new(db))
}

/// Starts logging, unless another test in this binary already did.
#[allow(dead_code, reason = "it's used in the other tests")]
pub fn start_logging() {
    _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_test_writer()
                .with_filter(filter::EnvFilter::from_str("DEBUG,sqlx=INFO").unwrap()),
        )
        .try_init();
}

#[allow(dead_code, reason = "it's used in the other tests")]
pub fn data_dir(dir: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("temp dir should be utf-8")
}

/// A config pointing at the given folder.
#[allow(dead_code, reason = "it's used in the other tests")]
pub fn config_testing(dir: &TempDir, seed_on_first_run: bool) -> Config {
    Config::new(data_dir(dir), seed_on_first_run, new_bug_report_info_testing())
}

/// Sample bug report information for usage in tests, to decrease
/// verbosity.
#[allow(dead_code, reason = "it's used in the other tests")]
pub fn new_bug_report_info_testing() -> BugReportInfo {
    BugReportInfo {
        app_name: "bug report info testing info".to_string(),
        app_version: "0.1.0".to_string(),
        device: "desktop".to_string(),
        commit: "unknown".to_string(),
        repo: "https://github.com/example/travelupa".to_string(),
    }
}

/// A destination that's ready to add.
#[allow(dead_code, reason = "it's used in the other tests")]
pub fn destination(name: &str, category_id: &str, province_id: &str, price: u64) -> Destination {
    Destination {
        id: String::new(),
        name: name.to_string(),
        description: format!("{name} is worth a visit."),
        image: Some(ImageRef::Url(format!(
            "https://example.com/{}.jpg",
            name.to_lowercase().replace(' ', "_")
        ))),
        favorite: false,
        category_id: category_id.to_string(),
        place_type_id: "pantai".to_string(),
        province_id: province_id.to_string(),
        price,
        latitude: -8.0,
        longitude: 115.0,
    }
}
