use core::error::Error;
use pisserror::Error;

use crate::config::{Config, CONFIG};

/// Where bugs go when the app hasn't told us otherwise.
const FALLBACK_BUG_REPO: &str = "https://github.com/travelupa/travelupa";

/// Stick this at the end of bug warnings/errors.
///
/// It helps users find out where to report bugs when looking at logs.
pub async fn bug_msg() -> String {
    let repo = match CONFIG.get() {
        Some(_) => Config::read().await.bug_report_info.repo.clone(),
        None => FALLBACK_BUG_REPO.to_string(),
    };

    format!("this is a bug, so please report it! you can do so by heading to this git repo: {repo}")
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("The catalog database has encountered an error. See: `{_0}`")]
    Database(#[from] DatabaseError),

    #[error("The given input was rejected. See: `{_0}`")]
    Validation(#[from] ValidationError),

    #[error("No destination with id `{id}` exists in the catalog.")]
    NotFound { id: String },

    #[error("The stored destination `{id}` couldn't be decoded. Reason: {reason}")]
    CorruptRecord { id: String, reason: String },

    #[error("The live destination feed closed before sending another list.")]
    SubscriptionClosed,
}

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Failed to connect to the database. See: {_0}")]
    ConnectionError(String),

    #[error("Database connection succeeded, but migrating it failed. See: {_0}")]
    MigrationFailed(String),

    #[error("Failed to complete database query. See: {_0}")]
    QueryFailed(#[from] sqlx::Error),

    #[error("Couldn't continue with database insertion. See: {_0}")]
    InsertionFailed(String),
}

/// Input that never made it past the boundary.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("A filter condition needs a value to match against.")]
    EmptyFilterValue,

    #[error("This operation needs the destination's id, but it was empty.")]
    MissingId,

    #[error("The `{field}` field can't be blank.")]
    BlankField { field: &'static str },

    #[error("Prices can't be negative, but got `{_0}`.")]
    NegativePrice(i64),

    #[error("A {taxonomy} must be selected.")]
    NoTaxonomySelected { taxonomy: &'static str },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    /// during fs read from disk
    #[error("Failed to read config file. See: `{_0}`")]
    ReadFailed(#[from] tokio::io::Error),

    /// parsing
    #[error("Failed to parse config file. See: `{_0}`")]
    ParseFailed(#[from] toml::de::Error),

    /// when we read from disk, the paths should be equal
    #[error("The config file had a data directory that didn't match the one we were given.")]
    PathMismatch,
}
