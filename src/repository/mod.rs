//! The catalog store, as the rest of the app sees it.
//!
//! Nothing looks the repository up from ambient state. Build one (like
//! [`SqliteCatalog`]) and pass it to whoever needs it.

use core::future::Future;

use crate::{
    error::CatalogError,
    models::{taxonomy, Category, Destination, PlaceType, Province},
};

pub mod live;
pub mod sqlite;

pub use live::Subscription;
pub use sqlite::SqliteCatalog;

/// A place destinations are kept.
///
/// Every mutation stands alone. There are no multi-record transactions.
pub trait CatalogRepository: Send + Sync {
    /// The whole catalog, ordered by name. A new list arrives after every
    /// change.
    fn stream_all(&self) -> Subscription<Vec<Destination>>;

    /// Like [`CatalogRepository::stream_all`], but only the favorites.
    fn stream_favorites(&self) -> Subscription<Vec<Destination>>;

    /// Finds one destination. `Ok(None)` when there's no such id.
    fn get_by_id(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<Destination>, CatalogError>> + Send;

    /// Destinations whose name starts with `text`. Case-sensitive.
    fn search_by_name_prefix(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<Vec<Destination>, CatalogError>> + Send;

    fn get_by_category(
        &self,
        category_id: &str,
    ) -> impl Future<Output = Result<Vec<Destination>, CatalogError>> + Send;

    /// Stores a new destination, returning the id it was given.
    ///
    /// Any id already on `destination` is ignored.
    fn add(
        &self,
        destination: Destination,
    ) -> impl Future<Output = Result<String, CatalogError>> + Send;

    /// Replaces the whole record stored under `destination.id`.
    fn update(
        &self,
        destination: Destination,
    ) -> impl Future<Output = Result<(), CatalogError>> + Send;

    fn delete(&self, id: &str) -> impl Future<Output = Result<(), CatalogError>> + Send;

    fn set_favorite(
        &self,
        id: &str,
        favorite: bool,
    ) -> impl Future<Output = Result<(), CatalogError>> + Send;

    /// The same fixed lists the taxonomy module exposes.
    fn categories(&self) -> &'static [Category] {
        taxonomy::list()
    }

    fn place_types(&self) -> &'static [PlaceType] {
        taxonomy::list()
    }

    fn provinces(&self) -> &'static [Province] {
        taxonomy::list()
    }
}
