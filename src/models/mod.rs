//! Types that are really the bedrock of the app.

pub mod destination;
pub mod draft;
pub mod taxonomy;

pub use destination::{Destination, DestinationDocument, ImageRef};
pub use draft::DestinationDraft;
pub use taxonomy::{Category, PlaceType, Province, Taxonomy};
