//! The catalog entity: one tourist destination.

use url::Url;

use crate::error::{CatalogError, ValidationError};

use super::taxonomy::{self, Category, PlaceType, Province};

/// Where a destination's picture comes from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ImageRef {
    /// A remote (or uploaded) image.
    Url(String),
    /// A picture bundled with the app, referenced by its resource handle.
    ///
    /// These are device-local, so they're never part of the wire document.
    Resource(u32),
}

/// A tourist destination in the catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct Destination {
    /// Assigned by the store when the destination is added. Empty until then.
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: Option<ImageRef>,
    pub favorite: bool,
    pub category_id: String,
    pub place_type_id: String,
    pub province_id: String,
    /// Entry price in rupiah. Zero means it's free!
    pub price: u64,
    /// `0.0` means "unknown" here. See [`Destination::has_coordinates`].
    pub latitude: f64,
    pub longitude: f64,
}

impl Destination {
    /// The destination's category, if its id is one we know.
    pub fn category(&self) -> Option<&'static Category> {
        taxonomy::resolve(&self.category_id)
    }

    pub fn place_type(&self) -> Option<&'static PlaceType> {
        taxonomy::resolve(&self.place_type_id)
    }

    pub fn province(&self) -> Option<&'static Province> {
        taxonomy::resolve(&self.province_id)
    }

    /// The image URL, when the picture isn't a bundled resource.
    pub fn image_url(&self) -> Option<&str> {
        match &self.image {
            Some(ImageRef::Url(url)) => Some(url),
            _ => None,
        }
    }

    /// Whether this destination can be pinned on a map.
    ///
    /// A zero on either axis counts as "not set".
    pub fn has_coordinates(&self) -> bool {
        self.latitude != 0.0 && self.longitude != 0.0
    }

    /// `(latitude, longitude)`, when the destination has them.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.has_coordinates()
            .then_some((self.latitude, self.longitude))
    }

    /// A `geo:` URI, which Android hands to whatever map app is installed.
    pub fn geo_uri(&self) -> Option<String> {
        let (lat, lng) = self.coordinates()?;

        // `+` is only a space in form data, and a literal `+` comes out as `%2B`
        let label: String = url::form_urlencoded::byte_serialize(self.name.as_bytes())
            .collect::<String>()
            .replace('+', "%20");

        Some(format!("geo:{lat},{lng}?q={lat},{lng}({label})"))
    }

    /// A Google Maps search link pointing at this destination.
    pub fn maps_url(&self) -> Option<Url> {
        let (lat, lng) = self.coordinates()?;

        Url::parse_with_params(
            "https://www.google.com/maps/search/",
            &[("api", "1"), ("query", format!("{lat},{lng}").as_str())],
        )
        .inspect_err(|e| tracing::warn!("Failed to build a maps link. err: {e}"))
        .ok()
    }

    /// Converts this destination into the payload stored under its id.
    pub fn to_document(&self) -> DestinationDocument {
        DestinationDocument {
            name: self.name.clone(),
            description: self.description.clone(),
            image_url: self.image_url().map(ToString::to_string),
            is_favorite: self.favorite,
            category_id: self.category_id.clone(),
            place_type_id: self.place_type_id.clone(),
            province_id: self.province_id.clone(),
            price: i64::try_from(self.price).unwrap_or(i64::MAX),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    /// Builds a destination from a stored payload and the id it was stored
    /// under.
    pub fn from_document(
        id: impl Into<String>,
        doc: DestinationDocument,
    ) -> Result<Self, ValidationError> {
        let price = u64::try_from(doc.price).map_err(|_| ValidationError::NegativePrice(doc.price))?;

        Ok(Self {
            id: id.into(),
            name: doc.name,
            description: doc.description,
            image: doc.image_url.map(ImageRef::Url),
            favorite: doc.is_favorite,
            category_id: doc.category_id,
            place_type_id: doc.place_type_id,
            province_id: doc.province_id,
            price,
            latitude: doc.latitude,
            longitude: doc.longitude,
        })
    }
}

/// The persisted shape of a destination.
///
/// The id isn't in here; the store keeps it as the record's key. Any key
/// missing from an incoming document takes its default, and unknown keys are
/// ignored.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DestinationDocument {
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub is_favorite: bool,
    pub category_id: String,
    pub place_type_id: String,
    pub province_id: String,
    pub price: i64,
    pub latitude: f64,
    pub longitude: f64,
}

/// A row in the `destinations` table.
#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub(crate) struct DestinationRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub image_resource: Option<i64>,
    pub is_favorite: bool,
    pub category_id: String,
    pub place_type_id: String,
    pub province_id: String,
    pub price: i64,
    pub latitude: f64,
    pub longitude: f64,
}

impl TryFrom<DestinationRow> for Destination {
    type Error = CatalogError;

    fn try_from(row: DestinationRow) -> Result<Self, Self::Error> {
        let corrupt = |reason: String| CatalogError::CorruptRecord {
            id: row.id.clone(),
            reason,
        };

        let price = u64::try_from(row.price)
            .map_err(|_| corrupt(format!("negative price `{}`", row.price)))?;

        let image = match (row.image_url.clone(), row.image_resource) {
            (Some(url), _) => Some(ImageRef::Url(url)),
            (None, Some(handle)) => Some(ImageRef::Resource(
                u32::try_from(handle)
                    .map_err(|_| corrupt(format!("bad image resource handle `{handle}`")))?,
            )),
            (None, None) => None,
        };

        Ok(Self {
            id: row.id,
            name: row.name,
            description: row.description,
            image,
            favorite: row.is_favorite,
            category_id: row.category_id,
            place_type_id: row.place_type_id,
            province_id: row.province_id,
            price,
            latitude: row.latitude,
            longitude: row.longitude,
        })
    }
}
