//! User input for a destination that doesn't exist yet.

use crate::error::ValidationError;

use super::{
    destination::{Destination, ImageRef},
    taxonomy::{Category, PlaceType, Province, Taxonomy},
};

/// Everything the "add destination" form collects, as the user typed it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DestinationDraft {
    pub name: String,
    pub description: String,
    /// Blank means "no picture".
    pub image_url: String,
    pub category: Option<&'static Category>,
    pub place_type: Option<&'static PlaceType>,
    pub province: Option<&'static Province>,
    pub price: String,
    pub latitude: String,
    pub longitude: String,
}

impl DestinationDraft {
    /// Checks the form and turns it into a destination that's ready to be
    /// added. The id stays empty; the store hands one out.
    ///
    /// Unparseable numbers fall back to zero, just like an empty field.
    pub fn validate(&self) -> Result<Destination, ValidationError> {
        let name = required(&self.name, "name")?;
        let description = required(&self.description, "description")?;
        let category = selected(self.category)?;
        let place_type = selected(self.place_type)?;
        let province = selected(self.province)?;

        let price = match self.price.trim().parse::<i64>() {
            Ok(p) if p < 0 => return Err(ValidationError::NegativePrice(p)),
            Ok(p) => p.unsigned_abs(),
            Err(_) => 0,
        };

        let image_url = self.image_url.trim();
        let image = (!image_url.is_empty()).then(|| ImageRef::Url(image_url.to_string()));

        Ok(Destination {
            id: String::new(),
            name,
            description,
            image,
            favorite: false,
            category_id: category.id.into(),
            place_type_id: place_type.id.into(),
            province_id: province.id.into(),
            price,
            latitude: parse_coordinate(&self.latitude),
            longitude: parse_coordinate(&self.longitude),
        })
    }
}

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::BlankField { field });
    }
    Ok(trimmed.to_string())
}

fn selected<T: Taxonomy>(entry: Option<&'static T>) -> Result<&'static T, ValidationError> {
    entry.ok_or(ValidationError::NoTaxonomySelected { taxonomy: T::KIND })
}

fn parse_coordinate(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|c| c.is_finite())
        .unwrap_or(0.0)
}
