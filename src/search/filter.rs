//! Filter conditions and the state that holds them.
//!
//! A condition is one "field contains value" constraint picked by the user.
//! The [`FilterState`] is the ordered list of those that are active right now.

use core::fmt;

use uuid::Uuid;

use crate::{
    error::ValidationError,
    models::{Category, PlaceType, Province},
};

/// Identifies one condition for its whole life.
pub type ConditionId = Uuid;

/// A destination property the user can filter on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterField {
    Name,
    Category,
    PlaceType,
    Province,
    Price,
}

impl FilterField {
    /// Every field, in the order the filter sheet shows them.
    pub const ALL: [FilterField; 5] = [
        FilterField::Name,
        FilterField::Category,
        FilterField::PlaceType,
        FilterField::Province,
        FilterField::Price,
    ];

    /// The label shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            FilterField::Name => "Nama",
            FilterField::Category => "Kategori",
            FilterField::PlaceType => "Jenis Tempat",
            FilterField::Province => "Provinsi",
            FilterField::Price => "Harga",
        }
    }

    /// The operators that make sense for this field.
    ///
    /// Never empty. The first one is what gets selected when the user picks
    /// a different field.
    pub fn operators(&self) -> &'static [FilterOperator] {
        // every field only knows `Contains` for now
        &[FilterOperator::Contains]
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a condition's value is compared against a field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterOperator {
    /// Case-insensitive substring match.
    #[default]
    Contains,
}

impl FilterOperator {
    pub fn label(&self) -> &'static str {
        match self {
            FilterOperator::Contains => "mengandung",
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The operators available for a field. See [`FilterField::operators`].
pub fn operators_for(field: FilterField) -> &'static [FilterOperator] {
    field.operators()
}

/// One active constraint.
///
/// You can only get one through the constructors below, which refuse empty
/// values. The id is fixed at creation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FilterCondition {
    id: ConditionId,
    field: FilterField,
    operator: FilterOperator,
    value: String,
    display_value: String,
}

impl FilterCondition {
    /// Builds a condition with a fresh id.
    ///
    /// When `display_value` is missing or blank, the raw value is shown
    /// instead.
    pub fn build(
        field: FilterField,
        operator: FilterOperator,
        value: impl Into<String>,
        display_value: Option<String>,
    ) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::EmptyFilterValue);
        }

        let display_value = display_value
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| value.clone());

        Ok(Self {
            id: Uuid::new_v4(),
            field,
            operator,
            value,
            display_value,
        })
    }

    /// `Nama mengandung <value>`.
    pub fn name_contains(value: impl Into<String>) -> Result<Self, ValidationError> {
        Self::build(FilterField::Name, FilterOperator::default(), value, None)
    }

    /// Matches destinations in the given category, showing its name.
    pub fn category(category: &Category) -> Self {
        Self::from_entry(FilterField::Category, category.id, category.name)
    }

    pub fn place_type(place_type: &PlaceType) -> Self {
        Self::from_entry(FilterField::PlaceType, place_type.id, place_type.name)
    }

    pub fn province(province: &Province) -> Self {
        Self::from_entry(FilterField::Province, province.id, province.name)
    }

    /// A price condition from whatever the user typed into the price box.
    ///
    /// Only the digits are kept, so `"Rp 30.000"` and `"30000"` both match on
    /// `30000`, displayed as `Rp 30.000`.
    pub fn price(input: &str) -> Result<Self, ValidationError> {
        let digits: String = input.chars().filter(char::is_ascii_digit).collect();
        let display = format_rupiah(&digits);

        Self::build(
            FilterField::Price,
            FilterOperator::default(),
            digits,
            Some(display),
        )
    }

    fn from_entry(field: FilterField, id: &'static str, name: &'static str) -> Self {
        Self {
            id: Uuid::new_v4(),
            field,
            operator: FilterOperator::default(),
            value: id.to_string(),
            display_value: name.to_string(),
        }
    }

    /// Takes over another condition's identity.
    pub(crate) fn with_id(self, id: ConditionId) -> Self {
        Self { id, ..self }
    }

    pub fn id(&self) -> ConditionId {
        self.id
    }

    pub fn field(&self) -> FilterField {
        self.field
    }

    pub fn operator(&self) -> FilterOperator {
        self.operator
    }

    /// The raw value that's matched against destinations.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// What the user sees for this condition's value.
    pub fn display_value(&self) -> &str {
        &self.display_value
    }
}

impl fmt::Display for FilterCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.label(), self.display_value)
    }
}

/// Formats a run of digits the way rupiah prices are written (`Rp 1.500.000`).
///
/// Empty input stays empty. Leading zeros go, but `0` itself stays `Rp 0`.
fn format_rupiah(digits: &str) -> String {
    if digits.is_empty() {
        return String::new();
    }

    let trimmed = digits.trim_start_matches('0');
    let digits = if trimmed.is_empty() { "0" } else { trimmed };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 3);
    grouped.push_str("Rp ");
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    grouped
}

/// The conditions that are active right now, in the order they were added.
///
/// Two equal conditions can both be in here. Nothing dedupes them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    pub(crate) conditions: Vec<FilterCondition>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conditions(&self) -> &[FilterCondition] {
        &self.conditions
    }

    pub fn has_active_filters(&self) -> bool {
        !self.conditions.is_empty()
    }

    pub fn filter_count(&self) -> usize {
        self.conditions.len()
    }
}

impl FromIterator<FilterCondition> for FilterState {
    fn from_iter<I: IntoIterator<Item = FilterCondition>>(iter: I) -> Self {
        Self {
            conditions: iter.into_iter().collect(),
        }
    }
}
