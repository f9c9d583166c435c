//! Applies a [`FilterState`] to destinations that are already in memory.
//!
//! Everything here is synchronous and pure. The live feed calls back into
//! [`apply`] on every emission instead.

use std::borrow::Cow;

use crate::models::Destination;

use super::filter::{FilterCondition, FilterField, FilterOperator, FilterState};

/// Keeps the destinations that satisfy every condition, in their original
/// order.
///
/// With no active conditions, the list comes back untouched.
#[tracing::instrument(skip_all, fields(candidates = candidates.len(), conditions = state.filter_count()))]
pub fn apply(mut candidates: Vec<Destination>, state: &FilterState) -> Vec<Destination> {
    if !state.has_active_filters() {
        return candidates;
    }

    candidates.retain(|d| matches_all(d, state));
    tracing::trace!("{} destination(s) survived filtering", candidates.len());
    candidates
}

/// Like [`apply`], but borrows the candidates instead.
pub fn matching<'a>(
    candidates: &'a [Destination],
    state: &'a FilterState,
) -> impl Iterator<Item = &'a Destination> + 'a {
    candidates.iter().filter(move |d| matches_all(d, state))
}

/// Whether a destination passes every condition in the state.
pub fn matches_all(destination: &Destination, state: &FilterState) -> bool {
    state
        .conditions()
        .iter()
        .all(|c| matches_condition(destination, c))
}

/// Whether one destination passes one condition.
///
/// Text fields match on a case-insensitive substring. Prices are numbers, so
/// `Contains` on a price means "is exactly this price": `0` finds the free
/// places instead of everything with a zero in it.
pub fn matches_condition(destination: &Destination, condition: &FilterCondition) -> bool {
    match (condition.operator(), condition.field()) {
        (FilterOperator::Contains, FilterField::Price) => {
            parse_price(condition.value()).is_some_and(|p| p == destination.price)
        }

        // an empty needle would match everything, but conditions can't be
        // built with one
        (FilterOperator::Contains, field) => field_value(destination, field)
            .to_lowercase()
            .contains(&condition.value().to_lowercase()),
    }
}

/// Reads a price condition's value. Anything that isn't a plain number
/// can't match a price.
pub(crate) fn parse_price(value: &str) -> Option<u64> {
    value.trim().parse().ok()
}

/// The text a condition on `field` is matched against.
///
/// Taxonomy fields give the raw id, not the resolved name.
pub fn field_value(destination: &Destination, field: FilterField) -> Cow<'_, str> {
    match field {
        FilterField::Name => Cow::Borrowed(&destination.name),
        FilterField::Category => Cow::Borrowed(&destination.category_id),
        FilterField::PlaceType => Cow::Borrowed(&destination.place_type_id),
        FilterField::Province => Cow::Borrowed(&destination.province_id),
        FilterField::Price => Cow::Owned(destination.price.to_string()),
    }
}

/// The result of filtering one candidate list.
///
/// This keeps the candidate count around so an empty result can tell "nothing
/// loaded yet" apart from "the filters excluded everything".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilteredView {
    pub destinations: Vec<Destination>,
    /// How many destinations there were before filtering.
    pub candidate_count: usize,
}

impl FilteredView {
    pub fn new(candidates: Vec<Destination>, state: &FilterState) -> Self {
        let candidate_count = candidates.len();
        Self {
            destinations: apply(candidates, state),
            candidate_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    /// There's nothing to filter yet.
    pub fn awaiting_candidates(&self) -> bool {
        self.candidate_count == 0
    }

    /// There were candidates, but the filters threw all of them out.
    pub fn excluded_by_filters(&self) -> bool {
        self.candidate_count > 0 && self.destinations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::destination::tests::destination;

    fn candidates() -> Vec<Destination> {
        vec![
            destination("Tumpak Sewu", "alam", 30_000),
            destination("Malioboro", "budaya", 0),
        ]
    }

    fn state(conditions: impl IntoIterator<Item = FilterCondition>) -> FilterState {
        conditions.into_iter().collect()
    }

    fn names(ds: &[Destination]) -> Vec<&str> {
        ds.iter().map(|d| d.name.as_str()).collect()
    }

    fn cond(field: FilterField, value: &str) -> FilterCondition {
        FilterCondition::build(field, FilterOperator::Contains, value, None).unwrap()
    }

    #[test]
    fn no_conditions_is_identity() {
        let out = apply(candidates(), &FilterState::new());
        assert_eq!(out, candidates());
    }

    #[test]
    fn category_matches_on_id() {
        let out = apply(candidates(), &state([cond(FilterField::Category, "alam")]));
        assert_eq!(names(&out), ["Tumpak Sewu"]);

        // the display name isn't what's matched
        let mut d = destination("Pantai Kuta", "alam", 0);
        d.category_id = "legacy".into();
        let out = apply(vec![d], &state([cond(FilterField::Category, "Alam")]));
        assert!(out.is_empty());
    }

    #[test]
    fn zero_price_finds_the_free_ones() {
        let out = apply(candidates(), &state([cond(FilterField::Price, "0")]));
        assert_eq!(names(&out), ["Malioboro"]);
    }

    #[test]
    fn price_matches_the_whole_number() {
        let out = apply(candidates(), &state([FilterCondition::price("30.000").unwrap()]));
        assert_eq!(names(&out), ["Tumpak Sewu"]);

        let out = apply(candidates(), &state([cond(FilterField::Price, "3000")]));
        assert!(out.is_empty(), "not a substring match");

        let out = apply(candidates(), &state([cond(FilterField::Price, "gratis")]));
        assert!(out.is_empty(), "not a number, so nothing matches");
    }

    #[test]
    fn price_field_value_is_decimal() {
        let d = destination("Kawah Ijen", "alam", 100_000);
        assert_eq!(field_value(&d, FilterField::Price), "100000");
        assert_eq!(field_value(&d, FilterField::Category), "alam");
    }

    #[test]
    fn matching_ignores_case() {
        let ds = vec![destination("Gunung Bromo", "alam", 35_000)];
        let out = apply(ds, &state([cond(FilterField::Name, "bromo")]));
        assert_eq!(names(&out), ["Gunung Bromo"]);

        let mut d = destination("x", "alam", 0);
        d.province_id = "jawa_timur".into();
        assert!(matches_condition(&d, &cond(FilterField::Province, "JAWA")));
        assert!(matches_condition(&d, &FilterCondition::category(&crate::models::Category::ALAM)));
    }

    #[test]
    fn nothing_matches_is_just_empty() {
        let out = apply(candidates(), &state([cond(FilterField::Name, "zzz")]));
        assert!(out.is_empty());
    }

    #[test]
    fn conditions_are_conjunctive() {
        let ds = vec![
            destination("Pantai Kuta", "alam", 0),
            destination("Pantai Pink", "alam", 25_000),
            destination("Pantai Budaya", "budaya", 0),
            destination("Gunung Bromo", "alam", 35_000),
        ];

        let a = cond(FilterField::Name, "pantai");
        let b = cond(FilterField::Category, "alam");

        let both = apply(ds.clone(), &state([a.clone(), b.clone()]));
        assert_eq!(names(&both), ["Pantai Kuta", "Pantai Pink"]);

        // applying one after the other is the same thing
        let chained = apply(apply(ds.clone(), &state([a.clone()])), &state([b.clone()]));
        assert_eq!(both, chained);

        // ...in either order
        let flipped = apply(apply(ds, &state([b])), &state([a]));
        assert_eq!(both, flipped);
    }

    #[test]
    fn result_is_an_ordered_subsequence() {
        let ds = vec![
            destination("Candi Borobudur", "sejarah", 50_000),
            destination("Kawah Ijen", "alam", 100_000),
            destination("Candi Prambanan", "sejarah", 50_000),
            destination("Danau Toba", "alam", 0),
        ];

        let out = apply(ds.clone(), &state([cond(FilterField::Category, "sejarah")]));
        assert_eq!(names(&out), ["Candi Borobudur", "Candi Prambanan"]);

        let mut rest = ds.iter();
        for kept in &out {
            assert!(rest.any(|d| d == kept), "{} out of order", kept.name);
        }
    }

    #[test]
    fn applying_twice_changes_nothing() {
        let s = state([cond(FilterField::Name, "a"), cond(FilterField::Price, "0")]);
        let once = apply(candidates(), &s);
        let twice = apply(once.clone(), &s);
        assert_eq!(once, twice);
    }

    #[test]
    fn duplicate_conditions_are_harmless() {
        let c = cond(FilterField::Name, "malio");
        let out = apply(candidates(), &state([c.clone(), c]));
        assert_eq!(names(&out), ["Malioboro"]);
    }

    #[test]
    fn borrowing_matches_owned() {
        let ds = candidates();
        let s = state([cond(FilterField::Category, "budaya")]);

        let borrowed: Vec<_> = matching(&ds, &s).cloned().collect();
        assert_eq!(borrowed, apply(ds.clone(), &s));
    }

    #[test]
    fn view_explains_empty_results() {
        let nothing_loaded = FilteredView::new(vec![], &state([cond(FilterField::Name, "x")]));
        assert!(nothing_loaded.is_empty());
        assert!(nothing_loaded.awaiting_candidates());
        assert!(!nothing_loaded.excluded_by_filters());

        let filtered_out = FilteredView::new(candidates(), &state([cond(FilterField::Name, "zzz")]));
        assert_eq!(filtered_out.candidate_count, 2);
        assert!(filtered_out.excluded_by_filters());
        assert!(!filtered_out.awaiting_candidates());
    }
}
