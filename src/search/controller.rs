//! Owns the filter state for one filter screen.

use crate::models::Destination;

use super::{
    engine::{self, FilteredView},
    filter::{ConditionId, FilterCondition, FilterState},
};

/// Mutates a single [`FilterState`] on behalf of the UI.
///
/// Each filter session gets its own controller. They're never shared, so
/// there's no locking in here.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterController {
    state: FilterState,
}

impl FilterController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Adds a condition to the end of the list. Duplicates are fine.
    #[tracing::instrument(skip_all, fields(%condition))]
    pub fn add(&mut self, condition: FilterCondition) {
        self.state.conditions.push(condition);
    }

    /// Removes every condition with this id. Clones share their id, so there
    /// can be more than one.
    #[tracing::instrument(skip(self))]
    pub fn remove(&mut self, id: ConditionId) {
        let before = self.state.conditions.len();
        self.state.conditions.retain(|c| c.id() != id);

        if self.state.conditions.len() == before {
            tracing::debug!("No condition to remove.");
        }
    }

    /// Swaps every condition with this id for `replacement`, which takes
    /// over the old id no matter what it had before.
    ///
    /// An unknown id leaves everything as it was.
    #[tracing::instrument(skip(self, replacement))]
    pub fn update(&mut self, id: ConditionId, replacement: FilterCondition) {
        let replacement = replacement.with_id(id);
        let mut updated = 0_usize;

        self.state
            .conditions
            .iter_mut()
            .filter(|c| c.id() == id)
            .for_each(|slot| {
                *slot = replacement.clone();
                updated += 1;
            });

        if updated == 0 {
            tracing::debug!("No condition to update.");
        }
    }

    pub fn clear(&mut self) {
        self.state = FilterState::default();
    }

    pub fn count(&self) -> usize {
        self.state.filter_count()
    }

    pub fn has_active(&self) -> bool {
        self.state.has_active_filters()
    }

    /// Filters `candidates` with the current conditions.
    pub fn apply(&self, candidates: Vec<Destination>) -> Vec<Destination> {
        engine::apply(candidates, &self.state)
    }

    /// Like [`FilterController::apply`], but remembers how many candidates
    /// there were.
    pub fn view(&self, candidates: Vec<Destination>) -> FilteredView {
        FilteredView::new(candidates, &self.state)
    }
}
