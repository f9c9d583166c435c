//! A filter screen: a live candidate feed with its own filters on top.

use crate::{error::CatalogError, models::Destination, repository::Subscription};

use super::{controller::FilterController, engine::FilteredView};

/// Keeps the newest candidate list from a feed and filters it on demand.
///
/// Changing the filters doesn't touch the feed. Call
/// [`FilterSession::refresh`] to see the new filters applied to the last list.
#[derive(Debug)]
pub struct FilterSession {
    controller: FilterController,
    feed: Subscription<Vec<Destination>>,
    latest: Option<Vec<Destination>>,
}

impl FilterSession {
    pub fn new(feed: Subscription<Vec<Destination>>) -> Self {
        Self {
            controller: FilterController::new(),
            feed,
            latest: None,
        }
    }

    pub fn filters(&self) -> &FilterController {
        &self.controller
    }

    pub fn filters_mut(&mut self) -> &mut FilterController {
        &mut self.controller
    }

    /// Waits for the feed's next list, then filters it.
    ///
    /// Once the feed has ended, this always fails with
    /// [`CatalogError::SubscriptionClosed`].
    #[tracing::instrument(skip(self))]
    pub async fn next(&mut self) -> Result<FilteredView, CatalogError> {
        let candidates = self
            .feed
            .recv()
            .await
            .ok_or(CatalogError::SubscriptionClosed)??;

        tracing::debug!("Got {} candidate(s) from the feed.", candidates.len());
        self.latest = Some(candidates.clone());
        Ok(self.controller.view(candidates))
    }

    /// Filters the last list again, without waiting on the feed.
    ///
    /// Before the first list arrives, the view is empty.
    pub fn refresh(&self) -> FilteredView {
        self.controller.view(self.latest.clone().unwrap_or_default())
    }

    /// Stops the feed.
    pub fn close(self) {
        self.feed.unsubscribe();
    }
}
