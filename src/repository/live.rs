//! Long-lived feeds that push a fresh list whenever the catalog changes.

use core::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use futures::stream::Stream;
use tokio::{sync::mpsc, task::AbortHandle};

use crate::error::CatalogError;

/// How many lists can pile up before the feed waits for its reader.
const LIVE_BUFFER: usize = 8;

/// A subscription to a live feed.
///
/// Read it with [`Subscription::recv`] or as a [`Stream`]. Dropping it (or
/// calling [`Subscription::unsubscribe`]) stops the task feeding it.
///
/// After an error, the feed ends.
#[derive(Debug)]
pub struct Subscription<T> {
    rx: mpsc::Receiver<Result<T, CatalogError>>,
    task: AbortHandle,
}

impl<T: Send + 'static> Subscription<T> {
    /// Spawns `feed` onto the runtime, giving it the sending half.
    ///
    /// NOTE: this must be called from inside a `tokio` runtime.
    pub(crate) fn spawn<F, Fut>(feed: F) -> Self
    where
        F: FnOnce(mpsc::Sender<Result<T, CatalogError>>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(LIVE_BUFFER);
        let task = tokio::spawn(feed(tx)).abort_handle();
        Self { rx, task }
    }
}

impl<T> Subscription<T> {
    /// Waits for the next list.
    ///
    /// `None` means the feed is over.
    pub async fn recv(&mut self) -> Option<Result<T, CatalogError>> {
        self.rx.recv().await
    }

    /// Stops listening. Same as dropping it.
    pub fn unsubscribe(self) {
        tracing::debug!("Unsubscribing from live feed.");
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl<T> Stream for Subscription<T> {
    type Item = Result<T, CatalogError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().rx.poll_recv(cx)
    }
}
