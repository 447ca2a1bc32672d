#![forbid(unsafe_code)]
#![deny(
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Process-wide "session changed" notification bus.
//!
//! The bus carries a bare signal: listeners are told *that* the stored
//! session changed and are expected to reload it themselves. Internally it
//! uses `tokio::broadcast` with a small bounded buffer; a listener that falls
//! behind loses intermediate signals but always observes at least one, which
//! is all a reload needs.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use once_cell::sync::Lazy;
use tokio::sync::broadcast::{self, Receiver, Sender, error::RecvError, error::TryRecvError};

/// Sequence number assigned to each published signal, for log correlation.
pub type SignalId = u64;

/// Default number of undelivered signals retained per listener.
const DEFAULT_CAPACITY: usize = 16;

static GLOBAL_BUS: Lazy<SessionBus> = Lazy::new(SessionBus::new);

/// Notification that the persisted session record was saved or cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionChanged {
    /// Sequence number of the publish call that produced this signal.
    pub id: SignalId,
}

/// Publish/subscribe channel for session change signals.
#[derive(Clone, Debug)]
pub struct SessionBus {
    sender: Sender<SessionChanged>,
    next_id: Arc<AtomicU64>,
}

impl SessionBus {
    /// Construct an isolated bus with the default buffer size.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Construct an isolated bus retaining up to `capacity` pending signals
    /// per listener (a zero capacity is raised to one).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// The bus shared by every fragment in this process.
    ///
    /// Created on first access and never torn down.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL_BUS
    }

    /// Broadcast a change signal to every current listener.
    ///
    /// Publishing with no listeners is not an error.
    pub fn publish(&self) -> SignalId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let _ = self.sender.send(SessionChanged { id });
        id
    }

    /// Register a listener. Dropping the subscription unregisters it.
    #[must_use]
    pub fn subscribe(&self) -> SessionSubscription {
        SessionSubscription {
            receiver: self.sender.subscribe(),
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for SessionBus {
    fn default() -> Self {
        Self::new()
    }
}

/// A registered listener on a [`SessionBus`].
#[derive(Debug)]
pub struct SessionSubscription {
    receiver: Receiver<SessionChanged>,
}

impl SessionSubscription {
    /// Take the next pending signal without waiting.
    pub fn try_next(&mut self) -> Option<SessionChanged> {
        loop {
            match self.receiver.try_recv() {
                Ok(signal) => return Some(signal),
                Err(TryRecvError::Lagged(_)) => {}
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }

    /// Discard every pending signal, returning how many were observed.
    pub fn drain(&mut self) -> usize {
        let mut observed = 0;
        while self.try_next().is_some() {
            observed += 1;
        }
        observed
    }

    /// Wait for the next signal. Returns `None` once the bus is gone.
    pub async fn next(&mut self) -> Option<SessionChanged> {
        loop {
            match self.receiver.recv().await {
                Ok(signal) => return Some(signal),
                Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[test]
    fn each_publish_reaches_every_listener_once() {
        let bus = SessionBus::new();
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        let id = bus.publish();

        assert_eq!(first.try_next(), Some(SessionChanged { id }));
        assert_eq!(first.try_next(), None);
        assert_eq!(second.drain(), 1);
    }

    #[test]
    fn publish_without_listeners_is_silent() {
        let bus = SessionBus::new();
        assert_eq!(bus.listener_count(), 0);
        let first = bus.publish();
        let second = bus.publish();
        assert!(second > first);
    }

    #[test]
    fn listeners_only_see_signals_after_subscribing() {
        let bus = SessionBus::new();
        bus.publish();
        let mut late = bus.subscribe();
        assert_eq!(late.try_next(), None);
    }

    #[test]
    fn dropping_subscription_unregisters_listener() {
        let bus = SessionBus::new();
        let subscription = bus.subscribe();
        let clone = bus.clone();
        assert_eq!(clone.listener_count(), 1);
        drop(subscription);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn lagging_listener_still_observes_a_signal() {
        let bus = SessionBus::with_capacity(2);
        let mut slow = bus.subscribe();
        for _ in 0..10 {
            bus.publish();
        }
        assert!(slow.drain() >= 1);
    }

    #[test]
    fn global_bus_is_shared() {
        assert!(std::ptr::eq(SessionBus::global(), SessionBus::global()));
    }

    #[tokio::test]
    async fn next_waits_for_publish() {
        let bus = SessionBus::new();
        let mut subscription = bus.subscribe();
        let publisher = bus.clone();
        tokio::spawn(async move {
            publisher.publish();
        });
        let signal = timeout(Duration::from_secs(1), subscription.next())
            .await
            .expect("signal before timeout");
        assert!(signal.is_some());
    }
}
