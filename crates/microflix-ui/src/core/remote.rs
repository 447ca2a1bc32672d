//! Fetched data paired with the notices its requests raised.
//!
//! # Design
//! - A failed fetch leaves the data in `Failed` and adds one error notice.
//!   Dismissing the notice never changes the data.
//! - Starting a new fetch drops notices from earlier ones.

use crate::core::feedback::Notices;

/// Remote data as a view sees it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Remote<T> {
    /// Request in flight.
    Loading,
    /// Data arrived.
    Loaded(T),
    /// The request failed; the reason is in the notices.
    Failed,
}

impl<T> Remote<T> {
    /// Loaded data, if any.
    #[must_use]
    pub const fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            Self::Loading | Self::Failed => None,
        }
    }
}

/// Transitions of a [`Loadable`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadEvent<T> {
    /// A fetch began.
    Started,
    /// The fetch settled with data or a user-facing message.
    Finished(Result<T, String>),
    /// The user closed a notice.
    Dismiss(u64),
}

/// Remote data together with the notices its fetches raised.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Loadable<T> {
    /// Current data.
    pub data: Remote<T>,
    /// Failures still on screen.
    pub notices: Notices,
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Self {
            data: Remote::Loading,
            notices: Notices::default(),
        }
    }
}

impl<T> Loadable<T> {
    /// Next state after `event`.
    #[must_use]
    pub fn apply(mut self, event: LoadEvent<T>) -> Self {
        match event {
            LoadEvent::Started => {
                self.data = Remote::Loading;
                self.notices.clear();
            }
            LoadEvent::Finished(Ok(value)) => self.data = Remote::Loaded(value),
            LoadEvent::Finished(Err(message)) => {
                self.data = Remote::Failed;
                self.notices.error(message);
            }
            LoadEvent::Dismiss(id) => {
                self.notices.dismiss(id);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_becomes_dismissable_notice() {
        let state = Loadable::<u32>::default().apply(LoadEvent::Finished(Err("Boom.".into())));
        assert_eq!(state.data, Remote::Failed);
        assert_eq!(state.notices.items().len(), 1);
        assert_eq!(state.notices.items()[0].message, "Boom.");

        let id = state.notices.items()[0].id;
        let state = state.apply(LoadEvent::Dismiss(id));
        assert!(state.notices.is_empty());
        assert_eq!(state.data, Remote::Failed);
    }

    #[test]
    fn new_fetch_clears_stale_failures() {
        let state = Loadable::<u32>::default()
            .apply(LoadEvent::Finished(Err("Boom.".into())))
            .apply(LoadEvent::Started);
        assert_eq!(state.data, Remote::Loading);
        assert!(state.notices.is_empty());

        let state = state.apply(LoadEvent::Finished(Ok(7)));
        assert_eq!(state.data.loaded(), Some(&7));
    }

    #[test]
    fn unknown_notice_id_is_ignored() {
        let state = Loadable::<u32>::default()
            .apply(LoadEvent::Finished(Err("Boom.".into())))
            .apply(LoadEvent::Dismiss(99));
        assert_eq!(state.notices.items().len(), 1);
    }
}
