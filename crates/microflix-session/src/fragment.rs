//! State machine for views that mirror the stored session.
//!
//! A fragment loads the session when mounted, stays subscribed to change
//! signals for its whole lifetime and reloads on each one. Dropping the
//! fragment unsubscribes it. Any number of fragments stay consistent with
//! each other without coordinating.

use microflix_api_models::SessionRecord;
use microflix_events::SessionSubscription;

use crate::storage::SessionStorage;
use crate::store::SessionStore;

/// Name shown when a signed-in record has no display name.
pub const ANONYMOUS_DISPLAY_NAME: &str = "you";

/// What a session-aware view should render.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthView {
    /// Not yet mounted; the stored session has not been read.
    #[default]
    Loading,
    /// No usable session.
    SignedOut,
    /// Signed in.
    SignedIn {
        /// Name to greet the user with.
        display_name: String,
    },
}

impl AuthView {
    /// View for a loaded record. Records with a blank token count as signed
    /// out.
    #[must_use]
    pub fn from_record(record: Option<&SessionRecord>) -> Self {
        match record {
            Some(record) if record.is_authenticated() => {
                let name = record.display_name.trim();
                Self::SignedIn {
                    display_name: if name.is_empty() {
                        ANONYMOUS_DISPLAY_NAME.to_string()
                    } else {
                        name.to_string()
                    },
                }
            }
            _ => Self::SignedOut,
        }
    }

    /// True once signed in.
    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        matches!(self, Self::SignedIn { .. })
    }
}

/// A mounted session-aware view.
#[derive(Debug)]
pub struct SessionFragment<S> {
    store: SessionStore<S>,
    subscription: SessionSubscription,
    view: AuthView,
}

impl<S: SessionStorage> SessionFragment<S> {
    /// Subscribe and load the current session.
    #[must_use]
    pub fn mount(store: SessionStore<S>) -> Self {
        let subscription = store.subscribe();
        let view = AuthView::from_record(store.load().as_ref());
        Self {
            store,
            subscription,
            view,
        }
    }

    /// Current view state.
    #[must_use]
    pub const fn view(&self) -> &AuthView {
        &self.view
    }

    /// Store backing this fragment.
    #[must_use]
    pub const fn store(&self) -> &SessionStore<S> {
        &self.store
    }

    /// Consume pending signals and reload once if there were any.
    ///
    /// Returns whether a reload happened.
    pub fn sync(&mut self) -> bool {
        if self.subscription.drain() == 0 {
            return false;
        }
        self.reload();
        true
    }

    /// Wait for the next signal, reload, and return the new view. Returns
    /// `None` once the bus is gone.
    pub async fn changed(&mut self) -> Option<&AuthView> {
        self.subscription.next().await?;
        self.subscription.drain();
        self.reload();
        Some(&self.view)
    }

    /// Clear the stored session. This fragment, like every other one, picks
    /// up the change on its next sync.
    pub fn sign_out(&self) {
        self.store.clear();
    }

    fn reload(&mut self) {
        self.view = AuthView::from_record(self.store.load().as_ref());
    }
}
