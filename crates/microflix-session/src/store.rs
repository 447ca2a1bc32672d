//! Persistence of the signed-in session record.

use microflix_api_models::SessionRecord;
use microflix_events::{SessionBus, SessionSubscription};
use tracing::{debug, warn};

use crate::storage::SessionStorage;

/// Storage key holding the serialised session record.
pub const SESSION_KEY: &str = "microflix_auth";

/// Saves, loads and clears the session record, announcing every change on
/// a [`SessionBus`].
///
/// Persistence is best effort: storage failures are logged and swallowed,
/// and the change signal is published regardless.
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    storage: S,
    bus: SessionBus,
}

impl<S: SessionStorage> SessionStore<S> {
    /// Store publishing on the process-wide bus.
    pub fn new(storage: S) -> Self {
        Self::with_bus(storage, SessionBus::global().clone())
    }

    /// Store publishing on a specific bus.
    pub const fn with_bus(storage: S, bus: SessionBus) -> Self {
        Self { storage, bus }
    }

    /// Bus change signals are published on.
    pub const fn bus(&self) -> &SessionBus {
        &self.bus
    }

    /// Register for change signals.
    #[must_use]
    pub fn subscribe(&self) -> SessionSubscription {
        self.bus.subscribe()
    }

    /// Persist `record`, replacing any previous one, then signal.
    pub fn save(&self, record: &SessionRecord) {
        match serde_json::to_string(record) {
            Ok(json) => {
                if let Err(err) = self.storage.write(SESSION_KEY, &json) {
                    warn!(error = %err, "failed to persist session");
                }
            }
            Err(err) => warn!(error = %err, "failed to serialise session"),
        }
        let signal = self.bus.publish();
        debug!(signal, "session saved");
    }

    /// The stored record, or `None` when it is missing, unreadable or not
    /// valid JSON.
    #[must_use]
    pub fn load(&self) -> Option<SessionRecord> {
        let raw = match self.storage.read(SESSION_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                debug!(error = %err, "session storage not readable");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(error = %err, "ignoring malformed stored session");
                None
            }
        }
    }

    /// Remove the stored record, then signal.
    pub fn clear(&self) {
        if let Err(err) = self.storage.remove(SESSION_KEY) {
            warn!(error = %err, "failed to clear session");
        }
        let signal = self.bus.publish();
        debug!(signal, "session cleared");
    }
}
