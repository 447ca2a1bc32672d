//! Shared gateway client and session store for the app.
//!
//! # Design
//! - Create exactly one API client per app boot.
//! - The session store is a cheap handle; every clone talks to the same
//!   `localStorage` key and the same process-wide bus.

use std::rc::Rc;

use microflix_client::{ApiClient, ExecutionContext, GatewayConfig};
use microflix_session::{BrowserStorage, SessionStore};

/// App-wide services provided through a Yew context.
#[derive(Clone)]
pub(crate) struct AppCtx {
    /// Singleton gateway client.
    pub(crate) api: Rc<ApiClient>,
    /// Persisted session.
    pub(crate) session: SessionStore<BrowserStorage>,
}

impl AppCtx {
    /// Build the browser-side client. Requests go to the same-origin
    /// gateway prefix.
    pub(crate) fn new() -> Result<Self, String> {
        let api = ApiClient::new(GatewayConfig::default(), ExecutionContext::Browser)
            .map_err(|err| err.to_string())?;
        Ok(Self {
            api: Rc::new(api),
            session: SessionStore::new(BrowserStorage),
        })
    }

    /// Token of the stored session, read fresh on every call.
    pub(crate) fn token(&self) -> Option<String> {
        self.session
            .load()
            .filter(microflix_api_models::SessionRecord::is_authenticated)
            .map(|record| record.token)
    }
}

impl PartialEq for AppCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.api, &other.api)
    }
}
