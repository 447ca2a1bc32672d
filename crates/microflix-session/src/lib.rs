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
#![allow(clippy::module_name_repetitions)]
//! Persisted sign-in session shared by every session-aware view.
//!
//! Layout:
//! - `error.rs`: storage backend failures
//! - `storage.rs`: key/value backends (browser, file, memory, unavailable)
//! - `store.rs`: `SessionStore`, which persists the record and broadcasts
//!   change signals
//! - `fragment.rs`: DOM-free state machine for views that mirror the session

pub mod error;
pub mod fragment;
pub mod storage;
pub mod store;

pub use error::{StorageError, StorageResult};
pub use fragment::{AuthView, SessionFragment};
#[cfg(target_arch = "wasm32")]
pub use storage::BrowserStorage;
pub use storage::{FileStorage, MemoryStorage, SessionStorage, UnavailableStorage};
pub use store::{SESSION_KEY, SessionStore};
