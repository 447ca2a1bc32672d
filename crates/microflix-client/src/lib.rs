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
//! Gateway client shared by the Microflix web UI and CLI.
//!
//! Layout:
//! - `config.rs`: gateway base address and shared routing prefix
//! - `routing.rs`: execution-context-aware URL resolution
//! - `request.rs`: request builder and header merging
//! - `normalize.rs`: content-type driven body parsing and failure mapping
//! - `transport.rs`: reqwest (native) and gloo-net (wasm) transports
//! - `client.rs`: `ApiClient`, the single entry point for backend calls
//! - `endpoints/`: one typed wrapper per backend resource

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod normalize;
pub mod request;
pub mod routing;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use client::ApiClient;
pub use config::GatewayConfig;
pub use error::{ApiError, TransportError, TypedFailure};
pub use normalize::{RawResponse, ResponseBody};
pub use request::{ApiRequest, HttpMethod};
pub use routing::{ExecutionContext, resolve};
pub use transport::{DefaultTransport, OutboundRequest, Transport};
