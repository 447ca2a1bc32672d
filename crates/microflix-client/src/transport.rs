//! HTTP transports behind [`crate::ApiClient`].
//!
//! Native builds talk to the gateway with `reqwest`; wasm builds go through
//! the browser's fetch via `gloo-net` so relative, same-origin URLs work.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::normalize::RawResponse;
use crate::request::HttpMethod;

/// Fully resolved request ready to put on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Resolved URL, absolute on native builds, possibly relative in the
    /// browser.
    pub url: String,
    /// Merged headers in send order.
    pub headers: Vec<(String, String)>,
    /// Serialised body.
    pub body: Option<String>,
}

/// Sends one request and returns the raw response.
///
/// Implementations never interpret the status; they only fail when no
/// response was received.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait Transport {
    /// Dispatch `request`.
    async fn send(&self, request: OutboundRequest) -> Result<RawResponse, ApiError>;
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::ReqwestTransport;
#[cfg(target_arch = "wasm32")]
pub use browser::BrowserTransport;

/// Transport used by [`crate::ApiClient::new`] on this target.
#[cfg(not(target_arch = "wasm32"))]
pub type DefaultTransport = ReqwestTransport;
/// Transport used by [`crate::ApiClient::new`] on this target.
#[cfg(target_arch = "wasm32")]
pub type DefaultTransport = BrowserTransport;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use async_trait::async_trait;
    use reqwest::header::CONTENT_TYPE;

    use super::{OutboundRequest, Transport};
    use crate::error::ApiError;
    use crate::normalize::RawResponse;
    use crate::request::HttpMethod;

    /// `reqwest` backed transport.
    #[derive(Debug, Clone)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        /// Build a transport with a fresh connection pool.
        ///
        /// # Errors
        ///
        /// Returns [`ApiError::Transport`] when the TLS backend cannot be
        /// initialised.
        pub fn new() -> Result<Self, ApiError> {
            let client = reqwest::Client::builder()
                .build()
                .map_err(|err| ApiError::Transport(Box::new(err)))?;
            Ok(Self { client })
        }

        /// Wrap an existing client.
        #[must_use]
        pub const fn with_client(client: reqwest::Client) -> Self {
            Self { client }
        }
    }

    impl From<HttpMethod> for reqwest::Method {
        fn from(method: HttpMethod) -> Self {
            match method {
                HttpMethod::Get => Self::GET,
                HttpMethod::Post => Self::POST,
                HttpMethod::Put => Self::PUT,
                HttpMethod::Patch => Self::PATCH,
                HttpMethod::Delete => Self::DELETE,
            }
        }
    }

    #[async_trait]
    impl Transport for ReqwestTransport {
        async fn send(&self, request: OutboundRequest) -> Result<RawResponse, ApiError> {
            let mut builder = self
                .client
                .request(request.method.into(), request.url.as_str());
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder
                .send()
                .await
                .map_err(|err| ApiError::Transport(Box::new(err)))?;
            let status = response.status().as_u16();
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
            let body = response
                .bytes()
                .await
                .map_err(|err| ApiError::Transport(Box::new(err)))?
                .to_vec();

            Ok(RawResponse {
                status,
                content_type,
                body,
            })
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use async_trait::async_trait;
    use gloo_net::http::Request;

    use super::{OutboundRequest, Transport};
    use crate::error::ApiError;
    use crate::normalize::RawResponse;
    use crate::request::HttpMethod;

    /// Browser `fetch` transport.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct BrowserTransport;

    impl BrowserTransport {
        /// Construct the transport. Never fails; the signature matches the
        /// native transport.
        ///
        /// # Errors
        ///
        /// None.
        pub const fn new() -> Result<Self, ApiError> {
            Ok(Self)
        }
    }

    fn transport_error(err: &gloo_net::Error) -> ApiError {
        ApiError::Transport(err.to_string().into())
    }

    #[async_trait(?Send)]
    impl Transport for BrowserTransport {
        async fn send(&self, request: OutboundRequest) -> Result<RawResponse, ApiError> {
            let url = request.url.as_str();
            let mut req = match request.method {
                HttpMethod::Get => Request::get(url),
                HttpMethod::Post => Request::post(url),
                HttpMethod::Put => Request::put(url),
                HttpMethod::Patch => Request::patch(url),
                HttpMethod::Delete => Request::delete(url),
            };
            for (name, value) in &request.headers {
                req = req.header(name, value);
            }
            if let Some(body) = request.body {
                req = req.body(body);
            }

            let response = req.send().await.map_err(|err| transport_error(&err))?;
            let status = response.status();
            let content_type = response.headers().get("content-type");
            let body = response
                .binary()
                .await
                .map_err(|err| transport_error(&err))?;

            Ok(RawResponse {
                status,
                content_type,
                body,
            })
        }
    }
}
