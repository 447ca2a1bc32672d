//! The gateway client.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::GatewayConfig;
use crate::error::ApiError;
use crate::normalize::{ResponseBody, normalize};
use crate::request::ApiRequest;
use crate::routing::{ExecutionContext, resolve};
use crate::transport::{DefaultTransport, OutboundRequest, Transport};

/// Single entry point for calls to the Microflix gateway.
///
/// Each call is resolved for the client's [`ExecutionContext`], sent once
/// (no retries) and normalised into a body or an [`ApiError`].
#[derive(Debug, Clone)]
pub struct ApiClient<T = DefaultTransport> {
    transport: T,
    config: GatewayConfig,
    context: ExecutionContext,
}

impl ApiClient<DefaultTransport> {
    /// Client using the platform's default transport.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when the transport cannot be built.
    pub fn new(config: GatewayConfig, context: ExecutionContext) -> Result<Self, ApiError> {
        Ok(Self::with_transport(DefaultTransport::new()?, config, context))
    }
}

impl<T: Transport> ApiClient<T> {
    /// Client using a caller-provided transport.
    pub const fn with_transport(
        transport: T,
        config: GatewayConfig,
        context: ExecutionContext,
    ) -> Self {
        Self {
            transport,
            config,
            context,
        }
    }

    /// Gateway settings in use.
    #[must_use]
    pub const fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Execution context requests are resolved for.
    #[must_use]
    pub const fn context(&self) -> ExecutionContext {
        self.context
    }

    /// URL `path` resolves to for this client.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        resolve(path, self.context, &self.config)
    }

    /// Send `request` and return its normalised body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] for non-2xx responses,
    /// [`ApiError::Transport`] when no response arrived and
    /// [`ApiError::Decode`] for malformed JSON bodies.
    pub async fn execute(&self, request: ApiRequest) -> Result<ResponseBody, ApiError> {
        let method = request.method();
        let url = self.url_for(request.path());
        let headers = request.merged_headers();
        debug!(
            %method,
            url = %url,
            context = %self.context,
            "dispatching gateway request"
        );

        let outbound = OutboundRequest {
            method,
            url: url.clone(),
            headers,
            body: request.into_body(),
        };
        let result = self.transport.send(outbound).await.and_then(normalize);

        if let Err(err) = &result {
            match err.status() {
                Some(status) => warn!(%method, url = %url, status, error = %err, "gateway request failed"),
                None => warn!(%method, url = %url, error = %err, "gateway request failed"),
            }
        }
        result
    }

    /// Send `request` and deserialise the body into `R`.
    ///
    /// # Errors
    ///
    /// As [`Self::execute`], plus [`ApiError::Decode`] when the body does not
    /// match `R`.
    pub async fn fetch<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        self.execute(request).await?.decode()
    }

    /// Send `request`, discarding any success body.
    ///
    /// # Errors
    ///
    /// As [`Self::execute`].
    pub async fn send(&self, request: ApiRequest) -> Result<(), ApiError> {
        self.execute(request).await.map(drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::RawResponse;
    use crate::testing::StubTransport;
    use serde_json::json;

    #[tokio::test]
    async fn execute_resolves_path_and_sends_default_headers() -> Result<(), ApiError> {
        let transport = StubTransport::replying(RawResponse::json(200, r#"{"ok":true}"#));
        let client = ApiClient::with_transport(
            transport.clone(),
            GatewayConfig::default(),
            ExecutionContext::Origin,
        );

        let body = client
            .execute(ApiRequest::get("/gateway/movie-service/api/v1/movies/1"))
            .await?;

        assert_eq!(body, ResponseBody::Json(json!({"ok": true})));
        let sent = transport.last_request().expect("request recorded");
        assert_eq!(sent.url, "http://gateway:8081/movie-service/api/v1/movies/1");
        assert_eq!(
            sent.headers,
            vec![("Content-Type".to_string(), "application/json".to_string())]
        );
        Ok(())
    }

    #[tokio::test]
    async fn browser_context_keeps_relative_urls() -> Result<(), ApiError> {
        let transport = StubTransport::replying(RawResponse::empty(204));
        let client = ApiClient::with_transport(
            transport.clone(),
            GatewayConfig::default(),
            ExecutionContext::Browser,
        );
        client.send(ApiRequest::delete("/rating-service/x")).await?;
        let sent = transport.last_request().expect("request recorded");
        assert_eq!(sent.url, "/gateway/rating-service/x");
        Ok(())
    }

    #[tokio::test]
    async fn failures_are_typed() {
        let transport = StubTransport::replying(RawResponse::json(
            403,
            r#"{"title":"Forbidden","detail":"Admin only"}"#,
        ));
        let client =
            ApiClient::with_transport(transport, GatewayConfig::default(), ExecutionContext::Origin);
        let err = client
            .fetch::<serde_json::Value>(ApiRequest::get("/x"))
            .await
            .expect_err("403 should fail");
        assert_eq!(err.status(), Some(403));
        assert_eq!(err.to_string(), "Forbidden");
    }

    #[tokio::test]
    async fn transport_errors_propagate() {
        let client = ApiClient::with_transport(
            StubTransport::failing("connection refused"),
            GatewayConfig::default(),
            ExecutionContext::Origin,
        );
        let err = client
            .send(ApiRequest::get("/x"))
            .await
            .expect_err("transport failure");
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
