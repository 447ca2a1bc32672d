//! Request description handed to [`crate::ApiClient::execute`].

use std::fmt;

use serde::Serialize;

use crate::error::ApiError;

/// Header name for the request body type.
pub const CONTENT_TYPE: &str = "Content-Type";
/// Header name for bearer credentials.
pub const AUTHORIZATION: &str = "Authorization";
/// Content type sent when the caller does not choose one.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP verbs used against the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl HttpMethod {
    /// Upper-case wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A logical gateway request: method, unresolved path, headers and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    method: HttpMethod,
    path: String,
    headers: Vec<(String, String)>,
    body: Option<String>,
}

impl ApiRequest {
    /// Start a request for `path` (resolved later against the context).
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// `GET` request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// `POST` request.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// `PUT` request.
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    /// `PATCH` request.
    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    /// `DELETE` request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Add a caller header. Later values replace earlier ones with the same
    /// name, compared case-insensitively.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attach `Authorization: Bearer <token>`.
    #[must_use]
    pub fn bearer(self, token: &str) -> Self {
        self.header(AUTHORIZATION, format!("Bearer {token}"))
    }

    /// Serialise `body` as the JSON request body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] when `body` cannot be serialised.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_string(body).map_err(ApiError::Encode)?);
        Ok(self)
    }

    /// Use `body` verbatim.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Request method.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// Unresolved request path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Headers as sent: the JSON content type first, then caller headers,
    /// each caller header replacing any earlier one with the same name.
    #[must_use]
    pub fn merged_headers(&self) -> Vec<(String, String)> {
        let mut merged = vec![(CONTENT_TYPE.to_string(), JSON_CONTENT_TYPE.to_string())];
        for (name, value) in &self.headers {
            if let Some(existing) = merged
                .iter_mut()
                .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            {
                existing.1.clone_from(value);
            } else {
                merged.push((name.clone(), value.clone()));
            }
        }
        merged
    }

    pub(crate) fn into_body(self) -> Option<String> {
        self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_content_type_is_the_default() {
        let headers = ApiRequest::get("/x").merged_headers();
        assert_eq!(
            headers,
            vec![("Content-Type".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn caller_headers_override_case_insensitively() {
        let headers = ApiRequest::post("/x")
            .header("content-type", "text/plain")
            .bearer("abc")
            .merged_headers();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[0].1, "text/plain");
        assert_eq!(headers[1], ("Authorization".into(), "Bearer abc".into()));
    }

    #[test]
    fn json_body_is_serialised() -> Result<(), ApiError> {
        let request = ApiRequest::post("/x").json(&json!({"movieId": 7}))?;
        assert_eq!(request.into_body().as_deref(), Some(r#"{"movieId":7}"#));
        Ok(())
    }
}
