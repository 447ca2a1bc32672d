//! Turns raw HTTP responses into bodies or typed failures.

use microflix_api_models::ProblemDetails;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, TypedFailure};

/// Status, content type and bytes as received from the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Value of the `Content-Type` header, if any.
    pub content_type: Option<String>,
    /// Response body.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Construct a response with a JSON content type.
    #[must_use]
    pub fn json(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type: Some("application/json".to_string()),
            body: body.into(),
        }
    }

    /// Construct a plain text response.
    #[must_use]
    pub fn text(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type: Some("text/plain; charset=utf-8".to_string()),
            body: body.into(),
        }
    }

    /// Construct a response with no body and no content type.
    #[must_use]
    pub const fn empty(status: u16) -> Self {
        Self {
            status,
            content_type: None,
            body: Vec::new(),
        }
    }

    /// True for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Parsed success body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    /// Body declared as JSON.
    Json(Value),
    /// Any other body, decoded lossily as UTF-8.
    Text(String),
    /// No body at all.
    Empty,
}

impl ResponseBody {
    /// Collapse into a JSON value: text becomes a string, empty becomes null.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Json(value) => value,
            Self::Text(text) => Value::String(text),
            Self::Empty => Value::Null,
        }
    }

    /// Deserialise the body into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] when the body does not match `T`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        serde_json::from_value(self.into_value()).map_err(ApiError::Decode)
    }
}

/// Whether a content type announces a JSON body, including `+json` suffixes
/// such as `application/problem+json`.
#[must_use]
pub fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence.contains("application/json") || essence.ends_with("+json")
}

/// Parse the body according to its content type and map non-2xx statuses to
/// [`TypedFailure`].
///
/// # Errors
///
/// Returns [`ApiError::Status`] for any non-success status and
/// [`ApiError::Decode`] when a success body claims to be JSON but is not.
pub fn normalize(raw: RawResponse) -> Result<ResponseBody, ApiError> {
    let declared_json = raw
        .content_type
        .as_deref()
        .is_some_and(is_json_content_type);
    let parsed = parse_body(&raw.body, declared_json);

    if raw.is_success() {
        return parsed.map_err(ApiError::Decode);
    }

    let problem = match parsed {
        Ok(ResponseBody::Json(value)) => ProblemDetails::from_json(&value),
        _ => None,
    };
    Err(TypedFailure::new(raw.status, problem).into())
}

fn parse_body(bytes: &[u8], declared_json: bool) -> Result<ResponseBody, serde_json::Error> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(ResponseBody::Empty);
    }
    if declared_json {
        return serde_json::from_slice(bytes).map(ResponseBody::Json);
    }
    Ok(ResponseBody::Text(String::from_utf8_lossy(bytes).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_success_is_parsed() -> Result<(), ApiError> {
        let body = normalize(RawResponse::json(200, r#"{"count":3}"#))?;
        assert_eq!(body, ResponseBody::Json(json!({"count": 3})));
        Ok(())
    }

    #[test]
    fn text_success_is_returned_verbatim() -> Result<(), ApiError> {
        let body = normalize(RawResponse::text(200, "pong"))?;
        assert_eq!(body, ResponseBody::Text("pong".into()));
        assert_eq!(body.decode::<String>()?, "pong");
        Ok(())
    }

    #[test]
    fn empty_success_decodes_as_unit() -> Result<(), ApiError> {
        let body = normalize(RawResponse::empty(204))?;
        assert_eq!(body, ResponseBody::Empty);
        body.decode::<()>()?;
        Ok(())
    }

    #[test]
    fn problem_json_failure_carries_payload() {
        let raw = RawResponse {
            status: 404,
            content_type: Some("application/problem+json".into()),
            body: br#"{"title":"Not Found","detail":"Movie 9 not found","status":404}"#.to_vec(),
        };
        let err = normalize(raw).expect_err("404 should fail");
        let failure = err.failure().expect("typed failure");
        assert_eq!(failure.status, 404);
        let problem = failure.problem.as_ref().expect("problem payload");
        assert_eq!(problem.detail.as_deref(), Some("Movie 9 not found"));
        assert_eq!(err.to_string(), "Not Found");
    }

    #[test]
    fn non_object_json_failure_has_no_problem() {
        let err = normalize(RawResponse::json(500, "[1,2]")).expect_err("500 should fail");
        assert_eq!(err.failure().and_then(|f| f.problem.clone()), None);
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn text_failure_has_no_problem() {
        let err = normalize(RawResponse::text(502, "Bad Gateway")).expect_err("502 should fail");
        assert_eq!(err.to_string(), "Request failed with status 502");
    }

    #[test]
    fn malformed_json_success_is_a_decode_error() {
        let err = normalize(RawResponse::json(200, "{oops")).expect_err("malformed");
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn content_type_detection() {
        assert!(is_json_content_type("application/json; charset=UTF-8"));
        assert!(is_json_content_type("Application/JSON"));
        assert!(is_json_content_type("application/problem+json"));
        assert!(!is_json_content_type("text/html"));
    }
}
