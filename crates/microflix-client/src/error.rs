//! Error types surfaced by gateway calls.

use std::error::Error as StdError;
use std::fmt::{self, Display, Formatter};

use microflix_api_models::ProblemDetails;
use thiserror::Error;

/// Boxed failure raised by the underlying HTTP stack.
pub type TransportError = Box<dyn StdError + Send + Sync + 'static>;

/// Errors returned by [`crate::ApiClient`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("gateway transport failure")]
    Transport(#[source] TransportError),
    /// The gateway answered with a non-success status.
    #[error(transparent)]
    Status(#[from] TypedFailure),
    /// A success body did not match the expected shape.
    #[error("failed to decode gateway response")]
    Decode(#[source] serde_json::Error),
    /// A request body could not be serialised.
    #[error("failed to encode request body")]
    Encode(#[source] serde_json::Error),
}

impl ApiError {
    /// HTTP status of a typed failure.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status(failure) => Some(failure.status),
            _ => None,
        }
    }

    /// The typed failure, when the gateway answered with an error status.
    #[must_use]
    pub const fn failure(&self) -> Option<&TypedFailure> {
        match self {
            Self::Status(failure) => Some(failure),
            _ => None,
        }
    }

    /// True for a 401 response.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// True for a 404 response.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Non-success response carrying its status and an optional problem payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedFailure {
    /// HTTP status code.
    pub status: u16,
    /// Parsed problem details, present only for JSON object bodies.
    pub problem: Option<ProblemDetails>,
}

impl TypedFailure {
    /// Construct a failure.
    #[must_use]
    pub const fn new(status: u16, problem: Option<ProblemDetails>) -> Self {
        Self { status, problem }
    }

    /// Human-readable message: the problem's title, then its detail, then a
    /// generic status line.
    #[must_use]
    pub fn message(&self) -> String {
        self.problem
            .as_ref()
            .and_then(ProblemDetails::message)
            .map_or_else(
                || format!("Request failed with status {}", self.status),
                str::to_string,
            )
    }

    /// Text suitable for showing to an end user: the problem's detail, then
    /// its title. `None` when neither is present.
    #[must_use]
    pub fn user_message(&self) -> Option<&str> {
        let problem = self.problem.as_ref()?;
        [problem.detail.as_deref(), problem.title.as_deref()]
            .into_iter()
            .flatten()
            .find(|text| !text.trim().is_empty())
    }
}

impl Display for TypedFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl StdError for TypedFailure {}
