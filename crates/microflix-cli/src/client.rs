//! Application context, error types and failure classification for the CLI.

use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

use anyhow::anyhow;
use microflix_api_models::SessionRecord;
use microflix_client::{ApiClient, ApiError, ExecutionContext, GatewayConfig};
use microflix_session::{FileStorage, SessionStore};
use url::Url;

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

/// Message shown when a command needs a session and none is stored.
pub(crate) const SIGNED_OUT_MESSAGE: &str = "not signed in; run `microflix login` first";
/// Message shown after the gateway rejected the stored token.
pub(crate) const EXPIRED_MESSAGE: &str =
    "session expired or was revoked; run `microflix login` again";

/// Application context passed to command handlers.
pub(crate) struct AppContext {
    pub(crate) api: ApiClient,
    pub(crate) session: SessionStore<FileStorage>,
}

impl AppContext {
    /// Build the gateway client and the file-backed session store.
    pub(crate) fn new(gateway_url: &str, session_dir: PathBuf) -> CliResult<Self> {
        let base = parse_gateway_url(gateway_url).map_err(CliError::validation)?;
        let config = GatewayConfig::default().with_base_url(base.as_str());
        let api = ApiClient::new(config, ExecutionContext::Origin)
            .map_err(|err| CliError::failure(anyhow!(err).context("failed to build HTTP client")))?;
        Ok(Self {
            api,
            session: SessionStore::new(FileStorage::new(session_dir)),
        })
    }

    /// The stored session, or a validation error when signed out.
    pub(crate) fn require_session(&self) -> CliResult<SessionRecord> {
        self.session
            .load()
            .filter(SessionRecord::is_authenticated)
            .ok_or_else(|| CliError::validation(SIGNED_OUT_MESSAGE))
    }

    /// Map a gateway error to a CLI error. A 401 also clears the stored
    /// session.
    pub(crate) fn classify(&self, err: ApiError) -> CliError {
        if err.is_unauthorized() {
            self.session.clear();
            return CliError::failure(anyhow!(EXPIRED_MESSAGE));
        }
        classify_api_error(err)
    }
}

/// Parse the gateway base address provided to the CLI.
pub(crate) fn parse_gateway_url(input: &str) -> Result<Url, String> {
    let url = input
        .trim()
        .parse::<Url>()
        .map_err(|err| format!("invalid gateway URL '{input}': {err}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!(
            "invalid gateway URL '{input}': unsupported scheme '{other}'"
        )),
    }
}

/// Classify a gateway error: client-side input problems are validation
/// errors, everything else is an operational failure.
pub(crate) fn classify_api_error(err: ApiError) -> CliError {
    let Some(failure) = err.failure() else {
        return CliError::failure(err);
    };

    let message = failure
        .user_message()
        .map_or_else(|| failure.message(), str::to_string);

    if matches!(failure.status, 400 | 409 | 422) {
        CliError::validation(message)
    } else if failure.problem.is_some() {
        CliError::failure(anyhow!("{message} (status {})", failure.status))
    } else {
        CliError::failure(anyhow!(message))
    }
}
