//! Resolution of logical gateway paths into fetchable URLs.
//!
//! Code in the browser reaches the gateway through the page origin under the
//! shared prefix; code running next to the gateway calls it directly on its
//! internal address with the prefix removed.

use std::borrow::Cow;
use std::fmt;

use crate::config::GatewayConfig;

/// Where a request is issued from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionContext {
    /// Server-side code with direct network reach to the gateway.
    Origin,
    /// Code running in the user's browser.
    Browser,
}

impl ExecutionContext {
    /// Context implied by the compilation target.
    #[must_use]
    pub const fn detect() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::Browser
        } else {
            Self::Origin
        }
    }

    /// Stable label for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Origin => "origin",
            Self::Browser => "browser",
        }
    }
}

impl fmt::Display for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve `path` for the given execution context.
///
/// Absolute `http://` or `https://` URLs are returned untouched. Anything else
/// is given a single leading `/`; the origin context then strips the shared
/// prefix and joins the path onto the gateway base, while the browser context
/// adds the prefix when it is missing.
#[must_use]
pub fn resolve(path: &str, context: ExecutionContext, config: &GatewayConfig) -> String {
    if is_absolute(path) {
        return path.to_string();
    }

    let normalized = format!("/{}", path.trim_start_matches('/'));
    let prefix = config.prefix();

    match context {
        ExecutionContext::Origin => {
            let stripped = strip_prefix(&normalized, prefix);
            format!("{}{}", config.base_url(), stripped)
        }
        ExecutionContext::Browser => {
            if has_prefix(&normalized, prefix) {
                normalized
            } else {
                format!("{prefix}{normalized}")
            }
        }
    }
}

fn is_absolute(path: &str) -> bool {
    starts_with_ignore_case(path, "http://") || starts_with_ignore_case(path, "https://")
}

fn starts_with_ignore_case(value: &str, scheme: &str) -> bool {
    value
        .get(..scheme.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(scheme))
}

// Prefix match on a whole segment: "/gateway" and "/gateway/x" match,
// "/gatewayish" does not.
fn has_prefix(path: &str, prefix: &str) -> bool {
    if prefix.is_empty() {
        return false;
    }
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(['/', '?']))
}

fn strip_prefix<'a>(path: &'a str, prefix: &str) -> Cow<'a, str> {
    if !has_prefix(path, prefix) {
        return Cow::Borrowed(path);
    }
    match &path[prefix.len()..] {
        "" => Cow::Borrowed("/"),
        rest if rest.starts_with('?') => Cow::Owned(format!("/{rest}")),
        rest => Cow::Borrowed(rest),
    }
}
