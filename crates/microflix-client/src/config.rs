//! Gateway location settings.

/// Environment variable naming the gateway's internal base address.
pub const GATEWAY_BASE_URL_ENV: &str = "GATEWAY_BASE_URL";
/// Base address used when [`GATEWAY_BASE_URL_ENV`] is unset or blank.
pub const DEFAULT_GATEWAY_BASE_URL: &str = "http://gateway:8081";
/// Path prefix the browser-facing server forwards to the gateway.
pub const DEFAULT_GATEWAY_PREFIX: &str = "/gateway";

/// Where gateway requests go for each execution context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    base_url: String,
    prefix: String,
}

impl GatewayConfig {
    /// Build a config from an explicit base address and prefix.
    ///
    /// The base loses any trailing `/`; the prefix gains a leading `/` and
    /// loses a trailing one.
    #[must_use]
    pub fn new(base_url: impl AsRef<str>, prefix: impl AsRef<str>) -> Self {
        let base_url = base_url.as_ref().trim().trim_end_matches('/').to_string();
        let prefix = prefix.as_ref().trim().trim_matches('/');
        let prefix = if prefix.is_empty() {
            String::new()
        } else {
            format!("/{prefix}")
        };
        Self { base_url, prefix }
    }

    /// Read the base address from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the base address through `lookup`, falling back to the default
    /// address when the variable is unset or blank.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = lookup(GATEWAY_BASE_URL_ENV)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GATEWAY_BASE_URL.to_string());
        Self::new(base, DEFAULT_GATEWAY_PREFIX)
    }

    /// Replace the base address, keeping the prefix.
    #[must_use]
    pub fn with_base_url(self, base_url: impl AsRef<str>) -> Self {
        Self::new(base_url, self.prefix)
    }

    /// Gateway base address without a trailing `/`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Shared routing prefix, either empty or starting with `/`.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new(DEFAULT_GATEWAY_BASE_URL, DEFAULT_GATEWAY_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_environment_falls_back_to_default() {
        let config = GatewayConfig::from_lookup(|_| Some("   ".to_string()));
        assert_eq!(config.base_url(), DEFAULT_GATEWAY_BASE_URL);
        assert_eq!(config.prefix(), "/gateway");
    }

    #[test]
    fn environment_value_is_normalised() {
        let config = GatewayConfig::from_lookup(|key| {
            (key == GATEWAY_BASE_URL_ENV).then(|| "http://localhost:9000/".to_string())
        });
        assert_eq!(config.base_url(), "http://localhost:9000");
    }

    #[test]
    fn prefix_is_normalised() {
        let config = GatewayConfig::new("http://gw", "api/");
        assert_eq!(config.prefix(), "/api");
        assert_eq!(GatewayConfig::new("http://gw", "").prefix(), "");
    }
}
