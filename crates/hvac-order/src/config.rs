//! Order validation client configuration.
//!
//! The storefront deploys against a Supabase project, so the two required
//! values keep their frontend names: `VITE_SUPABASE_URL` and
//! `VITE_SUPABASE_ANON_KEY`. Both are validated when the configuration is
//! built; a client can only be constructed from a complete configuration.

use std::time::Duration;

use url::Url;
use zeroize::Zeroizing;

use crate::error::ConfigError;

/// Environment variable holding the project base URL.
pub const URL_VAR: &str = "VITE_SUPABASE_URL";
/// Environment variable holding the anonymous API key.
pub const TOKEN_VAR: &str = "VITE_SUPABASE_ANON_KEY";
/// Optional request timeout in seconds. Unset means no client-side timeout.
pub const TIMEOUT_VAR: &str = "VITE_ORDER_VALIDATE_TIMEOUT_SECS";

/// Path of the validation function below the project base URL.
pub(crate) const FUNCTION_PATH: &str = "functions/v1/order-validate";

/// Configuration for connecting to the `order-validate` function.
///
/// Custom `Debug` implementation redacts the `api_token` field
/// to prevent credential leakage in log output.
#[derive(Clone)]
pub struct ValidationConfig {
    /// Project base URL, e.g. `https://<ref>.supabase.co`.
    pub base_url: Url,
    /// Sent both as the `apikey` header and as the bearer token.
    pub api_token: Zeroizing<String>,
    /// Request timeout in seconds. `None` waits for the transport.
    pub timeout_secs: Option<u64>,
}

impl std::fmt::Debug for ValidationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ValidationConfig {
    /// Build a configuration from explicit values.
    ///
    /// Empty (or whitespace-only) values count as missing.
    pub fn new(base_url: &str, api_token: &str) -> Result<Self, ConfigError> {
        let base_url = base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::MissingUrl);
        }
        if api_token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }
        let base_url = Url::parse(base_url)
            .map_err(|e| ConfigError::InvalidUrl(URL_VAR.to_string(), e.to_string()))?;

        Ok(Self {
            base_url,
            api_token: Zeroizing::new(api_token.to_string()),
            timeout_secs: None,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `VITE_SUPABASE_URL` (required)
    /// - `VITE_SUPABASE_ANON_KEY` (required)
    /// - `VITE_ORDER_VALIDATE_TIMEOUT_SECS` (optional, no timeout when unset)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(URL_VAR).unwrap_or_default();
        let token = Zeroizing::new(lookup(TOKEN_VAR).unwrap_or_default());
        let mut config = Self::new(&url, &token)?;
        config.timeout_secs = lookup(TIMEOUT_VAR).and_then(|s| s.trim().parse().ok());
        Ok(config)
    }

    /// Set a request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Request timeout, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Full URL of the validation function.
    ///
    /// A trailing `/` on the base URL is not doubled.
    pub fn endpoint(&self) -> Result<Url, ConfigError> {
        let raw = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            FUNCTION_PATH
        );
        Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(URL_VAR.to_string(), e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn new_builds_valid_config() {
        let cfg = ValidationConfig::new("https://abc.supabase.co", "anon-key").unwrap();
        assert_eq!(cfg.base_url.as_str(), "https://abc.supabase.co/");
        assert_eq!(cfg.api_token.as_str(), "anon-key");
        assert_eq!(cfg.timeout_secs, None);
        assert_eq!(cfg.timeout(), None);
    }

    #[test]
    fn endpoint_appends_function_path_once() {
        let cfg = ValidationConfig::new("https://abc.supabase.co/", "k").unwrap();
        assert_eq!(
            cfg.endpoint().unwrap().as_str(),
            "https://abc.supabase.co/functions/v1/order-validate"
        );

        let cfg = ValidationConfig::new("http://127.0.0.1:54321/project", "k").unwrap();
        assert_eq!(
            cfg.endpoint().unwrap().as_str(),
            "http://127.0.0.1:54321/project/functions/v1/order-validate"
        );
    }

    #[test]
    fn empty_values_count_as_missing() {
        assert!(matches!(
            ValidationConfig::new("", "k"),
            Err(ConfigError::MissingUrl)
        ));
        assert!(matches!(
            ValidationConfig::new("https://abc.supabase.co", "  "),
            Err(ConfigError::MissingToken)
        ));
    }

    #[test]
    fn new_rejects_invalid_url() {
        let result = ValidationConfig::new("not a url", "k");
        assert!(matches!(result, Err(ConfigError::InvalidUrl(var, _)) if var == URL_VAR));
    }

    #[test]
    fn lookup_requires_both_variables() {
        let only_url = lookup_from(&[(URL_VAR, "https://abc.supabase.co")]);
        assert!(matches!(
            ValidationConfig::from_lookup(only_url),
            Err(ConfigError::MissingToken)
        ));

        let only_token = lookup_from(&[(TOKEN_VAR, "anon")]);
        assert!(matches!(
            ValidationConfig::from_lookup(only_token),
            Err(ConfigError::MissingUrl)
        ));
    }

    #[test]
    fn lookup_reads_optional_timeout() {
        let cfg = ValidationConfig::from_lookup(lookup_from(&[
            (URL_VAR, "https://abc.supabase.co"),
            (TOKEN_VAR, "anon"),
            (TIMEOUT_VAR, "12"),
        ]))
        .unwrap();
        assert_eq!(cfg.timeout(), Some(Duration::from_secs(12)));

        let cfg = ValidationConfig::from_lookup(lookup_from(&[
            (URL_VAR, "https://abc.supabase.co"),
            (TOKEN_VAR, "anon"),
            (TIMEOUT_VAR, "soon"),
        ]))
        .unwrap();
        assert_eq!(cfg.timeout_secs, None);
    }

    #[test]
    fn debug_redacts_token() {
        let cfg = ValidationConfig::new("https://abc.supabase.co", "secret-anon").unwrap();
        let debug = format!("{cfg:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret-anon"));
    }
}
