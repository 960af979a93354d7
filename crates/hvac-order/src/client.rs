//! Typed client for the `order-validate` function.
//!
//! ## Wire Contract
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST   | `/functions/v1/order-validate` | Validate a cart by `cart_id` and/or `user_id` |
//!
//! Headers on every request: `Content-Type: application/json`,
//! `apikey: <token>`, `Authorization: Bearer <token>`.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use url::Url;

use crate::config::ValidationConfig;
use crate::error::{ConfigError, OrderValidationError};
use crate::types::{ValidateCartRequest, ValidationResult};

const ENDPOINT: &str = "POST /functions/v1/order-validate";

/// Client for the `order-validate` function.
///
/// Holds no per-call state; clones share the underlying connection pool and
/// concurrent calls are independent of each other.
#[derive(Debug, Clone)]
pub struct CartValidationClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl CartValidationClient {
    /// Create a client from configuration.
    pub fn new(config: ValidationConfig) -> Result<Self, OrderValidationError> {
        let endpoint = config.endpoint()?;

        let mut builder = reqwest::Client::builder().default_headers(default_headers(&config)?);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| OrderValidationError::Http {
            endpoint: "client_init".into(),
            source: e,
        })?;

        Ok(Self { http, endpoint })
    }

    /// Create a client from `VITE_SUPABASE_URL` / `VITE_SUPABASE_ANON_KEY`.
    pub fn from_env() -> Result<Self, OrderValidationError> {
        Self::new(ValidationConfig::from_env()?)
    }

    /// Full URL requests are sent to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Ask the server whether a cart's contents, quantities and prices are
    /// currently valid.
    ///
    /// Calls `POST {base_url}/functions/v1/order-validate` exactly once.
    /// A non-2xx answer fails with [`OrderValidationError::Rejected`] whose
    /// message is the raw response body; it is not parsed as JSON.
    pub async fn validate_cart(
        &self,
        req: &ValidateCartRequest,
    ) -> Result<ValidationResult, OrderValidationError> {
        tracing::debug!(
            endpoint = ENDPOINT,
            has_cart_id = req.cart_id.is_some(),
            has_user_id = req.user_id.is_some(),
            "validating cart"
        );

        let resp = self
            .http
            .post(self.endpoint.clone())
            .json(req)
            .send()
            .await
            .map_err(|e| OrderValidationError::Http {
                endpoint: ENDPOINT.into(),
                source: e,
            })?;

        let status = resp.status();
        // A body that cannot be read is a transport failure on either path.
        let body = resp.text().await.map_err(|e| OrderValidationError::Http {
            endpoint: ENDPOINT.into(),
            source: e,
        })?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "order validation rejected");
            return Err(OrderValidationError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let result: ValidationResult =
            serde_json::from_str(&body).map_err(|e| OrderValidationError::Deserialization {
                endpoint: ENDPOINT.into(),
                source: e,
            })?;

        tracing::debug!(
            status = status.as_u16(),
            ok = result.ok,
            items = result.items.len(),
            mismatches = result.mismatches.len(),
            "order validation completed"
        );
        Ok(result)
    }

    /// Shorthand for [`Self::validate_cart`] from optional identifiers.
    pub async fn validate(
        &self,
        cart_id: Option<&str>,
        user_id: Option<&str>,
    ) -> Result<ValidationResult, OrderValidationError> {
        let req = ValidateCartRequest {
            cart_id: cart_id.map(str::to_owned),
            user_id: user_id.map(str::to_owned),
        };
        self.validate_cart(&req).await
    }
}

fn default_headers(config: &ValidationConfig) -> Result<HeaderMap, ConfigError> {
    let token = config.api_token.as_str();
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    let mut apikey = HeaderValue::from_str(token).map_err(|_| ConfigError::InvalidToken)?;
    apikey.set_sensitive(true);
    headers.insert(HeaderName::from_static("apikey"), apikey);
    let mut bearer =
        HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| ConfigError::InvalidToken)?;
    bearer.set_sensitive(true);
    headers.insert(AUTHORIZATION, bearer);
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_headers_carry_token_twice() {
        let config = ValidationConfig::new("https://abc.supabase.co", "anon").unwrap();
        let headers = default_headers(&config).unwrap();
        assert_eq!(headers["apikey"], "anon");
        assert_eq!(headers[AUTHORIZATION], "Bearer anon");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert!(headers[AUTHORIZATION].is_sensitive());
    }

    #[test]
    fn token_with_newline_is_a_config_error() {
        let config = ValidationConfig::new("https://abc.supabase.co", "an\non").unwrap();
        let err = CartValidationClient::new(config).unwrap_err();
        assert!(matches!(
            err,
            OrderValidationError::Config(ConfigError::InvalidToken)
        ));
    }

    #[test]
    fn client_resolves_endpoint_at_construction() {
        let config = ValidationConfig::new("https://abc.supabase.co", "anon").unwrap();
        let client = CartValidationClient::new(config).unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "https://abc.supabase.co/functions/v1/order-validate"
        );
    }
}
