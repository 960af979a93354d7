//! Order validation error types.

/// Configuration errors. Raised while building a [`crate::ValidationConfig`]
/// or a [`crate::CartValidationClient`], never during a request.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("VITE_SUPABASE_URL is required")]
    MissingUrl,
    #[error("VITE_SUPABASE_ANON_KEY is required")]
    MissingToken,
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("API token contains characters that are not valid in an HTTP header")]
    InvalidToken,
}

/// Errors from an `order-validate` call.
#[derive(Debug, thiserror::Error)]
pub enum OrderValidationError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The function returned a non-2xx status. The message is the response
    /// body verbatim.
    #[error("{body}")]
    Rejected { status: u16, body: String },
    /// A 2xx response whose body is not a validation verdict.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: serde_json::Error,
    },
}

impl OrderValidationError {
    /// HTTP status of a rejected call, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::Http { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
