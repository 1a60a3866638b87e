//! Error types for the cascade library

use thiserror::Error;

/// Result type alias for cascade operations
pub type CascadeResult<T> = Result<T, CascadeError>;

/// Unified error type for the cascade library
///
/// Provider implementations report failures through the first four variants;
/// the remaining variants cover the strategy's own failure modes. Each
/// variant carries the provider name where one is known.
#[derive(Error, Debug, Clone)]
pub enum CascadeError {
    /// Credentials were rejected by a provider
    #[error("Authentication failed for {provider}: {message}")]
    Authentication { provider: String, message: String },

    /// A provider signalled that the request rate was exceeded
    #[error("Rate limited by {provider}: {message}")]
    RateLimit { provider: String, message: String },

    /// A request did not complete within its deadline
    #[error("Timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    /// Any other failure originating inside a provider
    #[error("Provider {provider} error: {message}")]
    Provider { provider: String, message: String },

    /// A streaming request failed
    #[error("Stream error: {message}")]
    Stream { message: String },

    /// Invalid or missing configuration
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Anything the library cannot attribute to a provider
    #[error("Error: {message}")]
    Other { message: String },
}

impl CascadeError {
    /// Create a new authentication error
    pub fn authentication(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Authentication {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a new rate limit error
    pub fn rate_limit(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RateLimit {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a new timeout error
    pub fn timeout(seconds: u64) -> Self {
        Self::Timeout { seconds }
    }

    /// Create a new provider error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a new stream error
    pub fn stream(message: impl Into<String>) -> Self {
        Self::Stream {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Name of the provider this error originated from, if known
    pub fn provider_name(&self) -> Option<&str> {
        match self {
            Self::Authentication { provider, .. }
            | Self::RateLimit { provider, .. }
            | Self::Provider { provider, .. } => Some(provider),
            _ => None,
        }
    }
}
