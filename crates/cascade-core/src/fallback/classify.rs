//! Failure classification

use crate::error::CascadeError;
use serde::{Deserialize, Serialize};

/// Category assigned to a failed attempt
///
/// A closed set: every provider failure maps to exactly one category, and
/// the retry decision is made per category by
/// [`FallbackConfig::should_retry`](super::FallbackConfig::should_retry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Credentials rejected
    Authentication,
    /// Request rate exceeded
    RateLimit,
    /// Deadline elapsed
    Timeout,
    /// Any other provider-originated failure
    ProviderError,
    /// Provider reported itself unavailable before invocation
    Unavailable,
    /// Failure the library cannot attribute to a provider
    Unknown,
}

impl ErrorCategory {
    /// Classify a provider failure
    pub fn classify(error: &CascadeError) -> Self {
        match error {
            CascadeError::Authentication { .. } => Self::Authentication,
            CascadeError::RateLimit { .. } => Self::RateLimit,
            CascadeError::Timeout { .. } => Self::Timeout,
            CascadeError::Provider { .. } | CascadeError::Stream { .. } => Self::ProviderError,
            CascadeError::Config { .. } | CascadeError::Other { .. } => Self::Unknown,
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Authentication => write!(f, "authentication"),
            Self::RateLimit => write!(f, "rate_limit"),
            Self::Timeout => write!(f, "timeout"),
            Self::ProviderError => write!(f, "provider_error"),
            Self::Unavailable => write!(f, "unavailable"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}
