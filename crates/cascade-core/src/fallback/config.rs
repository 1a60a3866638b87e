//! Fallback strategy configuration

use super::classify::ErrorCategory;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How the provider order is computed for each invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackMode {
    /// Configured order, starting at the first provider every call
    Sequential,
    /// Rotate the starting provider across successive calls
    RoundRobin,
    /// Configured order; providers carry no separate priority attribute,
    /// so this matches `Sequential`
    Priority,
}

/// Error categories that permit moving on to the next provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetryOn {
    /// Continue past rate limit errors
    RateLimit,
    /// Continue past timeouts
    Timeout,
    /// Continue past other provider errors
    ProviderError,
    /// Continue past every retryable category
    All,
}

/// Configuration for the fallback strategy
///
/// Immutable once handed to a strategy. The default tries up to three
/// providers in configured order and falls through on every retryable
/// category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackConfig {
    /// Ordering mode
    pub mode: FallbackMode,
    /// Maximum number of providers to try per invocation
    pub max_retries: usize,
    /// Which error categories permit falling through to the next provider
    pub retry_on: Vec<RetryOn>,
    /// Deadline applied to each individual provider invocation
    #[serde(with = "humantime_serde")]
    pub timeout_per_provider: Duration,
    /// Whether to emit a log entry per failed attempt
    pub log_failures: bool,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            mode: FallbackMode::Sequential,
            max_retries: 3,
            retry_on: vec![RetryOn::All],
            timeout_per_provider: Duration::from_secs(30),
            log_failures: true,
        }
    }
}

impl FallbackConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ordering mode
    pub fn with_mode(mut self, mode: FallbackMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the maximum number of providers to try
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the retryable categories
    pub fn with_retry_on(mut self, retry_on: Vec<RetryOn>) -> Self {
        self.retry_on = retry_on;
        self
    }

    /// Set the per-provider timeout
    pub fn with_timeout_per_provider(mut self, timeout: Duration) -> Self {
        self.timeout_per_provider = timeout;
        self
    }

    /// Enable or disable per-attempt failure logging
    pub fn with_log_failures(mut self, log_failures: bool) -> Self {
        self.log_failures = log_failures;
        self
    }

    /// Whether a failed attempt in this category permits trying the next
    /// provider
    ///
    /// Authentication failures indicate misconfiguration rather than a
    /// transient fault and never fall through, even under `RetryOn::All`.
    /// Unclassified failures never fall through either. Unavailability is
    /// handled by the pre-check in the execution loop and never reaches
    /// this decision.
    pub fn should_retry(&self, category: ErrorCategory) -> bool {
        match category {
            ErrorCategory::Authentication | ErrorCategory::Unknown | ErrorCategory::Unavailable => {
                false
            }
            ErrorCategory::RateLimit => self.allows(RetryOn::RateLimit),
            ErrorCategory::Timeout => self.allows(RetryOn::Timeout),
            ErrorCategory::ProviderError => self.allows(RetryOn::ProviderError),
        }
    }

    fn allows(&self, wanted: RetryOn) -> bool {
        self.retry_on
            .iter()
            .any(|r| *r == wanted || *r == RetryOn::All)
    }
}
