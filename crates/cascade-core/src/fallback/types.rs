//! Attempt and result records for one invocation

use super::classify::ErrorCategory;
use crate::messages::CompletionResponse;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of one provider invocation within a fallback chain
///
/// Created exactly once per provider actually tried, including providers
/// skipped by the availability pre-check (those consume a slot).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attempt {
    /// Provider that was tried
    pub provider_name: String,
    /// Whether the invocation produced a completion
    pub success: bool,
    /// Scrubbed error message, for failed attempts
    pub error: Option<String>,
    /// Failure category, for failed attempts
    pub error_category: Option<ErrorCategory>,
    /// Wall-clock duration of the invocation
    #[serde(with = "humantime_serde")]
    pub duration: Duration,
}

impl Attempt {
    /// Record a successful invocation
    pub(super) fn succeeded(provider_name: impl Into<String>, duration: Duration) -> Self {
        Self {
            provider_name: provider_name.into(),
            success: true,
            error: None,
            error_category: None,
            duration,
        }
    }

    /// Record a failed invocation
    pub(super) fn failed(
        provider_name: impl Into<String>,
        error: impl Into<String>,
        category: ErrorCategory,
        duration: Duration,
    ) -> Self {
        Self {
            provider_name: provider_name.into(),
            success: false,
            error: Some(error.into()),
            error_category: Some(category),
            duration,
        }
    }

    /// Record a provider skipped by the availability pre-check
    pub(super) fn unavailable(provider_name: impl Into<String>) -> Self {
        Self {
            provider_name: provider_name.into(),
            success: false,
            error: Some("provider not available".to_string()),
            error_category: Some(ErrorCategory::Unavailable),
            duration: Duration::ZERO,
        }
    }
}

/// Outcome of one `execute` invocation
///
/// Individual provider failures are absorbed here rather than raised;
/// callers inspect `all_failed` and `attempts` to shape their own error
/// reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackResult {
    /// The completion, when any provider succeeded
    pub response: Option<CompletionResponse>,
    /// Name of the provider that produced the completion
    pub successful_provider: Option<String>,
    /// Every attempt made, in order
    pub attempts: Vec<Attempt>,
    /// Whether the whole chain was exhausted without a completion
    pub all_failed: bool,
}

impl FallbackResult {
    /// Build a result for a chain that produced a completion
    ///
    /// The successful attempt must already be the last entry of `attempts`.
    pub(super) fn success(
        response: CompletionResponse,
        provider_name: impl Into<String>,
        attempts: Vec<Attempt>,
    ) -> Self {
        Self {
            response: Some(response),
            successful_provider: Some(provider_name.into()),
            attempts,
            all_failed: false,
        }
    }

    /// Build a result for an exhausted chain
    pub(super) fn failure(attempts: Vec<Attempt>) -> Self {
        Self {
            response: None,
            successful_provider: None,
            attempts,
            all_failed: true,
        }
    }

    /// Number of providers actually tried
    pub fn total_attempts(&self) -> usize {
        self.attempts.len()
    }

    /// Scrubbed error message of the last failed attempt, if any
    pub fn last_error(&self) -> Option<&str> {
        self.attempts
            .iter()
            .rev()
            .find(|a| !a.success)
            .and_then(|a| a.error.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_result_invariants() {
        let attempts = vec![
            Attempt::failed("a", "500", ErrorCategory::ProviderError, Duration::ZERO),
            Attempt::succeeded("b", Duration::from_millis(10)),
        ];
        let result = FallbackResult::success(CompletionResponse::new("ok"), "b", attempts);

        assert!(!result.all_failed);
        assert_eq!(result.successful_provider.as_deref(), Some("b"));
        assert_eq!(result.total_attempts(), 2);
        assert!(result.attempts.last().map(|a| a.success).unwrap_or(false));
        assert!(result.attempts[..1].iter().all(|a| !a.success));
    }

    #[test]
    fn failure_result_invariants() {
        let result = FallbackResult::failure(vec![Attempt::unavailable("a")]);
        assert!(result.all_failed);
        assert!(result.response.is_none());
        assert!(result.successful_provider.is_none());
        assert_eq!(result.total_attempts(), 1);
    }

    #[test]
    fn unavailable_attempt_shape() {
        let attempt = Attempt::unavailable("ghost");
        assert!(!attempt.success);
        assert_eq!(attempt.error_category, Some(ErrorCategory::Unavailable));
        assert_eq!(attempt.duration, Duration::ZERO);
    }

    #[test]
    fn last_error_skips_the_successful_attempt() {
        let attempts = vec![
            Attempt::failed("a", "rate limited", ErrorCategory::RateLimit, Duration::ZERO),
            Attempt::succeeded("b", Duration::ZERO),
        ];
        let result = FallbackResult::success(CompletionResponse::new("ok"), "b", attempts);
        assert_eq!(result.last_error(), Some("rate limited"));
    }
}
