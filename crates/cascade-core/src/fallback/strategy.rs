//! Execution engine for the fallback chain

use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::time::{Duration, Instant};

use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::builder::FallbackStrategyBuilder;
use super::classify::ErrorCategory;
use super::config::FallbackConfig;
use super::ordering::plan_indices;
use super::types::{Attempt, FallbackResult};
use crate::error::{CascadeError, CascadeResult};
use crate::messages::{CompletionResponse, Message};
use crate::options::CompletionOptions;
use crate::provider::CompletionProvider;
use crate::sanitize::scrub_error_text;
use crate::streaming::CompletionStream;

/// Callback invoked synchronously after each failed attempt, never on
/// success. An error returned by the callback is logged and swallowed.
pub type FailureCallback = Arc<dyn Fn(&Attempt) -> CascadeResult<()> + Send + Sync>;

/// Outcome of a streaming invocation that found a willing provider
pub struct StreamExecution {
    /// The open completion stream
    pub stream: CompletionStream,
    /// Provider that accepted the request
    pub provider_name: String,
    /// Attempts recorded before a provider accepted
    pub attempts: Vec<Attempt>,
}

/// Multi-provider completion strategy with automatic fallback
///
/// Holds the configured provider list, the immutable configuration, and the
/// round-robin rotation cursor. One `execute` call is one sequential task;
/// providers are tried strictly one after another, never raced.
pub struct FallbackStrategy {
    pub(super) providers: Vec<Arc<dyn CompletionProvider>>,
    pub(super) config: FallbackConfig,
    pub(super) cursor: AtomicUsize,
    pub(super) on_failure: Option<FailureCallback>,
}

impl FallbackStrategy {
    /// Create a strategy over the given providers
    ///
    /// An empty provider list is accepted; `execute` then reports
    /// `all_failed` with zero attempts. Use the builder to reject empty
    /// lists at construction time.
    pub fn new(providers: Vec<Arc<dyn CompletionProvider>>, config: FallbackConfig) -> Self {
        Self {
            providers,
            config,
            cursor: AtomicUsize::new(0),
            on_failure: None,
        }
    }

    /// Create a builder
    pub fn builder() -> FallbackStrategyBuilder {
        FallbackStrategyBuilder::new()
    }

    /// The strategy's configuration
    pub fn config(&self) -> &FallbackConfig {
        &self.config
    }

    /// Register a callback invoked on every failed attempt
    pub fn set_on_failure(&mut self, callback: FailureCallback) {
        self.on_failure = Some(callback);
    }

    /// Run the fallback chain for one completion request
    ///
    /// Tries providers in the configured order until one succeeds, a
    /// non-retryable failure occurs, or the chain is exhausted. Provider
    /// failures are absorbed into the result's attempt list and never
    /// raised to the caller.
    pub async fn execute(
        &self,
        messages: &[Message],
        options: Option<&CompletionOptions>,
    ) -> FallbackResult {
        let mut attempts = Vec::new();

        for provider in self.plan() {
            if !provider.is_available() {
                if self.config.log_failures {
                    warn!(provider = provider.name(), "provider unavailable, skipping");
                }
                let attempt = Attempt::unavailable(provider.name());
                self.notify_failure(&attempt);
                attempts.push(attempt);
                continue;
            }

            let merged = self.merge_options(provider.as_ref(), options);
            let started = Instant::now();

            match self.invoke(provider.as_ref(), messages, &merged).await {
                Ok(response) => {
                    let duration = started.elapsed();
                    if !attempts.is_empty() {
                        info!(
                            provider = provider.name(),
                            failed_attempts = attempts.len(),
                            "completion succeeded after fallback"
                        );
                    }
                    attempts.push(Attempt::succeeded(provider.name(), duration));
                    return FallbackResult::success(response, provider.name(), attempts);
                }
                Err(error) => {
                    let duration = started.elapsed();
                    let category = ErrorCategory::classify(&error);
                    if self.config.log_failures {
                        warn!(
                            provider = provider.name(),
                            category = %category,
                            error = %error,
                            "provider attempt failed"
                        );
                    }
                    let attempt = Attempt::failed(
                        provider.name(),
                        scrub_error_text(&error.to_string()),
                        category,
                        duration,
                    );
                    self.notify_failure(&attempt);
                    attempts.push(attempt);

                    if !self.config.should_retry(category) {
                        debug!(category = %category, "category not retryable, stopping chain");
                        break;
                    }
                }
            }
        }

        FallbackResult::failure(attempts)
    }

    /// Run the fallback chain under a single whole-chain deadline
    ///
    /// When `deadline` is `None`, the deadline defaults to
    /// `timeout_per_provider x provider_count`. An elapsed deadline cancels
    /// the remaining chain and surfaces as a timeout error; this is the only
    /// error the strategy raises to callers.
    pub async fn execute_with_timeout(
        &self,
        messages: &[Message],
        options: Option<&CompletionOptions>,
        deadline: Option<Duration>,
    ) -> CascadeResult<FallbackResult> {
        let deadline = deadline
            .unwrap_or_else(|| self.config.timeout_per_provider * self.providers.len() as u32);

        match timeout(deadline, self.execute(messages, options)).await {
            Ok(result) => Ok(result),
            Err(_) => {
                warn!(deadline_secs = deadline.as_secs(), "fallback chain deadline elapsed");
                Err(CascadeError::timeout(deadline.as_secs()))
            }
        }
    }

    /// Run the fallback chain for a streaming completion request
    ///
    /// Failures while opening a stream follow the same classification and
    /// retry rules as `execute`. Once a stream is handed out, mid-stream
    /// failures belong to the caller; streams are not restartable.
    pub async fn execute_stream(
        &self,
        messages: &[Message],
        options: Option<&CompletionOptions>,
    ) -> CascadeResult<StreamExecution> {
        let mut attempts = Vec::new();

        for provider in self.plan() {
            if !provider.is_available() {
                if self.config.log_failures {
                    warn!(provider = provider.name(), "provider unavailable, skipping");
                }
                let attempt = Attempt::unavailable(provider.name());
                self.notify_failure(&attempt);
                attempts.push(attempt);
                continue;
            }

            let merged = self.merge_options(provider.as_ref(), options);
            let per_call = merged.timeout.unwrap_or(self.config.timeout_per_provider);
            let started = Instant::now();

            let opened = match timeout(per_call, provider.complete_stream(messages, &merged)).await
            {
                Ok(result) => result,
                Err(_) => Err(CascadeError::timeout(per_call.as_secs())),
            };

            match opened {
                Ok(stream) => {
                    if !attempts.is_empty() {
                        info!(
                            provider = provider.name(),
                            failed_attempts = attempts.len(),
                            "stream opened after fallback"
                        );
                    }
                    return Ok(StreamExecution {
                        stream,
                        provider_name: provider.name().to_string(),
                        attempts,
                    });
                }
                Err(error) => {
                    let duration = started.elapsed();
                    let category = ErrorCategory::classify(&error);
                    if self.config.log_failures {
                        warn!(
                            provider = provider.name(),
                            category = %category,
                            error = %error,
                            "stream attempt failed"
                        );
                    }
                    let attempt = Attempt::failed(
                        provider.name(),
                        scrub_error_text(&error.to_string()),
                        category,
                        duration,
                    );
                    self.notify_failure(&attempt);
                    attempts.push(attempt);

                    if !self.config.should_retry(category) {
                        debug!(category = %category, "category not retryable, stopping chain");
                        break;
                    }
                }
            }
        }

        Err(CascadeError::stream(summarize_attempts(&attempts)))
    }

    /// Ordered providers to try for this invocation, truncated to the
    /// configured budget
    fn plan(&self) -> Vec<Arc<dyn CompletionProvider>> {
        plan_indices(self.config.mode, self.providers.len(), &self.cursor)
            .into_iter()
            .take(self.config.max_retries)
            .map(|i| Arc::clone(&self.providers[i]))
            .collect()
    }

    /// Layer caller options over the provider's defaults
    fn merge_options(
        &self,
        provider: &dyn CompletionProvider,
        options: Option<&CompletionOptions>,
    ) -> CompletionOptions {
        let defaults = provider.default_options();
        match options {
            Some(options) => options.merged_over(&defaults),
            None => defaults,
        }
    }

    /// Invoke one provider under the per-provider deadline
    async fn invoke(
        &self,
        provider: &dyn CompletionProvider,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> CascadeResult<CompletionResponse> {
        let per_call = options.timeout.unwrap_or(self.config.timeout_per_provider);
        match timeout(per_call, provider.complete(messages, options)).await {
            Ok(result) => result,
            Err(_) => Err(CascadeError::timeout(per_call.as_secs())),
        }
    }

    fn notify_failure(&self, attempt: &Attempt) {
        if let Some(callback) = &self.on_failure {
            if let Err(error) = callback(attempt) {
                warn!(
                    provider = %attempt.provider_name,
                    error = %error,
                    "failure callback returned an error"
                );
            }
        }
    }
}

impl std::fmt::Debug for FallbackStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackStrategy")
            .field("providers", &self.configured_providers())
            .field("config", &self.config)
            .field("has_failure_callback", &self.on_failure.is_some())
            .finish()
    }
}

fn summarize_attempts(attempts: &[Attempt]) -> String {
    if attempts.is_empty() {
        return "no providers configured".to_string();
    }

    let detail: Vec<String> = attempts
        .iter()
        .map(|a| {
            format!(
                "{}: {}",
                a.provider_name,
                a.error.as_deref().unwrap_or("unknown error")
            )
        })
        .collect();
    format!("all providers failed to open a stream ({})", detail.join("; "))
}
