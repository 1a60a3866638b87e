//! Builder for fallback strategies

use std::sync::Arc;
use std::sync::atomic::AtomicUsize;

use super::config::FallbackConfig;
use super::strategy::{FailureCallback, FallbackStrategy};
use crate::error::{CascadeError, CascadeResult};
use crate::provider::CompletionProvider;

/// Builder for [`FallbackStrategy`]
///
/// Unlike `FallbackStrategy::new`, `build` rejects an empty provider list.
pub struct FallbackStrategyBuilder {
    providers: Vec<Arc<dyn CompletionProvider>>,
    config: FallbackConfig,
    on_failure: Option<FailureCallback>,
}

impl FallbackStrategyBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
            config: FallbackConfig::default(),
            on_failure: None,
        }
    }

    /// Add a provider to the end of the chain
    pub fn provider(mut self, provider: Arc<dyn CompletionProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Replace the provider list
    pub fn providers(mut self, providers: Vec<Arc<dyn CompletionProvider>>) -> Self {
        self.providers = providers;
        self
    }

    /// Set the configuration
    pub fn config(mut self, config: FallbackConfig) -> Self {
        self.config = config;
        self
    }

    /// Register a callback invoked on every failed attempt
    pub fn on_failure(mut self, callback: FailureCallback) -> Self {
        self.on_failure = Some(callback);
        self
    }

    /// Build the strategy
    pub fn build(self) -> CascadeResult<FallbackStrategy> {
        if self.providers.is_empty() {
            return Err(CascadeError::config("no providers configured for fallback"));
        }

        Ok(FallbackStrategy {
            providers: self.providers,
            config: self.config,
            cursor: AtomicUsize::new(0),
            on_failure: self.on_failure,
        })
    }
}

impl Default for FallbackStrategyBuilder {
    fn default() -> Self {
        Self::new()
    }
}
