//! Per-call completion options and merge semantics

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Generation options for a single completion call
///
/// Every field is optional. Callers typically set a few fields and let the
/// provider's defaults fill the rest; see [`CompletionOptions::merged_over`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionOptions {
    /// Model name/ID
    pub model: Option<String>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Top-p sampling
    pub top_p: Option<f32>,
    /// Frequency penalty
    pub frequency_penalty: Option<f32>,
    /// Presence penalty
    pub presence_penalty: Option<f32>,
    /// Stop sequences
    pub stop: Option<Vec<String>>,
    /// Per-call timeout, overriding the strategy's per-provider timeout
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
}

impl CompletionOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set max tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set top-p
    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Set the frequency penalty
    pub fn with_frequency_penalty(mut self, penalty: f32) -> Self {
        self.frequency_penalty = Some(penalty);
        self
    }

    /// Set the presence penalty
    pub fn with_presence_penalty(mut self, penalty: f32) -> Self {
        self.presence_penalty = Some(penalty);
        self
    }

    /// Set stop sequences
    pub fn with_stop(mut self, stop: Vec<String>) -> Self {
        self.stop = Some(stop);
        self
    }

    /// Set the per-call timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Merge these options over a base set
    ///
    /// Field-by-field: a `Some` in `self` wins, a `None` falls back to the
    /// corresponding field of `base`. Used to layer caller options over a
    /// provider's defaults before each invocation.
    pub fn merged_over(&self, base: &CompletionOptions) -> CompletionOptions {
        CompletionOptions {
            model: self.model.clone().or_else(|| base.model.clone()),
            temperature: self.temperature.or(base.temperature),
            max_tokens: self.max_tokens.or(base.max_tokens),
            top_p: self.top_p.or(base.top_p),
            frequency_penalty: self.frequency_penalty.or(base.frequency_penalty),
            presence_penalty: self.presence_penalty.or(base.presence_penalty),
            stop: self.stop.clone().or_else(|| base.stop.clone()),
            timeout: self.timeout.or(base.timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_prefers_caller_fields() {
        let base = CompletionOptions::new()
            .with_model("provider-default")
            .with_temperature(0.2)
            .with_max_tokens(1024);
        let caller = CompletionOptions::new().with_model("caller-model");

        let merged = caller.merged_over(&base);
        assert_eq!(merged.model.as_deref(), Some("caller-model"));
        assert_eq!(merged.temperature, Some(0.2));
        assert_eq!(merged.max_tokens, Some(1024));
    }

    #[test]
    fn merge_of_empty_options_is_base() {
        let base = CompletionOptions::new()
            .with_model("m")
            .with_stop(vec!["END".into()])
            .with_timeout(Duration::from_secs(10));

        let merged = CompletionOptions::new().merged_over(&base);
        assert_eq!(merged, base);
    }

    #[test]
    fn merge_keeps_caller_timeout() {
        let base = CompletionOptions::new().with_timeout(Duration::from_secs(60));
        let caller = CompletionOptions::new().with_timeout(Duration::from_secs(5));

        let merged = caller.merged_over(&base);
        assert_eq!(merged.timeout, Some(Duration::from_secs(5)));
    }
}
