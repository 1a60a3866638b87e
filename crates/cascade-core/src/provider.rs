//! The completion provider contract

use crate::error::CascadeResult;
use crate::messages::{CompletionResponse, Message};
use crate::options::CompletionOptions;
use crate::streaming::CompletionStream;
use async_trait::async_trait;

/// Unified trait for interchangeable completion providers
///
/// The fallback strategy treats every provider uniformly through this trait;
/// concrete implementations own their transport, authentication, and payload
/// encoding. Providers are registered as `Arc<dyn CompletionProvider>` and
/// outlive any single invocation.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Stable identity of this provider
    fn name(&self) -> &str;

    /// Options this provider applies when the caller leaves fields unset
    fn default_options(&self) -> CompletionOptions {
        CompletionOptions::default()
    }

    /// Whether this provider can currently serve requests
    ///
    /// Must be cheap and side-effect free; no network I/O.
    fn is_available(&self) -> bool {
        true
    }

    /// Models this provider can serve
    fn models(&self) -> Vec<String> {
        Vec::new()
    }

    /// Generate a completion for the given conversation
    async fn complete(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> CascadeResult<CompletionResponse>;

    /// Open a streaming completion for the given conversation
    async fn complete_stream(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> CascadeResult<CompletionStream>;
}
