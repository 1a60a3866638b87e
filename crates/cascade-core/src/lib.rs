//! Cascade Core Library
//!
//! Resilience layer over interchangeable text-completion providers: invokes
//! one of several configured providers and automatically falls back to the
//! next on failure, with configurable ordering, retry policy, per-provider
//! and whole-chain timeouts, and structured attempt reporting.
//!
//! Callers implement [`CompletionProvider`] for each vendor client, register
//! the providers with a [`FallbackStrategy`], and inspect the returned
//! [`FallbackResult`] to see what happened.

pub mod error;
pub mod fallback;
pub mod messages;
pub mod options;
pub mod provider;
pub mod sanitize;
pub mod streaming;

// Re-export commonly used types
pub use error::{CascadeError, CascadeResult};
pub use fallback::{
    Attempt, ErrorCategory, FailureCallback, FallbackConfig, FallbackMode, FallbackResult,
    FallbackStrategy, FallbackStrategyBuilder, RetryOn, StreamExecution,
};
pub use messages::{CompletionResponse, Message, MessageRole, TokenUsage};
pub use options::CompletionOptions;
pub use provider::CompletionProvider;
pub use streaming::{CompletionStream, StreamChunk};
