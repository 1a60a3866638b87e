//! Multi-provider completion fallback
//!
//! Tries interchangeable completion providers in a configured order,
//! records every attempt, and continues past retryable failures until a
//! completion succeeds or the chain is exhausted.

mod builder;
mod classify;
mod config;
mod ordering;
mod registry;
mod strategy;
mod types;

#[cfg(test)]
mod tests;

pub use builder::FallbackStrategyBuilder;
pub use classify::ErrorCategory;
pub use config::{FallbackConfig, FallbackMode, RetryOn};
pub use strategy::{FailureCallback, FallbackStrategy, StreamExecution};
pub use types::{Attempt, FallbackResult};
