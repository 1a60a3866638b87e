//! Scenario tests for the fallback strategy


use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::{FallbackConfig, FallbackStrategy};
use crate::error::{CascadeError, CascadeResult};
use crate::messages::{CompletionResponse, Message};
use crate::options::CompletionOptions;
use crate::provider::CompletionProvider;
use crate::streaming::{CompletionStream, StreamChunk};

/// What a scripted provider does when invoked
#[derive(Clone, Copy)]
enum Script {
    /// Succeed with the given content
    Ok(&'static str),
    /// Fail with an authentication error
    AuthFailure,
    /// Fail with a rate limit error
    RateLimited,
    /// Fail with a provider error
    ProviderDown,
    /// Fail with an unclassifiable error
    Inexplicable,
    /// Sleep before answering, for deadline tests
    Hang(Duration),
    /// Report unavailable from the pre-check
    Unavailable,
}

/// Test double implementing the provider contract from a fixed script
struct ScriptedProvider {
    name: &'static str,
    script: Script,
    calls: AtomicUsize,
    last_options: Mutex<Option<CompletionOptions>>,
}

impl ScriptedProvider {
    fn new(name: &'static str, script: Script) -> Arc<Self> {
        Arc::new(Self {
            name,
            script,
            calls: AtomicUsize::new(0),
            last_options: Mutex::new(None),
        })
    }

    /// Number of times `complete` or `complete_stream` was invoked
    fn calls(&self) -> usize {
        self.calls.load(AtomicOrdering::SeqCst)
    }

    /// Options seen on the most recent invocation
    fn last_options(&self) -> Option<CompletionOptions> {
        self.last_options.lock().expect("options lock").clone()
    }

    fn record_invocation(&self, options: &CompletionOptions) {
        self.calls.fetch_add(1, AtomicOrdering::SeqCst);
        *self.last_options.lock().expect("options lock") = Some(options.clone());
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    fn name(&self) -> &str {
        self.name
    }

    fn default_options(&self) -> CompletionOptions {
        CompletionOptions::new()
            .with_model(format!("{}-default", self.name))
            .with_temperature(0.3)
    }

    fn is_available(&self) -> bool {
        !matches!(self.script, Script::Unavailable)
    }

    async fn complete(
        &self,
        _messages: &[Message],
        options: &CompletionOptions,
    ) -> CascadeResult<CompletionResponse> {
        self.record_invocation(options);
        match self.script {
            Script::Ok(content) => Ok(CompletionResponse::new(content).with_finish_reason("stop")),
            Script::Hang(delay) => {
                tokio::time::sleep(delay).await;
                Ok(CompletionResponse::new("late"))
            }
            Script::AuthFailure => Err(CascadeError::authentication(self.name, "invalid api key")),
            Script::RateLimited => {
                Err(CascadeError::rate_limit(self.name, "429 too many requests"))
            }
            Script::ProviderDown => {
                Err(CascadeError::provider(self.name, "503 service unavailable"))
            }
            Script::Inexplicable => Err(CascadeError::other("wedged")),
            Script::Unavailable => {
                Err(CascadeError::provider(self.name, "should have been skipped"))
            }
        }
    }

    async fn complete_stream(
        &self,
        _messages: &[Message],
        options: &CompletionOptions,
    ) -> CascadeResult<CompletionStream> {
        self.record_invocation(options);
        match self.script {
            Script::Ok(content) => {
                let chunks: Vec<CascadeResult<StreamChunk>> = vec![
                    Ok(StreamChunk::content(content)),
                    Ok(StreamChunk::final_chunk(None, Some("stop".to_string()))),
                ];
                Ok(Box::pin(tokio_stream::iter(chunks)))
            }
            Script::Hang(delay) => {
                tokio::time::sleep(delay).await;
                let chunks: Vec<CascadeResult<StreamChunk>> =
                    vec![Ok(StreamChunk::final_chunk(None, None))];
                Ok(Box::pin(tokio_stream::iter(chunks)))
            }
            Script::AuthFailure => Err(CascadeError::authentication(self.name, "invalid api key")),
            Script::RateLimited => {
                Err(CascadeError::rate_limit(self.name, "429 too many requests"))
            }
            Script::ProviderDown => {
                Err(CascadeError::provider(self.name, "503 service unavailable"))
            }
            Script::Inexplicable => Err(CascadeError::other("wedged")),
            Script::Unavailable => {
                Err(CascadeError::provider(self.name, "should have been skipped"))
            }
        }
    }
}

fn as_dyn(providers: &[Arc<ScriptedProvider>]) -> Vec<Arc<dyn CompletionProvider>> {
    providers
        .iter()
        .map(|p| Arc::clone(p) as Arc<dyn CompletionProvider>)
        .collect()
}

fn strategy(providers: &[Arc<ScriptedProvider>], config: FallbackConfig) -> FallbackStrategy {
    FallbackStrategy::new(as_dyn(providers), config)
}

fn prompt() -> Vec<Message> {
    vec![
        Message::system("You are a helpful assistant"),
        Message::user("Say hello"),
    ]
}

/// Route strategy logs through the test harness when `RUST_LOG` is set
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
