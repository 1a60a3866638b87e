//! Provider registry operations

use std::sync::Arc;
use std::sync::atomic::Ordering;

use super::strategy::FallbackStrategy;
use crate::provider::CompletionProvider;

impl FallbackStrategy {
    /// Append a provider to the end of the chain
    pub fn add_provider(&mut self, provider: Arc<dyn CompletionProvider>) {
        self.providers.push(provider);
    }

    /// Remove a provider by name
    ///
    /// Returns whether a provider was removed. The rotation cursor is left
    /// in place; a stale cursor is tolerated by the ordering computation.
    pub fn remove_provider(&mut self, name: &str) -> bool {
        let before = self.providers.len();
        self.providers.retain(|p| p.name() != name);
        self.providers.len() < before
    }

    /// Replace the entire provider list, resetting the rotation cursor
    pub fn set_providers(&mut self, providers: Vec<Arc<dyn CompletionProvider>>) {
        self.providers = providers;
        self.cursor.store(0, Ordering::Release);
    }

    /// Names of all configured providers, in chain order
    pub fn configured_providers(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    /// Names of providers whose availability check passes right now
    ///
    /// Queries each provider live; nothing is cached.
    pub fn available_providers(&self) -> Vec<String> {
        self.providers
            .iter()
            .filter(|p| p.is_available())
            .map(|p| p.name().to_string())
            .collect()
    }

    /// Number of configured providers
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Whether no providers are configured
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
