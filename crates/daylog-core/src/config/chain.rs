//! Chained configuration provider with fallback behavior

use std::sync::Arc;

use super::traits::ConfigProvider;

/// A provider that consults several providers in order
///
/// Each setting comes from the first provider that has it, so a typical
/// chain puts environment overrides in front of a settings file.
///
/// # Example
///
/// ```
/// use daylog_core::config::{ChainConfigProvider, ConfigProvider, EnvConfigProvider, MemoryConfigProvider};
/// use std::sync::Arc;
///
/// let defaults = Arc::new(MemoryConfigProvider::new());
/// defaults.set_process_name("svc");
///
/// let providers: Vec<Arc<dyn ConfigProvider>> = vec![Arc::new(EnvConfigProvider::new()), defaults];
/// let chain = ChainConfigProvider::new(providers);
/// let _name = chain.process_name();
/// ```
pub struct ChainConfigProvider {
    providers: Vec<Arc<dyn ConfigProvider>>,
}

impl ChainConfigProvider {
    /// Create a new chain provider
    ///
    /// Providers are tried in order.
    pub fn new(providers: Vec<Arc<dyn ConfigProvider>>) -> Self {
        Self { providers }
    }

    /// Get the providers in this chain
    pub fn providers(&self) -> &[Arc<dyn ConfigProvider>] {
        &self.providers
    }
}

impl ConfigProvider for ChainConfigProvider {
    fn setting(&self, key: &str) -> Option<String> {
        self.providers.iter().find_map(|p| p.setting(key))
    }

    fn fallback_process_name(&self) -> Option<String> {
        self.providers.iter().find_map(|p| p.fallback_process_name())
    }
}

impl std::fmt::Debug for ChainConfigProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainConfigProvider")
            .field("providers", &self.providers.len())
            .finish()
    }
}
