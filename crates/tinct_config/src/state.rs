//! Process-wide configuration handle
//!
//! A generation run loads its configuration once and shares it read-only.

use std::sync::OnceLock;

use crate::error::{ConfigError, Result};
use crate::resolved::ResolvedConfig;

/// Global configuration instance
static CONFIG_STATE: OnceLock<ResolvedConfig> = OnceLock::new();

/// Init-once access to the run's [`ResolvedConfig`]
pub struct ConfigState;

impl ConfigState {
    /// Install the configuration for this process.
    ///
    /// Fails with [`ConfigError::AlreadyInitialized`] on every call after the
    /// first; the installed value is never replaced.
    pub fn init(config: ResolvedConfig) -> Result<&'static ResolvedConfig> {
        let mut installed = false;
        let current = CONFIG_STATE.get_or_init(|| {
            installed = true;
            config
        });
        if !installed {
            tracing::warn!("ConfigState::init - already initialized, keeping the first configuration");
            return Err(ConfigError::AlreadyInitialized);
        }
        tracing::debug!(
            "ConfigState::init - {} pattern(s), {} token(s)",
            current.scope_patterns().len(),
            current.extension_table().len()
        );
        Ok(current)
    }

    /// Get the configuration (returns None if not initialized)
    pub fn try_get() -> Option<&'static ResolvedConfig> {
        CONFIG_STATE.get()
    }

    pub fn is_initialized() -> bool {
        CONFIG_STATE.get().is_some()
    }
}
