//! Business logic layer for accounts and aliases.
//!
//! [`Shortener`] orchestrates the stores: signup and credential checks,
//! sessions, alias creation, lookup, listing and owner-checked deletion.

mod accounts;
mod aliases;
mod helpers;

use std::sync::Arc;

use crate::cache::AppCache;
use crate::config::Config;
use crate::constants::{DEFAULT_ALIAS_LENGTH, MAX_ALIAS_GENERATION_ATTEMPTS};
use crate::metrics::AppMetrics;
use crate::store::{AliasStore, Stores, UserStore};

/// The account and alias service shared by all request handlers
#[derive(Clone)]
pub struct Shortener {
    users: Arc<dyn UserStore>,
    aliases: Arc<dyn AliasStore>,
    cache: AppCache,
    metrics: Option<AppMetrics>,
    alias_length: usize,
    max_alias_attempts: u32,
}

impl Shortener {
    pub fn new(stores: Stores, cache: AppCache) -> Self {
        Self {
            users: stores.users,
            aliases: stores.aliases,
            cache,
            metrics: None,
            alias_length: DEFAULT_ALIAS_LENGTH,
            max_alias_attempts: MAX_ALIAS_GENERATION_ATTEMPTS,
        }
    }

    /// Build the service with the alias generation settings from `config`
    pub fn from_config(config: &Config, stores: Stores, cache: AppCache) -> Self {
        Self::new(stores, cache)
            .with_alias_generation(config.alias_length, config.max_alias_attempts)
    }

    /// Set the generated alias length and the retry bound (both at least 1)
    pub fn with_alias_generation(mut self, length: usize, max_attempts: u32) -> Self {
        self.alias_length = length.max(1);
        self.max_alias_attempts = max_attempts.max(1);
        self
    }

    pub fn with_metrics(mut self, metrics: AppMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Count a served redirect
    pub fn record_redirect(&self) {
        if let Some(m) = &self.metrics {
            m.record_redirect();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_shortener;

    #[test]
    fn test_alias_generation_settings_are_clamped() {
        let shortener = test_shortener().with_alias_generation(0, 0);
        assert_eq!(shortener.alias_length, 1);
        assert_eq!(shortener.max_alias_attempts, 1);
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            alias_length: 12,
            max_alias_attempts: 3,
            ..Config::default()
        };
        let shortener = Shortener::from_config(&config, Stores::memory(), AppCache::default());
        assert_eq!(shortener.alias_length, 12);
        assert_eq!(shortener.max_alias_attempts, 3);
    }
}
