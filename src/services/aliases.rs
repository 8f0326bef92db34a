//! Alias creation, resolution, listing and deletion.

use std::collections::BTreeMap;

use super::helpers::generate_alias;
use super::Shortener;
use crate::cache::CachedAlias;
use crate::errors::AppError;

impl Shortener {
    /// Create an alias for `url` owned by `owner`.
    ///
    /// An empty `requested_alias` asks for a generated one; collisions are
    /// retried up to the configured bound. A non-empty alias is tried once and
    /// `AliasAlreadyExists` is returned unchanged if it is taken. Returns the
    /// alias that was stored.
    pub fn create_new_alias(
        &self,
        owner: &str,
        url: &str,
        requested_alias: &str,
    ) -> Result<String, AppError> {
        let alias = if requested_alias.is_empty() {
            self.create_generated_alias(owner, url)?
        } else {
            self.aliases.create_alias(requested_alias, url, owner)?;
            requested_alias.to_string()
        };

        if let Some(m) = &self.metrics {
            m.record_alias_created();
        }
        log::info!("Created alias: {} -> {} (owner: {})", alias, url, owner);

        Ok(alias)
    }

    fn create_generated_alias(&self, owner: &str, url: &str) -> Result<String, AppError> {
        for attempt in 1..=self.max_alias_attempts {
            let candidate = generate_alias(self.alias_length);
            match self.aliases.create_alias(&candidate, url, owner) {
                Ok(()) => return Ok(candidate),
                Err(AppError::AliasAlreadyExists(_)) => {
                    log::debug!("Generated alias {} collided (attempt {})", candidate, attempt);
                }
                Err(e) => return Err(e),
            }
        }

        log::warn!(
            "No free alias of length {} after {} attempts",
            self.alias_length,
            self.max_alias_attempts
        );
        Err(AppError::AliasSpaceExhausted(format!(
            "Failed to generate a unique alias after {} attempts",
            self.max_alias_attempts
        )))
    }

    /// Destination URL of `alias`, or `None` when the alias is unknown
    pub fn find_full_url(&self, alias: &str) -> Result<Option<String>, AppError> {
        if let Some(cached) = self.cache.get_alias(alias) {
            log::debug!("Cache hit for alias: {}", alias);
            if let Some(m) = &self.metrics {
                m.record_cache_hit("alias");
            }
            return Ok(Some(cached.url));
        }

        log::debug!("Cache miss for alias: {}, querying store", alias);
        if let Some(m) = &self.metrics {
            m.record_cache_miss("alias");
        }

        let generation = self.cache.alias_generation();
        let Some(url) = self.aliases.find_url(alias)? else {
            return Ok(None);
        };
        if !self
            .cache
            .insert_alias(alias, CachedAlias { url: url.clone() }, generation)
        {
            log::debug!("Alias {} was invalidated during lookup, not caching", alias);
        }

        Ok(Some(url))
    }

    /// All aliases owned by `email` as alias -> url
    pub fn list_aliases_for_user(&self, email: &str) -> Result<BTreeMap<String, String>, AppError> {
        self.aliases.find_aliases_for_user(email)
    }

    /// Delete `alias` on behalf of `email`.
    ///
    /// Fails with `PermissionDenied` when another user owns the alias and with
    /// `NotFound` when it does not exist.
    pub fn delete_alias(&self, email: &str, alias: &str) -> Result<(), AppError> {
        self.aliases.delete_alias(email, alias)?;
        self.cache.invalidate_alias(alias);

        log::info!("Deleted alias: {} (owner: {})", alias, email);
        Ok(())
    }
}
