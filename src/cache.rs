//! In-memory caching for redirect lookups and sign-in sessions.
//!
//! Uses `moka` for lock-free concurrent caching with TTL support. The session
//! cache is the authoritative session store: an evicted or expired entry means
//! the token is no longer valid.
//!
//! Redirect lookups fill the alias cache after reading the store, so a fill
//! carries the invalidation generation observed before that read. A fill whose
//! generation is stale is dropped; otherwise a deleted alias could be cached
//! again after its invalidation.

use moka::sync::Cache;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Cached alias data for redirect lookups
#[derive(Clone, Debug)]
pub struct CachedAlias {
    pub url: String,
}

/// An active sign-in session
#[derive(Clone, Debug)]
pub struct CachedSession {
    pub email: String,
}

/// Application cache combining alias and session caches
#[derive(Clone)]
pub struct AppCache {
    /// Cache for redirect lookups by alias
    pub alias_cache: Arc<Cache<String, CachedAlias>>,
    /// Bumped on every alias invalidation; guards fills against them
    alias_generation: Arc<Mutex<u64>>,
    /// Active sessions by SHA-256 hash of the bearer token
    pub session_cache: Arc<Cache<String, CachedSession>>,
}

impl AppCache {
    /// Create a new AppCache with the specified settings
    pub fn new(
        alias_cache_ttl_secs: u64,
        alias_cache_max_capacity: u64,
        session_ttl_secs: u64,
        session_max_capacity: u64,
    ) -> Self {
        let alias_cache = Cache::builder()
            .max_capacity(alias_cache_max_capacity)
            .time_to_live(Duration::from_secs(alias_cache_ttl_secs))
            .build();

        let session_cache = Cache::builder()
            .max_capacity(session_max_capacity)
            .time_to_live(Duration::from_secs(session_ttl_secs))
            .build();

        Self {
            alias_cache: Arc::new(alias_cache),
            alias_generation: Arc::new(Mutex::new(0)),
            session_cache: Arc::new(session_cache),
        }
    }

    /// Build the cache from application configuration
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(
            config.alias_cache_ttl_secs,
            config.alias_cache_max_capacity,
            config.session_ttl_secs,
            config.session_max_capacity,
        )
    }

    /// Current invalidation generation; read it before querying the store
    pub fn alias_generation(&self) -> u64 {
        *self.alias_generation.lock()
    }

    /// Cache a lookup made at `generation`.
    ///
    /// Returns false, caching nothing, when an invalidation happened since.
    pub fn insert_alias(&self, alias: &str, cached: CachedAlias, generation: u64) -> bool {
        let current = self.alias_generation.lock();
        if *current != generation {
            return false;
        }
        self.alias_cache.insert(alias.to_string(), cached);
        true
    }

    pub fn get_alias(&self, alias: &str) -> Option<CachedAlias> {
        self.alias_cache.get(alias)
    }

    pub fn invalidate_alias(&self, alias: &str) {
        let mut current = self.alias_generation.lock();
        self.alias_cache.invalidate(alias);
        *current += 1;
    }

    /// Register a session under its token hash
    pub fn insert_session(&self, token_hash: &str, session: CachedSession) {
        self.session_cache.insert(token_hash.to_string(), session);
    }

    pub fn get_session(&self, token_hash: &str) -> Option<CachedSession> {
        self.session_cache.get(token_hash)
    }

    /// End a session
    pub fn invalidate_session(&self, token_hash: &str) {
        self.session_cache.invalidate(token_hash);
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new(
            300,    // Alias cache TTL: 5 minutes
            10_000, // Alias cache max capacity
            3_600,  // Session TTL: 1 hour
            10_000, // Session cache max capacity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn cached(url: &str) -> CachedAlias {
        CachedAlias {
            url: url.to_string(),
        }
    }

    #[test]
    fn test_alias_cache_insert_and_get() {
        let cache = AppCache::default();

        cache.insert_alias("short", cached("https://example.com"), cache.alias_generation());

        let retrieved = cache.get_alias("short").unwrap();
        assert_eq!(retrieved.url, "https://example.com");
    }

    #[test]
    fn test_alias_cache_miss() {
        let cache = AppCache::default();
        assert!(cache.get_alias("nonexistent").is_none());
    }

    #[test]
    fn test_alias_cache_invalidation() {
        let cache = AppCache::default();

        cache.insert_alias("short", cached("https://example.com"), cache.alias_generation());
        assert!(cache.get_alias("short").is_some());

        cache.invalidate_alias("short");
        assert!(cache.get_alias("short").is_none());
    }

    #[test]
    fn test_fill_after_invalidation_is_dropped() {
        let cache = AppCache::default();

        // Lookup starts, then the alias is deleted before the fill lands
        let generation = cache.alias_generation();
        cache.invalidate_alias("short");

        assert!(!cache.insert_alias("short", cached("https://old.example.com"), generation));
        assert!(cache.get_alias("short").is_none());

        let generation = cache.alias_generation();
        assert!(cache.insert_alias("short", cached("https://new.example.com"), generation));
        assert_eq!(cache.get_alias("short").unwrap().url, "https://new.example.com");
    }

    #[test]
    fn test_session_insert_get_and_invalidate() {
        let cache = AppCache::default();

        cache.insert_session(
            "hash123",
            CachedSession {
                email: "aaa@bbb.com".to_string(),
            },
        );
        assert_eq!(cache.get_session("hash123").unwrap().email, "aaa@bbb.com");

        cache.invalidate_session("hash123");
        assert!(cache.get_session("hash123").is_none());
    }

    #[test]
    fn test_clones_share_entries() {
        let cache = AppCache::default();
        let clone = cache.clone();

        cache.insert_alias("shared", cached("https://example.com"), cache.alias_generation());
        assert!(clone.get_alias("shared").is_some());
    }

    #[test]
    fn test_session_ttl_expiration() {
        let cache = AppCache::new(300, 100, 1, 100);

        cache.insert_session(
            "ttl_test",
            CachedSession {
                email: "aaa@bbb.com".to_string(),
            },
        );
        assert!(cache.get_session("ttl_test").is_some());

        thread::sleep(Duration::from_millis(1_500));

        assert!(cache.get_session("ttl_test").is_none());
    }
}
