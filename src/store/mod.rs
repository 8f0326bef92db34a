//! Storage layer: user and alias repositories.
//!
//! Both stores offer an atomic insert-if-absent, so the uniqueness of emails
//! and aliases holds even when requests race each other.

mod memory;
mod sqlite;

use std::collections::BTreeMap;
use std::sync::Arc;

pub use memory::{MemoryAliasStore, MemoryUserStore};
pub use sqlite::{SqliteAliasStore, SqliteUserStore};

use crate::config::{Config, StorageKind};
use crate::db;
use crate::errors::AppError;
use crate::models::{AliasRecord, User};

/// Registered users keyed by email
pub trait UserStore: Send + Sync {
    /// Insert a user; fails with `UserAlreadyCreated` if the email is taken
    fn create_user(&self, user: User) -> Result<(), AppError>;

    /// Look up a user; `None` means "not registered"
    fn find_user(&self, email: &str) -> Result<Option<User>, AppError>;
}

/// Alias -> (url, owner) mappings
pub trait AliasStore: Send + Sync {
    /// Insert an alias; fails with `AliasAlreadyExists` if the key is taken
    fn create_alias(&self, alias: &str, url: &str, owner: &str) -> Result<(), AppError>;

    /// Full record for an alias, across all users
    fn find_alias(&self, alias: &str) -> Result<Option<AliasRecord>, AppError>;

    /// Destination URL of an alias, across all users
    fn find_url(&self, alias: &str) -> Result<Option<String>, AppError> {
        Ok(self.find_alias(alias)?.map(|record| record.url))
    }

    /// All aliases of `owner` as alias -> url; empty when there are none
    fn find_aliases_for_user(&self, owner: &str) -> Result<BTreeMap<String, String>, AppError>;

    /// Remove `alias` if `owner` holds it.
    ///
    /// Fails with `PermissionDenied` when another user owns it and with
    /// `NotFound` when it does not exist.
    fn delete_alias(&self, owner: &str, alias: &str) -> Result<(), AppError>;
}

/// The pair of stores the service runs on
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub aliases: Arc<dyn AliasStore>,
}

impl Stores {
    /// Fresh, empty in-memory stores
    pub fn memory() -> Self {
        Self {
            users: Arc::new(MemoryUserStore::default()),
            aliases: Arc::new(MemoryAliasStore::default()),
        }
    }

    /// SQLite-backed stores sharing one connection pool
    pub fn sqlite(database_url: &str) -> Result<Self, AppError> {
        let pool = db::init_pool(database_url)?;
        db::run_migrations(&pool)?;

        Ok(Self {
            users: Arc::new(SqliteUserStore::new(pool.clone())),
            aliases: Arc::new(SqliteAliasStore::new(pool)),
        })
    }

    /// Open the backend selected by the configuration
    pub fn open(config: &Config) -> Result<Self, AppError> {
        match config.storage {
            StorageKind::Memory => {
                log::info!("Using in-memory storage");
                Ok(Self::memory())
            }
            StorageKind::Sqlite => {
                log::info!("Using SQLite storage at {}", config.database_url);
                Self::sqlite(&config.database_url)
            }
        }
    }
}
