//! Process-local stores.

use std::collections::{hash_map::Entry, BTreeMap, HashMap};

use parking_lot::RwLock;

use super::{AliasStore, UserStore};
use crate::errors::AppError;
use crate::models::{AliasRecord, User};

/// Users held in a map keyed by email
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl UserStore for MemoryUserStore {
    fn create_user(&self, user: User) -> Result<(), AppError> {
        let mut users = self.users.write();
        match users.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(AppError::user_already_created(&user.email)),
            Entry::Vacant(slot) => {
                slot.insert(user);
                Ok(())
            }
        }
    }

    fn find_user(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.read().get(email).cloned())
    }
}

/// Aliases held in a map keyed by alias
#[derive(Default)]
pub struct MemoryAliasStore {
    aliases: RwLock<HashMap<String, AliasRecord>>,
}

impl AliasStore for MemoryAliasStore {
    fn create_alias(&self, alias: &str, url: &str, owner: &str) -> Result<(), AppError> {
        let mut aliases = self.aliases.write();
        match aliases.entry(alias.to_string()) {
            Entry::Occupied(_) => Err(AppError::alias_taken(alias)),
            Entry::Vacant(slot) => {
                slot.insert(AliasRecord {
                    alias: alias.to_string(),
                    url: url.to_string(),
                    owner: owner.to_string(),
                });
                Ok(())
            }
        }
    }

    fn find_alias(&self, alias: &str) -> Result<Option<AliasRecord>, AppError> {
        Ok(self.aliases.read().get(alias).cloned())
    }

    fn find_aliases_for_user(&self, owner: &str) -> Result<BTreeMap<String, String>, AppError> {
        Ok(self
            .aliases
            .read()
            .values()
            .filter(|record| record.owner == owner)
            .map(|record| (record.alias.clone(), record.url.clone()))
            .collect())
    }

    fn delete_alias(&self, owner: &str, alias: &str) -> Result<(), AppError> {
        let mut aliases = self.aliases.write();
        let owned_by_caller = match aliases.get(alias) {
            Some(record) => record.owner == owner,
            None => return Err(AppError::alias_not_found(alias)),
        };
        if !owned_by_caller {
            return Err(AppError::not_owner(alias));
        }

        aliases.remove(alias);
        Ok(())
    }
}
