//! SQLite-backed stores.
//!
//! Uniqueness is enforced by the `PRIMARY KEY` constraints; a constraint
//! violation on insert is reported as the matching domain error.

use std::collections::BTreeMap;

use rusqlite::{params, OptionalExtension};

use super::{AliasStore, UserStore};
use crate::db::{get_conn, DbPool};
use crate::errors::AppError;
use crate::models::{AliasRecord, User};
use crate::queries::{Aliases, Users};

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

fn map_user_row(row: &rusqlite::Row) -> rusqlite::Result<User> {
    Ok(User {
        email: row.get(0)?,
        password_hash: row.get(1)?,
    })
}

fn map_alias_row(row: &rusqlite::Row) -> rusqlite::Result<AliasRecord> {
    Ok(AliasRecord {
        alias: row.get(0)?,
        url: row.get(1)?,
        owner: row.get(2)?,
    })
}

pub struct SqliteUserStore {
    pool: DbPool,
}

impl SqliteUserStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl UserStore for SqliteUserStore {
    fn create_user(&self, user: User) -> Result<(), AppError> {
        let conn = get_conn(&self.pool)?;

        match conn.execute(Users::INSERT, params![user.email, user.password_hash]) {
            Ok(_) => Ok(()),
            Err(e) if is_constraint_violation(&e) => {
                log::warn!("Duplicate signup for {}", user.email);
                Err(AppError::user_already_created(&user.email))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn find_user(&self, email: &str) -> Result<Option<User>, AppError> {
        let conn = get_conn(&self.pool)?;

        let user = conn
            .query_row(Users::SELECT_BY_EMAIL, params![email], map_user_row)
            .optional()?;
        Ok(user)
    }
}

pub struct SqliteAliasStore {
    pool: DbPool,
}

impl SqliteAliasStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl AliasStore for SqliteAliasStore {
    fn create_alias(&self, alias: &str, url: &str, owner: &str) -> Result<(), AppError> {
        let conn = get_conn(&self.pool)?;

        match conn.execute(Aliases::INSERT, params![alias, url, owner]) {
            Ok(_) => Ok(()),
            Err(e) if is_constraint_violation(&e) => Err(AppError::alias_taken(alias)),
            Err(e) => Err(e.into()),
        }
    }

    fn find_alias(&self, alias: &str) -> Result<Option<AliasRecord>, AppError> {
        let conn = get_conn(&self.pool)?;

        let record = conn
            .query_row(Aliases::SELECT_BY_ALIAS, params![alias], map_alias_row)
            .optional()?;
        Ok(record)
    }

    fn find_aliases_for_user(&self, owner: &str) -> Result<BTreeMap<String, String>, AppError> {
        let conn = get_conn(&self.pool)?;
        let mut stmt = conn.prepare(Aliases::SELECT_BY_OWNER)?;

        let aliases = stmt
            .query_map(params![owner], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<BTreeMap<String, String>, _>>()?;

        Ok(aliases)
    }

    fn delete_alias(&self, owner: &str, alias: &str) -> Result<(), AppError> {
        let conn = get_conn(&self.pool)?;

        let rows_affected = conn.execute(Aliases::DELETE_BY_ALIAS_AND_OWNER, params![alias, owner])?;
        if rows_affected > 0 {
            return Ok(());
        }

        // Nothing deleted: tell "someone else's" apart from "missing"
        let current_owner: Option<String> = conn
            .query_row(Aliases::SELECT_OWNER, params![alias], |row| row.get(0))
            .optional()?;

        match current_owner {
            Some(_) => Err(AppError::not_owner(alias)),
            None => Err(AppError::alias_not_found(alias)),
        }
    }
}
