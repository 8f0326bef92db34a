//! SQL query constants for the SQLite store.
//!
//! Centralizes all SQL queries for better maintainability and consistency.

/// Schema-related queries for database setup and migrations.
pub struct Schema;

impl Schema {
    pub const CREATE_USERS_TABLE: &'static str = "
        CREATE TABLE IF NOT EXISTS users (
            email           TEXT PRIMARY KEY NOT NULL,
            password_hash   TEXT NOT NULL,
            created_at      TEXT NOT NULL DEFAULT (datetime('now'))
        )";

    pub const CREATE_ALIASES_TABLE: &'static str = "
        CREATE TABLE IF NOT EXISTS aliases (
            alias       TEXT PRIMARY KEY NOT NULL,
            url         TEXT NOT NULL,
            owner       TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        )";

    pub const CREATE_OWNER_INDEX: &'static str =
        "CREATE INDEX IF NOT EXISTS idx_aliases_owner ON aliases (owner)";

    #[cfg(test)]
    pub const TABLE_EXISTS: &'static str =
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1";
}

/// User-related queries.
pub struct Users;

impl Users {
    pub const INSERT: &'static str = "INSERT INTO users (email, password_hash) VALUES (?1, ?2)";

    pub const SELECT_BY_EMAIL: &'static str =
        "SELECT email, password_hash FROM users WHERE email = ?1";
}

/// Alias-related queries.
pub struct Aliases;

impl Aliases {
    pub const INSERT: &'static str = "INSERT INTO aliases (alias, url, owner) VALUES (?1, ?2, ?3)";

    pub const SELECT_BY_ALIAS: &'static str =
        "SELECT alias, url, owner FROM aliases WHERE alias = ?1";

    pub const SELECT_BY_OWNER: &'static str =
        "SELECT alias, url FROM aliases WHERE owner = ?1 ORDER BY alias";

    pub const SELECT_OWNER: &'static str = "SELECT owner FROM aliases WHERE alias = ?1";

    pub const DELETE_BY_ALIAS_AND_OWNER: &'static str =
        "DELETE FROM aliases WHERE alias = ?1 AND owner = ?2";
}
