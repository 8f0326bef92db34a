//! Database module for SQLite connection and migrations.
//!
//! Uses r2d2 connection pool for efficient connection management.

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;

use crate::errors::AppError;
use crate::queries::Schema;

/// Type alias for the SQLite connection pool
pub type DbPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled database connection
pub type DbConnection = PooledConnection<SqliteConnectionManager>;

/// Initialize the database connection pool
///
/// `database_url` is a file path or an SQLite URI such as
/// `file:name?mode=memory&cache=shared`.
pub fn init_pool(database_url: &str) -> Result<DbPool, AppError> {
    let manager = SqliteConnectionManager::file(database_url);
    let pool = Pool::builder()
        .max_size(10)
        .build(manager)
        .map_err(|e| AppError::StorageError(format!("Failed to create pool: {}", e)))?;

    Ok(pool)
}

/// Run database migrations to create necessary tables
pub fn run_migrations(pool: &DbPool) -> Result<(), AppError> {
    let conn = get_conn(pool)?;

    conn.execute(Schema::CREATE_USERS_TABLE, [])
        .map_err(|e| AppError::StorageError(format!("Failed to create users table: {}", e)))?;

    conn.execute(Schema::CREATE_ALIASES_TABLE, [])
        .map_err(|e| AppError::StorageError(format!("Failed to create aliases table: {}", e)))?;

    conn.execute(Schema::CREATE_OWNER_INDEX, [])
        .map_err(|e| AppError::StorageError(format!("Failed to create index: {}", e)))?;

    log::info!("Database migrations completed successfully");
    Ok(())
}

/// Get a connection from the pool
pub fn get_conn(pool: &DbPool) -> Result<DbConnection, AppError> {
    pool.get()
        .map_err(|e| AppError::StorageError(format!("Failed to get connection: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::unique_memory_db_url;

    #[test]
    fn test_init_pool_and_migrations() {
        let pool = init_pool(&unique_memory_db_url()).expect("Should create in-memory pool");
        run_migrations(&pool).expect("Should run migrations");

        let conn = pool.get().expect("Should get connection");

        for table in ["users", "aliases"] {
            let count: i32 = conn
                .query_row(Schema::TABLE_EXISTS, [table], |row| row.get(0))
                .expect("Should query");
            assert_eq!(count, 1, "table {} should exist", table);
        }
    }

    #[test]
    fn test_migrations_are_idempotent() {
        let pool = init_pool(&unique_memory_db_url()).unwrap();
        run_migrations(&pool).unwrap();
        assert!(run_migrations(&pool).is_ok());
    }
}
