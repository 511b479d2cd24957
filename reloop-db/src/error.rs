//! Database lifecycle error types.

use thiserror::Error;

/// Errors from configuration, pool construction, and migrations.
#[derive(Debug, Error)]
pub enum DbError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error
    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Result type for database lifecycle operations.
pub type Result<T> = std::result::Result<T, DbError>;
