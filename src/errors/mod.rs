//! Unified error handling for the scanner.

/// Application error type covering configuration, database, pattern
/// compilation, and mail transport failures.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Mail error: {0}")]
    Mail(String),
}
