//! Application error types.

use crate::instance_lock::LockError;
use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Leaderboard error: {0}")]
    Leaderboard(#[from] pixelpals_client::LeaderboardError),

    #[error("Instance lock error: {0}")]
    Lock(#[from] LockError),

    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),
}

/// Result type alias for application errors.
pub type AppResult<T> = Result<T, AppError>;
