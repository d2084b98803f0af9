//! PixelPals leaderboard Telegram bot.
//!
//! `/leaderboard <wallet>...` looks each wallet up on the habitat leaderboard
//! and replies with the row for the reference date.

pub mod commands;
pub mod config;
pub mod error;
pub mod instance_lock;
pub mod keep_alive;
pub mod telegram;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use instance_lock::{InstanceLock, LockError};
