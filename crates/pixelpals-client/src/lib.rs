//! Client for the PixelPals habitat leaderboard REST API.

mod client;
mod error;
mod types;

pub use client::LeaderboardClient;
pub use error::LeaderboardError;
pub use types::*;

/// Public API origin.
pub const DEFAULT_BASE_URL: &str = "https://api.pixelpals.ai";
