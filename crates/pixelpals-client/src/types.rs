//! PixelPals leaderboard API types.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

/// A wallet address, normalized to lowercase.
///
/// The API stores addresses lowercased, so lookups are case-insensitive on
/// our side. No format validation is done; unknown or malformed addresses
/// simply come back with no rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WalletAddress(String);

impl WalletAddress {
    pub fn new(raw: &str) -> Self {
        Self(raw.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of `leaderboard_habitat_view`.
///
/// Game-state values are kept as raw JSON numbers so they print exactly as
/// the API sent them. The view can return `null` for any of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub wallet_address: String,
    pub date: String,
    pub rank: Option<i64>,
    pub habitat_value: Option<Number>,
    pub pet_level: Option<i64>,
    pub pet_point: Option<Number>,
    pub season_id: Option<SeasonId>,
}

/// Season identifier; the view has returned both textual and numeric ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeasonId {
    Text(String),
    Number(Number),
}

impl fmt::Display for SeasonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeasonId::Text(id) => f.write_str(id),
            SeasonId::Number(id) => write!(f, "{}", id),
        }
    }
}
