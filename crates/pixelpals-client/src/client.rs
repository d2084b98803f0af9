//! PixelPals leaderboard HTTP client.

use crate::error::LeaderboardError;
use crate::types::*;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

/// Path of the habitat leaderboard view under the API origin.
const LEADERBOARD_VIEW_PATH: &str = "/rest/v1/leaderboard_habitat_view";

/// PixelPals leaderboard client.
#[derive(Clone)]
pub struct LeaderboardClient {
    client: Client,
    base_url: String,
}

impl LeaderboardClient {
    /// Create a new leaderboard client.
    ///
    /// Without a `timeout` the reqwest default (no overall timeout) applies.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, LeaderboardError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Get the configured API origin.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the most recent leaderboard row for a wallet.
    ///
    /// The view is queried with `order=date.desc&limit=1`, but the response
    /// is still a JSON array and is returned as such.
    #[instrument(skip(self, wallet), fields(wallet = %wallet))]
    pub async fn latest_entries(
        &self,
        wallet: &WalletAddress,
    ) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        let wallet_filter = format!("eq.{}", wallet);

        let response = self
            .client
            .get(format!("{}{}", self.base_url, LEADERBOARD_VIEW_PATH))
            .header("Content-Type", "application/json")
            .query(&[
                ("wallet_address", wallet_filter.as_str()),
                ("order", "date.desc"),
                ("limit", "1"),
            ])
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle HTTP response, converting errors appropriately.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, LeaderboardError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            debug!("Response body: {}", truncate(&body, 200));
            serde_json::from_str(&body).map_err(LeaderboardError::from)
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into());

            Err(LeaderboardError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
