//! Leaderboard command - looks up wallets on the habitat leaderboard.

use crate::commands::{CommandHandler, ReplySink, LEADERBOARD_COMMAND};
use crate::error::AppResult;
use async_trait::async_trait;
use pixelpals_client::{LeaderboardClient, LeaderboardEntry, WalletAddress};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, instrument};

pub const NO_ADDRESS_REPLY: &str = "Please provide at least one wallet address.";

pub struct LeaderboardHandler {
    client: Arc<LeaderboardClient>,
    reference_date: String,
}

impl LeaderboardHandler {
    pub fn new(client: Arc<LeaderboardClient>, reference_date: impl Into<String>) -> Self {
        Self {
            client,
            reference_date: reference_date.into(),
        }
    }

    /// Render every entry dated exactly on the reference date.
    ///
    /// The query already asks for the newest row only, so a wallet whose
    /// latest row is from another day renders as an empty string.
    fn render_matching(&self, entries: &[LeaderboardEntry]) -> String {
        entries
            .iter()
            .filter(|entry| entry.date == self.reference_date)
            .map(render_entry)
            .collect()
    }

    /// Look up one wallet and reply with its block, an error line, or nothing.
    #[instrument(skip(self, replies))]
    async fn lookup(&self, raw_address: &str, replies: &dyn ReplySink) -> AppResult<()> {
        let wallet = WalletAddress::new(raw_address);

        let entries = match self.client.latest_entries(&wallet).await {
            Ok(entries) => entries,
            Err(e) => {
                error!("Request failed for wallet {}: {}", wallet, e);
                return replies
                    .reply(&format!(
                        "Error: Failed to fetch data for wallet address {}",
                        raw_address
                    ))
                    .await;
            }
        };

        let reply = self.render_matching(&entries);
        if reply.is_empty() {
            debug!(
                "No entry dated {} for wallet {} ({} returned)",
                self.reference_date,
                wallet,
                entries.len()
            );
            return Ok(());
        }

        replies.reply(&reply).await
    }
}

/// Format one entry as a block of `Label: value` lines plus a blank line.
///
/// Missing values print as `None`.
pub fn render_entry(entry: &LeaderboardEntry) -> String {
    format!(
        "Wallet Address: {}\n\
         Date: {}\n\
         Rank: {}\n\
         Habitat Value: {}\n\
         Pet Level: {}\n\
         Pet Point: {}\n\
         Season ID: {}\n\n",
        entry.wallet_address,
        entry.date,
        or_none(&entry.rank),
        or_none(&entry.habitat_value),
        or_none(&entry.pet_level),
        or_none(&entry.pet_point),
        or_none(&entry.season_id),
    )
}

fn or_none<T: fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "None".into(),
    }
}

#[async_trait]
impl CommandHandler for LeaderboardHandler {
    fn name(&self) -> &str {
        LEADERBOARD_COMMAND
    }

    async fn execute(&self, args: &[String], replies: &dyn ReplySink) -> AppResult<()> {
        if args.is_empty() {
            return replies.reply(NO_ADDRESS_REPLY).await;
        }

        // Strictly one wallet at a time so replies keep the argument order.
        for raw_address in args {
            self.lookup(raw_address, replies).await?;
        }

        Ok(())
    }
}
