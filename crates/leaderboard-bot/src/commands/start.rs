//! Start command - displays usage.

use crate::commands::{CommandHandler, ReplySink, START_COMMAND};
use crate::error::AppResult;
use async_trait::async_trait;

pub const USAGE: &str =
    "Hello! Use /leaderboard <wallet_address1> <wallet_address2> ... to get the leaderboard data.";

pub struct StartHandler;

impl StartHandler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StartHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandHandler for StartHandler {
    fn name(&self) -> &str {
        START_COMMAND
    }

    async fn execute(&self, _args: &[String], replies: &dyn ReplySink) -> AppResult<()> {
        replies.reply(USAGE).await
    }
}
