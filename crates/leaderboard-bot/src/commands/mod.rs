//! Bot command handlers.

mod leaderboard;
mod start;

pub use leaderboard::{render_entry, LeaderboardHandler, NO_ADDRESS_REPLY};
pub use start::{StartHandler, USAGE};

use crate::error::AppResult;
use async_trait::async_trait;
use tracing::debug;

pub const START_COMMAND: &str = "start";
pub const LEADERBOARD_COMMAND: &str = "leaderboard";

/// Where a handler sends its replies.
///
/// Each call is one outbound chat message.
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn reply(&self, text: &str) -> AppResult<()>;
}

/// Command handler trait.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Command name without the leading slash (e.g., "start").
    fn name(&self) -> &str;

    /// Execute the command, replying zero or more times.
    async fn execute(&self, args: &[String], replies: &dyn ReplySink) -> AppResult<()>;
}

/// A parsed command: its name and whitespace-separated arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub name: String,
    pub args: Vec<String>,
}

impl CommandInvocation {
    pub fn new(name: impl Into<String>, raw_args: &str) -> Self {
        Self {
            name: name.into(),
            args: raw_args.split_whitespace().map(String::from).collect(),
        }
    }
}

/// Routes invocations to the handler registered under their name.
pub struct CommandRegistry {
    handlers: Vec<Box<dyn CommandHandler>>,
}

impl CommandRegistry {
    pub fn new(handlers: Vec<Box<dyn CommandHandler>>) -> Self {
        Self { handlers }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run the matching handler. Returns `false` if no handler has that name.
    pub async fn dispatch(
        &self,
        invocation: &CommandInvocation,
        replies: &dyn ReplySink,
    ) -> AppResult<bool> {
        let Some(handler) = self.handlers.iter().find(|h| h.name() == invocation.name) else {
            debug!("No handler for /{}", invocation.name);
            return Ok(false);
        };

        handler.execute(&invocation.args, replies).await?;
        Ok(true)
    }
}
