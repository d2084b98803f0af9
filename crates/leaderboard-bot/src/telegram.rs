//! Telegram transport: command parsing, replies, and the long-poll loop.

use crate::commands::{
    CommandInvocation, CommandRegistry, ReplySink, LEADERBOARD_COMMAND, START_COMMAND,
};
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use std::sync::Arc;
use teloxide::dispatching::{HandlerExt, ShutdownToken, UpdateFilterExt, UpdateHandler};
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::MessageId;
use teloxide::utils::command::{BotCommands, ParseError};
use tracing::{info, warn};

/// Commands understood by the bot.
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "show usage")]
    Start,
    #[command(
        description = "look up wallets: /leaderboard <wallet_address1> <wallet_address2> ...",
        parse_with = raw_arguments
    )]
    Leaderboard(String),
}

/// Keep the argument text as-is; `CommandInvocation` does the splitting, and
/// an empty string must reach the handler rather than fail parsing.
fn raw_arguments(input: String) -> Result<(String,), ParseError> {
    Ok((input,))
}

impl Command {
    pub fn invocation(&self) -> CommandInvocation {
        match self {
            Command::Start => CommandInvocation::new(START_COMMAND, ""),
            Command::Leaderboard(raw) => CommandInvocation::new(LEADERBOARD_COMMAND, raw),
        }
    }
}

/// Replies to the triggering message in its chat.
pub struct TelegramReplies {
    bot: Bot,
    chat_id: ChatId,
    reply_to: MessageId,
}

impl TelegramReplies {
    pub fn new(bot: Bot, message: &Message) -> Self {
        Self {
            bot,
            chat_id: message.chat.id,
            reply_to: message.id,
        }
    }
}

#[async_trait]
impl ReplySink for TelegramReplies {
    async fn reply(&self, text: &str) -> AppResult<()> {
        self.bot
            .send_message(self.chat_id, text)
            .reply_to_message_id(self.reply_to)
            .await?;
        Ok(())
    }
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    registry: Arc<CommandRegistry>,
) -> AppResult<()> {
    let invocation = cmd.invocation();
    info!(
        "/{} with {} argument(s) in chat {}",
        invocation.name,
        invocation.args.len(),
        msg.chat.id.0
    );

    let replies = TelegramReplies::new(bot, &msg);
    registry.dispatch(&invocation, &replies).await?;
    Ok(())
}

/// Update handling tree: command messages only.
pub fn schema() -> UpdateHandler<AppError> {
    Update::filter_message()
        .filter_command::<Command>()
        .endpoint(handle_command)
}

/// Long-poll until SIGINT or SIGTERM.
///
/// Every update gets the same distribution key, so commands are handled one
/// at a time in arrival order, across all chats.
pub async fn run(bot: Bot, registry: Arc<CommandRegistry>) {
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!("Failed to publish command list: {}", e);
    }

    let mut dispatcher = Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![registry])
        .distribution_function(|_| Some(()))
        .enable_ctrlc_handler()
        .build();

    spawn_terminate_listener(dispatcher.shutdown_token());

    info!("Listening for commands...");
    dispatcher.dispatch().await;
}

#[cfg(unix)]
fn spawn_terminate_listener(token: ShutdownToken) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(sigterm) => sigterm,
            Err(e) => {
                warn!("Cannot listen for SIGTERM: {}", e);
                return;
            }
        };

        sigterm.recv().await;
        info!("SIGTERM received");
        if let Ok(stopped) = token.shutdown() {
            stopped.await;
        }
    });
}

#[cfg(not(unix))]
fn spawn_terminate_listener(_token: ShutdownToken) {}
