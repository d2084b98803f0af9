//! Common test utilities for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use leaderboard_bot::commands::{
    CommandHandler, CommandRegistry, LeaderboardHandler, ReplySink, StartHandler,
};
use leaderboard_bot::error::AppResult;
use pixelpals_client::LeaderboardClient;
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;
use wiremock::MockServer;

pub const REFERENCE_DATE: &str = "2024-04-29";
pub const VIEW_PATH: &str = "/rest/v1/leaderboard_habitat_view";

/// Reply sink that records every outbound message in order.
#[derive(Default)]
pub struct RecordingReplies {
    sent: Mutex<Vec<String>>,
}

impl RecordingReplies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReplySink for RecordingReplies {
    async fn reply(&self, text: &str) -> AppResult<()> {
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Create a leaderboard client configured for a mock server.
pub fn test_leaderboard_client(mock_server: &MockServer) -> LeaderboardClient {
    LeaderboardClient::new(mock_server.uri(), None).unwrap()
}

/// Registry with the production handlers pointed at a mock server.
pub fn test_registry(mock_server: &MockServer) -> CommandRegistry {
    let client = Arc::new(test_leaderboard_client(mock_server));
    let handlers: Vec<Box<dyn CommandHandler>> = vec![
        Box::new(StartHandler::new()),
        Box::new(LeaderboardHandler::new(client, REFERENCE_DATE)),
    ];
    CommandRegistry::new(handlers)
}

/// A leaderboard row as the API returns it.
pub fn entry_json(wallet: &str, date: &str) -> serde_json::Value {
    serde_json::json!({
        "wallet_address": wallet,
        "date": date,
        "rank": 1,
        "habitat_value": 10,
        "pet_level": 2,
        "pet_point": 5,
        "season_id": "s1"
    })
}

/// Collects formatted log output so tests can assert on what was logged.
#[derive(Clone, Default)]
pub struct LogCapture {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock().unwrap()).into_owned()
    }

    /// Subscriber writing plain-text events into this capture.
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync {
        tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish()
    }
}

pub struct LogCaptureWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl io::Write for LogCaptureWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.lock().unwrap().extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogCaptureWriter {
            buf: self.buf.clone(),
        }
    }
}
