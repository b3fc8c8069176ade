//! Shared state of one CLI invocation.

use super::commands::OutputFormat;
use pagecast::{
    EventBus, HttpConsoleApi, JsonError, LoginRedirect, MemoryTokenStore, NoticeBoard,
    NoticeLevel, PagecastConfig, PagecastResult, SharedPostCache,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Tells the user to sign in again when the service rejects the token.
struct TerminalRedirect;

impl LoginRedirect for TerminalRedirect {
    fn redirect(&self, login_url: &str) {
        tracing::warn!(login_url, "Session rejected");
        eprintln!("Session expired. Sign in again at {} and update PAGECAST_TOKEN.", login_url);
    }
}

/// Client, configuration and event plumbing used by every command.
pub struct Console {
    pub api: HttpConsoleApi,
    pub config: PagecastConfig,
    pub events: EventBus,
    pub cache: SharedPostCache,
    format: OutputFormat,
    notices: broadcast::Receiver<pagecast::ConsoleEvent>,
    board: NoticeBoard,
}

impl Console {
    /// Build the client from `config`, signed in with `token` when present.
    pub fn new(
        config: PagecastConfig,
        token: Option<String>,
        format: OutputFormat,
    ) -> PagecastResult<Self> {
        let tokens = match token {
            Some(token) => MemoryTokenStore::with_token(token),
            None => {
                tracing::debug!("No PAGECAST_TOKEN set, sending requests anonymously");
                MemoryTokenStore::new()
            }
        };
        let api = HttpConsoleApi::new(config.api().clone(), Arc::new(tokens))?
            .with_redirect(Arc::new(TerminalRedirect));
        let events = EventBus::default();
        let notices = events.subscribe();
        let cache = SharedPostCache::new(config.cache().clone());

        Ok(Self {
            api,
            config,
            events,
            cache,
            format,
            notices,
            board: NoticeBoard::default(),
        })
    }

    /// Whether results should be printed as JSON.
    pub fn json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Print `value` as JSON, or call `human` to print it for people.
    pub fn emit<T: Serialize>(&self, value: &T, human: impl FnOnce(&T)) -> PagecastResult<()> {
        if self.json() {
            let json = serde_json::to_string_pretty(value)
                .map_err(|e| JsonError::new(e.to_string()))?;
            println!("{}", json);
        } else {
            human(value);
        }
        Ok(())
    }

    /// Print notices raised since the last flush to stderr.
    pub fn flush_notices(&mut self) {
        self.board.pump(&mut self.notices);
        if !self.json() {
            for notice in self.board.notices() {
                let tag = match notice.level() {
                    NoticeLevel::Info => "info",
                    NoticeLevel::Success => "ok",
                    NoticeLevel::Error => "error",
                };
                eprintln!("[{}] {}", tag, notice.text());
            }
        }
        self.board.clear();
    }
}
