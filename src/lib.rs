//! A small client for the PromptBet agent API: assistant search, thread
//! creation and blocking runs, plus the betting pool generator sequence built
//! on top of them.

use dotenvy::dotenv;
use reqwest::header::InvalidHeaderValue;
use serde_json::Value;
use std::env;

pub mod assistants;
pub mod betting_pool;
pub mod client;
pub mod transport;

pub use client::AgentClient;

/// The deployment the betting pool generator lives on.
pub const DEFAULT_BASE_URL: &str = "https://pvpvai.com/promptbet-agent";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("API responded with status {status}: {payload}")]
    Api { status: u16, payload: Value },
    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Betting pool generator assistant not found")]
    AssistantNotFound,
    #[error("invalid header value: {0}")]
    Header(#[from] InvalidHeaderValue),
}

impl Error {
    /// The body the server answered with, if the failure came from the server.
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Error::Api { payload, .. } => Some(payload),
            _ => None,
        }
    }
}

pub type ApiResponseOrError<T> = Result<T, Error>;

#[derive(Clone, Eq, PartialEq)]
pub struct Credentials {
    base_url: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .finish()
    }
}

impl Credentials {
    /// Creates credentials for a deployment. Without a key, requests carry no
    /// `Authorization` header.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
        }
    }

    /// Reads `PROMPTBET_BASE_URL` and `PROMPTBET_KEY`, loading `.env` first.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use promptbet::Credentials;
    ///
    /// let credentials = Credentials::from_env();
    /// assert!(!credentials.base_url().is_empty());
    /// ```
    pub fn from_env() -> Self {
        dotenv().ok();

        let base_url =
            env::var("PROMPTBET_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let api_key = env::var("PROMPTBET_KEY").ok().filter(|key| !key.is_empty());

        Self::new(base_url, api_key)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub(crate) fn url(&self, route: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            route.trim_start_matches('/')
        )
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, None)
    }
}
