use crate::api::DEFAULT_API_URL;
use anyhow::Context;
use reqwest::Url;
use std::{ env, path::PathBuf, time::Duration };
use tracing::Level;

pub struct Config {
    pub api_url: Url,
    pub tick_rate: Duration,
    pub request_timeout: Option<Duration>,
    pub log_file: Option<PathBuf>,
    pub log_level: Level,
}

impl Config {
    /// Reads `.env` if present, then the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        if let Err(e) = dotenv::dotenv() {
            if !e.not_found() {
                return Err(e).context("failed to read .env");
            }
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let api_url = lookup("TRIVIA_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(&api_url).with_context(|| format!("invalid TRIVIA_API_URL {}", api_url))?;

        let tick_rate = match lookup("TRIVIA_TICK_RATE_MS") {
            Some(ms) => Duration::from_millis(ms.parse().context("invalid TRIVIA_TICK_RATE_MS")?),
            None => Duration::from_millis(200),
        };

        let request_timeout = lookup("TRIVIA_TIMEOUT_SECS")
            .map(|secs| secs.parse().map(Duration::from_secs))
            .transpose()
            .context("invalid TRIVIA_TIMEOUT_SECS")?;

        let log_level = match lookup("TRIVIA_LOG_LEVEL") {
            Some(level) => level.parse().context("invalid TRIVIA_LOG_LEVEL")?,
            None => Level::INFO,
        };

        Ok(Self {
            api_url,
            tick_rate,
            request_timeout,
            log_file: lookup("TRIVIA_LOG_FILE").map(PathBuf::from),
            log_level,
        })
    }
}
