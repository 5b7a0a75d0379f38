//! Runtime configuration read from the environment (and `.env`)

use std::env;
use std::time::Duration;

use crate::error::AdvisorError;
use crate::Result;

const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_RESPONDER_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    /// Empty when unset; general questions then fail with an apology.
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub responder_timeout: Duration,
    pub port: u16,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: String::new(),
            gemini_model: DEFAULT_MODEL.to_string(),
            responder_timeout: Duration::from_secs(DEFAULT_RESPONDER_TIMEOUT_SECS),
            port: DEFAULT_PORT,
        }
    }
}

impl AdvisorConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let gemini_api_key = lookup("GEMINI_API_KEY").unwrap_or_default();
        let gemini_model = lookup("GEMINI_MODEL")
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(defaults.gemini_model);

        let responder_timeout = match lookup("ADVISOR_RESPONDER_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_number(&raw, "ADVISOR_RESPONDER_TIMEOUT_SECS")?),
            None => defaults.responder_timeout,
        };

        let port = match lookup("PORT").or_else(|| lookup("API_PORT")) {
            Some(raw) => parse_number(&raw, "PORT")?,
            None => defaults.port,
        };

        Ok(Self {
            gemini_api_key,
            gemini_model,
            responder_timeout,
            port,
        })
    }
}

fn parse_number<T: std::str::FromStr>(raw: &str, key: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| AdvisorError::Config(format!("{} must be a number, got '{}'", key, raw)))
}
