use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use simplelog::LevelFilter;
use url::Url;

use crate::models::RequestDescriptor;

pub const DEFAULT_URL: &str = "https://secure.unicatt.it/didatticaweb2/ps/lezioni/";
pub const DEFAULT_OUTPUT: &str = "lesson_data.json";

/// Bounded retry applied around the single POST.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub retry_statuses: Vec<u16>,
    /// Delay before the first retry; doubles on every following one.
    pub backoff_factor: Duration,
    pub max_backoff: Duration,
    /// Applies to each attempt, not to the whole retry sequence.
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 4,
            retry_statuses: vec![429, 500, 502, 503, 504],
            backoff_factor: Duration::from_secs(2),
            max_backoff: Duration::from_secs(120),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub url: Url,
    pub request: RequestDescriptor,
    pub retry: RetryPolicy,
    pub output_path: PathBuf,
    pub log_level: LevelFilter,
}

impl Settings {
    // Reads overrides from the process environment (after `.env` has been loaded).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let defaults = RequestDescriptor::default();
        let mut retry = RetryPolicy::default();

        let raw_url = text("UNICATT_URL", DEFAULT_URL);
        let url = Url::parse(&raw_url).with_context(|| format!("UNICATT_URL is not a valid URL: {}", raw_url))?;

        if let Some(value) = lookup("HTTP_TIMEOUT_SECS") {
            let secs: u64 = parse_number("HTTP_TIMEOUT_SECS", &value)?;
            if secs == 0 {
                anyhow::bail!("HTTP_TIMEOUT_SECS must be at least 1");
            }
            retry.timeout = Duration::from_secs(secs);
        }
        if let Some(value) = lookup("HTTP_MAX_RETRIES") {
            retry.max_retries = parse_number("HTTP_MAX_RETRIES", &value)?;
        }

        let log_level = match lookup("LOG_LEVEL") {
            Some(value) => LevelFilter::from_str(&value)
                .map_err(|_| anyhow::anyhow!("LOG_LEVEL is not a valid level: {}", value))?,
            None => LevelFilter::Info,
        };

        Ok(Self {
            url,
            request: RequestDescriptor {
                codice_sede: text("UNICATT_CODICE_SEDE", &defaults.codice_sede),
                anno_accademico: text("UNICATT_ANNO_ACCADEMICO", &defaults.anno_accademico),
                codice_facolta: text("UNICATT_CODICE_FACOLTA", &defaults.codice_facolta),
                codice_corso_di_laurea: text("UNICATT_CODICE_CORSO_DI_LAUREA", &defaults.codice_corso_di_laurea),
                anno_di_corso: text("UNICATT_ANNO_DI_CORSO", &defaults.anno_di_corso),
            },
            retry,
            output_path: PathBuf::from(text("LESSON_DATA_PATH", DEFAULT_OUTPUT)),
            log_level,
        })
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.trim().parse::<T>().with_context(|| format!("{} is not a valid number: {}", key, value))
}
