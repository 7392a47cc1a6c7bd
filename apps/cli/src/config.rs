use std::path::PathBuf;
use std::time::Duration;

use aforro_core::constants::{DEFAULT_OUTPUT_PATH, DEFAULT_SUBSCRIPTIONS_PATH};
use aforro_core::DisplayLocale;
use aforro_market_data::provider::igcp::{DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT};

pub struct Config {
    pub subscriptions_path: PathBuf,
    pub output_path: PathBuf,
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub locale: DisplayLocale,
    pub log_json: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; missing or unparseable values
    /// fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let subscriptions_path: PathBuf = lookup("AFORRO_SUBSCRIPTIONS_PATH")
            .unwrap_or_else(|| DEFAULT_SUBSCRIPTIONS_PATH.to_string())
            .into();
        let output_path: PathBuf = lookup("AFORRO_OUTPUT_PATH")
            .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string())
            .into();
        let api_base_url =
            lookup("AFORRO_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let request_timeout = lookup("AFORRO_REQUEST_TIMEOUT_MS")
            .and_then(|ms| ms.trim().parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        let locale = match lookup("AFORRO_DISPLAY_LOCALE") {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                eprintln!("{}; using {}", e, DisplayLocale::default());
                DisplayLocale::default()
            }),
            None => DisplayLocale::default(),
        };
        let log_json = lookup("AFORRO_LOG_FORMAT")
            .map(|format| format.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        Self {
            subscriptions_path,
            output_path,
            api_base_url,
            request_timeout,
            locale,
            log_json,
        }
    }
}
