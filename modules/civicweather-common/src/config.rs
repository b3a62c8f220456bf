use std::env;

use tracing::info;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Telegram
    pub bot_token: String,

    // Signal search
    pub gdelt_doc_base: String,
    pub signal_query: String,
    pub user_agent: String,
    pub max_articles: u32,

    // Place resolution
    pub nominatim_base: String,
    pub geocode_places: bool,
}

const DEFAULT_SIGNAL_QUERY: &str = "\"public rally\" OR \"street protest\" OR \"demonstration announced\" OR \"planned march\" OR \"protest march\"";

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        Self {
            bot_token: required_env("BOT_TOKEN"),
            gdelt_doc_base: env::var("GDELT_DOC_BASE")
                .unwrap_or_else(|_| "https://api.gdeltproject.org/api/v2/doc/doc".to_string()),
            signal_query: env::var("SIGNAL_QUERY")
                .unwrap_or_else(|_| DEFAULT_SIGNAL_QUERY.to_string()),
            user_agent: env::var("USER_AGENT")
                .unwrap_or_else(|_| "CivicWeatherBot/0.1 (contact: ops@example.com)".to_string()),
            max_articles: env::var("MAX_ARTICLES")
                .unwrap_or_else(|_| "50".to_string())
                .parse()
                .expect("MAX_ARTICLES must be a number"),
            nominatim_base: env::var("NOMINATIM_BASE")
                .unwrap_or_else(|_| "https://nominatim.openstreetmap.org".to_string()),
            geocode_places: env::var("GEOCODE_PLACES")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }

    /// Log the loaded configuration without secrets.
    pub fn log_redacted(&self) {
        info!(
            gdelt_doc_base = self.gdelt_doc_base.as_str(),
            nominatim_base = self.nominatim_base.as_str(),
            max_articles = self.max_articles,
            geocode_places = self.geocode_places,
            bot_token = "***",
            "Config loaded"
        );
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}
