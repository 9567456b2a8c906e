use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sentiment_weight: f64,
    pub fundamentals_weight: f64,
    pub buy_threshold: f64,
    pub sell_threshold: f64,
    pub tickers: Vec<String>,
    /// Subreddits searched for `$TICKER`, joined with `+`.
    pub subreddits: String,
    pub reddit_limit: u32,
    pub news_page_size: u32,
    pub sentiment_model: String,
    pub gemini_model: String,
    pub max_sentiment_chars: usize,
    pub sample_titles_per_source: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sentiment_weight: 0.7,
            fundamentals_weight: 0.3,
            // Unreachable with the default weights, see `warnings`.
            buy_threshold: 1.5,
            sell_threshold: 0.5,
            tickers: ["AAPL", "MSFT", "TSLA", "AMZN", "GOOGL"]
                .into_iter()
                .map(String::from)
                .collect(),
            subreddits: "stocks+investing+wallstreetbets".to_string(),
            reddit_limit: 10,
            news_page_size: 10,
            sentiment_model: "yiyanghkust/finbert-tone".to_string(),
            gemini_model: "gemini-pro".to_string(),
            max_sentiment_chars: 512,
            sample_titles_per_source: 2,
        }
    }
}

impl AppConfig {
    /// Highest total score the two weighted scorers can produce.
    pub fn max_total(&self) -> f64 {
        self.sentiment_weight + self.fundamentals_weight
    }

    /// Inconsistencies worth reporting at startup. Values are never adjusted.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.buy_threshold > self.max_total() {
            warnings.push(format!(
                "buy_threshold {:.2} exceeds the maximum total score {:.2}; BUY is unreachable",
                self.buy_threshold,
                self.max_total()
            ));
        }
        if self.sell_threshold >= self.buy_threshold {
            warnings.push(format!(
                "sell_threshold {:.2} is not below buy_threshold {:.2}; BUY takes precedence",
                self.sell_threshold, self.buy_threshold
            ));
        }
        for (name, weight) in [
            ("sentiment_weight", self.sentiment_weight),
            ("fundamentals_weight", self.fundamentals_weight),
        ] {
            if !(0.0..=1.0).contains(&weight) {
                warnings.push(format!("{} {:.2} is outside [0, 1]", name, weight));
            }
        }
        if self.tickers.is_empty() {
            warnings.push("no tickers configured".to_string());
        }
        warnings
    }
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

/// Loads `path` if it exists, otherwise falls back to the built-in defaults.
pub fn load_config_or_default(path: &str) -> Result<AppConfig, ConfigError> {
    if Path::new(path).exists() {
        load_config(path)
    } else {
        Ok(AppConfig::default())
    }
}

#[derive(Debug, Clone)]
pub struct RedditCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub user_agent: String,
}

/// API credentials, each optional. A missing one disables its data source.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub reddit: Option<RedditCredentials>,
    pub newsapi_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub hf_api_token: Option<String>,
}

impl Credentials {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let reddit = match (get("REDDIT_CLIENT_ID"), get("REDDIT_CLIENT_SECRET")) {
            (Some(client_id), Some(client_secret)) => Some(RedditCredentials {
                client_id,
                client_secret,
                user_agent: get("REDDIT_USER_AGENT").unwrap_or_else(|| "MyStockAnalyzer/1.0".to_string()),
            }),
            _ => None,
        };

        Self {
            reddit,
            newsapi_key: get("NEWSAPI_KEY"),
            gemini_api_key: get("GEMINI_API_KEY"),
            hf_api_token: get("HF_API_TOKEN"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_reference_configuration() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.sentiment_weight, 0.7);
        assert_eq!(cfg.fundamentals_weight, 0.3);
        assert_eq!(cfg.buy_threshold, 1.5);
        assert_eq!(cfg.sell_threshold, 0.5);
        assert_eq!(cfg.tickers, vec!["AAPL", "MSFT", "TSLA", "AMZN", "GOOGL"]);
        assert_eq!(cfg.max_sentiment_chars, 512);
    }

    #[test]
    fn partial_json_keeps_defaults_for_missing_fields() {
        let cfg: AppConfig = serde_json::from_str(r#"{ "buy_threshold": 0.8, "tickers": ["NVDA"] }"#).unwrap();
        assert_eq!(cfg.buy_threshold, 0.8);
        assert_eq!(cfg.tickers, vec!["NVDA"]);
        assert_eq!(cfg.sell_threshold, 0.5);
        assert_eq!(cfg.gemini_model, "gemini-pro");
    }

    #[test]
    fn default_buy_threshold_is_flagged_but_kept() {
        let cfg = AppConfig::default();
        let warnings = cfg.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("unreachable"));
        assert_eq!(cfg.buy_threshold, 1.5);
    }

    #[test]
    fn consistent_thresholds_produce_no_warnings() {
        let cfg = AppConfig {
            buy_threshold: 0.8,
            sell_threshold: 0.3,
            ..AppConfig::default()
        };
        assert!(cfg.warnings().is_empty());
    }

    #[test]
    fn inverted_thresholds_are_flagged() {
        let cfg = AppConfig {
            buy_threshold: 0.4,
            sell_threshold: 0.6,
            ..AppConfig::default()
        };
        assert!(cfg.warnings().iter().any(|w| w.contains("not below")));
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let cfg = load_config_or_default("definitely/not/here.json").unwrap();
        assert_eq!(cfg.tickers.len(), 5);
    }

    #[test]
    fn credentials_require_both_reddit_id_and_secret() {
        let vars: HashMap<&str, &str> = [("REDDIT_CLIENT_ID", "id"), ("NEWSAPI_KEY", "  "), ("GEMINI_API_KEY", "g")]
            .into_iter()
            .collect();
        let creds = Credentials::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert!(creds.reddit.is_none());
        assert!(creds.newsapi_key.is_none());
        assert_eq!(creds.gemini_api_key.as_deref(), Some("g"));
    }

    #[test]
    fn reddit_user_agent_has_a_default() {
        let vars: HashMap<&str, &str> = [("REDDIT_CLIENT_ID", "id"), ("REDDIT_CLIENT_SECRET", "secret")]
            .into_iter()
            .collect();
        let creds = Credentials::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        let reddit = creds.reddit.unwrap();
        assert_eq!(reddit.client_id, "id");
        assert_eq!(reddit.user_agent, "MyStockAnalyzer/1.0");
    }
}
