//! Application configuration. AI provider credentials, output paths.

use crate::domain::DomainError;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Which generator backs the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiProvider {
    Gemini,
    OpenAi,
    Mock,
}

impl AiProvider {
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "openai" => Ok(Self::OpenAi),
            "mock" => Ok(Self::Mock),
            other => Err(DomainError::Config(format!(
                "unknown provider '{}': expected gemini, openai or mock",
                other
            ))),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// gemini | openai | mock. Read from LESSON_DECK_PROVIDER.
    #[serde(default)]
    pub provider: Option<String>,

    /// Provider API key. Read from LESSON_DECK_API_KEY, GEMINI_API_KEY or API_KEY.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL (Gemini) or full endpoint (OpenAI-compatible). Read from LESSON_DECK_API_URL.
    #[serde(default)]
    pub api_url: Option<String>,

    /// Model name. Read from LESSON_DECK_MODEL.
    #[serde(default)]
    pub model: Option<String>,

    /// Directory where decks are written. Read from LESSON_DECK_OUTPUT_DIR.
    #[serde(default)]
    pub output_dir: Option<String>,

    /// HTTP timeout for the generation call. Unset means the client default.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Load from `LESSON_DECK_*` env vars, `.env`, and the optional `LESSON_DECK_CONFIG` file.
    /// A malformed value fails the whole load.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        Self::load_from(config::Environment::with_prefix("LESSON_DECK"))
    }

    fn load_from(env: config::Environment) -> Result<Self, config::ConfigError> {
        let mut c = config::Config::builder().add_source(env);
        if let Ok(path) = std::env::var("LESSON_DECK_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// API key from config, then GEMINI_API_KEY, then API_KEY. Empty values count as unset.
    pub fn api_key(&self) -> Option<String> {
        first_key([
            self.api_key.clone(),
            std::env::var("GEMINI_API_KEY").ok(),
            std::env::var("API_KEY").ok(),
        ])
    }

    /// Configured provider; falls back to Gemini when a key is present, Mock otherwise.
    pub fn provider(&self) -> Result<AiProvider, DomainError> {
        match self.provider.as_deref() {
            Some(p) => AiProvider::parse(p),
            None if self.api_key().is_some() => Ok(AiProvider::Gemini),
            None => Ok(AiProvider::Mock),
        }
    }

    pub fn api_url_or_default(&self, provider: AiProvider) -> String {
        self.api_url.clone().unwrap_or_else(|| match provider {
            AiProvider::OpenAi => DEFAULT_OPENAI_URL.to_string(),
            AiProvider::Gemini | AiProvider::Mock => DEFAULT_GEMINI_URL.to_string(),
        })
    }

    pub fn model_or_default(&self, provider: AiProvider) -> String {
        self.model.clone().unwrap_or_else(|| match provider {
            AiProvider::OpenAi => DEFAULT_OPENAI_MODEL.to_string(),
            AiProvider::Gemini | AiProvider::Mock => DEFAULT_GEMINI_MODEL.to_string(),
        })
    }

    /// Output directory. Defaults to the current directory.
    pub fn output_dir_or_default(&self) -> PathBuf {
        PathBuf::from(self.output_dir.as_deref().unwrap_or("."))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// HTTP client for the AI adapters, with the configured timeout if any.
    pub fn http_client(&self) -> Result<reqwest::Client, DomainError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.request_timeout() {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|e| DomainError::Config(format!("HTTP client: {}", e)))
    }
}

/// First candidate that is not blank.
fn first_key(candidates: impl IntoIterator<Item = Option<String>>) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|k| !k.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parse() {
        assert_eq!(AiProvider::parse("Gemini").unwrap(), AiProvider::Gemini);
        assert_eq!(AiProvider::parse(" openai ").unwrap(), AiProvider::OpenAi);
        assert!(matches!(
            AiProvider::parse("claude"),
            Err(DomainError::Config(_))
        ));
    }

    #[test]
    fn test_explicit_provider_wins() {
        let cfg = AppConfig {
            provider: Some("mock".into()),
            api_key: Some("k".into()),
            ..Default::default()
        };
        assert_eq!(cfg.provider().unwrap(), AiProvider::Mock);
    }

    #[test]
    fn test_defaults_per_provider() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.model_or_default(AiProvider::Gemini), DEFAULT_GEMINI_MODEL);
        assert_eq!(cfg.model_or_default(AiProvider::OpenAi), DEFAULT_OPENAI_MODEL);
        assert_eq!(cfg.api_url_or_default(AiProvider::OpenAi), DEFAULT_OPENAI_URL);
        assert_eq!(cfg.output_dir_or_default(), PathBuf::from("."));
        assert!(cfg.request_timeout().is_none());
    }

    #[test]
    fn test_overrides() {
        let cfg = AppConfig {
            model: Some("gemini-2.5-pro".into()),
            output_dir: Some("decks".into()),
            request_timeout_secs: Some(90),
            ..Default::default()
        };
        assert_eq!(cfg.model_or_default(AiProvider::Gemini), "gemini-2.5-pro");
        assert_eq!(cfg.output_dir_or_default(), PathBuf::from("decks"));
        assert_eq!(cfg.request_timeout(), Some(Duration::from_secs(90)));
    }

    fn env_of(vars: &[(&str, &str)]) -> config::Environment {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<config::Map<String, String>>();
        config::Environment::with_prefix("LESSON_DECK").source(Some(map))
    }

    #[test]
    fn test_load_from_env() {
        let cfg = AppConfig::load_from(env_of(&[
            ("LESSON_DECK_PROVIDER", "openai"),
            ("LESSON_DECK_API_KEY", "sk-test"),
            ("LESSON_DECK_REQUEST_TIMEOUT_SECS", "90"),
        ]))
        .unwrap();
        assert_eq!(cfg.provider().unwrap(), AiProvider::OpenAi);
        assert_eq!(cfg.api_key.as_deref(), Some("sk-test"));
        assert_eq!(cfg.request_timeout(), Some(Duration::from_secs(90)));
    }

    #[test]
    fn test_malformed_timeout_fails_load() {
        let result = AppConfig::load_from(env_of(&[
            ("LESSON_DECK_PROVIDER", "openai"),
            ("LESSON_DECK_API_KEY", "sk-test"),
            ("LESSON_DECK_REQUEST_TIMEOUT_SECS", "90s"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_key_falls_through() {
        assert_eq!(
            first_key([Some("".into()), Some("  ".into()), Some("gem".into())]),
            Some("gem".to_string())
        );
        assert_eq!(first_key([None, Some("api".into())]), Some("api".to_string()));
        assert_eq!(first_key([Some(" ".into()), None]), None);
    }
}
