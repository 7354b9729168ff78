//! Environment-derived configuration.

use std::fmt::{self, Debug};
use std::path::PathBuf;

/// Pushover delivery credentials.
#[derive(Clone)]
pub struct PushoverConfig {
    /// The Pushover user key.
    pub user: String,
    /// The Pushover application token.
    pub token: String,
}

impl Debug for PushoverConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PushoverConfig")
            .field("user", &"<redacted>")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Application configuration, read from the environment once at startup
/// and passed into construction explicitly.
#[derive(Clone)]
pub struct AppConfig {
    /// API key for the model provider.
    pub api_key: String,
    /// Model identifier to request completions from.
    pub model: String,
    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,
    /// The name of the persona the agent answers as.
    pub persona: String,
    /// Directory holding the grounding documents.
    pub materials_dir: PathBuf,
    /// Pushover credentials, when notification delivery is configured.
    pub pushover: Option<PushoverConfig>,
}

impl AppConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// Only `OPENAI_API_KEY` is required; everything else falls back to
    /// a default. Returns `None` when the key is missing.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("OPENAI_API_KEY")?;
        let pushover =
            match (lookup("PUSHOVER_USER"), lookup("PUSHOVER_TOKEN")) {
                (Some(user), Some(token)) => {
                    Some(PushoverConfig { user, token })
                }
                _ => None,
            };
        Some(Self {
            api_key,
            model: lookup("OPENAI_MODEL")
                .unwrap_or_else(|| "gpt-4o-mini".to_owned()),
            base_url: lookup("OPENAI_BASE_URL")
                .unwrap_or_else(|| "https://api.openai.com/v1".to_owned()),
            persona: lookup("PERSONA_NAME")
                .unwrap_or_else(|| "Carlos Vallejo".to_owned()),
            materials_dir: lookup("MATERIALS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("me")),
            pushover,
        })
    }
}

impl Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("persona", &self.persona)
            .field("materials_dir", &self.materials_dir)
            .field("pushover", &self.pushover)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_is_required() {
        assert!(AppConfig::from_lookup(|_| None).is_none());
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(|key| match key {
            "OPENAI_API_KEY" => Some("xxx".to_owned()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.persona, "Carlos Vallejo");
        assert_eq!(config.materials_dir, PathBuf::from("me"));
        assert!(config.pushover.is_none());
    }

    #[test]
    fn test_pushover_requires_both_credentials() {
        let config = AppConfig::from_lookup(|key| match key {
            "OPENAI_API_KEY" => Some("xxx".to_owned()),
            "PUSHOVER_USER" => Some("user".to_owned()),
            _ => None,
        })
        .unwrap();
        assert!(config.pushover.is_none());

        let config = AppConfig::from_lookup(|key| match key {
            "OPENAI_API_KEY" => Some("xxx".to_owned()),
            "PUSHOVER_USER" => Some("user".to_owned()),
            "PUSHOVER_TOKEN" => Some("token".to_owned()),
            _ => None,
        })
        .unwrap();
        assert!(config.pushover.is_some());
    }
}
