//! Suggestion service configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Characters of document text sent along with a suggestion request.
pub const DEFAULT_SAMPLE_CHARS: usize = 1000;

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuggestConfig {
    /// Gemini API key. Empty means unconfigured.
    pub api_key: String,
    pub model: String,
    /// Base URL up to and excluding `/models`.
    pub endpoint: String,
    pub sample_chars: usize,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_owned(),
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            sample_chars: DEFAULT_SAMPLE_CHARS,
        }
    }
}

impl std::fmt::Debug for SuggestConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestConfig")
            .field("api_key", &if self.api_key.is_empty() { "" } else { "<redacted>" })
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("sample_chars", &self.sample_chars)
            .finish()
    }
}

impl SuggestConfig {
    /// Load config from environment variables.
    ///
    /// - `GEMINI_API_KEY` (or `API_KEY`): service key
    /// - `TYPOFLOW_MODEL`: model name
    /// - `TYPOFLOW_ENDPOINT`: API base URL
    /// - `TYPOFLOW_SAMPLE_CHARS`: prompt sample length
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(key) = lookup("GEMINI_API_KEY").or_else(|| lookup("API_KEY")) {
            config.api_key = key.trim().to_owned();
        }
        if let Some(model) = lookup("TYPOFLOW_MODEL").filter(|m| !m.trim().is_empty()) {
            config.model = model.trim().to_owned();
        }
        if let Some(endpoint) = lookup("TYPOFLOW_ENDPOINT").filter(|e| !e.trim().is_empty()) {
            config.endpoint = endpoint.trim().trim_end_matches('/').to_owned();
        }
        if let Some(raw) = lookup("TYPOFLOW_SAMPLE_CHARS") {
            config.sample_chars = raw.trim().parse().map_err(|_| ConfigError {
                key: "TYPOFLOW_SAMPLE_CHARS",
                value: raw.clone(),
            })?;
        }
        Ok(config)
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Full `generateContent` URL for the configured model.
    pub fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SuggestConfig::from_lookup(lookup(&[])).unwrap();
        assert!(!config.has_api_key());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.sample_chars, 1000);
        assert_eq!(
            config.generate_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_env_overrides() {
        let config = SuggestConfig::from_lookup(lookup(&[
            ("API_KEY", " fallback "),
            ("TYPOFLOW_ENDPOINT", "http://localhost:8080/v1/"),
            ("TYPOFLOW_MODEL", "test-model"),
            ("TYPOFLOW_SAMPLE_CHARS", "200"),
        ]))
        .unwrap();
        assert_eq!(config.api_key, "fallback");
        assert_eq!(config.sample_chars, 200);
        assert_eq!(
            config.generate_url(),
            "http://localhost:8080/v1/models/test-model:generateContent"
        );
    }

    #[test]
    fn test_primary_key_wins() {
        let config = SuggestConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "primary"),
            ("API_KEY", "fallback"),
        ]))
        .unwrap();
        assert_eq!(config.api_key, "primary");
    }

    #[test]
    fn test_bad_sample_chars() {
        let err = SuggestConfig::from_lookup(lookup(&[("TYPOFLOW_SAMPLE_CHARS", "lots")]))
            .unwrap_err();
        assert_eq!(err.key, "TYPOFLOW_SAMPLE_CHARS");
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = SuggestConfig {
            api_key: "secret".into(),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: SuggestConfig = serde_json::from_str(r#"{"apiKey": "k"}"#).unwrap();
        assert_eq!(config.api_key, "k");
        assert_eq!(config.model, DEFAULT_MODEL);
    }
}
