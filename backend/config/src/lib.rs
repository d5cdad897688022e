//! `scamlens-config` — runtime configuration for the scamlens service.
//!
//! All settings come from environment variables with sensible defaults; the
//! only secret is the provider API key, which stays optional here and is
//! surfaced as a configuration error at request time if absent.

pub mod redact;

pub use redact::redact_secret;

use serde::Deserialize;

/// Scamlens runtime configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP server bind address
    pub bind_address: String,
    /// HTTP server port
    pub port: u16,
    /// Completion provider API key
    pub openai_api_key: Option<String>,
    /// Completion provider base URL
    pub openai_base_url: String,
    /// Multimodal model for the OCR pre-step
    pub ocr_model: String,
    /// Text model for the classification call
    pub classify_model: String,
    /// Outbound call timeout, kept below the browser's 60 s budget so
    /// provider timeouts are reported as such rather than as aborts
    pub request_timeout_secs: u64,
    /// Global cooldown between accepted analysis requests
    pub cooldown_ms: u64,
    /// Directory for rolling NDJSON log files
    pub log_dir: String,
    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            openai_api_key: None,
            openai_base_url: "https://api.openai.com/v1".to_string(),
            ocr_model: "gpt-4o".to_string(),
            classify_model: "gpt-4".to_string(),
            request_timeout_secs: 55,
            cooldown_ms: 1000,
            log_dir: "logs".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_address: std::env::var("SCAMLENS_BIND").unwrap_or(defaults.bind_address),
            port: std::env::var("SCAMLENS_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            openai_api_key: std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            openai_base_url: std::env::var("SCAMLENS_OPENAI_BASE_URL")
                .unwrap_or(defaults.openai_base_url),
            ocr_model: std::env::var("SCAMLENS_OCR_MODEL").unwrap_or(defaults.ocr_model),
            classify_model: std::env::var("SCAMLENS_CLASSIFY_MODEL")
                .unwrap_or(defaults.classify_model),
            request_timeout_secs: std::env::var("SCAMLENS_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            cooldown_ms: std::env::var("SCAMLENS_COOLDOWN_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cooldown_ms),
            log_dir: std::env::var("SCAMLENS_LOG_DIR").unwrap_or(defaults.log_dir),
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
        }
    }

    /// API key masked for logs and status output.
    pub fn redacted_key(&self) -> String {
        match &self.openai_api_key {
            Some(key) => redact_secret(key),
            None => "(not set)".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_contract() {
        let config = AppConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.cooldown_ms, 1000);
        assert_eq!(config.request_timeout_secs, 55);
        assert_eq!(config.ocr_model, "gpt-4o");
        assert_eq!(config.classify_model, "gpt-4");
        assert!(config.openai_api_key.is_none());
    }

    #[test]
    fn redacted_key_never_exposes_secret() {
        let config = AppConfig {
            openai_api_key: Some("sk-proj-super-secret-value".to_string()),
            ..AppConfig::default()
        };
        let shown = config.redacted_key();
        assert!(!shown.contains("secret"));
        assert!(shown.starts_with("sk-p"));
    }
}
