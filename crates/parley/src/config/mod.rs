use serde::Deserialize;

/// Main configuration structure for Parley
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Provider (Groq API) configuration
    #[serde(default)]
    pub provider: ProviderConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "127.0.0.1:8000")
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> String {
    "127.0.0.1:8000".to_string()
}

/// Provider API configuration
///
/// The API key pool is not configured here: keys are discovered from the
/// environment (GROQ_API_KEY and GROQ_API_KEY_ALT_*) by [`crate::keys::KeyPool`].
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the OpenAI-compatible provider API
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Chat model used for reply suggestions (GROQ_CHAT_MODEL overrides)
    #[serde(default = "default_chat_model")]
    pub chat_model: String,
    /// Model used for audio transcription
    #[serde(default = "default_transcription_model")]
    pub transcription_model: String,
    /// Sampling temperature for suggestion requests
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Output length cap for suggestion requests
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            chat_model: default_chat_model(),
            transcription_model: default_transcription_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_chat_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_transcription_model() -> String {
    "whisper-large-v3".to_string()
}

fn default_temperature() -> f32 {
    0.75
}

fn default_max_tokens() -> u32 {
    512
}

fn default_timeout_secs() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.server.listen_addr, "127.0.0.1:8000");
        assert_eq!(config.provider.api_url, "https://api.groq.com/openai/v1");
        assert_eq!(config.provider.chat_model, "llama-3.3-70b-versatile");
        assert_eq!(config.provider.transcription_model, "whisper-large-v3");
        assert_eq!(config.provider.temperature, 0.75);
        assert_eq!(config.provider.max_tokens, 512);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [provider]
            chat_model = "llama-3.1-8b-instant"

            [server]
            listen_addr = "0.0.0.0:9000"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.listen_addr, "0.0.0.0:9000");
        assert_eq!(config.provider.chat_model, "llama-3.1-8b-instant");
        assert_eq!(config.provider.temperature, 0.75);
        assert_eq!(config.provider.timeout_secs, 60);
    }

    #[test]
    fn empty_config_parses() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.provider.max_tokens, 512);
    }

    #[test]
    fn config_round_trips_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nlisten_addr = \"127.0.0.1:7777\"\n").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let config: Config = toml::from_str(&content).unwrap();
        assert_eq!(config.server.listen_addr, "127.0.0.1:7777");
        assert_eq!(config.provider.chat_model, "llama-3.3-70b-versatile");
    }
}
