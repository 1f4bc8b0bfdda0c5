//! Groq provider client and API-key failover
//!
//! [`GroqClient`] wraps the two provider endpoints this service uses
//! (chat completions and audio transcriptions) over a shared pooled
//! HTTP client. [`with_failover`] drives an operation across the key
//! pool, one key at a time, until one succeeds.

mod chat;
pub mod failover;
mod transcription;

pub use failover::with_failover;

use thiserror::Error;

use crate::config::ProviderConfig;

/// Provider-side errors
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No API keys were discoverable; fatal to any provider operation
    #[error("no provider API keys configured; set GROQ_API_KEY or GROQ_API_KEY_ALT_* in the environment")]
    NoKeysConfigured,
    /// Transport-level failure for a single attempt
    #[error("provider request failed: {0}")]
    Request(String),
    /// The provider returned a non-success status
    #[error("provider API returned {status}: {body}")]
    Api { status: u16, body: String },
    /// The reply carried no usable content
    #[error("provider response contained no content")]
    EmptyResponse,
    /// Every key in the pool failed for this request
    #[error("all {attempts} provider API key(s) failed")]
    AllKeysExhausted { attempts: usize },
}

/// Client for an OpenAI-compatible Groq API
#[derive(Debug, Clone)]
pub struct GroqClient {
    http: reqwest::Client,
    api_url: String,
    chat_model: String,
    transcription_model: String,
    temperature: f32,
    max_tokens: u32,
}

impl GroqClient {
    pub fn new(http: reqwest::Client, config: &ProviderConfig) -> Self {
        Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            chat_model: config.chat_model.clone(),
            transcription_model: config.transcription_model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}
