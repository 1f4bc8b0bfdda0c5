//! Audio transcription call against the provider
//!
//! The provider speaks the OpenAI Whisper API format: a multipart form
//! upload with `model` and `file` fields, bearer auth, and a JSON
//! response with a `text` field.

use bytes::Bytes;
use serde::Deserialize;
use tracing::debug;

use super::{GroqClient, ProviderError};
use crate::keys::ApiKey;

/// Response structure for OpenAI-compatible transcription APIs
#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

impl GroqClient {
    /// One transcription attempt with a single key.
    ///
    /// `filename` and `content_type` are advisory; the payload is passed
    /// through untouched and the transcript is returned as-is (an empty
    /// string is a valid result).
    pub async fn transcribe(
        &self,
        key: ApiKey,
        audio: Bytes,
        filename: &str,
        content_type: &str,
    ) -> Result<String, ProviderError> {
        let part = reqwest::multipart::Part::bytes(audio.to_vec())
            .file_name(filename.to_string())
            .mime_str(content_type)
            .map_err(|e| ProviderError::Request(format!("invalid content type: {e}")))?;

        let form = reqwest::multipart::Form::new()
            .text("model", self.transcription_model.clone())
            .text("response_format", "json")
            .part("file", part);

        let url = format!("{}/audio/transcriptions", self.api_url);
        debug!("Calling transcription at: {url}");

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", key.expose()))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let transcription: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        Ok(transcription.text)
    }
}
