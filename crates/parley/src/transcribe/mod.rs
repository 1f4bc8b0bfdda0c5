//! Audio transcription flow
//!
//! Thin orchestration over the provider transcription call: the same
//! key failover as the suggestion flow, no output validation, and no
//! shared state to update.

use std::sync::Arc;

use bytes::Bytes;

use crate::keys::KeyPool;
use crate::provider::{GroqClient, ProviderError, with_failover};

pub struct TranscriptionService {
    client: GroqClient,
    pool: Arc<KeyPool>,
}

impl TranscriptionService {
    pub fn new(client: GroqClient, pool: Arc<KeyPool>) -> Self {
        Self { client, pool }
    }

    /// Transcribe an audio payload, trusting the provider's transcript.
    pub async fn transcribe(
        &self,
        audio: Bytes,
        filename: &str,
        content_type: &str,
    ) -> Result<String, ProviderError> {
        with_failover(&self.pool, "transcription", |key| {
            self.client
                .transcribe(key, audio.clone(), filename, content_type)
        })
        .await
    }
}
