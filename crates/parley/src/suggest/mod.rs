//! Chat reply suggestion flow
//!
//! One request runs: snapshot history -> build prompt -> provider call
//! with key failover -> strict parse -> append to history -> fresh
//! snapshot. A failed call or unusable reply leaves history untouched.

pub mod history;
pub mod parse;
pub mod prompts;

pub use history::{HistoryStore, OPTION_COUNT, OptionBatch};
pub use parse::ParseError;

use std::sync::Arc;

use thiserror::Error;

use crate::keys::KeyPool;
use crate::provider::{GroqClient, ProviderError, with_failover};

/// Why a suggestion request failed
#[derive(Debug, Error)]
pub enum SuggestError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Result of one successful suggestion request
#[derive(Debug, Clone)]
pub struct SuggestionOutcome {
    /// The freshly generated batch
    pub options: OptionBatch,
    /// History window after the append, oldest first, new batch last
    pub recent_history: Vec<OptionBatch>,
}

/// Orchestrates the suggestion pipeline
pub struct SuggestionService {
    client: GroqClient,
    pool: Arc<KeyPool>,
    history: Arc<HistoryStore>,
}

impl SuggestionService {
    pub fn new(client: GroqClient, pool: Arc<KeyPool>, history: Arc<HistoryStore>) -> Self {
        Self {
            client,
            pool,
            history,
        }
    }

    /// Produce four fresh reply options for an incoming message.
    pub async fn suggest(&self, message: &str) -> Result<SuggestionOutcome, SuggestError> {
        let history = self.history.snapshot();
        let prompt = prompts::build_user_prompt(message, &history);

        let raw = with_failover(&self.pool, "chat completion", |key| {
            self.client
                .chat_completion(key, prompts::SYSTEM_PROMPT, &prompt)
        })
        .await?;

        // Parsing happens once, after failover: an unusable reply is a
        // terminal failure, not a reason to spend another key.
        let options = parse::parse_options(&raw)?;

        self.history.append(options.clone());
        let recent_history = self.history.snapshot();

        Ok(SuggestionOutcome {
            options,
            recent_history,
        })
    }
}
