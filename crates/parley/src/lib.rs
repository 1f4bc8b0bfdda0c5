//! Parley - request broker for a communication-assistance backend
//!
//! This crate brokers two operations to a Groq-compatible provider on
//! behalf of an assisted-communication client: generating four short
//! reply suggestions for an incoming message, and transcribing spoken
//! audio to text. Provider calls fail over across an ordered pool of
//! API keys, and a bounded window of recently suggested replies is fed
//! back into prompts to steer the model away from repetition.

pub mod config;
pub mod error;
pub mod keys;
pub mod provider;
pub mod server;
pub mod suggest;
pub mod transcribe;

pub use error::ParleyError;
