//! Provider API key discovery and masking
//!
//! Keys are discovered once per process from the environment, in a fixed
//! order, and cached for the process lifetime. A key is a secret: only its
//! last six characters may ever appear in logs or debug output.

use std::env;
use std::fmt;
use std::sync::OnceLock;

use crate::provider::ProviderError;

/// Environment variables holding provider API keys, in failover order
const KEY_ENV_VARS: [&str; 5] = [
    "GROQ_API_KEY",
    "GROQ_API_KEY_ALT_1",
    "GROQ_API_KEY_ALT_2",
    "GROQ_API_KEY_ALT_3",
    "GROQ_API_KEY_ALT_4",
];

const MASK_SUFFIX_LEN: usize = 6;

/// A single provider API key
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The full secret value, for the Authorization header only
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Last six characters of the key, the only loggable form
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        let start = chars.len().saturating_sub(MASK_SUFFIX_LEN);
        chars[start..].iter().collect()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey(..{})", self.masked())
    }
}

/// Ordered, process-wide pool of provider API keys
///
/// Discovery runs lazily on first use and the result is immutable
/// afterwards. An empty pool is a configuration error surfaced to every
/// dependent operation, never an empty success.
#[derive(Debug)]
pub struct KeyPool {
    keys: OnceLock<Vec<ApiKey>>,
}

impl KeyPool {
    /// Pool that discovers keys from the environment on first use
    pub fn new() -> Self {
        Self {
            keys: OnceLock::new(),
        }
    }

    /// Pool with a fixed, pre-discovered key list
    pub fn from_keys(keys: Vec<ApiKey>) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(keys);
        Self { keys: cell }
    }

    /// The ordered key list, memoized after the first successful load
    pub fn keys(&self) -> Result<&[ApiKey], ProviderError> {
        let keys = self.keys.get_or_init(discover_from_env);
        if keys.is_empty() {
            return Err(ProviderError::NoKeysConfigured);
        }
        Ok(keys)
    }
}

impl Default for KeyPool {
    fn default() -> Self {
        Self::new()
    }
}

fn discover_from_env() -> Vec<ApiKey> {
    let keys: Vec<ApiKey> = KEY_ENV_VARS
        .iter()
        .filter_map(|name| env::var(name).ok())
        .filter(|value| !value.trim().is_empty())
        .map(ApiKey::new)
        .collect();

    if keys.is_empty() {
        tracing::error!(
            "No provider API keys found. Set GROQ_API_KEY or GROQ_API_KEY_ALT_* in the environment."
        );
    } else {
        tracing::info!("Discovered {} provider API key(s)", keys.len());
    }

    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masked_returns_last_six_chars() {
        let key = ApiKey::new("gsk_abcdef123456");
        assert_eq!(key.masked(), "123456");
    }

    #[test]
    fn masked_handles_short_keys() {
        let key = ApiKey::new("abc");
        assert_eq!(key.masked(), "abc");
    }

    #[test]
    fn debug_output_is_masked() {
        let key = ApiKey::new("gsk_supersecretvalue");
        let debug = format!("{key:?}");
        assert!(!debug.contains("supersecret"));
        assert!(debug.contains("tvalue"));
    }

    #[test]
    fn from_keys_preserves_order() {
        let pool = KeyPool::from_keys(vec![ApiKey::new("first-key"), ApiKey::new("second-key")]);
        let keys = pool.keys().unwrap();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].expose(), "first-key");
        assert_eq!(keys[1].expose(), "second-key");
    }

    #[test]
    fn empty_pool_is_a_configuration_error() {
        let pool = KeyPool::from_keys(Vec::new());
        let err = pool.keys().unwrap_err();
        assert!(matches!(err, ProviderError::NoKeysConfigured));
    }

    #[test]
    fn env_discovery_keeps_declared_order_and_skips_gaps() {
        // Serialized with other env-touching tests by virtue of being the
        // only test in this binary that touches GROQ_* variables.
        unsafe {
            env::set_var("GROQ_API_KEY", "gsk_primary_111111");
            env::remove_var("GROQ_API_KEY_ALT_1");
            env::set_var("GROQ_API_KEY_ALT_2", "gsk_backup_222222");
            env::remove_var("GROQ_API_KEY_ALT_3");
            env::remove_var("GROQ_API_KEY_ALT_4");
        }

        let pool = KeyPool::new();
        let keys = pool.keys().unwrap();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].masked(), "111111");
        assert_eq!(keys[1].masked(), "222222");

        unsafe {
            env::remove_var("GROQ_API_KEY");
            env::remove_var("GROQ_API_KEY_ALT_2");
        }
    }
}
