//! Sequential API-key failover
//!
//! Tries an operation with each key in pool order until one succeeds.
//! Attempts are strictly sequential; a parallel fan-out would burn
//! provider quota and break first-success-wins ordering. There is no
//! same-key retry and no delay between attempts: one pass through the
//! pool per logical request.

use std::future::Future;

use tracing::{info, warn};

use super::ProviderError;
use crate::keys::{ApiKey, KeyPool};

/// Run `op` with each key in pool order, returning the first success.
///
/// Per-key failures are logged (masked key suffix only) and swallowed;
/// if every key fails the caller gets [`ProviderError::AllKeysExhausted`]
/// with the attempt count. Re-entrant: concurrent calls each walk the
/// pool independently.
pub async fn with_failover<T, F, Fut>(
    pool: &KeyPool,
    label: &str,
    op: F,
) -> Result<T, ProviderError>
where
    F: Fn(ApiKey) -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let keys = pool.keys()?;

    let mut attempts = 0;
    for key in keys {
        attempts += 1;
        match op(key.clone()).await {
            Ok(value) => {
                info!("{label} succeeded with key ending {}", key.masked());
                return Ok(value);
            }
            Err(e) => {
                warn!("{label} failed for key ending {}: {e}", key.masked());
            }
        }
    }

    Err(ProviderError::AllKeysExhausted { attempts })
}
