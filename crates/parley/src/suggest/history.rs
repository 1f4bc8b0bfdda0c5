//! Bounded window of recently suggested reply batches
//!
//! The store holds the last five validated batches, oldest first. It is
//! the only shared mutable state in the service; all access goes through
//! a mutex held only for the in-memory copy or mutation, never across a
//! network call.

use std::collections::VecDeque;
use std::sync::Mutex;

use serde::Serialize;

/// Number of reply options in every batch
pub const OPTION_COUNT: usize = 4;

/// Number of batches the history window retains
const MAX_BATCHES: usize = 5;

/// A validated set of exactly four reply options
///
/// The fixed-size array carries the length invariant; a batch can never
/// be partially populated. Serializes as a JSON array of four strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionBatch([String; OPTION_COUNT]);

impl OptionBatch {
    pub fn new(options: [String; OPTION_COUNT]) -> Self {
        Self(options)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// Bounded FIFO of suggestion batches, capacity five, oldest first
#[derive(Debug)]
pub struct HistoryStore {
    batches: Mutex<VecDeque<OptionBatch>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self {
            batches: Mutex::new(VecDeque::with_capacity(MAX_BATCHES)),
        }
    }

    /// Owned copy of the window, oldest first.
    ///
    /// Callers get an independent snapshot; mutating it cannot touch the
    /// store's internal state.
    pub fn snapshot(&self) -> Vec<OptionBatch> {
        let batches = self.batches.lock().unwrap_or_else(|e| e.into_inner());
        batches.iter().cloned().collect()
    }

    /// Insert a batch as the newest entry, evicting the oldest when full.
    pub fn append(&self, batch: OptionBatch) {
        let mut batches = self.batches.lock().unwrap_or_else(|e| e.into_inner());
        if batches.len() == MAX_BATCHES {
            batches.pop_front();
        }
        batches.push_back(batch);
    }

    pub fn len(&self) -> usize {
        self.batches.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn batch(tag: usize) -> OptionBatch {
        OptionBatch::new([
            format!("Option A: reply {tag}"),
            format!("Option B: reply {tag}"),
            format!("Option C: reply {tag}"),
            format!("Option D: reply {tag}"),
        ])
    }

    #[test]
    fn new_store_is_empty() {
        let store = HistoryStore::new();
        assert!(store.is_empty());
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn snapshot_returns_batches_oldest_first() {
        let store = HistoryStore::new();
        store.append(batch(1));
        store.append(batch(2));
        store.append(batch(3));

        let snapshot = store.snapshot();
        assert_eq!(snapshot, vec![batch(1), batch(2), batch(3)]);
    }

    #[test]
    fn six_appends_keep_only_the_last_five() {
        let store = HistoryStore::new();
        for tag in 1..=6 {
            store.append(batch(tag));
        }

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 5);
        assert_eq!(
            snapshot,
            vec![batch(2), batch(3), batch(4), batch(5), batch(6)]
        );
        assert!(!snapshot.contains(&batch(1)));
    }

    #[test]
    fn snapshot_is_independent_of_the_store() {
        let store = HistoryStore::new();
        store.append(batch(1));

        let mut snapshot = store.snapshot();
        snapshot.push(batch(99));

        assert_eq!(store.len(), 1);
        assert_eq!(store.snapshot(), vec![batch(1)]);
    }

    #[test]
    fn concurrent_appends_never_corrupt_the_store() {
        let store = Arc::new(HistoryStore::new());
        let threads = 12;

        let handles: Vec<_> = (0..threads)
            .map(|tag| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.append(batch(tag)))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 5.min(threads));
        for stored in &snapshot {
            // Every stored batch is one of the appended ones, intact.
            let tag: usize = stored.as_slice()[0]
                .trim_start_matches("Option A: reply ")
                .parse()
                .unwrap();
            assert_eq!(stored, &batch(tag));
        }
    }

    #[test]
    fn option_batch_serializes_as_a_json_array() {
        let json = serde_json::to_value(batch(7)).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                "Option A: reply 7",
                "Option B: reply 7",
                "Option C: reply 7",
                "Option D: reply 7"
            ])
        );
    }
}
