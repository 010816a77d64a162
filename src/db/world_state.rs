use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

use tokio::sync::RwLock;

/// Ordered key/value store with ledger-style range queries.
///
/// Keys are compared as raw strings, so `"10"` sorts before `"9"`. Cloning the
/// handle shares the underlying map.
#[derive(Debug)]
pub(crate) struct WorldState<T> {
    entries: Arc<RwLock<BTreeMap<String, T>>>,
}

impl<T> Clone for WorldState<T> {
    fn clone(&self) -> Self {
        Self { entries: Arc::clone(&self.entries) }
    }
}

impl<T> Default for WorldState<T> {
    fn default() -> Self {
        Self { entries: Arc::new(RwLock::new(BTreeMap::new())) }
    }
}

impl<T: Clone> WorldState<T> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn get_state(&self, key: &str) -> Option<T> {
        self.entries.read().await.get(key).cloned()
    }

    /// Stores `value` under `key`, returning the record it replaced.
    pub(crate) async fn put_state(&self, key: impl Into<String>, value: T) -> Option<T> {
        self.entries.write().await.insert(key.into(), value)
    }

    /// Entries with `start <= key < end`. An inverted range is empty.
    pub(crate) async fn range(&self, start: &str, end: &str) -> Vec<(String, T)> {
        if start >= end {
            return Vec::new();
        }

        self.entries
            .read()
            .await
            .range::<str, _>((Bound::Included(start), Bound::Excluded(end)))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    pub(crate) async fn scan(&self) -> Vec<(String, T)> {
        self.entries.read().await.iter().map(|(key, value)| (key.clone(), value.clone())).collect()
    }

    pub(crate) async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Allocates the next numeric key and stores the record built for it.
    ///
    /// Returns `None` without writing when any existing record matches
    /// `conflicts`. The check and the insert share one write guard.
    pub(crate) async fn try_insert_next(
        &self,
        conflicts: impl Fn(&T) -> bool,
        build: impl FnOnce(&str) -> T,
    ) -> Option<(String, T)> {
        let mut entries = self.entries.write().await;
        if entries.values().any(conflicts) {
            return None;
        }

        let key = next_key(&entries).to_string();
        let value = build(&key);
        entries.insert(key.clone(), value.clone());
        Some((key, value))
    }

    pub(crate) async fn insert_next(&self, build: impl FnOnce(&str) -> T) -> (String, T) {
        let mut entries = self.entries.write().await;
        let key = next_key(&entries).to_string();
        let value = build(&key);
        entries.insert(key.clone(), value.clone());
        (key, value)
    }
}

fn next_key<T>(entries: &BTreeMap<String, T>) -> u64 {
    entries.keys().filter_map(|key| key.parse::<u64>().ok()).max().unwrap_or(0) + 1
}
