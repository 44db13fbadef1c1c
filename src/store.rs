use std::sync::Arc;

use dashmap::DashMap;

/// An in-memory string key-value store safe for concurrent use.
///
/// Entries live in a sharded map, so operations on keys in different
/// shards never contend. Every operation on a single key is linearizable.
///
/// Cloning is cheap: all clones share the same entries.
#[derive(Clone, Debug, Default)]
pub struct Store {
    entries: Arc<DashMap<String, String>>,
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of a key, overwriting any previous value.
    pub fn put(&self, key: String, value: String) {
        self.entries.insert(key, value);
    }

    /// Gets the current value of a key, or `None` if it is absent.
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// Removes a key. Removing an absent key does nothing.
    pub fn delete(&self, key: &str) {
        self.entries.remove(key);
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_last_put() {
        let store = Store::new();
        store.put("a".to_owned(), "1".to_owned());
        assert_eq!(store.get("a"), Some("1".to_owned()));

        store.put("a".to_owned(), "2".to_owned());
        assert_eq!(store.get("a"), Some("2".to_owned()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn get_missing_key() {
        let store = Store::new();
        assert_eq!(store.get("nope"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn delete_is_idempotent() {
        let store = Store::new();
        store.put("a".to_owned(), "1".to_owned());
        store.put("b".to_owned(), "2".to_owned());

        store.delete("a");
        assert_eq!(store.get("a"), None);
        assert_eq!(store.len(), 1);

        store.delete("a");
        assert_eq!(store.get("a"), None);
        assert_eq!(store.get("b"), Some("2".to_owned()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn clones_share_entries() {
        let store = Store::new();
        let other = store.clone();
        other.put("k".to_owned(), "v".to_owned());
        assert_eq!(store.get("k"), Some("v".to_owned()));
    }

    #[test]
    fn concurrent_puts_on_distinct_keys() {
        let store = Store::new();

        crossbeam_utils::thread::scope(|s| {
            for t in 0..8 {
                let store = store.clone();
                s.spawn(move |_| {
                    for i in 0..250 {
                        store.put(format!("key-{t}-{i}"), format!("value-{t}-{i}"));
                    }
                });
            }
        })
        .unwrap();

        assert_eq!(store.len(), 8 * 250);
        for t in 0..8 {
            for i in 0..250 {
                assert_eq!(
                    store.get(&format!("key-{t}-{i}")),
                    Some(format!("value-{t}-{i}"))
                );
            }
        }
    }
}
