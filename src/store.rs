use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{Error, Result};

/// Point-in-time copy of the store contents
pub type Entries = HashMap<String, String>;

/// In-memory key-value store
pub struct Store {
    data: RwLock<Entries>,
}

impl Store {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Get the value for a key
    pub fn get(&self, key: &str) -> Result<String> {
        let data = self.data.read().map_err(|_| poisoned())?;
        data.get(key).cloned().ok_or_else(|| Error::key_not_found(key))
    }

    /// Set a key to the given value, overwriting any previous value
    pub fn put(&self, key: String, value: String) -> Result<()> {
        let mut data = self.data.write().map_err(|_| poisoned())?;
        data.insert(key, value);
        Ok(())
    }

    /// Remove a key, returning the value it held
    pub fn delete(&self, key: &str) -> Result<String> {
        let mut data = self.data.write().map_err(|_| poisoned())?;
        data.remove(key).ok_or_else(|| Error::key_not_found(key))
    }

    /// Remove every entry, returning the contents as they were before clearing
    pub fn clear(&self) -> Result<Entries> {
        let mut data = self.data.write().map_err(|_| poisoned())?;
        Ok(std::mem::take(&mut *data))
    }

    /// Copy of all current entries
    pub fn snapshot(&self) -> Result<Entries> {
        let data = self.data.read().map_err(|_| poisoned())?;
        Ok(data.clone())
    }

    /// Number of entries currently held
    pub fn len(&self) -> Result<usize> {
        let data = self.data.read().map_err(|_| poisoned())?;
        Ok(data.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        let data = self.data.read().map_err(|_| poisoned())?;
        Ok(data.is_empty())
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> Error {
    Error::Internal("Lock poisoned".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_put_and_get() {
        let store = Store::new();
        assert!(store.is_empty().unwrap());
        store.put("color".to_string(), "red".to_string()).unwrap();
        assert_eq!(store.get("color").unwrap(), "red");
        assert!(!store.is_empty().unwrap());
    }

    #[test]
    fn test_put_overwrites() {
        let store = Store::new();
        store.put("color".to_string(), "red".to_string()).unwrap();
        store.put("color".to_string(), "blue".to_string()).unwrap();
        assert_eq!(store.get("color").unwrap(), "blue");
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_get_missing() {
        let store = Store::new();
        assert_eq!(
            store.get("nope"),
            Err(Error::KeyNotFound("Key nope not found".to_string()))
        );
    }

    #[test]
    fn test_delete_removes() {
        let store = Store::new();
        store.put("color".to_string(), "red".to_string()).unwrap();
        assert_eq!(store.delete("color").unwrap(), "red");
        assert!(matches!(store.get("color"), Err(Error::KeyNotFound(_))));
    }

    #[test]
    fn test_delete_missing_leaves_store_untouched() {
        let store = Store::new();
        store.put("a".to_string(), "1".to_string()).unwrap();
        assert!(matches!(store.delete("b"), Err(Error::KeyNotFound(_))));
        assert_eq!(store.snapshot().unwrap().len(), 1);
        assert_eq!(store.get("a").unwrap(), "1");
    }

    #[test]
    fn test_clear_returns_previous_contents() {
        let store = Store::new();
        store.put("a".to_string(), "1".to_string()).unwrap();
        store.put("b".to_string(), "2".to_string()).unwrap();

        let before = store.clear().unwrap();
        assert_eq!(before.len(), 2);
        assert_eq!(before["a"], "1");
        assert!(store.is_empty().unwrap());
        assert!(store.snapshot().unwrap().is_empty());

        // Clearing an empty store still succeeds
        assert!(store.clear().unwrap().is_empty());
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let store = Store::new();
        store.put("a".to_string(), "1".to_string()).unwrap();
        let snapshot = store.snapshot().unwrap();

        store.put("a".to_string(), "2".to_string()).unwrap();
        store.put("b".to_string(), "3".to_string()).unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot["a"], "1");
    }

    #[test]
    fn test_concurrent_writers_and_readers() {
        let store = Arc::new(Store::new());
        let n = 64;

        let writers: Vec<_> = (0..n)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    store.put(format!("key{}", i), format!("value{}", i)).unwrap();
                })
            })
            .collect();
        for w in writers {
            w.join().unwrap();
        }

        let readers: Vec<_> = (0..n)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.get(&format!("key{}", i)).unwrap())
            })
            .collect();
        for (i, r) in readers.into_iter().enumerate() {
            assert_eq!(r.join().unwrap(), format!("value{}", i));
        }
        assert_eq!(store.len().unwrap(), n);
    }
}
