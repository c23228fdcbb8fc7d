//! Score persistence
//!
//! A tiny key-value interface for integer scores, injected wherever a score
//! needs to survive the session:
//! - `MemoryStore`: in-process map (native, tests)
//! - `LocalStorageStore`: browser LocalStorage (wasm32 only)
//!
//! Writes are fire-and-forget. A failed write is logged and otherwise ignored.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Integer key-value store
pub trait ScoreStore {
    /// Stored value, 0 when missing or unreadable
    fn get(&self, key: &str) -> u64;
    fn set(&mut self, key: &str, value: u64);
}

/// In-memory store. Clones share the same map, like two tabs sharing
/// LocalStorage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Rc<RefCell<HashMap<String, u64>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> u64 {
        self.values.borrow().get(key).copied().unwrap_or(0)
    }

    fn set(&mut self, key: &str, value: u64) {
        self.values.borrow_mut().insert(key.to_string(), value);
    }
}

/// Browser LocalStorage; values are stored as decimal strings
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageStore {
    fn get(&self, key: &str) -> u64 {
        Self::storage()
            .and_then(|s| s.get_item(key).ok().flatten())
            .and_then(|v| parse_score(&v))
            .unwrap_or(0)
    }

    fn set(&mut self, key: &str, value: u64) {
        match Self::storage() {
            Some(storage) => {
                if storage.set_item(key, &value.to_string()).is_err() {
                    log::warn!("Could not save {} to LocalStorage", key);
                }
            }
            None => log::warn!("LocalStorage unavailable, {} not saved", key),
        }
    }
}

/// Lenient parse of a stored score (`"150"`, `" 150 "`); garbage reads as None
pub fn parse_score(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_reads_zero() {
        let store = MemoryStore::new();
        assert_eq!(store.get("slicer-highScore"), 0);
    }

    #[test]
    fn test_clones_share_values() {
        let mut a = MemoryStore::new();
        let b = a.clone();
        a.set("k", 42);
        assert_eq!(b.get("k"), 42);
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("150"), Some(150));
        assert_eq!(parse_score(" 7\n"), Some(7));
        assert_eq!(parse_score("NaN"), None);
        assert_eq!(parse_score("-3"), None);
    }
}
