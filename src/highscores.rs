//! High score tracking
//!
//! One best score per game, read from the injected store at startup and
//! written back whenever a finished run beats it.

use crate::persistence::ScoreStore;

pub struct HighScore {
    key: String,
    best: u64,
    store: Box<dyn ScoreStore>,
}

impl std::fmt::Debug for HighScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighScore")
            .field("key", &self.key)
            .field("best", &self.best)
            .finish()
    }
}

impl HighScore {
    /// Load the stored best for `key`
    pub fn load(key: impl Into<String>, store: Box<dyn ScoreStore>) -> Self {
        let key = key.into();
        let best = store.get(&key);
        log::info!("Loaded high score {} for {}", best, key);
        Self { key, best, store }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Record a finished run's score. Returns true on a new record.
    /// Never lowers the stored best.
    pub fn submit(&mut self, score: u64) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        self.store.set(&self.key, score);
        log::info!("New high score for {}: {}", self.key, score);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_lower_session_keeps_record() {
        let store = MemoryStore::new();

        let mut first = HighScore::load("breaker-highScore", Box::new(store.clone()));
        assert!(first.submit(150));

        // Next launch reads the persisted value
        let mut second = HighScore::load("breaker-highScore", Box::new(store.clone()));
        assert_eq!(second.best(), 150);
        assert!(!second.submit(90));
        assert_eq!(second.best(), 150);
        assert_eq!(store.get("breaker-highScore"), 150);
    }

    #[test]
    fn test_keys_are_independent() {
        let store = MemoryStore::new();
        let mut slicer = HighScore::load("slicer-highScore", Box::new(store.clone()));
        slicer.submit(300);
        let breaker = HighScore::load("breaker-highScore", Box::new(store));
        assert_eq!(breaker.best(), 0);
    }

    #[test]
    fn test_zero_and_ties_are_not_records() {
        let mut hs = HighScore::load("k", Box::new(MemoryStore::new()));
        assert!(!hs.submit(0));
        assert!(hs.submit(10));
        assert!(!hs.submit(10));
    }
}
