//! Token holder cache
//!
//! In-memory set of addresses observed as address-typed values inside
//! decoded logs. Conversions for the same contract run concurrently, so the
//! set sits behind a lock and is only ever appended to. Clearing it is an
//! explicit reconfiguration step.

use parking_lot::RwLock;
use std::collections::HashSet;

/// Concurrent, insert-only set of token holder addresses.
#[derive(Debug, Default)]
pub struct TokenHolderCache {
    holders: RwLock<HashSet<String>>,
}

impl TokenHolderCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an address. Returns true if it was not cached before.
    pub fn insert(&self, address: &str) -> bool {
        if self.holders.read().contains(address) {
            return false;
        }
        self.holders.write().insert(address.to_string())
    }

    /// Check if an address is cached.
    pub fn contains(&self, address: &str) -> bool {
        self.holders.read().contains(address)
    }

    /// Number of cached addresses.
    pub fn len(&self) -> usize {
        self.holders.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.holders.read().is_empty()
    }

    /// Sorted copy of the cached addresses.
    pub fn snapshot(&self) -> Vec<String> {
        let mut holders: Vec<String> = self.holders.read().iter().cloned().collect();
        holders.sort();
        holders
    }

    /// Drop every cached address.
    pub fn clear(&self) {
        self.holders.write().clear();
    }
}

impl Clone for TokenHolderCache {
    fn clone(&self) -> Self {
        Self {
            holders: RwLock::new(self.holders.read().clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_cache_operations() {
        let cache = TokenHolderCache::new();
        assert!(cache.is_empty());

        assert!(cache.insert("0xB"));
        assert!(cache.insert("0xA"));
        // Second insert is a no-op
        assert!(!cache.insert("0xA"));

        assert!(cache.contains("0xA"));
        assert!(!cache.contains("0xC"));
        assert_eq!(cache.snapshot(), vec!["0xA".to_string(), "0xB".to_string()]);

        cache.clear();
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_concurrent_inserts_converge() {
        let cache = Arc::new(TokenHolderCache::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..100 {
                        cache.insert(&format!("holder{}", (t * 100 + i) % 250));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(cache.len(), 250);
    }
}
