use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

/// Identity-keyed memoized store for derived objects.
///
/// A cache is an explicit scope with an explicit lifetime; the glTF importer
/// owns one per import so repeated imports do not cross-contaminate. The
/// cache never disposes what it stores; a staleness predicate may dispose the
/// old value before it is overwritten.
pub struct ResourceCache<K, V> {
    entries: HashMap<K, V>,
}

impl<K: Eq + Hash, V> ResourceCache<K, V> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Returns the entry for `key`, producing it on a miss.
    pub fn get_or_create(&mut self, key: K, produce: impl FnOnce() -> V) -> &V {
        self.get_or_create_with(key, produce, |_| false)
    }

    /// Returns the entry for `key`. `produce` runs when there is no entry or
    /// when `is_stale` reports the existing one stale; otherwise the stored
    /// value is returned unchanged.
    pub fn get_or_create_with(
        &mut self,
        key: K,
        produce: impl FnOnce() -> V,
        is_stale: impl FnOnce(&V) -> bool,
    ) -> &V {
        match self.entries.entry(key) {
            Entry::Occupied(mut entry) => {
                if is_stale(entry.get()) {
                    *entry.get_mut() = produce();
                }
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(produce()),
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Eq + Hash, V> Default for ResourceCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn repeated_get_returns_identical_value() {
        let mut cache = ResourceCache::new();

        let first = Arc::clone(cache.get_or_create("key", || Arc::new(42)));
        let second = Arc::clone(cache.get_or_create("key", || Arc::new(99)));

        // Identity, not just equality.
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*second, 42);
    }

    #[test]
    fn always_stale_regenerates_every_call() {
        let mut cache = ResourceCache::new();
        let mut produced = 0;

        for _ in 0..3 {
            cache.get_or_create_with(
                "key",
                || {
                    produced += 1;
                    produced
                },
                |_| true,
            );
        }

        assert_eq!(produced, 3);
        assert_eq!(cache.get(&"key"), Some(&3));
    }

    #[test]
    fn fresh_entry_skips_production() {
        let mut cache = ResourceCache::new();
        cache.get_or_create("key", || 1);

        let value = *cache.get_or_create_with("key", || unreachable!(), |_| false);
        assert_eq!(value, 1);
    }
}
