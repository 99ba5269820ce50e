//! A bounded, thread-safe cache with single-flight production.
//!
//! [`Cache`] is meant for values that are costly to build and cheap to share,
//! such as parsed [`Template`](crate::template::Template)s. It holds at most
//! `capacity` entries and evicts the least recently used key when full.
//!
//! Every entry is a slot that is filled at most once. Concurrent
//! [`fetch`](Cache::fetch) calls for the same absent key share one slot: exactly
//! one producer runs and every caller sees its value. The lock guarding the
//! map is never held while a producer runs.
//!
//! ## Examples
//!
//! ```rust
//! use serde_capture::template::Template;
//! use serde_capture::Cache;
//!
//! let cache: Cache<String, Template> = Cache::new(128).unwrap();
//! let text = "User {Name} signed in";
//! let template = cache.fetch(text.to_string(), || Template::parse(text));
//! assert_eq!(template.holes().count(), 1);
//! assert!(cache.contains(&text.to_string()));
//! ```

use crate::{Error, Result};
use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

struct Entries<K, V> {
    slots: HashMap<K, Arc<OnceLock<V>>>,
    /// Keys from least to most recently used.
    order: VecDeque<K>,
}

impl<K: Eq + Hash + Clone, V> Entries<K, V> {
    fn touch(&mut self, key: &K) {
        if let Some(at) = self.order.iter().position(|k| k == key) {
            if let Some(k) = self.order.remove(at) {
                self.order.push_back(k);
            }
        }
    }

    fn make_room(&mut self, capacity: usize) {
        while self.slots.len() >= capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.slots.remove(&oldest);
                }
                None => break,
            }
        }
    }
}

/// A capacity-bounded map with compute-once slots.
pub struct Cache<K, V> {
    capacity: usize,
    entries: Mutex<Entries<K, V>>,
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates an empty cache.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCapacity`] when `capacity` is 0.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity { capacity });
        }
        Ok(Cache {
            capacity,
            entries: Mutex::new(Entries {
                slots: HashMap::with_capacity(capacity),
                order: VecDeque::with_capacity(capacity),
            }),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Entries<K, V>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns the value for `key`, running `producer` if it is absent.
    ///
    /// The producer runs at most once per slot, even under contention.
    pub fn fetch<F>(&self, key: K, producer: F) -> V
    where
        F: FnOnce() -> V,
    {
        let slot = {
            let mut entries = self.lock();
            match entries.slots.get(&key).cloned() {
                Some(slot) => {
                    entries.touch(&key);
                    slot
                }
                None => {
                    entries.make_room(self.capacity);
                    let slot = Arc::new(OnceLock::new());
                    entries.slots.insert(key.clone(), Arc::clone(&slot));
                    entries.order.push_back(key);
                    slot
                }
            }
        };
        slot.get_or_init(producer).clone()
    }

    /// Stores a ready value, replacing any previous one.
    pub fn insert(&self, key: K, value: V) {
        let slot = Arc::new(OnceLock::from(value));
        let mut entries = self.lock();
        if entries.slots.contains_key(&key) {
            entries.slots.insert(key.clone(), slot);
            entries.touch(&key);
        } else {
            entries.make_room(self.capacity);
            entries.slots.insert(key.clone(), slot);
            entries.order.push_back(key);
        }
    }

    /// Returns the value for `key` if it has been produced.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut entries = self.lock();
        let value = entries.slots.get(key)?.get().cloned();
        if value.is_some() {
            entries.touch(key);
        }
        value
    }

    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.lock().slots.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&self) {
        let mut entries = self.lock();
        entries.slots.clear();
        entries.order.clear();
    }
}

impl<K, V> std::fmt::Debug for Cache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}
