use std::any::Any;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::trie::Trie;
use crate::value::{Change, StateValue, SubscriptionId};

/// Callback type for state change notifications.
pub type ChangeHandler = Arc<dyn Fn(&str, &Change) + Send + Sync>;

/// Path-addressed state store with wildcard subscriptions.
///
/// This is what the rendering shell observes: hooks, the session and the
/// router write here; the shell subscribes to the paths it draws.
///
/// Handlers run synchronously on the writing thread, after the value
/// lock is released, so a handler may read the store.
pub struct StateStore {
    values: RwLock<BTreeMap<String, StateValue>>,
    handlers: Trie<Subscriber>,
    next_id: AtomicU64,
}

#[derive(Clone)]
struct Subscriber {
    id: SubscriptionId,
    handler: ChangeHandler,
}

impl StateStore {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(BTreeMap::new()),
            handlers: Trie::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Store a typed value at `path` and notify matching subscribers.
    pub fn set<T: Any + Send + Sync>(&self, path: &str, value: T) {
        self.set_value(path, StateValue::new(value));
    }

    /// Store a pre-built value at `path` and notify matching subscribers.
    pub fn set_value(&self, path: &str, value: StateValue) {
        self.values
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(path.to_string(), value.clone());
        self.notify(path, &Change::Set(value));
    }

    pub fn get(&self, path: &str) -> Option<StateValue> {
        self.values
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(path)
            .cloned()
    }

    /// Read and clone the value at `path` as `T`.
    ///
    /// Returns `None` when the path is empty or holds another type.
    pub fn read<T: Any + Clone>(&self, path: &str) -> Option<T> {
        self.get(path).and_then(|v| v.downcast_ref::<T>().cloned())
    }

    /// Remove the value at `path`, notifying subscribers if it existed.
    pub fn remove(&self, path: &str) -> Option<StateValue> {
        let old = self
            .values
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(path);
        if old.is_some() {
            self.notify(path, &Change::Removed);
        }
        old
    }

    /// Entries strictly below `prefix` (`prefix/…`), ordered by path.
    pub fn scan(&self, prefix: &str) -> Vec<(String, StateValue)> {
        let start = format!("{}/", prefix.trim_end_matches('/'));
        self.values
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .range(start.clone()..)
            .take_while(|(k, _)| k.starts_with(&start))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.values
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.values.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Subscribe to changes under a wildcard pattern.
    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &Change) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers.insert(
            pattern,
            Subscriber {
                id,
                handler: Arc::new(handler),
            },
        );
        id
    }

    /// Remove a subscription. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, pattern: &str, id: SubscriptionId) -> bool {
        self.handlers.remove(pattern, |s| s.id == id)
    }

    fn notify(&self, path: &str, change: &Change) {
        for sub in self.handlers.match_topic(path) {
            (sub.handler)(path, change);
        }
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}
