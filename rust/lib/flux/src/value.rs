use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// A type-erased, reference-counted state value.
///
/// Cloning is an atomic increment; every reader of a path shares the
/// same allocation.
#[derive(Clone)]
pub struct StateValue {
    inner: Arc<dyn Any + Send + Sync>,
}

impl StateValue {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }

    /// Borrow the value as `T`, or `None` if it holds another type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    pub fn type_id(&self) -> TypeId {
        (*self.inner).type_id()
    }

    /// Whether two handles point at the same allocation.
    pub fn ptr_eq(&self, other: &StateValue) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateValue")
            .field("type_id", &(*self.inner).type_id())
            .finish()
    }
}

/// What happened at a path, as delivered to subscribers.
#[derive(Debug, Clone)]
pub enum Change {
    /// A new value was stored.
    Set(StateValue),
    /// The value was removed.
    Removed,
}

impl Change {
    /// The new value, if this change stored one.
    pub fn value(&self) -> Option<&StateValue> {
        match self {
            Change::Set(v) => Some(v),
            Change::Removed => None,
        }
    }
}

/// Handle returned by `StateStore::subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);
