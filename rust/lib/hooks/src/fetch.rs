use std::sync::Arc;

use bnpl_core::AdminError;
use tokio::task::JoinHandle;

use crate::hook::{Payload, Shared};
use crate::state::FetchState;

/// Immediate fetch hook.
///
/// Fires on mount when `auto` is set, and whenever [`fetch_data`],
/// [`trigger`] or a changed watch list asks for it. Overlapping requests
/// are not deduplicated; the most recently started one owns the state.
/// Dropping the hook unmounts it.
///
/// [`fetch_data`]: FetchHook::fetch_data
/// [`trigger`]: FetchHook::trigger
pub struct FetchHook<T: Payload> {
    shared: Arc<Shared<T>>,
}

impl<T: Payload> FetchHook<T> {
    pub(crate) fn from_shared(shared: Arc<Shared<T>>) -> Self {
        let hook = Self { shared };
        if hook.shared.options.auto {
            hook.trigger(None);
        }
        hook
    }

    pub fn state(&self) -> FetchState<T> {
        self.shared.snapshot()
    }

    pub fn data(&self) -> Option<T> {
        self.state().data
    }

    pub fn loading(&self) -> bool {
        self.state().loading
    }

    pub fn error(&self) -> Option<AdminError> {
        self.state().error
    }

    /// Fetch now and wait for the outcome to be applied.
    ///
    /// `target` overrides the mounted target for this call only.
    pub async fn fetch_data(&self, target: Option<&str>) {
        let target = self.shared.resolve_target(target);
        if let Some(token) = self.shared.begin() {
            self.shared.run(target, token).await;
        }
    }

    /// Re-fetch the mounted target.
    pub async fn refetch(&self) {
        self.fetch_data(None).await;
    }

    /// Fire-and-forget variant of [`fetch_data`](Self::fetch_data).
    ///
    /// `loading` is already set when this returns.
    pub fn trigger(&self, target: Option<&str>) -> JoinHandle<()> {
        let target = self.shared.resolve_target(target);
        let shared = Arc::clone(&self.shared);
        let token = shared.begin();
        tokio::spawn(async move {
            if let Some(token) = token {
                shared.run(target, token).await;
            }
        })
    }

    /// Update the watched values; re-fetches if they changed.
    pub fn set_watch(&self, values: Vec<String>) -> Option<JoinHandle<()>> {
        if self.shared.swap_watch(values) {
            Some(self.trigger(None))
        } else {
            None
        }
    }

    /// Stop applying responses. Requests already sent still complete
    /// on the wire but no longer touch state or notify.
    pub fn unmount(&self) {
        self.shared.unmount();
    }

    pub fn is_mounted(&self) -> bool {
        self.shared.is_mounted()
    }
}

impl<T: Payload> Drop for FetchHook<T> {
    fn drop(&mut self) {
        self.shared.unmount();
    }
}
