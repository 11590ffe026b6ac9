use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use bnpl_flux::StateStore;

/// The notification collaborator: show a transient error to staff.
///
/// Fire-and-forget; implementations must not block.
pub trait Notifier: Send + Sync + 'static {
    fn error(&self, message: &str);
}

/// Logs instead of showing anything. Used by the CLI.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        tracing::warn!("{}", message);
    }
}

/// Where [`ToastNotifier`] publishes.
pub const TOAST_PATH: &str = "ui/toast";

/// A transient message for the shell to render and dismiss.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    /// Increments per toast so identical messages still re-render.
    pub seq: u64,
    pub message: String,
}

/// Publishes each error as a [`Toast`] at `ui/toast`.
pub struct ToastNotifier {
    store: Arc<StateStore>,
    seq: AtomicU64,
}

impl ToastNotifier {
    pub fn new(store: Arc<StateStore>) -> Self {
        Self {
            store,
            seq: AtomicU64::new(0),
        }
    }
}

impl Notifier for ToastNotifier {
    fn error(&self, message: &str) {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed) + 1;
        self.store.set(
            TOAST_PATH,
            Toast {
                seq,
                message: message.to_string(),
            },
        );
    }
}
