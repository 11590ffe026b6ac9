//! Data-fetching state holders for dashboard pages.
//!
//! A hook wraps one API target and exposes `{data, loading, error}` plus a
//! manual `fetch_data` trigger. Two variants share that contract:
//!
//! - [`FetchHook`] fires immediately (on mount when `auto`, or on demand)
//! - [`DebouncedFetch`] coalesces bursts of triggers (search boxes) and
//!   fires once after a quiet period
//!
//! Failures never escape: they are stored in [`FetchState::error`] and
//! reported once through the [`Notifier`]. Each started request carries a
//! generation token; only the newest request may write state, and nothing
//! writes after [`FetchHook::unmount`].
//!
//! Hooks spawn onto the ambient Tokio runtime, so mounting must happen
//! inside one.

mod debounce;
mod fetch;
mod hook;
mod notify;
mod options;
mod state;

#[cfg(test)]
mod testing;

pub use debounce::{DebouncePhase, DebouncedFetch};
pub use fetch::FetchHook;
pub use hook::{HookBuilder, Payload};
pub use notify::{Notifier, Toast, ToastNotifier, TracingNotifier, TOAST_PATH};
pub use options::FetchOptions;
pub use state::FetchState;
