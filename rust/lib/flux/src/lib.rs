//! Reactive client state for the BNPL admin dashboard.
//!
//! Rust owns every piece of dashboard state; the rendering shell only
//! draws it. State lives in a flat path namespace:
//!
//! - Global: `auth/state`, `app/route`, `ui/toast`
//! - Pages: `page/clients`, `page/clients/search`
//!
//! The shell subscribes with wildcard patterns (`page/+`, `auth/#`, `#`)
//! and re-renders on each [`Change`]. Labels are resolved through the
//! [`I18nStore`], which implements the [`Translator`] collaborator.

pub mod i18n;
pub mod store;
pub mod trie;
pub mod value;

pub use i18n::{Catalog, I18nHandler, I18nStore, KeyTranslator, QueryParams, Translator};
pub use store::{ChangeHandler, StateStore};
pub use value::{Change, StateValue, SubscriptionId};
