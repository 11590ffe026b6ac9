//! Translation routing for UI labels.
//!
//! Keys are paths (`nav/clients`, `toast/fetch_failed?resource=orders`).
//! Handlers are registered per pattern with the same wildcard rules as
//! state subscriptions. The most recently registered matching handler
//! answers first; a catalog without the key defers to older handlers, so
//! a site catalog loaded later overrides only the keys it defines.
//! Unmatched keys come back verbatim so a missing translation is visible,
//! not blank.
//!
//! ```ignore
//! let i18n = I18nStore::new("en");
//! i18n.handle("nav/#", Arc::new(Catalog::from_toml(NAV_TOML)?));
//! assert_eq!(i18n.translate("nav/clients"), "Clients");
//! i18n.set_locale("uz");
//! assert_eq!(i18n.translate("nav/clients"), "Mijozlar");
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use serde::Deserialize;

use crate::trie::Trie;

// ── Translator ──

/// The localization collaborator: resolve a key to display text.
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str) -> String;
}

/// Returns every key unchanged. Useful where labels are not rendered.
pub struct KeyTranslator;

impl Translator for KeyTranslator {
    fn translate(&self, key: &str) -> String {
        key.to_string()
    }
}

// ── QueryParams ──

/// Parsed `a=1&b=2` suffix of a translation key.
#[derive(Debug, Clone, Default)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn parse(query: &str) -> Self {
        Self(
            query
                .split('&')
                .filter_map(|pair| {
                    let (k, v) = pair.split_once('=')?;
                    (!k.is_empty()).then(|| (k.to_string(), v.to_string()))
                })
                .collect(),
        )
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

// ── I18nHandler ──

/// Answers translation requests for the keys routed to it.
pub trait I18nHandler: Send + Sync + 'static {
    fn translate(&self, path: &str, query: &QueryParams, locale: &str) -> String;

    /// Like [`translate`](Self::translate), but `None` hands the key to the
    /// next matching handler.
    fn lookup(&self, path: &str, query: &QueryParams, locale: &str) -> Option<String> {
        Some(self.translate(path, query, locale))
    }
}

impl<F> I18nHandler for F
where
    F: Fn(&str, &QueryParams, &str) -> String + Send + Sync + 'static,
{
    fn translate(&self, path: &str, query: &QueryParams, locale: &str) -> String {
        (self)(path, query, locale)
    }
}

// ── Catalog ──

/// Table-driven handler: `key -> locale -> text`, with `{name}`
/// placeholders filled from query params.
///
/// TOML layout:
///
/// ```toml
/// default_locale = "en"
///
/// [entries."nav/clients"]
/// en = "Clients"
/// uz = "Mijozlar"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    #[serde(default = "default_locale")]
    default_locale: String,
    #[serde(default)]
    entries: HashMap<String, HashMap<String, String>>,
}

fn default_locale() -> String {
    "en".to_string()
}

impl Catalog {
    pub fn new(default_locale: &str) -> Self {
        Self {
            default_locale: default_locale.to_string(),
            entries: HashMap::new(),
        }
    }

    /// Add one translation; later inserts for the same key/locale win.
    pub fn insert(&mut self, key: &str, locale: &str, text: &str) -> &mut Self {
        self.entries
            .entry(key.to_string())
            .or_default()
            .insert(locale.to_string(), text.to_string());
        self
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn load(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up `key` in `locale`, falling back to the default locale.
    pub fn lookup(&self, key: &str, locale: &str) -> Option<&str> {
        let texts = self.entries.get(key)?;
        texts
            .get(locale)
            .or_else(|| base_language(locale).and_then(|l| texts.get(l)))
            .or_else(|| texts.get(&self.default_locale))
            .map(String::as_str)
    }
}

/// `"uz-Latn"` → `Some("uz")`.
fn base_language(locale: &str) -> Option<&str> {
    locale.split_once('-').map(|(base, _)| base)
}

impl I18nHandler for Catalog {
    fn translate(&self, path: &str, query: &QueryParams, locale: &str) -> String {
        I18nHandler::lookup(self, path, query, locale).unwrap_or_else(|| {
            tracing::debug!(key = path, locale, "missing translation");
            path.to_string()
        })
    }

    fn lookup(&self, path: &str, query: &QueryParams, locale: &str) -> Option<String> {
        let mut out = Catalog::lookup(self, path, locale)?.to_string();
        for (name, value) in query.iter() {
            out = out.replace(&format!("{{{}}}", name), value);
        }
        Some(out)
    }
}

// ── I18nStore ──

/// A handler plus its registration sequence number.
#[derive(Clone)]
struct Route {
    seq: u64,
    handler: Arc<dyn I18nHandler>,
}

/// Locale-aware translation router.
pub struct I18nStore {
    trie: Trie<Route>,
    next_seq: AtomicU64,
    locale: RwLock<String>,
}

impl I18nStore {
    pub fn new(locale: &str) -> Self {
        Self {
            trie: Trie::new(),
            next_seq: AtomicU64::new(0),
            locale: RwLock::new(locale.to_string()),
        }
    }

    /// Route keys matching `pattern` to `handler`. Takes precedence over
    /// every handler registered before it.
    pub fn handle(&self, pattern: &str, handler: Arc<dyn I18nHandler>) {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.trie.insert(pattern, Route { seq, handler });
    }

    /// Translate `"path"` or `"path?k=v&…"` in the current locale.
    pub fn get(&self, url: &str) -> String {
        let (path, query) = url.split_once('?').unwrap_or((url, ""));
        let params = QueryParams::parse(query);
        let locale = self.locale();

        let mut routes = self.trie.match_topic(path);
        routes.sort_by(|a, b| b.seq.cmp(&a.seq));
        routes
            .iter()
            .find_map(|route| route.handler.lookup(path, &params, &locale))
            .unwrap_or_else(|| path.to_string())
    }

    pub fn set_locale(&self, locale: &str) {
        *self.locale.write().unwrap_or_else(|e| e.into_inner()) = locale.to_string();
    }

    pub fn locale(&self) -> String {
        self.locale.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Translator for I18nStore {
    fn translate(&self, key: &str) -> String {
        self.get(key)
    }
}
