use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use bnpl_client::HttpClient;
use bnpl_core::AdminError;
use bnpl_flux::StateStore;
use serde::de::DeserializeOwned;

use crate::debounce::DebouncedFetch;
use crate::fetch::FetchHook;
use crate::notify::{Notifier, TracingNotifier};
use crate::options::FetchOptions;
use crate::state::FetchState;

/// Bounds every hook payload satisfies.
pub trait Payload: DeserializeOwned + Clone + Send + Sync + 'static {}

impl<T> Payload for T where T: DeserializeOwned + Clone + Send + Sync + 'static {}

/// State shared between a hook handle and its spawned requests.
///
/// Invariants, both checked under the `state` lock:
/// - a response writes only if its token equals `generation`
/// - nothing writes once `mounted` is false
pub(crate) struct Shared<T> {
    client: Arc<dyn HttpClient>,
    notifier: Arc<dyn Notifier>,
    publish: Option<(Arc<StateStore>, String)>,
    target: String,
    pub(crate) options: FetchOptions,
    state: Mutex<FetchState<T>>,
    watch: Mutex<Vec<String>>,
    generation: AtomicU64,
    mounted: AtomicBool,
}

impl<T: Payload> Shared<T> {
    fn lock_state(&self) -> MutexGuard<'_, FetchState<T>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub(crate) fn snapshot(&self) -> FetchState<T> {
        self.lock_state().clone()
    }

    pub(crate) fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    pub(crate) fn resolve_target(&self, target: Option<&str>) -> String {
        target.unwrap_or(self.target.as_str()).to_string()
    }

    /// Start a request: mark loading, clear the last error, and hand out
    /// the generation token the response must present.
    ///
    /// Returns `None` once unmounted.
    pub(crate) fn begin(&self) -> Option<u64> {
        let token = {
            let mut state = self.lock_state();
            if !self.is_mounted() {
                return None;
            }
            state.loading = true;
            state.error = None;
            self.generation.fetch_add(1, Ordering::AcqRel) + 1
        };
        self.publish();
        Some(token)
    }

    /// Perform the request for `token` and apply the outcome.
    pub(crate) async fn run(&self, target: String, token: u64) {
        tracing::debug!(%target, token, "fetch start");
        let result = self
            .client
            .request(&target, &self.options.request, self.options.with_base_url)
            .await
            .and_then(|value| serde_json::from_value::<T>(value).map_err(AdminError::from));
        self.finish(&target, token, result);
    }

    fn finish(&self, target: &str, token: u64, result: Result<T, AdminError>) {
        let failure = {
            let mut state = self.lock_state();
            if !self.is_mounted() {
                tracing::debug!(%target, token, "response after unmount dropped");
                return;
            }
            let latest = self.generation.load(Ordering::Acquire);
            if token != latest {
                tracing::debug!(%target, token, latest, "stale response dropped");
                return;
            }
            state.loading = false;
            match result {
                Ok(data) => {
                    state.data = Some(data);
                    None
                }
                Err(e) => {
                    state.error = Some(e.clone());
                    Some(e)
                }
            }
        };

        self.publish();
        if let Some(e) = failure {
            tracing::warn!(%target, code = e.error_code(), "fetch failed: {}", e);
            self.notifier.error(&e.to_string());
        }
    }

    /// Replace the watch list; `true` if it differs from the previous one.
    pub(crate) fn swap_watch(&self, values: Vec<String>) -> bool {
        let mut watch = self.watch.lock().unwrap_or_else(|e| e.into_inner());
        if *watch == values {
            return false;
        }
        *watch = values;
        true
    }

    /// Stop all future writes. In-flight requests keep running but
    /// their responses are discarded.
    pub(crate) fn unmount(&self) {
        let _state = self.lock_state();
        self.mounted.store(false, Ordering::Release);
    }

    /// Mirror the current state into the store. Re-reads instead of
    /// taking a snapshot so the last publish always shows the latest state.
    fn publish(&self) {
        if let Some((store, path)) = &self.publish {
            store.set(path, self.snapshot());
        }
    }
}

/// Assembles a hook; finish with [`mount`](Self::mount) or
/// [`mount_debounced`](Self::mount_debounced).
///
/// ```ignore
/// let hook = HookBuilder::new(client, "clients")
///     .notifier(toasts)
///     .publish(store, "page/clients")
///     .mount::<Page<Client>>();
/// ```
pub struct HookBuilder {
    client: Arc<dyn HttpClient>,
    target: String,
    notifier: Arc<dyn Notifier>,
    publish: Option<(Arc<StateStore>, String)>,
    options: FetchOptions,
}

impl HookBuilder {
    pub fn new(client: Arc<dyn HttpClient>, target: impl Into<String>) -> Self {
        Self {
            client,
            target: target.into(),
            notifier: Arc::new(TracingNotifier),
            publish: None,
            options: FetchOptions::default(),
        }
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Mirror every state change into `store` at `path`.
    pub fn publish(mut self, store: Arc<StateStore>, path: impl Into<String>) -> Self {
        self.publish = Some((store, path.into()));
        self
    }

    pub fn options(mut self, options: FetchOptions) -> Self {
        self.options = options;
        self
    }

    /// Mount an immediate hook. Fires right away when `auto` is set.
    pub fn mount<T: Payload>(self) -> FetchHook<T> {
        FetchHook::from_shared(self.into_shared())
    }

    /// Mount a debounced hook. When `auto` is set the first fetch is
    /// scheduled after the quiet period.
    pub fn mount_debounced<T: Payload>(self) -> DebouncedFetch<T> {
        DebouncedFetch::from_shared(self.into_shared())
    }

    fn into_shared<T: Payload>(self) -> Arc<Shared<T>> {
        let watch = self.options.watch.clone();
        Arc::new(Shared {
            client: self.client,
            notifier: self.notifier,
            publish: self.publish,
            target: self.target,
            options: self.options,
            state: Mutex::new(FetchState::default()),
            watch: Mutex::new(watch),
            generation: AtomicU64::new(0),
            mounted: AtomicBool::new(true),
        })
    }
}
