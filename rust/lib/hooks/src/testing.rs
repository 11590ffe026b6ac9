//! Fakes for the HTTP and notification collaborators.

use std::sync::{Arc, Mutex};

use bnpl_client::{HttpClient, RequestOptions};
use bnpl_core::AdminError;
use serde_json::{json, Value};
use tokio::sync::Semaphore;

use crate::notify::Notifier;

type Responder = Box<dyn Fn(&str) -> Result<Value, AdminError> + Send + Sync>;

/// Records every call and answers through `respond`.
///
/// When gated, each request waits for one permit on the gate before
/// answering, so tests can hold responses in flight.
pub(crate) struct FakeClient {
    calls: Mutex<Vec<(String, bool)>>,
    respond: Responder,
    gate: Option<Arc<Semaphore>>,
}

impl FakeClient {
    /// Answers `{"target": <path>}` so tests can see which target fired.
    pub(crate) fn echo() -> Self {
        Self::with(|path| Ok(json!({ "target": path })))
    }

    pub(crate) fn failing(err: AdminError) -> Self {
        Self::with(move |_| Err(err.clone()))
    }

    pub(crate) fn with<F>(respond: F) -> Self
    where
        F: Fn(&str) -> Result<Value, AdminError> + Send + Sync + 'static,
    {
        Self {
            calls: Mutex::new(Vec::new()),
            respond: Box::new(respond),
            gate: None,
        }
    }

    pub(crate) fn gated(mut self) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        self.gate = Some(gate.clone());
        (self, gate)
    }

    pub(crate) fn calls(&self) -> Vec<(String, bool)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl HttpClient for FakeClient {
    async fn request(
        &self,
        path: &str,
        _options: &RequestOptions,
        use_base_url: bool,
    ) -> Result<Value, AdminError> {
        self.calls.lock().unwrap().push((path.to_string(), use_base_url));
        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate closed").forget();
        }
        (self.respond)(path)
    }
}

#[derive(Default)]
pub(crate) struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub(crate) fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Payload shape produced by [`FakeClient::echo`].
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub(crate) struct Echo {
    pub(crate) target: String,
}
