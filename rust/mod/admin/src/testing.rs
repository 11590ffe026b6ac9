//! A scripted stand-in for the admin API.

use std::sync::{Arc, Mutex};

use bnpl_client::{HttpClient, RequestOptions};
use bnpl_core::AdminError;
use serde_json::Value;

type Reply = Box<dyn Fn(&str, &RequestOptions) -> Result<Value, AdminError> + Send + Sync>;

pub(crate) struct FakeApi {
    reply: Reply,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub(crate) fn new<F>(reply: F) -> Arc<Self>
    where
        F: Fn(&str, &RequestOptions) -> Result<Value, AdminError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            reply: Box::new(reply),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Paths requested so far, in order.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl HttpClient for FakeApi {
    async fn request(
        &self,
        path: &str,
        options: &RequestOptions,
        _use_base_url: bool,
    ) -> Result<Value, AdminError> {
        self.calls.lock().unwrap().push(path.to_string());
        (self.reply)(path, options)
    }
}
