use std::time::Duration;

use bnpl_client::RequestOptions;
use bnpl_core::AdminConfig;

/// Per-hook configuration.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Fire on mount. Default `true`.
    pub auto: bool,
    /// Join the target onto the API base URL. Default `true`.
    pub with_base_url: bool,
    /// Quiet period for the debounced variant. Default 700 ms.
    pub delay: Duration,
    /// Initial watch values; a later change re-triggers the fetch.
    pub watch: Vec<String>,
    /// Method, query and body sent with every trigger.
    pub request: RequestOptions,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            auto: true,
            with_base_url: true,
            delay: Duration::from_millis(700),
            watch: Vec::new(),
            request: RequestOptions::get(),
        }
    }
}

impl FetchOptions {
    /// Defaults with the debounce delay taken from config.
    pub fn from_config(config: &AdminConfig) -> Self {
        Self {
            delay: config.debounce(),
            ..Default::default()
        }
    }

    /// Do not fire on mount.
    pub fn manual(mut self) -> Self {
        self.auto = false;
        self
    }

    pub fn without_base_url(mut self) -> Self {
        self.with_base_url = false;
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn watch(mut self, values: Vec<String>) -> Self {
        self.watch = values;
        self
    }

    pub fn request(mut self, request: RequestOptions) -> Self {
        self.request = request;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = FetchOptions::default();
        assert!(opts.auto);
        assert!(opts.with_base_url);
        assert_eq!(opts.delay, Duration::from_millis(700));
        assert!(opts.watch.is_empty());
    }

    #[test]
    fn delay_from_config() {
        let config = AdminConfig {
            debounce_ms: 300,
            ..Default::default()
        };
        assert_eq!(FetchOptions::from_config(&config).delay, Duration::from_millis(300));
    }

    #[test]
    fn builders() {
        let opts = FetchOptions::default()
            .manual()
            .without_base_url()
            .watch(vec!["branch-1".into()]);
        assert!(!opts.auto);
        assert!(!opts.with_base_url);
        assert_eq!(opts.watch, vec!["branch-1".to_string()]);
    }
}
