use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use bnpl_core::AdminError;
use tokio::task::JoinHandle;

use crate::hook::{Payload, Shared};
use crate::state::FetchState;

/// Where a debounced hook is in its trigger cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebouncePhase {
    Idle,
    /// Waiting out the quiet period for trigger `n`.
    Scheduled(u64),
    /// Trigger `n` survived its quiet period and its request is running.
    InFlight(u64),
}

enum Slot {
    Idle,
    Scheduled { token: u64, task: JoinHandle<()> },
    InFlight { token: u64 },
}

/// Debounced fetch hook for search boxes and filters.
///
/// Each [`fetch_data`](Self::fetch_data) call replaces the pending one and
/// restarts the quiet period, so a burst of triggers produces exactly one
/// request carrying the last trigger's target. A request that has already
/// left is not cancelled, but a newer one supersedes its response.
pub struct DebouncedFetch<T: Payload> {
    shared: Arc<Shared<T>>,
    slot: Arc<Mutex<Slot>>,
    next_token: AtomicU64,
}

impl<T: Payload> DebouncedFetch<T> {
    pub(crate) fn from_shared(shared: Arc<Shared<T>>) -> Self {
        let hook = Self {
            shared,
            slot: Arc::new(Mutex::new(Slot::Idle)),
            next_token: AtomicU64::new(0),
        };
        if hook.shared.options.auto {
            hook.fetch_data(None);
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

    pub fn phase(&self) -> DebouncePhase {
        match &*lock(&self.slot) {
            Slot::Idle => DebouncePhase::Idle,
            Slot::Scheduled { token, .. } => DebouncePhase::Scheduled(*token),
            Slot::InFlight { token } => DebouncePhase::InFlight(*token),
        }
    }

    /// Schedule a fetch after the quiet period, replacing any pending one.
    ///
    /// `target` overrides the mounted target for this trigger only.
    pub fn fetch_data(&self, target: Option<&str>) {
        if !self.shared.is_mounted() {
            return;
        }
        let target = self.shared.resolve_target(target);
        let token = self.next_token.fetch_add(1, Ordering::Relaxed) + 1;
        let delay = self.shared.options.delay;

        // Held across the spawn so the task cannot observe the slot
        // before it is marked Scheduled.
        let mut slot = lock(&self.slot);
        if let Slot::Scheduled { token: pending, task } = &*slot {
            task.abort();
            tracing::debug!(pending, token, "debounce: pending trigger replaced");
        }

        let shared = Arc::clone(&self.shared);
        let slot_ref = Arc::clone(&self.slot);
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            {
                let mut slot = lock(&slot_ref);
                let current = matches!(&*slot, Slot::Scheduled { token: t, .. } if *t == token);
                if !current {
                    return;
                }
                *slot = Slot::InFlight { token };
            }

            if let Some(generation) = shared.begin() {
                shared.run(target, generation).await;
            }

            let mut slot = lock(&slot_ref);
            if matches!(&*slot, Slot::InFlight { token: t } if *t == token) {
                *slot = Slot::Idle;
            }
        });
        *slot = Slot::Scheduled { token, task };
    }

    /// Re-fetch the mounted target after the quiet period.
    pub fn refetch(&self) {
        self.fetch_data(None);
    }

    /// Drop a pending trigger without unmounting.
    pub fn cancel(&self) {
        let mut slot = lock(&self.slot);
        if let Slot::Scheduled { task, .. } = &*slot {
            task.abort();
            *slot = Slot::Idle;
        }
    }

    /// Update the watched values; schedules a fetch if they changed.
    pub fn set_watch(&self, values: Vec<String>) -> bool {
        let changed = self.shared.swap_watch(values);
        if changed {
            self.fetch_data(None);
        }
        changed
    }

    /// Cancel anything pending and stop applying responses.
    pub fn unmount(&self) {
        self.cancel();
        self.shared.unmount();
    }

    pub fn is_mounted(&self) -> bool {
        self.shared.is_mounted()
    }
}

impl<T: Payload> Drop for DebouncedFetch<T> {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::sleep;

    use super::*;
    use crate::hook::HookBuilder;
    use crate::options::FetchOptions;
    use crate::testing::{Echo, FakeClient, RecordingNotifier};

    const DELAY: Duration = Duration::from_millis(700);

    fn mount(
        client: &Arc<FakeClient>,
        notifier: &Arc<RecordingNotifier>,
        options: FetchOptions,
    ) -> DebouncedFetch<Echo> {
        HookBuilder::new(client.clone(), "clients")
            .notifier(notifier.clone())
            .options(options)
            .mount_debounced()
    }

    #[tokio::test(start_paused = true)]
    async fn burst_collapses_to_last_trigger() {
        let client = Arc::new(FakeClient::echo());
        let notifier = Arc::new(RecordingNotifier::default());
        let hook = mount(&client, &notifier, FetchOptions::default().manual());

        for i in 1..=5 {
            hook.fetch_data(Some(&format!("clients?q=ali{}", i)));
            sleep(Duration::from_millis(100)).await;
        }
        assert_eq!(client.call_count(), 0);

        sleep(DELAY + Duration::from_millis(100)).await;
        assert_eq!(client.calls(), vec![("clients?q=ali5".to_string(), true)]);
        assert_eq!(hook.data().unwrap().target, "clients?q=ali5");
        assert_eq!(hook.phase(), DebouncePhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn spaced_triggers_each_fire() {
        let client = Arc::new(FakeClient::echo());
        let notifier = Arc::new(RecordingNotifier::default());
        let hook = mount(&client, &notifier, FetchOptions::default().manual());

        hook.fetch_data(Some("orders?status=new"));
        sleep(DELAY * 2).await;
        hook.fetch_data(Some("orders?status=paid"));
        sleep(DELAY * 2).await;

        let targets: Vec<String> = client.calls().into_iter().map(|(t, _)| t).collect();
        assert_eq!(targets, vec!["orders?status=new", "orders?status=paid"]);
    }

    #[tokio::test(start_paused = true)]
    async fn auto_mount_waits_for_quiet_period() {
        let client = Arc::new(FakeClient::echo());
        let notifier = Arc::new(RecordingNotifier::default());
        let hook = mount(&client, &notifier, FetchOptions::default());

        assert!(matches!(hook.phase(), DebouncePhase::Scheduled(_)));
        sleep(DELAY / 2).await;
        assert_eq!(client.call_count(), 0);

        sleep(DELAY).await;
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn phases_follow_request_lifecycle() {
        let (client, gate) = FakeClient::echo().gated();
        let client = Arc::new(client);
        let notifier = Arc::new(RecordingNotifier::default());
        let hook = mount(&client, &notifier, FetchOptions::default().manual());

        assert_eq!(hook.phase(), DebouncePhase::Idle);
        hook.fetch_data(None);
        assert_eq!(hook.phase(), DebouncePhase::Scheduled(1));
        assert!(!hook.loading());

        sleep(DELAY + Duration::from_millis(10)).await;
        assert_eq!(hook.phase(), DebouncePhase::InFlight(1));
        assert!(hook.loading());

        gate.add_permits(1);
        sleep(Duration::from_millis(10)).await;
        assert_eq!(hook.phase(), DebouncePhase::Idle);
        assert!(!hook.loading());
    }

    #[tokio::test(start_paused = true)]
    async fn custom_delay_respected() {
        let client = Arc::new(FakeClient::echo());
        let notifier = Arc::new(RecordingNotifier::default());
        let hook = mount(
            &client,
            &notifier,
            FetchOptions::default().manual().delay(Duration::from_millis(200)),
        );

        hook.fetch_data(None);
        sleep(Duration::from_millis(250)).await;
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_and_unmount_drop_pending_trigger() {
        let client = Arc::new(FakeClient::echo());
        let notifier = Arc::new(RecordingNotifier::default());
        let hook = mount(&client, &notifier, FetchOptions::default().manual());

        hook.fetch_data(None);
        hook.cancel();
        assert_eq!(hook.phase(), DebouncePhase::Idle);
        sleep(DELAY * 2).await;
        assert_eq!(client.call_count(), 0);

        hook.fetch_data(None);
        hook.unmount();
        sleep(DELAY * 2).await;
        assert_eq!(client.call_count(), 0);

        hook.fetch_data(None);
        assert_eq!(hook.phase(), DebouncePhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn unmount_while_in_flight_discards_response() {
        let (client, gate) = FakeClient::failing(AdminError::Network("down".into())).gated();
        let client = Arc::new(client);
        let notifier = Arc::new(RecordingNotifier::default());
        let hook = mount(&client, &notifier, FetchOptions::default().manual());

        hook.fetch_data(None);
        sleep(DELAY + Duration::from_millis(10)).await;
        assert_eq!(client.call_count(), 1);

        hook.unmount();
        gate.add_permits(1);
        sleep(Duration::from_millis(10)).await;

        assert!(hook.error().is_none());
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn failure_notifies_once() {
        let client = Arc::new(FakeClient::failing(AdminError::from_status(503, "maintenance")));
        let notifier = Arc::new(RecordingNotifier::default());
        let hook = mount(&client, &notifier, FetchOptions::default().manual());

        hook.fetch_data(None);
        hook.fetch_data(None);
        sleep(DELAY * 2).await;

        assert_eq!(client.call_count(), 1);
        assert_eq!(notifier.messages(), vec!["HTTP 503: maintenance".to_string()]);
        let state = hook.state();
        assert!(!state.loading);
        assert!(state.data.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn watch_change_schedules() {
        let client = Arc::new(FakeClient::echo());
        let notifier = Arc::new(RecordingNotifier::default());
        let hook = mount(&client, &notifier, FetchOptions::default().manual());

        assert!(!hook.set_watch(Vec::new()));
        assert!(hook.set_watch(vec!["USD".into()]));
        assert!(hook.set_watch(vec!["UZS".into()]));
        sleep(DELAY * 2).await;
        assert_eq!(client.call_count(), 1);
    }
}
