use futures::{Stream, StreamExt, stream};
use serde::Serialize;
use std::pin::pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::time::sleep;

use crate::api::SearchConsoleApi;
use crate::core::constants::{markers, timeouts};
use crate::core::types::InspectionResult;
use crate::inspection::url::normalize_url;
use crate::logging;

/// `{current, total}` counter of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

/// State of every item after one step of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectionSnapshot {
    pub items: Vec<InspectionResult>,
    pub progress: Progress,
}

impl InspectionSnapshot {
    pub fn is_complete(&self) -> bool {
        self.progress.current == self.progress.total
    }
}

/// Cooperative stop signal, checked between items.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Inspects URLs one at a time, pausing `delay` between consecutive calls.
///
/// A failed item is recorded as such and the run moves on; nothing is retried.
pub struct InspectionRunner {
    api: Arc<dyn SearchConsoleApi>,
    delay: Duration,
}

impl InspectionRunner {
    pub fn new(api: Arc<dyn SearchConsoleApi>) -> Self {
        Self {
            api,
            delay: Duration::from_millis(timeouts::DEFAULT_INSPECTION_DELAY_MS),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Start a run over `urls` (raw user input, one URL each).
    ///
    /// The stream first yields every item in the loading state, then one
    /// snapshot per finished item, in input order. Empty input yields
    /// nothing and makes no calls. After `cancel` fires, the remaining items
    /// are marked cancelled in a single final snapshot.
    pub fn run(
        &self,
        token: &str,
        site_url: &str,
        urls: &[String],
        cancel: CancelHandle,
    ) -> impl Stream<Item = InspectionSnapshot> + Send + 'static {
        let items = urls
            .iter()
            .map(|raw| InspectionResult::pending(normalize_url(raw, site_url)))
            .collect();

        let state = RunState {
            api: Arc::clone(&self.api),
            token: token.to_string(),
            site_url: site_url.to_string(),
            delay: self.delay,
            cancel,
            items,
            next: 0,
            announced: false,
        };

        stream::unfold(state, RunState::step)
    }

    /// Drive a run to completion and return the final items.
    pub async fn run_to_end(
        &self,
        token: &str,
        site_url: &str,
        urls: &[String],
    ) -> Vec<InspectionResult> {
        let mut snapshots = pin!(self.run(token, site_url, urls, CancelHandle::new()));
        let mut items = Vec::new();
        while let Some(snapshot) = snapshots.next().await {
            items = snapshot.items;
        }
        items
    }
}

struct RunState {
    api: Arc<dyn SearchConsoleApi>,
    token: String,
    site_url: String,
    delay: Duration,
    cancel: CancelHandle,
    items: Vec<InspectionResult>,
    next: usize,
    announced: bool,
}

impl RunState {
    fn snapshot(&self) -> InspectionSnapshot {
        InspectionSnapshot {
            items: self.items.clone(),
            progress: Progress {
                current: self.next,
                total: self.items.len(),
            },
        }
    }

    async fn step(mut self) -> Option<(InspectionSnapshot, Self)> {
        if self.items.is_empty() || self.next >= self.items.len() {
            return None;
        }
        if !self.announced {
            self.announced = true;
            return Some((self.snapshot(), self));
        }

        if self.next > 0 && !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        if self.cancel.is_cancelled() {
            let skipped = self.items.len() - self.next;
            for item in &mut self.items[self.next..] {
                item.record_error(markers::CANCELLED);
            }
            self.next = self.items.len();
            logging::log_inspection_cancelled(skipped);
            return Some((self.snapshot(), self));
        }

        let idx = self.next;
        let url = self.items[idx].url.clone();
        match self.api.inspect_url(&self.token, &self.site_url, &url).await {
            Ok(result) => {
                self.items[idx].record_success(result);
            }
            Err(e) => {
                self.items[idx].record_error(e.message());
            }
        }
        logging::log_inspection_result(&self.items[idx]);
        self.next += 1;

        Some((self.snapshot(), self))
    }
}
