use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct KernelHealth {
    pub uptime_seconds: u64,
    pub telemetry_url: String,
    pub fetches_ok: u64,
    pub fetches_failed: u64,
    pub stale_responses_discarded: u64,
}

#[derive(Clone)]
pub struct HealthTracker {
    start_time: Instant,
    telemetry_url: Arc<String>,
    fetches_ok: Arc<AtomicU64>,
    fetches_failed: Arc<AtomicU64>,
    stale_discarded: Arc<AtomicU64>,
}

impl HealthTracker {
    pub fn new(telemetry_url: &str) -> Self {
        Self {
            start_time: Instant::now(),
            telemetry_url: Arc::new(telemetry_url.to_string()),
            fetches_ok: Arc::new(AtomicU64::new(0)),
            fetches_failed: Arc::new(AtomicU64::new(0)),
            stale_discarded: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn record_fetch(&self, ok: bool) {
        let counter = if ok { &self.fetches_ok } else { &self.fetches_failed };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_stale_discard(&self) {
        self.stale_discarded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> KernelHealth {
        KernelHealth {
            uptime_seconds: self.start_time.elapsed().as_secs(),
            telemetry_url: self.telemetry_url.as_ref().clone(),
            fetches_ok: self.fetches_ok.load(Ordering::Relaxed),
            fetches_failed: self.fetches_failed.load(Ordering::Relaxed),
            stale_responses_discarded: self.stale_discarded.load(Ordering::Relaxed),
        }
    }
}
