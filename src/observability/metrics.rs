use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

pub struct Metrics {
    pub webhooks_received: AtomicU64,
    pub events_ignored: AtomicU64,
    pub messages_sent: AtomicU64,
    pub format_errors: AtomicU64,
    pub delivery_failures: AtomicU64,
    pub start_time: Instant,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub webhooks_received: u64,
    pub events_ignored: u64,
    pub messages_sent: u64,
    pub format_errors: u64,
    pub delivery_failures: u64,
    pub uptime_secs: u64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            webhooks_received: AtomicU64::new(0),
            events_ignored: AtomicU64::new(0),
            messages_sent: AtomicU64::new(0),
            format_errors: AtomicU64::new(0),
            delivery_failures: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn increment_webhooks(&self) {
        self.webhooks_received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_ignored(&self) {
        self.events_ignored.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_messages_sent(&self) {
        self.messages_sent.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_format_errors(&self) {
        self.format_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_delivery_failures(&self) {
        self.delivery_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            webhooks_received: self.webhooks_received.load(Ordering::Relaxed),
            events_ignored: self.events_ignored.load(Ordering::Relaxed),
            messages_sent: self.messages_sent.load(Ordering::Relaxed),
            format_errors: self.format_errors.load(Ordering::Relaxed),
            delivery_failures: self.delivery_failures.load(Ordering::Relaxed),
            uptime_secs: self.start_time.elapsed().as_secs(),
        }
    }
}
