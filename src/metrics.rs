use std::sync::atomic::{AtomicU64, Ordering};
use serde::Serialize;

#[derive(Debug, Default)]
pub struct Metrics {
    pub preflights: AtomicU64,
    pub generations: AtomicU64,
    pub malformed_requests: AtomicU64,
    pub upstream_failures: AtomicU64,
    pub total_requests: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {

        Self::default()

    }

    pub fn record_preflight(&self) {

        self.preflights.fetch_add(1, Ordering::Relaxed);
        self.total_requests.fetch_add(1, Ordering::Relaxed);

    }

    pub fn record_generation(&self) {

        self.generations.fetch_add(1, Ordering::Relaxed);
        self.total_requests.fetch_add(1, Ordering::Relaxed);

    }

    pub fn record_malformed(&self) {

        self.malformed_requests.fetch_add(1, Ordering::Relaxed);
        self.total_requests.fetch_add(1, Ordering::Relaxed);

    }

    pub fn record_upstream_failure(&self) {

        self.upstream_failures.fetch_add(1, Ordering::Relaxed);
        self.total_requests.fetch_add(1, Ordering::Relaxed);

    }

    pub fn snapshot(&self) -> MetricsSnapshot {

        MetricsSnapshot {
            preflights: self.preflights.load(Ordering::Relaxed),
            generations: self.generations.load(Ordering::Relaxed),
            malformed_requests: self.malformed_requests.load(Ordering::Relaxed),
            upstream_failures: self.upstream_failures.load(Ordering::Relaxed),
            total_requests: self.total_requests.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub preflights: u64,
    pub generations: u64,
    pub malformed_requests: u64,
    pub upstream_failures: u64,
    pub total_requests: u64,
}

impl MetricsSnapshot {
    pub fn success_rate(&self) -> f64 {

        if self.total_requests == 0 {
            return 0.0;
        }
        let successes = self.preflights + self.generations;
        (successes as f64 / self.total_requests as f64) * 100.0

    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_counters_feed_snapshot() {

        let metrics = Metrics::new();
        metrics.record_preflight();
        metrics.record_generation();
        metrics.record_generation();
        metrics.record_upstream_failure();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.preflights, 1);
        assert_eq!(snapshot.generations, 2);
        assert_eq!(snapshot.upstream_failures, 1);
        assert_eq!(snapshot.total_requests, 4);
        assert_eq!(snapshot.success_rate(), 75.0);

    }

    #[test]
    fn test_success_rate_with_no_requests() {

        let snapshot = Metrics::new().snapshot();
        assert_eq!(snapshot.success_rate(), 0.0);

    }

}
