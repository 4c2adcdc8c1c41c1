use crate::models::Stats;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tokio::sync::Mutex;

#[derive(Default)]
struct Volume {
    credited: f64,
    fees: f64,
}

pub struct Analytics {
    top_ups_total: AtomicU64,
    top_ups_failed: AtomicU64,
    balance_divergences: AtomicU64,
    access_denied: AtomicU64,
    volume: Mutex<Volume>,
    start_time: Instant,
}

impl Default for Analytics {
    fn default() -> Self {
        Self::new()
    }
}

impl Analytics {
    pub fn new() -> Self {
        Self {
            top_ups_total: AtomicU64::new(0),
            top_ups_failed: AtomicU64::new(0),
            balance_divergences: AtomicU64::new(0),
            access_denied: AtomicU64::new(0),
            volume: Mutex::new(Volume::default()),
            start_time: Instant::now(),
        }
    }

    pub async fn record_top_up(&self, credited: f64, fee: f64, wallet: &str) {
        self.top_ups_total.fetch_add(1, Ordering::SeqCst);

        let mut volume = self.volume.lock().await;
        volume.credited += credited;
        volume.fees += fee;

        tracing::info!(
            "Top-up recorded: {} PEPU credited (fee {}) for {}",
            credited,
            fee,
            wallet
        );
    }

    pub fn record_failure(&self) {
        self.top_ups_failed.fetch_add(1, Ordering::SeqCst);
    }

    /// A transaction row was written but the balance update that should
    /// follow it failed.
    pub fn record_divergence(&self) {
        self.balance_divergences.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_access_denied(&self) {
        self.access_denied.fetch_add(1, Ordering::SeqCst);
    }

    pub async fn get_stats(&self) -> Stats {
        let volume = self.volume.lock().await;

        Stats {
            top_ups_total: self.top_ups_total.load(Ordering::SeqCst),
            top_ups_failed: self.top_ups_failed.load(Ordering::SeqCst),
            balance_divergences: self.balance_divergences.load(Ordering::SeqCst),
            volume_credited: volume.credited,
            fees_collected: volume.fees,
            access_denied: self.access_denied.load(Ordering::SeqCst),
            uptime_seconds: self.uptime_seconds(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn accumulates_top_up_volume() {
        let analytics = Analytics::new();
        analytics.record_top_up(40_000.0, 2_000.0, "0xabc").await;
        analytics.record_top_up(75_000.0, 3_750.0, "0xabc").await;
        analytics.record_failure();
        analytics.record_divergence();

        let stats = analytics.get_stats().await;
        assert_eq!(stats.top_ups_total, 2);
        assert_eq!(stats.top_ups_failed, 1);
        assert_eq!(stats.balance_divergences, 1);
        assert_eq!(stats.volume_credited, 115_000.0);
        assert_eq!(stats.fees_collected, 5_750.0);
        assert_eq!(stats.access_denied, 0);
    }
}
