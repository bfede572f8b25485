//! Simulated payments backend
//!
//! Serves synthesized transactions and a fixed analytics report after an
//! artificial delay, optionally failing a share of requests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use paypilot_config::SimulationConfig;
use paypilot_core::error::{CoreError, CoreResult};
use paypilot_core::models::{AnalyticsReport, AnalyticsStat, RevenuePoint, SuccessRatePoint, Transaction};
use paypilot_core::source::DataSource;
use paypilot_core::types::TransactionStatus;

/// First numeric suffix of generated transaction ids
pub const ID_BASE: usize = 10_000;

/// Generate `count` transactions, one hour apart going back from `now`
pub fn generate_transactions<R: Rng>(rng: &mut R, count: usize, now: DateTime<Utc>) -> Vec<Transaction> {
    (0..count)
        .map(|i| {
            let cents: i64 = rng.gen_range(2_000..52_000);
            let status = TransactionStatus::ALL[rng.gen_range(0..TransactionStatus::ALL.len())];
            Transaction::new(
                format!("txn_{:06}", ID_BASE + i),
                Decimal::new(cents, 2),
                status,
                now - ChronoDuration::hours(i as i64),
            )
        })
        .collect()
}

/// The fixed analytics overview
pub fn analytics_report() -> AnalyticsReport {
    let revenue_data = [
        ("Jan", 12_400, 1_240),
        ("Feb", 15_800, 1_580),
        ("Mar", 14_200, 1_420),
        ("Apr", 18_900, 1_890),
        ("May", 22_100, 2_210),
        ("Jun", 24_800, 2_480),
    ]
    .into_iter()
    .map(|(month, revenue, transactions)| RevenuePoint {
        month: month.to_string(),
        revenue,
        transactions,
    })
    .collect();

    let success_rate_data = [
        ("Mon", 98.2),
        ("Tue", 97.8),
        ("Wed", 99.1),
        ("Thu", 98.5),
        ("Fri", 99.4),
        ("Sat", 97.2),
        ("Sun", 98.8),
    ]
    .into_iter()
    .map(|(day, rate)| SuccessRatePoint {
        day: day.to_string(),
        rate,
    })
    .collect();

    let stats = [
        ("Total Revenue", "$108.2K", "+12.4%", true),
        ("Transactions", "10,820", "+8.2%", true),
        ("Success Rate", "98.7%", "+0.3%", true),
        ("Avg. Order", "$156", "-2.1%", false),
    ]
    .into_iter()
    .map(|(label, value, change, positive)| AnalyticsStat {
        label: label.to_string(),
        value: value.to_string(),
        change: change.to_string(),
        positive,
    })
    .collect();

    AnalyticsReport {
        revenue_data,
        success_rate_data,
        stats,
    }
}

/// In-process data source with configurable latency and failure rate
pub struct MockBackend {
    latency: Duration,
    transaction_count: usize,
    failure_rate: f64,
    rng: Mutex<StdRng>,
}

impl MockBackend {
    pub fn new(config: &SimulationConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            latency: Duration::from_millis(config.latency_ms),
            transaction_count: config.transaction_count,
            failure_rate: config.failure_rate.clamp(0.0, 1.0),
            rng: Mutex::new(rng),
        }
    }

    fn rng(&self) -> CoreResult<std::sync::MutexGuard<'_, StdRng>> {
        self.rng.lock().map_err(|_| CoreError::InternalError {
            message: "Mock generator lock poisoned".to_string(),
        })
    }

    /// Sleep for the configured latency, then roll for a simulated failure
    async fn simulate_request(&self, what: &str) -> CoreResult<()> {
        tokio::time::sleep(self.latency).await;
        let failed = self.failure_rate > 0.0 && self.rng()?.gen_bool(self.failure_rate);
        if failed {
            log::warn!("Simulated failure while fetching {}", what);
            return Err(CoreError::fetch_failed(format!("Failed to load {}", what)));
        }
        Ok(())
    }
}

#[async_trait]
impl DataSource for MockBackend {
    async fn fetch_transactions(&self) -> CoreResult<Vec<Transaction>> {
        self.simulate_request("transactions").await?;
        let mut rng = self.rng()?;
        Ok(generate_transactions(&mut *rng, self.transaction_count, Utc::now()))
    }

    async fn fetch_analytics(&self) -> CoreResult<AnalyticsReport> {
        self.simulate_request("analytics").await?;
        Ok(analytics_report())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn config(failure_rate: f64) -> SimulationConfig {
        SimulationConfig {
            latency_ms: 800,
            transaction_count: 52,
            failure_rate,
            seed: Some(7),
        }
    }

    #[test]
    fn test_generated_records() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let records = generate_transactions(&mut rng, 52, now);

        assert_eq!(records.len(), 52);
        assert_eq!(records[0].id, "txn_010000");
        assert_eq!(records[51].id, "txn_010051");
        assert_eq!(records[0].timestamp, now);
        assert_eq!(records[3].timestamp, now - ChronoDuration::hours(3));

        let ids: HashSet<_> = records.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), 52);
        for tx in &records {
            assert!(tx.amount >= Decimal::new(20, 0) && tx.amount < Decimal::new(520, 0));
            assert!(tx.amount.scale() <= 2);
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let now = Utc::now();
        let a = generate_transactions(&mut StdRng::seed_from_u64(9), 10, now);
        let b = generate_transactions(&mut StdRng::seed_from_u64(9), 10, now);
        assert_eq!(a, b);
    }

    #[test]
    fn test_analytics_report() {
        let report = analytics_report();
        assert_eq!(report.revenue_data.len(), 6);
        assert_eq!(report.success_rate_data.len(), 7);
        assert_eq!(report.stats.len(), 4);
        assert_eq!(report.max_revenue(), 24_800);
        assert!(!report.stats[3].positive);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_waits_for_latency() {
        let backend = MockBackend::new(&config(0.0));
        let started = tokio::time::Instant::now();
        let records = backend.fetch_transactions().await.unwrap();
        assert_eq!(records.len(), 52);
        assert!(started.elapsed() >= Duration::from_millis(800));
    }

    #[tokio::test(start_paused = true)]
    async fn test_always_failing_backend() {
        let backend = MockBackend::new(&config(1.0));
        let error = backend.fetch_transactions().await.unwrap_err();
        assert!(error.is_retryable());
        assert_eq!(error.user_message(), "Failed to load transactions");

        let error = backend.fetch_analytics().await.unwrap_err();
        assert_eq!(error.to_string(), "Failed to load analytics");
    }
}
