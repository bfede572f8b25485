//! Core data models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use std::collections::HashSet;

use super::error::{CoreError, CoreResult};
use super::types::TransactionStatus;

/// A payment transaction as delivered by the data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier within one fetched set (e.g., "txn_010000")
    pub id: String,
    /// Non-negative, currency-agnostic amount
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub status: TransactionStatus,
    /// Serialized as `date` to match the presentation contract
    #[serde(rename = "date")]
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    pub fn new(id: impl Into<String>, amount: Decimal, status: TransactionStatus, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            amount,
            status,
            timestamp,
        }
    }

    /// Case-insensitive substring match on the identifier.
    /// `needle` must already be lower-cased.
    pub fn id_contains(&self, needle: &str) -> bool {
        needle.is_empty() || self.id.to_lowercase().contains(needle)
    }

    /// Amount with two decimal places
    pub fn amount_display(&self) -> String {
        format!("{:.2}", self.amount.round_dp(2))
    }
}

/// Reject a fetched set with negative amounts or repeated ids
pub fn check_transactions(records: &[Transaction]) -> CoreResult<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for tx in records {
        if tx.amount.is_sign_negative() {
            return Err(CoreError::InvalidData {
                message: format!("transaction {} has a negative amount", tx.id),
            });
        }
        if !seen.insert(tx.id.as_str()) {
            return Err(CoreError::InvalidData {
                message: format!("duplicate transaction id {}", tx.id),
            });
        }
    }
    Ok(())
}

/// Monthly revenue point for the revenue trend chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenuePoint {
    pub month: String,
    pub revenue: u64,
    pub transactions: u64,
}

/// Daily success rate point for the success rate chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessRatePoint {
    pub day: String,
    /// Percentage, 0.0 - 100.0
    pub rate: f64,
}

/// Headline stat card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsStat {
    pub label: String,
    pub value: String,
    pub change: String,
    pub positive: bool,
}

/// Analytics payload for the dashboard overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub revenue_data: Vec<RevenuePoint>,
    pub success_rate_data: Vec<SuccessRatePoint>,
    pub stats: Vec<AnalyticsStat>,
}

impl AnalyticsReport {
    /// Largest monthly revenue, used to scale the revenue chart
    pub fn max_revenue(&self) -> u64 {
        self.revenue_data.iter().map(|p| p.revenue).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Transaction {
        Transaction::new(
            "TXN_010042",
            Decimal::new(12345, 2),
            TransactionStatus::Pending,
            Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_id_contains_is_case_insensitive() {
        let tx = sample();
        assert!(tx.id_contains("txn_0100"));
        assert!(tx.id_contains("42"));
        assert!(tx.id_contains(""));
        assert!(!tx.id_contains("txn_02"));
    }

    #[test]
    fn test_amount_display() {
        assert_eq!(sample().amount_display(), "123.45");
        let mut tx = sample();
        tx.amount = Decimal::new(20, 0);
        assert_eq!(tx.amount_display(), "20.00");
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], "TXN_010042");
        assert_eq!(json["amount"], 123.45);
        assert_eq!(json["status"], "pending");
        assert!(json["date"].as_str().unwrap().starts_with("2025-03-01T12:00:00"));
    }

    #[test]
    fn test_check_transactions() {
        let mut other = sample();
        other.id = "TXN_010043".to_string();
        assert!(check_transactions(&[sample(), other.clone()]).is_ok());
        assert!(check_transactions(&[]).is_ok());

        let err = check_transactions(&[sample(), sample()]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidData { .. }));
        assert_eq!(err.to_string(), "Invalid data: duplicate transaction id TXN_010042");

        other.amount = Decimal::new(-1, 2);
        assert!(check_transactions(&[other]).is_err());
    }
}
