//! Basic types for the transaction table

use serde::{Deserialize, Serialize};

/// Transaction status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Success,
    Failed,
    Pending,
}

impl TransactionStatus {
    /// All statuses in display order
    pub const ALL: [TransactionStatus; 3] = [
        TransactionStatus::Success,
        TransactionStatus::Failed,
        TransactionStatus::Pending,
    ];
}

impl std::str::FromStr for TransactionStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "success" => Ok(TransactionStatus::Success),
            "failed" => Ok(TransactionStatus::Failed),
            "pending" => Ok(TransactionStatus::Pending),
            _ => Err(format!("Invalid transaction status: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Success => write!(f, "success"),
            TransactionStatus::Failed => write!(f, "failed"),
            TransactionStatus::Pending => write!(f, "pending"),
        }
    }
}

/// Status selector of the transaction table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    All,
    Success,
    Failed,
    Pending,
}

impl Default for StatusFilter {
    fn default() -> Self {
        StatusFilter::All
    }
}

impl StatusFilter {
    /// Selector options in display order
    pub const OPTIONS: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Success,
        StatusFilter::Failed,
        StatusFilter::Pending,
    ];

    /// Whether a record with `status` passes this selector
    pub fn matches(self, status: TransactionStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Success => status == TransactionStatus::Success,
            StatusFilter::Failed => status == TransactionStatus::Failed,
            StatusFilter::Pending => status == TransactionStatus::Pending,
        }
    }

    /// Parse selector input, coercing anything outside the set to `All`
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| {
            log::debug!("Ignoring unknown status filter {:?}", s);
            StatusFilter::All
        })
    }

    /// Capitalized label for the selector
    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Success => "Success",
            StatusFilter::Failed => "Failed",
            StatusFilter::Pending => "Pending",
        }
    }
}

impl From<TransactionStatus> for StatusFilter {
    fn from(status: TransactionStatus) -> Self {
        match status {
            TransactionStatus::Success => StatusFilter::Success,
            TransactionStatus::Failed => StatusFilter::Failed,
            TransactionStatus::Pending => StatusFilter::Pending,
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Ok(StatusFilter::All),
            other => other.parse::<TransactionStatus>().map(StatusFilter::from),
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusFilter::All => write!(f, "all"),
            StatusFilter::Success => write!(f, "success"),
            StatusFilter::Failed => write!(f, "failed"),
            StatusFilter::Pending => write!(f, "pending"),
        }
    }
}

/// Rows per page of the transaction table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "usize", try_from = "usize")]
pub enum PageSize {
    Five,
    Ten,
    Twenty,
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::Ten
    }
}

impl PageSize {
    /// Selector options in display order
    pub const OPTIONS: [PageSize; 3] = [PageSize::Five, PageSize::Ten, PageSize::Twenty];

    /// Number of rows
    pub fn get(self) -> usize {
        match self {
            PageSize::Five => 5,
            PageSize::Ten => 10,
            PageSize::Twenty => 20,
        }
    }

    /// Exact match against the allowed sizes
    pub fn from_value(value: usize) -> Option<Self> {
        Self::OPTIONS.into_iter().find(|size| size.get() == value)
    }

    /// Nearest allowed size; ties go to the smaller one
    pub fn nearest(value: usize) -> Self {
        Self::OPTIONS
            .into_iter()
            .min_by_key(|size| size.get().abs_diff(value))
            .unwrap_or_default()
    }

    /// Parse selector input, coercing out-of-set numbers to the nearest size
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().parse::<usize>() {
            Ok(value) => Self::nearest(value),
            Err(_) => {
                log::debug!("Ignoring non-numeric page size {:?}", s);
                PageSize::default()
            }
        }
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

impl TryFrom<usize> for PageSize {
    type Error = String;
    fn try_from(value: usize) -> Result<Self, Self::Error> {
        PageSize::from_value(value).ok_or_else(|| format!("Invalid page size: {}", value))
    }
}

impl std::fmt::Display for PageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Committed search query
///
/// Always trimmed and lower-cased; the empty query matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Normalize raw input into a committed query
    pub fn commit(raw: &str) -> Self {
        SearchQuery(raw.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_filter_matches() {
        assert!(StatusFilter::All.matches(TransactionStatus::Failed));
        assert!(StatusFilter::Failed.matches(TransactionStatus::Failed));
        assert!(!StatusFilter::Failed.matches(TransactionStatus::Success));
        assert!(!StatusFilter::Pending.matches(TransactionStatus::Success));
    }

    #[test]
    fn test_status_filter_parse() {
        assert_eq!("Pending".parse::<StatusFilter>().unwrap(), StatusFilter::Pending);
        assert_eq!(" all ".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert!("refunded".parse::<StatusFilter>().is_err());
        assert_eq!(StatusFilter::parse_lenient("refunded"), StatusFilter::All);
        assert_eq!(StatusFilter::parse_lenient("failed"), StatusFilter::Failed);
    }

    #[test]
    fn test_page_size_coercion() {
        assert_eq!(PageSize::parse_lenient("20"), PageSize::Twenty);
        assert_eq!(PageSize::parse_lenient("7"), PageSize::Five);
        assert_eq!(PageSize::parse_lenient("8"), PageSize::Ten);
        assert_eq!(PageSize::parse_lenient("15"), PageSize::Ten);
        assert_eq!(PageSize::parse_lenient("1000"), PageSize::Twenty);
        assert_eq!(PageSize::parse_lenient("0"), PageSize::Five);
        assert_eq!(PageSize::parse_lenient("ten"), PageSize::Ten);
        assert_eq!(PageSize::from_value(12), None);
    }

    #[test]
    fn test_page_size_serde() {
        assert_eq!(serde_json::to_string(&PageSize::Twenty).unwrap(), "20");
        assert_eq!(serde_json::from_str::<PageSize>("5").unwrap(), PageSize::Five);
        assert!(serde_json::from_str::<PageSize>("6").is_err());
    }

    #[test]
    fn test_search_query_normalizes() {
        let query = SearchQuery::commit("  TXN_0100 \t");
        assert_eq!(query.as_str(), "txn_0100");
        assert!(SearchQuery::commit("   ").is_empty());
    }
}
