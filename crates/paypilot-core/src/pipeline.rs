//! Filter and pagination pipeline for the transaction table
//!
//! Every function here is pure and total: empty sources, zero matches
//! and out-of-range page numbers are ordinary inputs.

use std::ops::Range;

use serde::Serialize;

use crate::models::Transaction;
use crate::types::{PageSize, SearchQuery, StatusFilter};

/// Whether a record passes both the search and the status stage
pub fn matches(tx: &Transaction, query: &SearchQuery, status: StatusFilter) -> bool {
    tx.id_contains(query.as_str()) && status.matches(tx.status)
}

/// Source positions of the records that pass, in source order
pub fn filter_indices(source: &[Transaction], query: &SearchQuery, status: StatusFilter) -> Vec<usize> {
    source
        .iter()
        .enumerate()
        .filter(|(_, tx)| matches(tx, query, status))
        .map(|(i, _)| i)
        .collect()
}

/// Order-preserving subsequence of `source` that passes the filters
pub fn filter_transactions<'a>(
    source: &'a [Transaction],
    query: &SearchQuery,
    status: StatusFilter,
) -> Vec<&'a Transaction> {
    source.iter().filter(|tx| matches(tx, query, status)).collect()
}

/// `max(1, ceil(len / page_size))`
pub fn total_pages(len: usize, page_size: PageSize) -> usize {
    len.div_ceil(page_size.get()).max(1)
}

/// Coerce a requested page into `[1, total_pages]`
pub fn clamp_page(requested: usize, total_pages: usize) -> usize {
    requested.clamp(1, total_pages.max(1))
}

/// Zero-based slice bounds of `page` (already clamped) within `len` items
pub fn page_range(len: usize, page_size: PageSize, page: usize) -> Range<usize> {
    let start = (page.max(1) - 1).saturating_mul(page_size.get()).min(len);
    let end = start.saturating_add(page_size.get()).min(len);
    start..end
}

/// One page of the filtered transaction set plus its metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsPage {
    pub rows: Vec<Transaction>,
    pub page: usize,
    pub total_pages: usize,
    pub total_count: usize,
    pub page_size: PageSize,
}

impl TransactionsPage {
    /// One-based position of the first visible row, 0 when empty
    pub fn first_item(&self) -> usize {
        if self.rows.is_empty() {
            0
        } else {
            (self.page - 1) * self.page_size.get() + 1
        }
    }

    /// One-based position of the last visible row, 0 when empty
    pub fn last_item(&self) -> usize {
        if self.rows.is_empty() {
            0
        } else {
            self.first_item() + self.rows.len() - 1
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }
}

/// Build a page from the filtered positions into `source`
pub fn paginate_indices(
    source: &[Transaction],
    indices: &[usize],
    page_size: PageSize,
    requested_page: usize,
) -> TransactionsPage {
    let total_count = indices.len();
    let total_pages = total_pages(total_count, page_size);
    let page = clamp_page(requested_page, total_pages);
    let rows = indices[page_range(total_count, page_size, page)]
        .iter()
        .filter_map(|&i| source.get(i).cloned())
        .collect();

    TransactionsPage {
        rows,
        page,
        total_pages,
        total_count,
        page_size,
    }
}

/// `(source, query, status, page_size, page) -> page`
pub fn derive_view(
    source: &[Transaction],
    query: &SearchQuery,
    status: StatusFilter,
    page_size: PageSize,
    requested_page: usize,
) -> TransactionsPage {
    let indices = filter_indices(source, query, status);
    paginate_indices(source, &indices, page_size, requested_page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionStatus;
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal::Decimal;

    fn fixture(n: usize) -> Vec<Transaction> {
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        (0..n)
            .map(|i| {
                let status = TransactionStatus::ALL[i % 3];
                Transaction::new(
                    format!("txn_{:06}", 10000 + i),
                    Decimal::new(2000 + i as i64, 2),
                    status,
                    start - Duration::hours(i as i64),
                )
            })
            .collect()
    }

    fn is_subsequence(sub: &[&Transaction], source: &[Transaction]) -> bool {
        let mut it = source.iter();
        sub.iter().all(|s| it.any(|t| t == *s))
    }

    #[test]
    fn test_total_pages() {
        for size in PageSize::OPTIONS {
            let p = size.get();
            assert_eq!(total_pages(0, size), 1);
            assert_eq!(total_pages(1, size), 1);
            assert_eq!(total_pages(p, size), 1);
            assert_eq!(total_pages(p + 1, size), 2);
            assert_eq!(total_pages(52, size), (52 + p - 1) / p);
        }
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(0, 6), 1);
        assert_eq!(clamp_page(3, 6), 3);
        assert_eq!(clamp_page(99, 6), 6);
        assert_eq!(clamp_page(5, 0), 1);
    }

    #[test]
    fn test_page_range_never_exceeds_len() {
        assert_eq!(page_range(52, PageSize::Ten, 6), 50..52);
        assert_eq!(page_range(0, PageSize::Ten, 1), 0..0);
        assert_eq!(page_range(3, PageSize::Twenty, 4), 3..3);
    }

    #[test]
    fn test_fifty_two_records_page_one() {
        let source = fixture(52);
        let view = derive_view(&source, &SearchQuery::default(), StatusFilter::All, PageSize::Ten, 1);
        assert_eq!(view.total_pages, 6);
        assert_eq!(view.total_count, 52);
        assert_eq!(view.page, 1);
        assert_eq!(view.rows.len(), 10);
        assert_eq!(view.rows[0].id, "txn_010000");
        assert_eq!(view.rows[9].id, "txn_010009");
        assert_eq!((view.first_item(), view.last_item()), (1, 10));
        assert!(!view.has_previous());
        assert!(view.has_next());
    }

    #[test]
    fn test_last_page_is_partial() {
        let source = fixture(52);
        let view = derive_view(&source, &SearchQuery::default(), StatusFilter::All, PageSize::Ten, 6);
        assert_eq!(view.rows.len(), 2);
        assert_eq!((view.first_item(), view.last_item()), (51, 52));
        assert!(!view.has_next());
    }

    #[test]
    fn test_out_of_range_page_is_clamped() {
        let source = fixture(52);
        for requested in [0, 7, 100, usize::MAX] {
            let view = derive_view(&source, &SearchQuery::default(), StatusFilter::All, PageSize::Ten, requested);
            assert!(view.page >= 1 && view.page <= view.total_pages);
        }
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let source = fixture(52);
        let query = SearchQuery::commit("TXN_01004");
        let view = derive_view(&source, &query, StatusFilter::All, PageSize::Twenty, 1);
        assert_eq!(view.total_count, 10);
        assert!(view.rows.iter().all(|tx| tx.id.starts_with("txn_01004")));
    }

    #[test]
    fn test_filters_compose_and_preserve_order() {
        let source = fixture(52);
        let query = SearchQuery::commit("1");
        for status in StatusFilter::OPTIONS {
            let filtered = filter_transactions(&source, &query, status);
            assert!(is_subsequence(&filtered, &source));
            assert!(filtered.iter().all(|tx| status.matches(tx.status) && tx.id.contains('1')));
            assert_eq!(filter_indices(&source, &query, status).len(), filtered.len());
        }
    }

    #[test]
    fn test_zero_matches_is_a_valid_state() {
        let source: Vec<Transaction> = fixture(52)
            .into_iter()
            .filter(|tx| tx.status != TransactionStatus::Failed)
            .collect();
        let view = derive_view(&source, &SearchQuery::default(), StatusFilter::Failed, PageSize::Ten, 4);
        assert_eq!(view.total_count, 0);
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.page, 1);
        assert!(view.rows.is_empty());
        assert!(view.is_empty());
        assert_eq!((view.first_item(), view.last_item()), (0, 0));
    }

    #[test]
    fn test_empty_source() {
        let view = derive_view(&[], &SearchQuery::commit("x"), StatusFilter::All, PageSize::Five, 1);
        assert_eq!(view.total_pages, 1);
        assert!(view.rows.is_empty());
    }

    #[test]
    fn test_presentation_contract_shape() {
        let source = fixture(3);
        let view = derive_view(&source, &SearchQuery::default(), StatusFilter::All, PageSize::Five, 1);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["page"], 1);
        assert_eq!(json["totalPages"], 1);
        assert_eq!(json["totalCount"], 3);
        assert_eq!(json["pageSize"], 5);
        assert_eq!(json["rows"].as_array().unwrap().len(), 3);
    }
}
