//! Transactions page rendering

use std::sync::Arc;

use crate::{page_response, require_login, AppState};
use axum::response::{Html, IntoResponse, Response};
use paypilot_core::{FilterSnapshot, PageSize, StatusFilter, Transaction, TransactionStatus, TransactionsController, TransactionsPage, TransactionsView};
use paypilot_utils::{escape_html, format_currency, format_timestamp};

/// Skeleton rows shown while the first load is in flight
const SKELETON_ROWS: usize = 10;

/// Mounts a fresh transactions view, replacing any earlier one
pub async fn page_transactions(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> Response {
    let (visitor, context) = match require_login(&state, &headers).await {
        Ok(found) => found,
        Err(redirect) => return redirect,
    };

    let controller = Arc::new(new_controller(&state, &visitor.id));
    visitor.session.lock().await.transactions = Some(controller.clone());
    controller.start_load().await;
    let (view, filters) = controller.snapshot().await;

    let inner_content = format!(
        r#"<div class='space-y-6'>
    <div>
        <h1 class='text-2xl font-bold tracking-tight'>Transactions</h1>
        <p class='mt-1 text-sm text-gray-500'>View and filter all payment transactions</p>
    </div>
    {}
    {}
</div>"#,
        render_filters(&filters, false),
        render_list(&view, &filters)
    );

    Html(page_response(&headers, "Transactions", "/dashboard/transactions", &context, &inner_content)).into_response()
}

/// Controller configured from the app settings
pub fn new_controller(state: &AppState, session_id: &str) -> TransactionsController {
    let page_size = PageSize::from_value(state.config.transactions.default_page_size).unwrap_or_default();
    TransactionsController::new(state.source.clone(), page_size, state.config.debounce()).with_session_id(session_id)
}

/// Search box and status selector
///
/// With `oob` set the bar is marked for an out-of-band swap so a partial
/// response can reset the controls alongside the list.
pub fn render_filters(filters: &FilterSnapshot, oob: bool) -> String {
    let options: String = StatusFilter::OPTIONS
        .iter()
        .map(|status| {
            let selected = if *status == filters.status { " selected" } else { "" };
            format!("<option value='{}'{}>{}</option>", status, selected, status.label())
        })
        .collect();

    format!(
        r#"<div id='transactions-filters'{} class='flex flex-col gap-3 sm:flex-row sm:items-center'>
    <input type='search' name='q' value='{}' placeholder='Search by transaction ID...' aria-label='Search transactions'
        hx-post='/dashboard/transactions/search' hx-trigger='input changed, search' hx-sync='this:replace'
        hx-target='#transactions-list' hx-swap='outerHTML'
        class='w-full rounded-lg border border-gray-300 bg-white px-4 py-2 text-sm sm:max-w-xs dark:border-gray-700 dark:bg-gray-900'>
    <select name='status' aria-label='Filter by status'
        hx-post='/dashboard/transactions/status' hx-trigger='change' hx-target='#transactions-list' hx-swap='outerHTML'
        class='rounded-lg border border-gray-300 bg-white px-3 py-2 text-sm dark:border-gray-700 dark:bg-gray-900'>{}</select>
</div>"#,
        if oob { " hx-swap-oob='true'" } else { "" },
        escape_html(&filters.search_input),
        options
    )
}

/// The transaction list for the given view state
pub fn render_list(view: &TransactionsView, filters: &FilterSnapshot) -> String {
    match view {
        TransactionsView::Loading => loading_skeleton(),
        TransactionsView::Failed { message } => format!(
            r#"<div id='transactions-list' class='flex flex-col items-center justify-center rounded-xl border border-gray-200 bg-white px-6 py-16 dark:border-gray-800 dark:bg-gray-900/40'>
    <div class='mb-4 text-4xl text-red-400'>⚠</div>
    <h3 class='text-lg font-semibold'>Failed to load transactions</h3>
    <p class='mt-2 max-w-sm text-center text-sm text-gray-500'>{}</p>
    <button hx-post='/dashboard/transactions/retry' hx-target='#transactions-list' hx-swap='outerHTML' aria-label='Retry loading transactions'
        class='mt-6 rounded-lg border border-gray-300 px-4 py-2 text-sm font-medium hover:bg-gray-100 dark:border-gray-700 dark:hover:bg-gray-800'>Try again</button>
</div>"#,
            escape_html(message)
        ),
        TransactionsView::Empty { filtered } => {
            let hint = if *filtered {
                "Try adjusting your search or filters to find what you're looking for."
            } else {
                "Transactions will appear here once you start processing payments."
            };
            format!(
                r#"<div id='transactions-list' class='flex flex-col items-center justify-center rounded-xl border border-gray-200 bg-white px-6 py-16 dark:border-gray-800 dark:bg-gray-900/40'>
    <div class='mb-4 text-4xl'>📭</div>
    <h3 class='text-lg font-semibold'>No transactions found</h3>
    <p class='mt-2 max-w-sm text-center text-sm text-gray-500'>{}</p>
    <button hx-post='/dashboard/transactions/clear' hx-target='#transactions-list' hx-swap='outerHTML'
        class='mt-6 rounded-lg border border-gray-300 px-4 py-2 text-sm font-medium hover:bg-gray-100 dark:border-gray-700 dark:hover:bg-gray-800'>Clear filters</button>
</div>"#,
                escape_html(hint)
            )
        }
        TransactionsView::Ready(page) => render_table(page, filters),
    }
}

fn loading_skeleton() -> String {
    let rows: String = (0..SKELETON_ROWS)
        .map(|_| {
            "<tr class='border-b border-gray-100 dark:border-gray-800'>\
             <td class='px-4 py-3'><div class='h-4 w-32 animate-pulse rounded bg-gray-200 dark:bg-gray-800'></div></td>\
             <td class='px-4 py-3'><div class='h-4 w-20 animate-pulse rounded bg-gray-200 dark:bg-gray-800'></div></td>\
             <td class='px-4 py-3'><div class='h-5 w-16 animate-pulse rounded-full bg-gray-200 dark:bg-gray-800'></div></td>\
             <td class='px-4 py-3'><div class='h-4 w-36 animate-pulse rounded bg-gray-200 dark:bg-gray-800'></div></td></tr>"
        })
        .collect();
    format!(
        r#"<div id='transactions-list' data-loading hx-get='/dashboard/transactions/list' hx-trigger='load delay:250ms' hx-swap='outerHTML'
    class='overflow-hidden rounded-xl border border-gray-200 bg-white dark:border-gray-800 dark:bg-gray-900/40'>
    <table class='w-full text-left text-sm'>{}<tbody>{}</tbody></table>
</div>"#,
        table_head(),
        rows
    )
}

fn table_head() -> &'static str {
    "<thead class='bg-gray-50 text-xs uppercase text-gray-500 dark:bg-gray-900'><tr>\
     <th class='px-4 py-3'>Transaction ID</th><th class='px-4 py-3'>Amount</th>\
     <th class='px-4 py-3'>Status</th><th class='px-4 py-3'>Date</th></tr></thead>"
}

fn status_badge(status: TransactionStatus) -> String {
    let tone = match status {
        TransactionStatus::Success => "bg-emerald-100 text-emerald-700 dark:bg-emerald-500/10 dark:text-emerald-400",
        TransactionStatus::Failed => "bg-red-100 text-red-700 dark:bg-red-500/10 dark:text-red-400",
        TransactionStatus::Pending => "bg-amber-100 text-amber-700 dark:bg-amber-500/10 dark:text-amber-400",
    };
    format!(
        "<span class='inline-flex rounded-full px-2.5 py-0.5 text-xs font-medium capitalize {}'>{}</span>",
        tone, status
    )
}

fn render_row(tx: &Transaction) -> String {
    format!(
        r#"<tr class='border-b border-gray-100 hover:bg-gray-50 dark:border-gray-800 dark:hover:bg-gray-800/50'>
    <td class='px-4 py-3 font-mono text-xs'>{}</td>
    <td class='px-4 py-3 font-medium'>{}</td>
    <td class='px-4 py-3'>{}</td>
    <td class='px-4 py-3 text-gray-500'>{}</td>
</tr>"#,
        escape_html(&tx.id),
        format_currency(tx.amount),
        status_badge(tx.status),
        format_timestamp(&tx.timestamp)
    )
}

fn render_table(page: &TransactionsPage, filters: &FilterSnapshot) -> String {
    let rows: String = page.rows.iter().map(render_row).collect();
    format!(
        r#"<div id='transactions-list' class='overflow-hidden rounded-xl border border-gray-200 bg-white dark:border-gray-800 dark:bg-gray-900/40'>
    <table class='w-full text-left text-sm'>{}<tbody>{}</tbody></table>
    {}
</div>"#,
        table_head(),
        rows,
        pagination(page, filters)
    )
}

fn pagination(page: &TransactionsPage, filters: &FilterSnapshot) -> String {
    let sizes: String = PageSize::OPTIONS
        .iter()
        .map(|size| {
            let selected = if *size == page.page_size { " selected" } else { "" };
            format!("<option value='{}'{}>{} per page</option>", size, selected, size)
        })
        .collect();

    let json_link = format!(
        "/api/transactions?q={}&status={}&page={}&page_size={}",
        urlencoding::encode(filters.query.as_str()),
        filters.status,
        page.page,
        page.page_size
    );

    format!(
        r#"<div class='flex flex-col gap-3 border-t border-gray-200 px-4 py-3 text-sm sm:flex-row sm:items-center sm:justify-between dark:border-gray-800'>
    <p class='text-gray-500'>Showing {} to {} of {} results</p>
    <div class='flex items-center gap-3'>
        <select name='page_size' aria-label='Rows per page'
            hx-post='/dashboard/transactions/page-size' hx-trigger='change' hx-target='#transactions-list' hx-swap='outerHTML'
            class='rounded-lg border border-gray-300 bg-white px-2 py-1 text-sm dark:border-gray-700 dark:bg-gray-900'>{}</select>
        {}
        <span class='text-gray-500'>Page {} of {}</span>
        {}
        <a href='{}' target='_blank' class='text-xs text-indigo-500 hover:underline'>View as JSON</a>
    </div>
</div>"#,
        page.first_item(),
        page.last_item(),
        page.total_count,
        sizes,
        page_button("previous", "Previous page", "‹", page.has_previous()),
        page.page,
        page.total_pages,
        page_button("next", "Next page", "›", page.has_next()),
        escape_html(&json_link)
    )
}

fn page_button(direction: &str, label: &str, icon: &str, enabled: bool) -> String {
    format!(
        r#"<button hx-post='/dashboard/transactions/page' hx-vals='{{"direction": "{}"}}' hx-target='#transactions-list' hx-swap='outerHTML'
            aria-label='{}'{} class='rounded-lg border border-gray-300 px-3 py-1 disabled:opacity-40 dark:border-gray-700'>{}</button>"#,
        direction,
        label,
        if enabled { "" } else { " disabled" },
        icon
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use paypilot_core::SearchQuery;
    use rust_decimal::Decimal;

    fn filters() -> FilterSnapshot {
        FilterSnapshot {
            search_input: "Txn 1".to_string(),
            query: SearchQuery::commit("Txn 1"),
            status: StatusFilter::Pending,
            page_size: PageSize::Five,
            page: 2,
        }
    }

    fn ready_page() -> TransactionsPage {
        let ts = Utc.with_ymd_and_hms(2025, 3, 4, 15, 30, 0).unwrap();
        TransactionsPage {
            rows: vec![Transaction::new("txn_010005", Decimal::new(123456, 2), TransactionStatus::Pending, ts)],
            page: 2,
            total_pages: 2,
            total_count: 6,
            page_size: PageSize::Five,
        }
    }

    #[test]
    fn test_filter_bar_reflects_controls() {
        let html = render_filters(&filters(), false);
        assert!(html.contains("value='Txn 1'"));
        assert!(html.contains("<option value='pending' selected>Pending</option>"));
        assert!(!html.contains("hx-swap-oob"));
        assert!(render_filters(&filters(), true).contains("hx-swap-oob='true'"));
    }

    #[test]
    fn test_loading_list_polls() {
        let html = render_list(&TransactionsView::Loading, &filters());
        assert!(html.contains("data-loading"));
        assert_eq!(html.matches("<tr class='border-b").count(), SKELETON_ROWS);
    }

    #[test]
    fn test_empty_list_messages() {
        let filtered = render_list(&TransactionsView::Empty { filtered: true }, &filters());
        assert!(filtered.contains("Try adjusting your search or filters"));
        let unfiltered = render_list(&TransactionsView::Empty { filtered: false }, &filters());
        assert!(unfiltered.contains("once you start processing payments"));
        assert!(unfiltered.contains("Clear filters"));
    }

    #[test]
    fn test_ready_list_renders_rows_and_footer() {
        let html = render_list(&TransactionsView::Ready(ready_page()), &filters());
        assert!(html.contains("txn_010005"));
        assert!(html.contains("$1,234.56"));
        assert!(html.contains("Showing 6 to 6 of 6 results"));
        assert!(html.contains("Page 2 of 2"));
        assert!(html.contains("q=txn%201&amp;status=pending&amp;page=2&amp;page_size=5"));
        assert!(html.contains("<option value='5' selected>5 per page</option>"));
        assert!(!html.contains("data-loading"));
    }

    #[test]
    fn test_failed_list_offers_retry() {
        let html = render_list(&TransactionsView::Failed { message: "Failed to load transactions".to_string() }, &filters());
        assert!(html.contains("Try again"));
        assert!(html.contains("/dashboard/transactions/retry"));
    }
}
