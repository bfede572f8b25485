//! Transactions API endpoints - JSON API and HTMX partial responses
//!
//! Endpoints:
//! - api_transactions: One page of transactions (JSON)
//! - htmx_transactions_list: Current list state (HTML fragment)
//! - htmx_transactions_search: Debounced search input
//! - htmx_transactions_status: Status selector
//! - htmx_transactions_page_size: Rows per page selector
//! - htmx_transactions_page: Page navigation
//! - htmx_transactions_clear: Reset search, status and page
//! - htmx_transactions_retry: Reload after a failure

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::routes::transactions::page::{new_controller, render_filters, render_list};
use crate::session::Visitor;
use crate::{require_login, ApiError, AppState};
use axum::extract::Query;
use axum::response::{Html, IntoResponse, Response};
use axum::{Form, Json};
use paypilot_core::pipeline::derive_view;
use paypilot_core::{check_transactions, PageSize, SearchQuery, StatusFilter, TransactionsController, TransactionsPage};
use serde::Deserialize;

/// Slack on top of the debounce window before a search reply gives up waiting
const SEARCH_GRACE: Duration = Duration::from_millis(250);

#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct StatusForm {
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageSizeForm {
    #[serde(default)]
    pub page_size: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageForm {
    pub page: Option<String>,
    pub direction: Option<String>,
}

/// Filtered, paginated transactions (JSON API)
///
/// Query parameters are coerced the same way the table controls are:
/// unknown status means all, page sizes snap to the nearest option and
/// pages are clamped into range.
pub async fn api_transactions(
    state: axum::extract::State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<TransactionsPage>, ApiError> {
    let source = state.source.fetch_transactions().await?;
    check_transactions(&source)?;

    let query = SearchQuery::commit(params.get("q").map(String::as_str).unwrap_or(""));
    let status = params
        .get("status")
        .map(|s| StatusFilter::parse_lenient(s))
        .unwrap_or_default();
    let page_size = params
        .get("page_size")
        .map(|s| PageSize::parse_lenient(s))
        .unwrap_or_default();
    let page = params
        .get("page")
        .and_then(|p| p.trim().parse::<usize>().ok())
        .unwrap_or(1);

    Ok(Json(derive_view(&source, &query, status, page_size, page)))
}

/// HTMX: Current list state
pub async fn htmx_transactions_list(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> Response {
    match controller_for(&state, &headers).await {
        Ok(controller) => render(&controller).await,
        Err(redirect) => redirect,
    }
}

/// HTMX: Search keystroke; replies once this input has settled
pub async fn htmx_transactions_search(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    Form(form): Form<SearchForm>,
) -> Response {
    let controller = match controller_for(&state, &headers).await {
        Ok(controller) => controller,
        Err(redirect) => return redirect,
    };
    let ticket = controller.input_search(form.q).await;
    if !controller.wait_for_search(ticket, state.config.debounce() + SEARCH_GRACE).await {
        log::warn!("Search input did not settle in time");
    }
    render(&controller).await
}

/// HTMX: Status selector changed
pub async fn htmx_transactions_status(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    Form(form): Form<StatusForm>,
) -> Response {
    let controller = match controller_for(&state, &headers).await {
        Ok(controller) => controller,
        Err(redirect) => return redirect,
    };
    controller.set_status(StatusFilter::parse_lenient(&form.status)).await;
    render(&controller).await
}

/// HTMX: Rows per page changed
pub async fn htmx_transactions_page_size(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    Form(form): Form<PageSizeForm>,
) -> Response {
    let controller = match controller_for(&state, &headers).await {
        Ok(controller) => controller,
        Err(redirect) => return redirect,
    };
    controller.set_page_size(PageSize::parse_lenient(&form.page_size)).await;
    render(&controller).await
}

/// HTMX: Jump to a page, or step with `direction=next|previous`
pub async fn htmx_transactions_page(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    Form(form): Form<PageForm>,
) -> Response {
    let controller = match controller_for(&state, &headers).await {
        Ok(controller) => controller,
        Err(redirect) => return redirect,
    };

    match (form.page.as_deref(), form.direction.as_deref()) {
        (Some(page), _) => match page.trim().parse::<usize>() {
            Ok(page) => controller.set_page(page).await,
            Err(_) => log::debug!("Ignoring non-numeric page {:?}", page),
        },
        (None, Some("next")) => controller.next_page().await,
        (None, Some("previous")) => controller.previous_page().await,
        (None, other) => log::debug!("Ignoring page request without target: {:?}", other),
    }
    render(&controller).await
}

/// HTMX: Reset filters; the filter bar is swapped out of band
pub async fn htmx_transactions_clear(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> Response {
    let controller = match controller_for(&state, &headers).await {
        Ok(controller) => controller,
        Err(redirect) => return redirect,
    };
    controller.clear_filters().await;
    let (view, filters) = controller.snapshot().await;
    Html(format!("{}\n{}", render_list(&view, &filters), render_filters(&filters, true))).into_response()
}

/// HTMX: Retry a failed load
pub async fn htmx_transactions_retry(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> Response {
    let controller = match controller_for(&state, &headers).await {
        Ok(controller) => controller,
        Err(redirect) => return redirect,
    };
    controller.start_load().await;
    render(&controller).await
}

async fn render(controller: &TransactionsController) -> Response {
    let (view, filters) = controller.snapshot().await;
    Html(render_list(&view, &filters)).into_response()
}

/// The signed-in visitor's transactions view
async fn controller_for(state: &AppState, headers: &axum::http::HeaderMap) -> Result<Arc<TransactionsController>, Response> {
    let (visitor, _) = require_login(state, headers).await?;
    Ok(mounted_controller(state, &visitor).await)
}

/// Mount a view if a partial arrives before the page did
async fn mounted_controller(state: &AppState, visitor: &Visitor) -> Arc<TransactionsController> {
    let mut session = visitor.session.lock().await;
    if let Some(controller) = &session.transactions {
        return controller.clone();
    }
    let controller = Arc::new(new_controller(state, &visitor.id));
    session.transactions = Some(controller.clone());
    drop(session);
    controller.start_load().await;
    controller
}
