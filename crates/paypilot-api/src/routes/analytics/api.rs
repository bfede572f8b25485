//! Analytics API endpoints - JSON API and HTMX partial responses
//!
//! Endpoints:
//! - api_analytics: Analytics report (JSON)
//! - htmx_analytics_content: Current analytics view (HTML fragment)
//! - htmx_analytics_retry: Reload after a failure (HTML fragment)

use std::sync::Arc;

use crate::charts::{revenue_area_chart, success_rate_bar_chart};
use crate::session::Visitor;
use crate::{require_login, ApiError, AppState};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use paypilot_core::{AnalyticsController, AnalyticsReport, AnalyticsView};
use paypilot_utils::escape_html;

/// Analytics report straight from the data source (JSON API)
pub async fn api_analytics(state: axum::extract::State<AppState>) -> Result<Json<AnalyticsReport>, ApiError> {
    let report = state.source.fetch_analytics().await?;
    Ok(Json(report))
}

/// HTMX: Current analytics view
pub async fn htmx_analytics_content(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> Response {
    let (visitor, _) = match require_login(&state, &headers).await {
        Ok(found) => found,
        Err(redirect) => return redirect,
    };
    let controller = mounted_controller(&state, &visitor).await;
    Html(render_content(&controller.view().await)).into_response()
}

/// HTMX: Retry a failed load
pub async fn htmx_analytics_retry(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> Response {
    let (visitor, _) = match require_login(&state, &headers).await {
        Ok(found) => found,
        Err(redirect) => return redirect,
    };
    let controller = mounted_controller(&state, &visitor).await;
    controller.start_load().await;
    Html(render_content(&controller.view().await)).into_response()
}

/// The visitor's analytics view, mounting one if a partial arrives first
async fn mounted_controller(state: &AppState, visitor: &Visitor) -> Arc<AnalyticsController> {
    let mut session = visitor.session.lock().await;
    if let Some(controller) = &session.analytics {
        return controller.clone();
    }
    let controller = Arc::new(AnalyticsController::new(state.source.clone()));
    session.analytics = Some(controller.clone());
    drop(session);
    controller.start_load().await;
    controller
}

/// Analytics content area for the given view state
pub fn render_content(view: &AnalyticsView) -> String {
    match view {
        AnalyticsView::Loading => loading_skeleton(),
        AnalyticsView::Failed { message } => format!(
            r#"<div id='analytics-content' class='flex flex-col items-center justify-center rounded-xl border border-slate-200 bg-slate-50 px-6 py-16 dark:border-slate-800 dark:bg-slate-900/30'>
    <div class='mb-4 text-4xl text-red-400'>⚠</div>
    <h3 class='text-lg font-semibold'>Failed to load analytics</h3>
    <p class='mt-2 max-w-sm text-center text-sm text-slate-500'>{}</p>
    <button hx-post='/dashboard/analytics/retry' hx-target='#analytics-content' hx-swap='outerHTML' aria-label='Retry loading analytics'
        class='mt-6 rounded-lg border border-gray-300 px-4 py-2 text-sm font-medium hover:bg-gray-100 dark:border-gray-700 dark:hover:bg-gray-800'>Try again</button>
</div>"#,
            escape_html(message)
        ),
        AnalyticsView::Ready(report) => render_report(report),
    }
}

fn loading_skeleton() -> String {
    let cards: String = (0..4)
        .map(|_| "<div class='h-28 animate-pulse rounded-2xl bg-gray-200 dark:bg-gray-800'></div>")
        .collect();
    format!(
        r#"<div id='analytics-content' data-loading hx-get='/dashboard/analytics/content' hx-trigger='load delay:250ms' hx-swap='outerHTML' class='space-y-10'>
    <div class='grid grid-cols-1 gap-4 sm:grid-cols-2 lg:grid-cols-4'>{}</div>
    <div class='h-72 animate-pulse rounded-2xl bg-gray-200 dark:bg-gray-800'></div>
    <div class='h-72 animate-pulse rounded-2xl bg-gray-200 dark:bg-gray-800'></div>
</div>"#,
        cards
    )
}

fn render_report(report: &AnalyticsReport) -> String {
    let stats: String = report
        .stats
        .iter()
        .map(|stat| {
            let tone = if stat.positive { "text-emerald-500" } else { "text-red-500" };
            format!(
                r#"<div class='rounded-2xl border border-gray-200 bg-white p-6 dark:border-gray-800 dark:bg-gray-900/40'>
    <p class='text-sm text-gray-500'>{}</p>
    <p class='mt-1 text-2xl font-bold'>{}</p>
    <p class='mt-2 text-sm {}'>{}</p>
</div>"#,
                escape_html(&stat.label),
                escape_html(&stat.value),
                tone,
                escape_html(&stat.change)
            )
        })
        .collect();

    format!(
        r#"<div id='analytics-content' class='space-y-10'>
    <div class='grid grid-cols-1 gap-4 sm:grid-cols-2 lg:grid-cols-4'>{}</div>
    <div class='rounded-2xl border border-gray-200 bg-white p-6 text-slate-500 dark:border-gray-800 dark:bg-gray-900/40 dark:text-slate-400'>
        <h2 class='mb-4 text-lg font-medium text-gray-600 dark:text-gray-300'>Revenue Trend</h2>
        {}
    </div>
    <div class='rounded-2xl border border-gray-200 bg-white p-6 text-slate-500 dark:border-gray-800 dark:bg-gray-900/40 dark:text-slate-400'>
        <h2 class='mb-4 text-lg font-medium text-gray-600 dark:text-gray-300'>Success Rate (Last 7 Days)</h2>
        {}
    </div>
</div>"#,
        stats,
        revenue_area_chart(&report.revenue_data),
        success_rate_bar_chart(&report.success_rate_data)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use paypilot_core::AnalyticsStat;

    #[test]
    fn test_loading_view_polls() {
        let html = render_content(&AnalyticsView::Loading);
        assert!(html.contains("data-loading"));
        assert!(html.contains("hx-get='/dashboard/analytics/content'"));
    }

    #[test]
    fn test_failed_view_offers_retry() {
        let html = render_content(&AnalyticsView::Failed { message: "Gateway <timeout>".to_string() });
        assert!(html.contains("Failed to load analytics"));
        assert!(html.contains("Gateway &lt;timeout&gt;"));
        assert!(html.contains("Try again"));
    }

    #[test]
    fn test_ready_view_shows_stats() {
        let report = AnalyticsReport {
            revenue_data: vec![],
            success_rate_data: vec![],
            stats: vec![AnalyticsStat {
                label: "Avg. Order".to_string(),
                value: "$156".to_string(),
                change: "-2.1%".to_string(),
                positive: false,
            }],
        };
        let html = render_content(&AnalyticsView::Ready(report));
        assert!(html.contains("Avg. Order"));
        assert!(html.contains("text-red-500"));
        assert!(!html.contains("data-loading"));
    }
}
