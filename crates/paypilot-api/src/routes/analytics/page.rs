//! Analytics page rendering - Full page endpoints

use std::sync::Arc;

use crate::routes::analytics::api::render_content;
use crate::{page_response, require_login, AppState};
use axum::response::{Html, IntoResponse, Response};
use paypilot_core::AnalyticsController;

/// Mounts a fresh analytics view and starts loading it
pub async fn page_analytics(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> Response {
    let (visitor, context) = match require_login(&state, &headers).await {
        Ok(found) => found,
        Err(redirect) => return redirect,
    };

    let controller = Arc::new(AnalyticsController::new(state.source.clone()));
    visitor.session.lock().await.analytics = Some(controller.clone());
    controller.start_load().await;

    let inner_content = format!(
        r#"<div class='space-y-10'>
    <div class='flex justify-end border-b border-gray-200/80 pb-6 dark:border-gray-800/80'>
        <h1 class='text-xs font-medium tracking-tight'>Analytics Overview</h1>
    </div>
    {}
</div>"#,
        render_content(&controller.view().await)
    );

    Html(page_response(&headers, "Analytics", "/dashboard/analytics", &context, &inner_content)).into_response()
}
