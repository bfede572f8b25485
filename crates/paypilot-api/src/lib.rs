//! HTTP server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::home: Marketing landing page
//! - routes::auth: Login, logout, theme toggle
//! - routes::analytics: Analytics overview and charts
//! - routes::transactions: Transaction table with search, filters, pagination
//! - routes::settings: Configuration display

pub mod charts;
pub mod content;
pub mod error;
pub mod routes;
pub mod session;

use axum::{
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use paypilot_config::Config;
use paypilot_core::{AppContext, SourceRef, Theme};
use paypilot_utils::escape_html;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

pub use error::ApiError;
pub use session::{SessionStore, ViewSession, Visitor};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub source: SourceRef,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, source: SourceRef) -> Self {
        Self {
            sessions: SessionStore::new(config.session_idle_timeout()),
            source,
            config,
        }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::analytics::{api_analytics, htmx_analytics_content, htmx_analytics_retry, page_analytics};
    use routes::auth::{htmx_login, logout, page_login, toggle_theme};
    use routes::home::page_home;
    use routes::settings::api_settings;
    use routes::transactions::{
        api_transactions, htmx_transactions_clear, htmx_transactions_list, htmx_transactions_page,
        htmx_transactions_page_size, htmx_transactions_retry, htmx_transactions_search,
        htmx_transactions_status, page_transactions,
    };

    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_origin(Any);

    let api = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/transactions", get(api_transactions))
        .route("/api/analytics", get(api_analytics))
        .route("/api/settings", get(api_settings))
        .layer(cors);

    Router::new()
        // Public pages
        .route("/", get(page_home))
        .route("/login", get(page_login).post(htmx_login))
        .route("/logout", post(logout))
        .route("/theme", post(toggle_theme))
        // Dashboard pages
        .route("/dashboard", get(page_dashboard))
        .route("/dashboard/analytics", get(page_analytics))
        .route("/dashboard/transactions", get(page_transactions))
        // HTMX partial routes
        .route("/dashboard/analytics/content", get(htmx_analytics_content))
        .route("/dashboard/analytics/retry", post(htmx_analytics_retry))
        .route("/dashboard/transactions/list", get(htmx_transactions_list))
        .route("/dashboard/transactions/search", post(htmx_transactions_search))
        .route("/dashboard/transactions/status", post(htmx_transactions_status))
        .route("/dashboard/transactions/page-size", post(htmx_transactions_page_size))
        .route("/dashboard/transactions/page", post(htmx_transactions_page))
        .route("/dashboard/transactions/clear", post(htmx_transactions_clear))
        .route("/dashboard/transactions/retry", post(htmx_transactions_retry))
        .merge(api)
        .fallback(not_found)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

async fn not_found(uri: axum::http::Uri) -> ApiError {
    ApiError::NotFound {
        resource: uri.path().to_string(),
    }
}

/// The dashboard opens on the analytics view
async fn page_dashboard() -> Redirect {
    Redirect::to("/dashboard/analytics")
}

// ==================== Access ====================

/// Check if request is from HTMX (partial page update)
pub fn is_htmx_request(headers: &HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Redirect that also works for HTMX requests
pub fn redirect(headers: &HeaderMap, location: &str) -> Response {
    if is_htmx_request(headers) {
        let mut response = StatusCode::OK.into_response();
        if let Ok(value) = HeaderValue::from_str(location) {
            response.headers_mut().insert("hx-redirect", value);
        }
        response
    } else {
        Redirect::to(location).into_response()
    }
}

/// Resolve the signed-in visitor, or a redirect to the landing page
pub async fn require_login(state: &AppState, headers: &HeaderMap) -> Result<(Visitor, AppContext), Response> {
    if let Some(visitor) = state.sessions.lookup(headers).await {
        let context = visitor.session.lock().await.context.clone();
        if context.is_authenticated() {
            return Ok((visitor, context));
        }
    }
    log::debug!("Unauthenticated dashboard request, redirecting");
    Err(redirect(headers, "/"))
}

/// Theme of the requesting visitor, or the configured default
pub async fn visitor_theme(state: &AppState, headers: &HeaderMap) -> Theme {
    match state.sessions.lookup(headers).await {
        Some(visitor) => visitor.theme().await,
        None => state.config.appearance.default_theme,
    }
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, theme: Theme, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en" class="{}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - PayPilot</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <script>tailwind.config = {{ darkMode: 'class' }}</script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900 dark:bg-slate-950 dark:text-gray-100">
    {}
</body>
</html>"#,
        theme, escape_html(title), content
    )
}

/// PayPilot wordmark
pub fn brand() -> &'static str {
    "<span class='text-indigo-500'>Pay</span>Pilot"
}

/// Theme toggle button
pub fn theme_toggle(theme: Theme) -> String {
    let (icon, label) = match theme {
        Theme::Dark => ("☀️", "Switch to light mode"),
        Theme::Light => ("🌙", "Switch to dark mode"),
    };
    format!(
        r#"<button hx-post='/theme' hx-swap='none' aria-label='{}' title='{}'
            class='rounded-lg p-2 hover:bg-gray-100 dark:hover:bg-gray-800'>{}</button>"#,
        label, label, icon
    )
}

/// Dashboard navigation sidebar
pub fn nav_sidebar(current_path: &str) -> String {
    let links = [
        ("/dashboard/analytics", "Analytics", "📈"),
        ("/dashboard/transactions", "Transactions", "📋"),
    ];

    let mut nav = format!(
        "<div class='bg-white border-r h-screen flex flex-col dark:bg-gray-900 dark:border-gray-800'><div class='p-4 border-b dark:border-gray-800'><a href='/' class='text-xl font-bold'>{}</a></div><ul class='flex-1 py-2 space-y-1 px-2'>",
        brand()
    );

    for (path, label, icon) in &links {
        let active_class = if current_path.starts_with(path) {
            "bg-indigo-50 text-indigo-600 dark:bg-indigo-500/10 dark:text-indigo-300"
        } else {
            "text-gray-600 hover:bg-gray-50 dark:text-gray-400 dark:hover:bg-gray-800"
        };
        nav.push_str(&format!(
            r#"<li><a href='{}' class='flex items-center gap-2 px-3 py-2 rounded-lg {}'>{}<span>{}</span></a></li>"#,
            path, active_class, icon, label
        ));
    }
    nav.push_str("</ul></div>");
    nav
}

/// Dashboard top bar with user badge, theme toggle and sign out
pub fn top_navbar(title: &str, context: &AppContext) -> String {
    let (name, email, initial) = match context.user() {
        Some(user) => (escape_html(&user.name), escape_html(&user.email), escape_html(&user.initial())),
        None => (String::new(), String::new(), String::new()),
    };
    format!(
        r#"<header class='flex items-center justify-between border-b bg-white px-6 py-3 dark:bg-gray-900 dark:border-gray-800'>
    <h1 class='text-lg font-semibold'>{}</h1>
    <div class='flex items-center gap-4'>
        {}
        <div class='flex items-center gap-2'>
            <div class='flex h-9 w-9 items-center justify-center rounded-full bg-indigo-100 text-indigo-600 font-semibold dark:bg-indigo-500/20 dark:text-indigo-300'>{}</div>
            <div class='hidden sm:block'><p class='text-sm font-medium'>{}</p><p class='text-xs text-gray-500'>{}</p></div>
        </div>
        <form method='post' action='/logout'><button type='submit' class='text-sm text-gray-500 hover:text-gray-900 dark:hover:text-white'>Sign out</button></form>
    </div>
</header>"#,
        escape_html(title),
        theme_toggle(context.theme()),
        initial,
        name,
        email
    )
}

/// Wrap content for full page or HTMX partial
pub fn page_response(headers: &HeaderMap, title: &str, current_path: &str, context: &AppContext, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        // HTMX partial - just the content area
        format!(r#"<main class='flex-1 overflow-auto p-6'>{}</main>"#, inner_content)
    } else {
        base_html(title, context.theme(), &format!(r#"<div class='flex h-screen overflow-hidden'>
    <aside class='w-64 flex-shrink-0'>{}</aside>
    <div class='flex flex-1 flex-col overflow-hidden'>
        {}
        <main class='flex-1 overflow-auto p-6'>{}</main>
    </div>
</div>"#,
            nav_sidebar(current_path), top_navbar(title, context), inner_content))
    }
}

/// Attach a header to a response, ignoring values that are not valid header text
pub fn with_header(mut response: Response, name: header::HeaderName, value: &str) -> Response {
    if let Ok(value) = HeaderValue::from_str(value) {
        response.headers_mut().append(name, value);
    }
    response
}

/// Start the HTTP server
///
/// Binds to the configured address and serves until the process is
/// interrupted.
pub async fn start_server(config: Config, source: SourceRef) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, source);

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting PayPilot server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - / (Landing page)");
    log::info!("  - /login (Sign in)");
    log::info!("  - /dashboard/analytics (Analytics overview)");
    log::info!("  - /dashboard/transactions (Transaction table)");
    log::info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!("Server stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }
}
