//! Login page rendering

use crate::{base_html, brand, theme_toggle, AppState};
use axum::response::{Html, IntoResponse, Redirect, Response};
use paypilot_config::Theme;
use paypilot_core::LoginErrors;
use paypilot_utils::escape_html;

pub async fn page_login(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> Response {
    let theme = match state.sessions.lookup(&headers).await {
        Some(visitor) => {
            let session = visitor.session.lock().await;
            if session.context.is_authenticated() {
                return Redirect::to("/dashboard").into_response();
            }
            session.context.theme()
        }
        None => state.config.appearance.default_theme,
    };

    Html(login_page(theme, "", &LoginErrors::default())).into_response()
}

/// Full login page
pub fn login_page(theme: Theme, email: &str, errors: &LoginErrors) -> String {
    let content = format!(
        r#"<div class='flex min-h-screen flex-col'>
    <div class='flex items-center justify-between px-6 py-4'>
        <a href='/' class='text-2xl font-semibold tracking-wide'>{}</a>
        {}
    </div>
    <div class='flex flex-1 items-center justify-center px-6'>{}</div>
</div>"#,
        brand(),
        theme_toggle(theme),
        login_card(email, errors)
    );
    base_html("Sign in", theme, &content)
}

fn field_error(error: &Option<String>) -> String {
    match error {
        Some(message) => format!("<p class='mt-1 text-sm text-red-500'>{}</p>", escape_html(message)),
        None => String::new(),
    }
}

fn input_class(error: &Option<String>) -> &'static str {
    if error.is_some() {
        "border-red-500"
    } else {
        "border-gray-300 dark:border-gray-700"
    }
}

/// Login form card; swapped in place on validation errors
pub fn login_card(email: &str, errors: &LoginErrors) -> String {
    format!(
        r#"<div id='login-card' class='w-full max-w-md rounded-2xl border border-gray-200 bg-white p-8 shadow-sm dark:border-gray-800 dark:bg-gray-900/60'>
    <h1 class='text-2xl font-bold'>Welcome back</h1>
    <p class='mt-2 text-sm text-gray-600 dark:text-gray-400'>Sign in to your PayPilot dashboard.</p>
    <form method='post' action='/login' hx-post='/login' hx-target='#login-card' hx-swap='outerHTML' class='mt-8 space-y-5' novalidate>
        <div>
            <label for='email' class='block text-sm font-medium'>Email</label>
            <input id='email' name='email' type='email' value='{}' placeholder='you@company.com'
                class='mt-1 w-full rounded-lg border {} bg-transparent px-3 py-2 focus:outline-none focus:ring-2 focus:ring-indigo-500'>
            {}
        </div>
        <div>
            <label for='password' class='block text-sm font-medium'>Password</label>
            <input id='password' name='password' type='password' placeholder='••••••••'
                class='mt-1 w-full rounded-lg border {} bg-transparent px-3 py-2 focus:outline-none focus:ring-2 focus:ring-indigo-500'>
            {}
        </div>
        <button type='submit' class='w-full rounded-lg bg-indigo-600 px-4 py-2 font-medium text-white hover:bg-indigo-500'>
            Sign in<span class='htmx-indicator ml-2'>…</span>
        </button>
    </form>
</div>"#,
        escape_html(email),
        input_class(&errors.email),
        field_error(&errors.email),
        input_class(&errors.password),
        field_error(&errors.password)
    )
}
