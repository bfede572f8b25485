//! Auth form endpoints
//!
//! Endpoints:
//! - htmx_login: Validate credentials and sign in
//! - logout: Tear down the visitor session
//! - toggle_theme: Switch between dark and light theme

use crate::routes::auth::page::{login_card, login_page};
use crate::session::{expired_session_cookie, ViewSession};
use crate::{is_htmx_request, redirect, with_header, AppState};
use axum::http::{header, HeaderName, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Sign in; validation errors re-render the form
///
/// A session is only registered once the credentials pass, so failed
/// attempts from cookieless clients leave nothing behind.
pub async fn htmx_login(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    Form(form): Form<LoginForm>,
) -> Response {
    let existing = state.sessions.lookup(&headers).await;
    let outcome = match &existing {
        Some(visitor) => {
            let mut session = visitor.session.lock().await;
            let theme = session.context.theme();
            let signed_in = session.context.login(&form.email, &form.password).map(|_| ());
            signed_in.map(|()| None).map_err(|errors| (theme, errors))
        }
        None => {
            let mut session = ViewSession::new(&state.config);
            let theme = session.context.theme();
            let signed_in = session.context.login(&form.email, &form.password).map(|_| ());
            signed_in.map(|()| Some(session)).map_err(|errors| (theme, errors))
        }
    };

    match outcome {
        Ok(fresh) => {
            let visitor = match (existing, fresh) {
                (Some(visitor), _) => visitor,
                (None, Some(session)) => state.sessions.insert(session).await,
                (None, None) => return redirect(&headers, "/dashboard"),
            };
            visitor.attach_cookie(redirect(&headers, "/dashboard"))
        }
        Err((theme, errors)) => {
            log::debug!("Rejected sign in for {:?}", form.email);
            if is_htmx_request(&headers) {
                Html(login_card(&form.email, &errors)).into_response()
            } else {
                Html(login_page(theme, &form.email, &errors)).into_response()
            }
        }
    }
}

/// Sign out and forget everything about the visitor
pub async fn logout(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> Response {
    if let Some(visitor) = state.sessions.lookup(&headers).await {
        visitor.session.lock().await.context.logout();
        state.sessions.remove(&visitor.id).await;
    }
    with_header(redirect(&headers, "/"), header::SET_COOKIE, &expired_session_cookie())
}

/// Toggle the visitor's theme and refresh the page
pub async fn toggle_theme(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> Response {
    let visitor = state.sessions.resolve(&headers, &state.config).await;
    let theme = visitor.session.lock().await.context.toggle_theme();
    log::debug!("Visitor {} switched to {} theme", visitor.id, theme);

    let response = if is_htmx_request(&headers) {
        with_header(StatusCode::OK.into_response(), HeaderName::from_static("hx-refresh"), "true")
    } else {
        redirect(&headers, "/")
    };
    visitor.attach_cookie(response)
}
