//! Visitor sessions keyed by the `paypilot_session` cookie
//!
//! Each visitor gets an [`AppContext`] plus the controllers of the views
//! it currently has mounted. Nothing is persisted.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::Response;
use paypilot_config::Config;
use paypilot_core::{AnalyticsController, AppContext, Theme, TransactionsController};
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;

pub const SESSION_COOKIE: &str = "paypilot_session";

/// State of one visitor
pub struct ViewSession {
    pub context: AppContext,
    pub transactions: Option<Arc<TransactionsController>>,
    pub analytics: Option<Arc<AnalyticsController>>,
}

impl ViewSession {
    pub fn new(config: &Config) -> Self {
        Self {
            context: AppContext::new(config),
            transactions: None,
            analytics: None,
        }
    }

    /// Drop mounted views; their pending timers and loads are cancelled
    pub fn unmount_views(&mut self) {
        self.transactions = None;
        self.analytics = None;
    }
}

pub type SessionRef = Arc<Mutex<ViewSession>>;

/// A resolved visitor: session handle plus whether its cookie must be set
#[derive(Clone)]
pub struct Visitor {
    pub id: String,
    pub session: SessionRef,
    is_new: bool,
}

impl Visitor {
    /// Attach the session cookie to `response` for newly created sessions
    pub fn attach_cookie(&self, mut response: Response) -> Response {
        if self.is_new {
            if let Ok(value) = HeaderValue::from_str(&session_cookie(&self.id)) {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
        }
        response
    }

    pub async fn theme(&self) -> Theme {
        self.session.lock().await.context.theme()
    }
}

struct SessionEntry {
    session: SessionRef,
    last_seen: Instant,
}

/// In-memory session registry
///
/// Sessions untouched for longer than the idle timeout are evicted on
/// the next lookup or insert.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionEntry>>>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_timeout,
        }
    }

    /// Existing live session for the request's cookie, if any
    pub async fn lookup(&self, headers: &HeaderMap) -> Option<Visitor> {
        let id = cookie_value(headers, SESSION_COOKIE)?;
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let expired = now.duration_since(sessions.get(&id)?.last_seen) > self.idle_timeout;
        if expired {
            sessions.remove(&id);
            log::debug!("Visitor session {} expired", id);
            return None;
        }
        let entry = sessions.get_mut(&id)?;
        entry.last_seen = now;
        Some(Visitor {
            id,
            session: entry.session.clone(),
            is_new: false,
        })
    }

    /// Register `session`; its cookie still has to be sent
    pub async fn insert(&self, session: ViewSession) -> Visitor {
        let id = paypilot_utils::generate_id();
        let session = Arc::new(Mutex::new(session));
        let now = Instant::now();

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| now.duration_since(entry.last_seen) <= self.idle_timeout);
        if sessions.len() < before {
            log::debug!("Evicted {} idle visitor sessions", before - sessions.len());
        }
        sessions.insert(
            id.clone(),
            SessionEntry {
                session: session.clone(),
                last_seen: now,
            },
        );
        log::debug!("Created visitor session {}", id);

        Visitor {
            id,
            session,
            is_new: true,
        }
    }

    /// Existing session, or a fresh one
    pub async fn resolve(&self, headers: &HeaderMap, config: &Config) -> Visitor {
        match self.lookup(headers).await {
            Some(visitor) => visitor,
            None => self.insert(ViewSession::new(config)).await,
        }
    }

    /// Tear down a session and everything mounted in it
    pub async fn remove(&self, id: &str) {
        let removed = self.sessions.write().await.remove(id);
        if let Some(entry) = removed {
            entry.session.lock().await.unmount_views();
            log::debug!("Removed visitor session {}", id);
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Value of cookie `name` in the request headers
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

pub fn session_cookie(id: &str) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id)
}

pub fn expired_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_cookie_value() {
        let headers = headers_with_cookie("theme=dark; paypilot_session=abc-123; other=1");
        assert_eq!(cookie_value(&headers, SESSION_COOKIE).as_deref(), Some("abc-123"));
        assert_eq!(cookie_value(&headers, "missing"), None);
        assert_eq!(cookie_value(&HeaderMap::new(), SESSION_COOKIE), None);
    }

    const IDLE: Duration = Duration::from_secs(60);

    #[tokio::test]
    async fn test_resolve_reuses_known_session() {
        let store = SessionStore::new(IDLE);
        let config = Config::default();

        let first = store.resolve(&HeaderMap::new(), &config).await;
        assert!(first.is_new);
        assert_eq!(store.len().await, 1);

        let headers = headers_with_cookie(&format!("{}={}", SESSION_COOKIE, first.id));
        let again = store.resolve(&headers, &config).await;
        assert!(!again.is_new);
        assert_eq!(again.id, first.id);
        assert!(Arc::ptr_eq(&again.session, &first.session));

        store.remove(&first.id).await;
        assert!(store.lookup(&headers).await.is_none());
    }

    #[tokio::test]
    async fn test_unknown_cookie_gets_new_session() {
        let store = SessionStore::new(IDLE);
        let headers = headers_with_cookie("paypilot_session=stale");
        let visitor = store.resolve(&headers, &Config::default()).await;
        assert!(visitor.is_new);
        assert_ne!(visitor.id, "stale");
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_sessions_expire() {
        let store = SessionStore::new(IDLE);
        let config = Config::default();
        let kept = store.insert(ViewSession::new(&config)).await;
        let idle = store.insert(ViewSession::new(&config)).await;
        let kept_headers = headers_with_cookie(&format!("{}={}", SESSION_COOKIE, kept.id));
        let idle_headers = headers_with_cookie(&format!("{}={}", SESSION_COOKIE, idle.id));

        tokio::time::advance(Duration::from_secs(45)).await;
        assert!(store.lookup(&kept_headers).await.is_some());

        tokio::time::advance(Duration::from_secs(30)).await;
        assert!(store.lookup(&idle_headers).await.is_none());
        assert!(store.lookup(&kept_headers).await.is_some());
        assert_eq!(store.len().await, 1);

        tokio::time::advance(Duration::from_secs(61)).await;
        store.insert(ViewSession::new(&config)).await;
        assert_eq!(store.len().await, 1);
    }
}
