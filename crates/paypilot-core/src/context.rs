//! Per-visitor application context: demo authentication and theme

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use paypilot_config::{Config, Theme};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap()
});

/// Signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub email: String,
    /// Local part of the email address
    pub name: String,
}

impl User {
    pub fn from_email(email: &str) -> Self {
        let name = email.split('@').next().unwrap_or(email).to_string();
        Self {
            email: email.to_string(),
            name,
        }
    }

    /// First letter of the name, upper-cased, for the avatar
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    user: Option<User>,
}

impl AuthState {
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Per-field login validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoginErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl LoginErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

/// Check the login form. The email is trimmed before matching.
pub fn validate_credentials(email: &str, password: &str, min_password_length: usize) -> LoginErrors {
    let email = email.trim();
    let email_error = if email.is_empty() {
        Some("Email is required".to_string())
    } else if !EMAIL_RE.is_match(email) {
        Some("Please enter a valid email address".to_string())
    } else {
        None
    };

    let password_error = if password.trim().is_empty() {
        Some("Password is required".to_string())
    } else if password.chars().count() < min_password_length {
        Some(format!("Password must be at least {} characters", min_password_length))
    } else {
        None
    };

    LoginErrors {
        email: email_error,
        password: password_error,
    }
}

/// Auth and theme state of one visitor session
#[derive(Debug, Clone)]
pub struct AppContext {
    auth: AuthState,
    theme: Theme,
    min_password_length: usize,
}

impl AppContext {
    pub fn new(config: &Config) -> Self {
        Self {
            auth: AuthState::default(),
            theme: config.appearance.default_theme,
            min_password_length: config.auth.min_password_length,
        }
    }

    pub fn auth(&self) -> &AuthState {
        &self.auth
    }

    pub fn user(&self) -> Option<&User> {
        self.auth.user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }

    /// Validate and sign in. Any password passing validation is accepted.
    pub fn login(&mut self, email: &str, password: &str) -> Result<&User, LoginErrors> {
        let errors = validate_credentials(email, password, self.min_password_length);
        if !errors.is_empty() {
            return Err(errors);
        }
        let user = User::from_email(email.trim());
        log::info!("User {} signed in", user.email);
        Ok(self.auth.user.insert(user))
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.auth.user.take() {
            log::info!("User {} signed out", user.email);
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> AppContext {
        AppContext::new(&Config::default())
    }

    #[test]
    fn test_required_fields() {
        let errors = validate_credentials("", "", 6);
        assert_eq!(errors.email.as_deref(), Some("Email is required"));
        assert_eq!(errors.password.as_deref(), Some("Password is required"));

        let blank = validate_credentials("ana@paypilot.io", "      ", 6);
        assert_eq!(blank.password.as_deref(), Some("Password is required"));
        assert!(validate_credentials("ana@paypilot.io", " pass word ", 6).is_empty());
    }

    #[test]
    fn test_invalid_email_and_short_password() {
        let errors = validate_credentials("not-an-email", "12345", 6);
        assert_eq!(errors.email.as_deref(), Some("Please enter a valid email address"));
        assert_eq!(errors.password.as_deref(), Some("Password must be at least 6 characters"));

        assert!(validate_credentials("a@b", "123456", 6).email.is_some());
        assert!(validate_credentials("a b@c.io", "123456", 6).email.is_some());
    }

    #[test]
    fn test_valid_credentials() {
        assert!(validate_credentials("  ana@paypilot.io ", "secret", 6).is_empty());
    }

    #[test]
    fn test_login_sets_user_from_email() {
        let mut ctx = context();
        assert!(!ctx.is_authenticated());

        let user = ctx.login(" sarah.chen@flowbase.io", "hunter22").unwrap().clone();
        assert_eq!(user.email, "sarah.chen@flowbase.io");
        assert_eq!(user.name, "sarah.chen");
        assert_eq!(user.initial(), "S");
        assert!(ctx.is_authenticated());

        ctx.logout();
        assert!(ctx.user().is_none());
    }

    #[test]
    fn test_failed_login_keeps_state() {
        let mut ctx = context();
        let errors = ctx.login("bad", "x").unwrap_err();
        assert!(errors.email.is_some());
        assert!(!ctx.is_authenticated());
    }

    #[test]
    fn test_theme_toggle() {
        let mut ctx = context();
        assert_eq!(ctx.theme(), Theme::Dark);
        assert_eq!(ctx.toggle_theme(), Theme::Light);
        assert_eq!(ctx.toggle_theme(), Theme::Dark);
    }
}
