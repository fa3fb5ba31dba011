//! Application state management.
//!
//! `App` owns the session store, the API client, the auth facade and
//! the router, and holds everything the UI renders: the login form,
//! the container/item lists and the status line.

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Local};
use tracing::{error, info, warn};

use crate::api::{ApiClient, ApiError};
use crate::auth::{Auth, SessionStore};
use crate::config::Config;
use crate::models::{Container, Item};
use crate::routes::{Router, Screen, DEFAULT_PATH};

// ============================================================================
// Constants
// ============================================================================

/// Maximum length for username input.
const MAX_USERNAME_LENGTH: usize = 50;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// UI State Types
// ============================================================================

/// Login form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFocus {
    Username,
    Password,
}

#[derive(Debug)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub focus: LoginFocus,
    pub error: Option<String>,
}

impl LoginForm {
    fn new(username: Option<String>) -> Self {
        let username = username.unwrap_or_default();
        let focus = if username.is_empty() {
            LoginFocus::Username
        } else {
            LoginFocus::Password
        };
        Self {
            username,
            password: String::new(),
            focus,
            error: None,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginFocus::Username => LoginFocus::Password,
            LoginFocus::Password => LoginFocus::Username,
        };
    }

    pub fn push_char(&mut self, c: char) {
        match self.focus {
            LoginFocus::Username => {
                if self.username.len() < MAX_USERNAME_LENGTH {
                    self.username.push(c);
                }
            }
            LoginFocus::Password => {
                if self.password.len() < MAX_PASSWORD_LENGTH {
                    self.password.push(c);
                }
            }
        }
    }

    pub fn pop_char(&mut self) {
        match self.focus {
            LoginFocus::Username => {
                self.username.pop();
            }
            LoginFocus::Password => {
                self.password.pop();
            }
        }
    }
}

/// Current dashboard focus area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Containers,
    Items,
}

pub struct App {
    pub config: Config,
    pub store: Arc<SessionStore>,
    pub api: ApiClient,
    pub auth: Auth,
    pub router: Router,

    pub login: LoginForm,
    pub focus: Focus,
    pub containers: Vec<Container>,
    pub items: Vec<Item>,
    pub selected_container: usize,
    pub selected_item: usize,
    pub status: Option<String>,
    pub last_refresh: Option<DateTime<Local>>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, store: Arc<SessionStore>) -> Result<Self> {
        let base_url = config.base_url();
        let api = ApiClient::new(&base_url, Arc::clone(&store))?;
        let auth = Auth::new(&base_url, Arc::clone(&store), api.clone())?;
        let router = Router::new(Arc::clone(&store));
        let login = LoginForm::new(config.last_username.clone());

        Ok(Self {
            config,
            store,
            api,
            auth,
            router,
            login,
            focus: Focus::Containers,
            containers: Vec::new(),
            items: Vec::new(),
            selected_container: 0,
            selected_item: 0,
            status: None,
            last_refresh: None,
            should_quit: false,
        })
    }

    /// Screen currently selected by the router.
    pub fn screen(&self) -> Screen {
        self.router.current().screen
    }

    /// Submit the login form. On success the router lands on the
    /// dashboard and data is loaded; on failure the form shows the
    /// error and the session (if any) is untouched.
    pub async fn submit_login(&mut self) {
        if self.login.username.is_empty() || self.login.password.is_empty() {
            self.login.error = Some("Username and password are required".to_string());
            return;
        }

        let username = self.login.username.clone();
        let password = std::mem::take(&mut self.login.password);

        match self.auth.login(&username, &password).await {
            Ok(()) => {
                self.login.error = None;
                self.config.last_username = Some(username);
                if let Err(e) = self.config.save() {
                    warn!(error = %e, "Failed to save config");
                }
                self.router.navigate(DEFAULT_PATH);
                self.refresh_data().await;
            }
            Err(e) => {
                self.login.error = Some(login_error_message(&e));
            }
        }
    }

    /// Drop the session and return to the login screen.
    pub fn logout(&mut self) {
        if let Err(e) = self.auth.logout() {
            error!(error = %e, "Logout failed");
            self.status = Some(format!("Logout failed: {}", e));
            return;
        }
        self.containers.clear();
        self.items.clear();
        self.selected_container = 0;
        self.selected_item = 0;
        self.last_refresh = None;
        self.login = LoginForm::new(self.config.last_username.clone());
        // Guard redirects to /login now that the store is empty
        self.router.navigate(DEFAULT_PATH);
    }

    /// Reload containers and the selected container's items.
    pub async fn refresh_data(&mut self) {
        match self.api.fetch_containers().await {
            Ok(containers) => {
                self.containers = containers;
                if self.selected_container >= self.containers.len() {
                    self.selected_container = 0;
                }
                self.last_refresh = Some(Local::now());
                self.status = None;
                self.load_selected_items().await;
            }
            Err(e) => self.handle_api_error(e),
        }
    }

    pub async fn load_selected_items(&mut self) {
        let Some(container) = self.containers.get(self.selected_container) else {
            self.items.clear();
            return;
        };
        let container_id = container.id;
        match self.api.fetch_container_items(container_id).await {
            Ok(items) => {
                self.items = items;
                if self.selected_item >= self.items.len() {
                    self.selected_item = 0;
                }
            }
            Err(e) => self.handle_api_error(e),
        }
    }

    /// Toggle done on the selected item via the API, updating in place.
    pub async fn toggle_selected_item_done(&mut self) {
        let Some(item) = self.items.get(self.selected_item) else {
            return;
        };
        let (item_id, done) = (item.id, !item.done);
        match self.api.set_item_done(item_id, done).await {
            Ok(updated) => {
                if let Some(slot) = self.items.iter_mut().find(|i| i.id == item_id) {
                    *slot = updated;
                }
            }
            Err(e) => self.handle_api_error(e),
        }
    }

    /// A 401 on an authenticated call means the server rejected the
    /// stored token; drop it and fall back to the login screen. Other
    /// errors land in the status line.
    fn handle_api_error(&mut self, e: anyhow::Error) {
        if matches!(e.downcast_ref::<ApiError>(), Some(ApiError::Unauthorized)) {
            info!("Stored token rejected by server, logging out");
            self.logout();
            self.login.error = Some("Session expired, please log in again".to_string());
        } else {
            error!(error = %e, "API request failed");
            self.status = Some(format!("Error: {}", e));
        }
    }

    // ===== Dashboard navigation =====

    pub async fn select_next_container(&mut self) {
        if !self.containers.is_empty() {
            self.selected_container = (self.selected_container + 1) % self.containers.len();
            self.selected_item = 0;
            self.load_selected_items().await;
        }
    }

    pub async fn select_prev_container(&mut self) {
        if !self.containers.is_empty() {
            self.selected_container =
                (self.selected_container + self.containers.len() - 1) % self.containers.len();
            self.selected_item = 0;
            self.load_selected_items().await;
        }
    }

    pub fn select_next_item(&mut self) {
        if !self.items.is_empty() {
            self.selected_item = (self.selected_item + 1) % self.items.len();
        }
    }

    pub fn select_prev_item(&mut self) {
        if !self.items.is_empty() {
            self.selected_item = (self.selected_item + self.items.len() - 1) % self.items.len();
        }
    }
}

fn login_error_message(e: &anyhow::Error) -> String {
    match e.downcast_ref::<ApiError>() {
        Some(ApiError::InvalidCredentials(detail)) => detail.clone(),
        Some(ApiError::ServerError { status, .. }) => {
            format!("Server error ({}), try again later", status)
        }
        Some(ApiError::Network(_)) => "Network error - could not reach the server".to_string(),
        _ => format!("Login failed: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn app_against(base_url: &str, dir: &TempDir) -> App {
        let store = Arc::new(SessionStore::new(dir.path().to_path_buf()));
        let config = Config {
            api_base_url: Some(base_url.to_string()),
            last_username: None,
        };
        App::new(config, store).unwrap()
    }

    #[tokio::test]
    async fn test_successful_login_lands_on_dashboard() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/token/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"token": "abc123"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let mut app = app_against(&server.uri(), &dir);
        assert_eq!(app.screen(), Screen::Login);

        app.login.username = "u".to_string();
        app.login.password = "p".to_string();
        app.submit_login().await;

        assert_eq!(app.screen(), Screen::Dashboard);
        assert!(app.login.error.is_none());
        assert_eq!(app.store.get().as_deref(), Some("abc123"));
        // Password is not retained past the attempt
        assert!(app.login.password.is_empty());
    }

    #[tokio::test]
    async fn test_rejected_login_stays_on_login_with_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/token/"))
            .respond_with(ResponseTemplate::new(401).set_body_json(
                serde_json::json!({"detail": "Invalid username or password"}),
            ))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let mut app = app_against(&server.uri(), &dir);
        app.login.username = "bad".to_string();
        app.login.password = "bad".to_string();
        app.submit_login().await;

        assert_eq!(app.screen(), Screen::Login);
        assert_eq!(
            app.login.error.as_deref(),
            Some("Invalid username or password")
        );
        assert_eq!(app.store.get(), None);
    }

    #[tokio::test]
    async fn test_unreachable_server_shows_network_error() {
        let dir = TempDir::new().unwrap();
        let mut app = app_against("http://127.0.0.1:1", &dir);
        app.login.username = "u".to_string();
        app.login.password = "p".to_string();
        app.submit_login().await;

        assert_eq!(
            app.login.error.as_deref(),
            Some("Network error - could not reach the server")
        );
        assert_eq!(app.store.get(), None);
    }

    #[tokio::test]
    async fn test_empty_fields_are_rejected_locally() {
        let dir = TempDir::new().unwrap();
        let mut app = app_against("http://localhost:8000", &dir);
        app.submit_login().await;
        assert!(app.login.error.is_some());
    }

    #[tokio::test]
    async fn test_logout_returns_to_login_screen() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(SessionStore::new(dir.path().to_path_buf()));
        store.set("abc123").unwrap();
        let config = Config::default();
        let mut app = App::new(config, Arc::clone(&store)).unwrap();
        assert_eq!(app.screen(), Screen::Dashboard);

        app.logout();
        assert_eq!(app.screen(), Screen::Login);
        assert_eq!(store.get(), None);
    }

    #[tokio::test]
    async fn test_unauthorized_response_drops_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/containers/"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let store = Arc::new(SessionStore::new(dir.path().to_path_buf()));
        store.set("stale").unwrap();
        let config = Config {
            api_base_url: Some(server.uri()),
            last_username: None,
        };
        let mut app = App::new(config, Arc::clone(&store)).unwrap();

        app.refresh_data().await;
        assert_eq!(app.screen(), Screen::Login);
        assert_eq!(store.get(), None);
        assert!(app.login.error.is_some());
    }

    #[test]
    fn test_login_form_input_limits() {
        let mut form = LoginForm::new(None);
        for _ in 0..200 {
            form.push_char('a');
        }
        assert_eq!(form.username.len(), MAX_USERNAME_LENGTH);

        form.toggle_focus();
        for _ in 0..200 {
            form.push_char('b');
        }
        assert_eq!(form.password.len(), MAX_PASSWORD_LENGTH);
    }
}
