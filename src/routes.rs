//! Route table and navigation guard.
//!
//! Screens are addressed by path like a client-side router. Before every
//! transition the guard checks the target's `requires_auth` flag against
//! the session store: a protected route with no token present redirects
//! to the login route. The guard is a pure presence check; it never
//! consults the server and never errors.

use std::sync::Arc;

use tracing::debug;

use crate::auth::SessionStore;

pub const LOGIN_PATH: &str = "/login";
pub const DEFAULT_PATH: &str = "/";

/// Which screen a route renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Dashboard,
}

/// Static description of one route. Not mutated at runtime.
#[derive(Debug)]
pub struct Route {
    pub path: &'static str,
    pub screen: Screen,
    pub requires_auth: bool,
}

/// The application's route table.
pub const ROUTES: &[Route] = &[
    Route {
        path: LOGIN_PATH,
        screen: Screen::Login,
        requires_auth: false,
    },
    Route {
        path: DEFAULT_PATH,
        screen: Screen::Dashboard,
        requires_auth: true,
    },
];

/// Outcome of a guard evaluation for one navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    RedirectToLogin,
}

/// Evaluate the guard for a target route against the current store state.
/// "Token present but expired" and "never logged in" are the same here;
/// only the server can tell them apart.
pub fn check(route: &Route, store: &SessionStore) -> GuardDecision {
    if route.requires_auth && !store.is_authenticated() {
        GuardDecision::RedirectToLogin
    } else {
        GuardDecision::Proceed
    }
}

/// Tracks the current route and applies the guard on every transition.
pub struct Router {
    store: Arc<SessionStore>,
    current: &'static Route,
}

impl Router {
    /// Start at the default route, subject to the guard.
    pub fn new(store: Arc<SessionStore>) -> Self {
        let mut router = Self {
            store,
            current: resolve(LOGIN_PATH),
        };
        router.navigate(DEFAULT_PATH);
        router
    }

    pub fn current(&self) -> &'static Route {
        self.current
    }

    /// Attempt a transition to `path`. On a redirect the current route
    /// becomes the login route instead of the target.
    pub fn navigate(&mut self, path: &str) -> GuardDecision {
        let target = resolve(path);
        let decision = check(target, &self.store);
        self.current = match decision {
            GuardDecision::Proceed => target,
            GuardDecision::RedirectToLogin => {
                debug!(path = target.path, "Redirecting to login");
                resolve(LOGIN_PATH)
            }
        };
        decision
    }
}

/// Look up a route by path; unknown paths fall back to the default route.
fn resolve(path: &str) -> &'static Route {
    ROUTES
        .iter()
        .find(|r| r.path == path)
        .unwrap_or_else(|| resolve(DEFAULT_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> Arc<SessionStore> {
        Arc::new(SessionStore::new(dir.path().to_path_buf()))
    }

    #[test]
    fn test_protected_route_redirects_without_token() {
        let dir = TempDir::new().unwrap();
        let mut router = Router::new(store_in(&dir));

        assert_eq!(router.navigate(DEFAULT_PATH), GuardDecision::RedirectToLogin);
        assert_eq!(router.current().screen, Screen::Login);
    }

    #[test]
    fn test_protected_route_proceeds_with_token() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set("abc123").unwrap();
        let mut router = Router::new(Arc::clone(&store));

        assert_eq!(router.navigate(DEFAULT_PATH), GuardDecision::Proceed);
        assert_eq!(router.current().screen, Screen::Dashboard);
    }

    #[test]
    fn test_open_route_proceeds_regardless_of_store() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut router = Router::new(Arc::clone(&store));

        assert_eq!(router.navigate(LOGIN_PATH), GuardDecision::Proceed);
        store.set("abc123").unwrap();
        assert_eq!(router.navigate(LOGIN_PATH), GuardDecision::Proceed);
    }

    #[test]
    fn test_guard_reads_store_at_navigation_time() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut router = Router::new(Arc::clone(&store));

        assert_eq!(router.navigate(DEFAULT_PATH), GuardDecision::RedirectToLogin);
        store.set("abc123").unwrap();
        assert_eq!(router.navigate(DEFAULT_PATH), GuardDecision::Proceed);
        store.clear().unwrap();
        assert_eq!(router.navigate(DEFAULT_PATH), GuardDecision::RedirectToLogin);
    }

    #[test]
    fn test_new_router_starts_at_login_when_unauthenticated() {
        let dir = TempDir::new().unwrap();
        let router = Router::new(store_in(&dir));
        assert_eq!(router.current().screen, Screen::Login);
    }

    #[test]
    fn test_new_router_starts_at_dashboard_when_authenticated() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set("abc123").unwrap();
        let router = Router::new(store);
        assert_eq!(router.current().screen, Screen::Dashboard);
    }

    #[test]
    fn test_unknown_path_resolves_to_default_route() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set("abc123").unwrap();
        let mut router = Router::new(Arc::clone(&store));

        assert_eq!(router.navigate("/no-such-route"), GuardDecision::Proceed);
        assert_eq!(router.current().path, DEFAULT_PATH);
    }
}
