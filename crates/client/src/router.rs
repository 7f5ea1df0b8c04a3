//! Application routing: route table, navigation guard and navigators.

use std::sync::{Arc, Mutex};

use smartshelf_shared::{keys, ProductId};

use crate::storage::{SharedStorage, Storage};

/// Query parameter carrying the path a guarded navigation was headed to.
pub const REDIRECT_PARAM: &str = "redirect";

/// Dashboard tabs under `/home`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DashboardTab {
    Orders,
    Profile,
    Customers,
    Employees,
    Inventory,
    Stores,
    Stats,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 7] = [
        DashboardTab::Orders,
        DashboardTab::Profile,
        DashboardTab::Customers,
        DashboardTab::Employees,
        DashboardTab::Inventory,
        DashboardTab::Stores,
        DashboardTab::Stats,
    ];

    /// URL segment after `/home/`.
    pub fn segment(self) -> &'static str {
        match self {
            DashboardTab::Orders => "orders",
            DashboardTab::Profile => "profile",
            DashboardTab::Customers => "customers",
            DashboardTab::Employees => "employees",
            DashboardTab::Inventory => "inventory",
            DashboardTab::Stores => "stores",
            DashboardTab::Stats => "stats",
        }
    }

    /// Panel key the dashboard view switches on. Employees render the sales panel.
    pub fn panel(self) -> &'static str {
        match self {
            DashboardTab::Employees => "sales",
            other => other.segment(),
        }
    }

    fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.segment() == segment)
    }
}

// Router configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    ProductDetail { id: ProductId },
    Login,
    Register,
    Checkout,
    /// Bare `/home`, which always forwards to the orders tab.
    DashboardRoot,
    Dashboard { tab: DashboardTab },
    NotFound { path: String },
}

impl Route {
    /// Match a path (no query string) against the route table.
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();
        match segments.as_slice() {
            [] => Route::Home,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["checkout"] => Route::Checkout,
            ["home"] => Route::DashboardRoot,
            ["product", id] => match id.parse() {
                Ok(id) => Route::ProductDetail { id },
                Err(_) => Route::NotFound { path: path.to_string() },
            },
            ["home", tab] => match DashboardTab::from_segment(tab) {
                Some(tab) => Route::Dashboard { tab },
                None => Route::NotFound { path: path.to_string() },
            },
            _ => Route::NotFound { path: path.to_string() },
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::ProductDetail { id } => format!("/product/{id}"),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Checkout => "/checkout".to_string(),
            Route::DashboardRoot => "/home".to_string(),
            Route::Dashboard { tab } => format!("/home/{}", tab.segment()),
            Route::NotFound { path } => path.clone(),
        }
    }

    pub fn requires_auth(&self) -> bool {
        matches!(self, Route::Checkout | Route::DashboardRoot | Route::Dashboard { .. })
    }

    /// Screens that make no sense once signed in.
    pub fn is_auth_screen(&self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }

    /// Static redirect declared on the route itself.
    pub fn redirect(&self) -> Option<Route> {
        match self {
            Route::DashboardRoot => Some(Route::Dashboard { tab: DashboardTab::Orders }),
            _ => None,
        }
    }
}

/// A navigation target: a path plus its raw query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub query: Option<String>,
}

impl Location {
    pub fn parse(full_path: &str) -> Self {
        match full_path.split_once('?') {
            Some((path, query)) => Self {
                path: normalize_path(path),
                query: Some(query.to_string()).filter(|q| !q.is_empty()),
            },
            None => Self { path: normalize_path(full_path), query: None },
        }
    }

    pub fn full_path(&self) -> String {
        match &self.query {
            Some(query) => format!("{}?{}", self.path, query),
            None => self.path.clone(),
        }
    }

    pub fn route(&self) -> Route {
        Route::parse(&self.path)
    }

    /// Decoded value of a query parameter.
    pub fn query_param(&self, name: &str) -> Option<String> {
        let query = self.query.as_deref()?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

/// True when `target` stays on this origin once the browser resolves it.
///
/// Rejects protocol-relative (`//host`) and backslash forms that browsers
/// treat as another host.
pub fn is_local_path(target: &str) -> bool {
    if !target.starts_with('/') || target.contains('\\') {
        return false;
    }
    let Ok(base) = url::Url::parse("http://localhost/") else {
        return false;
    };
    base.join(target).is_ok_and(|joined| joined.origin() == base.origin())
}

fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// Outcome of running the guard on a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Allow(String),
    Redirect(String),
}

impl Navigation {
    pub fn path(&self) -> &str {
        match self {
            Navigation::Allow(path) | Navigation::Redirect(path) => path,
        }
    }
}

/// Pure guard decision.
///
/// Only token presence is checked; an expired token passes until an API call
/// comes back 401.
pub fn guard(target: &Location, has_token: bool, login_path: &str, landing_path: &str) -> Navigation {
    let route = target.route();

    if route.requires_auth() && !has_token {
        let return_to = urlencoding::encode(&target.full_path()).into_owned();
        return Navigation::Redirect(format!("{login_path}?{REDIRECT_PARAM}={return_to}"));
    }

    if has_token && route.is_auth_screen() {
        return Navigation::Redirect(landing_path.to_string());
    }

    Navigation::Allow(target.full_path())
}

/// Guard bound to persistent storage.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    storage: SharedStorage,
    login_path: String,
    landing_path: String,
}

impl RouteGuard {
    pub fn new(storage: SharedStorage, login_path: impl Into<String>, landing_path: impl Into<String>) -> Self {
        Self {
            storage,
            login_path: login_path.into(),
            landing_path: landing_path.into(),
        }
    }

    pub fn check(&self, target: &Location) -> Navigation {
        let has_token = match self.storage.get_item(keys::TOKEN) {
            Ok(token) => token.is_some_and(|t| !t.is_empty()),
            Err(e) => {
                crate::log_warn!("could not read token: {e}");
                false
            }
        };
        guard(target, has_token, &self.login_path, &self.landing_path)
    }
}

/// Moves the user between screens.
pub trait Navigator: Send + Sync + std::fmt::Debug {
    /// Current path including its query string.
    fn current_location(&self) -> String;

    /// Go to `full_path`, replacing the current location.
    fn navigate(&self, full_path: &str);

    /// Current path, without query string.
    fn current_path(&self) -> String {
        Location::parse(&self.current_location()).path
    }
}

/// In-memory history; the navigator for native builds and tests.
#[derive(Debug)]
pub struct HistoryNavigator {
    entries: Mutex<Vec<String>>,
}

impl HistoryNavigator {
    pub fn new(start: impl Into<String>) -> Self {
        Self { entries: Mutex::new(vec![start.into()]) }
    }

    /// Every location visited, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl Default for HistoryNavigator {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for HistoryNavigator {
    fn current_location(&self) -> String {
        self.entries
            .lock()
            .ok()
            .and_then(|e| e.last().cloned())
            .unwrap_or_else(|| "/".to_string())
    }

    fn navigate(&self, full_path: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(full_path.to_string());
        }
    }
}

/// `window.location`-backed navigator.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserNavigator;

#[cfg(target_arch = "wasm32")]
impl Navigator for BrowserNavigator {
    fn current_location(&self) -> String {
        let Some(location) = web_sys::window().map(|w| w.location()) else {
            return "/".to_string();
        };
        let path = location.pathname().unwrap_or_else(|_| "/".to_string());
        let search = location.search().unwrap_or_default();
        format!("{path}{search}")
    }

    fn navigate(&self, full_path: &str) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(full_path) {
                crate::log_error!("navigation to {full_path} failed: {e:?}");
            }
        }
    }
}

/// Resolves targets, applies the guard and drives a [`Navigator`].
#[derive(Debug, Clone)]
pub struct Router {
    guard: RouteGuard,
    navigator: Arc<dyn Navigator>,
}

impl Router {
    /// Guard redirects can chain (`/home` → `/home/orders` → login); cap them.
    const MAX_REDIRECTS: usize = 4;

    pub fn new(guard: RouteGuard, navigator: Arc<dyn Navigator>) -> Self {
        Self { guard, navigator }
    }

    /// Final destination for `full_path`, without navigating.
    pub fn resolve(&self, full_path: &str) -> Navigation {
        let mut target = Location::parse(full_path);
        let mut redirected = false;

        for _ in 0..Self::MAX_REDIRECTS {
            if let Some(next) = target.route().redirect() {
                target = Location { path: next.path(), query: target.query.clone() };
                redirected = true;
            }
            match self.guard.check(&target) {
                Navigation::Allow(path) if redirected => return Navigation::Redirect(path),
                Navigation::Allow(path) => return Navigation::Allow(path),
                Navigation::Redirect(next) => {
                    target = Location::parse(&next);
                    redirected = true;
                }
            }
        }

        crate::log_warn!("redirect limit reached resolving {full_path}");
        Navigation::Redirect(target.full_path())
    }

    /// Resolve and move to the final destination.
    pub fn navigate(&self, full_path: &str) -> Navigation {
        let outcome = self.resolve(full_path);
        if let Navigation::Redirect(to) = &outcome {
            crate::log_debug!("navigation to {full_path} redirected to {to}");
        }
        self.navigator.navigate(outcome.path());
        outcome
    }

    pub fn current_route(&self) -> Route {
        Route::parse(&self.navigator.current_path())
    }
}
