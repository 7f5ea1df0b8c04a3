//! Application context: the single owner of client state.
//!
//! Views receive an `AppContext` instead of reaching for globals. It owns the
//! session and cart stores and hands out the shared API client and router.

use std::sync::Arc;

use smartshelf_shared::{ApiError, LoginRequest, LoginResponse, Order};

use crate::api_client::ApiClient;
use crate::config::ClientConfig;
use crate::router::{self, Location, Navigation, Navigator, RouteGuard, Router, REDIRECT_PARAM};
use crate::session::SessionStore;
use crate::storage::SharedStorage;
use crate::stores::CartStore;
use crate::{log_info, log_warn};

#[derive(Debug)]
pub struct AppContext {
    config: ClientConfig,
    navigator: Arc<dyn Navigator>,
    api: ApiClient,
    router: Router,
    pub session: SessionStore,
    pub cart: CartStore,
}

impl AppContext {
    /// Build the context and restore both stores from `storage`.
    pub fn new(config: ClientConfig, storage: SharedStorage, navigator: Arc<dyn Navigator>) -> Self {
        let api = ApiClient::new(&config, storage.clone(), navigator.clone());
        let guard = RouteGuard::new(storage.clone(), &config.login_path, &config.landing_path);
        let router = Router::new(guard, navigator.clone());

        Self {
            session: SessionStore::load(storage.clone()),
            cart: CartStore::load(storage),
            config,
            navigator,
            api,
            router,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The shared API client
    pub fn client(&self) -> &ApiClient {
        &self.api
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Sign in and store the session.
    pub async fn login(&mut self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let response = self.api.login(credentials).await?;
        self.session.apply_login(response.clone());
        log_info!("signed in as {}", response.role);
        Ok(response)
    }

    /// Where to go after signing in: the guarded page that bounced the user
    /// to login, or the landing page.
    pub fn post_login_destination(&self) -> String {
        let current = Location::parse(&self.navigator.current_location());
        current
            .query_param(REDIRECT_PARAM)
            .filter(|target| router::is_local_path(target))
            .unwrap_or_else(|| self.config.landing_path.clone())
    }

    /// Tell the backend, then forget the session regardless of its answer.
    pub async fn logout(&mut self) {
        if let Err(e) = self.api.logout().await {
            log_warn!("logout request failed: {e}");
        }
        self.session.clear_auth();
        self.router.navigate(&self.config.login_path);
    }

    /// Keep the in-memory session in step with the HTTP client, which has
    /// already wiped storage when the backend rejected the token.
    pub fn handle_api_error(&mut self, err: &ApiError) {
        if err.is_auth_failure() && self.session.is_authenticated() {
            self.session.clear_auth();
        }
    }

    pub fn navigate(&self, full_path: &str) -> Navigation {
        self.router.navigate(full_path)
    }

    /// Place one order per store in the cart.
    ///
    /// Lines of each store are removed as soon as its order is accepted, so a
    /// retry after a partial failure never re-submits a placed order.
    pub async fn checkout(&mut self) -> Result<Vec<Order>, ApiError> {
        let mut placed = Vec::new();
        for request in self.cart.order_requests() {
            let outcome = self.api.create_order(&request).await;
            match outcome {
                Ok(order) => {
                    for line in &request.items {
                        self.cart.remove_from_cart(line.product_id, request.store_id);
                    }
                    placed.push(order);
                }
                Err(e) => {
                    self.handle_api_error(&e);
                    return Err(e);
                }
            }
        }
        if self.cart.is_empty() {
            self.cart.clear_cart();
        }
        Ok(placed)
    }

    /// Refresh every line's stock hint from the store inventory endpoint.
    pub async fn refresh_cart_stock(&mut self) -> Result<(), ApiError> {
        let lines: Vec<_> = self
            .cart
            .items()
            .iter()
            .map(|item| (item.product_id, item.store_id))
            .collect();
        for (product_id, store_id) in lines {
            let outcome = self.api.get_store_inventory(store_id, product_id).await;
            match outcome {
                Ok(record) => self.cart.update_item_stock(product_id, store_id, Some(record.stock)),
                Err(e) => {
                    self.handle_api_error(&e);
                    return Err(e);
                }
            }
        }
        Ok(())
    }
}
