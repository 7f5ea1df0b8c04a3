//! SmartShelf Client - storefront and dashboard client
//!
//! This crate holds the state and plumbing behind the SmartShelf storefront:
//! the HTTP client and resource clients, the session and cart stores, and the
//! navigation guard. Views are expected to own an [`AppContext`].

pub mod logging;

pub mod api;
pub mod api_client;
pub mod config;
pub mod context;
pub mod router;
pub mod session;
pub mod storage;
pub mod stores;

pub use api_client::ApiClient;
pub use config::ClientConfig;
pub use context::AppContext;
pub use router::{Navigation, Navigator, Route, RouteGuard, Router};
pub use session::SessionStore;
pub use storage::{LocalStorage, MemoryStorage, SharedStorage, Storage};
pub use stores::{CartItem, CartStore};
