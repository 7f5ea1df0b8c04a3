//! Resource clients: one method per SmartShelf endpoint.
//!
//! Each method fixes the HTTP method and path template and hands the payload
//! to [`crate::ApiClient`]. No retries, caching or client-side validation.

mod auth;
mod orders;
mod products;
mod stats;
mod stores;
