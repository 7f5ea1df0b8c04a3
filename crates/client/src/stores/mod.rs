//! Client-side state stores.

pub mod cart;

pub use cart::{CartItem, CartStore, StoreGroup};
