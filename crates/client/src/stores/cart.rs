//! Shopping cart store.
//!
//! Lines are keyed by `(product, store)`: the same product bought at two
//! stores is two lines. Name, price and image are snapshotted when the line
//! is created, so later catalog changes never alter an existing line. Every
//! change is written straight to storage; a failed write is logged and the
//! in-memory change stands.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smartshelf_shared::{keys, CreateOrderRequest, OrderLineRequest, Product, ProductId, Store, StoreId};

use crate::storage::{self, SharedStorage};
use crate::{log_debug, log_error, log_warn};

/// One cart line.
///
/// Field names on the wire match what the web storefront has always written,
/// so existing carts keep loading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    #[serde(rename = "id")]
    pub product_id: ProductId,
    pub store_id: StoreId,
    pub product_name: String,
    #[serde(with = "smartshelf_shared::money")]
    pub price: Decimal,
    #[serde(default)]
    pub image_url: Option<String>,
    pub quantity: u32,
    pub store_name: String,
    /// Stock seen when the line was last refreshed; a UI hint, not enforced.
    #[serde(default)]
    pub stock: Option<i64>,
}

impl CartItem {
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    /// True when the recorded stock cannot cover the quantity.
    pub fn exceeds_stock(&self) -> bool {
        self.stock.is_some_and(|stock| i64::from(self.quantity) > stock)
    }

    fn is(&self, product_id: ProductId, store_id: StoreId) -> bool {
        self.product_id == product_id && self.store_id == store_id
    }
}

/// Cart lines of one store, in cart order.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreGroup<'a> {
    pub store_id: StoreId,
    pub store_name: &'a str,
    pub items: Vec<&'a CartItem>,
}

impl StoreGroup<'_> {
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(|item| item.line_total()).sum()
    }
}

#[derive(Debug)]
pub struct CartStore {
    storage: SharedStorage,
    items: Vec<CartItem>,
}

impl CartStore {
    /// Empty cart that persists to `storage`. Nothing is read.
    pub fn new(storage: SharedStorage) -> Self {
        Self { storage, items: Vec::new() }
    }

    /// Cart restored from storage; unreadable data yields an empty cart.
    pub fn load(storage: SharedStorage) -> Self {
        let items = match storage::load_json::<Vec<CartItem>>(storage.as_ref(), keys::CART) {
            Ok(Some(items)) => items,
            Ok(None) => Vec::new(),
            Err(e) => {
                log_error!("Failed to load cart from storage: {e}");
                Vec::new()
            }
        };
        let mut cart = Self { storage, items: Vec::new() };
        let loaded = items.len();
        for item in items {
            cart.absorb(item);
        }
        if cart.items.len() != loaded {
            log_warn!("merged {} duplicate or empty cart lines", loaded - cart.items.len());
        }
        cart
    }

    /// Fold a stored line in, keeping `(product, store)` unique.
    fn absorb(&mut self, item: CartItem) {
        if item.quantity == 0 {
            return;
        }
        match self.find_mut(item.product_id, item.store_id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(item.quantity),
            None => self.items.push(item),
        }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, product_id: ProductId, store_id: StoreId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.is(product_id, store_id))
    }

    fn find_mut(&mut self, product_id: ProductId, store_id: StoreId) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| item.is(product_id, store_id))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of price × quantity.
    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Lines grouped by store, stores in first-seen order.
    pub fn items_by_store(&self) -> Vec<StoreGroup<'_>> {
        let mut groups: Vec<StoreGroup<'_>> = Vec::new();
        for item in &self.items {
            match groups.iter_mut().find(|g| g.store_id == item.store_id) {
                Some(group) => group.items.push(item),
                None => groups.push(StoreGroup {
                    store_id: item.store_id,
                    store_name: &item.store_name,
                    items: vec![item],
                }),
            }
        }
        groups
    }

    /// Lines asking for more than their recorded stock.
    pub fn over_stock_items(&self) -> Vec<&CartItem> {
        self.items.iter().filter(|item| item.exceeds_stock()).collect()
    }

    /// One order per store, as checkout submits them.
    pub fn order_requests(&self) -> Vec<CreateOrderRequest> {
        self.items_by_store()
            .into_iter()
            .map(|group| CreateOrderRequest {
                store_id: group.store_id,
                items: group
                    .items
                    .into_iter()
                    .map(|item| OrderLineRequest {
                        product_id: item.product_id,
                        quantity: item.quantity,
                        price: item.price,
                    })
                    .collect(),
            })
            .collect()
    }

    /// Add `quantity` of `product` bought at `store`.
    ///
    /// An existing line grows by `quantity`; stock is not checked here.
    pub fn add_to_cart(&mut self, product: &Product, store: &Store, quantity: u32) {
        if quantity == 0 {
            log_debug!("ignoring add of zero {} at store {}", product.id, store.id);
            return;
        }

        match self.find_mut(product.id, store.id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(quantity),
            None => self.items.push(CartItem {
                product_id: product.id,
                store_id: store.id,
                product_name: product.product_name.clone(),
                price: product.price,
                image_url: product.image_url.clone(),
                quantity,
                store_name: store.name.clone(),
                stock: product.stock,
            }),
        }
        self.persist();
    }

    pub fn remove_from_cart(&mut self, product_id: ProductId, store_id: StoreId) {
        let Some(index) = self.items.iter().position(|item| item.is(product_id, store_id)) else {
            return;
        };
        self.items.remove(index);
        self.persist();
    }

    /// Set a line's quantity; zero or below removes the line.
    pub fn update_quantity(&mut self, product_id: ProductId, store_id: StoreId, quantity: i64) {
        if quantity <= 0 {
            self.remove_from_cart(product_id, store_id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let Some(item) = self.find_mut(product_id, store_id) else {
            return;
        };
        if item.quantity != quantity {
            item.quantity = quantity;
            self.persist();
        }
    }

    /// Refresh the stock hint of a line.
    pub fn update_item_stock(&mut self, product_id: ProductId, store_id: StoreId, stock: Option<i64>) {
        let Some(item) = self.find_mut(product_id, store_id) else {
            return;
        };
        if item.stock != stock {
            item.stock = stock;
            self.persist();
        }
    }

    pub fn clear_cart(&mut self) {
        self.items.clear();
        if let Err(e) = self.storage.remove_item(keys::CART) {
            log_error!("Failed to clear cart from storage: {e}");
        }
    }

    fn persist(&self) {
        if let Err(e) = storage::save_json(self.storage.as_ref(), keys::CART, &self.items) {
            log_error!("Failed to save cart to storage: {e}");
        }
    }
}
