//! Shared data models for the SmartShelf storefront API.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub type ProductId = i64;
pub type StoreId = i64;
pub type OrderId = i64;
pub type RegionId = i64;

/// Loosely-typed JSON record, used where the backend shape varies by role.
pub type JsonRecord = serde_json::Map<String, serde_json::Value>;

/// Serde adapter writing money as a JSON number, the way the backend and the
/// web storefront's stored carts expect it.
///
/// Whole amounts (the backend's cents) are written as integers. Reading
/// accepts numbers or decimal strings.
pub mod money {
    use rust_decimal::prelude::ToPrimitive;
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        if value.fract().is_zero() {
            if let Some(whole) = value.to_i64() {
                return serializer.serialize_i64(whole);
            }
        }
        match value.to_f64() {
            Some(float) => serializer.serialize_f64(float),
            None => serializer.collect_str(value),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        <Decimal as Deserialize>::deserialize(deserializer)
    }
}

// --- Identity ---

/// Role claim issued by the backend at login.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Customer,
    Sales,
    Manager,
    Region,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Customer => "customer",
            Role::Sales => "sales",
            Role::Manager => "manager",
            Role::Region => "region",
            Role::Other(other) => other,
        }
    }

    /// Employees see customer names on orders; customers only see their own.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Sales | Role::Manager | Role::Region)
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        match value {
            "customer" => Role::Customer,
            "sales" => Role::Sales,
            "manager" => Role::Manager,
            "region" => Role::Region,
            other => Role::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated form of the user record returned by `/auth/login`.
///
/// Employee and customer ids are only present for the matching role.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountUser {
    pub online_id: i64,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<StoreId>,
}

// --- Catalog ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub product_name: String,
    /// Price in the backend's unit (integer cents).
    #[serde(with = "money")]
    pub price: Decimal,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// A list of `{store_id, store_name, stock}` from the catalog listing,
    /// or a map keyed by store id from the detail endpoint.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub stores_inventory: serde_json::Value,
    /// Stock at the store the user picked, filled in by the UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
}

impl Product {
    /// Stock for `store_id` from whichever inventory shape the endpoint sent.
    pub fn stock_at(&self, store_id: StoreId) -> Option<i64> {
        let entry = match &self.stores_inventory {
            serde_json::Value::Array(entries) => entries
                .iter()
                .find(|e| e.get("store_id").and_then(|v| v.as_i64()) == Some(store_id)),
            serde_json::Value::Object(by_store) => by_store.get(&store_id.to_string()),
            _ => None,
        }?;
        entry.get("stock").and_then(|v| v.as_i64())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    #[serde(default)]
    pub region_id: Option<RegionId>,
    #[serde(default)]
    pub manager_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<JsonRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,
}

/// A row of store inventory.
///
/// `/stores/{id}/inventory/{product}` answers a bare `{"stock": 0}` when the
/// store has never carried the product, so every other field is optional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub store_id: Option<StoreId>,
    #[serde(default)]
    pub product_id: Option<ProductId>,
    pub stock: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
}

// --- Orders ---

/// Pickup lifecycle of an order, stored as a small integer by the backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "u8", into = "u8")]
pub enum PickupStatus {
    /// Placed, not yet paid.
    Ordered,
    /// Paid, waiting for pickup.
    Pending,
    Complete,
    Cancelled,
}

impl PickupStatus {
    /// Customers may only cancel before pickup.
    pub fn is_cancellable(self) -> bool {
        matches!(self, PickupStatus::Ordered | PickupStatus::Pending)
    }
}

impl TryFrom<u8> for PickupStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PickupStatus::Ordered),
            1 => Ok(PickupStatus::Pending),
            2 => Ok(PickupStatus::Complete),
            3 => Ok(PickupStatus::Cancelled),
            other => Err(format!("unknown pickup status {other}")),
        }
    }
}

impl From<PickupStatus> for u8 {
    fn from(status: PickupStatus) -> Self {
        match status {
            PickupStatus::Ordered => 0,
            PickupStatus::Pending => 1,
            PickupStatus::Complete => 2,
            PickupStatus::Cancelled => 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: u32,
    #[serde(with = "money")]
    pub sub_price: Decimal,
    #[serde(default)]
    pub product: Option<Product>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderStore {
    pub id: StoreId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: i64,
    pub store_id: StoreId,
    pub sales_id: i64,
    /// `YYYY-MM-DD HH:MM:SS ET`
    #[serde(default)]
    pub order_date: Option<String>,
    #[serde(default)]
    pub pickup_date: Option<String>,
    #[serde(default)]
    pub total_amount: Option<Decimal>,
    pub payment_status: bool,
    pub pickup_status: PickupStatus,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<OrderStore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_address: Option<JsonRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_name: Option<String>,
}

impl Order {
    pub fn ordered_at(&self) -> Option<NaiveDateTime> {
        self.order_date.as_deref().and_then(parse_eastern_timestamp)
    }

    pub fn picked_up_at(&self) -> Option<NaiveDateTime> {
        self.pickup_date.as_deref().and_then(parse_eastern_timestamp)
    }
}

/// Parse the backend's wall-clock Eastern timestamp format.
pub fn parse_eastern_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    let wall = trimmed.strip_suffix("ET").unwrap_or(trimmed).trim_end();
    NaiveDateTime::parse_from_str(wall, "%Y-%m-%d %H:%M:%S").ok()
}

/// One page of `/orders`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderPage {
    pub orders: Vec<Order>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

// --- Stats ---

/// Manager dashboard series. Each row is a loose record of column → value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ManagerStats {
    #[serde(default)]
    pub trend: Vec<JsonRecord>,
    #[serde(default)]
    pub top_products: Vec<JsonRecord>,
    #[serde(default)]
    pub segments: Vec<JsonRecord>,
    #[serde(default)]
    pub categories: Vec<JsonRecord>,
    #[serde(default)]
    pub demographics: Vec<JsonRecord>,
    #[serde(default)]
    pub biz_categories: Vec<JsonRecord>,
    #[serde(default)]
    pub regional_sales: Vec<JsonRecord>,
    #[serde(default)]
    pub whale_data: Vec<JsonRecord>,
    #[serde(default)]
    pub regional_rankings: Vec<JsonRecord>,
    #[serde(default)]
    pub dead_stock: Vec<JsonRecord>,
    #[serde(default)]
    pub sales_efficiency: Vec<JsonRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn product_stock_from_listing_and_detail_shapes() {
        let listed: Product = serde_json::from_value(json!({
            "id": 4, "product_name": "Oat Milk", "price": 499, "kind": "dairy",
            "description": null, "image_url": null,
            "stores_inventory": [
                {"store_id": 1, "store_name": "Downtown", "stock": 12},
                {"store_id": 2, "store_name": "Uptown", "stock": 0}
            ]
        }))
        .unwrap();
        assert_eq!(listed.price, Decimal::new(499, 0));
        assert_eq!(listed.stock_at(1), Some(12));
        assert_eq!(listed.stock_at(2), Some(0));
        assert_eq!(listed.stock_at(3), None);

        let detail: Product = serde_json::from_value(json!({
            "id": 4, "product_name": "Oat Milk", "price": 499,
            "stores_inventory": {"2": {"store_id": 2, "stock": 7}}
        }))
        .unwrap();
        assert_eq!(detail.stock_at(2), Some(7));
    }

    #[test]
    fn order_decodes_status_and_timestamps() {
        let order: Order = serde_json::from_value(json!({
            "id": 10, "customer_id": 3, "store_id": 1, "sales_id": 8,
            "order_date": "2024-11-02 14:05:09 ET", "pickup_date": null,
            "total_amount": 1998, "payment_status": true, "pickup_status": 1,
            "items": [{"id": 1, "order_id": 10, "product_id": 4, "quantity": 2, "sub_price": 998, "product": null}]
        }))
        .unwrap();
        assert_eq!(order.pickup_status, PickupStatus::Pending);
        assert!(order.pickup_status.is_cancellable());
        let at = order.ordered_at().unwrap();
        assert_eq!(at.format("%H:%M").to_string(), "14:05");
        assert_eq!(order.picked_up_at(), None);
        assert_eq!(serde_json::to_value(PickupStatus::Cancelled).unwrap(), json!(3));
    }

    #[test]
    fn unknown_pickup_status_is_rejected() {
        let raw = json!({
            "id": 1, "customer_id": 1, "store_id": 1, "sales_id": 1,
            "payment_status": false, "pickup_status": 9
        });
        assert!(serde_json::from_value::<Order>(raw).is_err());
    }

    #[test]
    fn money_is_written_as_numbers() {
        #[derive(Serialize, Deserialize)]
        struct Price(#[serde(with = "money")] Decimal);

        assert_eq!(serde_json::to_value(Price(Decimal::new(499, 0))).unwrap(), json!(499));
        assert_eq!(serde_json::to_value(Price(Decimal::new(425, 2))).unwrap(), json!(4.25));
        let read: Price = serde_json::from_value(json!("12.50")).unwrap();
        assert_eq!(read.0, Decimal::new(1250, 2));
    }

    #[test]
    fn roles_round_trip_through_strings() {
        assert_eq!(Role::from("manager"), Role::Manager);
        assert!(Role::from("region").is_staff());
        assert!(!Role::from("customer").is_staff());
        assert_eq!(Role::from("auditor").as_str(), "auditor");
    }
}
