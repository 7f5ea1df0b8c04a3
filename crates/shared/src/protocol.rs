//! Request payloads, query bags and response envelopes for the SmartShelf API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Order, PickupStatus, ProductId, RegionId, StoreId};

/// Default base URL when no environment override is set.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5002/api";

/// Persisted key names, shared with the web storefront.
pub mod keys {
    pub const TOKEN: &str = "token";
    pub const USER: &str = "user";
    pub const USER_ROLE: &str = "userRole";
    pub const CART: &str = "smartshelf_cart";

    /// Keys wiped when the backend rejects the session.
    pub const AUTH: [&str; 3] = [TOKEN, USER, USER_ROLE];
}

// --- Auth ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
    pub email: String,
    pub passwd: String,
}

/// Customer kind at registration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(into = "u8", try_from = "u8")]
pub enum CustomerKind {
    Home,
    Business,
}

impl From<CustomerKind> for u8 {
    fn from(kind: CustomerKind) -> Self {
        match kind {
            CustomerKind::Home => 0,
            CustomerKind::Business => 1,
        }
    }
}

impl TryFrom<u8> for CustomerKind {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CustomerKind::Home),
            1 => Ok(CustomerKind::Business),
            other => Err(format!("unknown customer kind {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegisterRequest {
    pub email: String,
    pub passwd: String,
    pub name: String,
    pub kind: CustomerKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marriage_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gross_income: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub token: String,
    /// Profile shape depends on the role, so it stays loose until used.
    pub user: serde_json::Value,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegisterResponse {
    pub message: String,
    pub user: serde_json::Value,
}

/// Plain acknowledgement, with any extra fields the handler attached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    pub message: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Partial profile update; unset fields are left alone by the backend.
///
/// Changing `passwd` requires `current_password`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateProfileRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passwd: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marriage_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gross_income: Option<i64>,
}

// --- Orders ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLineRequest {
    pub product_id: ProductId,
    pub quantity: u32,
    #[serde(with = "crate::models::money")]
    pub price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateOrderRequest {
    pub store_id: StoreId,
    pub items: Vec<OrderLineRequest>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PickupStatusUpdate {
    pub pickup_status: PickupStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentStatusUpdate {
    pub payment_status: bool,
}

/// Card details for the demo payment endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub card_number: String,
    pub cardholder_name: String,
    /// `MM/YY`
    pub expiry_date: String,
    pub cvv: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentResponse {
    pub message: String,
    pub order: Order,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModificationRequest {
    #[serde(default)]
    pub items: Vec<OrderLineRequest>,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OrderQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<StoreId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl OrderQuery {
    pub fn with_status(mut self, status: PickupStatus) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn paginate(mut self, page: u32, limit: u32) -> Self {
        self.page = Some(page);
        self.limit = Some(limit);
        self
    }
}

// --- Catalog ---

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductQuery {
    /// Only products in stock at this store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<StoreId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StoreQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_id: Option<RegionId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StatsQuery {
    /// Look-back window in days (backend default 30).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<u32>,
}
