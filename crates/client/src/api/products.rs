use smartshelf_shared::{ApiError, InventoryRecord, Product, ProductId, ProductQuery, StoreId};

use crate::api_client::ApiClient;

// --- Catalog API methods ---

impl ApiClient {
    /// Catalog, optionally limited to products in stock at one store.
    pub async fn get_products(&self, query: &ProductQuery) -> Result<Vec<Product>, ApiError> {
        self.get_json_with("/products", query).await
    }

    /// Distinct product kinds, sorted.
    pub async fn get_product_categories(&self) -> Result<Vec<String>, ApiError> {
        self.get_json("/products/categories").await
    }

    pub async fn get_product_by_id(&self, id: ProductId) -> Result<Product, ApiError> {
        self.get_json(&format!("/products/{id}")).await
    }

    /// Stock of one product at one store; `stock` is 0 when never carried.
    pub async fn get_store_inventory(
        &self,
        store_id: StoreId,
        product_id: ProductId,
    ) -> Result<InventoryRecord, ApiError> {
        self.get_json(&format!("/stores/{store_id}/inventory/{product_id}")).await
    }

    pub async fn get_store_inventory_list(
        &self,
        store_id: StoreId,
    ) -> Result<Vec<InventoryRecord>, ApiError> {
        self.get_json(&format!("/stores/{store_id}/inventory")).await
    }
}
