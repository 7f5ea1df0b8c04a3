use smartshelf_shared::{ApiError, RegionId, Store, StoreId, StoreQuery};

use crate::api_client::ApiClient;

// --- Store API methods ---

impl ApiClient {
    /// Stores visible to the caller; regional managers only see their region.
    pub async fn get_stores(&self, query: &StoreQuery) -> Result<Vec<Store>, ApiError> {
        self.get_json_with("/stores", query).await
    }

    pub async fn get_store_by_id(&self, id: StoreId) -> Result<Store, ApiError> {
        self.get_json(&format!("/stores/{id}")).await
    }

    pub async fn get_stores_by_region(&self, region_id: RegionId) -> Result<Vec<Store>, ApiError> {
        self.get_json(&format!("/regions/{region_id}/stores")).await
    }
}
