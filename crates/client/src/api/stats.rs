use smartshelf_shared::{ApiError, ManagerStats, StatsQuery};

use crate::api_client::ApiClient;

impl ApiClient {
    /// Dashboard series for managers over the requested window.
    pub async fn get_manager_stats(&self, query: &StatsQuery) -> Result<ManagerStats, ApiError> {
        self.get_json_with("/manager/stats", query).await
    }
}
