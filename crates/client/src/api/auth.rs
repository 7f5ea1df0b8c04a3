use smartshelf_shared::{
    ApiError, JsonRecord, LoginRequest, LoginResponse, MessageResponse, RegisterRequest,
    RegisterResponse, UpdateProfileRequest,
};

use crate::api_client::ApiClient;

// --- Auth/Profile API methods ---

impl ApiClient {
    /// Exchange credentials for a token, profile and role.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.post_json("/auth/login", credentials).await
    }

    /// Create a customer account. Does not sign in.
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        self.post_json("/auth/register", request).await
    }

    pub async fn logout(&self) -> Result<MessageResponse, ApiError> {
        self.post_empty("/auth/logout").await
    }

    /// Account record of the token holder.
    pub async fn get_user_info(&self) -> Result<JsonRecord, ApiError> {
        self.get_json("/auth/user").await
    }

    /// Full profile: account, customer details, address and assigned salesperson.
    pub async fn get_profile(&self) -> Result<JsonRecord, ApiError> {
        self.get_json("/auth/profile").await
    }

    pub async fn update_profile(&self, update: &UpdateProfileRequest) -> Result<JsonRecord, ApiError> {
        self.put_json("/auth/profile", update).await
    }
}
