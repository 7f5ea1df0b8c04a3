use smartshelf_shared::{
    ApiError, CreateOrderRequest, MessageResponse, ModificationRequest, Order, OrderId, OrderPage,
    OrderQuery, PaymentDetails, PaymentResponse, PaymentStatusUpdate, PickupStatus,
    PickupStatusUpdate,
};

use crate::api_client::ApiClient;

// --- Order API methods ---

impl ApiClient {
    pub async fn create_order(&self, order: &CreateOrderRequest) -> Result<Order, ApiError> {
        self.post_json("/orders", order).await
    }

    /// Orders visible to the caller's role, newest first.
    pub async fn get_orders(&self, query: &OrderQuery) -> Result<OrderPage, ApiError> {
        self.get_json_with("/orders", query).await
    }

    pub async fn get_order_by_id(&self, id: OrderId) -> Result<Order, ApiError> {
        self.get_json(&format!("/orders/{id}")).await
    }

    /// Cancel and restock; answers the updated order.
    pub async fn cancel_order(&self, id: OrderId) -> Result<Order, ApiError> {
        self.put_empty(&format!("/orders/{id}/cancel")).await
    }

    /// Payload is passed through untouched.
    pub async fn confirm_pickup(
        &self,
        id: OrderId,
        data: &serde_json::Value,
    ) -> Result<serde_json::Value, ApiError> {
        self.post_json(&format!("/orders/{id}/pickup"), data).await
    }

    pub async fn request_modification(
        &self,
        id: OrderId,
        request: &ModificationRequest,
    ) -> Result<MessageResponse, ApiError> {
        self.post_json(&format!("/orders/{id}/request-modification"), request).await
    }

    pub async fn update_order_status(
        &self,
        id: OrderId,
        status: PickupStatus,
    ) -> Result<Order, ApiError> {
        let body = PickupStatusUpdate { pickup_status: status };
        self.put_json(&format!("/orders/{id}/status"), &body).await
    }

    pub async fn update_payment_status(
        &self,
        id: OrderId,
        paid: bool,
    ) -> Result<Order, ApiError> {
        let body = PaymentStatusUpdate { payment_status: paid };
        self.put_json(&format!("/orders/{id}/payment"), &body).await
    }

    pub async fn process_payment(
        &self,
        id: OrderId,
        payment: &PaymentDetails,
    ) -> Result<PaymentResponse, ApiError> {
        self.post_json(&format!("/orders/{id}/process-payment"), payment).await
    }
}
