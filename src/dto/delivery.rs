use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AssignDeliveryRequest {
    /// Defaults to the calling delivery user.
    pub driver_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateDeliveryStatusRequest {
    pub delivery_status: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReleaseDeliveryPaymentRequest {
    pub transaction_id: String,
}
