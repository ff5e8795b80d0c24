use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CountBy {
    pub key: String,
    pub count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Dashboard {
    pub users_by_role: Vec<CountBy>,
    pub orders_by_status: Vec<CountBy>,
    pub custom_orders_by_status: Vec<CountBy>,
    pub designs: i64,
    pub low_stock: i64,
}
