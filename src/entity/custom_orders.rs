use async_trait::async_trait;
use sea_orm::entity::prelude::*;

use super::hooks;
use crate::domain::codes::CodeKind;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "custom_orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub order_code: String,
    pub customer_id: Uuid,
    pub staff_designer_id: Option<Uuid>,
    pub description: String,
    pub material: String,
    pub board_size: String,
    pub thickness: String,
    pub color: String,
    pub quantity: i32,
    pub budget: Option<i64>,
    /// Agreed price, fixed when a staff designer accepts the order.
    pub price: Option<i64>,
    pub delivery_fee: i64,
    pub total_amount: i64,
    pub payment_method: String,
    pub payment_status: String,
    pub status: String,
    pub delivery_status: String,
    pub delivery_address: String,
    pub contact_phone: String,
    pub reference_image_id: Option<Uuid>,
    pub reference_image_url: Option<String>,
    pub bank_slip_id: Option<Uuid>,
    pub bank_slip_url: Option<String>,
    pub cash_collected: bool,
    pub payment_released: bool,
    pub release_transaction_id: Option<String>,
    pub released_at: Option<DateTimeWithTimeZone>,
    pub driver_id: Option<Uuid>,
    pub delivered_at: Option<DateTimeWithTimeZone>,
    pub notes: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        hooks::assign_id(&mut self.id);
        hooks::touch(&mut self.updated_at, insert);
        hooks::assign_code(db, &mut self.order_code, CodeKind::CustomOrder, insert).await?;
        Ok(self)
    }
}
