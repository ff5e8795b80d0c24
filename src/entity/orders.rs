use async_trait::async_trait;
use sea_orm::entity::prelude::*;

use super::hooks;
use crate::domain::codes::CodeKind;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub order_code: String,
    pub customer_id: Uuid,
    pub total_amount: i64,
    pub delivery_fee: i64,
    pub payment_method: String,
    pub payment_status: String,
    pub status: String,
    pub delivery_status: String,
    pub delivery_address: String,
    pub contact_phone: String,
    pub bank_slip_id: Option<Uuid>,
    pub bank_slip_url: Option<String>,
    /// Set while every line's quantity is subtracted from its design.
    pub stock_deducted: bool,
    pub cash_collected: bool,
    pub payment_released: bool,
    pub release_transaction_id: Option<String>,
    pub released_at: Option<DateTimeWithTimeZone>,
    pub driver_id: Option<Uuid>,
    pub delivered_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CustomerId",
        to = "super::users::Column::Id"
    )]
    Users,
    #[sea_orm(has_many = "super::order_items::Entity")]
    OrderItems,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::order_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        hooks::assign_id(&mut self.id);
        hooks::touch(&mut self.updated_at, insert);
        hooks::assign_code(db, &mut self.order_code, CodeKind::Order, insert).await?;
        Ok(self)
    }
}
