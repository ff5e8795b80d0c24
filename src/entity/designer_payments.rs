use async_trait::async_trait;
use sea_orm::{ActiveValue::Set, entity::prelude::*};

use super::hooks;
use crate::domain::payout::split_subtotal;

/// At most one row per order line: UNIQUE (order_id, order_item_id).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "designer_payments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub order_id: Uuid,
    pub order_item_id: Uuid,
    pub designer_id: Uuid,
    pub design_id: Uuid,
    pub subtotal: i64,
    pub commission: i64,
    pub designer_amount: i64,
    pub released_by: Uuid,
    pub released_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        hooks::assign_id(&mut self.id);
        if self.subtotal.is_set() {
            if let Some(subtotal) = hooks::current(&self.subtotal) {
                let split = split_subtotal(subtotal);
                self.commission = Set(split.commission);
                self.designer_amount = Set(split.designer_amount);
            }
        }
        Ok(self)
    }
}
