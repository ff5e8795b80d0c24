use async_trait::async_trait;
use sea_orm::entity::prelude::*;

use super::hooks;

/// One row per (material, board_size, thickness, color).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "stock")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub material: String,
    pub board_size: String,
    pub thickness: String,
    pub color: String,
    pub available_quantity: i32,
    pub reorder_level: i32,
    pub unit_price: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::stock_releases::Entity")]
    StockReleases,
}

impl Related<super::stock_releases::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockReleases.def()
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        hooks::assign_id(&mut self.id);
        hooks::touch(&mut self.updated_at, insert);
        Ok(self)
    }
}
