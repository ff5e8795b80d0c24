use async_trait::async_trait;
use sea_orm::entity::prelude::*;

use super::hooks;

/// One line of a customer's cart. The name, price, image and availability columns
/// are a snapshot of the design, refreshed every time the cart is read.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cart_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub design_id: Uuid,
    pub quantity: i32,
    pub item_name: String,
    pub price: i64,
    pub image_url: Option<String>,
    pub designer_id: Uuid,
    pub available_quantity: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::designs::Entity",
        from = "Column::DesignId",
        to = "super::designs::Column::Id"
    )]
    Designs,
}

impl Related<super::designs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Designs.def()
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
