use async_trait::async_trait;
use sea_orm::entity::prelude::*;

use super::hooks;
use crate::domain::codes::CodeKind;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "designs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub item_code: String,
    pub designer_id: Uuid,
    pub item_name: String,
    pub description: Option<String>,
    pub price: i64,
    /// Units available for sale; decremented when an order is placed.
    pub quantity: i32,
    pub material: String,
    pub board_size: String,
    pub thickness: String,
    pub color: String,
    pub image_id: Option<Uuid>,
    /// Legacy absolute URL, kept for rows created before file ids existed.
    pub image_url: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::DesignerId",
        to = "super::users::Column::Id"
    )]
    Users,
    #[sea_orm(has_many = "super::cart_items::Entity")]
    CartItems,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::cart_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CartItems.def()
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
        hooks::assign_code(db, &mut self.item_code, CodeKind::Design, insert).await?;
        Ok(self)
    }
}
