use async_trait::async_trait;
use sea_orm::entity::prelude::*;

use super::hooks;
use crate::domain::codes::CodeKind;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "material_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub request_code: String,
    pub requester_id: Uuid,
    pub material: String,
    pub board_size: String,
    pub thickness: String,
    pub color: String,
    pub quantity: i32,
    pub reason: Option<String>,
    pub status: String,
    pub reviewed_by: Option<Uuid>,
    pub review_note: Option<String>,
    pub stock_release_id: Option<Uuid>,
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
        hooks::assign_code(db, &mut self.request_code, CodeKind::MaterialRequest, insert).await?;
        Ok(self)
    }
}
