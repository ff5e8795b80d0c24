use async_trait::async_trait;
use sea_orm::entity::prelude::*;

use super::hooks;
use crate::domain::codes::CodeKind;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "purchase_orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub po_number: String,
    pub supplier_id: Uuid,
    /// JSON array of `PurchaseOrderLine`.
    #[sea_orm(column_type = "JsonBinary")]
    pub items: Json,
    pub total_amount: i64,
    pub status: String,
    pub payment_status: String,
    pub expected_date: Option<Date>,
    pub notes: Option<String>,
    pub created_by: Uuid,
    pub received_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::suppliers::Entity",
        from = "Column::SupplierId",
        to = "super::suppliers::Column::Id"
    )]
    Suppliers,
}

impl Related<super::suppliers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Suppliers.def()
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
        hooks::assign_code(db, &mut self.po_number, CodeKind::PurchaseOrder, insert).await?;
        Ok(self)
    }
}
