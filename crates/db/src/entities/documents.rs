//! `SeaORM` Entity for documents table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub document_id: i64,
    pub paid_user_id: Option<i64>,
    pub paid_date: Option<Date>,
    pub description: String,
    pub created_date: Option<Date>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::PaidUserId",
        to = "super::users::Column::UserId"
    )]
    PaidUser,
    #[sea_orm(has_many = "super::document_entries::Entity")]
    DocumentEntries,
    #[sea_orm(has_many = "super::document_images::Entity")]
    DocumentImages,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaidUser.def()
    }
}

impl Related<super::document_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DocumentEntries.def()
    }
}

impl Related<super::document_images::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DocumentImages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
