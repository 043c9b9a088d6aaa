//! `SeaORM` Entity for user_auth table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Links an external login to a user. `auth_user_id` holds the hex SHA-256
/// of the provider name followed by the provider's user ID.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "user_auth")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub auth_provider: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub auth_user_id: String,
    pub user_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::UserId"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
