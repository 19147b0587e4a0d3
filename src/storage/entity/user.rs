use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub role: String,               // ROLE_USER / ROLE_MODERATOR / ROLE_ADMIN
    pub user_status: String,        // BLOCKED / DEACTIVATED / ACTIVATED / CREATED
    pub email_notification: String, // DISABLED / IMMEDIATELY / DAILY / WEEKLY / MONTHLY
    #[sea_orm(nullable)]
    pub city: Option<String>,
    pub refresh_token_key: String,
    pub date_of_registration: i64,
    pub last_visit: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
