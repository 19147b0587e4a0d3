use crate::storage::entity::user::{
    ActiveModel as UserActiveModel, Column as UserColumn, Entity as User, Model as UserModel,
};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: String,
    pub user_status: String,
    pub email_notification: String,
    pub city: Option<String>,
    pub refresh_token_key: String,
}

pub struct UserRepository;

impl UserRepository {
    pub async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> Result<Option<UserModel>, sea_orm::DbErr> {
        User::find_by_id(id).one(db).await
    }

    pub async fn find_by_email<C: ConnectionTrait>(
        db: &C,
        email: &str,
    ) -> Result<Option<UserModel>, sea_orm::DbErr> {
        User::find()
            .filter(UserColumn::Email.eq(email.trim().to_lowercase()))
            .one(db)
            .await
    }

    pub async fn find_by_ids<C: ConnectionTrait>(
        db: &C,
        ids: Vec<i32>,
    ) -> Result<HashMap<i32, UserModel>, sea_orm::DbErr> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = User::find()
            .filter(UserColumn::Id.is_in(ids))
            .all(db)
            .await?;
        Ok(rows.into_iter().map(|u| (u.id, u)).collect())
    }

    pub async fn insert<C: ConnectionTrait>(
        db: &C,
        user: NewUser,
    ) -> Result<UserModel, sea_orm::DbErr> {
        let now = Utc::now().timestamp();
        let am = UserActiveModel {
            name: Set(user.name),
            email: Set(user.email.trim().to_lowercase()),
            role: Set(user.role),
            user_status: Set(user.user_status),
            email_notification: Set(user.email_notification),
            city: Set(user.city),
            refresh_token_key: Set(user.refresh_token_key),
            date_of_registration: Set(now),
            last_visit: Set(now),
            ..Default::default()
        };
        am.insert(db).await
    }

    pub async fn update_last_visit<C: ConnectionTrait>(
        db: &C,
        id: i32,
        at: i64,
    ) -> Result<u64, sea_orm::DbErr> {
        let res = User::update_many()
            .col_expr(UserColumn::LastVisit, Expr::value(at))
            .filter(UserColumn::Id.eq(id))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }
}
