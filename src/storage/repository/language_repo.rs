use crate::dto::language::normalize_code;
use crate::storage::entity::language::{
    ActiveModel as LanguageActiveModel, Column as LanguageColumn, Entity as Language,
    Model as LanguageModel,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::collections::HashMap;

pub struct LanguageRepository;

impl LanguageRepository {
    pub async fn find_by_code<C: ConnectionTrait>(
        db: &C,
        code: &str,
    ) -> Result<Option<LanguageModel>, sea_orm::DbErr> {
        Language::find()
            .filter(LanguageColumn::Code.eq(normalize_code(code)))
            .one(db)
            .await
    }

    pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<LanguageModel>, sea_orm::DbErr> {
        Language::find()
            .order_by_asc(LanguageColumn::Id)
            .all(db)
            .await
    }

    pub async fn find_map<C: ConnectionTrait>(
        db: &C,
    ) -> Result<HashMap<i32, LanguageModel>, sea_orm::DbErr> {
        let rows = Self::find_all(db).await?;
        Ok(rows.into_iter().map(|l| (l.id, l)).collect())
    }

    pub async fn insert<C: ConnectionTrait>(
        db: &C,
        code: &str,
    ) -> Result<LanguageModel, sea_orm::DbErr> {
        let am = LanguageActiveModel {
            code: Set(normalize_code(code)),
            ..Default::default()
        };
        am.insert(db).await
    }
}
