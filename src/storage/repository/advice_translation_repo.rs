use crate::storage::entity::advice_translation::{
    ActiveModel as AdviceTranslationActiveModel, Column as AdviceTranslationColumn,
    Entity as AdviceTranslation, Model as AdviceTranslationModel,
};
use crate::storage::entity::language::Model as LanguageModel;
use crate::storage::repository::{AdviceRepository, LanguageRepository};
use rand::seq::SliceRandom;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

pub struct AdviceTranslationRepository;

impl AdviceTranslationRepository {
    pub async fn find_all_with_language<C: ConnectionTrait>(
        db: &C,
    ) -> Result<Vec<(AdviceTranslationModel, LanguageModel)>, sea_orm::DbErr> {
        let languages = LanguageRepository::find_map(db).await?;
        let rows = AdviceTranslation::find()
            .order_by_asc(AdviceTranslationColumn::Id)
            .all(db)
            .await?;
        Ok(rows
            .into_iter()
            .filter_map(|t| languages.get(&t.language_id).cloned().map(|l| (t, l)))
            .collect())
    }

    pub async fn find_by_advice_id<C: ConnectionTrait>(
        db: &C,
        advice_id: i32,
    ) -> Result<Vec<(AdviceTranslationModel, LanguageModel)>, sea_orm::DbErr> {
        let languages = LanguageRepository::find_map(db).await?;
        let rows = AdviceTranslation::find()
            .filter(AdviceTranslationColumn::AdviceId.eq(advice_id))
            .order_by_asc(AdviceTranslationColumn::Id)
            .all(db)
            .await?;
        Ok(rows
            .into_iter()
            .filter_map(|t| languages.get(&t.language_id).cloned().map(|l| (t, l)))
            .collect())
    }

    /// 在指定 habit + 语言范围内随机取一条
    pub async fn get_random_advice_translation_by_habit_id_and_language<C: ConnectionTrait>(
        db: &C,
        language: &str,
        habit_id: i32,
    ) -> Result<Option<(AdviceTranslationModel, LanguageModel)>, sea_orm::DbErr> {
        let Some(lang) = LanguageRepository::find_by_code(db, language).await? else {
            return Ok(None);
        };
        let advice_ids = AdviceRepository::find_ids_by_habit(db, habit_id).await?;
        if advice_ids.is_empty() {
            return Ok(None);
        }

        let candidates = AdviceTranslation::find()
            .filter(AdviceTranslationColumn::AdviceId.is_in(advice_ids))
            .filter(AdviceTranslationColumn::LanguageId.eq(lang.id))
            .all(db)
            .await?;

        let picked = candidates.choose(&mut rand::thread_rng()).cloned();
        Ok(picked.map(|t| (t, lang)))
    }

    pub async fn find_advice_translation_by_language_code_and_content<C: ConnectionTrait>(
        db: &C,
        language: &str,
        content: &str,
    ) -> Result<Option<AdviceTranslationModel>, sea_orm::DbErr> {
        let Some(lang) = LanguageRepository::find_by_code(db, language).await? else {
            return Ok(None);
        };
        AdviceTranslation::find()
            .filter(AdviceTranslationColumn::LanguageId.eq(lang.id))
            .filter(AdviceTranslationColumn::Content.eq(content))
            .order_by_asc(AdviceTranslationColumn::Id)
            .one(db)
            .await
    }

    pub async fn insert_batch<C: ConnectionTrait>(
        db: &C,
        advice_id: i32,
        rows: Vec<(i32, String)>,
    ) -> Result<(), sea_orm::DbErr> {
        if rows.is_empty() {
            return Ok(());
        }
        let models: Vec<AdviceTranslationActiveModel> = rows
            .into_iter()
            .map(|(language_id, content)| AdviceTranslationActiveModel {
                advice_id: Set(advice_id),
                language_id: Set(language_id),
                content: Set(content),
                ..Default::default()
            })
            .collect();
        AdviceTranslation::insert_many(models).exec(db).await?;
        Ok(())
    }

    #[cfg(test)]
    pub async fn insert<C: ConnectionTrait>(
        db: &C,
        advice_id: i32,
        language_id: i32,
        content: &str,
    ) -> Result<AdviceTranslationModel, sea_orm::DbErr> {
        let am = AdviceTranslationActiveModel {
            advice_id: Set(advice_id),
            language_id: Set(language_id),
            content: Set(content.to_string()),
            ..Default::default()
        };
        am.insert(db).await
    }

    pub async fn delete_by_advice_id<C: ConnectionTrait>(
        db: &C,
        advice_id: i32,
    ) -> Result<u64, sea_orm::DbErr> {
        let res = AdviceTranslation::delete_many()
            .filter(AdviceTranslationColumn::AdviceId.eq(advice_id))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }
}
