use crate::dto::{
    AdviceDto, AdvicePostDto, AdviceVo, HabitVo, LanguageDto, LanguageTranslationDto,
};
use crate::error::{message, ServiceError, ServiceResult};
use crate::service::HabitService;
use crate::storage::entity::advice;
use crate::storage::repository::{
    AdviceRepository, AdviceTranslationRepository, LanguageRepository,
};
use async_trait::async_trait;
use log::{info, warn};
use sea_orm::{DatabaseConnection, TransactionTrait};
use std::sync::Arc;

#[async_trait]
pub trait AdviceService: Send + Sync {
    async fn get_all_advices(&self) -> ServiceResult<Vec<LanguageTranslationDto>>;

    async fn get_random_advice_by_habit_id_and_language(
        &self,
        habit_id: i32,
        language: &str,
    ) -> ServiceResult<LanguageTranslationDto>;

    async fn get_advice_by_id(&self, id: i32) -> ServiceResult<AdviceDto>;

    async fn get_advice_by_name(&self, language: &str, name: &str) -> ServiceResult<AdviceDto>;

    async fn save(&self, dto: AdvicePostDto) -> ServiceResult<AdviceVo>;

    async fn update(&self, dto: AdvicePostDto, id: i32) -> ServiceResult<AdviceVo>;

    async fn delete(&self, id: i32) -> ServiceResult<i32>;
}

pub struct AdviceServiceImpl {
    db: Arc<DatabaseConnection>,
    habit_service: Arc<dyn HabitService>,
}

impl AdviceServiceImpl {
    pub fn new(db: Arc<DatabaseConnection>, habit_service: Arc<dyn HabitService>) -> Self {
        Self { db, habit_service }
    }

    async fn translations_of(&self, advice_id: i32) -> ServiceResult<Vec<LanguageTranslationDto>> {
        let rows = AdviceTranslationRepository::find_by_advice_id(self.db.as_ref(), advice_id)
            .await?;
        Ok(rows.into_iter().map(LanguageTranslationDto::from).collect())
    }

    async fn to_dto(&self, model: advice::Model) -> ServiceResult<AdviceDto> {
        let translations = self.translations_of(model.id).await?;
        Ok(AdviceDto::from_model(model, translations))
    }

    /// 将请求中的语言代码换成库里的语言，未知代码报 NotFound
    async fn resolve_translations(
        &self,
        translations: &[LanguageTranslationDto],
    ) -> ServiceResult<Vec<LanguageTranslationDto>> {
        let mut resolved = Vec::with_capacity(translations.len());
        for t in translations {
            let lang = LanguageRepository::find_by_code(self.db.as_ref(), &t.language.code)
                .await?
                .ok_or_else(|| {
                    ServiceError::not_found(message::LANGUAGE_NOT_FOUND_BY_CODE, &t.language.code)
                })?;
            resolved.push(LanguageTranslationDto::new(
                LanguageDto::from(lang),
                t.content.trim(),
            ));
        }
        Ok(resolved)
    }

    fn translation_rows(translations: &[LanguageTranslationDto]) -> Vec<(i32, String)> {
        translations
            .iter()
            .map(|t| (t.language.id, t.content.clone()))
            .collect()
    }

    fn to_vo(model: advice::Model, habit: HabitVo, translations: Vec<LanguageTranslationDto>) -> AdviceVo {
        AdviceVo {
            id: model.id,
            habit,
            translations,
        }
    }
}

#[async_trait]
impl AdviceService for AdviceServiceImpl {
    async fn get_all_advices(&self) -> ServiceResult<Vec<LanguageTranslationDto>> {
        let rows = AdviceTranslationRepository::find_all_with_language(self.db.as_ref()).await?;
        Ok(rows.into_iter().map(LanguageTranslationDto::from).collect())
    }

    async fn get_random_advice_by_habit_id_and_language(
        &self,
        habit_id: i32,
        language: &str,
    ) -> ServiceResult<LanguageTranslationDto> {
        AdviceTranslationRepository::get_random_advice_translation_by_habit_id_and_language(
            self.db.as_ref(),
            language,
            habit_id,
        )
        .await?
        .map(LanguageTranslationDto::from)
        .ok_or_else(|| {
            ServiceError::not_found(
                message::ADVICE_NOT_FOUND_BY_HABIT_AND_LANGUAGE,
                format!("{}, {}", habit_id, language),
            )
        })
    }

    async fn get_advice_by_id(&self, id: i32) -> ServiceResult<AdviceDto> {
        let model = AdviceRepository::find_by_id(self.db.as_ref(), id)
            .await?
            .ok_or_else(|| ServiceError::not_found(message::ADVICE_NOT_FOUND_BY_ID, id))?;
        self.to_dto(model).await
    }

    async fn get_advice_by_name(&self, language: &str, name: &str) -> ServiceResult<AdviceDto> {
        let translation =
            AdviceTranslationRepository::find_advice_translation_by_language_code_and_content(
                self.db.as_ref(),
                language,
                name,
            )
            .await?
            .ok_or_else(|| ServiceError::not_found(message::ADVICE_NOT_FOUND_BY_NAME, name))?;
        let model = AdviceRepository::find_by_id(self.db.as_ref(), translation.advice_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(message::ADVICE_NOT_FOUND_BY_NAME, name))?;
        self.to_dto(model).await
    }

    async fn save(&self, dto: AdvicePostDto) -> ServiceResult<AdviceVo> {
        dto.validate(true)?;
        let habit = self.habit_service.get_by_id(dto.habit.id).await?;
        let translations = self.resolve_translations(&dto.translations).await?;

        let saved = async {
            let txn = self.db.begin().await?;
            let model = AdviceRepository::insert(&txn, habit.id).await?;
            AdviceTranslationRepository::insert_batch(
                &txn,
                model.id,
                Self::translation_rows(&translations),
            )
            .await?;
            txn.commit().await?;
            Ok::<_, sea_orm::DbErr>(model)
        }
        .await
        .map_err(|e| ServiceError::NotSaved(format!("{}{}", message::ADVICE_NOT_SAVED, e)))?;

        info!("Saved advice [{}] for habit {}", saved.id, habit.id);
        Ok(Self::to_vo(saved, habit, translations))
    }

    async fn update(&self, dto: AdvicePostDto, id: i32) -> ServiceResult<AdviceVo> {
        dto.validate(false)?;
        let existing = AdviceRepository::find_by_id(self.db.as_ref(), id)
            .await?
            .ok_or_else(|| ServiceError::not_updated(message::ADVICE_NOT_UPDATED, id))?;
        let habit = self.habit_service.get_by_id(dto.habit.id).await?;
        let translations = self.resolve_translations(&dto.translations).await?;

        let txn = self.db.begin().await?;
        let updated = AdviceRepository::update_habit(&txn, existing, habit.id).await?;
        // 带翻译时整体替换
        if !translations.is_empty() {
            AdviceTranslationRepository::delete_by_advice_id(&txn, updated.id).await?;
            AdviceTranslationRepository::insert_batch(
                &txn,
                updated.id,
                Self::translation_rows(&translations),
            )
            .await?;
        }
        txn.commit().await?;

        info!("Updated advice [{}], habit -> {}", updated.id, habit.id);
        let translations = self.translations_of(updated.id).await?;
        Ok(Self::to_vo(updated, habit, translations))
    }

    async fn delete(&self, id: i32) -> ServiceResult<i32> {
        let deleted = async {
            let txn = self.db.begin().await?;
            AdviceTranslationRepository::delete_by_advice_id(&txn, id).await?;
            let n = AdviceRepository::delete_by_id(&txn, id).await?;
            if n > 0 {
                txn.commit().await?;
            }
            Ok::<_, sea_orm::DbErr>(n)
        }
        .await;

        match deleted {
            Ok(0) => Err(ServiceError::not_deleted(message::ADVICE_NOT_DELETED, id)),
            Ok(_) => {
                info!("Deleted advice [{}]", id);
                Ok(id)
            }
            Err(e) => {
                warn!("Failed to delete advice [{}]: {}", id, e);
                Err(ServiceError::not_deleted(message::ADVICE_NOT_DELETED, id))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::HabitIdRequestDto;
    use crate::service::HabitServiceImpl;
    use crate::storage::entity::language;
    use crate::storage::testing;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 记录调用次数的 habit 服务
    struct CountingHabitService {
        inner: HabitServiceImpl,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl HabitService for CountingHabitService {
        async fn get_by_id(&self, id: i32) -> ServiceResult<HabitVo> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.get_by_id(id).await
        }

        async fn get_all(&self) -> ServiceResult<Vec<HabitVo>> {
            self.inner.get_all().await
        }

        async fn save(&self, image: &str) -> ServiceResult<HabitVo> {
            self.inner.save(image).await
        }
    }

    struct Fixture {
        db: Arc<DatabaseConnection>,
        en: language::Model,
        ua: language::Model,
        habits: Arc<CountingHabitService>,
        service: AdviceServiceImpl,
    }

    async fn fixture() -> Fixture {
        let db = testing::memory_db().await;
        let en = testing::language(&db, "en").await;
        let ua = testing::language(&db, "ua").await;
        let habits = Arc::new(CountingHabitService {
            inner: HabitServiceImpl::new(db.clone()),
            calls: AtomicUsize::new(0),
        });
        let service = AdviceServiceImpl::new(db.clone(), habits.clone());
        Fixture {
            db,
            en,
            ua,
            habits,
            service,
        }
    }

    fn translation(lang: &language::Model, content: &str) -> LanguageTranslationDto {
        LanguageTranslationDto::new(LanguageDto::from(lang.clone()), content)
    }

    #[tokio::test]
    async fn get_all_advices_returns_every_translation() {
        let f = fixture().await;
        let habit = testing::habit(&f.db, "image.png").await;
        testing::advice(&f.db, habit.id, &[(&f.en, "hello"), (&f.ua, "привіт")]).await;
        testing::advice(&f.db, habit.id, &[(&f.en, "text")]).await;

        let actual = f.service.get_all_advices().await.unwrap();
        assert_eq!(
            actual,
            vec![
                translation(&f.en, "hello"),
                translation(&f.ua, "привіт"),
                translation(&f.en, "text"),
            ]
        );
    }

    #[tokio::test]
    async fn random_advice_is_scoped_to_habit_and_language() {
        let f = fixture().await;
        let habit = testing::habit(&f.db, "image.png").await;
        let other = testing::habit(&f.db, "other.png").await;
        testing::advice(&f.db, habit.id, &[(&f.en, "hello"), (&f.ua, "привіт")]).await;
        testing::advice(&f.db, habit.id, &[(&f.en, "smile")]).await;
        testing::advice(&f.db, other.id, &[(&f.en, "text")]).await;

        let mut seen = HashSet::new();
        for _ in 0..40 {
            let dto = f
                .service
                .get_random_advice_by_habit_id_and_language(habit.id, "en")
                .await
                .unwrap();
            assert_eq!(dto.language.code, "en");
            seen.insert(dto.content);
        }
        assert!(seen.iter().all(|c| c == "hello" || c == "smile"));

        let ua = f
            .service
            .get_random_advice_by_habit_id_and_language(habit.id, "ua")
            .await
            .unwrap();
        assert_eq!(ua.content, "привіт");
    }

    #[tokio::test]
    async fn random_advice_without_match_is_not_found() {
        let f = fixture().await;
        let habit = testing::habit(&f.db, "image.png").await;
        testing::advice(&f.db, habit.id, &[(&f.ua, "привіт")]).await;

        for (habit_id, lang) in [(habit.id, "en"), (habit.id, "de"), (999, "ua")] {
            assert!(matches!(
                f.service
                    .get_random_advice_by_habit_id_and_language(habit_id, lang)
                    .await,
                Err(ServiceError::NotFound(_))
            ));
        }
    }

    #[tokio::test]
    async fn get_advice_by_id_and_by_name() {
        let f = fixture().await;
        let habit = testing::habit(&f.db, "image.png").await;
        let advice = testing::advice(&f.db, habit.id, &[(&f.en, "hello"), (&f.ua, "привіт")]).await;

        let expected = AdviceDto {
            id: advice.id,
            habit: HabitIdRequestDto { id: habit.id },
            translations: vec![translation(&f.en, "hello"), translation(&f.ua, "привіт")],
        };
        assert_eq!(f.service.get_advice_by_id(advice.id).await.unwrap(), expected);
        assert_eq!(
            f.service.get_advice_by_name("ua", "привіт").await.unwrap(),
            expected
        );
    }

    #[tokio::test]
    async fn missing_advice_lookups_are_not_found() {
        let f = fixture().await;
        assert!(matches!(
            f.service.get_advice_by_id(1).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            f.service.get_advice_by_name("en", "name").await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn save_persists_advice_with_translations() {
        let f = fixture().await;
        let habit = testing::habit(&f.db, "image.png").await;
        let dto = AdvicePostDto::new(
            vec![
                LanguageTranslationDto::new(
                    LanguageDto {
                        id: 0,
                        code: "EN".to_string(),
                    },
                    "hello",
                ),
                translation(&f.ua, "привіт"),
            ],
            HabitIdRequestDto { id: habit.id },
        );

        let vo = f.service.save(dto).await.unwrap();
        assert_eq!(vo.habit, HabitVo::from(habit.clone()));
        assert_eq!(
            vo.translations,
            vec![translation(&f.en, "hello"), translation(&f.ua, "привіт")]
        );

        let stored = f.service.get_advice_by_id(vo.id).await.unwrap();
        assert_eq!(stored.habit.id, habit.id);
        assert_eq!(stored.translations, vo.translations);
    }

    #[tokio::test]
    async fn save_with_unknown_language_or_habit_fails() {
        let f = fixture().await;
        let habit = testing::habit(&f.db, "image.png").await;
        let bad_lang = AdvicePostDto::new(
            vec![LanguageTranslationDto::new(
                LanguageDto {
                    id: 9,
                    code: "de".to_string(),
                },
                "hallo",
            )],
            HabitIdRequestDto { id: habit.id },
        );
        assert!(matches!(
            f.service.save(bad_lang).await,
            Err(ServiceError::NotFound(_))
        ));

        let bad_habit = AdvicePostDto::new(
            vec![translation(&f.en, "hello")],
            HabitIdRequestDto { id: 999 },
        );
        assert!(matches!(
            f.service.save(bad_habit).await,
            Err(ServiceError::NotFound(_))
        ));
        assert_eq!(AdviceRepository::count(f.db.as_ref()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn update_reassociates_habit() {
        let f = fixture().await;
        let habit = testing::habit(&f.db, "image.png").await;
        let other = testing::habit(&f.db, "other.png").await;
        let advice = testing::advice(&f.db, habit.id, &[(&f.en, "hello")]).await;

        let dto = AdvicePostDto::new(Vec::new(), HabitIdRequestDto { id: other.id });
        let vo = f.service.update(dto, advice.id).await.unwrap();

        assert_eq!(f.habits.calls.load(Ordering::SeqCst), 1);
        assert_eq!(vo.id, advice.id);
        assert_eq!(vo.habit, HabitVo::from(other.clone()));
        assert_eq!(vo.translations, vec![translation(&f.en, "hello")]);
        let stored = AdviceRepository::find_by_id(f.db.as_ref(), advice.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.habit_id, other.id);
    }

    #[tokio::test]
    async fn update_replaces_translations_when_given() {
        let f = fixture().await;
        let habit = testing::habit(&f.db, "image.png").await;
        let advice = testing::advice(&f.db, habit.id, &[(&f.en, "hello"), (&f.ua, "привіт")]).await;

        let dto = AdvicePostDto::new(
            vec![translation(&f.en, "smile")],
            HabitIdRequestDto { id: habit.id },
        );
        let vo = f.service.update(dto, advice.id).await.unwrap();
        assert_eq!(vo.translations, vec![translation(&f.en, "smile")]);
    }

    #[tokio::test]
    async fn update_missing_advice_is_not_updated() {
        let f = fixture().await;
        let habit = testing::habit(&f.db, "image.png").await;
        let dto = AdvicePostDto::new(
            vec![translation(&f.en, "hello")],
            HabitIdRequestDto { id: habit.id },
        );
        assert!(matches!(
            f.service.update(dto, 1).await,
            Err(ServiceError::NotUpdated(_))
        ));
        assert_eq!(f.habits.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_advice() {
        let f = fixture().await;
        let habit = testing::habit(&f.db, "image.png").await;
        let first = testing::advice(&f.db, habit.id, &[(&f.en, "hello")]).await;
        testing::advice(&f.db, habit.id, &[(&f.en, "text")]).await;

        assert_eq!(f.service.delete(first.id).await.unwrap(), first.id);
        assert_eq!(AdviceRepository::count(f.db.as_ref()).await.unwrap(), 1);
        assert!(matches!(
            f.service.get_advice_by_id(first.id).await,
            Err(ServiceError::NotFound(_))
        ));
        assert_eq!(f.service.get_all_advices().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_missing_advice_is_not_deleted() {
        let f = fixture().await;
        assert!(matches!(
            f.service.delete(1).await,
            Err(ServiceError::NotDeleted(_))
        ));
    }
}
