use crate::dto::{GoalDto, UserGoalDto, UserGoalResponseDto};
use crate::enums::GoalStatus;
use crate::error::{message, ServiceError, ServiceResult};
use crate::storage::entity::{language, user_goal};
use crate::storage::repository::{
    GoalRepository, LanguageRepository, UserGoalRepository, UserRepository,
};
use chrono::Utc;
use log::info;
use sea_orm::{DatabaseConnection, TransactionTrait};
use std::collections::HashMap;
use std::sync::Arc;

pub struct GoalService {
    db: Arc<DatabaseConnection>,
}

impl GoalService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn check_user(&self, user_id: i32) -> ServiceResult<()> {
        UserRepository::find_by_id(self.db.as_ref(), user_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| ServiceError::not_found(message::USER_NOT_FOUND_BY_ID, user_id))
    }

    async fn language(&self, code: &str) -> ServiceResult<language::Model> {
        LanguageRepository::find_by_code(self.db.as_ref(), code)
            .await?
            .ok_or_else(|| ServiceError::not_found(message::LANGUAGE_NOT_FOUND_BY_CODE, code))
    }

    fn to_response(
        model: user_goal::Model,
        texts: &HashMap<i32, String>,
    ) -> ServiceResult<UserGoalResponseDto> {
        let status = model
            .status
            .parse::<GoalStatus>()
            .map_err(ServiceError::Mapping)?;
        Ok(UserGoalResponseDto {
            id: model.id,
            goal_id: model.goal_id,
            text: texts.get(&model.goal_id).cloned(),
            status,
            date_completed: model.date_completed,
        })
    }

    /// 用户还可以选择的目标，缺少该语言翻译的目标不返回
    pub async fn get_available_goals(
        &self,
        user_id: i32,
        language: &str,
    ) -> ServiceResult<Vec<GoalDto>> {
        self.check_user(user_id).await?;
        let lang = self.language(language).await?;
        let goals = GoalRepository::find_available_goals_by_user(self.db.as_ref(), user_id).await?;
        let ids: Vec<i32> = goals.iter().map(|g| g.id).collect();
        let translations = GoalRepository::find_translations(self.db.as_ref(), ids, lang.id).await?;

        Ok(goals
            .into_iter()
            .filter_map(|g| {
                translations.get(&g.id).map(|t| GoalDto {
                    id: g.id,
                    text: t.content.clone(),
                })
            })
            .collect())
    }

    pub async fn get_user_goals(
        &self,
        user_id: i32,
        language: &str,
    ) -> ServiceResult<Vec<UserGoalResponseDto>> {
        self.check_user(user_id).await?;
        let lang = self.language(language).await?;
        let rows =
            UserGoalRepository::find_by_user_and_status(self.db.as_ref(), user_id, GoalStatus::Active)
                .await?;
        let ids: Vec<i32> = rows.iter().map(|ug| ug.goal_id).collect();
        let texts: HashMap<i32, String> =
            GoalRepository::find_translations(self.db.as_ref(), ids, lang.id)
                .await?
                .into_iter()
                .map(|(goal_id, t)| (goal_id, t.content))
                .collect();

        rows.into_iter()
            .map(|ug| Self::to_response(ug, &texts))
            .collect()
    }

    /// 已停用或已完成的目标会被重新激活
    pub async fn save_user_goals(
        &self,
        user_id: i32,
        goals: Vec<UserGoalDto>,
        language: &str,
    ) -> ServiceResult<Vec<UserGoalResponseDto>> {
        self.check_user(user_id).await?;
        self.language(language).await?;
        let mut goal_ids = Vec::with_capacity(goals.len());
        for dto in &goals {
            let req = dto.validate()?;
            if GoalRepository::find_by_id(self.db.as_ref(), req.id)
                .await?
                .is_none()
            {
                return Err(ServiceError::not_found(message::GOAL_NOT_FOUND_BY_ID, req.id));
            }
            goal_ids.push(req.id);
        }

        let txn = self.db.begin().await?;
        for goal_id in goal_ids {
            match UserGoalRepository::find_by_user_and_goal(&txn, user_id, goal_id).await? {
                Some(existing) if existing.status != GoalStatus::Active.as_str() => {
                    UserGoalRepository::reactivate(&txn, existing).await?;
                }
                Some(_) => {}
                None => {
                    UserGoalRepository::insert(&txn, user_id, goal_id).await?;
                }
            }
        }
        txn.commit().await?;
        info!("Saved {} goal(s) for user [{}]", goals.len(), user_id);

        self.get_user_goals(user_id, language).await
    }

    /// 新建目标及其首条翻译
    pub async fn create_goal(&self, language: &str, text: &str) -> ServiceResult<GoalDto> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ServiceError::BadRequest(
                "Goal text must not be blank".to_string(),
            ));
        }
        let lang = self.language(language).await?;

        let txn = self.db.begin().await?;
        let goal = GoalRepository::insert(&txn).await?;
        GoalRepository::insert_translation(&txn, goal.id, lang.id, text).await?;
        txn.commit().await?;

        info!("Created goal [{}] ({})", goal.id, lang.code);
        Ok(GoalDto {
            id: goal.id,
            text: text.to_string(),
        })
    }

    pub async fn change_goal_status(
        &self,
        user_id: i32,
        goal_id: i32,
        status: GoalStatus,
    ) -> ServiceResult<UserGoalResponseDto> {
        let now = Utc::now().timestamp();
        let n = UserGoalRepository::change_goal_status(self.db.as_ref(), user_id, goal_id, status, now)
            .await?;
        if n == 0 {
            return Err(ServiceError::not_updated(message::USER_GOAL_NOT_UPDATED, goal_id));
        }
        let model = UserGoalRepository::find_by_user_and_goal(self.db.as_ref(), user_id, goal_id)
            .await?
            .ok_or_else(|| ServiceError::not_updated(message::USER_GOAL_NOT_UPDATED, goal_id))?;
        info!("User [{}] goal {} -> {}", user_id, goal_id, status);
        Self::to_response(model, &HashMap::new())
    }
}
