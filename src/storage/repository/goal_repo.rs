use crate::enums::GoalStatus;
use crate::storage::entity::goal::{
    ActiveModel as GoalActiveModel, Column as GoalColumn, Entity as Goal, Model as GoalModel,
};
use crate::storage::entity::goal_translation::{
    ActiveModel as GoalTranslationActiveModel, Column as GoalTranslationColumn,
    Entity as GoalTranslation, Model as GoalTranslationModel,
};
use crate::storage::entity::user_goal::{Column as UserGoalColumn, Entity as UserGoal};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use std::collections::HashMap;

pub struct GoalRepository;

impl GoalRepository {
    pub async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> Result<Option<GoalModel>, sea_orm::DbErr> {
        Goal::find_by_id(id).one(db).await
    }

    /// 用户尚未处于 ACTIVE 状态的目标
    pub async fn find_available_goals_by_user<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
    ) -> Result<Vec<GoalModel>, sea_orm::DbErr> {
        let active: Vec<i32> = UserGoal::find()
            .select_only()
            .column(UserGoalColumn::GoalId)
            .filter(UserGoalColumn::UserId.eq(user_id))
            .filter(UserGoalColumn::Status.eq(GoalStatus::Active.as_str()))
            .into_tuple::<i32>()
            .all(db)
            .await?;

        let mut query = Goal::find().order_by_asc(GoalColumn::Id);
        if !active.is_empty() {
            query = query.filter(GoalColumn::Id.is_not_in(active));
        }
        query.all(db).await
    }

    /// goal_id -> 指定语言的翻译
    pub async fn find_translations<C: ConnectionTrait>(
        db: &C,
        goal_ids: Vec<i32>,
        language_id: i32,
    ) -> Result<HashMap<i32, GoalTranslationModel>, sea_orm::DbErr> {
        if goal_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = GoalTranslation::find()
            .filter(GoalTranslationColumn::GoalId.is_in(goal_ids))
            .filter(GoalTranslationColumn::LanguageId.eq(language_id))
            .order_by_asc(GoalTranslationColumn::Id)
            .all(db)
            .await?;
        let mut map = HashMap::new();
        for row in rows {
            map.entry(row.goal_id).or_insert(row);
        }
        Ok(map)
    }

    pub async fn insert<C: ConnectionTrait>(db: &C) -> Result<GoalModel, sea_orm::DbErr> {
        let am = GoalActiveModel {
            id: NotSet,
            created_at: Set(Utc::now().timestamp()),
        };
        am.insert(db).await
    }

    pub async fn insert_translation<C: ConnectionTrait>(
        db: &C,
        goal_id: i32,
        language_id: i32,
        content: &str,
    ) -> Result<GoalTranslationModel, sea_orm::DbErr> {
        let am = GoalTranslationActiveModel {
            goal_id: Set(goal_id),
            language_id: Set(language_id),
            content: Set(content.to_string()),
            ..Default::default()
        };
        am.insert(db).await
    }
}
