use crate::enums::GoalStatus;
use crate::storage::entity::user_goal::{
    ActiveModel as UserGoalActiveModel, Column as UserGoalColumn, Entity as UserGoal,
    Model as UserGoalModel,
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

pub struct UserGoalRepository;

impl UserGoalRepository {
    pub async fn find_by_user_and_goal<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
        goal_id: i32,
    ) -> Result<Option<UserGoalModel>, sea_orm::DbErr> {
        UserGoal::find()
            .filter(UserGoalColumn::UserId.eq(user_id))
            .filter(UserGoalColumn::GoalId.eq(goal_id))
            .one(db)
            .await
    }

    pub async fn find_by_user_and_status<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
        status: GoalStatus,
    ) -> Result<Vec<UserGoalModel>, sea_orm::DbErr> {
        UserGoal::find()
            .filter(UserGoalColumn::UserId.eq(user_id))
            .filter(UserGoalColumn::Status.eq(status.as_str()))
            .order_by_asc(UserGoalColumn::Id)
            .all(db)
            .await
    }

    pub async fn insert<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
        goal_id: i32,
    ) -> Result<UserGoalModel, sea_orm::DbErr> {
        let am = UserGoalActiveModel {
            user_id: Set(user_id),
            goal_id: Set(goal_id),
            status: Set(GoalStatus::Active.as_str().to_string()),
            date_completed: Set(None),
            ..Default::default()
        };
        am.insert(db).await
    }

    pub async fn reactivate<C: ConnectionTrait>(
        db: &C,
        model: UserGoalModel,
    ) -> Result<UserGoalModel, sea_orm::DbErr> {
        let mut am: UserGoalActiveModel = model.into();
        am.status = Set(GoalStatus::Active.as_str().to_string());
        am.date_completed = Set(None);
        am.update(db).await
    }

    /// 无条件写入状态，返回受影响行数
    pub async fn change_goal_status<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
        goal_id: i32,
        status: GoalStatus,
        at: i64,
    ) -> Result<u64, sea_orm::DbErr> {
        let res = UserGoal::update_many()
            .col_expr(UserGoalColumn::Status, Expr::value(status.as_str()))
            .col_expr(UserGoalColumn::DateCompleted, Expr::value(Some(at)))
            .filter(UserGoalColumn::UserId.eq(user_id))
            .filter(UserGoalColumn::GoalId.eq(goal_id))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }
}
