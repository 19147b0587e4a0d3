use crate::storage::entity::advice::{
    ActiveModel as AdviceActiveModel, Column as AdviceColumn, Entity as Advice,
    Model as AdviceModel,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QuerySelect, Set,
};

pub struct AdviceRepository;

impl AdviceRepository {
    pub async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> Result<Option<AdviceModel>, sea_orm::DbErr> {
        Advice::find_by_id(id).one(db).await
    }

    pub async fn find_ids_by_habit<C: ConnectionTrait>(
        db: &C,
        habit_id: i32,
    ) -> Result<Vec<i32>, sea_orm::DbErr> {
        Advice::find()
            .select_only()
            .column(AdviceColumn::Id)
            .filter(AdviceColumn::HabitId.eq(habit_id))
            .into_tuple::<i32>()
            .all(db)
            .await
    }

    pub async fn insert<C: ConnectionTrait>(
        db: &C,
        habit_id: i32,
    ) -> Result<AdviceModel, sea_orm::DbErr> {
        let am = AdviceActiveModel {
            habit_id: Set(habit_id),
            ..Default::default()
        };
        am.insert(db).await
    }

    pub async fn update_habit<C: ConnectionTrait>(
        db: &C,
        advice: AdviceModel,
        habit_id: i32,
    ) -> Result<AdviceModel, sea_orm::DbErr> {
        let mut am: AdviceActiveModel = advice.into();
        am.habit_id = Set(habit_id);
        am.update(db).await
    }

    /// 返回受影响行数，0 表示不存在
    pub async fn delete_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<u64, sea_orm::DbErr> {
        let res = Advice::delete_by_id(id).exec(db).await?;
        Ok(res.rows_affected)
    }

    #[cfg(test)]
    pub async fn count<C: ConnectionTrait>(db: &C) -> Result<u64, sea_orm::DbErr> {
        use sea_orm::PaginatorTrait;
        Advice::find().count(db).await
    }
}
