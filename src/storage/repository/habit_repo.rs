use crate::storage::entity::habit::{
    ActiveModel as HabitActiveModel, Column as HabitColumn, Entity as Habit, Model as HabitModel,
};
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QueryOrder, Set};

pub struct HabitRepository;

impl HabitRepository {
    pub async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> Result<Option<HabitModel>, sea_orm::DbErr> {
        Habit::find_by_id(id).one(db).await
    }

    pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<HabitModel>, sea_orm::DbErr> {
        Habit::find().order_by_asc(HabitColumn::Id).all(db).await
    }

    pub async fn insert<C: ConnectionTrait>(
        db: &C,
        image: &str,
    ) -> Result<HabitModel, sea_orm::DbErr> {
        let am = HabitActiveModel {
            image: Set(image.to_string()),
            ..Default::default()
        };
        am.insert(db).await
    }
}
