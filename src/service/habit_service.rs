use crate::dto::HabitVo;
use crate::error::{message, ServiceError, ServiceResult};
use crate::storage::repository::HabitRepository;
use async_trait::async_trait;
use log::info;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

#[async_trait]
pub trait HabitService: Send + Sync {
    async fn get_by_id(&self, id: i32) -> ServiceResult<HabitVo>;
    async fn get_all(&self) -> ServiceResult<Vec<HabitVo>>;
    async fn save(&self, image: &str) -> ServiceResult<HabitVo>;
}

pub struct HabitServiceImpl {
    db: Arc<DatabaseConnection>,
}

impl HabitServiceImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HabitService for HabitServiceImpl {
    async fn get_by_id(&self, id: i32) -> ServiceResult<HabitVo> {
        HabitRepository::find_by_id(self.db.as_ref(), id)
            .await?
            .map(HabitVo::from)
            .ok_or_else(|| ServiceError::not_found(message::HABIT_NOT_FOUND_BY_ID, id))
    }

    async fn get_all(&self) -> ServiceResult<Vec<HabitVo>> {
        let rows = HabitRepository::find_all(self.db.as_ref()).await?;
        Ok(rows.into_iter().map(HabitVo::from).collect())
    }

    async fn save(&self, image: &str) -> ServiceResult<HabitVo> {
        let image = image.trim();
        if image.is_empty() {
            return Err(ServiceError::BadRequest(
                "Habit image must not be blank".to_string(),
            ));
        }
        let model = HabitRepository::insert(self.db.as_ref(), image).await?;
        info!("Created habit [{}]", model.id);
        Ok(HabitVo::from(model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::testing;

    #[tokio::test]
    async fn get_by_id_maps_habit() {
        let db = testing::memory_db().await;
        let habit = testing::habit(&db, "image.png").await;
        let service = HabitServiceImpl::new(db.clone());

        let vo = service.get_by_id(habit.id).await.unwrap();
        assert_eq!(
            vo,
            HabitVo {
                id: habit.id,
                image: "image.png".to_string()
            }
        );
        assert_eq!(service.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn save_trims_image_and_rejects_blank() {
        let db = testing::memory_db().await;
        let service = HabitServiceImpl::new(db);
        let vo = service.save(" bag.png ").await.unwrap();
        assert_eq!(service.get_by_id(vo.id).await.unwrap().image, "bag.png");
        assert!(matches!(
            service.save("  ").await,
            Err(ServiceError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn get_by_id_missing_is_not_found() {
        let db = testing::memory_db().await;
        let service = HabitServiceImpl::new(db);
        assert!(matches!(
            service.get_by_id(42).await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
