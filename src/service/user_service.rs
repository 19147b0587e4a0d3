use crate::dto::{UserRegisterDto, UserVo};
use crate::enums::{EmailNotification, Role, UserStatus};
use crate::error::{message, ServiceError, ServiceResult};
use crate::storage::entity::user;
use crate::storage::repository::{NewUser, UserRepository};
use chrono::Utc;
use log::info;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

pub struct UserService {
    db: Arc<DatabaseConnection>,
}

impl UserService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn find_by_email(&self, email: &str) -> ServiceResult<user::Model> {
        UserRepository::find_by_email(self.db.as_ref(), email)
            .await?
            .ok_or_else(|| ServiceError::not_found(message::USER_NOT_FOUND_BY_EMAIL, email))
    }

    pub async fn find_by_id(&self, id: i32) -> ServiceResult<user::Model> {
        UserRepository::find_by_id(self.db.as_ref(), id)
            .await?
            .ok_or_else(|| ServiceError::not_found(message::USER_NOT_FOUND_BY_ID, id))
    }

    pub async fn save(&self, dto: UserRegisterDto) -> ServiceResult<UserVo> {
        dto.validate()?;
        if UserRepository::find_by_email(self.db.as_ref(), &dto.email)
            .await?
            .is_some()
        {
            return Err(ServiceError::BadRequest(format!(
                "{}{}",
                message::USER_ALREADY_REGISTERED,
                dto.email
            )));
        }
        let model = UserRepository::insert(
            self.db.as_ref(),
            NewUser {
                name: dto.name.trim().to_string(),
                email: dto.email,
                role: Role::User.as_str().to_string(),
                user_status: UserStatus::Created.as_str().to_string(),
                email_notification: EmailNotification::Disabled.as_str().to_string(),
                city: dto.city,
                refresh_token_key: format!("{:016x}", rand::random::<u64>()),
            },
        )
        .await?;
        info!("Registered user [{}]: {}", model.id, model.email);
        Ok(UserVo::from(model))
    }

    pub async fn update_last_visit(&self, id: i32) -> ServiceResult<i64> {
        let now = Utc::now().timestamp();
        let n = UserRepository::update_last_visit(self.db.as_ref(), id, now).await?;
        if n == 0 {
            return Err(ServiceError::not_found(message::USER_NOT_FOUND_BY_ID, id));
        }
        Ok(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::testing;

    fn register_dto(email: &str) -> UserRegisterDto {
        UserRegisterDto {
            name: "SuperTest".to_string(),
            email: email.to_string(),
            city: Some("New York".to_string()),
        }
    }

    #[tokio::test]
    async fn save_registers_plain_user_and_rejects_duplicates() {
        let db = testing::memory_db().await;
        let service = UserService::new(db);

        let vo = service.save(register_dto("Test@Email.com")).await.unwrap();
        assert_eq!(vo.email, "test@email.com");
        assert_eq!(vo.role, "ROLE_USER");
        assert_eq!(vo.user_status, "CREATED");

        assert!(matches!(
            service.save(register_dto("test@email.com")).await,
            Err(ServiceError::BadRequest(_))
        ));
        assert_eq!(service.find_by_email("TEST@email.com").await.unwrap().id, vo.id);
    }

    #[tokio::test]
    async fn missing_users_are_not_found() {
        let db = testing::memory_db().await;
        let service = UserService::new(db);
        assert!(matches!(
            service.find_by_email("nobody@email.com").await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            service.find_by_id(1).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            service.update_last_visit(1).await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
