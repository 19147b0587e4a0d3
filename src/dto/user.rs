use crate::enums::GoalStatus;
use crate::error::{message, ServiceError};
use crate::storage::entity::user;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalRequestDto {
    pub id: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGoalDto {
    #[serde(default)]
    pub goal: Option<GoalRequestDto>,
}

impl UserGoalDto {
    pub fn validate(&self) -> Result<GoalRequestDto, ServiceError> {
        self.goal
            .ok_or_else(|| ServiceError::BadRequest(message::GOAL_MUST_NOT_BE_NULL.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGoalResponseDto {
    pub id: i32,
    pub goal_id: i32,
    pub text: Option<String>,
    pub status: GoalStatus,
    pub date_completed: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserVo {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub user_status: String,
    pub email_notification: String,
    pub city: Option<String>,
    pub date_of_registration: i64,
    pub last_visit: i64,
}

impl From<user::Model> for UserVo {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            role: model.role,
            user_status: model.user_status,
            email_notification: model.email_notification,
            city: model.city,
            date_of_registration: model.date_of_registration,
            last_visit: model.last_visit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRegisterDto {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub city: Option<String>,
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").expect("valid email regex")
    })
}

impl UserRegisterDto {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.name.trim().is_empty() {
            return Err(ServiceError::BadRequest(
                "User name must not be blank".to_string(),
            ));
        }
        if !email_regex().is_match(self.email.trim()) {
            return Err(ServiceError::BadRequest(format!(
                "Invalid email: {}",
                self.email
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_goal_without_goal_is_rejected() {
        let dto: UserGoalDto = serde_json::from_str("{}").unwrap();
        match dto.validate() {
            Err(ServiceError::BadRequest(msg)) => assert_eq!(msg, message::GOAL_MUST_NOT_BE_NULL),
            other => panic!("unexpected: {:?}", other),
        }

        let dto: UserGoalDto = serde_json::from_str(r#"{"goal":{"id":4}}"#).unwrap();
        assert_eq!(dto.validate().unwrap().id, 4);
    }

    #[test]
    fn register_dto_checks_email() {
        let mut dto = UserRegisterDto {
            name: "SuperTest".to_string(),
            email: "test@email.com".to_string(),
            city: Some("New York".to_string()),
        };
        assert!(dto.validate().is_ok());
        dto.email = "not-an-email".to_string();
        assert!(dto.validate().is_err());
    }
}
