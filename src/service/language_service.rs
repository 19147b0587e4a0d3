use crate::dto::language::normalize_code;
use crate::dto::LanguageDto;
use crate::error::{message, ServiceError, ServiceResult};
use crate::storage::repository::LanguageRepository;
use log::info;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

pub struct LanguageService {
    db: Arc<DatabaseConnection>,
}

impl LanguageService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn find_by_code(&self, code: &str) -> ServiceResult<LanguageDto> {
        LanguageRepository::find_by_code(self.db.as_ref(), code)
            .await?
            .map(LanguageDto::from)
            .ok_or_else(|| ServiceError::not_found(message::LANGUAGE_NOT_FOUND_BY_CODE, code))
    }

    pub async fn save(&self, code: &str) -> ServiceResult<LanguageDto> {
        let code = normalize_code(code);
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ServiceError::BadRequest(format!(
                "Language code must be letters only, got '{}'",
                code
            )));
        }
        if LanguageRepository::find_by_code(self.db.as_ref(), &code)
            .await?
            .is_some()
        {
            return Err(ServiceError::BadRequest(format!(
                "{}{}",
                message::LANGUAGE_ALREADY_EXISTS,
                code
            )));
        }
        let model = LanguageRepository::insert(self.db.as_ref(), &code).await?;
        info!("Added language [{}] {}", model.id, model.code);
        Ok(LanguageDto::from(model))
    }

    pub async fn find_all_codes(&self) -> ServiceResult<Vec<String>> {
        let rows = LanguageRepository::find_all(self.db.as_ref()).await?;
        Ok(rows.into_iter().map(|l| l.code).collect())
    }
}
