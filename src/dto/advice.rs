use crate::dto::language::normalize_code;
use crate::dto::{HabitIdRequestDto, HabitVo, LanguageTranslationDto};
use crate::error::ServiceError;
use crate::storage::entity::advice;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceDto {
    pub id: i32,
    pub habit: HabitIdRequestDto,
    pub translations: Vec<LanguageTranslationDto>,
}

impl AdviceDto {
    pub fn from_model(model: advice::Model, translations: Vec<LanguageTranslationDto>) -> Self {
        Self {
            id: model.id,
            habit: HabitIdRequestDto { id: model.habit_id },
            translations,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvicePostDto {
    #[serde(default)]
    pub translations: Vec<LanguageTranslationDto>,
    pub habit: HabitIdRequestDto,
}

impl AdvicePostDto {
    pub fn new(translations: Vec<LanguageTranslationDto>, habit: HabitIdRequestDto) -> Self {
        Self {
            translations,
            habit,
        }
    }

    /// 新建时要求至少一条翻译；更新时允许为空（只改 habit）
    pub fn validate(&self, require_translations: bool) -> Result<(), ServiceError> {
        if require_translations && self.translations.is_empty() {
            return Err(ServiceError::BadRequest(
                "Advice must have at least one translation".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for t in &self.translations {
            if t.content.trim().is_empty() {
                return Err(ServiceError::BadRequest(format!(
                    "Advice content must not be blank for language {}",
                    t.language.code
                )));
            }
            if !seen.insert(normalize_code(&t.language.code)) {
                return Err(ServiceError::BadRequest(format!(
                    "Duplicate advice translation for language {}",
                    t.language.code
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceVo {
    pub id: i32,
    pub habit: HabitVo,
    pub translations: Vec<LanguageTranslationDto>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::LanguageDto;

    fn en(content: &str) -> LanguageTranslationDto {
        LanguageTranslationDto::new(
            LanguageDto {
                id: 1,
                code: "en".to_string(),
            },
            content,
        )
    }

    #[test]
    fn post_dto_reads_camel_case_json() {
        let json = r#"{"translations":[{"language":{"id":1,"code":"en"},"content":"hello"}],"habit":{"id":3}}"#;
        let dto: AdvicePostDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.habit.id, 3);
        assert_eq!(dto.translations, vec![en("hello")]);
    }

    #[test]
    fn validate_rejects_duplicate_languages_and_blank_content() {
        let habit = HabitIdRequestDto { id: 1 };
        let dup = AdvicePostDto::new(vec![en("a"), en("b")], habit);
        assert!(matches!(dup.validate(true), Err(ServiceError::BadRequest(_))));

        let blank = AdvicePostDto::new(vec![en("  ")], habit);
        assert!(matches!(blank.validate(false), Err(ServiceError::BadRequest(_))));

        let mut upper = en("b");
        upper.language.code = " EN ".to_string();
        let mixed = AdvicePostDto::new(vec![en("a"), upper], habit);
        assert!(mixed.validate(true).is_err());

        let empty = AdvicePostDto::new(Vec::new(), habit);
        assert!(empty.validate(true).is_err());
        assert!(empty.validate(false).is_ok());
    }
}
