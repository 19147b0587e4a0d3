use crate::storage::entity::{advice_translation, goal_translation, language};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageDto {
    pub id: i32,
    pub code: String,
}

/// 语言代码统一为去空白的小写形式
pub fn normalize_code(code: &str) -> String {
    code.trim().to_lowercase()
}

impl From<language::Model> for LanguageDto {
    fn from(model: language::Model) -> Self {
        Self {
            id: model.id,
            code: model.code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageTranslationDto {
    pub language: LanguageDto,
    pub content: String,
}

impl LanguageTranslationDto {
    pub fn new(language: LanguageDto, content: impl Into<String>) -> Self {
        Self {
            language,
            content: content.into(),
        }
    }
}

impl From<(advice_translation::Model, language::Model)> for LanguageTranslationDto {
    fn from((translation, language): (advice_translation::Model, language::Model)) -> Self {
        Self {
            language: LanguageDto::from(language),
            content: translation.content,
        }
    }
}

impl From<(goal_translation::Model, language::Model)> for LanguageTranslationDto {
    fn from((translation, language): (goal_translation::Model, language::Model)) -> Self {
        Self {
            language: LanguageDto::from(language),
            content: translation.content,
        }
    }
}
