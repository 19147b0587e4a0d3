use crate::storage::entity::habit;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitIdRequestDto {
    pub id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitVo {
    pub id: i32,
    pub image: String,
}

impl From<habit::Model> for HabitVo {
    fn from(model: habit::Model) -> Self {
        Self {
            id: model.id,
            image: model.image,
        }
    }
}
