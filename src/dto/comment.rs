use crate::storage::entity::{comment, user};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub id: i32,
    pub text: String,
    pub created_date: i64,
    pub author_name: String,
}

impl From<(comment::Model, Option<user::Model>)> for CommentDto {
    fn from((c, author): (comment::Model, Option<user::Model>)) -> Self {
        Self {
            id: c.id,
            text: c.text,
            created_date: c.created_date,
            author_name: author.map(|u| u.name).unwrap_or_default(),
        }
    }
}
