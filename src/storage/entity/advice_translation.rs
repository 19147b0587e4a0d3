use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

// 同一 (advice, language) 预期只有一条翻译，表结构不强制
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "advice_translations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub advice_id: i32,
    pub language_id: i32,
    pub content: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::advice::Entity",
        from = "Column::AdviceId",
        to = "super::advice::Column::Id",
        on_delete = "Cascade"
    )]
    Advice,
    #[sea_orm(
        belongs_to = "super::language::Entity",
        from = "Column::LanguageId",
        to = "super::language::Column::Id"
    )]
    Language,
}

impl Related<super::advice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Advice.def()
    }
}

impl Related<super::language::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Language.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
