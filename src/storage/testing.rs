//! 测试用的内存库与数据构造

use crate::config::DbConfig;
use crate::dto::LocationAddressAndGeoDto;
use crate::enums::{EmailNotification, PlaceStatus, Role, UserStatus};
use crate::storage::entity::{advice, habit, language, place, user};
use crate::storage::establish_connection;
use crate::storage::repository::{
    AdviceRepository, AdviceTranslationRepository, HabitRepository, LanguageRepository, NewPlace,
    NewUser, PlaceRepository, UserRepository,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

pub async fn memory_db() -> Arc<DatabaseConnection> {
    let db = establish_connection(&DbConfig::in_memory())
        .await
        .expect("in-memory database");
    Arc::new(db)
}

pub async fn language(db: &DatabaseConnection, code: &str) -> language::Model {
    LanguageRepository::insert(db, code).await.unwrap()
}

pub async fn habit(db: &DatabaseConnection, image: &str) -> habit::Model {
    HabitRepository::insert(db, image).await.unwrap()
}

pub async fn user(db: &DatabaseConnection, email: &str, role: Role) -> user::Model {
    UserRepository::insert(
        db,
        NewUser {
            name: "SuperTest".to_string(),
            email: email.to_string(),
            role: role.as_str().to_string(),
            user_status: UserStatus::Activated.as_str().to_string(),
            email_notification: EmailNotification::Disabled.as_str().to_string(),
            city: Some("New York".to_string()),
            refresh_token_key: "secret".to_string(),
        },
    )
    .await
    .unwrap()
}

/// 创建一条 advice 以及给定语言下的翻译
pub async fn advice(
    db: &DatabaseConnection,
    habit_id: i32,
    translations: &[(&language::Model, &str)],
) -> advice::Model {
    let model = AdviceRepository::insert(db, habit_id).await.unwrap();
    for (lang, content) in translations {
        AdviceTranslationRepository::insert(db, model.id, lang.id, content)
            .await
            .unwrap();
    }
    model
}

pub async fn place(
    db: &DatabaseConnection,
    name: &str,
    lat: f64,
    lng: f64,
    status: PlaceStatus,
) -> place::Model {
    let loc = PlaceRepository::insert_location(
        db,
        &LocationAddressAndGeoDto {
            address: format!("{} street", name),
            lat,
            lng,
        },
    )
    .await
    .unwrap();
    PlaceRepository::insert(
        db,
        NewPlace {
            name: name.to_string(),
            location_id: loc.id,
            category_id: None,
            author_id: None,
            status,
        },
    )
    .await
    .unwrap()
}
