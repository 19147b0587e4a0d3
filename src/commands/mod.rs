pub mod app_command;

pub use app_command::{AppCommand, HELP};

use crate::app_state::AppEvent;
use crate::error::{ServiceError, ServiceResult};
use crate::service::AppServices;
use log::{info, warn};
use serde::Serialize;
use serde_json::{json, Value};

fn to_json<T: Serialize>(value: T) -> ServiceResult<Value> {
    serde_json::to_value(value).map_err(|e| ServiceError::Mapping(e.to_string()))
}

/// 执行一条命令并把结果转换为输出事件
pub async fn dispatch(cmd: AppCommand, services: &AppServices, default_language: &str) -> AppEvent {
    match cmd {
        AppCommand::Help => AppEvent::Message(HELP.to_string()),
        AppCommand::Quit => AppEvent::Quit,
        AppCommand::Unknown(msg) if msg.is_empty() => AppEvent::Message(String::new()),
        AppCommand::Unknown(msg) => AppEvent::Error(msg),
        cmd => {
            info!("Executing {:?}", cmd);
            match execute(cmd, services, default_language).await {
                Ok(value) => AppEvent::Json(value),
                Err(e) => {
                    warn!("Command failed: {}", e);
                    AppEvent::Error(e.to_string())
                }
            }
        }
    }
}

async fn execute(
    cmd: AppCommand,
    services: &AppServices,
    default_language: &str,
) -> ServiceResult<Value> {
    let lang = |language: Option<String>| language.unwrap_or_else(|| default_language.to_string());

    match cmd {
        AppCommand::PlacesByStatus { status } => {
            to_json(services.places.get_places_by_status(status).await?)
        }
        AppCommand::PlaceGet { id } => to_json(services.places.find_by_id(id).await?),
        AppCommand::PlaceInfo { id } => to_json(services.places.get_access_by_id(id).await?),
        AppCommand::PlaceStatus { id, status } => {
            to_json(services.places.update_status(id, status).await?)
        }
        AppCommand::PlaceDelete { id } => {
            let deleted = services.places.delete_by_id(id).await?;
            Ok(json!({ "id": id, "deleted": deleted }))
        }
        AppCommand::PlaceRate { id } => {
            let rate = services.places.average_rate(id).await?;
            Ok(json!({ "id": id, "rate": rate }))
        }
        AppCommand::PlacesAll => to_json(services.places.find_all().await?),
        AppCommand::PlaceExists { id } => {
            let exists = services.places.exists_by_id(id).await?;
            Ok(json!({ "id": id, "exists": exists }))
        }
        AppCommand::PlaceUpdate(place) => to_json(services.places.update(place).await?),
        AppCommand::PlaceComment { id, email, text } => {
            to_json(services.places.add_comment(id, &email, &text).await?)
        }
        AppCommand::PlaceRateAdd { id, email, rate } => {
            let rate = services.places.add_rate(id, &email, rate).await?;
            Ok(json!({ "id": id, "rate": rate }))
        }
        AppCommand::PlacesBounds(bounds) => {
            to_json(services.places.find_places_by_maps_bounds(bounds).await?)
        }
        AppCommand::PlacePropose { email, dto } => to_json(services.places.save(dto, &email).await?),
        AppCommand::Advices => to_json(services.advices.get_all_advices().await?),
        AppCommand::AdviceGet { id } => to_json(services.advices.get_advice_by_id(id).await?),
        AppCommand::AdviceRandom { habit_id, language } => to_json(
            services
                .advices
                .get_random_advice_by_habit_id_and_language(habit_id, &lang(language))
                .await?,
        ),
        AppCommand::AdviceFind { language, content } => to_json(
            services
                .advices
                .get_advice_by_name(&language, &content)
                .await?,
        ),
        AppCommand::AdviceAdd(dto) => to_json(services.advices.save(dto).await?),
        AppCommand::AdviceUpdate { id, dto } => to_json(services.advices.update(dto, id).await?),
        AppCommand::AdviceDelete { id } => {
            let id = services.advices.delete(id).await?;
            Ok(json!({ "id": id }))
        }
        AppCommand::Habits => to_json(services.habits.get_all().await?),
        AppCommand::HabitAdd { image } => to_json(services.habits.save(&image).await?),
        AppCommand::Languages => to_json(services.languages.find_all_codes().await?),
        AppCommand::LanguageAdd { code } => to_json(services.languages.save(&code).await?),
        AppCommand::LanguageGet { code } => to_json(services.languages.find_by_code(&code).await?),
        AppCommand::GoalAdd { language, text } => {
            to_json(services.goals.create_goal(&language, &text).await?)
        }
        AppCommand::GoalsAvailable { user_id, language } => to_json(
            services
                .goals
                .get_available_goals(user_id, &lang(language))
                .await?,
        ),
        AppCommand::GoalsMine { user_id, language } => to_json(
            services
                .goals
                .get_user_goals(user_id, &lang(language))
                .await?,
        ),
        AppCommand::GoalsAdd {
            user_id,
            language,
            goals,
        } => to_json(
            services
                .goals
                .save_user_goals(user_id, goals, &language)
                .await?,
        ),
        AppCommand::GoalStatus {
            user_id,
            goal_id,
            status,
        } => to_json(
            services
                .goals
                .change_goal_status(user_id, goal_id, status)
                .await?,
        ),
        AppCommand::UserAdd(dto) => to_json(services.users.save(dto).await?),
        AppCommand::UserGet { email } => {
            let user = services.users.find_by_email(&email).await?;
            to_json(crate::dto::UserVo::from(user))
        }
        AppCommand::UserById { id } => {
            let user = services.users.find_by_id(id).await?;
            to_json(crate::dto::UserVo::from(user))
        }
        AppCommand::UserVisit { id } => {
            let at = services.users.update_last_visit(id).await?;
            Ok(json!({ "id": id, "lastVisit": at }))
        }
        AppCommand::Help | AppCommand::Quit | AppCommand::Unknown(_) => Ok(Value::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::testing;

    async fn services() -> AppServices {
        AppServices::new(testing::memory_db().await)
    }

    async fn run(services: &AppServices, line: &str) -> AppEvent {
        dispatch(line.parse().unwrap(), services, "en").await
    }

    #[tokio::test]
    async fn console_round_trip_through_services() {
        let services = services().await;
        let user = run(
            &services,
            r#"user add {"name": "Olena", "email": "olena@greencity.ua", "city": "Lviv"}"#,
        )
        .await;
        let user_id = match user {
            AppEvent::Json(v) => v["id"].as_i64().unwrap(),
            other => panic!("unexpected {:?}", other),
        };

        match run(&services, "user get olena@greencity.ua").await {
            AppEvent::Json(v) => {
                assert_eq!(v["id"].as_i64(), Some(user_id));
                assert_eq!(v["role"], "ROLE_USER");
            }
            other => panic!("unexpected {:?}", other),
        }

        match run(&services, "places status PROPOSED").await {
            AppEvent::Json(v) => assert_eq!(v, json!([])),
            other => panic!("unexpected {:?}", other),
        }
    }

    fn json(event: AppEvent) -> Value {
        match event {
            AppEvent::Json(v) => v,
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn fresh_database_can_be_populated_from_the_console() {
        let services = services().await;
        json(run(&services, "language add en").await);
        let habit = json(run(&services, "habit add bag.png").await);
        let user = json(
            run(
                &services,
                r#"user add {"name": "Olena", "email": "olena@greencity.ua"}"#,
            )
            .await,
        );

        let advice = format!(
            r#"advice add {{"habit": {{"id": {}}}, "translations": [{{"language": {{"id": 0, "code": "en"}}, "content": "Carry a bag"}}]}}"#,
            habit["id"]
        );
        assert_eq!(json(run(&services, &advice).await)["habit"]["image"], "bag.png");

        let goal = json(run(&services, "goal add en Plant a tree").await);
        assert_eq!(goal["text"], "Plant a tree");
        let picked = json(
            run(
                &services,
                &format!(
                    r#"goals add {} en [{{"goal": {{"id": {}}}}}]"#,
                    user["id"], goal["id"]
                ),
            )
            .await,
        );
        assert_eq!(picked[0]["status"], "ACTIVE");

        let place = json(
            run(
                &services,
                r#"place propose olena@greencity.ua {"name": "Eco Cafe", "location": {"address": "Rynok 1", "lat": 49.84, "lng": 24.03}, "category": {"name": "Cafe"}}"#,
            )
            .await,
        );
        let id = place["id"].as_i64().unwrap();
        json(run(&services, &format!("place comment {} olena@greencity.ua Nice place", id)).await);
        let rated = json(run(&services, &format!("place rate add {} olena@greencity.ua 4", id)).await);
        assert_eq!(rated["rate"], 4);

        let info = json(run(&services, &format!("place info {}", id)).await);
        assert_eq!(info["comments"][0]["text"], "Nice place");
        assert_eq!(info["rate"], 4.0);
        assert_eq!(json(run(&services, "places all").await).as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn non_finite_bounds_are_reported() {
        let services = services().await;
        assert!(matches!(
            run(&services, "places bounds NaN 1 2 3").await,
            AppEvent::Error(_)
        ));
    }

    #[tokio::test]
    async fn service_errors_become_error_events() {
        let services = services().await;
        assert!(matches!(
            run(&services, "advice delete 42").await,
            AppEvent::Error(msg) if msg.contains("42")
        ));
        assert!(matches!(run(&services, "place get 1").await, AppEvent::Error(_)));
        assert!(matches!(run(&services, "quit").await, AppEvent::Quit));
        assert!(matches!(run(&services, "nonsense").await, AppEvent::Error(_)));
    }
}
