pub mod advice_service;
pub mod goal_service;
pub mod habit_service;
pub mod language_service;
pub mod place_service;
pub mod user_service;

pub use advice_service::{AdviceService, AdviceServiceImpl};
pub use goal_service::GoalService;
pub use habit_service::{HabitService, HabitServiceImpl};
pub use language_service::LanguageService;
pub use place_service::{PlaceService, PlaceServiceImpl};
pub use user_service::UserService;

use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// 后台任务持有的全部服务
#[derive(Clone)]
pub struct AppServices {
    pub places: Arc<dyn PlaceService>,
    pub advices: Arc<dyn AdviceService>,
    pub habits: Arc<dyn HabitService>,
    pub goals: Arc<GoalService>,
    pub users: Arc<UserService>,
    pub languages: Arc<LanguageService>,
}

impl AppServices {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        let users = Arc::new(UserService::new(db.clone()));
        let habits: Arc<dyn HabitService> = Arc::new(HabitServiceImpl::new(db.clone()));
        Self {
            places: Arc::new(PlaceServiceImpl::new(db.clone(), users.clone())),
            advices: Arc::new(AdviceServiceImpl::new(db.clone(), habits.clone())),
            habits,
            goals: Arc::new(GoalService::new(db.clone())),
            users,
            languages: Arc::new(LanguageService::new(db)),
        }
    }
}
