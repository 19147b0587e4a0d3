pub mod advice_repo;
pub mod advice_translation_repo;
pub mod goal_repo;
pub mod habit_repo;
pub mod language_repo;
pub mod place_detail_repo;
pub mod place_repo;
pub mod user_goal_repo;
pub mod user_repo;

pub use advice_repo::AdviceRepository;
pub use advice_translation_repo::AdviceTranslationRepository;
pub use goal_repo::GoalRepository;
pub use habit_repo::HabitRepository;
pub use language_repo::LanguageRepository;
pub use place_detail_repo::PlaceDetailRepository;
pub use place_repo::{NewPlace, PlaceRepository};
pub use user_goal_repo::UserGoalRepository;
pub use user_repo::{NewUser, UserRepository};
