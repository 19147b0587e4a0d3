pub mod advice;
pub mod advice_translation;
pub mod category;
pub mod comment;
pub mod discount_value;
pub mod goal;
pub mod goal_translation;
pub mod habit;
pub mod language;
pub mod location;
pub mod opening_hours;
pub mod place;
pub mod rate;
pub mod specification;
pub mod user;
pub mod user_goal;
