pub const ADVICE_NOT_FOUND_BY_ID: &str = "The advice does not exist by this id: ";
pub const ADVICE_NOT_FOUND_BY_NAME: &str = "The advice does not exist by this name: ";
pub const ADVICE_NOT_FOUND_BY_HABIT_AND_LANGUAGE: &str =
    "The advice does not exist for this habit and language: ";
pub const ADVICE_NOT_UPDATED: &str = "Advice is not updated, id: ";
pub const ADVICE_NOT_DELETED: &str = "Advice is not deleted, id: ";
pub const ADVICE_NOT_SAVED: &str = "Advice is not saved: ";

pub const HABIT_NOT_FOUND_BY_ID: &str = "The habit does not exist by this id: ";
pub const LANGUAGE_NOT_FOUND_BY_CODE: &str = "The language does not exist by this code: ";
pub const LANGUAGE_ALREADY_EXISTS: &str = "Language already exists: ";

pub const PLACE_NOT_FOUND_BY_ID: &str = "The place does not exist by this id: ";
pub const PLACE_NOT_UPDATED: &str = "Place is not updated, id: ";
pub const PLACE_NOT_DELETED: &str = "Place is not deleted, id: ";
pub const PLACE_NOT_SAVED: &str = "Place is not saved: ";
pub const BAD_MAP_BOUNDS: &str = "South-west corner must be below and left of north-east corner: ";

pub const USER_NOT_FOUND_BY_ID: &str = "The user does not exist by this id: ";
pub const USER_NOT_FOUND_BY_EMAIL: &str = "The user does not exist by this email: ";
pub const USER_ALREADY_REGISTERED: &str = "User with this email is already registered: ";

pub const GOAL_NOT_FOUND_BY_ID: &str = "The goal does not exist by this id: ";
pub const USER_GOAL_NOT_UPDATED: &str = "User has no goal with id: ";
pub const GOAL_MUST_NOT_BE_NULL: &str = "Goal must not be null";
