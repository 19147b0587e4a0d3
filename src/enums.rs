use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlaceStatus {
    Proposed,
    Approved,
    Declined,
    Deleted,
}

impl PlaceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceStatus::Proposed => "PROPOSED",
            PlaceStatus::Approved => "APPROVED",
            PlaceStatus::Declined => "DECLINED",
            PlaceStatus::Deleted => "DELETED",
        }
    }
}

impl FromStr for PlaceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PROPOSED" => Ok(PlaceStatus::Proposed),
            "APPROVED" => Ok(PlaceStatus::Approved),
            "DECLINED" => Ok(PlaceStatus::Declined),
            "DELETED" => Ok(PlaceStatus::Deleted),
            other => Err(format!("unknown place status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalStatus {
    Active,
    Done,
    Disabled,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Active => "ACTIVE",
            GoalStatus::Done => "DONE",
            GoalStatus::Disabled => "DISABLED",
        }
    }
}

impl FromStr for GoalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(GoalStatus::Active),
            "DONE" => Ok(GoalStatus::Done),
            "DISABLED" => Ok(GoalStatus::Disabled),
            other => Err(format!("unknown goal status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ROLE_USER")]
    User,
    #[serde(rename = "ROLE_MODERATOR")]
    Moderator,
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "ROLE_USER",
            Role::Moderator => "ROLE_MODERATOR",
            Role::Admin => "ROLE_ADMIN",
        }
    }

    /// 管理员和版主提交的地点直接通过审核
    pub fn is_privileged(&self) -> bool {
        matches!(self, Role::Moderator | Role::Admin)
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ROLE_USER" => Ok(Role::User),
            "ROLE_MODERATOR" => Ok(Role::Moderator),
            "ROLE_ADMIN" => Ok(Role::Admin),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    Blocked,
    Deactivated,
    Activated,
    Created,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Blocked => "BLOCKED",
            UserStatus::Deactivated => "DEACTIVATED",
            UserStatus::Activated => "ACTIVATED",
            UserStatus::Created => "CREATED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmailNotification {
    Disabled,
    Immediately,
    Daily,
    Weekly,
    Monthly,
}

impl EmailNotification {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmailNotification::Disabled => "DISABLED",
            EmailNotification::Immediately => "IMMEDIATELY",
            EmailNotification::Daily => "DAILY",
            EmailNotification::Weekly => "WEEKLY",
            EmailNotification::Monthly => "MONTHLY",
        }
    }
}

impl fmt::Display for PlaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_status_parses_case_insensitively() {
        assert_eq!("approved".parse::<PlaceStatus>(), Ok(PlaceStatus::Approved));
        assert_eq!(" PROPOSED ".parse::<PlaceStatus>(), Ok(PlaceStatus::Proposed));
        assert!("open".parse::<PlaceStatus>().is_err());
    }

    #[test]
    fn statuses_serialize_as_upper_case_names() {
        assert_eq!(
            serde_json::to_string(&GoalStatus::Disabled).unwrap(),
            "\"DISABLED\""
        );
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ROLE_ADMIN\"");
        assert_eq!(
            serde_json::from_str::<PlaceStatus>("\"DECLINED\"").unwrap(),
            PlaceStatus::Declined
        );
    }

    #[test]
    fn only_moderators_and_admins_are_privileged() {
        assert!(!Role::User.is_privileged());
        assert!(Role::Moderator.is_privileged());
        assert!(Role::Admin.is_privileged());
    }
}
