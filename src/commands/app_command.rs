use crate::dto::{AdvicePostDto, MapBoundsDto, PlaceAddDto, UserGoalDto, UserRegisterDto};
use crate::enums::{GoalStatus, PlaceStatus};
use crate::storage::entity::place;
use serde::de::DeserializeOwned;
use std::str::FromStr;

pub const HELP: &str = "\
places status <STATUS> | places all
place get <id> | place info <id> | place exists <id> | place status <id> <STATUS>
place delete <id> | place rate <id> | place update <place json>
place comment <id> <email> <text...> | place rate add <id> <email> <1-5>
places bounds <neLat> <neLng> <swLat> <swLng>
place propose <email> <PlaceAddDto json>
advices | advice get <id> | advice random <habitId> [lang]
advice find <lang> <content...>
advice add <AdvicePostDto json> | advice update <id> <AdvicePostDto json>
advice delete <id>
habits | habit add <image>
languages | language add <code> | language get <code>
goals available <userId> [lang] | goals mine <userId> [lang]
goals add <userId> <lang> <[UserGoalDto] json>
goal add <lang> <text...> | goal status <userId> <goalId> <STATUS>
user add <UserRegisterDto json> | user get <email> | user id <id> | user visit <id>
help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    PlacesByStatus {
        status: PlaceStatus,
    },
    PlaceGet {
        id: i32,
    },
    PlaceInfo {
        id: i32,
    },
    PlaceStatus {
        id: i32,
        status: PlaceStatus,
    },
    PlaceDelete {
        id: i32,
    },
    PlaceRate {
        id: i32,
    },
    PlacesAll,
    PlaceExists {
        id: i32,
    },
    PlaceUpdate(place::Model),
    PlaceComment {
        id: i32,
        email: String,
        text: String,
    },
    PlaceRateAdd {
        id: i32,
        email: String,
        rate: u8,
    },
    PlacesBounds(MapBoundsDto),
    PlacePropose {
        email: String,
        dto: PlaceAddDto,
    },
    Advices,
    AdviceGet {
        id: i32,
    },
    AdviceRandom {
        habit_id: i32,
        language: Option<String>,
    },
    AdviceFind {
        language: String,
        content: String,
    },
    AdviceAdd(AdvicePostDto),
    AdviceUpdate {
        id: i32,
        dto: AdvicePostDto,
    },
    AdviceDelete {
        id: i32,
    },
    Habits,
    HabitAdd {
        image: String,
    },
    Languages,
    LanguageAdd {
        code: String,
    },
    LanguageGet {
        code: String,
    },
    GoalsAvailable {
        user_id: i32,
        language: Option<String>,
    },
    GoalsMine {
        user_id: i32,
        language: Option<String>,
    },
    GoalsAdd {
        user_id: i32,
        language: String,
        goals: Vec<UserGoalDto>,
    },
    GoalAdd {
        language: String,
        text: String,
    },
    GoalStatus {
        user_id: i32,
        goal_id: i32,
        status: GoalStatus,
    },
    UserById {
        id: i32,
    },
    UserAdd(UserRegisterDto),
    UserGet {
        email: String,
    },
    UserVisit {
        id: i32,
    },
    Help,
    Quit,
    Unknown(String),
}

impl FromStr for AppCommand {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        if parts.is_empty() {
            return Ok(AppCommand::Unknown("".to_string()));
        }

        let cmd = match (parts[0], parts.get(1).copied()) {
            ("places", Some("status")) => parts
                .get(2)
                .and_then(|s| s.parse().ok())
                .map(|status| AppCommand::PlacesByStatus { status })
                .ok_or("用法: places status <PROPOSED|APPROVED|DECLINED|DELETED>"),
            ("places", Some("bounds")) => {
                let nums: Vec<f64> = parts[2..]
                    .iter()
                    .filter_map(|s| s.parse::<f64>().ok())
                    .collect();
                if nums.len() == 4 && parts.len() == 6 {
                    Ok(AppCommand::PlacesBounds(MapBoundsDto {
                        north_east_lat: nums[0],
                        north_east_lng: nums[1],
                        south_west_lat: nums[2],
                        south_west_lng: nums[3],
                    }))
                } else {
                    Err("用法: places bounds <neLat> <neLng> <swLat> <swLng>")
                }
            }
            ("place", Some("get")) => id_at(&parts, 2)
                .map(|id| AppCommand::PlaceGet { id })
                .ok_or("用法: place get <id>"),
            ("place", Some("info")) => id_at(&parts, 2)
                .map(|id| AppCommand::PlaceInfo { id })
                .ok_or("用法: place info <id>"),
            ("place", Some("delete")) => id_at(&parts, 2)
                .map(|id| AppCommand::PlaceDelete { id })
                .ok_or("用法: place delete <id>"),
            ("place", Some("rate")) if parts.get(2) == Some(&"add") => {
                match (
                    id_at(&parts, 3),
                    parts.get(4),
                    parts.get(5).and_then(|s| s.parse::<u8>().ok()),
                ) {
                    (Some(id), Some(email), Some(rate)) if parts.len() == 6 => {
                        Ok(AppCommand::PlaceRateAdd {
                            id,
                            email: email.to_string(),
                            rate,
                        })
                    }
                    _ => Err("用法: place rate add <id> <email> <1-5>"),
                }
            }
            ("place", Some("rate")) => id_at(&parts, 2)
                .map(|id| AppCommand::PlaceRate { id })
                .ok_or("用法: place rate <id>"),
            ("places", Some("all")) => Ok(AppCommand::PlacesAll),
            ("place", Some("exists")) => id_at(&parts, 2)
                .map(|id| AppCommand::PlaceExists { id })
                .ok_or("用法: place exists <id>"),
            ("place", Some("update")) => {
                return Ok(json_arg(s, 2, "place update <place json>")
                    .map(AppCommand::PlaceUpdate)
                    .unwrap_or_else(AppCommand::Unknown));
            }
            ("place", Some("comment")) => {
                let text = rest(s, 4);
                match (id_at(&parts, 2), parts.get(3)) {
                    (Some(id), Some(email)) if !text.is_empty() => Ok(AppCommand::PlaceComment {
                        id,
                        email: email.to_string(),
                        text: text.to_string(),
                    }),
                    _ => Err("用法: place comment <id> <email> <text...>"),
                }
            }
            ("place", Some("status")) => {
                match (id_at(&parts, 2), parts.get(3).and_then(|s| s.parse().ok())) {
                    (Some(id), Some(status)) => Ok(AppCommand::PlaceStatus { id, status }),
                    _ => Err("用法: place status <id> <STATUS>"),
                }
            }
            ("place", Some("propose")) => match parts.get(2) {
                Some(email) => {
                    return Ok(json_arg(s, 3, "place propose <email> <PlaceAddDto json>")
                        .map(|dto| AppCommand::PlacePropose {
                            email: email.to_string(),
                            dto,
                        })
                        .unwrap_or_else(AppCommand::Unknown));
                }
                None => Err("用法: place propose <email> <PlaceAddDto json>"),
            },
            ("advices", None) => Ok(AppCommand::Advices),
            ("advice", Some("get")) => id_at(&parts, 2)
                .map(|id| AppCommand::AdviceGet { id })
                .ok_or("用法: advice get <id>"),
            ("advice", Some("delete")) => id_at(&parts, 2)
                .map(|id| AppCommand::AdviceDelete { id })
                .ok_or("用法: advice delete <id>"),
            ("advice", Some("random")) => id_at(&parts, 2)
                .map(|habit_id| AppCommand::AdviceRandom {
                    habit_id,
                    language: parts.get(3).map(|s| s.to_string()),
                })
                .ok_or("用法: advice random <habitId> [lang]"),
            ("advice", Some("find")) => {
                let content = rest(s, 3);
                match parts.get(2) {
                    Some(language) if !content.is_empty() => Ok(AppCommand::AdviceFind {
                        language: language.to_string(),
                        content: content.to_string(),
                    }),
                    _ => Err("用法: advice find <lang> <content...>"),
                }
            }
            ("advice", Some("add")) => {
                return Ok(json_arg(s, 2, "advice add <AdvicePostDto json>")
                    .map(AppCommand::AdviceAdd)
                    .unwrap_or_else(AppCommand::Unknown));
            }
            ("advice", Some("update")) => match id_at(&parts, 2) {
                Some(id) => {
                    return Ok(json_arg(s, 3, "advice update <id> <AdvicePostDto json>")
                        .map(|dto| AppCommand::AdviceUpdate { id, dto })
                        .unwrap_or_else(AppCommand::Unknown));
                }
                None => Err("用法: advice update <id> <AdvicePostDto json>"),
            },
            ("habits", None) => Ok(AppCommand::Habits),
            ("habit", Some("add")) => parts
                .get(2)
                .filter(|_| parts.len() == 3)
                .map(|image| AppCommand::HabitAdd {
                    image: image.to_string(),
                })
                .ok_or("用法: habit add <image>"),
            ("languages", None) => Ok(AppCommand::Languages),
            ("language", Some("add")) => parts
                .get(2)
                .map(|code| AppCommand::LanguageAdd {
                    code: code.to_string(),
                })
                .ok_or("用法: language add <code>"),
            ("language", Some("get")) => parts
                .get(2)
                .map(|code| AppCommand::LanguageGet {
                    code: code.to_string(),
                })
                .ok_or("用法: language get <code>"),
            ("goal", Some("add")) => {
                let text = rest(s, 3);
                match parts.get(2) {
                    Some(language) if !text.is_empty() => Ok(AppCommand::GoalAdd {
                        language: language.to_string(),
                        text: text.to_string(),
                    }),
                    _ => Err("用法: goal add <lang> <text...>"),
                }
            }
            ("goals", Some("available")) => id_at(&parts, 2)
                .map(|user_id| AppCommand::GoalsAvailable {
                    user_id,
                    language: parts.get(3).map(|s| s.to_string()),
                })
                .ok_or("用法: goals available <userId> [lang]"),
            ("goals", Some("mine")) => id_at(&parts, 2)
                .map(|user_id| AppCommand::GoalsMine {
                    user_id,
                    language: parts.get(3).map(|s| s.to_string()),
                })
                .ok_or("用法: goals mine <userId> [lang]"),
            ("goals", Some("add")) => match (id_at(&parts, 2), parts.get(3)) {
                (Some(user_id), Some(language)) => {
                    return Ok(
                        json_arg(s, 4, "goals add <userId> <lang> <[UserGoalDto] json>")
                            .map(|goals| AppCommand::GoalsAdd {
                                user_id,
                                language: language.to_string(),
                                goals,
                            })
                            .unwrap_or_else(AppCommand::Unknown),
                    );
                }
                _ => Err("用法: goals add <userId> <lang> <[UserGoalDto] json>"),
            },
            ("goal", Some("status")) => match (
                id_at(&parts, 2),
                id_at(&parts, 3),
                parts.get(4).and_then(|s| s.parse().ok()),
            ) {
                (Some(user_id), Some(goal_id), Some(status)) => Ok(AppCommand::GoalStatus {
                    user_id,
                    goal_id,
                    status,
                }),
                _ => Err("用法: goal status <userId> <goalId> <ACTIVE|DONE|DISABLED>"),
            },
            ("user", Some("add")) => {
                return Ok(json_arg(s, 2, "user add <UserRegisterDto json>")
                    .map(AppCommand::UserAdd)
                    .unwrap_or_else(AppCommand::Unknown));
            }
            ("user", Some("get")) => parts
                .get(2)
                .map(|email| AppCommand::UserGet {
                    email: email.to_string(),
                })
                .ok_or("用法: user get <email>"),
            ("user", Some("id")) => id_at(&parts, 2)
                .map(|id| AppCommand::UserById { id })
                .ok_or("用法: user id <id>"),
            ("user", Some("visit")) => id_at(&parts, 2)
                .map(|id| AppCommand::UserVisit { id })
                .ok_or("用法: user visit <id>"),
            ("help" | "h", _) => Ok(AppCommand::Help),
            ("quit" | "q" | "exit", _) => Ok(AppCommand::Quit),
            _ => return Ok(AppCommand::Unknown(format!("未知命令: {}", s.trim()))),
        };

        Ok(cmd.unwrap_or_else(|usage| AppCommand::Unknown(usage.to_string())))
    }
}

fn id_at(parts: &[&str], idx: usize) -> Option<i32> {
    parts.get(idx).and_then(|s| s.parse::<i32>().ok())
}

/// 跳过前 `skip` 个词后的原始剩余文本
fn rest(line: &str, skip: usize) -> &str {
    let mut remaining = line.trim_start();
    for _ in 0..skip {
        match remaining.find(char::is_whitespace) {
            Some(i) => remaining = remaining[i..].trim_start(),
            None => return "",
        }
    }
    remaining.trim_end()
}

fn json_arg<T: DeserializeOwned>(line: &str, skip: usize, usage: &str) -> Result<T, String> {
    let raw = rest(line, skip);
    if raw.is_empty() {
        return Err(format!("用法: {}", usage));
    }
    serde_json::from_str(raw).map_err(|e| format!("JSON 解析失败: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::user::GoalRequestDto;
    use crate::dto::HabitIdRequestDto;

    fn parse(line: &str) -> AppCommand {
        line.parse().unwrap()
    }

    fn is_usage(cmd: AppCommand) -> bool {
        matches!(cmd, AppCommand::Unknown(msg) if msg.starts_with("用法"))
    }

    #[test]
    fn place_commands() {
        assert_eq!(
            parse("places status approved"),
            AppCommand::PlacesByStatus {
                status: PlaceStatus::Approved
            }
        );
        assert_eq!(parse("place info 7"), AppCommand::PlaceInfo { id: 7 });
        assert_eq!(
            parse("place status 3 DECLINED"),
            AppCommand::PlaceStatus {
                id: 3,
                status: PlaceStatus::Declined
            }
        );
        assert_eq!(
            parse("places bounds 50.5 30.6 50.4 30.4"),
            AppCommand::PlacesBounds(MapBoundsDto {
                north_east_lat: 50.5,
                north_east_lng: 30.6,
                south_west_lat: 50.4,
                south_west_lng: 30.4,
            })
        );
        assert!(is_usage(parse("place status 3 OPEN")));
        assert!(is_usage(parse("places bounds 1 2 3")));
        assert!(is_usage(parse("place get abc")));
    }

    #[test]
    fn json_arguments_keep_inner_spacing() {
        let cmd = parse(
            r#"advice add {"habit": {"id": 2}, "translations": [{"language": {"id": 1, "code": "en"}, "content": "Use  a  mug"}]}"#,
        );
        match cmd {
            AppCommand::AdviceAdd(dto) => {
                assert_eq!(dto.habit, HabitIdRequestDto { id: 2 });
                assert_eq!(dto.translations[0].content, "Use  a  mug");
            }
            other => panic!("unexpected {:?}", other),
        }

        assert_eq!(
            parse(r#"goals add 4 ua [{"goal": {"id": 9}}, {"goal": null}]"#),
            AppCommand::GoalsAdd {
                user_id: 4,
                language: "ua".to_string(),
                goals: vec![
                    UserGoalDto {
                        goal: Some(GoalRequestDto { id: 9 })
                    },
                    UserGoalDto { goal: None },
                ],
            }
        );
        assert!(matches!(
            parse("user add {not json}"),
            AppCommand::Unknown(msg) if msg.starts_with("JSON")
        ));
        assert!(is_usage(parse("advice update 5")));
    }

    #[test]
    fn advice_and_goal_commands() {
        assert_eq!(
            parse("advice random 1"),
            AppCommand::AdviceRandom {
                habit_id: 1,
                language: None
            }
        );
        assert_eq!(
            parse("advice find en Take   a bag"),
            AppCommand::AdviceFind {
                language: "en".to_string(),
                content: "Take   a bag".to_string()
            }
        );
        assert_eq!(
            parse("goal status 1 2 done"),
            AppCommand::GoalStatus {
                user_id: 1,
                goal_id: 2,
                status: GoalStatus::Done
            }
        );
        assert_eq!(
            parse("goals mine 1 en"),
            AppCommand::GoalsMine {
                user_id: 1,
                language: Some("en".to_string())
            }
        );
        assert!(is_usage(parse("advice find en")));
    }

    #[test]
    fn write_commands() {
        assert_eq!(
            parse("place rate add 3 a@b.com 5"),
            AppCommand::PlaceRateAdd {
                id: 3,
                email: "a@b.com".to_string(),
                rate: 5
            }
        );
        assert_eq!(parse("place rate 3"), AppCommand::PlaceRate { id: 3 });
        assert!(is_usage(parse("place rate add 3 a@b.com")));
        assert_eq!(
            parse("place comment 2 a@b.com Great  coffee"),
            AppCommand::PlaceComment {
                id: 2,
                email: "a@b.com".to_string(),
                text: "Great  coffee".to_string()
            }
        );
        assert!(is_usage(parse("place comment 2 a@b.com")));
        assert_eq!(
            parse("goal add en Plant a tree"),
            AppCommand::GoalAdd {
                language: "en".to_string(),
                text: "Plant a tree".to_string()
            }
        );
        assert_eq!(
            parse("language add ua"),
            AppCommand::LanguageAdd {
                code: "ua".to_string()
            }
        );
        assert_eq!(
            parse("habit add bag.png"),
            AppCommand::HabitAdd {
                image: "bag.png".to_string()
            }
        );
        assert_eq!(parse("places all"), AppCommand::PlacesAll);
        assert_eq!(parse("user id 4"), AppCommand::UserById { id: 4 });

        match parse(
            r#"place update {"id": 1, "name": "Cafe", "location_id": 2, "category_id": null, "author_id": 3, "status": "APPROVED", "modified_date": 0}"#,
        ) {
            AppCommand::PlaceUpdate(model) => {
                assert_eq!(model.name, "Cafe");
                assert_eq!(model.author_id, Some(3));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn misc_commands() {
        assert_eq!(parse("advices"), AppCommand::Advices);
        assert_eq!(parse("habits"), AppCommand::Habits);
        assert_eq!(parse("q"), AppCommand::Quit);
        assert_eq!(parse("help"), AppCommand::Help);
        assert_eq!(
            parse("user get a@b.com"),
            AppCommand::UserGet {
                email: "a@b.com".to_string()
            }
        );
        assert!(matches!(parse("fly away"), AppCommand::Unknown(msg) if msg.starts_with("未知")));
        assert_eq!(parse("   "), AppCommand::Unknown("".to_string()));
    }
}
