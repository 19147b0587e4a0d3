use crate::error::ServiceError;
use crate::storage::entity::opening_hours;
use chrono::{NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// 数据库中的时间统一为 HH:MM
pub const TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakTimeDto {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenHoursDto {
    pub week_day: Weekday,
    pub open_time: NaiveTime,
    pub close_time: NaiveTime,
    #[serde(default)]
    pub break_time: Option<BreakTimeDto>,
}

/// 存储精度只到分钟
fn check_minute_precision(t: NaiveTime, day: Weekday) -> Result<(), ServiceError> {
    if t.second() != 0 || t.nanosecond() != 0 {
        return Err(ServiceError::BadRequest(format!(
            "Opening hours on {} must be whole minutes, got {}",
            day, t
        )));
    }
    Ok(())
}

impl OpenHoursDto {
    pub fn validate(&self) -> Result<(), ServiceError> {
        check_minute_precision(self.open_time, self.week_day)?;
        check_minute_precision(self.close_time, self.week_day)?;
        if let Some(b) = self.break_time {
            check_minute_precision(b.start_time, self.week_day)?;
            check_minute_precision(b.end_time, self.week_day)?;
        }
        if self.open_time >= self.close_time {
            return Err(ServiceError::BadRequest(format!(
                "Opening time must be before closing time on {}",
                self.week_day
            )));
        }
        if let Some(b) = self.break_time {
            if b.start_time >= b.end_time
                || b.start_time < self.open_time
                || b.end_time > self.close_time
            {
                return Err(ServiceError::BadRequest(format!(
                    "Break must lie within opening hours on {}",
                    self.week_day
                )));
            }
        }
        Ok(())
    }
}

fn parse_time(raw: &str) -> Result<NaiveTime, ServiceError> {
    NaiveTime::parse_from_str(raw, TIME_FORMAT)
        .map_err(|e| ServiceError::Mapping(format!("bad stored time {}: {}", raw, e)))
}

impl TryFrom<opening_hours::Model> for OpenHoursDto {
    type Error = ServiceError;

    fn try_from(model: opening_hours::Model) -> Result<Self, Self::Error> {
        let week_day = model
            .week_day
            .parse::<Weekday>()
            .map_err(|_| ServiceError::Mapping(format!("bad stored week day {}", model.week_day)))?;
        let break_time = match (model.break_start.as_deref(), model.break_end.as_deref()) {
            (Some(start), Some(end)) => Some(BreakTimeDto {
                start_time: parse_time(start)?,
                end_time: parse_time(end)?,
            }),
            _ => None,
        };
        Ok(Self {
            week_day,
            open_time: parse_time(&model.open_time)?,
            close_time: parse_time(&model.close_time)?,
            break_time,
        })
    }
}

/// 按周一到周日排序
pub fn sort_by_week_day(hours: &mut [OpenHoursDto]) {
    hours.sort_by_key(|h| (h.week_day.num_days_from_monday(), h.open_time));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn stored_row_maps_to_dto() {
        let model = opening_hours::Model {
            id: 1,
            place_id: 1,
            week_day: "Tue".to_string(),
            open_time: "08:00".to_string(),
            close_time: "20:30".to_string(),
            break_start: Some("13:00".to_string()),
            break_end: Some("14:00".to_string()),
        };
        let dto = OpenHoursDto::try_from(model).unwrap();
        assert_eq!(dto.week_day, Weekday::Tue);
        assert_eq!(dto.close_time, hm(20, 30));
        assert_eq!(
            dto.break_time,
            Some(BreakTimeDto {
                start_time: hm(13, 0),
                end_time: hm(14, 0)
            })
        );
    }

    #[test]
    fn break_outside_hours_is_rejected() {
        let dto = OpenHoursDto {
            week_day: Weekday::Mon,
            open_time: hm(9, 0),
            close_time: hm(18, 0),
            break_time: Some(BreakTimeDto {
                start_time: hm(8, 0),
                end_time: hm(9, 30),
            }),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn seconds_are_rejected() {
        let dto = OpenHoursDto {
            week_day: Weekday::Mon,
            open_time: NaiveTime::from_hms_opt(8, 0, 10).unwrap(),
            close_time: NaiveTime::from_hms_opt(8, 0, 50).unwrap(),
            break_time: None,
        };
        assert!(matches!(dto.validate(), Err(ServiceError::BadRequest(_))));

        let dto = OpenHoursDto {
            open_time: hm(8, 0),
            close_time: hm(18, 0),
            break_time: Some(BreakTimeDto {
                start_time: NaiveTime::from_hms_opt(12, 0, 1).unwrap(),
                end_time: hm(13, 0),
            }),
            ..dto
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn sorting_puts_monday_first() {
        let mut hours = vec![
            OpenHoursDto {
                week_day: Weekday::Sun,
                open_time: hm(10, 0),
                close_time: hm(12, 0),
                break_time: None,
            },
            OpenHoursDto {
                week_day: Weekday::Mon,
                open_time: hm(9, 0),
                close_time: hm(18, 0),
                break_time: None,
            },
        ];
        sort_by_week_day(&mut hours);
        assert_eq!(hours[0].week_day, Weekday::Mon);
        assert_eq!(hours[1].week_day, Weekday::Sun);
    }
}
