use crate::dto::{
    CommentDto, DiscountValueDto, LocationAddressAndGeoDto, LocationDto, OpenHoursDto,
};
use crate::enums::PlaceStatus;
use crate::error::ServiceError;
use crate::storage::entity::{place, user};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceAuthorDto {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl From<user::Model> for PlaceAuthorDto {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
        }
    }
}

/// 管理端地点视图
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminPlaceDto {
    pub id: i32,
    pub name: String,
    pub location: LocationDto,
    pub opening_hours_list: Vec<OpenHoursDto>,
    pub category: Option<CategoryDto>,
    pub author: Option<PlaceAuthorDto>,
    pub status: PlaceStatus,
    pub modified_date: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceStatusDto {
    pub id: i32,
    pub status: PlaceStatus,
}

/// 用户提交的新地点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceAddDto {
    pub name: String,
    pub location: LocationAddressAndGeoDto,
    #[serde(default)]
    pub opening_hours_list: Vec<OpenHoursDto>,
    pub category: CategoryDto,
    #[serde(default)]
    pub discount_values: Vec<DiscountValueDto>,
}

impl PlaceAddDto {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.name.trim().is_empty() {
            return Err(ServiceError::BadRequest(
                "Place name must not be blank".to_string(),
            ));
        }
        if self.category.name.trim().is_empty() {
            return Err(ServiceError::BadRequest(
                "Category name must not be blank".to_string(),
            ));
        }
        self.location.validate()?;

        let mut days = HashSet::new();
        for hours in &self.opening_hours_list {
            hours.validate()?;
            if !days.insert(hours.week_day) {
                return Err(ServiceError::BadRequest(format!(
                    "Opening hours given twice for {}",
                    hours.week_day
                )));
            }
        }

        let mut specs = HashSet::new();
        for discount in &self.discount_values {
            discount.validate()?;
            if !specs.insert(discount.specification.name.trim().to_lowercase()) {
                return Err(ServiceError::BadRequest(format!(
                    "Discount given twice for {}",
                    discount.specification.name
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceInfoDto {
    pub id: i32,
    pub name: String,
    pub location: LocationDto,
    pub opening_hours_list: Vec<OpenHoursDto>,
    pub discount_values: Vec<DiscountValueDto>,
    pub comments: Vec<CommentDto>,
    pub rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceByBoundsDto {
    pub id: i32,
    pub name: String,
    pub location: LocationDto,
}

pub fn parse_place_status(model: &place::Model) -> Result<PlaceStatus, ServiceError> {
    model
        .status
        .parse::<PlaceStatus>()
        .map_err(ServiceError::Mapping)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "name": "Eco Cafe",
            "location": {"address": "Khreshchatyk 1", "lat": 50.45, "lng": 30.52},
            "openingHoursList": [
                {"weekDay": "Mon", "openTime": "08:00:00", "closeTime": "20:00:00"},
                {"weekDay": "Sat", "openTime": "10:00:00", "closeTime": "18:00:00",
                 "breakTime": {"startTime": "13:00:00", "endTime": "14:00:00"}}
            ],
            "category": {"name": "Cafe"},
            "discountValues": [{"value": 10, "specification": {"name": "Own cup"}}]
        }"#
    }

    #[test]
    fn add_dto_parses_and_validates() {
        let dto: PlaceAddDto = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(dto.opening_hours_list.len(), 2);
        assert!(dto.opening_hours_list[1].break_time.is_some());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn add_dto_rejects_duplicate_days_and_bad_discounts() {
        let mut dto: PlaceAddDto = serde_json::from_str(sample_json()).unwrap();
        let monday = dto.opening_hours_list[0];
        dto.opening_hours_list.push(monday);
        assert!(matches!(dto.validate(), Err(ServiceError::BadRequest(_))));

        let mut dto: PlaceAddDto = serde_json::from_str(sample_json()).unwrap();
        dto.discount_values[0].value = 120;
        assert!(dto.validate().is_err());
    }

    #[test]
    fn status_dto_serializes_upper_case() {
        let dto = PlaceStatusDto {
            id: 7,
            status: PlaceStatus::Approved,
        };
        assert_eq!(
            serde_json::to_value(dto).unwrap(),
            serde_json::json!({"id": 7, "status": "APPROVED"})
        );
    }
}
