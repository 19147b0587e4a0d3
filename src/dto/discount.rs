use crate::error::ServiceError;
use crate::storage::entity::{discount_value, specification};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecificationNameDto {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountValueDto {
    pub value: i32,
    pub specification: SpecificationNameDto,
}

impl DiscountValueDto {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if !(0..=100).contains(&self.value) {
            return Err(ServiceError::BadRequest(format!(
                "Discount must be between 0 and 100, got {}",
                self.value
            )));
        }
        if self.specification.name.trim().is_empty() {
            return Err(ServiceError::BadRequest(
                "Discount specification must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}

impl From<(discount_value::Model, specification::Model)> for DiscountValueDto {
    fn from((discount, spec): (discount_value::Model, specification::Model)) -> Self {
        Self {
            value: discount.value,
            specification: SpecificationNameDto { name: spec.name },
        }
    }
}
