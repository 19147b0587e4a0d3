use crate::error::{message, ServiceError};
use crate::storage::entity::location;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDto {
    pub id: i32,
    pub lat: f64,
    pub lng: f64,
    pub address: String,
}

impl From<location::Model> for LocationDto {
    fn from(model: location::Model) -> Self {
        Self {
            id: model.id,
            lat: model.lat,
            lng: model.lng,
            address: model.address,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationAddressAndGeoDto {
    pub address: String,
    pub lat: f64,
    pub lng: f64,
}

impl LocationAddressAndGeoDto {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.address.trim().is_empty() {
            return Err(ServiceError::BadRequest(
                "Address must not be blank".to_string(),
            ));
        }
        if !(-90.0..=90.0).contains(&self.lat) || !(-180.0..=180.0).contains(&self.lng) {
            return Err(ServiceError::BadRequest(format!(
                "Coordinates out of range: {}, {}",
                self.lat, self.lng
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapBoundsDto {
    pub north_east_lat: f64,
    pub north_east_lng: f64,
    pub south_west_lat: f64,
    pub south_west_lng: f64,
}

impl MapBoundsDto {
    pub fn validate(&self) -> Result<(), ServiceError> {
        let corners = [
            self.north_east_lat,
            self.north_east_lng,
            self.south_west_lat,
            self.south_west_lng,
        ];
        if corners.iter().any(|v| !v.is_finite())
            || self.south_west_lat > self.north_east_lat
            || self.south_west_lng > self.north_east_lng
        {
            return Err(ServiceError::BadRequest(format!(
                "{}{:?}",
                message::BAD_MAP_BOUNDS,
                self
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_may_collapse_to_a_point() {
        let bounds = MapBoundsDto {
            north_east_lat: 50.5,
            north_east_lng: 30.7,
            south_west_lat: 50.3,
            south_west_lng: 30.4,
        };
        assert!(bounds.validate().is_ok());

        let point = MapBoundsDto {
            north_east_lat: 50.5,
            north_east_lng: 30.4,
            ..bounds
        };
        assert!(point.validate().is_ok());
    }

    #[test]
    fn non_finite_bounds_are_rejected() {
        let bounds = MapBoundsDto {
            north_east_lat: f64::NAN,
            north_east_lng: 1.0,
            south_west_lat: 2.0,
            south_west_lng: 3.0,
        };
        assert!(matches!(bounds.validate(), Err(ServiceError::BadRequest(_))));

        let bounds = MapBoundsDto {
            north_east_lat: 10.0,
            north_east_lng: f64::INFINITY,
            south_west_lat: 0.0,
            south_west_lng: 0.0,
        };
        assert!(bounds.validate().is_err());
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let bounds = MapBoundsDto {
            north_east_lat: 50.3,
            north_east_lng: 30.7,
            south_west_lat: 50.5,
            south_west_lng: 30.4,
        };
        assert!(matches!(bounds.validate(), Err(ServiceError::BadRequest(_))));
    }
}
