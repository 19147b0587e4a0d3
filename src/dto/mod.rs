pub mod advice;
pub mod comment;
pub mod discount;
pub mod goal;
pub mod habit;
pub mod language;
pub mod location;
pub mod openhours;
pub mod place;
pub mod user;

pub use advice::{AdviceDto, AdvicePostDto, AdviceVo};
pub use comment::CommentDto;
pub use discount::DiscountValueDto;
pub use goal::GoalDto;
pub use habit::{HabitIdRequestDto, HabitVo};
pub use language::{LanguageDto, LanguageTranslationDto};
pub use location::{LocationAddressAndGeoDto, LocationDto, MapBoundsDto};
pub use openhours::OpenHoursDto;
pub use place::{
    AdminPlaceDto, CategoryDto, PlaceAddDto, PlaceAuthorDto, PlaceByBoundsDto, PlaceInfoDto,
    PlaceStatusDto,
};
pub use user::{UserGoalDto, UserGoalResponseDto, UserRegisterDto, UserVo};
