use crate::dto::openhours::sort_by_week_day;
use crate::dto::place::parse_place_status;
use crate::dto::{
    AdminPlaceDto, CategoryDto, CommentDto, DiscountValueDto, LocationDto, MapBoundsDto,
    OpenHoursDto, PlaceAddDto, PlaceAuthorDto, PlaceByBoundsDto, PlaceInfoDto, PlaceStatusDto,
};
use crate::enums::{PlaceStatus, Role};
use crate::error::{message, ServiceError, ServiceResult};
use crate::service::UserService;
use crate::storage::entity::{opening_hours, place};
use crate::storage::repository::{
    NewPlace, PlaceDetailRepository, PlaceRepository, UserRepository,
};
use async_trait::async_trait;
use chrono::Utc;
use log::{info, warn};
use sea_orm::{DatabaseConnection, TransactionTrait};
use std::sync::Arc;

#[async_trait]
pub trait PlaceService: Send + Sync {
    /// 按状态列出地点（管理端视图）
    async fn get_places_by_status(&self, status: PlaceStatus) -> ServiceResult<Vec<AdminPlaceDto>>;

    /// 更新状态并记录修改时间
    async fn update_status(&self, id: i32, status: PlaceStatus) -> ServiceResult<PlaceStatusDto>;

    async fn find_by_id(&self, id: i32) -> ServiceResult<place::Model>;

    /// 保存用户提交的地点，作者由邮箱确定
    async fn save(&self, dto: PlaceAddDto, email: &str) -> ServiceResult<place::Model>;

    async fn update(&self, place: place::Model) -> ServiceResult<place::Model>;

    async fn find_all(&self) -> ServiceResult<Vec<place::Model>>;

    async fn delete_by_id(&self, id: i32) -> ServiceResult<bool>;

    /// 公开展示用的地点详情
    async fn get_access_by_id(&self, id: i32) -> ServiceResult<PlaceInfoDto>;

    async fn exists_by_id(&self, id: i32) -> ServiceResult<bool>;

    async fn find_places_by_maps_bounds(
        &self,
        bounds: MapBoundsDto,
    ) -> ServiceResult<Vec<PlaceByBoundsDto>>;

    async fn average_rate(&self, id: i32) -> ServiceResult<u8>;

    /// 以邮箱对应的用户身份发表评论
    async fn add_comment(&self, place_id: i32, email: &str, text: &str) -> ServiceResult<CommentDto>;

    /// 记录 1..=5 的评分，返回新的平均分
    async fn add_rate(&self, place_id: i32, email: &str, rate: u8) -> ServiceResult<u8>;
}

pub struct PlaceServiceImpl {
    db: Arc<DatabaseConnection>,
    user_service: Arc<UserService>,
}

impl PlaceServiceImpl {
    pub fn new(db: Arc<DatabaseConnection>, user_service: Arc<UserService>) -> Self {
        Self { db, user_service }
    }

    fn map_hours(rows: Vec<opening_hours::Model>) -> ServiceResult<Vec<OpenHoursDto>> {
        let mut hours = rows
            .into_iter()
            .map(OpenHoursDto::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        sort_by_week_day(&mut hours);
        Ok(hours)
    }

    fn missing_location(place_id: i32) -> ServiceError {
        ServiceError::Mapping(format!("place {} has no location", place_id))
    }
}

#[async_trait]
impl PlaceService for PlaceServiceImpl {
    async fn get_places_by_status(&self, status: PlaceStatus) -> ServiceResult<Vec<AdminPlaceDto>> {
        let db = self.db.as_ref();
        let rows = PlaceRepository::find_by_status_with_location(db, status).await?;

        let place_ids: Vec<i32> = rows.iter().map(|(p, _)| p.id).collect();
        let category_ids: Vec<i32> = rows.iter().filter_map(|(p, _)| p.category_id).collect();
        let author_ids: Vec<i32> = rows.iter().filter_map(|(p, _)| p.author_id).collect();
        let categories = PlaceRepository::find_categories(db, category_ids).await?;
        let authors = UserRepository::find_by_ids(db, author_ids).await?;
        let mut hours_by_place =
            PlaceDetailRepository::find_opening_hours_by_places(db, place_ids).await?;

        let mut out = Vec::with_capacity(rows.len());
        for (p, loc) in rows {
            let loc = loc.ok_or_else(|| Self::missing_location(p.id))?;
            let hours = Self::map_hours(hours_by_place.remove(&p.id).unwrap_or_default())?;
            out.push(AdminPlaceDto {
                id: p.id,
                status: parse_place_status(&p)?,
                name: p.name,
                location: LocationDto::from(loc),
                opening_hours_list: hours,
                category: p
                    .category_id
                    .and_then(|id| categories.get(&id))
                    .map(|c| CategoryDto {
                        name: c.name.clone(),
                    }),
                author: p
                    .author_id
                    .and_then(|id| authors.get(&id))
                    .cloned()
                    .map(PlaceAuthorDto::from),
                modified_date: p.modified_date,
            });
        }
        Ok(out)
    }

    async fn update_status(&self, id: i32, status: PlaceStatus) -> ServiceResult<PlaceStatusDto> {
        let now = Utc::now().timestamp();
        let n = PlaceRepository::update_status(self.db.as_ref(), id, status, now).await?;
        if n == 0 {
            return Err(ServiceError::not_found(message::PLACE_NOT_FOUND_BY_ID, id));
        }
        info!("Place [{}] status -> {}", id, status);
        Ok(PlaceStatusDto { id, status })
    }

    async fn find_by_id(&self, id: i32) -> ServiceResult<place::Model> {
        PlaceRepository::find_by_id(self.db.as_ref(), id)
            .await?
            .ok_or_else(|| ServiceError::not_found(message::PLACE_NOT_FOUND_BY_ID, id))
    }

    async fn save(&self, dto: PlaceAddDto, email: &str) -> ServiceResult<place::Model> {
        dto.validate()?;
        let author = self.user_service.find_by_email(email).await?;
        let role = author.role.parse::<Role>().map_err(ServiceError::Mapping)?;
        let status = if role.is_privileged() {
            PlaceStatus::Approved
        } else {
            PlaceStatus::Proposed
        };

        let saved = async {
            let txn = self.db.begin().await?;
            let category = PlaceRepository::find_or_create_category(&txn, &dto.category.name).await?;
            let location = PlaceRepository::insert_location(&txn, &dto.location).await?;
            let model = PlaceRepository::insert(
                &txn,
                NewPlace {
                    name: dto.name.trim().to_string(),
                    location_id: location.id,
                    category_id: Some(category.id),
                    author_id: Some(author.id),
                    status,
                },
            )
            .await?;
            PlaceDetailRepository::insert_opening_hours(&txn, model.id, &dto.opening_hours_list)
                .await?;
            PlaceDetailRepository::insert_discounts(&txn, model.id, &dto.discount_values).await?;
            txn.commit().await?;
            Ok::<_, sea_orm::DbErr>(model)
        }
        .await
        .map_err(|e| ServiceError::NotSaved(format!("{}{}", message::PLACE_NOT_SAVED, e)))?;

        info!(
            "Saved place [{}] '{}' by {} as {}",
            saved.id, saved.name, author.email, status
        );
        Ok(saved)
    }

    async fn update(&self, place: place::Model) -> ServiceResult<place::Model> {
        if !PlaceRepository::exists_by_id(self.db.as_ref(), place.id).await? {
            return Err(ServiceError::not_updated(message::PLACE_NOT_UPDATED, place.id));
        }
        let _ = place
            .status
            .parse::<PlaceStatus>()
            .map_err(ServiceError::BadRequest)?;
        Ok(PlaceRepository::update(self.db.as_ref(), place).await?)
    }

    async fn find_all(&self) -> ServiceResult<Vec<place::Model>> {
        Ok(PlaceRepository::find_all(self.db.as_ref()).await?)
    }

    async fn delete_by_id(&self, id: i32) -> ServiceResult<bool> {
        let existing = self.find_by_id(id).await?;

        let deleted = async {
            let txn = self.db.begin().await?;
            PlaceDetailRepository::delete_for_place(&txn, id).await?;
            let n = PlaceRepository::delete_by_id(&txn, id).await?;
            PlaceRepository::delete_location(&txn, existing.location_id).await?;
            if n > 0 {
                txn.commit().await?;
            }
            Ok::<_, sea_orm::DbErr>(n)
        }
        .await;

        match deleted {
            Ok(0) => Err(ServiceError::not_deleted(message::PLACE_NOT_DELETED, id)),
            Ok(_) => {
                info!("Deleted place [{}]", id);
                Ok(true)
            }
            Err(e) => {
                warn!("Failed to delete place [{}]: {}", id, e);
                Err(ServiceError::not_deleted(message::PLACE_NOT_DELETED, id))
            }
        }
    }

    async fn get_access_by_id(&self, id: i32) -> ServiceResult<PlaceInfoDto> {
        let db = self.db.as_ref();
        let place = self.find_by_id(id).await?;

        let (location, hours, discounts, comments, rate) = futures::try_join!(
            PlaceRepository::find_location(db, place.location_id),
            PlaceDetailRepository::find_opening_hours(db, id),
            PlaceDetailRepository::find_discounts(db, id),
            PlaceDetailRepository::find_comments(db, id),
            PlaceDetailRepository::average_rate(db, id),
        )?;

        let location = location.ok_or_else(|| Self::missing_location(id))?;
        let commenters =
            UserRepository::find_by_ids(db, comments.iter().map(|c| c.user_id).collect()).await?;

        let discount_values = discounts
            .into_iter()
            .filter_map(|(d, spec)| spec.map(|s| DiscountValueDto::from((d, s))))
            .collect();
        let comments = comments
            .into_iter()
            .map(|c| {
                let author = commenters.get(&c.user_id).cloned();
                CommentDto::from((c, author))
            })
            .collect();

        Ok(PlaceInfoDto {
            id: place.id,
            name: place.name,
            location: LocationDto::from(location),
            opening_hours_list: Self::map_hours(hours)?,
            discount_values,
            comments,
            rate,
        })
    }

    async fn exists_by_id(&self, id: i32) -> ServiceResult<bool> {
        Ok(PlaceRepository::exists_by_id(self.db.as_ref(), id).await?)
    }

    async fn find_places_by_maps_bounds(
        &self,
        bounds: MapBoundsDto,
    ) -> ServiceResult<Vec<PlaceByBoundsDto>> {
        bounds.validate()?;
        let rows = PlaceRepository::find_places_by_maps_bounds(self.db.as_ref(), &bounds).await?;
        Ok(rows
            .into_iter()
            .filter_map(|(p, loc)| {
                loc.map(|l| PlaceByBoundsDto {
                    id: p.id,
                    name: p.name,
                    location: LocationDto::from(l),
                })
            })
            .collect())
    }

    async fn average_rate(&self, id: i32) -> ServiceResult<u8> {
        if !PlaceRepository::exists_by_id(self.db.as_ref(), id).await? {
            return Err(ServiceError::not_found(message::PLACE_NOT_FOUND_BY_ID, id));
        }
        let avg = PlaceDetailRepository::average_rate(self.db.as_ref(), id).await?;
        Ok(avg.map(|a| a.trunc() as u8).unwrap_or(0))
    }

    async fn add_comment(&self, place_id: i32, email: &str, text: &str) -> ServiceResult<CommentDto> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ServiceError::BadRequest(
                "Comment must not be blank".to_string(),
            ));
        }
        if !PlaceRepository::exists_by_id(self.db.as_ref(), place_id).await? {
            return Err(ServiceError::not_found(message::PLACE_NOT_FOUND_BY_ID, place_id));
        }
        let author = self.user_service.find_by_email(email).await?;
        let comment = PlaceDetailRepository::insert_comment(
            self.db.as_ref(),
            place_id,
            author.id,
            text,
            Utc::now().timestamp(),
        )
        .await?;
        info!("User [{}] commented on place [{}]", author.id, place_id);
        Ok(CommentDto::from((comment, Some(author))))
    }

    async fn add_rate(&self, place_id: i32, email: &str, rate: u8) -> ServiceResult<u8> {
        if !(1..=5).contains(&rate) {
            return Err(ServiceError::BadRequest(format!(
                "Rate must be between 1 and 5, got {}",
                rate
            )));
        }
        if !PlaceRepository::exists_by_id(self.db.as_ref(), place_id).await? {
            return Err(ServiceError::not_found(message::PLACE_NOT_FOUND_BY_ID, place_id));
        }
        let author = self.user_service.find_by_email(email).await?;
        PlaceDetailRepository::insert_rate(self.db.as_ref(), place_id, author.id, i32::from(rate))
            .await?;
        self.average_rate(place_id).await
    }
}
