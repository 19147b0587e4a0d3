use crate::dto::{LocationAddressAndGeoDto, MapBoundsDto};
use crate::enums::PlaceStatus;
use crate::storage::entity::category::{
    ActiveModel as CategoryActiveModel, Column as CategoryColumn, Entity as Category,
    Model as CategoryModel,
};
use crate::storage::entity::location::{
    self, ActiveModel as LocationActiveModel, Entity as Location, Model as LocationModel,
};
use crate::storage::entity::place::{
    ActiveModel as PlaceActiveModel, Column as PlaceColumn, Entity as Place, Model as PlaceModel,
};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct NewPlace {
    pub name: String,
    pub location_id: i32,
    pub category_id: Option<i32>,
    pub author_id: Option<i32>,
    pub status: PlaceStatus,
}

pub struct PlaceRepository;

impl PlaceRepository {
    pub async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> Result<Option<PlaceModel>, sea_orm::DbErr> {
        Place::find_by_id(id).one(db).await
    }

    pub async fn exists_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, sea_orm::DbErr> {
        let n = Place::find().filter(PlaceColumn::Id.eq(id)).count(db).await?;
        Ok(n > 0)
    }

    pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<PlaceModel>, sea_orm::DbErr> {
        Place::find().order_by_asc(PlaceColumn::Id).all(db).await
    }

    pub async fn find_by_status_with_location<C: ConnectionTrait>(
        db: &C,
        status: PlaceStatus,
    ) -> Result<Vec<(PlaceModel, Option<LocationModel>)>, sea_orm::DbErr> {
        Place::find()
            .find_also_related(Location)
            .filter(PlaceColumn::Status.eq(status.as_str()))
            .order_by_asc(PlaceColumn::Id)
            .all(db)
            .await
    }

    /// 地图范围内已通过审核的地点（边界包含在内）
    pub async fn find_places_by_maps_bounds<C: ConnectionTrait>(
        db: &C,
        bounds: &MapBoundsDto,
    ) -> Result<Vec<(PlaceModel, Option<LocationModel>)>, sea_orm::DbErr> {
        Place::find()
            .find_also_related(Location)
            .filter(PlaceColumn::Status.eq(PlaceStatus::Approved.as_str()))
            .filter(location::Column::Lat.between(bounds.south_west_lat, bounds.north_east_lat))
            .filter(location::Column::Lng.between(bounds.south_west_lng, bounds.north_east_lng))
            .order_by_asc(PlaceColumn::Id)
            .all(db)
            .await
    }

    pub async fn insert<C: ConnectionTrait>(
        db: &C,
        place: NewPlace,
    ) -> Result<PlaceModel, sea_orm::DbErr> {
        let am = PlaceActiveModel {
            name: Set(place.name),
            location_id: Set(place.location_id),
            category_id: Set(place.category_id),
            author_id: Set(place.author_id),
            status: Set(place.status.as_str().to_string()),
            modified_date: Set(Utc::now().timestamp()),
            ..Default::default()
        };
        am.insert(db).await
    }

    /// 整行覆盖写入，同时刷新 modified_date
    pub async fn update<C: ConnectionTrait>(
        db: &C,
        place: PlaceModel,
    ) -> Result<PlaceModel, sea_orm::DbErr> {
        let am = PlaceActiveModel {
            id: Set(place.id),
            name: Set(place.name),
            location_id: Set(place.location_id),
            category_id: Set(place.category_id),
            author_id: Set(place.author_id),
            status: Set(place.status),
            modified_date: Set(Utc::now().timestamp()),
        };
        am.update(db).await
    }

    pub async fn update_status<C: ConnectionTrait>(
        db: &C,
        id: i32,
        status: PlaceStatus,
        at: i64,
    ) -> Result<u64, sea_orm::DbErr> {
        let res = Place::update_many()
            .col_expr(PlaceColumn::Status, Expr::value(status.as_str()))
            .col_expr(PlaceColumn::ModifiedDate, Expr::value(at))
            .filter(PlaceColumn::Id.eq(id))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }

    pub async fn delete_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<u64, sea_orm::DbErr> {
        let res = Place::delete_by_id(id).exec(db).await?;
        Ok(res.rows_affected)
    }

    pub async fn find_location<C: ConnectionTrait>(
        db: &C,
        location_id: i32,
    ) -> Result<Option<LocationModel>, sea_orm::DbErr> {
        Location::find_by_id(location_id).one(db).await
    }

    pub async fn insert_location<C: ConnectionTrait>(
        db: &C,
        loc: &LocationAddressAndGeoDto,
    ) -> Result<LocationModel, sea_orm::DbErr> {
        let am = LocationActiveModel {
            lat: Set(loc.lat),
            lng: Set(loc.lng),
            address: Set(loc.address.trim().to_string()),
            ..Default::default()
        };
        am.insert(db).await
    }

    pub async fn delete_location<C: ConnectionTrait>(
        db: &C,
        location_id: i32,
    ) -> Result<u64, sea_orm::DbErr> {
        let res = Location::delete_by_id(location_id).exec(db).await?;
        Ok(res.rows_affected)
    }

    pub async fn find_categories<C: ConnectionTrait>(
        db: &C,
        ids: Vec<i32>,
    ) -> Result<HashMap<i32, CategoryModel>, sea_orm::DbErr> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = Category::find()
            .filter(CategoryColumn::Id.is_in(ids))
            .all(db)
            .await?;
        Ok(rows.into_iter().map(|c| (c.id, c)).collect())
    }

    /// 按名称查找分类，不存在则创建
    pub async fn find_or_create_category<C: ConnectionTrait>(
        db: &C,
        name: &str,
    ) -> Result<CategoryModel, sea_orm::DbErr> {
        let name = name.trim();
        if let Some(existing) = Category::find()
            .filter(CategoryColumn::Name.eq(name))
            .one(db)
            .await?
        {
            return Ok(existing);
        }
        let am = CategoryActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        };
        am.insert(db).await
    }
}
