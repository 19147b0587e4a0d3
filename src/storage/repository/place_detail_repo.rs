use crate::dto::{DiscountValueDto, OpenHoursDto};
use crate::dto::openhours::TIME_FORMAT;
use crate::storage::entity::comment::{
    ActiveModel as CommentActiveModel, Column as CommentColumn, Entity as Comment,
    Model as CommentModel,
};
use crate::storage::entity::discount_value::{
    ActiveModel as DiscountActiveModel, Column as DiscountColumn, Entity as DiscountValue,
    Model as DiscountModel,
};
use crate::storage::entity::opening_hours::{
    ActiveModel as OpeningHoursActiveModel, Column as OpeningHoursColumn, Entity as OpeningHours,
    Model as OpeningHoursModel,
};
use crate::storage::entity::rate::{
    ActiveModel as RateActiveModel, Column as RateColumn, Entity as Rate,
};
use crate::storage::entity::specification::{
    ActiveModel as SpecificationActiveModel, Column as SpecificationColumn,
    Entity as Specification, Model as SpecificationModel,
};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use std::collections::HashMap;

#[derive(Debug, Clone, FromQueryResult)]
pub struct RateAvgRow {
    pub avg: Option<f64>,
}

/// 地点的附属数据：营业时间、折扣、评论、评分
pub struct PlaceDetailRepository;

impl PlaceDetailRepository {
    pub async fn find_opening_hours<C: ConnectionTrait>(
        db: &C,
        place_id: i32,
    ) -> Result<Vec<OpeningHoursModel>, sea_orm::DbErr> {
        OpeningHours::find()
            .filter(OpeningHoursColumn::PlaceId.eq(place_id))
            .order_by_asc(OpeningHoursColumn::Id)
            .all(db)
            .await
    }

    /// place_id -> 营业时间，一次查询多个地点
    pub async fn find_opening_hours_by_places<C: ConnectionTrait>(
        db: &C,
        place_ids: Vec<i32>,
    ) -> Result<HashMap<i32, Vec<OpeningHoursModel>>, sea_orm::DbErr> {
        if place_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = OpeningHours::find()
            .filter(OpeningHoursColumn::PlaceId.is_in(place_ids))
            .order_by_asc(OpeningHoursColumn::Id)
            .all(db)
            .await?;
        let mut map: HashMap<i32, Vec<OpeningHoursModel>> = HashMap::new();
        for row in rows {
            map.entry(row.place_id).or_default().push(row);
        }
        Ok(map)
    }

    pub async fn insert_opening_hours<C: ConnectionTrait>(
        db: &C,
        place_id: i32,
        hours: &[OpenHoursDto],
    ) -> Result<(), sea_orm::DbErr> {
        if hours.is_empty() {
            return Ok(());
        }
        let models: Vec<OpeningHoursActiveModel> = hours
            .iter()
            .map(|h| OpeningHoursActiveModel {
                place_id: Set(place_id),
                week_day: Set(h.week_day.to_string()),
                open_time: Set(h.open_time.format(TIME_FORMAT).to_string()),
                close_time: Set(h.close_time.format(TIME_FORMAT).to_string()),
                break_start: Set(h
                    .break_time
                    .map(|b| b.start_time.format(TIME_FORMAT).to_string())),
                break_end: Set(h
                    .break_time
                    .map(|b| b.end_time.format(TIME_FORMAT).to_string())),
                ..Default::default()
            })
            .collect();
        OpeningHours::insert_many(models).exec(db).await?;
        Ok(())
    }

    pub async fn find_discounts<C: ConnectionTrait>(
        db: &C,
        place_id: i32,
    ) -> Result<Vec<(DiscountModel, Option<SpecificationModel>)>, sea_orm::DbErr> {
        let rows = DiscountValue::find()
            .filter(DiscountColumn::PlaceId.eq(place_id))
            .order_by_asc(DiscountColumn::Id)
            .all(db)
            .await?;
        let spec_ids: Vec<i32> = rows.iter().map(|d| d.specification_id).collect();
        let specs = if spec_ids.is_empty() {
            Vec::new()
        } else {
            Specification::find()
                .filter(SpecificationColumn::Id.is_in(spec_ids))
                .all(db)
                .await?
        };
        Ok(rows
            .into_iter()
            .map(|d| {
                let spec = specs.iter().find(|s| s.id == d.specification_id).cloned();
                (d, spec)
            })
            .collect())
    }

    pub async fn insert_discounts<C: ConnectionTrait>(
        db: &C,
        place_id: i32,
        discounts: &[DiscountValueDto],
    ) -> Result<(), sea_orm::DbErr> {
        for d in discounts {
            let spec = Self::find_or_create_specification(db, &d.specification.name).await?;
            let am = DiscountActiveModel {
                place_id: Set(place_id),
                specification_id: Set(spec.id),
                value: Set(d.value),
                ..Default::default()
            };
            am.insert(db).await?;
        }
        Ok(())
    }

    pub async fn find_or_create_specification<C: ConnectionTrait>(
        db: &C,
        name: &str,
    ) -> Result<SpecificationModel, sea_orm::DbErr> {
        let name = name.trim();
        if let Some(existing) = Specification::find()
            .filter(SpecificationColumn::Name.eq(name))
            .one(db)
            .await?
        {
            return Ok(existing);
        }
        let am = SpecificationActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        };
        am.insert(db).await
    }

    /// 最新评论在前
    pub async fn find_comments<C: ConnectionTrait>(
        db: &C,
        place_id: i32,
    ) -> Result<Vec<CommentModel>, sea_orm::DbErr> {
        Comment::find()
            .filter(CommentColumn::PlaceId.eq(place_id))
            .order_by_desc(CommentColumn::CreatedDate)
            .order_by_desc(CommentColumn::Id)
            .all(db)
            .await
    }

    pub async fn insert_comment<C: ConnectionTrait>(
        db: &C,
        place_id: i32,
        user_id: i32,
        text: &str,
        at: i64,
    ) -> Result<CommentModel, sea_orm::DbErr> {
        let am = CommentActiveModel {
            place_id: Set(place_id),
            user_id: Set(user_id),
            text: Set(text.to_string()),
            created_date: Set(at),
            ..Default::default()
        };
        am.insert(db).await
    }

    pub async fn insert_rate<C: ConnectionTrait>(
        db: &C,
        place_id: i32,
        user_id: i32,
        rate: i32,
    ) -> Result<(), sea_orm::DbErr> {
        let am = RateActiveModel {
            place_id: Set(place_id),
            user_id: Set(user_id),
            rate: Set(rate),
            created_date: Set(Utc::now().timestamp()),
            ..Default::default()
        };
        am.insert(db).await?;
        Ok(())
    }

    /// 无评分时返回 None
    pub async fn average_rate<C: ConnectionTrait>(
        db: &C,
        place_id: i32,
    ) -> Result<Option<f64>, sea_orm::DbErr> {
        let row = Rate::find()
            .select_only()
            .column_as(Expr::cust("AVG(CAST(rate AS REAL))"), "avg")
            .filter(RateColumn::PlaceId.eq(place_id))
            .into_model::<RateAvgRow>()
            .one(db)
            .await?;
        Ok(row.and_then(|r| r.avg))
    }

    /// 删除地点前清理附属数据
    pub async fn delete_for_place<C: ConnectionTrait>(
        db: &C,
        place_id: i32,
    ) -> Result<(), sea_orm::DbErr> {
        OpeningHours::delete_many()
            .filter(OpeningHoursColumn::PlaceId.eq(place_id))
            .exec(db)
            .await?;
        DiscountValue::delete_many()
            .filter(DiscountColumn::PlaceId.eq(place_id))
            .exec(db)
            .await?;
        Comment::delete_many()
            .filter(CommentColumn::PlaceId.eq(place_id))
            .exec(db)
            .await?;
        Rate::delete_many()
            .filter(RateColumn::PlaceId.eq(place_id))
            .exec(db)
            .await?;
        Ok(())
    }
}
