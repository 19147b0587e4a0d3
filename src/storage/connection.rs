use crate::config::DbConfig;
use crate::storage::entity::{
    advice, advice_translation, category, comment, discount_value, goal, goal_translation, habit,
    language, location, opening_hours, place, rate, specification, user, user_goal,
};
use log::info;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, Schema,
};

pub async fn establish_connection(cfg: &DbConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(cfg.url.to_owned());
    opt.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(cfg.connect_timeout)
        .acquire_timeout(cfg.connect_timeout)
        .sqlx_logging(cfg.sql_logging)
        .sqlx_logging_level(log::LevelFilter::Info);
    if let Some(idle) = cfg.idle_timeout {
        opt.idle_timeout(idle);
    }
    if let Some(lifetime) = cfg.max_lifetime {
        opt.max_lifetime(lifetime);
    }

    let db = Database::connect(opt).await?;

    if !cfg.is_memory() {
        // 启用 WAL 模式
        db.execute(sea_orm::Statement::from_string(
            sea_orm::DatabaseBackend::Sqlite,
            "PRAGMA journal_mode=WAL;".to_string(),
        ))
        .await?;
    }

    // 按依赖顺序建表（如果不存在）
    create_table(&db, language::Entity).await?;
    create_table(&db, user::Entity).await?;
    create_table(&db, habit::Entity).await?;
    create_table(&db, advice::Entity).await?;
    create_table(&db, advice_translation::Entity).await?;
    create_table(&db, goal::Entity).await?;
    create_table(&db, goal_translation::Entity).await?;
    create_table(&db, user_goal::Entity).await?;
    create_table(&db, category::Entity).await?;
    create_table(&db, location::Entity).await?;
    create_table(&db, place::Entity).await?;
    create_table(&db, opening_hours::Entity).await?;
    create_table(&db, specification::Entity).await?;
    create_table(&db, discount_value::Entity).await?;
    create_table(&db, comment::Entity).await?;
    create_table(&db, rate::Entity).await?;

    // 唯一索引：避免同一用户重复关联同一目标
    db.execute(sea_orm::Statement::from_string(
        sea_orm::DatabaseBackend::Sqlite,
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_user_goals_unique ON user_goals(user_id, goal_id);"
            .to_string(),
    ))
    .await?;

    info!("Database connection established and tables initialized ({}).", cfg.url);

    Ok(db)
}

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> Result<(), DbErr> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);
    let stmt = builder.build(schema.create_table_from_entity(entity).if_not_exists());
    db.execute(stmt).await?;
    Ok(())
}
