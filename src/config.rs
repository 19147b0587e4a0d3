use log::LevelFilter;
use std::str::FromStr;
use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct DbConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
    pub sql_logging: bool,
}

impl DbConfig {
    /// 内存库每个连接都是独立的数据库，只能保留一个连接且不能过期
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        if is_memory_url(&url) {
            return Self {
                url,
                max_connections: 1,
                min_connections: 1,
                connect_timeout: Duration::from_secs(8),
                idle_timeout: None,
                max_lifetime: None,
                sql_logging: false,
            };
        }
        Self {
            url,
            max_connections: 10,
            min_connections: 2,
            connect_timeout: Duration::from_secs(8),
            idle_timeout: Some(Duration::from_secs(8)),
            max_lifetime: Some(Duration::from_secs(8)),
            sql_logging: true,
        }
    }

    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self::new("sqlite::memory:")
    }

    pub fn is_memory(&self) -> bool {
        is_memory_url(&self.url)
    }
}

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub db: DbConfig,
    pub log_level: LevelFilter,
    pub default_language: String,
}

impl AppConfig {
    /// 读取 .env（若存在）后再从环境变量构建配置
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenv::dotenv();

        let url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://greencity.db?mode=rwc".to_string());
        let mut db = DbConfig::new(url);
        if !db.is_memory() {
            if let Some(v) = env_parse::<u32>("DB_MAX_CONNECTIONS")? {
                db.max_connections = v;
            }
            if let Some(v) = env_parse::<u32>("DB_MIN_CONNECTIONS")? {
                db.min_connections = v.min(db.max_connections);
            }
        }
        if let Some(v) = env_parse::<u64>("DB_CONNECT_TIMEOUT_SECS")? {
            db.connect_timeout = Duration::from_secs(v);
        }
        if let Some(v) = env_parse::<bool>("DB_SQL_LOGGING")? {
            db.sql_logging = v;
        }

        let log_level = env_parse::<LevelFilter>("LOG_LEVEL")?.unwrap_or(LevelFilter::Info);
        let default_language = std::env::var("DEFAULT_LANGUAGE")
            .map(|s| s.trim().to_lowercase())
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "en".to_string());

        Ok(Self {
            db,
            log_level,
            default_language,
        })
    }
}

fn env_parse<T: FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => {
            let value = raw.trim();
            if value.is_empty() {
                return Ok(None);
            }
            value
                .parse::<T>()
                .map(Some)
                .map_err(|_| ConfigError::InvalidValue {
                    key,
                    value: raw.clone(),
                })
        }
        Err(_) => Ok(None),
    }
}
