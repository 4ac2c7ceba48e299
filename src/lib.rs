use config::{Config, ConfigError};
use serde::Deserialize;

pub mod domain;
pub mod infrastructure;

#[derive(Clone, Debug, Deserialize)]
pub struct GymbookConfig {
    pub reservation: ReservationSettings,
    pub logger: Logger,
}

impl GymbookConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(config::File::with_name("gymbook.toml"))
            .add_source(config::Environment::with_prefix("GYMBOOK").separator("_"))
            .build()?
            .try_deserialize::<GymbookConfig>()
    }
}

/// 予約に関する設定値
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct ReservationSettings {
    /// 何日先まで予約を受け付けるか
    pub threshold_in_days: i64,
    /// ユーザーが1日に作成できる予約数の上限
    pub max_per_day: usize,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Logger {
    pub level: Level,
}

impl Logger {
    pub fn init(&self) {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::from(&self.level))
            .init();
    }
}

#[derive(Clone, Debug, Deserialize)]
pub enum Level {
    TRACE,
    DEBUG,
    INFO,
    WARN,
    ERROR,
}

impl From<&Level> for tracing::Level {
    fn from(value: &Level) -> Self {
        match value {
            Level::TRACE => tracing::Level::TRACE,
            Level::DEBUG => tracing::Level::DEBUG,
            Level::INFO => tracing::Level::INFO,
            Level::WARN => tracing::Level::WARN,
            Level::ERROR => tracing::Level::ERROR,
        }
    }
}
