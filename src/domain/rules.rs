mod duration;
mod gym_open;
mod interval;
mod overlap;
mod quota;
mod validator;

pub use self::duration::*;
pub use self::gym_open::*;
pub use self::interval::*;
pub use self::overlap::*;
pub use self::quota::*;
pub use self::validator::*;

use async_trait::async_trait;
use derive_more::{Display, Error, From};

use crate::domain::DataAccessError;

/// 予約検証のルール
///
/// `test`と`validate`は同じ条件を見る。`test`は真偽を返し、
/// `validate`は失敗したルールに対応するエラーを返す。
#[async_trait]
pub trait Rule<T: Sync>: Send + Sync {
    async fn test(&self, element: &T) -> Result<bool, DataAccessError>;
    async fn validate(&self, element: &T) -> Result<(), ReservationError>;
}

/// 予約検証のエラー
#[derive(Error, Display, Debug, From)]
pub enum ReservationError {
    /// 予約の開始が過去
    #[display(fmt = "reservation must be in the future")]
    PastReservation,
    /// 予約の開始が受付期間より先
    #[display(fmt = "reservation starts beyond the booking threshold")]
    ThresholdExceeded,
    /// 器具種別の上限時間を超過
    #[display(fmt = "reservation duration exceeds maximum (max={} minutes)", max_minutes)]
    #[from(ignore)]
    DurationExceeded { max_minutes: i64 },
    /// 予約枠でジムが閉まっている
    #[display(fmt = "the gym is closed in the requested interval")]
    GymClosed,
    /// 同じ器具の既存予約と衝突
    #[display(fmt = "the asset is already reserved in the requested interval")]
    Conflict,
    /// 1日の予約数の上限に到達
    #[display(fmt = "too many reservations in the last day")]
    TooManyReservations,
    /// データアクセスの失敗
    #[display(fmt = "data access error: {}", _0)]
    DataAccess(#[error(source)] DataAccessError),
}
