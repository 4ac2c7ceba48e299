use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_more::{Deref, Display, From};
use serde::{Deserialize, Serialize};

use crate::domain::time::ZonedInterval;
use crate::domain::{DataAccessError, Entity, Id};

use super::{Asset, AssetId, User, UserId};

/// 予約のリポジトリトレイト
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// IDから予約を取得する
    async fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>, DataAccessError>;
    /// 指定時刻より後に終わる、器具のアクティブな予約をすべて返す
    async fn find_active_by_asset_with_end_after(
        &self,
        asset_id: AssetId,
        instant: DateTime<Utc>,
    ) -> Result<Vec<Reservation>, DataAccessError>;
    /// 期間内に作成されたユーザーの予約数を返す
    ///
    /// 削除済み(非アクティブ)の予約も数に含める。
    async fn count_by_user_created_between(
        &self,
        user_id: UserId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<usize, DataAccessError>;
    /// 予約を保存する
    async fn save(&self, entity: &Reservation) -> Result<bool, DataAccessError>;
    /// 予約を取り消す(行は残し、非アクティブにする)
    async fn delete(&self, id: ReservationId) -> Result<bool, DataAccessError>;
}

/// 予約のID
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Display, From, Deref, Default, Hash,
)]
pub struct ReservationId(u64);

impl Id for ReservationId {
    type Inner = u64;
}

/// 器具の予約
///
/// 予約枠(`interval`)は作成後に変わらない。取り消しは`active`フラグで表す。
/// `created_at`は予約レコードの作成時刻であり、予約枠とは別物。
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    id: ReservationId,
    asset: Asset,
    user: User,
    interval: ZonedInterval,
    created_at: DateTime<Utc>,
    active: bool,
}

impl Reservation {
    pub fn new(
        id: ReservationId,
        asset: Asset,
        user: User,
        interval: ZonedInterval,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            asset,
            user,
            interval,
            created_at,
            active: true,
        }
    }

    pub fn asset(&self) -> &Asset {
        &self.asset
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn interval(&self) -> &ZonedInterval {
        &self.interval
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

impl Entity for Reservation {
    type Id = ReservationId;

    const ENTITY_NAME: &'static str = "reservation";

    fn id(&self) -> Self::Id {
        self.id
    }
}
