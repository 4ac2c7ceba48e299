use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::core::{Asset, ReservationRepository};
use crate::domain::time::ZonedInterval;
use crate::domain::{DataAccessError, Entity};

use super::{ReservationError, Rule};

/// 予約の重複のルール
///
/// 同じ器具のアクティブな予約と時間が被る予約を弾く。
/// 衝突判定は終端を含まないので、連続した予約は通る。
pub struct ReservationOverlapRule<R> {
    reservations: Arc<R>,
}

impl<R> ReservationOverlapRule<R> {
    pub fn new(reservations: Arc<R>) -> Self {
        Self { reservations }
    }
}

#[async_trait]
impl<R: ReservationRepository> Rule<(Asset, ZonedInterval)> for ReservationOverlapRule<R> {
    async fn test(&self, element: &(Asset, ZonedInterval)) -> Result<bool, DataAccessError> {
        let (asset, interval) = element;
        let existing = self
            .reservations
            .find_active_by_asset_with_end_after(asset.id(), interval.start())
            .await?;
        Ok(existing.iter().all(|r| !r.interval().conflicts_with(interval)))
    }

    async fn validate(&self, element: &(Asset, ZonedInterval)) -> Result<(), ReservationError> {
        if !self.test(element).await? {
            return Err(ReservationError::Conflict);
        }
        Ok(())
    }
}
