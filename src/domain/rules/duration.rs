use async_trait::async_trait;
use chrono::Duration;

use crate::domain::core::AssetKind;
use crate::domain::time::ZonedInterval;
use crate::domain::DataAccessError;

use super::{ReservationError, Rule};

/// 予約時間の上限のルール
///
/// 器具種別ごとの上限時間(分)を超える予約を弾く。上限ちょうどは許す。
#[derive(Default)]
pub struct ReservationDurationRule;

#[async_trait]
impl Rule<(AssetKind, ZonedInterval)> for ReservationDurationRule {
    async fn test(&self, element: &(AssetKind, ZonedInterval)) -> Result<bool, DataAccessError> {
        let (kind, interval) = element;
        Ok(interval.duration() <= Duration::minutes(kind.max_reservation_time()))
    }

    async fn validate(&self, element: &(AssetKind, ZonedInterval)) -> Result<(), ReservationError> {
        if !self.test(element).await? {
            return Err(ReservationError::DurationExceeded {
                max_minutes: element.0.max_reservation_time(),
            });
        }
        Ok(())
    }
}
