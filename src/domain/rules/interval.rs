use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::domain::time::ZonedInterval;
use crate::domain::DataAccessError;

use super::{ReservationError, Rule};

/// 予約枠の開始時刻のルール
///
/// 過去の予約と、受付期間より先の予約を弾く。過去の判定が先。
pub struct ReservationIntervalRule {
    threshold_in_days: i64,
}

impl ReservationIntervalRule {
    pub fn new(threshold_in_days: i64) -> Self {
        Self { threshold_in_days }
    }

    fn is_in_the_past(&self, start: DateTime<Utc>) -> bool {
        start < Utc::now()
    }

    fn is_beyond_the_threshold(&self, start: DateTime<Utc>) -> bool {
        start > Utc::now() + Duration::days(self.threshold_in_days)
    }
}

#[async_trait]
impl Rule<ZonedInterval> for ReservationIntervalRule {
    async fn test(&self, element: &ZonedInterval) -> Result<bool, DataAccessError> {
        Ok(!self.is_in_the_past(element.start()) && !self.is_beyond_the_threshold(element.start()))
    }

    async fn validate(&self, element: &ZonedInterval) -> Result<(), ReservationError> {
        if self.is_in_the_past(element.start()) {
            return Err(ReservationError::PastReservation);
        }
        if self.is_beyond_the_threshold(element.start()) {
            return Err(ReservationError::ThresholdExceeded);
        }
        Ok(())
    }
}
