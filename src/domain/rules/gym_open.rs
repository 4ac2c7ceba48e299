use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::core::{Gym, TimetableRepository};
use crate::domain::time::ZonedInterval;
use crate::domain::{DataAccessError, Entity};

use super::{ReservationError, Rule};

/// 営業時間のルール
///
/// 予約枠の全体がジムの開館時間に収まっていることを確かめる。
/// 営業時間表のないジムは常に閉まっている扱い。
pub struct GymOpenRule<T> {
    timetables: Arc<T>,
}

impl<T> GymOpenRule<T> {
    pub fn new(timetables: Arc<T>) -> Self {
        Self { timetables }
    }
}

#[async_trait]
impl<T: TimetableRepository> Rule<(Gym, ZonedInterval)> for GymOpenRule<T> {
    async fn test(&self, element: &(Gym, ZonedInterval)) -> Result<bool, DataAccessError> {
        let (gym, interval) = element;
        Ok(match self.timetables.find_by_gym(gym.id()).await? {
            Some(timetable) => timetable.is_open_for_zoned(interval),
            None => false,
        })
    }

    async fn validate(&self, element: &(Gym, ZonedInterval)) -> Result<(), ReservationError> {
        if !self.test(element).await? {
            return Err(ReservationError::GymClosed);
        }
        Ok(())
    }
}
