use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::domain::core::{Reservation, ReservationRepository, TimetableRepository, UserId};
use crate::domain::{DataAccessError, Entity};
use crate::ReservationSettings;

use super::{
    DailyQuotaPolicy, GymOpenRule, ReservationDurationRule, ReservationError,
    ReservationIntervalRule, ReservationOverlapRule, Rule,
};

/// 予約の検証器
///
/// ルールを決まった順に適用する。開始時刻、予約時間、営業時間、
/// 重複の順で、最初に失敗したルールのエラーを返す。最後に1日の
/// 予約数の上限を確かめる。
pub struct ReservationValidator<R, T> {
    interval_rule: ReservationIntervalRule,
    duration_rule: ReservationDurationRule,
    gym_open_rule: GymOpenRule<T>,
    overlap_rule: ReservationOverlapRule<R>,
    reservations: Arc<R>,
    quota: DailyQuotaPolicy,
}

impl<R: ReservationRepository, T: TimetableRepository> ReservationValidator<R, T> {
    pub fn new(reservations: Arc<R>, timetables: Arc<T>, settings: &ReservationSettings) -> Self {
        Self {
            interval_rule: ReservationIntervalRule::new(settings.threshold_in_days),
            duration_rule: ReservationDurationRule,
            gym_open_rule: GymOpenRule::new(timetables),
            overlap_rule: ReservationOverlapRule::new(reservations.clone()),
            reservations,
            quota: DailyQuotaPolicy::new(settings.max_per_day),
        }
    }

    async fn created_in_last_day(&self, user_id: UserId) -> Result<usize, DataAccessError> {
        let now = Utc::now();
        self.reservations
            .count_by_user_created_between(user_id, now - Duration::days(1), now)
            .await
    }
}

#[async_trait]
impl<R, T> Rule<Reservation> for ReservationValidator<R, T>
where
    R: ReservationRepository,
    T: TimetableRepository,
{
    async fn test(&self, element: &Reservation) -> Result<bool, DataAccessError> {
        let interval = *element.interval();
        Ok(self.interval_rule.test(&interval).await?
            && self
                .duration_rule
                .test(&(element.asset().kind().clone(), interval))
                .await?
            && self
                .gym_open_rule
                .test(&(element.asset().gym().clone(), interval))
                .await?
            && self
                .overlap_rule
                .test(&(element.asset().clone(), interval))
                .await?
            && self
                .quota
                .allows(self.created_in_last_day(element.user().id()).await?))
    }

    async fn validate(&self, element: &Reservation) -> Result<(), ReservationError> {
        let interval = *element.interval();
        self.interval_rule.validate(&interval).await?;
        self.duration_rule
            .validate(&(element.asset().kind().clone(), interval))
            .await?;
        self.gym_open_rule
            .validate(&(element.asset().gym().clone(), interval))
            .await?;
        self.overlap_rule
            .validate(&(element.asset().clone(), interval))
            .await?;
        if !self
            .quota
            .allows(self.created_in_last_day(element.user().id()).await?)
        {
            return Err(ReservationError::TooManyReservations);
        }
        Ok(())
    }
}
