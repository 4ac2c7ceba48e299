use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::core::{
    Asset, Reservation, ReservationId, ReservationRepository, TimetableRepository, User,
};
use crate::domain::rules::{ReservationError, ReservationValidator, Rule};
use crate::domain::time::ZonedInterval;
use crate::domain::{Entity, ID_GENERATOR};
use crate::ReservationSettings;

/// 予約のサービス
///
/// 検証と保存をひとまとめにする。原子性は保存側の責務で、
/// ここでは検証に通った予約だけをリポジトリへ渡す。
pub struct ReservationService<R, T> {
    reservations: Arc<R>,
    validator: ReservationValidator<R, T>,
}

impl<R, T> ReservationService<R, T>
where
    R: ReservationRepository,
    T: TimetableRepository,
{
    pub fn new(reservations: Arc<R>, timetables: Arc<T>, settings: &ReservationSettings) -> Self {
        Self {
            validator: ReservationValidator::new(reservations.clone(), timetables, settings),
            reservations,
        }
    }

    pub fn validator(&self) -> &ReservationValidator<R, T> {
        &self.validator
    }

    /// 予約を検証して保存する
    pub async fn create_reservation(
        &self,
        asset: Asset,
        user: User,
        interval: ZonedInterval,
    ) -> Result<Reservation, ReservationError> {
        let id = ID_GENERATOR.generate().await;
        let reservation = Reservation::new(id, asset, user, interval, Utc::now());
        self.validator.validate(&reservation).await?;
        self.reservations.save(&reservation).await?;
        info!(reservation_id = %reservation.id(), "reservation created");
        Ok(reservation)
    }

    /// 予約を取り消す。予約が存在して取り消せたら`true`
    pub async fn delete_reservation(&self, id: ReservationId) -> Result<bool, ReservationError> {
        let deleted = self.reservations.delete(id).await?;
        if deleted {
            info!(reservation_id = %id, "reservation deleted");
        }
        Ok(deleted)
    }
}
