use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use derive_more::{Deref, Display, From};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

use crate::domain::time::{LocalInterval, RepeatedInterval, ZonedInterval};
use crate::domain::{DataAccessError, Entity, Id};

use super::{Gym, GymId};

/// 営業時間表のリポジトリトレイト
#[async_trait]
pub trait TimetableRepository: Send + Sync {
    /// ジムの営業時間表を取得する。存在しない場合は`None`
    async fn find_by_gym(&self, gym_id: GymId) -> Result<Option<Timetable>, DataAccessError>;
    /// 営業時間表を保存する(ジムごとに丸ごと置き換える)
    async fn save(&self, entity: &Timetable) -> Result<bool, DataAccessError>;
    /// ジムの削除に合わせて営業時間表を削除する
    async fn delete_by_gym(&self, gym_id: GymId) -> Result<bool, DataAccessError>;
}

/// 営業時間表のID
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Display, From, Deref, Default, Hash,
)]
pub struct TimetableId(u64);

impl Id for TimetableId {
    type Inner = u64;
}

/// ジムの営業時間表
///
/// 繰り返しの開館区間と、それを打ち消す休業区間を持つ。
/// ある時点が開いているのは、いずれかの開館区間に含まれ、かつ
/// どの休業区間にも含まれないとき。タイムゾーンの解決はここに集約する。
#[serde_as]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Timetable {
    id: TimetableId,
    gym_id: GymId,
    #[serde_as(as = "DisplayFromStr")]
    zone: Tz,
    openings: Vec<RepeatedInterval<NaiveDateTime>>,
    closing_days: Vec<RepeatedInterval<NaiveDateTime>>,
}

impl Timetable {
    /// ジムの都市のタイムゾーンを取り込んで作る
    pub fn new(
        id: TimetableId,
        gym: &Gym,
        openings: Vec<RepeatedInterval<NaiveDateTime>>,
        closing_days: Vec<RepeatedInterval<NaiveDateTime>>,
    ) -> Self {
        Self {
            id,
            gym_id: gym.id(),
            zone: gym.city().zone(),
            openings,
            closing_days,
        }
    }

    pub fn gym_id(&self) -> GymId {
        self.gym_id
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    pub fn openings(&self) -> &[RepeatedInterval<NaiveDateTime>] {
        &self.openings
    }

    pub fn closing_days(&self) -> &[RepeatedInterval<NaiveDateTime>] {
        &self.closing_days
    }

    /// 壁時計時刻で開いているかどうか
    pub fn is_open_at(&self, instant: NaiveDateTime) -> bool {
        self.closing_days.iter().all(|c| !c.contains_instant(instant))
            && self.openings.iter().any(|o| o.contains_instant(instant))
    }

    /// 区間全体が開いているかどうか
    ///
    /// 休業区間とは一切重なってはならず、開館区間はどれか1つの出現が
    /// 区間全体を含まなければならない。連続した2つの開館区間に
    /// またがる場合は開いているとはみなさない。
    pub fn is_open_for(&self, interval: &LocalInterval) -> bool {
        self.closing_days.iter().all(|c| !c.overlaps(interval))
            && self.openings.iter().any(|o| o.contains(interval))
    }

    /// 区間が休業に掛かるかどうか
    pub fn is_closed_for(&self, interval: &LocalInterval) -> bool {
        self.closing_days.iter().any(|c| c.overlaps(interval))
    }

    /// 時点(UTC)をジムの壁時計時刻に直して判定する
    pub fn is_open_at_zoned(&self, instant: DateTime<Utc>) -> bool {
        self.is_open_at(instant.with_timezone(&self.zone).naive_local())
    }

    /// 時点の区間をジムの壁時計時刻に直して判定する
    pub fn is_open_for_zoned(&self, interval: &ZonedInterval) -> bool {
        self.is_open_for(&interval.to_local(self.zone))
    }
}

impl Entity for Timetable {
    type Id = TimetableId;

    const ENTITY_NAME: &'static str = "timetable";

    fn id(&self) -> Self::Id {
        self.id
    }
}
