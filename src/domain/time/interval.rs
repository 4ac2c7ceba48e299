use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

use super::TimePoint;

/// 時間の閉区間 `[start, end]`
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval<T> {
    start: T,
    end: T,
}

/// タイムゾーンを持たない区間
pub type LocalInterval = Interval<NaiveDateTime>;

/// 時点(UTC)で表した区間
pub type ZonedInterval = Interval<DateTime<Utc>>;

impl<T: TimePoint> Interval<T> {
    pub fn new(start: T, end: T) -> Result<Self, IntervalError> {
        if start > end {
            return Err(IntervalError::InvalidRange);
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> T {
        self.start
    }

    pub fn end(&self) -> T {
        self.end
    }

    pub fn duration(&self) -> chrono::Duration {
        self.end.duration_since(self.start)
    }

    /// 両端を含む
    pub fn contains_instant(&self, instant: T) -> bool {
        self.start <= instant && instant <= self.end
    }

    pub fn contains(&self, other: &Self) -> bool {
        self.contains_instant(other.start) && self.contains_instant(other.end)
    }

    /// 閉区間同士の重なり。端点だけを共有する場合も重なりとみなす
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// 予約の衝突判定。端点だけを共有する区間は衝突しない
    ///
    /// `overlaps`とは境界の扱いが異なる。休業日の判定には`overlaps`を、
    /// 予約同士の比較にはこちらを使うこと。
    pub fn conflicts_with(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl LocalInterval {
    /// 始点と終点の暦日が同じかどうか
    pub fn is_within_same_day(&self) -> bool {
        self.start.same_calendar_date(self.end)
    }

    /// タイムゾーンを与えて時点の区間に変換する
    ///
    /// 夏時間で重複する時刻は早い方のオフセットに解決する。
    /// 存在しない時刻は`NonexistentLocalTime`になる。
    pub fn to_zoned(&self, zone: Tz) -> Result<ZonedInterval, IntervalError> {
        let start = zone
            .from_local_datetime(&self.start)
            .earliest()
            .ok_or(IntervalError::NonexistentLocalTime)?;
        let end = zone
            .from_local_datetime(&self.end)
            .earliest()
            .ok_or(IntervalError::NonexistentLocalTime)?;
        Ok(ZonedInterval {
            start: start.with_timezone(&Utc),
            end: end.with_timezone(&Utc),
        })
    }
}

impl ZonedInterval {
    /// タイムゾーンの壁時計時刻に投影した区間を返す
    pub fn to_local(&self, zone: Tz) -> LocalInterval {
        LocalInterval {
            start: self.start.with_timezone(&zone).naive_local(),
            end: self.end.with_timezone(&zone).naive_local(),
        }
    }
}

#[derive(Error, Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalError {
    /// 始点が終点より後
    #[display(fmt = "start is after the end")]
    InvalidRange,
    /// タイムゾーン上に存在しない時刻
    #[display(fmt = "the local time does not exist in the time zone")]
    NonexistentLocalTime,
}
