use std::fmt::Debug;

use chrono::{DateTime, Datelike, Duration, Months, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// 繰り返しの周期
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum RepetitionType {
    /// 繰り返しなし
    None,
    /// 毎日
    Daily,
    /// 毎週
    Weekly,
    /// 毎月
    Monthly,
    /// 毎年
    Yearly,
}

impl Default for RepetitionType {
    fn default() -> Self {
        RepetitionType::None
    }
}

/// 区間の端点となる時点のトレイト
///
/// 全順序、経過時間、および暦に沿った周期シフトを提供する。
/// 月・年の加算は暦計算であり、存在しない日は月末に丸められる。
pub trait TimePoint: Copy + Ord + Debug + Send + Sync {
    /// 周期を`periods`回分進めた時点。暦の範囲を超える場合は`None`
    fn plus_periods(self, repetition: RepetitionType, periods: i64) -> Option<Self>;

    /// `self`から`other`までに経過したおおよその周期数(切り捨て)
    ///
    /// 月・年は暦のフィールド差で数えるため±1周期の誤差を持つ。
    /// 呼び出し側は候補範囲に余裕を取ること。
    fn periods_until(self, other: Self, repetition: RepetitionType) -> i64;

    /// `earlier`からの経過時間
    fn duration_since(self, earlier: Self) -> Duration;

    /// 暦日が同じかどうか
    fn same_calendar_date(self, other: Self) -> bool;
}

const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_WEEK: i64 = 7 * SECONDS_PER_DAY;

fn month_count(year: i32, month0: u32) -> i64 {
    i64::from(year) * 12 + i64::from(month0)
}

impl TimePoint for NaiveDateTime {
    fn plus_periods(self, repetition: RepetitionType, periods: i64) -> Option<Self> {
        match repetition {
            RepetitionType::None => Some(self),
            RepetitionType::Daily => self.checked_add_signed(Duration::days(periods)),
            RepetitionType::Weekly => self.checked_add_signed(Duration::weeks(periods)),
            RepetitionType::Monthly => {
                self.checked_add_months(Months::new(u32::try_from(periods).ok()?))
            }
            RepetitionType::Yearly => {
                self.checked_add_months(Months::new(u32::try_from(periods.checked_mul(12)?).ok()?))
            }
        }
    }

    fn periods_until(self, other: Self, repetition: RepetitionType) -> i64 {
        match repetition {
            RepetitionType::None => 0,
            RepetitionType::Daily => (other - self).num_seconds().div_euclid(SECONDS_PER_DAY),
            RepetitionType::Weekly => (other - self).num_seconds().div_euclid(SECONDS_PER_WEEK),
            RepetitionType::Monthly => {
                month_count(other.year(), other.month0()) - month_count(self.year(), self.month0())
            }
            RepetitionType::Yearly => i64::from(other.year()) - i64::from(self.year()),
        }
    }

    fn duration_since(self, earlier: Self) -> Duration {
        self - earlier
    }

    fn same_calendar_date(self, other: Self) -> bool {
        self.date() == other.date()
    }
}

impl TimePoint for DateTime<Utc> {
    fn plus_periods(self, repetition: RepetitionType, periods: i64) -> Option<Self> {
        match repetition {
            RepetitionType::None => Some(self),
            RepetitionType::Daily => self.checked_add_signed(Duration::days(periods)),
            RepetitionType::Weekly => self.checked_add_signed(Duration::weeks(periods)),
            RepetitionType::Monthly => {
                self.checked_add_months(Months::new(u32::try_from(periods).ok()?))
            }
            RepetitionType::Yearly => {
                self.checked_add_months(Months::new(u32::try_from(periods.checked_mul(12)?).ok()?))
            }
        }
    }

    fn periods_until(self, other: Self, repetition: RepetitionType) -> i64 {
        self.naive_utc().periods_until(other.naive_utc(), repetition)
    }

    fn duration_since(self, earlier: Self) -> Duration {
        self - earlier
    }

    fn same_calendar_date(self, other: Self) -> bool {
        self.date_naive() == other.date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(s: &str) -> NaiveDateTime {
        s.parse().unwrap()
    }

    #[test]
    fn test_plus_periods_clips_to_end_of_month() {
        let base = at("2019-01-31T10:00:00");
        assert_eq!(
            base.plus_periods(RepetitionType::Monthly, 1),
            Some(at("2019-02-28T10:00:00"))
        );
    }

    #[test]
    fn test_plus_periods_leap_day() {
        let base = NaiveDate::from_ymd_opt(2020, 2, 29)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        assert_eq!(
            base.plus_periods(RepetitionType::Yearly, 1),
            Some(at("2021-02-28T08:00:00"))
        );
    }

    #[test]
    fn test_periods_until_floors_partial_periods() {
        let base = at("2019-05-16T10:00:00");
        assert_eq!(base.periods_until(at("2019-05-17T09:59:59"), RepetitionType::Daily), 0);
        assert_eq!(base.periods_until(at("2019-05-17T10:00:00"), RepetitionType::Daily), 1);
        assert_eq!(base.periods_until(at("2019-05-15T10:00:00"), RepetitionType::Daily), -1);
        assert_eq!(base.periods_until(at("2019-06-01T00:00:00"), RepetitionType::Monthly), 1);
        assert_eq!(base.periods_until(at("2024-01-01T00:00:00"), RepetitionType::Yearly), 5);
    }
}
