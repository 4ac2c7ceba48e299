use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use super::{Interval, IntervalError, LocalInterval, RepetitionType, TimePoint};

/// 周期的に繰り返される区間
///
/// 基準区間を`n`周期(n >= 0)ずらした出現の族を表す。判定は出現のいずれかが
/// 基準の述語を満たすかどうかで答える。候補となる出現は周期数の割り算で
/// 直接求めるため、対象がどれだけ先でも走査回数は区間幅に比例した定数で済む。
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatedInterval<T: TimePoint> {
    interval: Interval<T>,
    repetition: RepetitionType,
    repetition_end: Option<T>,
}

/// 周期計算の暦誤差を吸収する候補範囲の余裕
const WINDOW_SLACK: i64 = 1;

impl<T: TimePoint> RepeatedInterval<T> {
    pub fn new(interval: Interval<T>, repetition: RepetitionType) -> Self {
        Self {
            interval,
            repetition,
            repetition_end: None,
        }
    }

    /// 繰り返しの終端つき。始点が`repetition_end`以降の出現は除外される
    pub fn with_end(interval: Interval<T>, repetition: RepetitionType, repetition_end: T) -> Self {
        Self {
            interval,
            repetition,
            repetition_end: Some(repetition_end),
        }
    }

    /// 繰り返しなしの区間
    pub fn once(interval: Interval<T>) -> Self {
        Self::new(interval, RepetitionType::None)
    }

    pub fn interval(&self) -> &Interval<T> {
        &self.interval
    }

    pub fn repetition(&self) -> RepetitionType {
        self.repetition
    }

    pub fn repetition_end(&self) -> Option<T> {
        self.repetition_end
    }

    /// いずれかの出現が時点を含むかどうか
    pub fn contains_instant(&self, instant: T) -> bool {
        self.any_occurrence(instant, instant, |occurrence| {
            occurrence.contains_instant(instant)
        })
    }

    /// いずれかの出現が区間全体を含むかどうか
    pub fn contains(&self, other: &Interval<T>) -> bool {
        self.any_occurrence(other.start(), other.end(), |occurrence| {
            occurrence.contains(other)
        })
    }

    /// いずれかの出現が区間と重なるかどうか(閉区間の意味で)
    pub fn overlaps(&self, other: &Interval<T>) -> bool {
        self.any_occurrence(other.start(), other.end(), |occurrence| {
            occurrence.overlaps(other)
        })
    }

    /// `lower..=upper`に掛かり得る出現に限って述語を評価する
    ///
    /// 出現nが対象に触れるには `start + n*P <= upper` かつ
    /// `end + n*P >= lower` が必要。両不等式から周期数の上下界を求め、
    /// その狭い窓だけを調べる。
    fn any_occurrence<F>(&self, lower: T, upper: T, predicate: F) -> bool
    where
        F: Fn(&Interval<T>) -> bool,
    {
        if self.repetition == RepetitionType::None {
            return predicate(&self.interval);
        }

        let base_start = self.interval.start();
        let base_end = self.interval.end();
        let first = (base_end.periods_until(lower, self.repetition) - WINDOW_SLACK).max(0);
        let last = base_start.periods_until(upper, self.repetition) + WINDOW_SLACK;

        for n in first..=last {
            let (start, end) = match (
                base_start.plus_periods(self.repetition, n),
                base_end.plus_periods(self.repetition, n),
            ) {
                (Some(start), Some(end)) => (start, end),
                _ => break,
            };
            if let Some(repetition_end) = self.repetition_end {
                // 出現の始点は単調増加なので、終端を越えたら打ち切ってよい
                if start >= repetition_end {
                    break;
                }
            }
            let occurrence = match Interval::new(start, end) {
                Ok(occurrence) => occurrence,
                Err(_) => continue,
            };
            if predicate(&occurrence) {
                return true;
            }
        }
        false
    }
}

impl RepeatedInterval<NaiveDateTime> {
    /// 指定した曜日に毎週繰り返す区間を作る
    ///
    /// 基準は2019年のISO第1週に置かれる。どの週を基準にしても出現は同じ。
    pub fn weekly_on(
        weekday: Weekday,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Self, IntervalError> {
        let date = NaiveDate::from_isoywd_opt(2019, 1, weekday)
            .ok_or(IntervalError::InvalidRange)?;
        let interval = LocalInterval::new(date.and_time(start), date.and_time(end))?;
        Ok(Self::new(interval, RepetitionType::Weekly))
    }

    /// 指定した日付に毎年繰り返す終日の区間を作る
    pub fn yearly_on(date: NaiveDate) -> Result<Self, IntervalError> {
        let start = date.and_time(NaiveTime::MIN);
        let end = start + Duration::seconds(SECONDS_PER_DAY - 1);
        Ok(Self::new(LocalInterval::new(start, end)?, RepetitionType::Yearly))
    }
}

const SECONDS_PER_DAY: i64 = 86_400;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn at(s: &str) -> NaiveDateTime {
        s.parse().unwrap()
    }

    fn local(start: &str, end: &str) -> LocalInterval {
        LocalInterval::new(at(start), at(end)).unwrap()
    }

    fn repeated(start: &str, end: &str, repetition: RepetitionType) -> RepeatedInterval<NaiveDateTime> {
        RepeatedInterval::new(local(start, end), repetition)
    }

    #[test]
    fn test_contains_instant_without_repetition() {
        let interval = repeated("2019-05-24T10:00:00", "2019-05-24T12:00:00", RepetitionType::None);
        assert!(interval.contains_instant(at("2019-05-24T10:00:00")));
        assert!(interval.contains_instant(at("2019-05-24T11:00:00")));
        assert!(interval.contains_instant(at("2019-05-24T12:00:00")));

        assert!(!interval.contains_instant(at("2019-05-24T09:59:59")));
        assert!(!interval.contains_instant(at("2019-05-24T08:00:00")));
        assert!(!interval.contains_instant(at("2019-05-24T12:00:01")));
    }

    #[test]
    fn test_contains_instant_daily() {
        let interval = repeated("2019-05-23T10:00:00", "2019-05-23T12:00:00", RepetitionType::Daily);
        assert!(interval.contains_instant(at("2019-05-24T10:00:00")));
        assert!(interval.contains_instant(at("2019-05-24T11:00:00")));
        assert!(interval.contains_instant(at("2019-05-24T12:00:00")));

        assert!(!interval.contains_instant(at("2019-05-24T09:59:59")));
        assert!(!interval.contains_instant(at("2019-05-24T12:00:01")));
        assert!(!interval.contains_instant(at("2019-05-22T11:00:00")));
    }

    #[test]
    fn test_contains_instant_weekly() {
        let interval = RepeatedInterval::weekly_on(
            Weekday::Thu,
            "10:00:00".parse().unwrap(),
            "12:00:00".parse().unwrap(),
        )
        .unwrap();
        assert!(interval.contains_instant(at("2019-05-30T10:00:00")));
        assert!(interval.contains_instant(at("2019-05-30T11:00:00")));
        assert!(interval.contains_instant(at("2019-05-30T12:00:00")));

        assert!(!interval.contains_instant(at("2019-05-30T09:59:59")));
        assert!(!interval.contains_instant(at("2019-05-30T12:00:01")));
        assert!(!interval.contains_instant(at("2019-05-29T11:00:00")));
    }

    #[test]
    fn test_contains_instant_monthly() {
        let interval = repeated("2019-05-23T10:00:00", "2019-05-23T12:00:00", RepetitionType::Monthly);
        assert!(interval.contains_instant(at("2019-06-23T10:00:00")));
        assert!(interval.contains_instant(at("2019-06-23T11:00:00")));
        assert!(interval.contains_instant(at("2019-06-23T12:00:00")));

        assert!(!interval.contains_instant(at("2019-06-23T09:59:59")));
        assert!(!interval.contains_instant(at("2019-06-23T12:00:01")));
        assert!(!interval.contains_instant(at("2019-05-30T11:00:00")));
    }

    #[test]
    fn test_contains_instant_yearly() {
        let interval = repeated("2019-05-23T10:00:00", "2019-05-23T12:00:00", RepetitionType::Yearly);
        assert!(interval.contains_instant(at("2020-05-23T10:00:00")));
        assert!(interval.contains_instant(at("2020-05-23T11:00:00")));
        assert!(interval.contains_instant(at("2020-05-23T12:00:00")));

        assert!(!interval.contains_instant(at("2020-05-23T09:59:59")));
        assert!(!interval.contains_instant(at("2020-05-23T12:00:01")));
        assert!(!interval.contains_instant(at("2019-05-24T11:00:00")));
    }

    #[test]
    fn test_repetition_end_excludes_occurrence_starting_at_it() {
        let interval = RepeatedInterval::with_end(
            local("2019-05-23T10:00:00", "2019-05-23T12:00:00"),
            RepetitionType::Weekly,
            at("2019-07-18T00:00:00"),
        );
        assert!(interval.contains_instant(at("2019-07-11T11:00:00")));
        assert!(!interval.contains_instant(at("2019-07-18T11:00:00")));
        assert!(!interval.contains_instant(at("2019-07-25T11:00:00")));
    }

    #[test]
    fn test_contains_interval_daily() {
        let interval = repeated("2019-05-16T10:00:00", "2019-05-16T12:00:00", RepetitionType::Daily);
        assert!(interval.contains(&local("2019-05-23T10:00:00", "2019-05-23T12:00:00")));
        assert!(interval.contains(&local("2019-05-23T10:30:00", "2019-05-23T11:30:00")));

        assert!(!interval.contains(&local("2019-05-23T08:00:00", "2019-05-23T11:00:00")));
        assert!(!interval.contains(&local("2019-05-23T11:00:00", "2019-05-23T12:00:01")));
        assert!(!interval.contains(&local("2019-05-23T08:00:00", "2019-05-23T16:00:10")));
        assert!(!interval.contains(&local("2019-05-23T08:00:00", "2019-05-23T09:59:59")));
    }

    #[test]
    fn test_contains_interval_monthly_across_years() {
        let interval = repeated("2019-05-23T10:00:00", "2019-05-23T12:00:00", RepetitionType::Monthly);
        assert!(interval.contains(&local("2019-06-23T10:00:00", "2019-06-23T11:00:00")));
        assert!(interval.contains(&local("2020-06-23T10:00:00", "2020-06-23T11:00:00")));
    }

    #[test]
    fn test_contains_interval_respects_repetition_end() {
        let interval = RepeatedInterval::with_end(
            local("2019-05-16T10:00:00", "2019-05-16T12:00:00"),
            RepetitionType::Daily,
            at("2019-10-10T00:00:00"),
        );
        assert!(interval.contains(&local("2019-10-09T10:00:00", "2019-10-09T11:00:00")));
        assert!(!interval.contains(&local("2019-10-10T10:00:00", "2019-10-10T11:00:00")));
    }

    #[test]
    fn test_overlaps_daily() {
        let interval = repeated("2019-05-16T10:00:00", "2019-05-16T12:00:00", RepetitionType::Daily);
        assert!(interval.overlaps(&local("2019-05-23T08:00:00", "2019-05-23T11:00:00")));
        assert!(interval.overlaps(&local("2019-05-23T10:00:00", "2019-05-23T12:00:00")));
        assert!(interval.overlaps(&local("2019-05-23T11:00:00", "2019-05-23T12:00:01")));
        assert!(interval.overlaps(&local("2019-05-23T08:00:00", "2019-05-23T16:00:10")));

        assert!(!interval.overlaps(&local("2019-05-23T08:00:00", "2019-05-23T09:59:59")));
        assert!(!interval.overlaps(&local("2019-05-23T12:00:10", "2019-05-23T16:00:00")));
    }

    #[test]
    fn test_overlaps_yearly() {
        let interval = repeated("2019-05-16T10:00:00", "2019-05-16T12:00:00", RepetitionType::Yearly);
        assert!(interval.overlaps(&local("2020-05-16T08:00:00", "2020-05-16T11:00:00")));
        assert!(interval.overlaps(&local("2020-05-15T10:00:00", "2020-05-16T12:00:00")));

        assert!(!interval.overlaps(&local("2020-05-16T12:00:10", "2020-05-16T16:00:00")));
    }

    #[test]
    fn test_overlaps_respects_repetition_end() {
        let interval = RepeatedInterval::with_end(
            local("2019-05-16T10:00:00", "2019-05-16T12:00:00"),
            RepetitionType::Daily,
            at("2019-10-10T00:00:00"),
        );
        assert!(interval.overlaps(&local("2019-10-09T08:00:00", "2019-10-09T11:00:00")));
        assert!(!interval.overlaps(&local("2019-10-10T08:00:00", "2019-10-10T11:00:00")));
    }

    #[test]
    fn test_query_before_the_base_interval() {
        let interval = repeated("2019-05-16T10:00:00", "2019-05-16T12:00:00", RepetitionType::Daily);
        assert!(!interval.contains_instant(at("2019-05-10T11:00:00")));
        assert!(!interval.overlaps(&local("2019-05-10T10:00:00", "2019-05-10T11:00:00")));
    }

    #[test]
    fn test_fifty_years_of_daily_repetition_is_fast() {
        let interval = repeated("2000-05-16T10:00:00", "2000-05-16T12:00:00", RepetitionType::Daily);
        let target = local("2050-05-16T10:00:00", "2050-05-16T12:00:00");

        let started = Instant::now();
        let result = interval.overlaps(&target);
        let elapsed = started.elapsed();

        assert!(result);
        assert!(elapsed.as_millis() < 50, "took {elapsed:?}");
    }
}
