/// 1日あたりの予約数の方針
///
/// 数えるのは直近24時間に「作成された」予約レコードであり、予約枠の
/// 日付ではない。取り消した予約も枠を消費したまま残る。
pub struct DailyQuotaPolicy {
    max_per_day: usize,
}

impl DailyQuotaPolicy {
    pub fn new(max_per_day: usize) -> Self {
        Self { max_per_day }
    }

    pub fn max_per_day(&self) -> usize {
        self.max_per_day
    }

    /// 直近24時間の作成数が上限未満かどうか
    pub fn allows(&self, created_in_last_day: usize) -> bool {
        created_in_last_day < self.max_per_day
    }
}
