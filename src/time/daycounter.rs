use chrono::NaiveDate;
use serde::Deserialize;

/// Actual / 常數分母 的 day count。
///
/// 整個 swap 只使用一個分母（例如 365.25），fixed leg 與 float leg 共用，
/// tenor 換算也使用同一個分母。
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct DayCounter {
    dominator_value: f64
}

impl DayCounter {
    pub fn new(dominator_value: f64) -> DayCounter {
        DayCounter { dominator_value }
    }

    pub fn dominator_value(&self) -> f64 {
        self.dominator_value
    }

    #[inline]
    pub fn days_between(&self, d1: NaiveDate, d2: NaiveDate) -> f64 {
        (d2 - d1).num_days() as f64
    }

    /// d2 早於 d1 時回傳負值。
    #[inline]
    pub fn year_fraction(&self, d1: NaiveDate, d2: NaiveDate) -> f64 {
        self.days_between(d1, d2) / self.dominator_value
    }
}
