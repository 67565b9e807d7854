use chrono::NaiveDate;

use crate::time::daycounter::DayCounter;

/// 估值時的共用條件：估值日、day count，以及估值日當天 reset 的處理方式。
#[derive(Debug, Clone, Copy)]
pub struct PricingCondition {
    horizon: NaiveDate,
    day_counter: DayCounter,
    estimate_horizon_index: bool
}

impl PricingCondition {
    pub fn new(horizon: NaiveDate,
               day_counter: DayCounter,
               estimate_horizon_index: bool) -> PricingCondition {
        PricingCondition {
            horizon,
            day_counter,
            estimate_horizon_index
        }
    }

    pub fn horizon(&self) -> NaiveDate {
        self.horizon
    }

    pub fn day_counter(&self) -> &DayCounter {
        &self.day_counter
    }

    pub fn estimate_horizon_index(&self) -> bool {
        self.estimate_horizon_index
    }

    /// 估值日到 `d` 的年分數（tenor time）。
    pub fn tenor_time(&self, d: NaiveDate) -> f64 {
        self.day_counter.year_fraction(self.horizon, d)
    }

    /// 在 `reset_date` reset 的 floating period 是否已經 fix。
    ///
    /// 早於估值日一定使用 fixing；剛好在估值日時，除非 `estimate_horizon_index`
    /// 為 true，否則也使用 fixing。
    pub fn is_fixed(&self, reset_date: NaiveDate) -> bool {
        reset_date < self.horizon
            || (reset_date == self.horizon && !self.estimate_horizon_index)
    }
}
