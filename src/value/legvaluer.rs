use crate::time::daycounter::DayCounter;
use crate::time::schedule::schedule::Schedule;
use crate::time::schedule::scheduleperiod::SchedulePeriod;

/// 把一條 schedule 的現金流折現加總。
///
/// `signed_notional` 的正負號由呼叫端決定（pay fixed 時 fixed leg 為負），
/// 這裡不處理方向。
#[derive(Debug, Clone, Copy)]
pub struct LegValuer {
    day_counter: DayCounter
}

impl LegValuer {
    pub fn new(day_counter: DayCounter) -> LegValuer {
        LegValuer { day_counter }
    }

    pub fn day_counter(&self) -> &DayCounter {
        &self.day_counter
    }

    /// `notional · rate · df · days / divisor`
    #[inline]
    pub fn period_value(&self, period: &SchedulePeriod, signed_notional: f64) -> f64 {
        let accrual = self.day_counter.year_fraction(period.start_date(), period.end_date());
        signed_notional * period.rate() * period.discount_factor() * accrual
    }

    pub fn present_value(&self, schedule: &Schedule, signed_notional: f64) -> f64 {
        schedule
            .schedule_periods()
            .iter()
            .map(|period| self.period_value(period, signed_notional))
            .sum()
    }
}
