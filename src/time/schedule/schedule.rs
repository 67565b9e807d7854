use chrono::NaiveDate;
use tracing::debug;

use crate::instrument::interestrate::interestrateswap::{
    LegKind,
    SwapSpec
};
use crate::market::curvestore::CurveStore;
use crate::market::fixingstore::FixingStore;
use crate::model::interestrate::ratecalculator::RateCalculator;
use crate::pricingcondition::PricingCondition;
use crate::time::period::Period;
use crate::valuationerror::ValuationError;

use super::scheduleperiod::SchedulePeriod;

// ─────────────────────────────────────────────────────────────────────────────
// Schedule
// ─────────────────────────────────────────────────────────────────────────────

/// 單一 leg 的 roll schedule，依日期遞增、前後相接。
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    leg: LegKind,
    frequency: u32,
    schedule_periods: Vec<SchedulePeriod>
}

impl Schedule {
    pub fn new(leg: LegKind,
               frequency: u32,
               schedule_periods: Vec<SchedulePeriod>) -> Schedule {
        Schedule {
            leg,
            frequency,
            schedule_periods
        }
    }

    pub fn leg(&self) -> LegKind {
        self.leg
    }

    /// Roll frequency（月）。
    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    pub fn schedule_periods(&self) -> &[SchedulePeriod] {
        &self.schedule_periods
    }

    pub fn len(&self) -> usize {
        self.schedule_periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedule_periods.is_empty()
    }

    /// 沿用同一組日期與 discount factor，rate 全部改為 `fixed_rate` 的 fixed leg。
    fn as_fixed_leg(&self, fixed_rate: f64) -> Schedule {
        let schedule_periods = self
            .schedule_periods
            .iter()
            .map(|period| period.with_rates(fixed_rate, period.discount_factor()))
            .collect();
        Schedule::new(LegKind::Fixed, self.frequency, schedule_periods)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ScheduleBuilder
// ─────────────────────────────────────────────────────────────────────────────

/// 依 swap 條款產生 roll schedule，並在曲線 bump 後重算 rate 與 discount factor。
///
/// 所有 context（swap、估值條件、fixing）都在建構時明確傳入；曲線則每次呼叫時傳入，
/// 因此同一個 builder 可以同時用於原始曲線與各個 bump 後的複本。
pub struct ScheduleBuilder<'a> {
    swap: &'a SwapSpec,
    pricing_condition: &'a PricingCondition,
    fixings: &'a FixingStore
}

impl<'a> ScheduleBuilder<'a> {
    pub fn new(swap: &'a SwapSpec,
               pricing_condition: &'a PricingCondition,
               fixings: &'a FixingStore) -> ScheduleBuilder<'a> {
        ScheduleBuilder {
            swap,
            pricing_condition,
            fixings
        }
    }

    fn validate(&self, frequency: u32) -> Result<(), ValuationError> {
        if self.swap.effective_date() >= self.swap.maturity_date() {
            return Err(ValuationError::InvalidSchedule(format!(
                "effective date {} is not before maturity date {}",
                self.swap.effective_date(),
                self.swap.maturity_date()
            )));
        }
        if frequency == 0 {
            return Err(ValuationError::InvalidSchedule(
                "roll frequency must be a positive number of months".to_owned()
            ));
        }
        if !(self.swap.notional() > 0.0) {
            return Err(ValuationError::InvalidSchedule(format!(
                "notional must be positive, got {}",
                self.swap.notional()
            )));
        }
        let dominator_value = self.swap.day_counter().dominator_value();
        if !(dominator_value > 0.0 && dominator_value.is_finite()) {
            return Err(ValuationError::InvalidSchedule(format!(
                "day count divisor must be positive, got {}",
                dominator_value
            )));
        }
        Ok(())
    }

    /// `effective + roll_count · frequency` 個月。
    fn roll_date(&self, roll_count: u32, frequency: u32) -> Result<NaiveDate, ValuationError> {
        roll_count
            .checked_mul(frequency)
            .and_then(|months| Period::months(months).checked_add_to(self.swap.effective_date()))
            .ok_or_else(|| ValuationError::InvalidSchedule(format!(
                "roll date {} x {} months after {} is out of the supported date range",
                roll_count,
                frequency,
                self.swap.effective_date()
            )))
    }

    /// 產生 `leg` 的 schedule。
    ///
    /// 第 i 期為 `[effective + i·f, effective + (i+1)·f)`，只要起始日早於 maturity
    /// 就產生完整的一期，不截短最後一期。
    pub fn build(&self, leg: LegKind, curves: &CurveStore) -> Result<Schedule, ValuationError> {
        let frequency = self.swap.frequency(leg);
        self.validate(frequency)?;

        let calculator = RateCalculator::new(curves, self.pricing_condition);
        let mut schedule_periods = Vec::new();
        let mut i: u32 = 0;
        loop {
            let current_roll_date = self.roll_date(i, frequency)?;
            if current_roll_date >= self.swap.maturity_date() {
                break;
            }
            let next_roll_date = self.roll_date(i + 1, frequency)?;

            let rate = match leg {
                LegKind::Fixed => self.swap.fixed_rate(),
                LegKind::Float if self.pricing_condition.is_fixed(current_roll_date) => {
                    self.fixings.fixing(self.swap.forward_index(), current_roll_date)?
                },
                LegKind::Float => {
                    calculator.forward_rate(self.swap.forward_index(), current_roll_date, frequency)?
                }
            };
            let discount_factor = calculator.discount_factor(self.swap.discount_index(), next_roll_date, frequency)?;
            schedule_periods.push(SchedulePeriod::new(current_roll_date, rate, discount_factor, next_roll_date));
            i += 1;
        }

        debug!(swap = self.swap.id(), %leg, frequency, periods = schedule_periods.len(), "schedule generated");
        Ok(Schedule::new(leg, frequency, schedule_periods))
    }

    /// 產生 (fixed, float) 兩條 schedule。
    ///
    /// 兩個 leg 的 roll frequency 相同時，fixed leg 直接沿用 float leg 的日期與
    /// discount factor，只把 rate 換成合約 fixed rate。
    pub fn build_legs(&self, curves: &CurveStore) -> Result<(Schedule, Schedule), ValuationError> {
        self.validate(self.swap.fixed_frequency())?;
        let float_schedule = self.build(LegKind::Float, curves)?;
        let fixed_schedule = if self.swap.shares_roll_frequency() {
            float_schedule.as_fixed_leg(self.swap.fixed_rate())
        } else {
            self.build(LegKind::Fixed, curves)?
        };
        Ok((fixed_schedule, float_schedule))
    }

    /// 以 `curves`（通常是 bump 後的複本）重算既有 schedule 的 rate 與 discount factor。
    ///
    /// 日期保持不變；fixed rate 與已實現的 fixing 也不受曲線影響。
    pub fn rebuild(&self, schedule: &Schedule, curves: &CurveStore) -> Result<Schedule, ValuationError> {
        let calculator = RateCalculator::new(curves, self.pricing_condition);
        let frequency = schedule.frequency();
        let schedule_periods = schedule
            .schedule_periods()
            .iter()
            .map(|period| -> Result<SchedulePeriod, ValuationError> {
                let rate = match schedule.leg() {
                    LegKind::Float if !self.pricing_condition.is_fixed(period.start_date()) => {
                        calculator.forward_rate(self.swap.forward_index(), period.start_date(), frequency)?
                    },
                    _ => period.rate()
                };
                let discount_factor = calculator.discount_factor(self.swap.discount_index(), period.end_date(), frequency)?;
                Ok(period.with_rates(rate, discount_factor))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Schedule::new(schedule.leg(), frequency, schedule_periods))
    }
}
