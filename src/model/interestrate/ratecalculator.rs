use chrono::NaiveDate;

use crate::interestrate::compounding::Compounding;
use crate::market::curvestore::CurveStore;
use crate::pricingcondition::PricingCondition;
use crate::time::period::Period;
use crate::valuationerror::ValuationError;

/// 由 zero rate 曲線推出 discount factor 與 forward rate。
///
/// 曲線上的 rate 視為以 leg roll frequency 複利的 zero rate，
/// tenor time 為估值日起算的 actual days / day count 分母。
pub struct RateCalculator<'a> {
    curves: &'a CurveStore,
    pricing_condition: &'a PricingCondition
}

impl<'a> RateCalculator<'a> {
    pub fn new(curves: &'a CurveStore, pricing_condition: &'a PricingCondition) -> RateCalculator<'a> {
        RateCalculator { curves, pricing_condition }
    }

    pub fn curves(&self) -> &CurveStore {
        self.curves
    }

    pub fn pricing_condition(&self) -> &PricingCondition {
        self.pricing_condition
    }

    /// `(1 + r / p) ^ (-p · t)`，`p = 12 / frequency_months`，`r` 為 `t` 的插值 rate。
    pub fn discount_factor(&self,
                           index_name: &str,
                           pay_date: NaiveDate,
                           frequency_months: u32) -> Result<f64, ValuationError> {
        let tenor = self.pricing_condition.tenor_time(pay_date);
        let rate = self.curves.rate_at(index_name, tenor)?;
        Ok(Compounding::from_roll_months(frequency_months).discount(rate, tenor))
    }

    /// `period_start` 到 `period_start + frequency_months` 的 forward rate。
    ///
    /// 由兩端 zero rate 的 growth factor 比值反推，並以同一個複利頻率年化：
    ///
    /// ```text
    /// p · [ ((1 + r_to / p)^(p · t_to) / (1 + r_from / p)^(p · t_from)) ^ (1 / (p · (t_to - t_from))) - 1 ]
    /// ```
    pub fn forward_rate(&self,
                        index_name: &str,
                        period_start: NaiveDate,
                        frequency_months: u32) -> Result<f64, ValuationError> {
        let period_end = Period::months(frequency_months)
            .checked_add_to(period_start)
            .ok_or_else(|| ValuationError::InvalidSchedule(format!(
                "forward period of {} months from {} is out of the supported date range",
                frequency_months,
                period_start
            )))?;
        let tenor_from = self.pricing_condition.tenor_time(period_start);
        let tenor_to = self.pricing_condition.tenor_time(period_end);
        let rate_from = self.curves.rate_at(index_name, tenor_from)?;
        let rate_to = self.curves.rate_at(index_name, tenor_to)?;

        let compounding = Compounding::from_roll_months(frequency_months);
        let growth = compounding.future_value(rate_to, tenor_to)
            / compounding.future_value(rate_from, tenor_from);
        Ok(compounding.implied_rate(growth, tenor_to - tenor_from))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::market::curvestore::CurvePoint;
    use crate::math::curve::nonparametriccurve::piecewiselinear::Extrapolation;
    use crate::time::daycounter::DayCounter;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn curves(points: &[(&str, f64, f64)]) -> CurveStore {
        let points = points
            .iter()
            .map(|(index, tenor, rate)| CurvePoint::new(index.to_string(), format!("{}y", tenor), *tenor, *rate))
            .collect();
        CurveStore::new(points, Extrapolation::Flat).unwrap()
    }

    fn condition() -> PricingCondition {
        PricingCondition::new(ymd(2020, 7, 18), DayCounter::new(365.25), false)
    }

    #[test]
    fn discount_factor_is_one_at_valuation_date() {
        let curves = curves(&[("SONIA", 1.0, 0.01), ("SONIA", 10.0, 0.02)]);
        let condition = condition();
        let calculator = RateCalculator::new(&curves, &condition);
        assert_eq!(calculator.discount_factor("SONIA", ymd(2020, 7, 18), 6).unwrap(), 1.0);
    }

    #[test]
    fn discount_factor_decreases_with_tenor_for_positive_rates() {
        let curves = curves(&[("SONIA", 1.0, 0.01)]);
        let condition = condition();
        let calculator = RateCalculator::new(&curves, &condition);
        let mut previous = 1.0;
        for i in 1..=60 {
            let pay_date = Period::months(6 * i).checked_add_to(ymd(2020, 7, 18)).unwrap();
            let df = calculator.discount_factor("SONIA", pay_date, 6).unwrap();
            assert!(df < previous && df > 0.0);
            previous = df;
        }
    }

    #[test]
    fn discount_factor_matches_closed_form() {
        let curves = curves(&[("SONIA", 1.0, 0.01)]);
        let condition = condition();
        let calculator = RateCalculator::new(&curves, &condition);
        let pay_date = ymd(2025, 7, 18);
        let tenor = 1826.0 / 365.25;
        let expected = 1.0 / (1.005_f64).powf(2.0 * tenor);
        assert_relative_eq!(
            calculator.discount_factor("SONIA", pay_date, 6).unwrap(),
            expected,
            epsilon = 1e-14
        );
    }

    #[test]
    fn forward_rate_on_flat_curve_is_the_flat_rate() {
        let curves = curves(&[("LIBOR", 0.5, 0.02), ("LIBOR", 30.0, 0.02)]);
        let condition = condition();
        let calculator = RateCalculator::new(&curves, &condition);
        for start in [ymd(2020, 7, 18), ymd(2023, 1, 18), ymd(2049, 1, 18)] {
            assert_relative_eq!(calculator.forward_rate("LIBOR", start, 6).unwrap(), 0.02, epsilon = 1e-12);
            assert_relative_eq!(calculator.forward_rate("LIBOR", start, 3).unwrap(), 0.02, epsilon = 1e-12);
        }
    }

    #[test]
    fn forward_rate_exceeds_zero_rates_on_upward_curve() {
        let curves = curves(&[("LIBOR", 1.0, 0.01), ("LIBOR", 10.0, 0.03)]);
        let condition = condition();
        let calculator = RateCalculator::new(&curves, &condition);
        let start = ymd(2025, 7, 18);
        let forward = calculator.forward_rate("LIBOR", start, 6).unwrap();
        let zero = curves.rate_at("LIBOR", condition.tenor_time(start)).unwrap();
        assert!(forward > zero);
    }

    #[test]
    fn forward_rate_matches_closed_form_on_sloped_curve() {
        let curves = curves(&[("LIBOR", 1.0, 0.01), ("LIBOR", 10.0, 0.03)]);
        let condition = condition();
        let calculator = RateCalculator::new(&curves, &condition);

        // 2020-07-18 -> 2025-07-18 = 1826 天, -> 2026-01-18 = 2010 天
        let t_from: f64 = 1826.0 / 365.25;
        let t_to: f64 = 2010.0 / 365.25;
        let r_from = 0.01 + 0.02 * (t_from - 1.0) / 9.0;
        let r_to = 0.01 + 0.02 * (t_to - 1.0) / 9.0;
        let p = 2.0;
        let growth = (1.0 + r_to / p).powf(t_to * p) / (1.0 + r_from / p).powf(t_from * p);
        let expected = p * (growth.powf(1.0 / ((t_to - t_from) * p)) - 1.0);

        let forward = calculator.forward_rate("LIBOR", ymd(2025, 7, 18), 6).unwrap();
        assert_relative_eq!(forward, expected, epsilon = 1e-14);
    }

    #[test]
    fn forward_period_beyond_the_calendar_is_rejected() {
        let curves = curves(&[("LIBOR", 1.0, 0.01)]);
        let condition = condition();
        let calculator = RateCalculator::new(&curves, &condition);
        assert!(matches!(
            calculator.forward_rate("LIBOR", ymd(2020, 7, 18), 4_000_000),
            Err(ValuationError::InvalidSchedule(_))
        ));
    }

    #[test]
    fn unknown_index_propagates() {
        let curves = curves(&[("SONIA", 1.0, 0.01)]);
        let condition = condition();
        let calculator = RateCalculator::new(&curves, &condition);
        assert_eq!(
            calculator.forward_rate("LIBOR", ymd(2021, 7, 18), 6),
            Err(ValuationError::UnknownIndex("LIBOR".to_owned()))
        );
    }
}
