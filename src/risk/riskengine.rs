use tracing::{
    debug,
    info
};

use crate::instrument::interestrate::interestrateswap::{
    LegKind,
    SwapSpec
};
use crate::market::curvestore::CurveStore;
use crate::market::fixingstore::FixingStore;
use crate::pricingcondition::PricingCondition;
use crate::time::schedule::schedule::{
    Schedule,
    ScheduleBuilder
};
use crate::valuationerror::ValuationError;
use crate::value::legvaluer::LegValuer;

use super::riskladder::RiskLadderEntry;
use super::riskreport::RiskReport;

/// 1bp。
pub const BASIS_POINT: f64 = 0.0001;

/// 已產生的兩條 leg schedule。
struct SwapLegs {
    fixed: Schedule,
    float: Schedule
}

/// 估值與 bump-and-revalue risk 的進入點。
///
/// 每個曲線點各自產生一份 bump 過的曲線複本，schedule 只重算 rate 與 discount factor，
/// 日期格與 fixing 沿用 base 估值的結果。傳入的 `CurveStore` 只會被借用，不會被修改。
pub struct RiskEngine<'a> {
    swap: &'a SwapSpec,
    pricing_condition: &'a PricingCondition,
    curves: &'a CurveStore,
    fixings: &'a FixingStore
}

impl<'a> RiskEngine<'a> {
    pub fn new(swap: &'a SwapSpec,
               pricing_condition: &'a PricingCondition,
               curves: &'a CurveStore,
               fixings: &'a FixingStore) -> RiskEngine<'a> {
        RiskEngine {
            swap,
            pricing_condition,
            curves,
            fixings
        }
    }

    fn schedule_builder(&self) -> ScheduleBuilder<'a> {
        ScheduleBuilder::new(self.swap, self.pricing_condition, self.fixings)
    }

    fn leg_valuer(&self) -> LegValuer {
        LegValuer::new(*self.swap.day_counter())
    }

    fn build_legs(&self) -> Result<SwapLegs, ValuationError> {
        let (fixed, float) = self.schedule_builder().build_legs(self.curves)?;
        Ok(SwapLegs { fixed, float })
    }

    /// (fixed leg PV, float leg PV)
    fn leg_values(&self, legs: &SwapLegs) -> (f64, f64) {
        let valuer = self.leg_valuer();
        (
            valuer.present_value(&legs.fixed, self.swap.signed_notional(LegKind::Fixed)),
            valuer.present_value(&legs.float, self.swap.signed_notional(LegKind::Float))
        )
    }

    fn revalue(&self, legs: &SwapLegs, curves: &CurveStore) -> Result<f64, ValuationError> {
        let builder = self.schedule_builder();
        let bumped = SwapLegs {
            fixed: builder.rebuild(&legs.fixed, curves)?,
            float: builder.rebuild(&legs.float, curves)?
        };
        let (fixed_pv, float_pv) = self.leg_values(&bumped);
        Ok(fixed_pv + float_pv)
    }

    /// 只算 base PV，不跑 risk ladder。
    pub fn present_value(&self) -> Result<f64, ValuationError> {
        let legs = self.build_legs()?;
        let (fixed_pv, float_pv) = self.leg_values(&legs);
        Ok(fixed_pv + float_pv)
    }

    /// 完整估值：base PV 加上每個曲線點往下 bump 1bp 的 PV01 ladder。
    pub fn run(&self) -> Result<RiskReport, ValuationError> {
        info!(
            swap = self.swap.id(),
            valuation_date = %self.pricing_condition.horizon(),
            curve_points = self.curves.len(),
            "valuing swap"
        );
        let legs = self.build_legs()?;
        let (fixed_leg_pv, float_leg_pv) = self.leg_values(&legs);
        let base_pv = fixed_leg_pv + float_leg_pv;
        info!(swap = self.swap.id(), fixed_leg_pv, float_leg_pv, base_pv, "base valuation complete");

        let ladder = self
            .curves
            .points()
            .enumerate()
            .map(|(position, point)| -> Result<RiskLadderEntry, ValuationError> {
                let bumped_curves = self.curves.with_bumped_point(position, -BASIS_POINT)?;
                let pv01 = self.revalue(&legs, &bumped_curves)? - base_pv;
                debug!(index = point.index_name(), tenor = point.tenor_label(), pv01, "curve point bumped");
                Ok(RiskLadderEntry::new(point.tenor_label().to_owned(), point.index_name().to_owned(), pv01))
            })
            .collect::<Result<Vec<_>, ValuationError>>()?;

        let report = RiskReport::new(
            self.swap.description(),
            self.pricing_condition.horizon(),
            self.swap.forward_index().to_owned(),
            self.swap.discount_index().to_owned(),
            fixed_leg_pv,
            float_leg_pv,
            ladder,
        );
        info!(
            swap = self.swap.id(),
            forward_pv01 = report.forward_pv01(),
            discount_pv01 = report.discount_pv01(),
            "risk ladder complete"
        );
        Ok(report)
    }

    /// `index_name` 整條曲線同時往下 bump 1bp 的 PV 變化。
    pub fn parallel_pv01(&self, index_name: &str) -> Result<f64, ValuationError> {
        let legs = self.build_legs()?;
        let (fixed_pv, float_pv) = self.leg_values(&legs);
        let shifted = self.curves.with_parallel_shift(index_name, -BASIS_POINT)?;
        Ok(self.revalue(&legs, &shifted)? - (fixed_pv + float_pv))
    }
}
