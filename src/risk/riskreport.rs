use std::fmt;

use chrono::NaiveDate;
use rust_decimal::{
    Decimal,
    RoundingStrategy
};

use super::riskladder::{
    RiskLadder,
    RiskLadderEntry
};

/// 一次完整估值的結果：base PV、各 leg PV、完整 risk ladder，以及兩條曲線的 PV01 加總。
#[derive(Debug, Clone, PartialEq)]
pub struct RiskReport {
    swap_description: String,
    valuation_date: NaiveDate,
    forward_index: String,
    discount_index: String,
    fixed_leg_pv: f64,
    float_leg_pv: f64,
    ladder: Vec<RiskLadderEntry>
}

impl RiskReport {
    pub fn new(swap_description: String,
               valuation_date: NaiveDate,
               forward_index: String,
               discount_index: String,
               fixed_leg_pv: f64,
               float_leg_pv: f64,
               ladder: Vec<RiskLadderEntry>) -> RiskReport {
        RiskReport {
            swap_description,
            valuation_date,
            forward_index,
            discount_index,
            fixed_leg_pv,
            float_leg_pv,
            ladder
        }
    }

    pub fn swap_description(&self) -> &str {
        &self.swap_description
    }

    pub fn valuation_date(&self) -> NaiveDate {
        self.valuation_date
    }

    pub fn forward_index(&self) -> &str {
        &self.forward_index
    }

    pub fn discount_index(&self) -> &str {
        &self.discount_index
    }

    pub fn fixed_leg_pv(&self) -> f64 {
        self.fixed_leg_pv
    }

    pub fn float_leg_pv(&self) -> f64 {
        self.float_leg_pv
    }

    pub fn present_value(&self) -> f64 {
        self.fixed_leg_pv + self.float_leg_pv
    }

    pub fn ladder(&self) -> &[RiskLadderEntry] {
        &self.ladder
    }

    /// Forward（float rate）曲線所有點的 PV01 加總。
    pub fn forward_pv01(&self) -> f64 {
        self.ladder.total_pv01(&self.forward_index)
    }

    /// Discount（collateral）曲線所有點的 PV01 加總。
    pub fn discount_pv01(&self) -> f64 {
        self.ladder.total_pv01(&self.discount_index)
    }

    /// PV 取到分。
    pub fn rounded_present_value(&self) -> Decimal {
        round_amount(self.present_value(), 2)
    }

    pub fn rounded_forward_pv01(&self) -> Decimal {
        round_amount(self.forward_pv01(), 1)
    }

    pub fn rounded_discount_pv01(&self) -> Decimal {
        round_amount(self.discount_pv01(), 1)
    }

    /// 報表用：先 forward index，再 discount index（兩者相同時只出現一次）。
    pub fn ladder_sections(&self) -> Vec<(&str, Vec<&RiskLadderEntry>)> {
        let mut sections = vec![(self.forward_index.as_str(), self.ladder.entries_for(&self.forward_index).collect())];
        if self.discount_index != self.forward_index {
            sections.push((self.discount_index.as_str(), self.ladder.entries_for(&self.discount_index).collect()));
        }
        sections
    }
}

fn round_amount(amount: f64, dp: u32) -> Decimal {
    Decimal::from_f64_retain(amount)
        .unwrap_or_default()
        .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

impl fmt::Display for RiskReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.swap_description)?;
        writeln!(f, "Valuation date: {}", self.valuation_date)?;
        writeln!(
            f,
            "Present Value: {} {} PV01: {}, {} PV01: {}",
            self.rounded_present_value(),
            self.forward_index,
            self.rounded_forward_pv01(),
            self.discount_index,
            self.rounded_discount_pv01()
        )?;
        for (index_name, entries) in self.ladder_sections() {
            writeln!(f)?;
            writeln!(f, "{} PV01 Risk Ladder", index_name)?;
            for entry in entries {
                writeln!(f, "  {:>6} {:>14}", entry.tenor_label(), round_amount(entry.pv01(), 2))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(forward_index: &str, discount_index: &str) -> RiskReport {
        RiskReport::new(
            "SwapID: x1, pay fixed @0.015, maturity: 18/07/2050, notional: 1000000".to_owned(),
            NaiveDate::from_ymd_opt(2020, 7, 18).unwrap(),
            forward_index.to_owned(),
            discount_index.to_owned(),
            -300_000.125,
            410_000.0,
            vec![
                RiskLadderEntry::new("1y".to_owned(), "LIBOR".to_owned(), -95.04),
                RiskLadderEntry::new("30y".to_owned(), "LIBOR".to_owned(), -2001.0),
                RiskLadderEntry::new("1y".to_owned(), "SONIA".to_owned(), 0.5),
                RiskLadderEntry::new("30y".to_owned(), "SONIA".to_owned(), 330.0),
            ],
        )
    }

    #[test]
    fn aggregates_by_index() {
        let report = report("LIBOR", "SONIA");
        assert_eq!(report.present_value(), 109_999.875);
        assert_eq!(report.rounded_present_value(), Decimal::new(10_999_988, 2));
        assert_eq!(report.rounded_forward_pv01(), Decimal::new(-20_960, 1));
        assert_eq!(report.rounded_discount_pv01(), Decimal::new(3_305, 1));
    }

    #[test]
    fn renders_both_ladders() {
        let text = report("LIBOR", "SONIA").to_string();
        assert!(text.starts_with("SwapID: x1"));
        assert!(text.contains("Present Value: 109999.88 LIBOR PV01: -2096.0, SONIA PV01: 330.5"));
        let libor = text.find("LIBOR PV01 Risk Ladder").unwrap();
        let sonia = text.find("SONIA PV01 Risk Ladder").unwrap();
        assert!(libor < sonia);
    }

    #[test]
    fn single_curve_renders_one_ladder() {
        let report = report("SONIA", "SONIA");
        assert_eq!(report.ladder_sections().len(), 1);
        assert_eq!(report.forward_pv01(), report.discount_pv01());
    }
}
