use std::fmt;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::time::daycounter::DayCounter;

/// 以 fixed leg 的方向表示 swap 方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwapDirection {
    Pay,
    Receive
}

impl SwapDirection {
    /// Fixed leg notional 的正負號；float leg 取相反號。
    pub fn fixed_multiplier(&self) -> f64 {
        match self {
            SwapDirection::Pay => -1.0,
            SwapDirection::Receive => 1.0
        }
    }

    pub fn float_multiplier(&self) -> f64 {
        -self.fixed_multiplier()
    }
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwapDirection::Pay => write!(f, "pay"),
            SwapDirection::Receive => write!(f, "receive")
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegKind {
    Fixed,
    Float
}

impl fmt::Display for LegKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LegKind::Fixed => write!(f, "fixed"),
            LegKind::Float => write!(f, "float")
        }
    }
}

/// Vanilla fixed/float interest rate swap。建立後不可變。
///
/// 合約日期是否合法（effective < maturity、frequency > 0）由
/// `ScheduleBuilder` 在產生 schedule 前檢查。
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SwapSpec {
    id: String,
    direction: SwapDirection,
    notional: f64,
    fixed_rate: f64,
    effective_date: NaiveDate,
    maturity_date: NaiveDate,
    fixed_frequency: u32,
    float_frequency: u32,
    forward_index: String,
    discount_index: String,
    day_counter: DayCounter
}

impl SwapSpec {
    pub fn new(id: String,
               direction: SwapDirection,
               notional: f64,
               fixed_rate: f64,
               effective_date: NaiveDate,
               maturity_date: NaiveDate,
               fixed_frequency: u32,
               float_frequency: u32,
               forward_index: String,
               discount_index: String,
               day_counter: DayCounter) -> SwapSpec {
        SwapSpec {
            id,
            direction,
            notional,
            fixed_rate,
            effective_date,
            maturity_date,
            fixed_frequency,
            float_frequency,
            forward_index,
            discount_index,
            day_counter
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn direction(&self) -> SwapDirection {
        self.direction
    }

    pub fn notional(&self) -> f64 {
        self.notional
    }

    pub fn fixed_rate(&self) -> f64 {
        self.fixed_rate
    }

    pub fn effective_date(&self) -> NaiveDate {
        self.effective_date
    }

    pub fn maturity_date(&self) -> NaiveDate {
        self.maturity_date
    }

    pub fn fixed_frequency(&self) -> u32 {
        self.fixed_frequency
    }

    pub fn float_frequency(&self) -> u32 {
        self.float_frequency
    }

    /// Roll frequency（月）。
    pub fn frequency(&self, leg: LegKind) -> u32 {
        match leg {
            LegKind::Fixed => self.fixed_frequency,
            LegKind::Float => self.float_frequency
        }
    }

    pub fn forward_index(&self) -> &str {
        &self.forward_index
    }

    /// Collateral index，所有 leg 都用它折現。
    pub fn discount_index(&self) -> &str {
        &self.discount_index
    }

    pub fn day_counter(&self) -> &DayCounter {
        &self.day_counter
    }

    /// 帶正負號的 notional：pay fixed 時 fixed leg 為負、float leg 為正。
    pub fn signed_notional(&self, leg: LegKind) -> f64 {
        match leg {
            LegKind::Fixed => self.notional * self.direction.fixed_multiplier(),
            LegKind::Float => self.notional * self.direction.float_multiplier()
        }
    }

    pub fn shares_roll_frequency(&self) -> bool {
        self.fixed_frequency == self.float_frequency
    }

    /// 報表標題用的描述。
    pub fn description(&self) -> String {
        format!(
            "SwapID: {}, {} fixed @{}, maturity: {}, notional: {}",
            self.id,
            self.direction,
            self.fixed_rate,
            self.maturity_date.format("%d/%m/%Y"),
            self.notional
        )
    }
}
