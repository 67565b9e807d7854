/// 每年複利 `frequency` 次的離散複利慣例。
///
/// 曲線上的 zero rate 以 leg 的 roll frequency 複利：
/// 6M roll 對應每年 2 次，3M roll 對應每年 4 次。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Compounding {
    frequency: f64
}

impl Compounding {
    pub fn new(frequency: f64) -> Compounding {
        Compounding { frequency }
    }

    /// 由 roll frequency（月）推出每年複利次數 `12 / months`。
    pub fn from_roll_months(months: u32) -> Compounding {
        Compounding::new(12.0 / months as f64)
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// `(1 + r / p) ^ (p · tau)`
    pub fn future_value(&self, rate: f64, tau: f64) -> f64 {
        (1.0 + rate / self.frequency).powf(tau * self.frequency)
    }

    pub fn discount(&self, rate: f64, tau: f64) -> f64 {
        1.0 / self.future_value(rate, tau)
    }

    /// `future_value` 的反函數：`p · (fv ^ (1 / (p · tau)) - 1)`
    pub fn implied_rate(&self, future_value: f64, tau: f64) -> f64 {
        (future_value.powf(1.0 / (tau * self.frequency)) - 1.0) * self.frequency
    }
}
