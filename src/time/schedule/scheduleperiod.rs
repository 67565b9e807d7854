use chrono::NaiveDate;

/// Roll schedule 中的一期：`[start_date, end_date)`，適用 rate，以及 end_date（付款日）的 discount factor。
///
/// `rate` 視 leg 而定為合約 fixed rate、已實現的 fixing，或由曲線推出的 forward rate。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchedulePeriod {
    start_date: NaiveDate,
    rate: f64,
    discount_factor: f64,
    end_date: NaiveDate
}

impl SchedulePeriod {
    pub fn new(start_date: NaiveDate,
               rate: f64,
               discount_factor: f64,
               end_date: NaiveDate) -> SchedulePeriod {
        SchedulePeriod {
            start_date,
            rate,
            discount_factor,
            end_date
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// 日期不變，只替換 rate 與 discount factor。
    pub fn with_rates(&self, rate: f64, discount_factor: f64) -> SchedulePeriod {
        SchedulePeriod::new(self.start_date, rate, discount_factor, self.end_date)
    }
}
