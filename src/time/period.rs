use std::fmt;
use std::num::ParseIntError;

use chrono::{
    Months,
    NaiveDate
};
use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TimeUnit {
    Months,
    Years
}

impl TimeUnit {
    pub fn to_char(&self) -> char {
        match self {
            TimeUnit::Months => 'm',
            TimeUnit::Years => 'y'
        }
    }
}

#[derive(Debug, Error)]
pub enum ParsePeriodError {
    #[error("empty tenor label")]
    Empty,
    #[error("invalid tenor label '{label}': {source}")]
    Parse {
        label: String,
        source: ParseIntError
    },
    #[error("tenor label '{label}' is out of the supported date range")]
    OutOfRange {
        label: String
    }
}

/// 曲線 tenor 或 roll frequency（例如 `6m`、`10y`）。
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Period {
    number: u32,
    unit: TimeUnit
}

impl Period {
    pub fn new(number: u32, unit: TimeUnit) -> Period {
        Period { number, unit }
    }

    pub fn months(number: u32) -> Period {
        Period::new(number, TimeUnit::Months)
    }

    pub fn years(number: u32) -> Period {
        Period::new(number, TimeUnit::Years)
    }

    /// 解析 tenor label。
    ///
    /// 最後一個字元一律視為單位：`m`（或 `M`）為月，其他任何字元為年。
    /// 因此 `"18m"` 為 18 個月、`"10y"` 為 10 年，而沒有單位的 `"30"` 會被讀成 3 年。
    pub fn parse(label: &str) -> Result<Period, ParsePeriodError> {
        let label = label.trim();
        let unit_chr = label.chars().last().ok_or(ParsePeriodError::Empty)?;
        let number_str = &label[..label.len() - unit_chr.len_utf8()];
        let number = number_str
            .parse::<u32>()
            .map_err(|source| ParsePeriodError::Parse { label: label.to_owned(), source })?;
        let period = match unit_chr {
            'm' | 'M' => Period::months(number),
            _ => Period::years(number)
        };
        match period.total_months() {
            Some(_) => Ok(period),
            None => Err(ParsePeriodError::OutOfRange { label: label.to_owned() })
        }
    }

    /// 總月數；超出 `u32` 時為 `None`。
    pub fn total_months(&self) -> Option<u32> {
        match self.unit {
            TimeUnit::Months => Some(self.number),
            TimeUnit::Years => self.number.checked_mul(12)
        }
    }

    /// 日曆月位移：目標月份沒有該日時取月底（1/31 + 1m = 2/28 或 2/29）。
    /// 結果超出 chrono 可表示的日期範圍時為 `None`。
    pub fn checked_add_to(&self, date: NaiveDate) -> Option<NaiveDate> {
        date.checked_add_months(Months::new(self.total_months()?))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.number, self.unit.to_char())
    }
}
