use chrono::NaiveDate;
use thiserror::Error;

/// 估值過程中的致命錯誤。
///
/// 每一種錯誤都會直接中止估值，不會有部分成功的結果；
/// 計算是 deterministic 的，重試不會改變結果。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValuationError {
    #[error("index '{0}' has no curve points")]
    UnknownIndex(String),

    #[error("missing fixing for index '{index}' on {date}")]
    MissingFixing {
        index: String,
        date: NaiveDate
    },

    #[error("invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("duplicate tenor time {tenor_time} for index '{index}'")]
    DuplicateTenor {
        index: String,
        tenor_time: f64
    }
}
