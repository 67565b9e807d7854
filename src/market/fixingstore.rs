use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::warn;

use crate::valuationerror::ValuationError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Fixing {
    index_name: String,
    date: NaiveDate,
    rate: f64
}

impl Fixing {
    pub fn new(index_name: String, date: NaiveDate, rate: f64) -> Fixing {
        Fixing { index_name, date, rate }
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

/// 已實現的 fixing，以 (index, date) 為唯一鍵。
#[derive(Debug, Clone, Default)]
pub struct FixingStore {
    past_fixings: HashMap<String, HashMap<NaiveDate, f64>>
}

impl FixingStore {
    pub fn new(fixings: Vec<Fixing>) -> FixingStore {
        let mut store = FixingStore::default();
        for fixing in fixings {
            store.insert(fixing);
        }
        store
    }

    /// 同一 (index, date) 重複出現時以後者為準。
    pub fn insert(&mut self, fixing: Fixing) {
        let previous = self
            .past_fixings
            .entry(fixing.index_name.clone())
            .or_default()
            .insert(fixing.date, fixing.rate);
        if let Some(previous) = previous {
            warn!(
                index = %fixing.index_name,
                date = %fixing.date,
                previous,
                rate = fixing.rate,
                "duplicate fixing replaced"
            );
        }
    }

    pub fn len(&self) -> usize {
        self.past_fixings.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 找不到時回傳 `MissingFixing`，不會以 0 或 forward rate 代替。
    pub fn fixing(&self, index_name: &str, date: NaiveDate) -> Result<f64, ValuationError> {
        self.past_fixings
            .get(index_name)
            .and_then(|fixings| fixings.get(&date))
            .copied()
            .ok_or_else(|| ValuationError::MissingFixing {
                index: index_name.to_owned(),
                date
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn looks_up_by_index_and_date() {
        let store = FixingStore::new(vec![
            Fixing::new("LIBOR".to_owned(), ymd(2020, 7, 18), 0.0071),
            Fixing::new("SONIA".to_owned(), ymd(2020, 7, 18), 0.0005),
        ]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.fixing("LIBOR", ymd(2020, 7, 18)).unwrap(), 0.0071);
        assert_eq!(store.fixing("SONIA", ymd(2020, 7, 18)).unwrap(), 0.0005);
    }

    #[test]
    fn missing_fixing_is_explicit() {
        let store = FixingStore::new(vec![Fixing::new("LIBOR".to_owned(), ymd(2020, 7, 18), 0.0071)]);
        assert_eq!(
            store.fixing("LIBOR", ymd(2021, 1, 18)),
            Err(ValuationError::MissingFixing {
                index: "LIBOR".to_owned(),
                date: ymd(2021, 1, 18)
            })
        );
        assert!(store.fixing("SONIA", ymd(2020, 7, 18)).is_err());
    }

    #[test]
    fn duplicate_fixing_keeps_latest() {
        let store = FixingStore::new(vec![
            Fixing::new("LIBOR".to_owned(), ymd(2020, 7, 18), 0.0071),
            Fixing::new("LIBOR".to_owned(), ymd(2020, 7, 18), 0.0072),
        ]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.fixing("LIBOR", ymd(2020, 7, 18)).unwrap(), 0.0072);
    }
}
