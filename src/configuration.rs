use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::instrument::interestrate::interestrateswap::SwapSpec;
use crate::market::curvestore::{
    CurvePoint,
    CurveStore
};
use crate::market::fixingstore::{
    Fixing,
    FixingStore
};
use crate::math::curve::nonparametriccurve::piecewiselinear::Extrapolation;
use crate::pricingcondition::PricingCondition;
use crate::risk::riskengine::RiskEngine;
use crate::time::period::{
    ParsePeriodError,
    Period
};
use crate::valuationerror::ValuationError;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("cannot read valuation file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid valuation document: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("curve point '{index_name}': {source}")]
    TenorParse {
        index_name: String,
        source: ParsePeriodError
    },

    #[error(transparent)]
    Valuation(#[from] ValuationError)
}

#[derive(Deserialize)]
struct CurvePointJsonProp {
    index_name: String,
    tenor: String,
    rate: f64
}

#[derive(Deserialize)]
struct ConfigurationJsonProp {
    valuation_date: NaiveDate,
    #[serde(default)]
    estimate_horizon_index: bool,
    #[serde(default)]
    extrapolation: Extrapolation,
    swap: SwapSpec,
    curves: Vec<CurvePointJsonProp>,
    #[serde(default)]
    fixings: Vec<Fixing>
}

/// 一次估值所需的全部輸入：swap、估值條件、曲線與 fixing。
pub struct Configuration {
    swap: SwapSpec,
    pricing_condition: PricingCondition,
    curves: CurveStore,
    fixings: FixingStore
}

impl Configuration {
    pub fn new(swap: SwapSpec,
               pricing_condition: PricingCondition,
               curves: CurveStore,
               fixings: FixingStore) -> Configuration {
        Configuration {
            swap,
            pricing_condition,
            curves,
            fixings
        }
    }

    pub fn from_reader<P: AsRef<Path>>(file_path: P) -> Result<Configuration, ConfigurationError> {
        let file = File::open(file_path.as_ref())?;
        let reader = BufReader::new(file);
        let json_prop: ConfigurationJsonProp = serde_json::from_reader(reader)?;
        info!(path = %file_path.as_ref().display(), "valuation file loaded");
        Self::from_json_prop(json_prop)
    }

    pub fn from_json_str(json: &str) -> Result<Configuration, ConfigurationError> {
        let json_prop: ConfigurationJsonProp = serde_json::from_str(json)?;
        Self::from_json_prop(json_prop)
    }

    fn from_json_prop(json_prop: ConfigurationJsonProp) -> Result<Configuration, ConfigurationError> {
        let day_counter = *json_prop.swap.day_counter();
        let valuation_date = json_prop.valuation_date;
        // tenor label 以估值日加上日曆月位移換算成年分數
        let points = json_prop
            .curves
            .into_iter()
            .map(|prop| -> Result<CurvePoint, ConfigurationError> {
                let tenor_parse_error = |source| ConfigurationError::TenorParse {
                    index_name: prop.index_name.clone(),
                    source
                };
                let period = Period::parse(&prop.tenor).map_err(tenor_parse_error)?;
                let tenor_date = period
                    .checked_add_to(valuation_date)
                    .ok_or_else(|| tenor_parse_error(ParsePeriodError::OutOfRange { label: prop.tenor.clone() }))?;
                let tenor_time = day_counter.year_fraction(valuation_date, tenor_date);
                Ok(CurvePoint::new(prop.index_name, prop.tenor, tenor_time, prop.rate))
            })
            .collect::<Result<Vec<_>, ConfigurationError>>()?;

        let curves = CurveStore::new(points, json_prop.extrapolation)?;
        let pricing_condition = PricingCondition::new(valuation_date, day_counter, json_prop.estimate_horizon_index);
        Ok(Configuration::new(
            json_prop.swap,
            pricing_condition,
            curves,
            FixingStore::new(json_prop.fixings),
        ))
    }

    pub fn swap(&self) -> &SwapSpec {
        &self.swap
    }

    pub fn pricing_condition(&self) -> &PricingCondition {
        &self.pricing_condition
    }

    pub fn curves(&self) -> &CurveStore {
        &self.curves
    }

    pub fn fixings(&self) -> &FixingStore {
        &self.fixings
    }

    pub fn risk_engine(&self) -> RiskEngine<'_> {
        RiskEngine::new(&self.swap, &self.pricing_condition, &self.curves, &self.fixings)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::instrument::interestrate::interestrateswap::SwapDirection;

    const DOCUMENT: &str = r#"{
        "valuation_date": "2020-07-18",
        "estimate_horizon_index": true,
        "swap": {
            "id": "x3453455",
            "direction": "pay",
            "notional": 1000000.0,
            "fixed_rate": 0.015,
            "effective_date": "2020-07-18",
            "maturity_date": "2050-07-18",
            "fixed_frequency": 6,
            "float_frequency": 6,
            "forward_index": "LIBOR",
            "discount_index": "SONIA",
            "day_counter": 365.25
        },
        "curves": [
            { "index_name": "LIBOR", "tenor": "10y", "rate": 0.02 },
            { "index_name": "LIBOR", "tenor": "6m", "rate": 0.015 },
            { "index_name": "SONIA", "tenor": "1y", "rate": 0.01 }
        ],
        "fixings": [
            { "index_name": "LIBOR", "date": "2020-01-18", "rate": 0.007 }
        ]
    }"#;

    #[test]
    fn loads_a_valuation_document() {
        let config = Configuration::from_json_str(DOCUMENT).unwrap();
        assert_eq!(config.swap().id(), "x3453455");
        assert_eq!(config.swap().direction(), SwapDirection::Pay);
        assert_eq!(config.swap().day_counter().dominator_value(), 365.25);
        assert!(config.pricing_condition().estimate_horizon_index());
        assert_eq!(config.fixings().len(), 1);
        assert_eq!(config.curves().len(), 3);

        let libor: Vec<&str> = config
            .curves()
            .curve("LIBOR")
            .unwrap()
            .points()
            .iter()
            .map(CurvePoint::tenor_label)
            .collect();
        assert_eq!(libor, vec!["6m", "10y"]);
    }

    #[test]
    fn tenor_labels_become_calendar_year_fractions() {
        let config = Configuration::from_json_str(DOCUMENT).unwrap();
        let libor = config.curves().curve("LIBOR").unwrap();
        // 2020-07-18 -> 2021-01-18 = 184 天; -> 2030-07-18 = 3652 天
        assert_relative_eq!(libor.points()[0].tenor_time(), 184.0 / 365.25, epsilon = 1e-12);
        assert_relative_eq!(libor.points()[1].tenor_time(), 3652.0 / 365.25, epsilon = 1e-12);
    }

    #[test]
    fn optional_fields_take_defaults() {
        let document = r#"{
            "valuation_date": "2020-07-18",
            "swap": {
                "id": "x1",
                "direction": "receive",
                "notional": 5000000.0,
                "fixed_rate": 0.01,
                "effective_date": "2020-07-18",
                "maturity_date": "2025-07-18",
                "fixed_frequency": 12,
                "float_frequency": 3,
                "forward_index": "SONIA",
                "discount_index": "SONIA",
                "day_counter": 365.0
            },
            "curves": [
                { "index_name": "SONIA", "tenor": "1y", "rate": 0.01 }
            ]
        }"#;
        let config = Configuration::from_json_str(document).unwrap();
        assert!(!config.pricing_condition().estimate_horizon_index());
        assert!(config.fixings().is_empty());
        assert_eq!(config.swap().direction(), SwapDirection::Receive);
        assert_eq!(config.curves().curve("SONIA").unwrap().rate_at(30.0), 0.01);
    }

    #[test]
    fn bad_tenor_label_is_reported() {
        let document = DOCUMENT.replace("\"6m\"", "\"six months\"");
        assert!(matches!(
            Configuration::from_json_str(&document),
            Err(ConfigurationError::TenorParse { .. })
        ));
    }

    #[test]
    fn tenor_beyond_the_calendar_is_reported() {
        let document = DOCUMENT.replace("\"10y\"", "\"400000y\"");
        assert!(matches!(
            Configuration::from_json_str(&document),
            Err(ConfigurationError::TenorParse { source: ParsePeriodError::OutOfRange { .. }, .. })
        ));
    }

    #[test]
    fn duplicate_tenor_is_a_valuation_error() {
        let document = DOCUMENT.replace("\"10y\"", "\"120m\"").replace("\"6m\"", "\"10y\"");
        assert!(matches!(
            Configuration::from_json_str(&document),
            Err(ConfigurationError::Valuation(ValuationError::DuplicateTenor { .. }))
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            Configuration::from_json_str("{ \"valuation_date\": 3 }"),
            Err(ConfigurationError::JsonParse(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            Configuration::from_reader("does/not/exist.json"),
            Err(ConfigurationError::Io(_))
        ));
    }
}
