use crate::math::curve::curve::Curve;
use crate::math::curve::nonparametriccurve::nonparametriccurve::Point2D;
use crate::math::curve::nonparametriccurve::piecewiselinear::{
    Extrapolation,
    PiecewiseLinear
};
use crate::valuationerror::ValuationError;

// ─────────────────────────────────────────────────────────────────────────────
// CurvePoint
// ─────────────────────────────────────────────────────────────────────────────

/// 某個 index 曲線上的一個 tenor 點。
///
/// `tenor_label` 只用於 risk ladder 顯示；插值使用 `tenor_time`（年）。
#[derive(Debug, Clone, PartialEq)]
pub struct CurvePoint {
    index_name: String,
    tenor_label: String,
    tenor_time: f64,
    rate: f64
}

impl CurvePoint {
    pub fn new(index_name: String, tenor_label: String, tenor_time: f64, rate: f64) -> CurvePoint {
        CurvePoint {
            index_name,
            tenor_label,
            tenor_time,
            rate
        }
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn tenor_label(&self) -> &str {
        &self.tenor_label
    }

    pub fn tenor_time(&self) -> f64 {
        self.tenor_time
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// IndexCurve
// ─────────────────────────────────────────────────────────────────────────────

/// 單一 index 的曲線：依 tenor time 嚴格遞增排序的點，以及對應的插值器。
#[derive(Debug, Clone)]
pub struct IndexCurve {
    index_name: String,
    points: Vec<CurvePoint>,
    interpolator: PiecewiseLinear
}

impl IndexCurve {
    fn new(
        index_name: String,
        mut points: Vec<CurvePoint>,
        extrapolation: Extrapolation,
    ) -> Result<IndexCurve, ValuationError> {
        points.sort_by(|lhs, rhs| lhs.tenor_time.total_cmp(&rhs.tenor_time));
        if let Some(pair) = points.windows(2).find(|pair| pair[0].tenor_time == pair[1].tenor_time) {
            return Err(ValuationError::DuplicateTenor {
                index: index_name,
                tenor_time: pair[1].tenor_time
            });
        }
        let interpolator = Self::interpolator(&index_name, &points, extrapolation)?;
        Ok(IndexCurve {
            index_name,
            points,
            interpolator
        })
    }

    fn interpolator(
        index_name: &str,
        points: &[CurvePoint],
        extrapolation: Extrapolation,
    ) -> Result<PiecewiseLinear, ValuationError> {
        let nodes = points
            .iter()
            .map(|pt| Point2D::new(pt.tenor_time, pt.rate))
            .collect();
        PiecewiseLinear::new(nodes, extrapolation)
            .ok_or_else(|| ValuationError::UnknownIndex(index_name.to_owned()))
    }

    /// 點的 rate 被改動後重建插值器；tenor 軸不變，所以排序仍然成立。
    fn refresh(&mut self) -> Result<(), ValuationError> {
        self.interpolator = Self::interpolator(&self.index_name, &self.points, self.interpolator.extrapolation())?;
        Ok(())
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn rate_at(&self, tenor_time: f64) -> f64 {
        self.interpolator.value(tenor_time)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// CurveStore
// ─────────────────────────────────────────────────────────────────────────────

/// 所有 index 曲線的集合。
///
/// 估值期間視為唯讀；bump 一律透過 `with_bumped_point` / `with_parallel_shift`
/// 產生獨立的複本，原本的 store 永遠不會被修改。
/// Index 依輸入資料中第一次出現的順序排列，risk ladder 也沿用這個順序。
#[derive(Debug, Clone)]
pub struct CurveStore {
    curves: Vec<IndexCurve>
}

impl CurveStore {
    pub fn new(points: Vec<CurvePoint>, extrapolation: Extrapolation) -> Result<CurveStore, ValuationError> {
        let mut grouped: Vec<(String, Vec<CurvePoint>)> = Vec::new();
        for point in points {
            match grouped.iter_mut().find(|(name, _)| *name == point.index_name) {
                Some((_, group)) => group.push(point),
                None => grouped.push((point.index_name.clone(), vec![point]))
            }
        }

        let curves = grouped
            .into_iter()
            .map(|(index_name, group)| IndexCurve::new(index_name, group, extrapolation))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CurveStore { curves })
    }

    pub fn curves(&self) -> &[IndexCurve] {
        &self.curves
    }

    pub fn curve(&self, index_name: &str) -> Result<&IndexCurve, ValuationError> {
        self.curves
            .iter()
            .find(|curve| curve.index_name == index_name)
            .ok_or_else(|| ValuationError::UnknownIndex(index_name.to_owned()))
    }

    /// 全部曲線點，依 index 順序、tenor 遞增排列。
    pub fn points(&self) -> impl Iterator<Item = &CurvePoint> {
        self.curves.iter().flat_map(|curve| curve.points.iter())
    }

    pub fn len(&self) -> usize {
        self.curves.iter().map(IndexCurve::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn rate_at(&self, index_name: &str, tenor_time: f64) -> Result<f64, ValuationError> {
        Ok(self.curve(index_name)?.rate_at(tenor_time))
    }

    /// 第 `position` 個點（依 `points()` 的順序）的 rate 加上 `shift` 後的複本。
    ///
    /// # Panics
    /// `position >= self.len()` 時 panic。
    pub fn with_bumped_point(&self, position: usize, shift: f64) -> Result<CurveStore, ValuationError> {
        let mut bumped = self.clone();
        let mut remaining = position;
        for curve in bumped.curves.iter_mut() {
            if remaining < curve.len() {
                curve.points[remaining].rate += shift;
                curve.refresh()?;
                return Ok(bumped);
            }
            remaining -= curve.len();
        }
        panic!("curve point position {} out of range for {} points", position, self.len());
    }

    /// `index_name` 的所有點同時加上 `shift` 後的複本。
    pub fn with_parallel_shift(&self, index_name: &str, shift: f64) -> Result<CurveStore, ValuationError> {
        let mut shifted = self.clone();
        let curve = shifted
            .curves
            .iter_mut()
            .find(|curve| curve.index_name == index_name)
            .ok_or_else(|| ValuationError::UnknownIndex(index_name.to_owned()))?;
        for point in curve.points.iter_mut() {
            point.rate += shift;
        }
        curve.refresh()?;
        Ok(shifted)
    }
}
