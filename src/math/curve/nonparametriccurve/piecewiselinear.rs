use serde::Deserialize;

use crate::math::curve::curve::Curve;
use crate::math::curve::nonparametriccurve::nonparametriccurve::{
    NonparametricCurve,
    Point2D
};

// ─────────────────────────────────────────────
// Extrapolation
// ─────────────────────────────────────────────

/// 節點範圍外的取值方式。
///
/// `Flat` 直接取端點值；`Linear` 延伸最外側區間的斜率，
/// 在遠離曲線的地方可能得到不合理的負利率。
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Deserialize)]
pub enum Extrapolation {
    #[default]
    Flat,
    Linear
}

// ─────────────────────────────────────────────
// PiecewiseLinear
// ─────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct PiecewiseLinear {
    points: Vec<Point2D>,
    extrapolation: Extrapolation
}

impl PiecewiseLinear {
    /// `points` 必須依 x 嚴格遞增；至少需要一個點，只有一個點時退化為常數。
    pub fn new(points: Vec<Point2D>, extrapolation: Extrapolation) -> Option<PiecewiseLinear> {
        if points.is_empty() {
            return None;
        }
        Some(PiecewiseLinear { points, extrapolation })
    }

    pub fn extrapolation(&self) -> Extrapolation {
        self.extrapolation
    }

    fn interpolate(&self, i: usize, x: f64) -> f64 {
        let lhs_pt = &self.points[i];
        let rhs_pt = &self.points[i + 1];
        f64::mul_add(Point2D::slope(lhs_pt, rhs_pt), x - lhs_pt.x(), lhs_pt.y())
    }
}

impl NonparametricCurve for PiecewiseLinear {
    fn points(&self) -> &[Point2D] {
        &self.points
    }

    fn min_x(&self) -> f64 {
        self.points[0].x()
    }

    fn max_x(&self) -> f64 {
        self.points[self.points.len() - 1].x()
    }
}

impl Curve for PiecewiseLinear {
    fn value(&self, x: f64) -> f64 {
        let n = self.points.len();
        if n == 1 {
            return self.points[0].y();
        }

        if x <= self.min_x() {
            match self.extrapolation {
                Extrapolation::Flat => self.points[0].y(),
                Extrapolation::Linear => self.interpolate(0, x)
            }
        } else if x >= self.max_x() {
            match self.extrapolation {
                Extrapolation::Flat => self.points[n - 1].y(),
                Extrapolation::Linear => self.interpolate(n - 2, x)
            }
        } else {
            // min_x < x < max_x，故 1 <= upper <= n - 1
            let upper = self.points.partition_point(|pt| pt.x() <= x);
            self.interpolate(upper - 1, x)
        }
    }
}
