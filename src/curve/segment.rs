//! Line segments between consecutive curve breakpoints

use super::points::CurvePoint;
use serde::{Deserialize, Serialize};

/// One linear piece of an offer's cost curve: `cost = slope * expense + intercept`
/// on `[domain_min, domain_max]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub label: String,
    pub slope: f64,
    pub intercept: f64,
    pub domain_min: f64,
    pub domain_max: f64,
}

impl Segment {
    /// Segment through two points, or `None` when they share an expense value
    /// (a vertical jump with no defined slope) or the width is not finite.
    pub fn through(p0: &CurvePoint, p1: &CurvePoint) -> Option<Self> {
        let width = p1.expense - p0.expense;
        if width == 0.0 || !width.is_finite() {
            return None;
        }

        let slope = (p1.cost - p0.cost) / width;
        let intercept = p0.cost - slope * p0.expense;

        Some(Self {
            label: p0.label.clone(),
            slope,
            intercept,
            domain_min: p0.expense.min(p1.expense),
            domain_max: p0.expense.max(p1.expense),
        })
    }

    /// Cost on the supporting line at `expense`
    pub fn cost_at(&self, expense: f64) -> f64 {
        self.slope * expense + self.intercept
    }

    /// Inclusive domain check
    pub fn contains(&self, expense: f64) -> bool {
        self.domain_min <= expense && expense <= self.domain_max
    }
}

/// Turn one offer's sorted breakpoints into segments.
///
/// Zero-width pairs (from a zero deductible or zero excess) are skipped.
pub fn extract_segments(points: &[CurvePoint]) -> Vec<Segment> {
    points
        .windows(2)
        .filter_map(|pair| {
            let segment = Segment::through(&pair[0], &pair[1]);
            if segment.is_none() {
                log::trace!(
                    "skipping degenerate segment for '{}' at expense {}",
                    pair[0].label,
                    pair[0].expense
                );
            }
            segment
        })
        .collect()
}
