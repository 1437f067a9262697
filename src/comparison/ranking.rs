//! Rank offers over the expense ranges delimited by break-even points

use crate::curve::{cost_at, CurvePoint};
use serde::{Deserialize, Serialize};

/// A contiguous expense range over which the cheapest offers do not change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRange {
    pub start: f64,
    pub end: f64,
    /// Offer labels, cheapest first (at most top-N)
    pub ranking: Vec<String>,
}

impl RankedRange {
    pub fn contains(&self, expense: f64) -> bool {
        self.start <= expense && expense <= self.end
    }
}

/// Interior point used to rank offers over `[start, end]`
fn representative_point(start: f64, end: f64, tail_offset: f64) -> f64 {
    if end.is_finite() {
        (start + end) / 2.0
    } else {
        start + tail_offset
    }
}

/// Labels of all offers at `expense`, cheapest first. Ties keep input order.
pub fn rank_at(curves: &[Vec<CurvePoint>], expense: f64) -> Vec<(String, f64)> {
    let mut costs: Vec<(String, f64)> = curves
        .iter()
        .filter_map(|points| {
            let label = points.first()?.label.clone();
            cost_at(points, expense).map(|cost| (label, cost))
        })
        .collect();

    costs.sort_by(|a, b| a.1.total_cmp(&b.1));
    costs
}

/// Rank offers on every interval of `[0, boundary]` cut at `intersections`,
/// merging neighbours whose top-N rankings are identical.
///
/// `curves` holds one sorted, tail-clamped point list per offer. Intersections
/// outside the open interval `(0, boundary)` add no interval. `top_n` is
/// clamped to `1..=curves.len()`.
pub fn rank_intervals(
    curves: &[Vec<CurvePoint>],
    intersections: &[f64],
    boundary: f64,
    top_n: usize,
    tail_offset: f64,
) -> Vec<RankedRange> {
    if curves.is_empty() {
        return Vec::new();
    }
    let top_n = top_n.clamp(1, curves.len());

    let mut bounds = vec![0.0];
    bounds.extend(intersections.iter().copied().filter(|&x| x > 0.0 && x < boundary));
    bounds.push(boundary.max(0.0));

    let mut ranges: Vec<RankedRange> = Vec::new();

    for pair in bounds.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let m = representative_point(start, end, tail_offset);

        let ranking: Vec<String> = rank_at(curves, m)
            .into_iter()
            .take(top_n)
            .map(|(label, _)| label)
            .collect();
        log::trace!("[{}, {}] at {}: {:?}", start, end, m, ranking);

        match ranges.last_mut() {
            Some(previous) if previous.ranking == ranking => previous.end = end,
            _ => ranges.push(RankedRange { start, end, ranking }),
        }
    }

    ranges
}
