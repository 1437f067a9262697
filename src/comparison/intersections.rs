//! Break-even points between offers

use crate::curve::Segment;

/// Expense at which two segments' supporting lines cross, if that point lies
/// inside both domains (boundaries included). Parallel and coincident lines
/// never cross.
pub fn segment_intersection(a: &Segment, b: &Segment) -> Option<f64> {
    if a.slope == b.slope {
        return None;
    }

    let x = (b.intercept - a.intercept) / (a.slope - b.slope);
    if !x.is_finite() || !a.contains(x) || !b.contains(x) {
        return None;
    }

    // -0.0 and 0.0 are the same break-even point
    Some(x + 0.0)
}

/// All in-domain crossings between segments of different offers.
///
/// `segments_by_offer` holds one segment list per offer. Every unordered pair of
/// offers is checked segment against segment. The result is sorted ascending and
/// de-duplicated by exact equality; values that differ only by rounding are
/// kept apart.
pub fn find_intersections(segments_by_offer: &[Vec<Segment>]) -> Vec<f64> {
    let mut intersections = Vec::new();

    for (i, first) in segments_by_offer.iter().enumerate() {
        for second in &segments_by_offer[i + 1..] {
            for a in first {
                for b in second {
                    if let Some(x) = segment_intersection(a, b) {
                        log::trace!("'{}' and '{}' cross at {}", a.label, b.label, x);
                        intersections.push(x);
                    }
                }
            }
        }
    }

    intersections.sort_by(f64::total_cmp);
    intersections.dedup();
    intersections
}
