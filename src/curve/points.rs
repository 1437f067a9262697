//! Piecewise-linear annual cost curves, one per offer

use crate::offer::Offer;
use serde::{Deserialize, Serialize};

/// Expenses needed to co-pay one unit of excess at a 10% coinsurance rate
pub const EXPENSE_PER_EXCESS: f64 = 10.0;

/// One breakpoint of an offer's expense -> annual cost curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub label: String,
    /// Annual medical expenses (may be +inf before the tail is clamped)
    pub expense: f64,
    /// Total paid by the insured: premiums plus out-of-pocket costs
    pub cost: f64,
}

impl CurvePoint {
    pub fn new(label: impl Into<String>, expense: f64, cost: f64) -> Self {
        Self {
            label: label.into(),
            expense,
            cost,
        }
    }
}

/// Build the four breakpoints of one offer's cost curve.
///
/// 1. no expenses: only premiums
/// 2. deductible exhausted, insurer has paid nothing yet
/// 3. coinsurance cap reached (`excess` co-paid at 10% spans `10 * excess` of expenses)
/// 4. +inf: insurer covers everything beyond the cap, cost stays flat
pub fn build_curve(offer: &Offer) -> [CurvePoint; 4] {
    let premium = offer.annual_premium();
    let cap_expense = offer.deductible + offer.excess * EXPENSE_PER_EXCESS;
    let cap_cost = premium + offer.deductible + offer.excess;

    [
        CurvePoint::new(offer.label.as_str(), 0.0, premium),
        CurvePoint::new(offer.label.as_str(), offer.deductible, premium + offer.deductible),
        CurvePoint::new(offer.label.as_str(), cap_expense, cap_cost),
        CurvePoint::new(offer.label.as_str(), f64::INFINITY, cap_cost),
    ]
}

/// Finite right edge of the expense axis shared by all curves.
///
/// With an infinite tail present this is `(1 + margin) * largest finite expense`,
/// or `fallback` when every finite expense is 0. Curves that are already clamped
/// keep their own right edge.
pub fn right_boundary(points: &[CurvePoint], margin: f64, fallback: f64) -> f64 {
    let max_finite = points
        .iter()
        .map(|p| p.expense)
        .filter(|x| x.is_finite())
        .fold(0.0_f64, f64::max);

    let has_infinite_tail = points.iter().any(|p| p.expense == f64::INFINITY);
    if !has_infinite_tail {
        return max_finite;
    }

    if max_finite > 0.0 {
        (1.0 + margin) * max_finite
    } else {
        fallback
    }
}

/// Replace every +inf expense with `boundary`
pub fn clamp_tail(points: &[CurvePoint], boundary: f64) -> Vec<CurvePoint> {
    points
        .iter()
        .map(|p| {
            let expense = if p.expense == f64::INFINITY { boundary } else { p.expense };
            CurvePoint::new(p.label.as_str(), expense, p.cost)
        })
        .collect()
}

/// Split a flat point list into one list per offer.
///
/// Offers keep their order of first appearance; each list is sorted by expense
/// with ties kept in input order.
pub fn group_by_label(points: &[CurvePoint]) -> Vec<Vec<CurvePoint>> {
    let mut groups: Vec<Vec<CurvePoint>> = Vec::new();

    for point in points {
        match groups.iter_mut().find(|g| g[0].label == point.label) {
            Some(group) => group.push(point.clone()),
            None => groups.push(vec![point.clone()]),
        }
    }

    for group in &mut groups {
        group.sort_by(|a, b| a.expense.total_cmp(&b.expense));
    }

    groups
}

/// Annual cost of one offer at `expense`, interpolating linearly between its
/// breakpoints (sorted by expense) and clamping outside them.
pub fn cost_at(points: &[CurvePoint], expense: f64) -> Option<f64> {
    let first = points.first()?;
    if expense <= first.expense {
        return Some(first.cost);
    }

    for pair in points.windows(2) {
        let (p0, p1) = (&pair[0], &pair[1]);
        if expense > p1.expense {
            continue;
        }
        let width = p1.expense - p0.expense;
        if width <= 0.0 || !width.is_finite() {
            return Some(p0.cost);
        }
        let t = (expense - p0.expense) / width;
        return Some(p0.cost + t * (p1.cost - p0.cost));
    }

    points.last().map(|p| p.cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn expenses(points: &[CurvePoint]) -> Vec<f64> {
        points.iter().map(|p| p.expense).collect()
    }

    fn costs(points: &[CurvePoint]) -> Vec<f64> {
        points.iter().map(|p| p.cost).collect()
    }

    #[test]
    fn test_build_curve_breakpoints() {
        let curve = build_curve(&Offer::new("A", 500.0, 300.0, 700.0));
        assert_eq!(expenses(&curve)[..3], [0.0, 300.0, 7300.0]);
        assert_eq!(curve[3].expense, f64::INFINITY);
        assert_eq!(costs(&curve), vec![6000.0, 6300.0, 7000.0, 7000.0]);

        let curve = build_curve(&Offer::new("B", 400.0, 2500.0, 700.0));
        assert_eq!(expenses(&curve)[..3], [0.0, 2500.0, 9500.0]);
        assert_eq!(costs(&curve), vec![4800.0, 7300.0, 8000.0, 8000.0]);
    }

    #[test]
    fn test_curve_is_non_decreasing() {
        let offers = [
            Offer::new("a", 0.0, 0.0, 0.0),
            Offer::new("b", 250.5, 0.0, 700.0),
            Offer::new("c", 310.0, 2500.0, 0.0),
            Offer::new("d", 1.0, 1e6, 1e5),
        ];
        for offer in &offers {
            let curve = build_curve(offer);
            for pair in curve.windows(2) {
                assert!(pair[0].expense <= pair[1].expense, "{:?}", offer);
                assert!(pair[0].cost <= pair[1].cost, "{:?}", offer);
            }
        }
    }

    #[test]
    fn test_right_boundary() {
        let mut points = build_curve(&Offer::new("A", 500.0, 300.0, 700.0)).to_vec();
        points.extend(build_curve(&Offer::new("B", 400.0, 2500.0, 700.0)));

        let boundary = right_boundary(&points, 0.15, 1000.0);
        assert_relative_eq!(boundary, 10925.0, max_relative = 1e-12);

        // Already clamped curves keep their edge
        let clamped = clamp_tail(&points, boundary);
        assert!(clamped.iter().all(|p| p.expense.is_finite()));
        assert_eq!(right_boundary(&clamped, 0.15, 1000.0), boundary);

        // Nothing but zeros before the tail
        let flat = build_curve(&Offer::new("Z", 100.0, 0.0, 0.0));
        assert_eq!(right_boundary(&flat, 0.15, 1000.0), 1000.0);
    }

    #[test]
    fn test_group_by_label_keeps_first_appearance_order() {
        let points = vec![
            CurvePoint::new("B", 10.0, 2.0),
            CurvePoint::new("A", 0.0, 1.0),
            CurvePoint::new("B", 0.0, 1.0),
            CurvePoint::new("A", 5.0, 3.0),
        ];
        let groups = group_by_label(&points);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0][0].label, "B");
        assert_eq!(expenses(&groups[0]), vec![0.0, 10.0]);
        assert_eq!(expenses(&groups[1]), vec![0.0, 5.0]);
    }

    #[test]
    fn test_cost_at_interpolates_and_clamps() {
        let curve = clamp_tail(&build_curve(&Offer::new("A", 500.0, 300.0, 700.0)), 10925.0);

        assert_eq!(cost_at(&curve, -5.0), Some(6000.0));
        assert_eq!(cost_at(&curve, 0.0), Some(6000.0));
        assert_relative_eq!(cost_at(&curve, 150.0).unwrap(), 6150.0);
        assert_relative_eq!(cost_at(&curve, 3800.0).unwrap(), 6650.0);
        assert_eq!(cost_at(&curve, 9000.0), Some(7000.0));
        assert_eq!(cost_at(&curve, 50_000.0), Some(7000.0));
        assert_eq!(cost_at(&[], 1.0), None);

        // Coinciding breakpoints from a zero deductible
        let curve = clamp_tail(&build_curve(&Offer::new("Z", 100.0, 0.0, 500.0)), 6000.0);
        assert_eq!(cost_at(&curve, 0.0), Some(1200.0));
        assert_relative_eq!(cost_at(&curve, 2500.0).unwrap(), 1450.0);
    }
}
