//! Comparison engine: offers -> curves -> break-even points -> ranked ranges

use super::intersections::find_intersections;
use super::ranking::{rank_at, rank_intervals, RankedRange};
use crate::config::ComparisonConfig;
use crate::curve::{
    build_curve, clamp_tail, extract_segments, group_by_label, right_boundary, CurvePoint, Segment,
};
use crate::error::ValidationError;
use crate::offer::{validate_offer_count, validate_offers, Offer};
use serde::{Deserialize, Serialize};

/// Everything a consumer needs to chart and tabulate one comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// Breakpoints of every offer, tail clamped to `right_boundary`
    pub curves: Vec<CurvePoint>,

    /// Finite right edge of the expense axis
    pub right_boundary: f64,

    /// Break-even expenses, ascending
    pub intersections: Vec<f64>,

    /// Merged ranges with their cheapest offers
    pub ranges: Vec<RankedRange>,
}

/// One offer's cost at a given expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub label: String,
    pub cost: f64,
}

/// Runs the comparison pipeline with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct Comparator {
    config: ComparisonConfig,
}

impl Comparator {
    pub fn new(config: ComparisonConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    /// Validate offers and build their cost curves (tail still at +inf)
    pub fn build_curves(&self, offers: &[Offer]) -> Result<Vec<CurvePoint>, ValidationError> {
        validate_offers(offers)?;
        Ok(offers.iter().flat_map(build_curve).collect())
    }

    /// Right edge of the expense axis for these curves
    pub fn right_boundary(&self, points: &[CurvePoint]) -> f64 {
        right_boundary(points, self.config.tail_margin, self.config.tail_offset)
    }

    /// One sorted, tail-clamped point list per offer
    fn clamped_curves(&self, points: &[CurvePoint]) -> (f64, Vec<Vec<CurvePoint>>) {
        let boundary = self.right_boundary(points);
        let groups = group_by_label(&clamp_tail(points, boundary));
        (boundary, groups)
    }

    /// Segments of every offer, degenerate pieces dropped
    pub fn segments(&self, points: &[CurvePoint]) -> Vec<Vec<Segment>> {
        let (_, curves) = self.clamped_curves(points);
        curves.iter().map(|c| extract_segments(c)).collect()
    }

    /// Sorted, de-duplicated break-even expenses between all offers
    pub fn compute_intersections(&self, points: &[CurvePoint]) -> Vec<f64> {
        find_intersections(&self.segments(points))
    }

    /// Ranked ranges over `[0, right_boundary]`, using the configured `top_n`
    pub fn rank_ranges(&self, points: &[CurvePoint], intersections: &[f64]) -> Vec<RankedRange> {
        let (boundary, curves) = self.clamped_curves(points);
        rank_intervals(
            &curves,
            intersections,
            boundary,
            self.config.top_n,
            self.config.tail_offset,
        )
    }

    /// Every offer's annual cost at `expense`, cheapest first
    pub fn quote(&self, points: &[CurvePoint], expense: f64) -> Vec<Quote> {
        let (_, curves) = self.clamped_curves(points);
        rank_at(&curves, expense)
            .into_iter()
            .map(|(label, cost)| Quote { label, cost })
            .collect()
    }

    /// Full run: validate settings, offer count and fields, then curves,
    /// break-even points and ranges
    pub fn compare(&self, offers: &[Offer]) -> Result<Comparison, ValidationError> {
        self.config.validate()?;
        validate_offer_count(offers.len(), self.config.max_offers)?;

        let points = self.build_curves(offers)?;
        let boundary = self.right_boundary(&points);
        let intersections = self.compute_intersections(&points);
        let ranges = self.rank_ranges(&points, &intersections);

        log::debug!(
            "compared {} offers: {} break-even points, {} ranges up to {:.2}",
            offers.len(),
            intersections.len(),
            ranges.len(),
            boundary
        );

        Ok(Comparison {
            curves: clamp_tail(&points, boundary),
            right_boundary: boundary,
            intersections,
            ranges,
        })
    }
}

/// Validate offers and build their cost curves
pub fn build_curves(offers: &[Offer]) -> Result<Vec<CurvePoint>, ValidationError> {
    Comparator::default().build_curves(offers)
}

/// Break-even expenses between the offers described by `points`
pub fn compute_intersections(points: &[CurvePoint]) -> Vec<f64> {
    Comparator::default().compute_intersections(points)
}

/// Ranked, merged expense ranges reporting the `top_n` cheapest offers
pub fn rank_ranges(points: &[CurvePoint], intersections: &[f64], top_n: usize) -> Vec<RankedRange> {
    let config = ComparisonConfig::default().with_top_n(top_n);
    Comparator::new(config).rank_ranges(points, intersections)
}
