//! Break-even analysis and cheapest-offer ranking

mod engine;
mod intersections;
mod ranking;

pub use engine::{Comparator, Comparison, Quote, build_curves, compute_intersections, rank_ranges};
pub use intersections::{find_intersections, segment_intersection};
pub use ranking::{RankedRange, rank_at, rank_intervals};
