//! Insurance Comparator - break-even analysis for health insurance offers
//!
//! This library provides:
//! - Piecewise-linear annual cost curves from premium, deductible and excess
//! - Break-even expenses where two offers' costs cross
//! - Cheapest-offer rankings over merged ranges of yearly medical expenses
//! - Localized report tables (EN, FR, IT, DE)
//! - Batch comparisons of independent offer lists

pub mod config;
pub mod error;
pub mod offer;
pub mod curve;
pub mod comparison;
pub mod locale;
pub mod report;
pub mod runner;

// Re-export commonly used types
pub use config::ComparisonConfig;
pub use error::{LoadError, ValidationError};
pub use offer::{Offer, OfferInput};
pub use curve::{CurvePoint, Segment};
pub use comparison::{
    Comparator, Comparison, Quote, RankedRange, build_curves, compute_intersections, rank_ranges,
};
pub use locale::Language;
pub use report::ComparisonTable;
pub use runner::ComparisonRunner;
