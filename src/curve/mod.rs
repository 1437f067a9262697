//! Cost curve construction and segment extraction

mod points;
mod segment;

pub use points::{
    CurvePoint, build_curve, right_boundary, clamp_tail, group_by_label, cost_at,
    EXPENSE_PER_EXCESS,
};
pub use segment::{Segment, extract_segments};
