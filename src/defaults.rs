//! Default tolerances and style values

/// Maximum detour (in local units) for a point to count as on a line.
pub const EDGE_TOLERANCE: f64 = 0.5;
/// Rects count a point as inside up to this far outside their edges.
pub const RECT_EDGE_MARGIN: f64 = 2.0;
/// Normalized ellipse quadric at or below this is inside.
pub const ELLIPSE_INNER: f64 = 0.9;
/// Normalized ellipse quadric above `ELLIPSE_INNER` and up to this is edge.
pub const ELLIPSE_OUTER: f64 = 1.1;

/// Cubic control distance for a unit quarter circle (minimal radial error).
pub const QUARTER_ARC_KAPPA: f64 = 0.551915024494;
/// Sweep ratios within this of 1.0 snap to exactly one segment.
pub const ARC_RATIO_SNAP: f64 = 1e-7;
/// Line segments per curve when flattening for hit-testing.
pub const CURVE_FLATTEN_STEPS: usize = 16;

pub const STROKE_WIDTH: f64 = 1.0;
pub const MITER_LIMIT: f64 = 10.0;
pub const OPACITY: f64 = 1.0;
