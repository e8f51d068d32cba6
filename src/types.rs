//! Geometric primitives: points, bounding boxes and affine transforms.
//!
//! `Point` and `BBox` are plain `f64` value types. `Transform` wraps
//! `glam::DAffine2` so composition and inversion use glam's math while the
//! singular case stays an explicit error.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use glam::{DAffine2, DVec2, dvec2};

use crate::defaults;
use crate::errors::TransformError;
use crate::log::warn;

/// Classification of a query point against a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointState {
    /// Strictly inside a filled shape.
    Inside,
    /// On (or within tolerance of) the outline.
    Edge,
    /// Neither.
    Outside,
}

impl PointState {
    /// True for `Inside` and `Edge`.
    pub fn is_hit(self) -> bool {
        !matches!(self, PointState::Outside)
    }
}

// ============================================================================
// Point
// ============================================================================

/// A 2D point (or displacement, when used with `+`/`-`).
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Map this point through `transform`.
    pub fn apply(self, transform: &Transform) -> Point {
        transform.map(self)
    }

    /// Rotate by `degrees` around `pivot` (translate, rotate, translate back).
    pub fn rotate(self, degrees: f64, pivot: Point) -> Point {
        Transform::rotation_about(degrees, pivot).map(self)
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f64 {
        DVec2::from(self).distance(other.into())
    }

    /// Point offset by `(dx, dy)`.
    pub fn offset(self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Linear interpolation toward `other`.
    pub fn lerp(self, other: Point, t: f64) -> Point {
        DVec2::from(self).lerp(other.into(), t).into()
    }

    /// Proximity test used for stroke hit-testing.
    ///
    /// True iff `|dist(p1, self) + dist(self, p2) - dist(p1, p2)| <= tolerance`,
    /// which describes a thin ellipse with foci `p1` and `p2`.
    pub fn is_between(self, p1: Point, p2: Point, tolerance: f64) -> bool {
        let detour = p1.distance(self) + self.distance(p2);
        (detour - p1.distance(p2)).abs() <= tolerance
    }

    /// `is_between` with the default edge tolerance.
    pub fn is_on_segment(self, p1: Point, p2: Point) -> bool {
        self.is_between(p1, p2, defaults::EDGE_TOLERANCE)
    }
}

impl From<DVec2> for Point {
    fn from(v: DVec2) -> Self {
        Point { x: v.x, y: v.y }
    }
}

impl From<Point> for DVec2 {
    fn from(p: Point) -> Self {
        dvec2(p.x, p.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

// ============================================================================
// Bounding box
// ============================================================================

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub min: Point,
    pub max: Point,
}

impl Default for BBox {
    fn default() -> Self {
        BBox::new()
    }
}

impl BBox {
    /// Create an empty bounding box (will expand on first point)
    pub const fn new() -> Self {
        BBox {
            min: Point { x: f64::MAX, y: f64::MAX },
            max: Point { x: f64::MIN, y: f64::MIN },
        }
    }

    /// Smallest box containing both corners, in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let mut bb = BBox::new();
        bb.expand_point(a);
        bb.expand_point(b);
        bb
    }

    /// Check if the bbox is empty (never expanded)
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Expand to include a point
    pub fn expand_point(&mut self, p: Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// Expand to include another box.
    pub fn width(&self) -> f64 {
        if self.is_empty() { 0.0 } else { self.max.x - self.min.x }
    }

    pub fn height(&self) -> f64 {
        if self.is_empty() { 0.0 } else { self.max.y - self.min.y }
    }

    pub fn center(&self) -> Point {
        if self.is_empty() {
            return Point::ORIGIN;
        }
        self.min.lerp(self.max, 0.5)
    }

    /// Inclusive point-in-box test. Always false for an empty box.
    pub fn contains(&self, p: Point) -> bool {
        !self.is_empty()
            && p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
    }

    /// Box grown by `margin` on every side.
    pub fn inflated(&self, margin: f64) -> BBox {
        if self.is_empty() {
            return *self;
        }
        BBox {
            min: self.min.offset(-margin, -margin),
            max: self.max.offset(margin, margin),
        }
    }

    pub fn top_left(&self) -> Point {
        self.min
    }

    pub fn top_right(&self) -> Point {
        Point::new(self.max.x, self.min.y)
    }

    pub fn bottom_right(&self) -> Point {
        self.max
    }

    pub fn bottom_left(&self) -> Point {
        Point::new(self.min.x, self.max.y)
    }

    /// The 8 handle points, clockwise from the top-left corner.
    ///
    /// ```text
    ///  0────1────2
    ///  │         │
    ///  7    ∙    3
    ///  │         │
    ///  6────5────4
    /// ```
    pub fn handles(&self) -> [Point; 8] {
        let c = self.center();
        [
            self.top_left(),
            Point::new(c.x, self.min.y),
            self.top_right(),
            Point::new(self.max.x, c.y),
            self.bottom_right(),
            Point::new(c.x, self.max.y),
            self.bottom_left(),
            Point::new(self.min.x, c.y),
        ]
    }
}

// ============================================================================
// Transform
// ============================================================================

/// 2D affine transform.
///
/// `a * b` applies `b` first, then `a` (glam's column-vector convention).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform(DAffine2);

impl Default for Transform {
    fn default() -> Self {
        Transform::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform(DAffine2::IDENTITY);

    /// SVG `matrix(a b c d e f)`: `x' = a*x + c*y + e`, `y' = b*x + d*y + f`.
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Transform(DAffine2::from_cols_array(&[a, b, c, d, e, f]))
    }

    pub fn affine(&self) -> DAffine2 {
        self.0
    }

    pub fn translation(dx: f64, dy: f64) -> Self {
        Transform(DAffine2::from_translation(dvec2(dx, dy)))
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Transform(DAffine2::from_scale(dvec2(sx, sy)))
    }

    /// Rotation around the origin, in degrees.
    pub fn rotation(degrees: f64) -> Self {
        Transform(DAffine2::from_angle(degrees.to_radians()))
    }

    /// Rotation by `degrees` around `pivot`.
    pub fn rotation_about(degrees: f64, pivot: Point) -> Self {
        Transform::translation(pivot.x, pivot.y)
            * Transform::rotation(degrees)
            * Transform::translation(-pivot.x, -pivot.y)
    }

    /// Apply `self`, then `next`.
    pub fn then(&self, next: &Transform) -> Transform {
        *next * *self
    }

    pub fn determinant(&self) -> f64 {
        self.0.matrix2.determinant()
    }

    pub fn is_identity(&self) -> bool {
        self.0 == DAffine2::IDENTITY
    }

    /// True when the linear part has no rotation or skew.
    pub fn is_axis_aligned(&self) -> bool {
        self.0.matrix2.x_axis.y == 0.0 && self.0.matrix2.y_axis.x == 0.0
    }

    pub fn try_inverse(&self) -> Result<Transform, TransformError> {
        let determinant = self.determinant();
        if determinant == 0.0 || !determinant.is_finite() {
            return Err(TransformError::Singular { determinant });
        }
        let inverse = self.0.inverse();
        if !inverse.is_finite() {
            return Err(TransformError::Singular { determinant });
        }
        Ok(Transform(inverse))
    }

    /// Inverse, falling back to identity for a singular matrix.
    pub fn inverse_or_identity(&self) -> Transform {
        match self.try_inverse() {
            Ok(inverse) => inverse,
            Err(_) => {
                warn!(determinant = self.determinant(), "singular transform, using identity");
                Transform::IDENTITY
            }
        }
    }

    /// Map a point (linear part plus translation).
    pub fn map(&self, p: Point) -> Point {
        self.0.transform_point2(p.into()).into()
    }

    /// Map a displacement (linear part only).
    pub fn map_vector(&self, v: Point) -> Point {
        self.0.transform_vector2(v.into()).into()
    }
}

impl Mul for Transform {
    type Output = Transform;
    fn mul(self, rhs: Transform) -> Transform {
        Transform(self.0 * rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn assert_point_eq(actual: Point, expected: Point) {
        assert!(
            (actual.x - expected.x).abs() < EPSILON && (actual.y - expected.y).abs() < EPSILON,
            "{actual:?} != {expected:?}"
        );
    }

    // ==================== Point tests ====================

    #[test]
    fn is_between_on_segment() {
        let p = Point::new(5.0, 0.0);
        assert!(p.is_between(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 0.5));
    }

    #[test]
    fn is_between_near_segment_within_tolerance() {
        // detour for (5, 1) is 2 * sqrt(26) - 10 ≈ 0.198
        let p = Point::new(5.0, 1.0);
        assert!(p.is_on_segment(Point::new(0.0, 0.0), Point::new(10.0, 0.0)));
    }

    #[test]
    fn is_between_rejects_far_points() {
        let p = Point::new(5.0, 3.0);
        assert!(!p.is_on_segment(Point::new(0.0, 0.0), Point::new(10.0, 0.0)));
        let beyond = Point::new(11.0, 0.0);
        assert!(!beyond.is_on_segment(Point::new(0.0, 0.0), Point::new(10.0, 0.0)));
    }

    #[test]
    fn rotate_about_pivot() {
        let p = Point::new(2.0, 1.0);
        let rotated = p.rotate(90.0, Point::new(1.0, 1.0));
        assert_point_eq(rotated, Point::new(1.0, 2.0));
    }

    #[test]
    fn rotate_full_turn_is_identity() {
        let p = Point::new(3.0, -7.5);
        assert_point_eq(p.rotate(360.0, Point::new(10.0, 10.0)), p);
    }

    // ==================== BBox tests ====================

    #[test]
    fn bbox_new_is_empty() {
        let bb = BBox::new();
        assert!(bb.is_empty());
        assert_eq!(bb.width(), 0.0);
        assert!(!bb.contains(Point::ORIGIN));
    }

    #[test]
    fn bbox_from_corners_normalizes() {
        let bb = BBox::from_corners(Point::new(10.0, 2.0), Point::new(0.0, 8.0));
        assert_eq!(bb.min, Point::new(0.0, 2.0));
        assert_eq!(bb.max, Point::new(10.0, 8.0));
        assert_eq!(bb.center(), Point::new(5.0, 5.0));
    }

    #[test]
    fn bbox_inflated_contains() {
        let bb = BBox::from_corners(Point::new(0.0, 0.0), Point::new(4.0, 4.0));
        assert!(!bb.contains(Point::new(5.0, 2.0)));
        assert!(bb.inflated(2.0).contains(Point::new(5.0, 2.0)));
    }

    #[test]
    fn bbox_handles_clockwise() {
        let bb = BBox::from_corners(Point::new(0.0, 0.0), Point::new(4.0, 2.0));
        let h = bb.handles();
        assert_eq!(h[0], Point::new(0.0, 0.0));
        assert_eq!(h[1], Point::new(2.0, 0.0));
        assert_eq!(h[3], Point::new(4.0, 1.0));
        assert_eq!(h[7], Point::new(0.0, 1.0));
    }

    // ==================== Transform tests ====================

    #[test]
    fn matrix_components_follow_svg_order() {
        let t = Transform::new(1.0, 0.0, 0.0, 1.0, 5.0, -3.0);
        assert_point_eq(t.map(Point::new(1.0, 1.0)), Point::new(6.0, -2.0));
    }

    #[test]
    fn apply_maps_through_transform() {
        let p = Point::new(2.0, 0.0).apply(&Transform::rotation(90.0));
        assert_point_eq(p, Point::new(0.0, 2.0));
        assert_eq!(Point::new(1.0, 1.0).apply(&Transform::IDENTITY), Point::new(1.0, 1.0));
    }

    #[test]
    fn then_applies_in_order() {
        let t = Transform::scale(2.0, 2.0).then(&Transform::translation(1.0, 0.0));
        assert_point_eq(t.map(Point::new(1.0, 1.0)), Point::new(3.0, 2.0));
    }

    #[test]
    fn inverse_round_trips() {
        let t = Transform::rotation_about(30.0, Point::new(4.0, 4.0)) * Transform::scale(2.0, 0.5);
        let inv = t.try_inverse().unwrap();
        let p = Point::new(3.0, -1.0);
        assert_point_eq(inv.map(t.map(p)), p);
    }

    #[test]
    fn singular_inverse_is_an_error() {
        let t = Transform::scale(0.0, 1.0);
        assert!(matches!(t.try_inverse(), Err(TransformError::Singular { .. })));
        assert!(t.inverse_or_identity().is_identity());
    }

    #[test]
    fn map_vector_ignores_translation() {
        let t = Transform::translation(100.0, 100.0);
        assert_eq!(t.map_vector(Point::new(1.0, 2.0)), Point::new(1.0, 2.0));
    }
}
