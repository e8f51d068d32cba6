//! Shape types for hit-testing and painting
//!
//! Each shape is its own type that knows how to:
//! - Maintain its bounding box in local coordinates
//! - Classify a point against its outline and fill
//! - Convert itself to a `Path` for uniform painting
//!
//! Geometry is stored in local space; a shape's `Transform` maps local space
//! to the coordinate space of its parent.

mod ellipse;
mod line;
mod path;
mod rect;
mod segment;

use enum_dispatch::enum_dispatch;

use crate::errors::ShapeError;
use crate::pen::Pen;
use crate::types::{BBox, Point, PointState, Transform};

pub use ellipse::Ellipse;
pub use line::Line;
pub use path::Path;
pub use rect::Rect;
pub use segment::{AbsSegment, Cursor, PathSegment};

/// Discriminant for the concrete shape types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeType {
    Line,
    Rect,
    Ellipse,
    Path,
}

impl ShapeType {
    pub fn name(self) -> &'static str {
        match self {
            ShapeType::Line => "line",
            ShapeType::Rect => "rect",
            ShapeType::Ellipse => "ellipse",
            ShapeType::Path => "path",
        }
    }
}

/// Common behavior for all shapes
#[enum_dispatch]
pub trait Shape {
    fn shape_type(&self) -> ShapeType;

    /// Bounding box in local coordinates.
    fn bounding_box(&self) -> BBox;

    /// Recompute the bounding box from the shape's geometry.
    fn update_bounding_box(&mut self);

    /// Classify `point`, given in parent coordinates.
    fn contains(&self, point: Point) -> Result<PointState, ShapeError>;

    fn pen(&self) -> &Pen;

    fn pen_mut(&mut self) -> &mut Pen;

    fn transform(&self) -> &Transform;

    fn set_transform(&mut self, transform: Transform);

    /// The same geometry as a path, with this shape's pen and transform.
    fn to_path(&self) -> Path;

    /// True when there is nothing to paint or hit.
    fn is_null(&self) -> bool;

    fn set_pen(&mut self, pen: Pen) {
        *self.pen_mut() = pen;
    }

    /// Map a parent-space point into local space.
    fn local_point(&self, point: Point) -> Point {
        self.transform().inverse_or_identity().map(point)
    }

    /// Rotate around the bounding box center, on top of the current transform.
    fn rotate_about_center(&mut self, degrees: f64) {
        let pivot = self.bounding_box().center();
        let rotated = *self.transform() * Transform::rotation_about(degrees, pivot);
        self.set_transform(rotated);
    }

    /// The 8 bounding box handles in parent coordinates, clockwise from the
    /// top-left corner.
    fn bounding_box_handles(&self) -> [Point; 8] {
        let transform = *self.transform();
        self.bounding_box().handles().map(|p| transform.map(p))
    }
}

/// Any concrete shape.
#[enum_dispatch(Shape)]
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Line,
    Rect,
    Ellipse,
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pen::Color;

    const EPSILON: f64 = 1e-9;

    fn assert_point_eq(actual: Point, expected: Point) {
        assert!(
            (actual.x - expected.x).abs() < EPSILON && (actual.y - expected.y).abs() < EPSILON,
            "{actual:?} != {expected:?}"
        );
    }

    #[test]
    fn dispatch_reaches_concrete_shapes() {
        let shapes: Vec<ShapeKind> = vec![
            Line::new(Point::ORIGIN, Point::new(10.0, 0.0)).into(),
            Rect::new(0.0, 0.0, 10.0, 5.0).into(),
            Ellipse::circle(Point::ORIGIN, 5.0).into(),
            Path::new().into(),
        ];
        let types: Vec<ShapeType> = shapes.iter().map(|s| s.shape_type()).collect();
        assert_eq!(types, vec![ShapeType::Line, ShapeType::Rect, ShapeType::Ellipse, ShapeType::Path]);
        assert!(shapes[3].is_null());
    }

    #[test]
    fn rotate_about_center_keeps_center_fixed() {
        let mut rect = ShapeKind::from(Rect::new(0.0, 0.0, 10.0, 4.0));
        rect.rotate_about_center(90.0);
        let handles = rect.bounding_box_handles();
        // top-left corner swings to the top-right of the rotated footprint
        assert_point_eq(handles[0], Point::new(7.0, -3.0));
        assert_point_eq(rect.transform().map(Point::new(5.0, 2.0)), Point::new(5.0, 2.0));
    }

    #[test]
    fn local_point_uses_inverse_transform() {
        let mut line = Line::new(Point::ORIGIN, Point::new(10.0, 0.0));
        line.set_transform(Transform::translation(0.0, 100.0));
        assert_eq!(line.local_point(Point::new(5.0, 100.0)), Point::new(5.0, 0.0));
        assert_eq!(line.contains(Point::new(5.0, 100.0)), Ok(PointState::Edge));
    }

    #[test]
    fn set_pen_replaces_style() {
        let mut shape = ShapeKind::from(Ellipse::circle(Point::ORIGIN, 5.0));
        shape.set_pen(Pen::filled(Color::BLACK));
        assert!(shape.pen().is_filled());
        assert_eq!(shape.contains(Point::ORIGIN), Ok(PointState::Inside));
    }
}
