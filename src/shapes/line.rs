use super::{Path, PathSegment, Shape, ShapeType};
use crate::errors::ShapeError;
use crate::pen::Pen;
use crate::types::{BBox, Point, PointState, Transform};

/// A straight line between two points
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    from: Point,
    to: Point,
    pen: Pen,
    transform: Transform,
    bbox: BBox,
}

impl Line {
    pub fn new(from: Point, to: Point) -> Self {
        Self {
            from,
            to,
            pen: Pen::default(),
            transform: Transform::IDENTITY,
            bbox: BBox::from_corners(from, to),
        }
    }

    pub fn with_pen(mut self, pen: Pen) -> Self {
        self.pen = pen;
        self
    }

    pub fn from(&self) -> Point {
        self.from
    }

    pub fn to(&self) -> Point {
        self.to
    }

    pub fn set_from(&mut self, from: Point) {
        self.from = from;
        self.update_bounding_box();
    }

    pub fn set_to(&mut self, to: Point) {
        self.to = to;
        self.update_bounding_box();
    }

    pub fn length(&self) -> f64 {
        self.from.distance(self.to)
    }
}

impl Shape for Line {
    fn shape_type(&self) -> ShapeType {
        ShapeType::Line
    }

    fn bounding_box(&self) -> BBox {
        self.bbox
    }

    fn update_bounding_box(&mut self) {
        self.bbox = BBox::from_corners(self.from, self.to);
    }

    /// Lines have no interior: a point is either on the stroke or outside.
    fn contains(&self, point: Point) -> Result<PointState, ShapeError> {
        let local = self.local_point(point);
        if local.is_on_segment(self.from, self.to) {
            Ok(PointState::Edge)
        } else {
            Ok(PointState::Outside)
        }
    }

    fn pen(&self) -> &Pen {
        &self.pen
    }

    fn pen_mut(&mut self) -> &mut Pen {
        &mut self.pen
    }

    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    fn to_path(&self) -> Path {
        let mut path = Path::from_segments(vec![
            PathSegment::MoveTo {
                to: self.from,
                relative: false,
            },
            PathSegment::LineTo {
                to: self.to,
                relative: false,
            },
        ])
        .with_pen(self.pen.clone());
        path.set_transform(self.transform);
        path
    }

    fn is_null(&self) -> bool {
        self.from == self.to
    }
}
