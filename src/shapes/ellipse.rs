use super::{Path, PathSegment, Shape, ShapeType};
use crate::defaults;
use crate::errors::ShapeError;
use crate::log::warn;
use crate::pen::Pen;
use crate::types::{BBox, Point, PointState, Transform};

/// An axis-aligned ellipse (a circle when both radii match)
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    center: Point,
    rx: f64,
    ry: f64,
    pen: Pen,
    transform: Transform,
    bbox: BBox,
}

impl Ellipse {
    pub fn new(center: Point, rx: f64, ry: f64) -> Self {
        let mut ellipse = Self {
            center,
            rx,
            ry,
            pen: Pen::default(),
            transform: Transform::IDENTITY,
            bbox: BBox::new(),
        };
        ellipse.update_bounding_box();
        ellipse
    }

    pub fn circle(center: Point, radius: f64) -> Self {
        Self::new(center, radius, radius)
    }

    pub fn with_pen(mut self, pen: Pen) -> Self {
        self.pen = pen;
        self
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radii(&self) -> (f64, f64) {
        (self.rx, self.ry)
    }

    pub fn is_circle(&self) -> bool {
        self.rx == self.ry
    }

    /// Normalized quadric `dx²/rx² + dy²/ry²` of a local point: 1.0 on the
    /// outline.
    fn quadric(&self, local: Point) -> f64 {
        let d = local - self.center;
        (d.x * d.x) / (self.rx * self.rx) + (d.y * d.y) / (self.ry * self.ry)
    }

    /// Whether two circles overlap or touch.
    ///
    /// Centers are compared in parent coordinates, with radii scaled by each
    /// transform's uniform scale factor. Non-circular ellipses are not
    /// supported.
    pub fn intersects(&self, other: &Ellipse) -> Result<bool, ShapeError> {
        if !self.is_circle() || !other.is_circle() {
            warn!("intersection between non-circular ellipses");
            return Err(ShapeError::Unsupported {
                shape: ShapeType::Ellipse.name(),
                operation: "intersects",
            });
        }
        let scaled = |e: &Ellipse| e.rx.abs() * e.transform.determinant().abs().sqrt();
        let distance = self.transform.map(self.center).distance(other.transform.map(other.center));
        Ok(distance <= scaled(self) + scaled(other))
    }
}

impl Shape for Ellipse {
    fn shape_type(&self) -> ShapeType {
        ShapeType::Ellipse
    }

    fn bounding_box(&self) -> BBox {
        self.bbox
    }

    fn update_bounding_box(&mut self) {
        self.bbox = BBox::from_corners(
            self.center.offset(-self.rx, -self.ry),
            self.center.offset(self.rx, self.ry),
        );
    }

    /// Inside when filled and the quadric is at most 0.9, edge in the
    /// `(0.9, 1.1]` band, outside otherwise.
    fn contains(&self, point: Point) -> Result<PointState, ShapeError> {
        if self.is_null() {
            return Ok(PointState::Outside);
        }
        let e = self.quadric(self.local_point(point));
        let state = if self.pen.is_filled() && e <= defaults::ELLIPSE_INNER {
            PointState::Inside
        } else if e > defaults::ELLIPSE_INNER && e <= defaults::ELLIPSE_OUTER {
            PointState::Edge
        } else {
            PointState::Outside
        };
        Ok(state)
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

    /// Four quarter-arc cubics, clockwise from the leftmost point.
    fn to_path(&self) -> Path {
        let k = defaults::QUARTER_ARC_KAPPA;
        let Point { x: cx, y: cy } = self.center;
        let (rx, ry) = (self.rx, self.ry);
        let cubic = |c1: (f64, f64), c2: (f64, f64), to: (f64, f64)| PathSegment::CubicTo {
            c1: c1.into(),
            c2: c2.into(),
            to: to.into(),
            relative: false,
        };

        let segments = vec![
            PathSegment::MoveTo {
                to: Point::new(cx - rx, cy),
                relative: false,
            },
            cubic((cx - rx, cy - k * ry), (cx - k * rx, cy - ry), (cx, cy - ry)),
            cubic((cx + k * rx, cy - ry), (cx + rx, cy - k * ry), (cx + rx, cy)),
            cubic((cx + rx, cy + k * ry), (cx + k * rx, cy + ry), (cx, cy + ry)),
            cubic((cx - k * rx, cy + ry), (cx - rx, cy + k * ry), (cx - rx, cy)),
            PathSegment::Close,
        ];

        let mut path = Path::from_segments(segments).with_pen(self.pen.clone());
        path.set_transform(self.transform);
        path
    }

    fn is_null(&self) -> bool {
        self.rx == 0.0 || self.ry == 0.0
    }
}
