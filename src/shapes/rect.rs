use super::{Path, PathSegment, Shape, ShapeType};
use crate::defaults;
use crate::errors::ShapeError;
use crate::log::warn;
use crate::pen::Pen;
use crate::types::{BBox, Point, PointState, Transform};

/// An axis-aligned rectangle with optional per-corner radii
///
/// Radii are ordered top-left, top-right, bottom-right, bottom-left.
#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    origin: Point,
    width: f64,
    height: f64,
    radii: [f64; 4],
    pen: Pen,
    transform: Transform,
    bbox: BBox,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        let mut rect = Self {
            origin: Point::new(x, y),
            width,
            height,
            radii: [0.0; 4],
            pen: Pen::default(),
            transform: Transform::IDENTITY,
            bbox: BBox::new(),
        };
        rect.update_bounding_box();
        rect
    }

    pub fn from_corners(a: Point, b: Point) -> Self {
        let bb = BBox::from_corners(a, b);
        Self::new(bb.min.x, bb.min.y, bb.width(), bb.height())
    }

    pub fn with_pen(mut self, pen: Pen) -> Self {
        self.pen = pen;
        self
    }

    /// Same radius on every corner.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radii = [radius; 4];
        self
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn radii(&self) -> [f64; 4] {
        self.radii
    }

    pub fn is_rounded(&self) -> bool {
        self.radii.iter().any(|&r| r > 0.0)
    }

    /// Radii clamped to `[0, min(width, height) / 2]`.
    fn effective_radii(&self) -> [f64; 4] {
        let limit = (self.bbox.width().min(self.bbox.height()) / 2.0).max(0.0);
        self.radii.map(|r| r.clamp(0.0, limit))
    }
}

impl Shape for Rect {
    fn shape_type(&self) -> ShapeType {
        ShapeType::Rect
    }

    fn bounding_box(&self) -> BBox {
        self.bbox
    }

    fn update_bounding_box(&mut self) {
        let far = self.origin.offset(self.width, self.height);
        self.bbox = BBox::from_corners(self.origin, far);
    }

    /// Edges win over the interior; the interior extends a couple of units
    /// past the outline and only counts when filled.
    ///
    /// Rounded rectangles are not supported; query `to_path()` instead.
    fn contains(&self, point: Point) -> Result<PointState, ShapeError> {
        if self.is_rounded() {
            warn!("containment on a rounded rect");
            return Err(ShapeError::Unsupported {
                shape: ShapeType::Rect.name(),
                operation: "contains",
            });
        }

        let local = self.local_point(point);
        let bb = self.bbox;
        let corners = [bb.top_left(), bb.top_right(), bb.bottom_right(), bb.bottom_left()];
        let on_edge = (0..4).any(|i| local.is_on_segment(corners[i], corners[(i + 1) % 4]));
        if on_edge {
            return Ok(PointState::Edge);
        }
        if self.pen.is_filled() && bb.inflated(defaults::RECT_EDGE_MARGIN).contains(local) {
            return Ok(PointState::Inside);
        }
        Ok(PointState::Outside)
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

    /// Outline with quadratic corners.
    ///
    /// ```text
    ///   ╭─p1───p2─╮
    ///  p0 r0   r1 p3
    ///   │    ∙    │
    ///  p7 r3   r2 p4
    ///   ╰─p6───p5─╯
    /// ```
    fn to_path(&self) -> Path {
        let [r0, r1, r2, r3] = self.effective_radii();
        let (l, t) = (self.bbox.min.x, self.bbox.min.y);
        let (r, b) = (self.bbox.max.x, self.bbox.max.y);

        let line = |x, y| PathSegment::LineTo {
            to: Point::new(x, y),
            relative: false,
        };
        let corner = |radius: f64, ctrl: Point, to: Point| {
            (radius > 0.0).then_some(PathSegment::QuadTo {
                ctrl,
                to,
                relative: false,
            })
        };

        let mut segments = vec![PathSegment::MoveTo {
            to: Point::new(l, t + r0),
            relative: false,
        }];
        segments.extend(corner(r0, Point::new(l, t), Point::new(l + r0, t)));
        segments.push(line(r - r1, t));
        segments.extend(corner(r1, Point::new(r, t), Point::new(r, t + r1)));
        segments.push(line(r, b - r2));
        segments.extend(corner(r2, Point::new(r, b), Point::new(r - r2, b)));
        segments.push(line(l + r3, b));
        segments.extend(corner(r3, Point::new(l, b), Point::new(l, b - r3)));
        segments.push(PathSegment::Close);

        let mut path = Path::from_segments(segments).with_pen(self.pen.clone());
        path.set_transform(self.transform);
        path
    }

    fn is_null(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}
