//! Paint output: shapes become move/line/quad/cubic/close primitives plus
//! fill and stroke directives for a rendering backend.
//!
//! Arcs are expanded to cubics before they reach the painter, so a backend
//! only needs Bezier support. Points are in the shape's local space; the
//! painter receives the transform that maps them to the viewport first.

use std::fmt;

use crate::arc::arc_to_cubic;
use crate::elements::Document;
use crate::log::trace;
use crate::pen::{Color, LineCap, LineJoin, Pen, Winding};
use crate::shapes::{AbsSegment, Shape};
use crate::types::{Point, Transform};

/// A rendering backend.
pub trait Painter {
    /// Starts a new path; following points are mapped through `transform`.
    fn begin_path(&mut self, transform: Transform);

    fn move_to(&mut self, to: Point);

    fn line_to(&mut self, to: Point);

    fn quad_to(&mut self, ctrl: Point, to: Point);

    fn cubic_to(&mut self, c1: Point, c2: Point, to: Point);

    fn close_path(&mut self);

    fn fill(&mut self, color: Color, winding: Winding, opacity: f64);

    fn stroke(&mut self, style: StrokeStyle);
}

/// Everything a backend needs to stroke the current path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
    pub cap: LineCap,
    pub join: LineJoin,
    pub miter_limit: f64,
    pub opacity: f64,
}

impl StrokeStyle {
    /// `None` when the pen has no stroke color.
    pub fn from_pen(pen: &Pen) -> Option<Self> {
        Some(Self {
            color: pen.stroke?,
            width: pen.width,
            cap: pen.cap,
            join: pen.join,
            miter_limit: pen.miter_limit,
            opacity: pen.opacity,
        })
    }
}

/// One recorded painter call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    BeginPath(Transform),
    MoveTo(Point),
    LineTo(Point),
    QuadTo { ctrl: Point, to: Point },
    CubicTo { c1: Point, c2: Point, to: Point },
    ClosePath,
    Fill { color: Color, winding: Winding, opacity: f64 },
    Stroke(StrokeStyle),
}

impl fmt::Display for DrawOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawOp::BeginPath(transform) => {
                let [a, b, c, d, e, g] = transform.affine().to_cols_array();
                write!(f, "begin matrix({a} {b} {c} {d} {e} {g})")
            }
            DrawOp::MoveTo(to) => write!(f, "move {to}"),
            DrawOp::LineTo(to) => write!(f, "line {to}"),
            DrawOp::QuadTo { ctrl, to } => write!(f, "quad {ctrl} {to}"),
            DrawOp::CubicTo { c1, c2, to } => write!(f, "cubic {c1} {c2} {to}"),
            DrawOp::ClosePath => write!(f, "close"),
            DrawOp::Fill {
                color,
                winding,
                opacity,
            } => write!(f, "fill {color} {winding:?} {opacity}"),
            DrawOp::Stroke(style) => write!(
                f,
                "stroke {} {} {:?} {:?}",
                style.color, style.width, style.cap, style.join
            ),
        }
    }
}

/// A painter that records its calls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    ops: Vec<DrawOp>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

}

impl Painter for DrawList {
    fn begin_path(&mut self, transform: Transform) {
        self.ops.push(DrawOp::BeginPath(transform));
    }

    fn move_to(&mut self, to: Point) {
        self.ops.push(DrawOp::MoveTo(to));
    }

    fn line_to(&mut self, to: Point) {
        self.ops.push(DrawOp::LineTo(to));
    }

    fn quad_to(&mut self, ctrl: Point, to: Point) {
        self.ops.push(DrawOp::QuadTo { ctrl, to });
    }

    fn cubic_to(&mut self, c1: Point, c2: Point, to: Point) {
        self.ops.push(DrawOp::CubicTo { c1, c2, to });
    }

    fn close_path(&mut self) {
        self.ops.push(DrawOp::ClosePath);
    }

    fn fill(&mut self, color: Color, winding: Winding, opacity: f64) {
        self.ops.push(DrawOp::Fill {
            color,
            winding,
            opacity,
        });
    }

    fn stroke(&mut self, style: StrokeStyle) {
        self.ops.push(DrawOp::Stroke(style));
    }
}

/// One op per line.
impl fmt::Display for DrawList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for op in &self.ops {
            writeln!(f, "{op}")?;
        }
        Ok(())
    }
}

/// Paint one shape under `root`. Returns false when there was nothing to
/// paint (a null shape, or a pen with neither fill nor stroke).
pub fn paint_shape<S: Shape + ?Sized>(painter: &mut impl Painter, shape: &S, root: &Transform) -> bool {
    let pen = shape.pen();
    if shape.is_null() || !pen.visible() {
        return false;
    }

    let path = shape.to_path();
    painter.begin_path(*root * *shape.transform());
    for segment in path.resolved() {
        match segment {
            AbsSegment::MoveTo(to) => painter.move_to(to),
            AbsSegment::LineTo(to) => painter.line_to(to),
            AbsSegment::QuadTo { ctrl, to } => painter.quad_to(ctrl, to),
            AbsSegment::CubicTo { c1, c2, to } => painter.cubic_to(c1, c2, to),
            AbsSegment::ArcTo {
                from,
                radii,
                x_rotation,
                large_arc,
                sweep,
                to,
            } => {
                let cubics = arc_to_cubic(from, to, radii, x_rotation, large_arc, sweep);
                if cubics.is_empty() {
                    // zero radius: straight line
                    painter.line_to(to);
                }
                for cubic in cubics {
                    painter.cubic_to(cubic.c1, cubic.c2, cubic.to);
                }
            }
            AbsSegment::Close { .. } => painter.close_path(),
        }
    }

    if let Some(color) = pen.fill {
        painter.fill(color, pen.winding, pen.opacity);
    }
    if let Some(style) = StrokeStyle::from_pen(pen) {
        painter.stroke(style);
    }
    true
}

/// Paint every graphic in document order into a `width` x `height`
/// viewport. Returns the number of shapes painted.
pub fn paint_document(painter: &mut impl Painter, document: &Document, width: f64, height: f64) -> usize {
    let root = document.root_transform(width, height);
    let mut painted = 0;
    document.walk(|_, element| {
        if let Some(shape) = element.shape() {
            if paint_shape(painter, shape, &root) {
                painted += 1;
            } else {
                trace!(tag = element.tag(), "nothing to paint");
            }
        }
    });
    painted
}
