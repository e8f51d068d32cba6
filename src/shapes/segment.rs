//! Path segments: the stored (possibly relative, possibly shorthand) form and
//! the resolved absolute form consumed by painting and hit-testing.

use std::fmt;

use crate::arc::transform_arc;
use crate::types::{Point, Transform};

/// One path command as written in path data.
///
/// Relative segments store offsets from the current point, for the target
/// and for every control point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo {
        to: Point,
        relative: bool,
    },
    LineTo {
        to: Point,
        relative: bool,
    },
    HLineTo {
        x: f64,
        relative: bool,
    },
    VLineTo {
        y: f64,
        relative: bool,
    },
    QuadTo {
        ctrl: Point,
        to: Point,
        relative: bool,
    },
    /// Quadratic with the control point reflected from the previous one.
    ShortQuadTo {
        to: Point,
        relative: bool,
    },
    CubicTo {
        c1: Point,
        c2: Point,
        to: Point,
        relative: bool,
    },
    /// Cubic with the first control point reflected from the previous one.
    ShortCubicTo {
        c2: Point,
        to: Point,
        relative: bool,
    },
    ArcTo {
        radii: Point,
        x_rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
        relative: bool,
    },
    Close,
}

impl PathSegment {
    /// The path-data command letter, lowercase when relative.
    pub fn letter(&self) -> char {
        let upper = match self {
            PathSegment::MoveTo { .. } => 'M',
            PathSegment::LineTo { .. } => 'L',
            PathSegment::HLineTo { .. } => 'H',
            PathSegment::VLineTo { .. } => 'V',
            PathSegment::QuadTo { .. } => 'Q',
            PathSegment::ShortQuadTo { .. } => 'T',
            PathSegment::CubicTo { .. } => 'C',
            PathSegment::ShortCubicTo { .. } => 'S',
            PathSegment::ArcTo { .. } => 'A',
            PathSegment::Close => return 'Z',
        };
        if self.is_relative() { upper.to_ascii_lowercase() } else { upper }
    }

    pub fn is_relative(&self) -> bool {
        match *self {
            PathSegment::MoveTo { relative, .. }
            | PathSegment::LineTo { relative, .. }
            | PathSegment::HLineTo { relative, .. }
            | PathSegment::VLineTo { relative, .. }
            | PathSegment::QuadTo { relative, .. }
            | PathSegment::ShortQuadTo { relative, .. }
            | PathSegment::CubicTo { relative, .. }
            | PathSegment::ShortCubicTo { relative, .. }
            | PathSegment::ArcTo { relative, .. } => relative,
            PathSegment::Close => false,
        }
    }

    /// Map this segment into another coordinate space.
    ///
    /// `current` is the absolute current point in the source space; absolute
    /// `H`/`V` need it for the coordinate they leave implicit. Under a
    /// rotating or skewing transform `H`/`V` become `L`.
    pub fn mapped(&self, transform: &Transform, current: Point) -> PathSegment {
        let map = |p: Point, relative: bool| {
            if relative {
                transform.map_vector(p)
            } else {
                transform.map(p)
            }
        };
        let axis_aligned = transform.is_axis_aligned();

        match *self {
            PathSegment::MoveTo { to, relative } => PathSegment::MoveTo {
                to: map(to, relative),
                relative,
            },
            PathSegment::LineTo { to, relative } => PathSegment::LineTo {
                to: map(to, relative),
                relative,
            },
            PathSegment::HLineTo { x, relative } => {
                let source = if relative { Point::new(x, 0.0) } else { Point::new(x, current.y) };
                let to = map(source, relative);
                if axis_aligned {
                    PathSegment::HLineTo { x: to.x, relative }
                } else {
                    PathSegment::LineTo { to, relative }
                }
            }
            PathSegment::VLineTo { y, relative } => {
                let source = if relative { Point::new(0.0, y) } else { Point::new(current.x, y) };
                let to = map(source, relative);
                if axis_aligned {
                    PathSegment::VLineTo { y: to.y, relative }
                } else {
                    PathSegment::LineTo { to, relative }
                }
            }
            PathSegment::QuadTo { ctrl, to, relative } => PathSegment::QuadTo {
                ctrl: map(ctrl, relative),
                to: map(to, relative),
                relative,
            },
            PathSegment::ShortQuadTo { to, relative } => PathSegment::ShortQuadTo {
                to: map(to, relative),
                relative,
            },
            PathSegment::CubicTo { c1, c2, to, relative } => PathSegment::CubicTo {
                c1: map(c1, relative),
                c2: map(c2, relative),
                to: map(to, relative),
                relative,
            },
            PathSegment::ShortCubicTo { c2, to, relative } => PathSegment::ShortCubicTo {
                c2: map(c2, relative),
                to: map(to, relative),
                relative,
            },
            PathSegment::ArcTo {
                radii,
                x_rotation,
                large_arc,
                sweep,
                to,
                relative,
            } => {
                let (radii, x_rotation, sweep) = transform_arc(radii, x_rotation, sweep, transform);
                PathSegment::ArcTo {
                    radii,
                    x_rotation,
                    large_arc,
                    sweep,
                    to: map(to, relative),
                    relative,
                }
            }
            PathSegment::Close => PathSegment::Close,
        }
    }
}

fn flag(b: bool) -> u8 {
    u8::from(b)
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = self.letter();
        match self {
            PathSegment::MoveTo { to, .. }
            | PathSegment::LineTo { to, .. }
            | PathSegment::ShortQuadTo { to, .. } => write!(f, "{letter}{to}"),
            PathSegment::HLineTo { x, .. } => write!(f, "{letter}{x}"),
            PathSegment::VLineTo { y, .. } => write!(f, "{letter}{y}"),
            PathSegment::QuadTo { ctrl, to, .. } => write!(f, "{letter}{ctrl} {to}"),
            PathSegment::CubicTo { c1, c2, to, .. } => write!(f, "{letter}{c1} {c2} {to}"),
            PathSegment::ShortCubicTo { c2, to, .. } => write!(f, "{letter}{c2} {to}"),
            PathSegment::ArcTo {
                radii,
                x_rotation,
                large_arc,
                sweep,
                to,
                ..
            } => write!(
                f,
                "{letter}{radii} {x_rotation} {},{} {to}",
                flag(*large_arc),
                flag(*sweep)
            ),
            PathSegment::Close => write!(f, "{letter}"),
        }
    }
}

// ============================================================================
// Absolute segments
// ============================================================================

/// A segment with every coordinate resolved to an absolute point.
///
/// `H`/`V` become lines, `T`/`S` get their reflected control point, and
/// `Close` carries the start of the subpath it returns to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AbsSegment {
    MoveTo(Point),
    LineTo(Point),
    QuadTo {
        ctrl: Point,
        to: Point,
    },
    CubicTo {
        c1: Point,
        c2: Point,
        to: Point,
    },
    ArcTo {
        from: Point,
        radii: Point,
        x_rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
    },
    Close {
        start: Point,
    },
}

impl AbsSegment {
    /// Where the pen is after this segment.
    pub fn end(&self) -> Point {
        match *self {
            AbsSegment::MoveTo(to)
            | AbsSegment::LineTo(to)
            | AbsSegment::QuadTo { to, .. }
            | AbsSegment::CubicTo { to, .. }
            | AbsSegment::ArcTo { to, .. } => to,
            AbsSegment::Close { start } => start,
        }
    }

    pub fn draws(&self) -> bool {
        !matches!(self, AbsSegment::MoveTo(_))
    }
}

/// Pen state while walking a segment list.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cursor {
    pub current: Point,
    pub subpath_start: Point,
    last_cubic_ctrl: Option<Point>,
    last_quad_ctrl: Option<Point>,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// `2 * current - ctrl`, or the current point when there is nothing to
    /// reflect.
    fn reflect(&self, ctrl: Option<Point>) -> Point {
        match ctrl {
            Some(c) => self.current * 2.0 - c,
            None => self.current,
        }
    }

    /// Resolve `segment` against the current pen state and advance.
    pub fn resolve(&mut self, segment: &PathSegment) -> AbsSegment {
        let origin = self.current;
        let abs = |p: Point, relative: bool| if relative { origin + p } else { p };

        let (resolved, cubic_ctrl, quad_ctrl) = match *segment {
            PathSegment::MoveTo { to, relative } => {
                let to = abs(to, relative);
                self.subpath_start = to;
                (AbsSegment::MoveTo(to), None, None)
            }
            PathSegment::LineTo { to, relative } => (AbsSegment::LineTo(abs(to, relative)), None, None),
            PathSegment::HLineTo { x, relative } => {
                let x = if relative { origin.x + x } else { x };
                (AbsSegment::LineTo(Point::new(x, origin.y)), None, None)
            }
            PathSegment::VLineTo { y, relative } => {
                let y = if relative { origin.y + y } else { y };
                (AbsSegment::LineTo(Point::new(origin.x, y)), None, None)
            }
            PathSegment::QuadTo { ctrl, to, relative } => {
                let ctrl = abs(ctrl, relative);
                let to = abs(to, relative);
                (AbsSegment::QuadTo { ctrl, to }, None, Some(ctrl))
            }
            PathSegment::ShortQuadTo { to, relative } => {
                let ctrl = self.reflect(self.last_quad_ctrl);
                let to = abs(to, relative);
                (AbsSegment::QuadTo { ctrl, to }, None, Some(ctrl))
            }
            PathSegment::CubicTo { c1, c2, to, relative } => {
                let c2 = abs(c2, relative);
                let resolved = AbsSegment::CubicTo {
                    c1: abs(c1, relative),
                    c2,
                    to: abs(to, relative),
                };
                (resolved, Some(c2), None)
            }
            PathSegment::ShortCubicTo { c2, to, relative } => {
                let c1 = self.reflect(self.last_cubic_ctrl);
                let c2 = abs(c2, relative);
                let to = abs(to, relative);
                (AbsSegment::CubicTo { c1, c2, to }, Some(c2), None)
            }
            PathSegment::ArcTo {
                radii,
                x_rotation,
                large_arc,
                sweep,
                to,
                relative,
            } => {
                let resolved = AbsSegment::ArcTo {
                    from: origin,
                    radii,
                    x_rotation,
                    large_arc,
                    sweep,
                    to: abs(to, relative),
                };
                (resolved, None, None)
            }
            PathSegment::Close => (
                AbsSegment::Close {
                    start: self.subpath_start,
                },
                None,
                None,
            ),
        };

        self.current = resolved.end();
        self.last_cubic_ctrl = cubic_ctrl;
        self.last_quad_ctrl = quad_ctrl;
        resolved
    }
}
