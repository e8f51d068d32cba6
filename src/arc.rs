//! Elliptical arc to cubic Bezier conversion.
//!
//! Arcs are given in endpoint form (start, end, radii, x-axis rotation and the
//! two flags). They are converted to center form, split into sub-arcs of at
//! most a quarter turn, and each sub-arc is approximated on the unit circle
//! before being mapped back onto the ellipse.

use std::f64::consts::{FRAC_PI_2, TAU};

use glam::{DMat2, dvec2};

use crate::defaults;
use crate::log::trace;
use crate::types::{Point, Transform};

/// One cubic Bezier piece; the start point is the previous piece's `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub c1: Point,
    pub c2: Point,
    pub to: Point,
}

/// Center parameterization of an endpoint arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcCenter {
    pub center: Point,
    /// Radii after out-of-range correction (always positive).
    pub radii: Point,
    /// Angle of the start point on the unit circle, in radians.
    pub start_angle: f64,
    /// Signed angular span, in radians. Positive when `sweep` is set.
    pub sweep_delta: f64,
}

/// Signed angle from `u` to `v`.
fn vector_angle(u: Point, v: Point) -> f64 {
    let sign = if u.x * v.y - u.y * v.x < 0.0 { -1.0 } else { 1.0 };
    let dot = (u.x * v.x + u.y * v.y).clamp(-1.0, 1.0);
    sign * dot.acos()
}

/// Convert an endpoint arc to center form.
///
/// Returns `None` for degenerate arcs: a zero radius or coincident
/// endpoints. Radii too small to span the chord are scaled up uniformly.
pub fn arc_center(
    from: Point,
    to: Point,
    radii: Point,
    x_rotation: f64,
    large_arc: bool,
    sweep: bool,
) -> Option<ArcCenter> {
    if radii.x == 0.0 || radii.y == 0.0 {
        return None;
    }

    let (sin_phi, cos_phi) = x_rotation.to_radians().sin_cos();

    // Half the chord, in ellipse-aligned coordinates.
    let half_dx = (from.x - to.x) / 2.0;
    let half_dy = (from.y - to.y) / 2.0;
    let pxp = cos_phi * half_dx + sin_phi * half_dy;
    let pyp = -sin_phi * half_dx + cos_phi * half_dy;
    if pxp == 0.0 && pyp == 0.0 {
        return None;
    }

    let mut rx = radii.x.abs();
    let mut ry = radii.y.abs();
    let lambda = (pxp * pxp) / (rx * rx) + (pyp * pyp) / (ry * ry);
    if lambda > 1.0 {
        let scale = lambda.sqrt();
        rx *= scale;
        ry *= scale;
    }

    let rxsq = rx * rx;
    let rysq = ry * ry;
    let pxpsq = pxp * pxp;
    let pypsq = pyp * pyp;

    let mut radicant = (rxsq * rysq - rxsq * pypsq - rysq * pxpsq).max(0.0);
    radicant /= rxsq * pypsq + rysq * pxpsq;
    let mut radicant = radicant.sqrt();
    if large_arc == sweep {
        radicant = -radicant;
    }

    let cxp = radicant * rx / ry * pyp;
    let cyp = -radicant * ry / rx * pxp;
    let center = Point::new(
        cos_phi * cxp - sin_phi * cyp + (from.x + to.x) / 2.0,
        sin_phi * cxp + cos_phi * cyp + (from.y + to.y) / 2.0,
    );

    let v1 = Point::new((pxp - cxp) / rx, (pyp - cyp) / ry);
    let v2 = Point::new((-pxp - cxp) / rx, (-pyp - cyp) / ry);

    let start_angle = vector_angle(Point::new(1.0, 0.0), v1);
    let mut sweep_delta = vector_angle(v1, v2);
    if !sweep && sweep_delta > 0.0 {
        sweep_delta -= TAU;
    }
    if sweep && sweep_delta < 0.0 {
        sweep_delta += TAU;
    }

    Some(ArcCenter {
        center,
        radii: Point::new(rx, ry),
        start_angle,
        sweep_delta,
    })
}

/// Approximate the unit-circle arc starting at `angle` spanning `delta`.
fn unit_arc(angle: f64, delta: f64) -> [Point; 3] {
    let a = if (delta - FRAC_PI_2).abs() < defaults::ARC_RATIO_SNAP {
        defaults::QUARTER_ARC_KAPPA
    } else if (delta + FRAC_PI_2).abs() < defaults::ARC_RATIO_SNAP {
        -defaults::QUARTER_ARC_KAPPA
    } else {
        4.0 / 3.0 * (delta / 4.0).tan()
    };

    let (y1, x1) = angle.sin_cos();
    let (y2, x2) = (angle + delta).sin_cos();

    [
        Point::new(x1 - y1 * a, y1 + x1 * a),
        Point::new(x2 + y2 * a, y2 - x2 * a),
        Point::new(x2, y2),
    ]
}

/// Convert an SVG endpoint arc into cubic Bezier segments.
///
/// Degenerate arcs yield an empty list. Otherwise the last segment ends
/// exactly at `to`.
pub fn arc_to_cubic(
    from: Point,
    to: Point,
    radii: Point,
    x_rotation: f64,
    large_arc: bool,
    sweep: bool,
) -> Vec<CubicSegment> {
    let Some(arc) = arc_center(from, to, radii, x_rotation, large_arc, sweep) else {
        trace!("degenerate arc, no cubics");
        return Vec::new();
    };

    let mut ratio = arc.sweep_delta.abs() / FRAC_PI_2;
    if (1.0 - ratio).abs() < defaults::ARC_RATIO_SNAP {
        ratio = 1.0;
    }
    let segments = (ratio.ceil() as usize).max(1);
    let delta = arc.sweep_delta / segments as f64;

    let (sin_phi, cos_phi) = x_rotation.to_radians().sin_cos();
    let to_ellipse = |p: Point| {
        let x = p.x * arc.radii.x;
        let y = p.y * arc.radii.y;
        Point::new(
            cos_phi * x - sin_phi * y + arc.center.x,
            sin_phi * x + cos_phi * y + arc.center.y,
        )
    };

    let mut angle = arc.start_angle;
    let mut curves: Vec<CubicSegment> = (0..segments)
        .map(|_| {
            let [c1, c2, end] = unit_arc(angle, delta);
            angle += delta;
            CubicSegment {
                c1: to_ellipse(c1),
                c2: to_ellipse(c2),
                to: to_ellipse(end),
            }
        })
        .collect();

    if let Some(last) = curves.last_mut() {
        last.to = to;
    }
    trace!(segments, "arc converted to cubics");
    curves
}

/// Map an arc's ellipse through the linear part of `transform`.
///
/// Returns the new radii, x-axis rotation (degrees) and sweep flag. A
/// reflecting transform flips the sweep direction.
pub(crate) fn transform_arc(radii: Point, x_rotation: f64, sweep: bool, transform: &Transform) -> (Point, f64, bool) {
    let linear = transform.affine().matrix2;
    if linear == DMat2::IDENTITY {
        return (radii, x_rotation, sweep);
    }

    let ellipse = linear
        * DMat2::from_angle(x_rotation.to_radians())
        * DMat2::from_diagonal(dvec2(radii.x.abs(), radii.y.abs()));
    // Axes of the image ellipse are the eigenvectors of E = A * A^T.
    let e = ellipse * ellipse.transpose();
    let (p, q, r) = (e.x_axis.x, e.y_axis.x, e.y_axis.y);
    let mean = (p + r) / 2.0;
    let spread = (((p - r) / 2.0).powi(2) + q * q).sqrt();
    let major = (mean + spread).max(0.0).sqrt();
    let minor = (mean - spread).max(0.0).sqrt();
    let angle = 0.5 * (2.0 * q).atan2(p - r);

    let sweep = if linear.determinant() < 0.0 { !sweep } else { sweep };
    (Point::new(major, minor), angle.to_degrees(), sweep)
}
