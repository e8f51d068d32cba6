//! The path shape: an ordered, editable list of segments.
//!
//! Segments are stored in local space. The append operations take points in
//! parent space and map them through the inverse transform first; the
//! editing operations (`set_segment`, `set_segments`, `from_segments`) take
//! local segments as they are.
//!
//! The bounding box is the union of the start and end points of every
//! drawing segment. Appends extend it in constant time by tracking the pen
//! position; removals rescan.

use std::fmt;

use super::segment::{AbsSegment, Cursor, PathSegment};
use super::{Shape, ShapeType};
use crate::arc::arc_to_cubic;
use crate::defaults;
use crate::errors::ShapeError;
use crate::log::{debug, trace};
use crate::pen::Pen;
use crate::types::{BBox, Point, PointState, Transform};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    segments: Vec<PathSegment>,
    pen: Pen,
    transform: Transform,
    bbox: BBox,
    cursor: Cursor,
}

/// Extend `bbox` with one segment and advance `cursor` past it.
fn track(bbox: &mut BBox, cursor: &mut Cursor, segment: &PathSegment) {
    let start = cursor.current;
    let resolved = cursor.resolve(segment);
    if resolved.draws() {
        bbox.expand_point(start);
        bbox.expand_point(resolved.end());
    }
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// A path over local-space segments.
    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        let mut path = Self::new();
        path.set_segments(segments);
        path
    }

    pub fn with_pen(mut self, pen: Pen) -> Self {
        self.pen = pen;
        self
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathSegment> {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Exactly one segment (typically a lone moveto).
    pub fn is_single_point(&self) -> bool {
        self.segments.len() == 1
    }

    pub fn segment(&self, index: usize) -> Option<&PathSegment> {
        self.segments.get(index)
    }

    /// Pen position after the last segment, in local space.
    pub fn current_point(&self) -> Point {
        self.cursor.current
    }

    /// Every segment resolved to absolute local coordinates.
    pub fn resolved(&self) -> Vec<AbsSegment> {
        let mut cursor = Cursor::new();
        self.segments.iter().map(|s| cursor.resolve(s)).collect()
    }

    // ------------------------------------------------------------------
    // Appending (parent-space input)
    // ------------------------------------------------------------------

    /// Append a segment given in parent space.
    pub fn push(&mut self, segment: PathSegment) -> &mut Self {
        let local = if self.transform.is_identity() {
            segment
        } else {
            let current = self.transform.map(self.cursor.current);
            segment.mapped(&self.transform.inverse_or_identity(), current)
        };
        trace!(segment = %local, "append");
        track(&mut self.bbox, &mut self.cursor, &local);
        self.segments.push(local);
        self
    }

    pub fn move_to(&mut self, to: Point) -> &mut Self {
        self.push(PathSegment::MoveTo { to, relative: false })
    }

    pub fn line_to(&mut self, to: Point) -> &mut Self {
        self.push(PathSegment::LineTo { to, relative: false })
    }

    pub fn h_line_to(&mut self, x: f64) -> &mut Self {
        self.push(PathSegment::HLineTo { x, relative: false })
    }

    pub fn v_line_to(&mut self, y: f64) -> &mut Self {
        self.push(PathSegment::VLineTo { y, relative: false })
    }

    pub fn quad_to(&mut self, ctrl: Point, to: Point) -> &mut Self {
        self.push(PathSegment::QuadTo {
            ctrl,
            to,
            relative: false,
        })
    }

    pub fn short_quad_to(&mut self, to: Point) -> &mut Self {
        self.push(PathSegment::ShortQuadTo { to, relative: false })
    }

    pub fn cubic_to(&mut self, c1: Point, c2: Point, to: Point) -> &mut Self {
        self.push(PathSegment::CubicTo {
            c1,
            c2,
            to,
            relative: false,
        })
    }

    /// Cubic whose first control point reflects the previous cubic's second
    /// one through the current point.
    pub fn short_cubic_to(&mut self, c2: Point, to: Point) -> &mut Self {
        self.push(PathSegment::ShortCubicTo {
            c2,
            to,
            relative: false,
        })
    }

    pub fn arc_to(&mut self, radii: Point, x_rotation: f64, large_arc: bool, sweep: bool, to: Point) -> &mut Self {
        self.push(PathSegment::ArcTo {
            radii,
            x_rotation,
            large_arc,
            sweep,
            to,
            relative: false,
        })
    }

    pub fn close(&mut self) -> &mut Self {
        self.push(PathSegment::Close)
    }

    // ------------------------------------------------------------------
    // Bulk appends over flat coordinate lists
    //
    // Lists are cut down to a whole number of tuples; a trailing partial
    // tuple is dropped. Each returns the number of segments appended.
    // ------------------------------------------------------------------

    fn push_tuples(
        &mut self,
        values: &[f64],
        arity: usize,
        build: impl Fn(&[f64], usize) -> PathSegment,
    ) -> usize {
        let chunks = values.chunks_exact(arity);
        let dropped = chunks.remainder().len();
        if dropped > 0 {
            debug!(arity, dropped, "dropping incomplete coordinate tuple");
        }
        let mut count = 0;
        for (i, chunk) in chunks.enumerate() {
            self.push(build(chunk, i));
            count += 1;
        }
        count
    }

    /// The first pair moves, the remaining pairs draw lines.
    pub fn move_to_list(&mut self, values: &[f64], relative: bool) -> usize {
        self.push_tuples(values, 2, |v, i| {
            let to = Point::new(v[0], v[1]);
            if i == 0 {
                PathSegment::MoveTo { to, relative }
            } else {
                PathSegment::LineTo { to, relative }
            }
        })
    }

    pub fn line_to_list(&mut self, values: &[f64], relative: bool) -> usize {
        self.push_tuples(values, 2, |v, _| PathSegment::LineTo {
            to: Point::new(v[0], v[1]),
            relative,
        })
    }

    pub fn h_line_to_list(&mut self, values: &[f64], relative: bool) -> usize {
        self.push_tuples(values, 1, |v, _| PathSegment::HLineTo { x: v[0], relative })
    }

    pub fn v_line_to_list(&mut self, values: &[f64], relative: bool) -> usize {
        self.push_tuples(values, 1, |v, _| PathSegment::VLineTo { y: v[0], relative })
    }

    pub fn quad_to_list(&mut self, values: &[f64], relative: bool) -> usize {
        self.push_tuples(values, 4, |v, _| PathSegment::QuadTo {
            ctrl: Point::new(v[0], v[1]),
            to: Point::new(v[2], v[3]),
            relative,
        })
    }

    pub fn short_quad_to_list(&mut self, values: &[f64], relative: bool) -> usize {
        self.push_tuples(values, 2, |v, _| PathSegment::ShortQuadTo {
            to: Point::new(v[0], v[1]),
            relative,
        })
    }

    pub fn cubic_to_list(&mut self, values: &[f64], relative: bool) -> usize {
        self.push_tuples(values, 6, |v, _| PathSegment::CubicTo {
            c1: Point::new(v[0], v[1]),
            c2: Point::new(v[2], v[3]),
            to: Point::new(v[4], v[5]),
            relative,
        })
    }

    pub fn short_cubic_to_list(&mut self, values: &[f64], relative: bool) -> usize {
        self.push_tuples(values, 4, |v, _| PathSegment::ShortCubicTo {
            c2: Point::new(v[0], v[1]),
            to: Point::new(v[2], v[3]),
            relative,
        })
    }

    /// Tuples of `rx ry x-rotation large-arc sweep x y`; flags are true when
    /// nonzero.
    pub fn arc_to_list(&mut self, values: &[f64], relative: bool) -> usize {
        self.push_tuples(values, 7, |v, _| PathSegment::ArcTo {
            radii: Point::new(v[0], v[1]),
            x_rotation: v[2],
            large_arc: v[3] != 0.0,
            sweep: v[4] != 0.0,
            to: Point::new(v[5], v[6]),
            relative,
        })
    }

    // ------------------------------------------------------------------
    // Editing (local-space input)
    // ------------------------------------------------------------------

    pub fn set_segments(&mut self, segments: Vec<PathSegment>) {
        self.segments = segments;
        self.update_bounding_box();
    }

    pub fn set_segment(&mut self, index: usize, segment: PathSegment) -> Result<(), ShapeError> {
        let len = self.segments.len();
        let slot = self
            .segments
            .get_mut(index)
            .ok_or(ShapeError::IndexOutOfRange { index, len })?;
        *slot = segment;
        self.update_bounding_box();
        Ok(())
    }

    pub fn pop(&mut self) -> Option<PathSegment> {
        let popped = self.segments.pop();
        if popped.is_some() {
            self.update_bounding_box();
        }
        popped
    }

    /// Remove the first segment and append a `Close` so indices held by
    /// callers still address a segment.
    pub fn left_shift(&mut self) -> Option<PathSegment> {
        if self.segments.is_empty() {
            return None;
        }
        let first = self.segments.remove(0);
        self.segments.push(PathSegment::Close);
        self.update_bounding_box();
        Some(first)
    }

    pub fn truncate(&mut self, len: usize) {
        if len < self.segments.len() {
            self.segments.truncate(len);
            self.update_bounding_box();
        }
    }

    pub fn clear(&mut self) {
        self.segments.clear();
        self.update_bounding_box();
    }

    /// Bake the transform into the segments and reset it to identity.
    pub fn apply_transform(&mut self) {
        if self.transform.is_identity() {
            return;
        }
        let transform = self.transform;
        let mut cursor = Cursor::new();
        let baked: Vec<PathSegment> = self
            .segments
            .iter()
            .map(|segment| {
                let mapped = segment.mapped(&transform, cursor.current);
                cursor.resolve(segment);
                mapped
            })
            .collect();
        self.transform = Transform::IDENTITY;
        self.set_segments(baked);
    }

    // ------------------------------------------------------------------
    // Hit-testing
    // ------------------------------------------------------------------

    /// Flatten into polylines, one per subpath. Curves become
    /// `CURVE_FLATTEN_STEPS` chords; arcs go through their cubic form.
    fn flatten(&self) -> Vec<Vec<Point>> {
        let mut polylines = Vec::new();
        let mut current = vec![Point::ORIGIN];
        let steps = defaults::CURVE_FLATTEN_STEPS;

        let finish = |polyline: Vec<Point>, out: &mut Vec<Vec<Point>>| {
            if polyline.len() > 1 {
                out.push(polyline);
            }
        };

        for segment in self.resolved() {
            let start = current.last().copied().unwrap_or(Point::ORIGIN);
            match segment {
                AbsSegment::MoveTo(to) => {
                    finish(std::mem::replace(&mut current, vec![to]), &mut polylines);
                }
                AbsSegment::LineTo(to) => current.push(to),
                AbsSegment::QuadTo { ctrl, to } => {
                    current.extend((1..=steps).map(|i| quad_point(start, ctrl, to, i as f64 / steps as f64)));
                }
                AbsSegment::CubicTo { c1, c2, to } => {
                    current.extend((1..=steps).map(|i| cubic_point(start, c1, c2, to, i as f64 / steps as f64)));
                }
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
                        current.push(to);
                    }
                    let mut p0 = from;
                    for c in cubics {
                        current.extend((1..=steps).map(|i| cubic_point(p0, c.c1, c.c2, c.to, i as f64 / steps as f64)));
                        p0 = c.to;
                    }
                }
                AbsSegment::Close { start } => {
                    finish(std::mem::replace(&mut current, vec![start]), &mut polylines);
                }
            }
        }
        finish(current, &mut polylines);
        polylines
    }
}

fn quad_point(p0: Point, c: Point, p1: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    p0 * (mt * mt) + c * (2.0 * mt * t) + p1 * (t * t)
}

fn cubic_point(p0: Point, c1: Point, c2: Point, p1: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    p0 * (mt * mt * mt) + c1 * (3.0 * mt * mt * t) + c2 * (3.0 * mt * t * t) + p1 * (t * t * t)
}

/// Twice the signed area of triangle `(a, b, p)`; positive when `p` is left
/// of `a -> b` in a y-up frame.
fn is_left(a: Point, b: Point, p: Point) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (p.x - a.x) * (b.y - a.y)
}

/// Winding number and ray crossing count of `p` against closed polylines.
fn winding(polylines: &[Vec<Point>], p: Point) -> (i32, u32) {
    let mut number = 0;
    let mut crossings = 0;
    for polyline in polylines {
        let closing = [polyline[polyline.len() - 1], polyline[0]];
        let edges = polyline.windows(2).map(|w| (w[0], w[1])).chain(std::iter::once((closing[0], closing[1])));
        for (a, b) in edges {
            if a.y <= p.y {
                if b.y > p.y && is_left(a, b, p) > 0.0 {
                    number += 1;
                    crossings += 1;
                }
            } else if b.y <= p.y && is_left(a, b, p) < 0.0 {
                number -= 1;
                crossings += 1;
            }
        }
    }
    (number, crossings)
}

impl Shape for Path {
    fn shape_type(&self) -> ShapeType {
        ShapeType::Path
    }

    fn bounding_box(&self) -> BBox {
        self.bbox
    }

    fn update_bounding_box(&mut self) {
        self.bbox = BBox::new();
        self.cursor = Cursor::new();
        for segment in &self.segments {
            track(&mut self.bbox, &mut self.cursor, segment);
        }
    }

    /// Edge when near any drawn segment, Inside when filled and enclosed
    /// under the pen's fill rule, Outside otherwise.
    ///
    /// Subpaths are implicitly closed for the fill test, but the closing
    /// edge itself never reports Edge.
    fn contains(&self, point: Point) -> Result<PointState, ShapeError> {
        let local = self.local_point(point);
        if self.segments.is_empty() {
            return Ok(PointState::Outside);
        }

        let polylines = self.flatten();
        let on_edge = polylines
            .iter()
            .flat_map(|polyline| polyline.windows(2))
            .any(|w| local.is_on_segment(w[0], w[1]));
        if on_edge {
            return Ok(PointState::Edge);
        }

        if self.pen.is_filled() {
            let (number, crossings) = winding(&polylines, local);
            if self.pen.winding.is_inside(number, crossings) {
                return Ok(PointState::Inside);
            }
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

    fn to_path(&self) -> Path {
        self.clone()
    }

    fn is_null(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathSegment;
    type IntoIter = std::slice::Iter<'a, PathSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pen::{Color, Winding};

    fn triangle() -> Path {
        let mut path = Path::new();
        path.move_to(Point::new(0.0, 0.0))
            .line_to(Point::new(10.0, 0.0))
            .line_to(Point::new(10.0, 10.0))
            .close();
        path
    }

    fn square(path: &mut Path, min: f64, max: f64) {
        path.move_to(Point::new(min, min))
            .line_to(Point::new(max, min))
            .line_to(Point::new(max, max))
            .line_to(Point::new(min, max))
            .close();
    }

    // ==================== bounding box tests ====================

    #[test]
    fn triangle_bbox() {
        let path = triangle();
        assert_eq!(path.bounding_box(), BBox::from_corners(Point::ORIGIN, Point::new(10.0, 10.0)));
    }

    #[test]
    fn lone_move_has_empty_bbox() {
        let mut path = Path::new();
        path.move_to(Point::new(4.0, 4.0));
        assert!(path.bounding_box().is_empty());
        assert!(path.is_single_point());
    }

    #[test]
    fn control_points_do_not_grow_bbox() {
        let mut path = Path::new();
        path.move_to(Point::ORIGIN)
            .cubic_to(Point::new(0.0, 50.0), Point::new(10.0, 50.0), Point::new(10.0, 0.0));
        assert_eq!(path.bounding_box(), BBox::from_corners(Point::ORIGIN, Point::new(10.0, 0.0)));
    }

    #[test]
    fn incremental_bbox_matches_rescan() {
        let mut path = Path::new();
        path.move_to_list(&[1.0, 1.0, 5.0, -3.0], true);
        path.h_line_to(20.0).short_cubic_to(Point::new(3.0, 3.0), Point::new(-7.0, 2.0));
        path.arc_to(Point::new(4.0, 4.0), 0.0, false, true, Point::new(0.0, 9.0));
        let incremental = path.bounding_box();
        path.update_bounding_box();
        assert_eq!(path.bounding_box(), incremental);
        path.update_bounding_box();
        assert_eq!(path.bounding_box(), incremental);
    }

    #[test]
    fn short_quad_reflects_and_vertical_keeps_x() {
        let mut path = Path::new();
        path.move_to(Point::ORIGIN)
            .quad_to(Point::new(5.0, -5.0), Point::new(10.0, 0.0))
            .short_quad_to(Point::new(20.0, 0.0))
            .v_line_to(8.0);
        insta::assert_snapshot!(path.to_string(), @"M0,0 Q5,-5 10,0 T20,0 V8");
        assert_eq!(path.bounding_box(), BBox::from_corners(Point::ORIGIN, Point::new(20.0, 8.0)));

        let resolved = path.resolved();
        assert_eq!(resolved[2], AbsSegment::QuadTo {
            ctrl: Point::new(15.0, 5.0),
            to: Point::new(20.0, 0.0)
        });
        assert_eq!(resolved[3], AbsSegment::LineTo(Point::new(20.0, 8.0)));
    }

    #[test]
    fn pop_shrinks_bbox() {
        let mut path = triangle();
        path.line_to(Point::new(100.0, 100.0));
        assert_eq!(path.bounding_box().max, Point::new(100.0, 100.0));
        assert_eq!(
            path.pop(),
            Some(PathSegment::LineTo {
                to: Point::new(100.0, 100.0),
                relative: false
            })
        );
        assert_eq!(path.bounding_box().max, Point::new(10.0, 10.0));
    }

    // ==================== append tests ====================

    #[test]
    fn line_list_truncates_odd_length() {
        for n in 0..9 {
            let values: Vec<f64> = (0..n).map(f64::from).collect();
            let mut path = Path::new();
            let added = path.line_to_list(&values, false);
            assert_eq!(added, n as usize / 2);
            assert_eq!(path.len(), n as usize / 2);
        }
    }

    #[test]
    fn cubic_and_arc_lists_truncate_to_arity() {
        let mut path = Path::new();
        assert_eq!(path.cubic_to_list(&[0.0; 13], false), 2);
        assert_eq!(path.arc_to_list(&[1.0; 20], false), 2);
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn move_list_continues_with_lines() {
        let mut path = Path::new();
        path.move_to_list(&[0.0, 0.0, 5.0, 0.0, 5.0, 5.0, 9.0], false);
        insta::assert_snapshot!(path.to_string(), @"M0,0 L5,0 L5,5");
    }

    #[test]
    fn appends_map_through_inverse_transform() {
        let mut path = Path::new();
        path.set_transform(Transform::translation(100.0, 50.0));
        path.move_to(Point::new(100.0, 50.0)).line_to(Point::new(110.0, 50.0));
        assert_eq!(
            path.segment(1),
            Some(&PathSegment::LineTo {
                to: Point::new(10.0, 0.0),
                relative: false
            })
        );
        assert_eq!(path.contains(Point::new(105.0, 50.0)), Ok(PointState::Edge));
    }

    #[test]
    fn relative_appends_ignore_translation() {
        let mut path = Path::new();
        path.set_transform(Transform::translation(100.0, 50.0));
        path.push(PathSegment::MoveTo {
            to: Point::new(1.0, 1.0),
            relative: true,
        });
        path.push(PathSegment::LineTo {
            to: Point::new(1.0, 1.0),
            relative: true,
        });
        // the first relative moveto is relative to the local origin
        assert_eq!(path.current_point(), Point::new(2.0, 2.0));
    }

    #[test]
    fn short_cubic_example_reflects_through_current() {
        let mut path = Path::new();
        path.move_to(Point::new(-5.0, 0.0))
            .cubic_to(Point::new(-4.0, 3.0), Point::new(2.0, 2.0), Point::new(0.0, 0.0))
            .short_cubic_to(Point::new(3.0, 3.0), Point::new(5.0, 0.0));
        let resolved = path.resolved();
        assert_eq!(
            resolved[2],
            AbsSegment::CubicTo {
                c1: Point::new(-2.0, -2.0),
                c2: Point::new(3.0, 3.0),
                to: Point::new(5.0, 0.0)
            }
        );
    }

    // ==================== editing tests ====================

    #[test]
    fn set_segment_checks_bounds() {
        let mut path = triangle();
        let seg = PathSegment::LineTo {
            to: Point::new(20.0, 0.0),
            relative: false,
        };
        assert_eq!(path.set_segment(1, seg), Ok(()));
        assert_eq!(path.bounding_box().max.x, 20.0);
        assert_eq!(
            path.set_segment(9, seg),
            Err(ShapeError::IndexOutOfRange { index: 9, len: 4 })
        );
    }

    #[test]
    fn left_shift_keeps_length() {
        let mut path = triangle();
        let first = path.left_shift();
        assert!(matches!(first, Some(PathSegment::MoveTo { .. })));
        assert_eq!(path.len(), 4);
        assert_eq!(path.segment(3), Some(&PathSegment::Close));
    }

    #[test]
    fn truncate_and_clear() {
        let mut path = triangle();
        path.truncate(2);
        assert_eq!(path.bounding_box(), BBox::from_corners(Point::ORIGIN, Point::new(10.0, 0.0)));
        path.clear();
        assert!(path.is_null());
        assert!(path.bounding_box().is_empty());
    }

    #[test]
    fn apply_transform_bakes_points() {
        let mut path = triangle();
        path.set_transform(Transform::translation(5.0, 5.0) * Transform::scale(2.0, 2.0));
        path.apply_transform();
        assert!(path.transform().is_identity());
        insta::assert_snapshot!(path.to_string(), @"M5,5 L25,5 L25,25 Z");
        assert_eq!(path.bounding_box(), BBox::from_corners(Point::new(5.0, 5.0), Point::new(25.0, 25.0)));
    }

    #[test]
    fn apply_transform_maps_arc_radii_and_sweep() {
        let mut path = Path::new();
        path.move_to(Point::new(1.0, 0.0))
            .arc_to(Point::new(5.0, 5.0), 0.0, false, true, Point::new(11.0, 0.0));
        path.set_transform(Transform::scale(-2.0, 2.0));
        path.apply_transform();

        let Some(PathSegment::ArcTo {
            radii,
            x_rotation,
            sweep,
            to,
            ..
        }) = path.segment(1).copied()
        else {
            panic!("expected an arc, got {path}");
        };
        assert_eq!(radii, Point::new(10.0, 10.0));
        assert!(x_rotation.abs() < 1e-9, "rotation {x_rotation}");
        // a reflection reverses the sweep
        assert!(!sweep);
        assert_eq!(to, Point::new(-22.0, 0.0));
    }

    #[test]
    fn display_preserves_relative_flags() {
        let mut path = Path::new();
        path.move_to_list(&[1.0, 2.0], true);
        path.h_line_to_list(&[3.0], true);
        path.close();
        insta::assert_snapshot!(path.to_string(), @"m1,2 h3 Z");
    }

    // ==================== contains tests ====================

    #[test]
    fn triangle_contains_example() {
        let mut path = triangle();
        assert_eq!(path.contains(Point::new(5.0, 5.0)), Ok(PointState::Outside));
        path.set_pen(Pen::filled(Color::BLACK));
        assert_eq!(path.contains(Point::new(5.0, 5.0)), Ok(PointState::Inside));
        assert_eq!(path.contains(Point::new(5.0, 0.0)), Ok(PointState::Edge));
        assert_eq!(path.contains(Point::new(2.0, 8.0)), Ok(PointState::Outside));
    }

    #[test]
    fn filled_convex_polygons_contain_their_centroid() {
        for sides in 3..12 {
            for radius in [5.0, 40.0, 300.0] {
                let center = Point::new(17.0, -3.0);
                let vertices: Vec<Point> = (0..sides)
                    .map(|i| {
                        let angle = std::f64::consts::TAU * i as f64 / sides as f64;
                        center.offset(radius * angle.cos(), radius * angle.sin())
                    })
                    .collect();
                let mut path = Path::new().with_pen(Pen::filled(Color::BLACK));
                path.move_to(vertices[0]);
                for &v in &vertices[1..] {
                    path.line_to(v);
                }
                path.close();
                assert_eq!(path.contains(center), Ok(PointState::Inside), "{sides} sides, r={radius}");
            }
        }
    }

    #[test]
    fn fill_rule_decides_holes() {
        let mut path = Path::new().with_pen(Pen::filled(Color::BLACK));
        square(&mut path, 0.0, 30.0);
        square(&mut path, 10.0, 20.0);
        let hole = Point::new(15.0, 15.0);
        assert_eq!(path.contains(hole), Ok(PointState::Inside));
        path.pen_mut().winding = Winding::EvenOdd;
        assert_eq!(path.contains(hole), Ok(PointState::Outside));
        assert_eq!(path.contains(Point::new(5.0, 5.0)), Ok(PointState::Inside));
    }

    #[test]
    fn curves_are_hit_along_their_outline() {
        let mut path = Path::new();
        path.move_to(Point::new(0.0, 0.0))
            .quad_to(Point::new(10.0, 20.0), Point::new(20.0, 0.0));
        // apex of the quadratic is at (10, 10)
        assert_eq!(path.contains(Point::new(10.0, 10.0)), Ok(PointState::Edge));
        assert_eq!(path.contains(Point::new(10.0, 4.0)), Ok(PointState::Outside));
    }

    #[test]
    fn arcs_are_hit_along_their_outline() {
        let mut path = Path::new();
        path.move_to(Point::ORIGIN)
            .arc_to(Point::new(5.0, 5.0), 0.0, false, true, Point::new(10.0, 0.0));
        assert_eq!(path.contains(Point::new(5.0, -5.0)), Ok(PointState::Edge));
        assert_eq!(path.contains(Point::new(5.0, 5.0)), Ok(PointState::Outside));
    }

    #[test]
    fn empty_path_contains_nothing() {
        let path = Path::new().with_pen(Pen::filled(Color::BLACK));
        assert_eq!(path.contains(Point::ORIGIN), Ok(PointState::Outside));
    }
}
