//! Path and shape geometry for SVG-like vector documents.
//!
//! - [`parse`] reads path data (`M0,0 L10,0 Z`), viewBox strings and numeric
//!   attributes.
//! - [`shapes`] holds `Line`, `Rect`, `Ellipse` and `Path`, each with a
//!   bounding box, a pen, a transform and point classification.
//! - [`arc`] converts elliptical arcs to cubic Beziers.
//! - [`elements`] builds a document tree from parsed markup and walks it for
//!   hit-testing and painting.
//! - [`paint`] turns shapes into draw primitives for a backend.
//!
//! ```
//! use vectis::{Point, PointState, Shape};
//!
//! let mut path = vectis::parse_path("M0,0 L10,0 L10,10 Z").unwrap();
//! assert_eq!(path.contains(Point::new(7.0, 3.0)).unwrap(), PointState::Outside);
//! path.pen_mut().fill = Some(vectis::Color::BLACK);
//! assert_eq!(path.contains(Point::new(7.0, 3.0)).unwrap(), PointState::Inside);
//! ```

use pest_derive::Parser;

pub mod arc;
pub mod defaults;
pub mod elements;
pub mod errors;
pub mod log;
pub mod paint;
pub mod parse;
pub mod pen;
pub mod shapes;
pub mod types;

pub use elements::{Document, Element, ElementId, ElementKind, HitOrder, RawNode};
pub use errors::{AttributeError, ParseError, ShapeError, TransformError};
pub use paint::{DrawList, DrawOp, Painter, paint_document, paint_shape};
pub use parse::{ParseMode, ParsedPath, ViewBox, parse_path_data, parse_path_data_with};
pub use pen::{Color, LineCap, LineJoin, Pen, Winding};
pub use shapes::{Ellipse, Line, Path, PathSegment, Rect, Shape, ShapeKind};
pub use types::{BBox, Point, PointState, Transform};

#[derive(Parser)]
#[grammar = "path.pest"]
pub struct PathDataParser;

/// Parse path data, failing on the first malformed token.
///
/// Use [`parse_path_data`] to skip bad tokens and collect diagnostics
/// instead.
pub fn parse_path(d: &str) -> Result<Path, miette::Report> {
    let parsed = parse_path_data_with(d, ParseMode::Strict)?;
    Ok(parsed.path)
}
