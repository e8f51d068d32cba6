//! Document elements: graphics wrapping a shape, containers holding child
//! ids, and unknown tags kept as inert leaves.
//!
//! Elements are built from attribute maps produced by an external markup
//! parser. The `id` is lifted into a field for the document index; every
//! other attribute stays in the element's map, and the pen and shape are
//! derived from it.

mod document;

use std::collections::BTreeMap;

use crate::errors::{ParseError, ShapeError};
use crate::log::{debug, warn};
use crate::parse::{ParseMode, ViewBox, parse_number_attr, parse_path_data_with, parse_view_box};
use crate::pen::Pen;
use crate::shapes::{Ellipse, Line, Path, Rect, Shape, ShapeKind};
use crate::types::{Point, PointState, Transform};

pub use document::{Document, HitOrder};

/// Index of an element inside its `Document`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) usize);

impl ElementId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One node of externally parsed markup: a tag, its attributes and children.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawNode {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<RawNode>,
}

impl RawNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn child(mut self, child: RawNode) -> Self {
        self.children.push(child);
        self
    }
}

// ============================================================================
// Element kinds
// ============================================================================

/// Graphic tags. `circle` and `ellipse` share a shape but read different
/// attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphicTag {
    Path,
    Line,
    Rect,
    Circle,
    Ellipse,
}

impl GraphicTag {
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "path" => GraphicTag::Path,
            "line" => GraphicTag::Line,
            "rect" => GraphicTag::Rect,
            "circle" => GraphicTag::Circle,
            "ellipse" => GraphicTag::Ellipse,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            GraphicTag::Path => "path",
            GraphicTag::Line => "line",
            GraphicTag::Rect => "rect",
            GraphicTag::Circle => "circle",
            GraphicTag::Ellipse => "ellipse",
        }
    }

    /// Attributes that define the geometry.
    pub fn geometry_attributes(self) -> &'static [&'static str] {
        match self {
            GraphicTag::Path => &["d"],
            GraphicTag::Line => &["x1", "y1", "x2", "y2"],
            GraphicTag::Rect => &["x", "y", "width", "height", "rx", "ry"],
            GraphicTag::Circle => &["cx", "cy", "r"],
            GraphicTag::Ellipse => &["cx", "cy", "rx", "ry"],
        }
    }
}

/// A leaf that paints and hit-tests through its shape.
#[derive(Debug)]
pub struct Graphic {
    tag: GraphicTag,
    shape: ShapeKind,
    diagnostics: Vec<ParseError>,
}

impl Graphic {
    /// Build from the full attribute map: geometry first, then the pen.
    pub fn from_attributes(tag: GraphicTag, attributes: &BTreeMap<String, String>) -> Self {
        let (shape, diagnostics) = build_shape(tag, attributes);
        let mut graphic = Self {
            tag,
            shape,
            diagnostics,
        };
        let pen = graphic.shape.pen_mut();
        for (key, value) in attributes {
            pen.apply_attribute(key, value);
        }
        graphic
    }

    pub fn tag(&self) -> GraphicTag {
        self.tag
    }

    pub fn shape(&self) -> &ShapeKind {
        &self.shape
    }

    pub fn shape_mut(&mut self) -> &mut ShapeKind {
        &mut self.shape
    }

    /// Problems recovered from while parsing the `d` attribute.
    pub fn diagnostics(&self) -> &[ParseError] {
        &self.diagnostics
    }

    /// Rebuild the shape from `attributes`, keeping pen and transform.
    fn rebuild(&mut self, attributes: &BTreeMap<String, String>) {
        let pen = self.shape.pen().clone();
        let transform = *self.shape.transform();
        let (mut shape, diagnostics) = build_shape(self.tag, attributes);
        shape.set_pen(pen);
        shape.set_transform(transform);
        self.shape = shape;
        self.diagnostics = diagnostics;
    }
}

fn number(attributes: &BTreeMap<String, String>, name: &str) -> f64 {
    let Some(value) = attributes.get(name) else {
        return 0.0;
    };
    parse_number_attr(name, value).unwrap_or_else(|_| {
        warn!(name, value = %value, "not a number, using 0");
        0.0
    })
}

fn build_shape(tag: GraphicTag, attributes: &BTreeMap<String, String>) -> (ShapeKind, Vec<ParseError>) {
    let n = |name| number(attributes, name);
    match tag {
        GraphicTag::Path => {
            let d = attributes.get("d").map(String::as_str).unwrap_or_default();
            let parsed = match parse_path_data_with(d, ParseMode::Lenient) {
                Ok(parsed) => parsed,
                Err(err) => {
                    warn!(%err, "unreadable path data");
                    return (Path::new().into(), vec![err]);
                }
            };
            (parsed.path.into(), parsed.diagnostics)
        }
        GraphicTag::Line => {
            let line = Line::new(Point::new(n("x1"), n("y1")), Point::new(n("x2"), n("y2")));
            (line.into(), Vec::new())
        }
        GraphicTag::Rect => {
            let radius = if attributes.contains_key("rx") { n("rx") } else { n("ry") };
            let rect = Rect::new(n("x"), n("y"), n("width"), n("height")).with_radius(radius);
            (rect.into(), Vec::new())
        }
        GraphicTag::Circle => (Ellipse::circle(Point::new(n("cx"), n("cy")), n("r")).into(), Vec::new()),
        GraphicTag::Ellipse => {
            let ellipse = Ellipse::new(Point::new(n("cx"), n("cy")), n("rx"), n("ry"));
            (ellipse.into(), Vec::new())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContainerKind {
    /// `<svg>`, with its parsed `viewBox` when one is given.
    Svg { view_box: Option<ViewBox> },
    Group,
    Link,
}

impl ContainerKind {
    pub fn from_tag(tag: &str, attributes: &BTreeMap<String, String>) -> Option<Self> {
        Some(match tag {
            "svg" => ContainerKind::Svg {
                view_box: attributes.get("viewBox").map(|v| parse_view_box(v)),
            },
            "g" => ContainerKind::Group,
            "a" => ContainerKind::Link,
            _ => return None,
        })
    }
}

/// A node with ordered children.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    kind: ContainerKind,
    children: Vec<ElementId>,
}

impl Container {
    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }
}

#[derive(Debug)]
pub enum ElementKind {
    Graphic(Graphic),
    Container(Container),
    /// Any tag this crate does not model. Never painted, never hit.
    Unknown(String),
}

impl ElementKind {
    pub fn is_container(&self) -> bool {
        matches!(self, ElementKind::Container(_))
    }

    pub fn is_graphic(&self) -> bool {
        matches!(self, ElementKind::Graphic(_))
    }

    /// Children of a container; empty for everything else.
    pub fn children(&self) -> &[ElementId] {
        match self {
            ElementKind::Container(container) => container.children(),
            ElementKind::Graphic(_) | ElementKind::Unknown(_) => &[],
        }
    }
}

// ============================================================================
// Element
// ============================================================================

#[derive(Debug)]
pub struct Element {
    id: String,
    attributes: BTreeMap<String, String>,
    kind: ElementKind,
    parent: Option<ElementId>,
}

impl Element {
    /// Build a childless element from a raw node. Container children are
    /// attached by the `Document`.
    pub fn from_raw(node: &RawNode, parent: Option<ElementId>) -> Self {
        let mut attributes = node.attributes.clone();
        let id = attributes.remove("id").unwrap_or_default();

        let kind = if let Some(tag) = GraphicTag::from_tag(&node.tag) {
            ElementKind::Graphic(Graphic::from_attributes(tag, &attributes))
        } else if let Some(kind) = ContainerKind::from_tag(&node.tag, &attributes) {
            ElementKind::Container(Container {
                kind,
                children: Vec::new(),
            })
        } else {
            debug!(tag = %node.tag, "unknown element");
            ElementKind::Unknown(node.tag.clone())
        };

        Self {
            id,
            attributes,
            kind,
            parent,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tag(&self) -> &str {
        match &self.kind {
            ElementKind::Graphic(graphic) => graphic.tag.name(),
            ElementKind::Container(container) => match container.kind {
                ContainerKind::Svg { .. } => "svg",
                ContainerKind::Group => "g",
                ContainerKind::Link => "a",
            },
            ElementKind::Unknown(tag) => tag.as_str(),
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    pub fn is_graphic(&self) -> bool {
        self.kind.is_graphic()
    }

    pub fn children(&self) -> &[ElementId] {
        self.kind.children()
    }

    pub fn shape(&self) -> Option<&ShapeKind> {
        match &self.kind {
            ElementKind::Graphic(graphic) => Some(&graphic.shape),
            _ => None,
        }
    }

    pub fn shape_mut(&mut self) -> Option<&mut ShapeKind> {
        match &mut self.kind {
            ElementKind::Graphic(graphic) => Some(&mut graphic.shape),
            _ => None,
        }
    }

    pub fn pen(&self) -> Option<&Pen> {
        self.shape().map(|shape| shape.pen())
    }

    /// The shape's transform; identity for non-graphics.
    pub fn transform(&self) -> Transform {
        self.shape().map(|shape| *shape.transform()).unwrap_or_default()
    }

    /// Returns false when the element has no shape to carry a transform.
    pub fn set_transform(&mut self, transform: Transform) -> bool {
        match self.shape_mut() {
            Some(shape) => {
                shape.set_transform(transform);
                true
            }
            None => false,
        }
    }

    /// Containers and unknown elements are never hit themselves.
    pub fn contains(&self, point: Point) -> Result<PointState, ShapeError> {
        match self.shape() {
            Some(shape) => shape.contains(point),
            None => Ok(PointState::Outside),
        }
    }

    /// Hit test that falls back to the path outline for shapes whose own
    /// containment is unsupported.
    pub(crate) fn is_hit(&self, point: Point) -> bool {
        let Some(shape) = self.shape() else {
            return false;
        };
        let state = shape.contains(point).or_else(|_| {
            debug!(shape = ?shape.shape_type(), "containment unsupported, testing the outline path");
            shape.to_path().contains(point)
        });
        state.is_ok_and(PointState::is_hit)
    }

    /// Set one attribute and re-derive whatever depends on it. Goes through
    /// `Document::set_attribute` so the id index stays current.
    pub(crate) fn set_attribute(&mut self, key: &str, value: &str) {
        if key == "id" {
            self.id = value.to_string();
            return;
        }
        self.attributes.insert(key.to_string(), value.to_string());
        self.rederive(key, Some(value));
    }

    /// Remove one attribute, resetting whatever depended on it. Returns the
    /// old value.
    pub(crate) fn remove_attribute(&mut self, key: &str) -> Option<String> {
        if key == "id" {
            let old = std::mem::take(&mut self.id);
            return (!old.is_empty()).then_some(old);
        }
        let old = self.attributes.remove(key);
        self.rederive(key, None);
        old
    }

    fn rederive(&mut self, key: &str, value: Option<&str>) {
        match &mut self.kind {
            ElementKind::Graphic(graphic) => {
                if Pen::ATTRIBUTES.contains(&key) {
                    let pen = graphic.shape.pen_mut();
                    match value {
                        Some(value) => pen.apply_attribute(key, value),
                        None => pen.reset_attribute(key),
                    };
                } else if graphic.tag.geometry_attributes().contains(&key) {
                    graphic.rebuild(&self.attributes);
                }
            }
            ElementKind::Container(Container {
                kind: ContainerKind::Svg { view_box },
                ..
            }) if key == "viewBox" => {
                *view_box = value.map(parse_view_box);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pen::Color;
    use crate::shapes::ShapeType;
    use crate::types::BBox;

    fn element(node: RawNode) -> Element {
        Element::from_raw(&node, None)
    }

    // ==================== construction tests ====================

    #[test]
    fn id_is_lifted_out_of_the_map() {
        let el = element(
            RawNode::new("rect")
                .attr("id", "box")
                .attr("class", "big")
                .attr("width", "10")
                .attr("data-x", "kept"),
        );
        assert_eq!(el.id(), "box");
        assert_eq!(el.attribute("id"), None);
        assert_eq!(el.attribute("class"), Some("big"));
        assert_eq!(el.attribute("data-x"), Some("kept"));
        assert_eq!(el.attribute("width"), Some("10"));
    }

    #[test]
    fn tags_map_to_kinds() {
        assert!(element(RawNode::new("g")).is_container());
        assert!(element(RawNode::new("a")).is_container());
        assert!(element(RawNode::new("svg")).is_container());
        assert!(element(RawNode::new("circle")).is_graphic());
        let text = element(RawNode::new("text"));
        assert!(!text.is_container() && !text.is_graphic());
        assert_eq!(text.tag(), "text");
    }

    #[test]
    fn circle_and_ellipse_read_their_own_radii() {
        let circle = element(RawNode::new("circle").attr("cx", "5").attr("cy", "5").attr("r", "2"));
        assert_eq!(
            circle.shape().map(|s| s.bounding_box()),
            Some(BBox::from_corners(Point::new(3.0, 3.0), Point::new(7.0, 7.0)))
        );
        let ellipse = element(RawNode::new("ellipse").attr("rx", "4").attr("ry", "1"));
        assert_eq!(
            ellipse.shape().map(|s| s.bounding_box()),
            Some(BBox::from_corners(Point::new(-4.0, -1.0), Point::new(4.0, 1.0)))
        );
    }

    #[test]
    fn path_data_diagnostics_are_kept() {
        let el = element(RawNode::new("path").attr("d", "M0 0 L10 # 0"));
        let ElementKind::Graphic(graphic) = el.kind() else {
            panic!("expected a graphic");
        };
        assert_eq!(graphic.shape().shape_type(), ShapeType::Path);
        assert_eq!(graphic.diagnostics().len(), 1);
    }

    #[test]
    fn pen_comes_from_presentation_attributes() {
        let el = element(
            RawNode::new("line")
                .attr("stroke", "#00f")
                .attr("stroke-width", "3px")
                .attr("fill", "none"),
        );
        let pen = el.pen().cloned().unwrap_or_default();
        assert_eq!(pen.stroke, Some(Color::rgb(0, 0, 255)));
        assert_eq!(pen.width, 3.0);
        assert_eq!(pen.fill, None);
    }

    #[test]
    fn bad_numbers_become_zero() {
        let el = element(RawNode::new("rect").attr("x", "left").attr("width", "4").attr("height", "4"));
        assert_eq!(
            el.shape().map(|s| s.bounding_box()),
            Some(BBox::from_corners(Point::ORIGIN, Point::new(4.0, 4.0)))
        );
    }

    // ==================== attribute update tests ====================

    #[test]
    fn geometry_attribute_rebuilds_shape_and_keeps_pen() {
        let mut el = element(RawNode::new("circle").attr("r", "1").attr("fill", "#000"));
        el.set_transform(Transform::translation(5.0, 0.0));
        el.set_attribute("r", "10");
        assert_eq!(el.shape().map(|s| s.bounding_box().width()), Some(20.0));
        assert!(el.pen().is_some_and(Pen::is_filled));
        assert_eq!(el.transform(), Transform::translation(5.0, 0.0));
    }

    #[test]
    fn pen_attribute_updates_and_resets() {
        let mut el = element(RawNode::new("path").attr("d", "M0 0 L1 1"));
        el.set_attribute("fill", "#f00");
        assert_eq!(el.pen().and_then(|p| p.fill), Some(Color::rgb(255, 0, 0)));
        assert_eq!(el.remove_attribute("fill"), Some("#f00".to_string()));
        assert_eq!(el.pen().and_then(|p| p.fill), None);
    }

    #[test]
    fn view_box_follows_attribute() {
        let mut el = element(RawNode::new("svg"));
        el.set_attribute("viewBox", "0 0 10 20");
        let ElementKind::Container(container) = el.kind() else {
            panic!("expected a container");
        };
        let ContainerKind::Svg { view_box } = container.kind() else {
            panic!("expected svg");
        };
        assert_eq!(view_box.map(|v| v.height), Some(20.0));
    }

    #[test]
    fn removing_id_clears_field() {
        let mut el = element(RawNode::new("g").attr("id", "layer"));
        assert_eq!(el.remove_attribute("id"), Some("layer".to_string()));
        assert_eq!(el.id(), "");
        assert_eq!(el.remove_attribute("id"), None);
    }

    #[test]
    fn rounded_rect_hits_through_its_outline() {
        let el = element(
            RawNode::new("rect")
                .attr("width", "10")
                .attr("height", "10")
                .attr("rx", "2")
                .attr("fill", "#000"),
        );
        assert!(el.contains(Point::new(5.0, 5.0)).is_err());
        assert!(el.is_hit(Point::new(5.0, 5.0)));
        assert!(!el.is_hit(Point::new(50.0, 5.0)));
    }
}
