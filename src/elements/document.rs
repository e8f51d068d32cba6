//! The element tree of one document, stored as an arena.
//!
//! Traversals borrow the document immutably, so the tree cannot change while
//! a walk is running.

use std::collections::HashMap;

use super::{ContainerKind, Element, ElementId, ElementKind, RawNode};
use crate::log::{debug, trace};
use crate::parse::ViewBox;
use crate::types::{Point, Transform};

/// Which match a whole-tree hit test reports when shapes overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitOrder {
    /// First match in pre-order: ancestors and earlier siblings win.
    Outermost,
    /// Last painted match: later siblings and descendants win.
    #[default]
    Topmost,
}

#[derive(Debug)]
pub struct Document {
    elements: Vec<Element>,
    root: ElementId,
    ids: HashMap<String, ElementId>,
}

impl Document {
    /// Build the tree and index element ids. When an id repeats, the first
    /// element in document order keeps it.
    pub fn from_raw(root: &RawNode) -> Self {
        let mut document = Self {
            elements: Vec::new(),
            root: ElementId(0),
            ids: HashMap::new(),
        };
        document.root = document.insert(root, None);
        document.reindex();
        debug!(
            elements = document.elements.len(),
            ids = document.ids.len(),
            "document loaded"
        );
        document
    }

    fn insert(&mut self, node: &RawNode, parent: Option<ElementId>) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements.push(Element::from_raw(node, parent));

        if !self.elements[id.0].is_container() {
            if !node.children.is_empty() {
                debug!(tag = %node.tag, dropped = node.children.len(), "children of a leaf element");
            }
            return id;
        }

        let children: Vec<ElementId> = node.children.iter().map(|child| self.insert(child, Some(id))).collect();
        if let ElementKind::Container(container) = &mut self.elements[id.0].kind {
            container.children = children;
        }
        id
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// A document always has its root element.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0)
    }

    pub fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.ids.get(id).copied()
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.get(id).map(Element::children).unwrap_or_default()
    }

    /// Set an attribute on `id`, keeping the id index in step.
    pub fn set_attribute(&mut self, id: ElementId, key: &str, value: &str) -> bool {
        let Some(element) = self.elements.get_mut(id.0) else {
            return false;
        };
        element.set_attribute(key, value);
        if key == "id" {
            self.reindex();
        }
        true
    }

    pub fn remove_attribute(&mut self, id: ElementId, key: &str) -> Option<String> {
        let old = self.elements.get_mut(id.0)?.remove_attribute(key);
        if key == "id" {
            self.reindex();
        }
        old
    }

    fn reindex(&mut self) {
        let mut ids = HashMap::new();
        self.walk(|id, element| {
            if !element.id().is_empty() {
                ids.entry(element.id().to_string()).or_insert(id);
            }
        });
        self.ids = ids;
    }

    // ------------------------------------------------------------------
    // Traversal
    // ------------------------------------------------------------------

    /// Visit every element in pre-order: parents before children, children
    /// in document order.
    pub fn walk(&self, mut visit: impl FnMut(ElementId, &Element)) {
        self.walk_from(self.root, &mut visit);
    }

    fn walk_from(&self, id: ElementId, visit: &mut impl FnMut(ElementId, &Element)) {
        let element = &self.elements[id.0];
        visit(id, element);
        for &child in element.children() {
            self.walk_from(child, visit);
        }
    }

    /// True at the first element in pre-order that satisfies `pred`.
    pub fn any(&self, mut pred: impl FnMut(ElementId, &Element) -> bool) -> bool {
        self.traverse(self.root, false, &mut pred)
    }

    /// False at the first element in pre-order that fails `pred`.
    pub fn all(&self, mut pred: impl FnMut(ElementId, &Element) -> bool) -> bool {
        self.traverse(self.root, true, &mut pred)
    }

    /// Pre-order search that stops when `pred` returns anything other than
    /// `expect`. `any` expects false, `all` expects true.
    fn traverse(&self, id: ElementId, expect: bool, pred: &mut impl FnMut(ElementId, &Element) -> bool) -> bool {
        let element = &self.elements[id.0];
        if pred(id, element) != expect {
            return !expect;
        }
        for &child in element.children() {
            if self.traverse(child, expect, pred) != expect {
                return !expect;
            }
        }
        expect
    }

    /// The first element `pred` accepts, searching in `order`.
    pub fn find(&self, order: HitOrder, mut pred: impl FnMut(ElementId, &Element) -> bool) -> Option<ElementId> {
        match order {
            HitOrder::Outermost => {
                let mut found = None;
                self.any(|id, element| {
                    let hit = pred(id, element);
                    if hit {
                        found = Some(id);
                    }
                    hit
                });
                found
            }
            HitOrder::Topmost => self.find_topmost(self.root, &mut pred),
        }
    }

    /// Reverse paint order: last child first, descendants before their
    /// container.
    fn find_topmost(&self, id: ElementId, pred: &mut impl FnMut(ElementId, &Element) -> bool) -> Option<ElementId> {
        let element = &self.elements[id.0];
        for &child in element.children().iter().rev() {
            if let Some(found) = self.find_topmost(child, pred) {
                return Some(found);
            }
        }
        pred(id, element).then_some(id)
    }

    /// The element under `point`, given in document (root user) coordinates.
    pub fn hit_test(&self, point: Point, order: HitOrder) -> Option<ElementId> {
        let hit = self.find(order, |_, element| element.is_hit(point));
        trace!(?hit, %point, ?order, "hit test");
        hit
    }

    // ------------------------------------------------------------------
    // Viewport
    // ------------------------------------------------------------------

    /// The root `<svg>` viewBox, if it has one.
    pub fn view_box(&self) -> Option<ViewBox> {
        match &self.elements[self.root.0].kind {
            ElementKind::Container(container) => match container.kind() {
                ContainerKind::Svg { view_box } => view_box,
                ContainerKind::Group | ContainerKind::Link => None,
            },
            ElementKind::Graphic(_) | ElementKind::Unknown(_) => None,
        }
    }

    /// Map document coordinates into a `width` x `height` viewport: the
    /// viewBox is scaled uniformly to fit and its origin moves to (0, 0).
    /// Identity without a usable viewBox.
    pub fn root_transform(&self, width: f64, height: f64) -> Transform {
        let Some(view_box) = self.view_box().filter(|v| !v.is_empty()) else {
            return Transform::IDENTITY;
        };
        let scale = (width / view_box.width).min(height / view_box.height);
        Transform::scale(scale, scale) * Transform::translation(-view_box.min_x, -view_box.min_y)
    }
}
