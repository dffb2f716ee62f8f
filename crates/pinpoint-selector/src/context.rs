//! Read-only view of an element and its neighbourhood.
//!
//! An [`ElementContext`] is a borrowed handle: it is rebuilt from the tree on
//! every generation request and never outlives the `&DomTree` it reads.

use pinpoint_dom::{DomTree, ElementData, NodeId};

use crate::candidate::ParentSummary;

/// Attributes worth showing in a [`ParentSummary`] besides `data-*`.
const SUMMARY_ATTRIBUTES: &[&str] = &["type", "role", "aria-label"];

/// Upper bound on [`ParentSummary::attributes`].
const SUMMARY_ATTRIBUTE_LIMIT: usize = 3;

/// An element plus the tree it lives in.
///
/// `boundary` is the tree root sentinel: the element where upward walks stop
/// and which is never used as a scoping parent.
#[derive(Debug, Clone, Copy)]
pub struct ElementContext<'a> {
    tree: &'a DomTree,
    node: NodeId,
    element: &'a ElementData,
    boundary: Option<NodeId>,
}

impl<'a> ElementContext<'a> {
    /// `None` when `node` is not an element.
    #[must_use]
    pub fn new(tree: &'a DomTree, node: NodeId, boundary: Option<NodeId>) -> Option<Self> {
        let element = tree.as_element(node)?;
        Some(Self {
            tree,
            node,
            element,
            boundary,
        })
    }

    fn at(&self, node: NodeId) -> Option<Self> {
        Self::new(self.tree, node, self.boundary)
    }

    /// The element's node handle.
    #[must_use]
    pub const fn node(&self) -> NodeId {
        self.node
    }

    /// The underlying element data.
    #[must_use]
    pub const fn element(&self) -> &'a ElementData {
        self.element
    }

    /// Lower-cased tag name.
    #[must_use]
    pub fn tag(&self) -> String {
        self.element.local_name()
    }

    /// Non-empty id.
    #[must_use]
    pub fn id(&self) -> Option<&'a str> {
        self.element.id()
    }

    /// Class tokens in source order.
    #[must_use]
    pub fn classes(&self) -> Vec<&'a str> {
        self.element.classes()
    }

    /// Attributes other than `id` and `class`, in source order.
    pub fn attributes(&self) -> impl Iterator<Item = (&'a str, &'a str)> + use<'a> {
        let element = self.element;
        element
            .attrs
            .iter()
            .filter(|(name, _)| *name != "id" && *name != "class")
    }

    /// Whether this element is the tree root sentinel.
    #[must_use]
    pub fn is_boundary(&self) -> bool {
        self.boundary == Some(self.node)
    }

    /// Whether this element is the document element (`<html>`).
    #[must_use]
    pub fn is_document_element(&self) -> bool {
        self.tree.document_element() == Some(self.node)
    }

    /// Parent element, whatever it is.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.tree
            .parent_element(self.node)
            .and_then(|parent| self.at(parent))
    }

    /// Parent element unless it is the tree root sentinel.
    #[must_use]
    pub fn scoped_parent(&self) -> Option<Self> {
        self.parent().filter(|parent| !parent.is_boundary())
    }

    /// Closest preceding element sibling.
    #[must_use]
    pub fn previous_sibling(&self) -> Option<Self> {
        self.tree
            .previous_element_sibling(self.node)
            .and_then(|sibling| self.at(sibling))
    }

    /// Element children in order.
    #[must_use]
    pub fn children(&self) -> Vec<Self> {
        self.tree
            .element_children(self.node)
            .filter_map(|child| self.at(child))
            .collect()
    }

    /// The parent's element children, this element included. Empty without a
    /// parent element.
    #[must_use]
    pub fn siblings(&self) -> Vec<Self> {
        self.parent()
            .map(|parent| parent.children())
            .unwrap_or_default()
    }

    /// 1-based position among [`Self::siblings`]; 1 without a parent.
    #[must_use]
    pub fn position(&self) -> usize {
        self.siblings()
            .iter()
            .position(|sibling| sibling.node == self.node)
            .map_or(1, |index| index + 1)
    }

    /// Siblings sharing this element's tag, this element included.
    #[must_use]
    pub fn same_tag_siblings(&self) -> Vec<Self> {
        self.siblings()
            .into_iter()
            .filter(|sibling| {
                sibling
                    .element
                    .tag_name
                    .eq_ignore_ascii_case(&self.element.tag_name)
            })
            .collect()
    }

    /// Whether any descendant text is more than whitespace.
    #[must_use]
    pub fn has_text(&self) -> bool {
        !self.tree.text_content(self.node).trim().is_empty()
    }

    /// `#id`, else `.a.b`, else the tag.
    #[must_use]
    pub fn basic_selector(&self) -> String {
        if let Some(id) = self.id() {
            return format!("#{id}");
        }
        let classes = self.classes();
        if classes.is_empty() {
            self.tag()
        } else {
            format!(".{}", classes.join("."))
        }
    }

    /// Summary of this element as a parent.
    #[must_use]
    pub fn summary(&self) -> ParentSummary {
        let classes: Vec<String> = self.classes().into_iter().map(str::to_string).collect();
        let attributes = self
            .attributes()
            .filter(|(name, _)| name.starts_with("data-") || SUMMARY_ATTRIBUTES.contains(name))
            .take(SUMMARY_ATTRIBUTE_LIMIT)
            .map(|(name, value)| format!("{name}=\"{value}\""))
            .collect();
        ParentSummary {
            tag: self.tag(),
            id: self.id().map(str::to_string),
            classes: (!classes.is_empty()).then_some(classes),
            attributes,
        }
    }

    /// Summary of the parent element, or `None` when there is none or it is
    /// the sentinel or `<html>`.
    #[must_use]
    pub fn parent_summary(&self) -> Option<ParentSummary> {
        self.parent()
            .filter(|parent| !parent.is_boundary() && !parent.is_document_element())
            .map(|parent| parent.summary())
    }
}
