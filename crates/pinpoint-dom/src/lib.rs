//! Document tree inspected by the Pinpoint selector engine.
//!
//! # Scope
//!
//! A flat arena of nodes addressed by [`NodeId`]. Parent, child and
//! previous-sibling links are indices into the arena, so readers such as the
//! selector engine hold `&DomTree` plus a handle and never own a node.
//!
//! Implemented from the [DOM Living Standard](https://dom.spec.whatwg.org/):
//!
//! - **Node tree** - document, element, text and comment nodes
//! - **Element views** - `children`, `parentElement`,
//!   `previousElementSibling`, `getElementById`, descendant text content
//! - **HTML document accessors** - the document element and the body element
//!
//! # Not Implemented
//!
//! - Removal, insertion before a reference node, or any other mutation past
//!   building
//! - Namespaces, shadow trees, doctype nodes

mod attributes;

pub use attributes::Attributes;

/// Handle for a node in a [`DomTree`].
///
/// Handles stay valid for the tree that issued them. Looking up a handle from
/// another tree returns `None` or an unrelated node, never undefined behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The document node, allocated by [`DomTree::new`].
    pub const ROOT: Self = Self(0);
}

/// What a node is.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "DocumentType, Element, Text, ProcessingInstruction, and Comment objects
/// (simply called nodes) participate in a tree."
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// The tree root.
    Document,
    /// An element with its tag and attributes.
    Element(ElementData),
    /// Character data.
    Text(String),
    /// A comment, kept so child indices match the source.
    Comment(String),
}

/// One arena slot: the node's kind plus its links.
#[derive(Debug, Clone)]
pub struct Node {
    /// What this node is.
    pub kind: NodeKind,
    parent: Option<NodeId>,
    prev_sibling: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    const fn orphan(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            prev_sibling: None,
            children: Vec::new(),
        }
    }
}

/// Elements that cannot host generated content: the HTML void elements plus
/// replaced elements whose rendering comes from outside the document.
const VOID_LIKE_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr", "audio", "canvas", "iframe", "object", "video",
];

/// [§ 4.10.18.1 Form-associated elements](https://html.spec.whatwg.org/multipage/forms.html#categories)
/// restricted to the controls that carry user state.
const FORM_CONTROL_TAGS: &[&str] = &["input", "select", "textarea", "button"];

/// Tag name and attributes of an element.
///
/// NOTE: Only what selectors can see is stored. Namespaces and custom element
/// state are not modelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Tag name as the parser produced it.
    pub tag_name: String,
    /// Attributes in source order.
    pub attrs: Attributes,
}

impl ElementData {
    /// Element with no attributes.
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attrs: Attributes::new(),
        }
    }

    /// Builder-style attribute setter.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.attrs.insert(name, value);
        self
    }

    /// The tag name lower-cased, as used in selectors.
    #[must_use]
    pub fn local_name(&self) -> String {
        self.tag_name.to_ascii_lowercase()
    }

    /// The `id` attribute, unless missing or empty.
    ///
    /// [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes)
    /// "The value must not contain any ASCII whitespace" and "must contain at
    /// least one character".
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attrs.get("id").filter(|id| !id.is_empty())
    }

    /// Class tokens in source order, empties dropped.
    #[must_use]
    pub fn classes(&self) -> Vec<&str> {
        self.attrs
            .get("class")
            .map(|list| list.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// `<a>`
    #[must_use]
    pub fn is_anchor(&self) -> bool {
        self.tag_name.eq_ignore_ascii_case("a")
    }

    /// `<input>`
    #[must_use]
    pub fn is_input(&self) -> bool {
        self.tag_name.eq_ignore_ascii_case("input")
    }

    /// `<input>`, `<select>`, `<textarea>` or `<button>`.
    #[must_use]
    pub fn is_form_control(&self) -> bool {
        FORM_CONTROL_TAGS
            .iter()
            .any(|tag| self.tag_name.eq_ignore_ascii_case(tag))
    }

    /// An `<input>` whose type is `checkbox` or `radio`.
    ///
    /// [§ 4.10.5.1.15 Checkbox state](https://html.spec.whatwg.org/multipage/input.html#checkbox-state-(type=checkbox))
    /// "The type attribute's value is an ASCII case-insensitive match"
    #[must_use]
    pub fn is_checkable_input(&self) -> bool {
        self.is_input()
            && self.attrs.get("type").is_some_and(|ty| {
                ty.eq_ignore_ascii_case("checkbox") || ty.eq_ignore_ascii_case("radio")
            })
    }

    /// Void or replaced element: no `::before`/`::after` boxes are generated.
    #[must_use]
    pub fn is_void_like(&self) -> bool {
        VOID_LIKE_TAGS
            .iter()
            .any(|tag| self.tag_name.eq_ignore_ascii_case(tag))
    }
}

/// Arena of nodes. Index 0 is always the document.
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// A tree holding only the document node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::orphan(NodeKind::Document)],
        }
    }

    /// The slot behind `id`.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Number of allocated nodes, the document included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: the document node exists from construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(Node::orphan(kind));
        NodeId(self.nodes.len() - 1)
    }

    /// Allocate an element not yet in the tree.
    pub fn create_element(&mut self, element: ElementData) -> NodeId {
        self.alloc(NodeKind::Element(element))
    }

    /// Allocate a text node not yet in the tree.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(NodeKind::Text(text.into()))
    }

    /// Allocate a comment node not yet in the tree.
    pub fn create_comment(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(NodeKind::Comment(text.into()))
    }

    /// Make `child` the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if either handle was not issued by this tree.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let previous = self.nodes[parent.0].children.last().copied();
        self.nodes[parent.0].children.push(child);

        let node = &mut self.nodes[child.0];
        node.parent = Some(parent);
        node.prev_sibling = previous;
    }

    /// Parent node of any kind.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent
    }

    /// Children of any kind, in order. Empty for unknown handles.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    /// Immediately preceding sibling of any kind.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.prev_sibling
    }

    /// The element data, when `id` is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        match &self.get(id)?.kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    /// The character data, when `id` is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        match &self.get(id)?.kind {
            NodeKind::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Whether `id` is an element.
    #[must_use]
    pub fn is_element(&self, id: NodeId) -> bool {
        self.as_element(id).is_some()
    }

    /// [§ 4.2.6 Mixin ParentNode](https://dom.spec.whatwg.org/#dom-parentnode-children)
    ///
    /// "The children getter steps are to return an HTMLCollection collection
    /// rooted at this matching only element children."
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|&child| self.is_element(child))
    }

    /// [§ 4.4](https://dom.spec.whatwg.org/#parent-element)
    ///
    /// "A node's parent element is its parent if that is an element, and null otherwise."
    #[must_use]
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id).filter(|&parent| self.is_element(parent))
    }

    /// [§ 4.2.7 Mixin NonDocumentTypeChildNode](https://dom.spec.whatwg.org/#dom-nondocumenttypechildnode-previouselementsibling)
    ///
    /// "The previousElementSibling getter steps are to return the first preceding
    /// sibling that is an element; otherwise null."
    #[must_use]
    pub fn previous_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        std::iter::successors(self.prev_sibling(id), |&sibling| self.prev_sibling(sibling))
            .find(|&sibling| self.is_element(sibling))
    }

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-descendant-text-content)
    ///
    /// "The descendant text content of a node node is the concatenation of the
    /// data of all the Text node descendants of node, in tree order."
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut text = String::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(data) = self.as_text(current) {
                text.push_str(data);
            } else if current == id || self.is_element(current) {
                stack.extend(self.children(current).iter().rev());
            }
        }
        text
    }

    /// Element descendants of `id` in tree order, `id` excluded.
    #[must_use]
    pub fn descendant_elements(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            if self.is_element(current) {
                out.push(current);
                stack.extend(self.children(current).iter().rev());
            }
        }
        out
    }

    /// [§ 4.2.4 Mixin NonElementParentNode](https://dom.spec.whatwg.org/#dom-nonelementparentnode-getelementbyid)
    ///
    /// "The getElementById(elementId) method steps are to return the first element,
    /// in tree order, within this's descendants, whose ID is elementId"
    #[must_use]
    pub fn find_by_id(&self, element_id: &str) -> Option<NodeId> {
        self.descendant_elements(NodeId::ROOT)
            .into_iter()
            .find(|&id| self.as_element(id).and_then(ElementData::id) == Some(element_id))
    }

    /// Follow zero-based element-child indices down from the document
    /// element. An empty path is the document element itself.
    #[must_use]
    pub fn element_at_path(&self, path: &[usize]) -> Option<NodeId> {
        path.iter().try_fold(self.document_element()?, |current, &index| {
            self.element_children(current).nth(index)
        })
    }

    /// Inverse of [`Self::element_at_path`]. `None` for nodes that are not
    /// the document element or one of its element descendants.
    #[must_use]
    pub fn path_of(&self, id: NodeId) -> Option<Vec<usize>> {
        let html = self.document_element()?;
        let mut path = Vec::new();
        let mut current = id;
        while current != html {
            let parent = self.parent_element(current)?;
            let index = self.element_children(parent).position(|child| child == current)?;
            path.push(index);
            current = parent;
        }
        path.reverse();
        Some(path)
    }

    /// [§ 3.1.1 The document element](https://html.spec.whatwg.org/multipage/dom.html#the-html-element-2)
    ///
    /// "The html element of a document is its document element, if it's an
    /// html element, and null otherwise."
    ///
    /// NOTE: Any element child of the document is accepted, so fragment trees
    /// built by hand still have a root.
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.element_children(NodeId::ROOT).next()
    }

    /// [§ 3.1.3 The body element](https://html.spec.whatwg.org/multipage/dom.html#the-body-element-2)
    ///
    /// "The body element of a document is the first of the html element's
    /// children that is either a body element or a frameset element, or null
    /// if there is no such element."
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        let html = self.document_element()?;
        self.element_children(html).find(|&child| {
            self.as_element(child).is_some_and(|element| {
                let tag = element.tag_name.as_str();
                tag.eq_ignore_ascii_case("body") || tag.eq_ignore_ascii_case("frameset")
            })
        })
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}
