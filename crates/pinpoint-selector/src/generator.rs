//! Candidate generation.
//!
//! Every strategy looks at one [`ElementContext`] and either pushes candidates
//! or declines silently. Strategies run in the fixed order of [`STRATEGIES`];
//! that emission order is what the ranker falls back to on equal weights.

use std::fmt::Write as _;

use pinpoint_dom::{DomTree, NodeId};

use crate::candidate::{CandidateKind, SelectorCandidate};
use crate::context::ElementContext;
use crate::rank::{dedupe, rank};
use crate::specificity::{SpecificityWeight, specificity_of};

/// Caller-chosen knobs for a generation request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Drop candidates whose selector text repeats an earlier candidate in
    /// ranked order. Off by default: different strategies may legitimately
    /// arrive at the same text.
    pub dedupe: bool,
}

/// Produces ranked [`SelectorCandidate`]s for elements of one tree.
#[derive(Debug, Clone, Copy)]
pub struct Generator<'a> {
    tree: &'a DomTree,
    boundary: Option<NodeId>,
    options: GeneratorOptions,
}

impl<'a> Generator<'a> {
    /// Generator whose boundary is `<body>`, or the document element when
    /// there is no body.
    #[must_use]
    pub fn new(tree: &'a DomTree) -> Self {
        Self {
            tree,
            boundary: tree.body().or_else(|| tree.document_element()),
            options: GeneratorOptions::default(),
        }
    }

    /// Override the tree root sentinel. `None` lets walks reach `<html>`.
    #[must_use]
    pub const fn with_boundary(mut self, boundary: Option<NodeId>) -> Self {
        self.boundary = boundary;
        self
    }

    /// Replace the options.
    #[must_use]
    pub const fn with_options(mut self, options: GeneratorOptions) -> Self {
        self.options = options;
        self
    }

    /// The sentinel in effect.
    #[must_use]
    pub const fn boundary(&self) -> Option<NodeId> {
        self.boundary
    }

    /// Run every strategy against `node` and rank the result.
    ///
    /// Returns an empty list when `node` is not an element. For any element
    /// the list holds at least the basic and full-path candidates.
    #[must_use]
    pub fn generate(&self, node: NodeId) -> Vec<SelectorCandidate> {
        let Some(context) = ElementContext::new(self.tree, node, self.boundary) else {
            tracing::debug!(node = node.0, "not an element, no selectors generated");
            return Vec::new();
        };

        let mut sink = Sink {
            context: &context,
            basic: context.basic_selector(),
            tag: context.tag(),
            candidates: Vec::new(),
        };
        for (name, strategy) in STRATEGIES {
            let before = sink.candidates.len();
            strategy(&mut sink);
            if sink.candidates.len() == before {
                tracing::trace!(strategy = name, "strategy declined");
            }
        }

        let mut candidates = rank(sink.candidates);
        if self.options.dedupe {
            candidates = dedupe(candidates);
        }
        tracing::debug!(
            node = node.0,
            candidates = candidates.len(),
            "generated selector candidates"
        );
        candidates
    }
}

/// Accumulates candidates for one element.
struct Sink<'c, 'a> {
    context: &'c ElementContext<'a>,
    basic: String,
    tag: String,
    candidates: Vec<SelectorCandidate>,
}

impl Sink<'_, '_> {
    fn push(&mut self, kind: CandidateKind, selector: String, description: impl Into<String>) {
        let specificity = specificity_of(&selector);
        self.push_weighted(kind, selector, description, specificity);
    }

    fn push_weighted(
        &mut self,
        kind: CandidateKind,
        selector: String,
        description: impl Into<String>,
        specificity: SpecificityWeight,
    ) {
        self.candidates.push(SelectorCandidate {
            kind,
            selector,
            description: description.into(),
            specificity,
            parent: self.context.parent_summary(),
        });
    }

    /// `basic` followed by a pseudo-class.
    fn push_state(&mut self, kind: CandidateKind, pseudo: &str, description: &str) {
        let selector = format!("{}:{pseudo}", self.basic);
        self.push(kind, selector, description);
    }
}

type Strategy = fn(&mut Sink<'_, '_>);

/// All strategies, in emission order.
const STRATEGIES: &[(&str, Strategy)] = &[
    ("basic", basic),
    ("full-path", full_path),
    ("attributes", data_attributes),
    ("nth-child", nth_child),
    ("pseudo-elements", pseudo_elements),
    ("hover", hover),
    ("visited", visited),
    ("via-parent", via_parent),
    ("direct-child", direct_child),
    ("adjacent-sibling", adjacent_sibling),
    ("has", has_child),
    ("not-sibling", not_sibling),
    ("not-class", not_class),
    ("where", where_zero),
    ("is", is_parent),
    ("nth-of-type", nth_of_type),
    ("child-position", child_position),
    ("empty", empty),
    ("form-control", form_control),
    ("input", input_state),
];

fn basic(sink: &mut Sink<'_, '_>) {
    let selector = sink.basic.clone();
    sink.push(
        CandidateKind::Basic,
        selector,
        "Simple selector by tag, class or id",
    );
}

fn full_path(sink: &mut Sink<'_, '_>) {
    let selector = full_path_selector(sink.context);
    sink.push(
        CandidateKind::FullPath,
        selector,
        "Full path from the document root",
    );
}

/// Levels from the boundary (exclusive) down to the element, joined by
/// descendant combinators. The walk stops at the first id, and never climbs
/// past the boundary even when the element is the boundary itself.
fn full_path_selector(context: &ElementContext<'_>) -> String {
    let mut levels: Vec<String> = Vec::new();
    let mut current = Some(*context);

    while let Some(level) = current {
        if !levels.is_empty() && level.is_boundary() {
            break;
        }
        if let Some(id) = level.id() {
            levels.push(format!("#{id}"));
            break;
        }

        let mut segment = level.tag();
        for class in level.classes() {
            segment.push('.');
            segment.push_str(class);
        }
        let same_tag = level.same_tag_siblings();
        if same_tag.len() > 1 {
            if let Some(index) = same_tag.iter().position(|s| s.node() == level.node()) {
                let _ = write!(segment, ":nth-of-type({})", index + 1);
            }
        }
        levels.push(segment);

        if level.is_boundary() {
            break;
        }
        current = level.parent();
    }

    levels.reverse();
    levels.join(" ")
}

fn data_attributes(sink: &mut Sink<'_, '_>) {
    let attributes: String = sink
        .context
        .attributes()
        .filter(|(name, _)| name.starts_with("data-"))
        .map(|(name, value)| format!("[{name}=\"{value}\"]"))
        .collect();
    if attributes.is_empty() {
        return;
    }
    let selector = format!("{}{attributes}", sink.tag);
    sink.push(
        CandidateKind::Attributes,
        selector,
        "Based on the element's data attributes",
    );
}

fn nth_child(sink: &mut Sink<'_, '_>) {
    let selector = match sink.context.parent() {
        Some(parent) => format!(
            "{} > :nth-child({})",
            parent.tag(),
            sink.context.position()
        ),
        None => sink.tag.clone(),
    };
    sink.push(
        CandidateKind::NthChild,
        selector,
        "Position relative to the parent",
    );
}

fn pseudo_elements(sink: &mut Sink<'_, '_>) {
    if sink.context.element().is_void_like() {
        return;
    }
    let before = format!("{}::before", sink.basic);
    sink.push(
        CandidateKind::Before,
        before,
        "Pseudo-element before the content",
    );
    let after = format!("{}::after", sink.basic);
    sink.push(
        CandidateKind::After,
        after,
        "Pseudo-element after the content",
    );
}

fn hover(sink: &mut Sink<'_, '_>) {
    sink.push_state(CandidateKind::Hover, "hover", "State while hovered");
}

fn visited(sink: &mut Sink<'_, '_>) {
    if sink.context.element().is_anchor() {
        sink.push_state(CandidateKind::Visited, "visited", "Link already visited");
    }
}

fn via_parent(sink: &mut Sink<'_, '_>) {
    let Some(parent) = sink.context.scoped_parent() else {
        return;
    };
    let selector = format!("{} {}", parent.basic_selector(), sink.tag);
    sink.push(
        CandidateKind::ViaParent,
        selector,
        "Targets the element through its parent",
    );
}

fn direct_child(sink: &mut Sink<'_, '_>) {
    let Some(parent) = sink.context.scoped_parent() else {
        return;
    };
    let selector = format!("{} > {}", parent.basic_selector(), sink.tag);
    sink.push(
        CandidateKind::DirectChild,
        selector,
        "Direct child of the parent",
    );
}

fn adjacent_sibling(sink: &mut Sink<'_, '_>) {
    let Some(previous) = sink.context.previous_sibling() else {
        return;
    };
    let selector = format!("{} + {}", previous.basic_selector(), sink.tag);
    sink.push(
        CandidateKind::AdjacentSibling,
        selector,
        "Element directly following a sibling",
    );
}

fn has_child(sink: &mut Sink<'_, '_>) {
    let Some(first) = sink.context.children().into_iter().next() else {
        return;
    };

    let child_basic = first.basic_selector();
    let selector = format!("{}:has({child_basic})", sink.tag);
    sink.push(
        CandidateKind::HasChild,
        selector,
        format!("Element containing {child_basic}"),
    );

    let child_tag = first.tag();
    let selector = format!("{}:has({child_tag})", sink.tag);
    sink.push(
        CandidateKind::HasTag,
        selector,
        format!("Element containing a {child_tag}"),
    );
}

fn not_sibling(sink: &mut Sink<'_, '_>) {
    let node = sink.context.node();
    let Some(other) = sink
        .context
        .siblings()
        .into_iter()
        .find(|sibling| sibling.node() != node)
    else {
        return;
    };
    let other_basic = other.basic_selector();
    let selector = format!("{}:not({other_basic})", sink.tag);
    let description = format!("{} that is not {other_basic}", sink.tag);
    sink.push(CandidateKind::NotSibling, selector, description);
}

fn not_class(sink: &mut Sink<'_, '_>) {
    let classes = sink.context.classes();
    let Some(second) = classes.get(1) else {
        return;
    };
    let selector = format!("{}:not(.{second})", sink.tag);
    let description = format!("{} without the class {second}", sink.tag);
    sink.push(CandidateKind::NotClass, selector, description);
}

fn where_zero(sink: &mut Sink<'_, '_>) {
    let selector = format!(":where({})", sink.basic);
    sink.push_weighted(
        CandidateKind::Where,
        selector,
        "Zero-specificity selector (lowest priority)",
        SpecificityWeight::ZERO,
    );
}

fn is_parent(sink: &mut Sink<'_, '_>) {
    let Some(parent) = sink.context.parent() else {
        return;
    };
    let selector = format!(":is({}) {}", parent.basic_selector(), sink.tag);
    sink.push(CandidateKind::Is, selector, "Modern equivalent selector");
}

fn nth_of_type(sink: &mut Sink<'_, '_>) {
    let node = sink.context.node();
    let same_tag = sink.context.same_tag_siblings();
    if same_tag.len() < 2 {
        return;
    }
    let Some(index) = same_tag.iter().position(|s| s.node() == node) else {
        return;
    };
    let position = index + 1;
    let selector = format!("{}:nth-of-type({position})", sink.tag);
    let description = format!("{} number {position} of its type in the parent", sink.tag);
    sink.push(CandidateKind::NthOfType, selector, description);
}

fn child_position(sink: &mut Sink<'_, '_>) {
    let node = sink.context.node();
    let siblings = sink.context.siblings();
    match siblings.as_slice() {
        [only] if only.node() == node => {
            sink.push_state(
                CandidateKind::OnlyChild,
                "only-child",
                "Only child of its parent",
            );
        }
        [first, .., last] => {
            if first.node() == node {
                sink.push_state(
                    CandidateKind::FirstChild,
                    "first-child",
                    "First child of its parent",
                );
            }
            if last.node() == node {
                sink.push_state(
                    CandidateKind::LastChild,
                    "last-child",
                    "Last child of its parent",
                );
            }
        }
        _ => {}
    }
}

fn empty(sink: &mut Sink<'_, '_>) {
    if sink.context.children().is_empty() && !sink.context.has_text() {
        sink.push_state(CandidateKind::Empty, "empty", "Element without content");
    }
}

fn form_control(sink: &mut Sink<'_, '_>) {
    if !sink.context.element().is_form_control() {
        return;
    }
    sink.push_state(
        CandidateKind::Disabled,
        "disabled",
        "Disabled form control",
    );
    sink.push_state(CandidateKind::Enabled, "enabled", "Enabled form control");
    sink.push_state(CandidateKind::Focus, "focus", "Control that has focus");

    if let Some(parent) = sink.context.parent() {
        let selector = format!("{}:focus-within {}", parent.basic_selector(), sink.tag);
        sink.push(
            CandidateKind::FocusWithin,
            selector,
            "Child of an element that contains focus",
        );
    }
}

fn input_state(sink: &mut Sink<'_, '_>) {
    let element = sink.context.element();
    if !element.is_input() {
        return;
    }
    if element.is_checkable_input() {
        sink.push_state(
            CandidateKind::Checked,
            "checked",
            "Checked input (checkbox or radio)",
        );
    }
    sink.push_state(CandidateKind::Required, "required", "Required field");
    sink.push_state(CandidateKind::Optional, "optional", "Optional field");
    sink.push_state(CandidateKind::Valid, "valid", "Field with a valid value");
    sink.push_state(
        CandidateKind::Invalid,
        "invalid",
        "Field with an invalid value",
    );
}
