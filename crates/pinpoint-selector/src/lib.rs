//! Selector candidate generation for the Pinpoint inspector.
//!
//! # Scope
//!
//! Given an element of a [`DomTree`], this crate synthesizes alternative CSS
//! selectors that target it, scores each with a 4-tuple specificity and
//! returns them highest first:
//!
//! - **Tree Context** - [`context::ElementContext`], a read-only view of the
//!   element, its parent, siblings and children
//! - **Specificity** - [`specificity_of`], a lexical approximation of
//!   [§ 17](https://www.w3.org/TR/selectors-4/#specificity-rules)
//! - **Generation** - [`Generator`], an ordered list of independent strategies
//! - **Ranking** - [`rank::rank`], a stable descending sort
//! - **Sessions** - [`InspectionSession`], caller-owned toggle/pin state
//!
//! # Not Implemented
//!
//! - Selector parsing or matching: generated selectors are never validated
//!   against the tree
//! - Escaping of identifiers that are not valid CSS idents
//!
//! ```
//! use pinpoint_dom::{DomTree, ElementData, NodeId};
//! use pinpoint_selector::generate;
//!
//! let mut tree = DomTree::new();
//! let div = tree.create_element(ElementData::new("div"));
//! tree.append_child(NodeId::ROOT, div);
//! let span = tree.create_element(ElementData::new("span").with_attr("id", "x"));
//! tree.append_child(div, span);
//!
//! let candidates = generate(&tree, span);
//! assert!(candidates.iter().any(|c| c.selector == "#x"));
//! ```

/// Candidate and parent-summary types.
pub mod candidate;
/// Read access to an element's neighbourhood.
pub mod context;
/// Strategy driver.
pub mod generator;
/// Candidate ordering.
pub mod rank;
/// Inspection toggle/pin state.
pub mod session;
/// Lexical specificity scoring.
pub mod specificity;

pub use candidate::{CandidateKind, ParentSummary, SelectorCandidate};
pub use generator::{Generator, GeneratorOptions};
pub use session::InspectionSession;
pub use specificity::{SpecificityTier, SpecificityWeight, specificity_of};

use pinpoint_dom::{DomTree, NodeId};

/// Ranked candidates for `node` with default options.
///
/// Shorthand for `Generator::new(tree).generate(node)`.
#[must_use]
pub fn generate(tree: &DomTree, node: NodeId) -> Vec<SelectorCandidate> {
    Generator::new(tree).generate(node)
}
