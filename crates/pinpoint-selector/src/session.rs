//! Per-caller inspection state.
//!
//! A session tracks whether inspection is switched on and whether the result
//! is pinned to one element. Each caller owns its own session; nothing here is
//! global, so several inspections can run side by side.

use pinpoint_dom::{DomTree, NodeId};

use crate::candidate::SelectorCandidate;
use crate::generator::{Generator, GeneratorOptions};

/// Toggle/pin state plus the options used for every generation.
#[derive(Debug, Clone, Default)]
pub struct InspectionSession {
    options: GeneratorOptions,
    active: bool,
    fixed: bool,
    selected: Option<NodeId>,
}

impl InspectionSession {
    /// An inactive session.
    #[must_use]
    pub fn new(options: GeneratorOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Whether inspection is switched on.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the result is pinned to [`Self::selected`].
    #[must_use]
    pub const fn is_fixed(&self) -> bool {
        self.fixed
    }

    /// The element most recently inspected.
    #[must_use]
    pub const fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    /// Switch inspection on or off and return the new state. Switching off
    /// unpins and forgets the selection.
    pub fn toggle(&mut self) -> bool {
        self.active = !self.active;
        if !self.active {
            self.fixed = false;
            self.selected = None;
        }
        self.active
    }

    /// Pointer moved onto `node`. Ignored while inactive or pinned.
    pub fn hover(&mut self, tree: &DomTree, node: NodeId) -> Option<Vec<SelectorCandidate>> {
        if !self.active || self.fixed {
            return None;
        }
        self.selected = Some(node);
        Some(self.generate(tree, node))
    }

    /// `node` was clicked: pins the result, or unpins when already pinned.
    pub fn click(&mut self, tree: &DomTree, node: NodeId) -> Option<Vec<SelectorCandidate>> {
        if !self.active {
            return None;
        }
        if self.fixed {
            self.fixed = false;
            return None;
        }
        self.fixed = true;
        self.selected = Some(node);
        Some(self.generate(tree, node))
    }

    /// Unpin when pinned, otherwise switch inspection off.
    pub fn escape(&mut self) {
        if !self.active {
            return;
        }
        if self.fixed {
            self.fixed = false;
        } else {
            let _ = self.toggle();
        }
    }

    fn generate(&self, tree: &DomTree, node: NodeId) -> Vec<SelectorCandidate> {
        Generator::new(tree)
            .with_options(self.options)
            .generate(node)
    }
}
