//! Terminal and JSON rendering of generated candidates.

use std::fmt::{Display, Write as _};

use owo_colors::{OwoColorize, Style};
use pinpoint_dom::{DomTree, NodeId};
use pinpoint_selector::{Generator, SelectorCandidate, SpecificityTier, SpecificityWeight};
use serde::Serialize;

/// Width of the type label column.
const LABEL_WIDTH: usize = 28;

/// Terminal styling. Everything renders as plain text when disabled.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// Colour on or off.
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn paint(self, text: &impl Display, style: Style) -> String {
        if self.enabled {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    fn tier_style(tier: SpecificityTier) -> Style {
        match tier {
            SpecificityTier::VeryHigh => Style::new().red().bold(),
            SpecificityTier::High => Style::new().red(),
            SpecificityTier::Medium => Style::new().yellow(),
            SpecificityTier::Low => Style::new().green(),
            SpecificityTier::VeryLow => Style::new().cyan(),
        }
    }

    /// `(0,1,2,0) medium`, coloured by tier.
    #[must_use]
    pub fn weight(self, weight: SpecificityWeight) -> String {
        let tier = weight.tier();
        format!(
            "{} {}",
            self.paint(&weight, Self::tier_style(tier)),
            self.paint(&tier, Style::new().dimmed())
        )
    }
}

/// Candidates for one element.
#[derive(Debug, Serialize)]
pub struct ElementReport {
    /// Slash-separated element-child indices from `<html>`.
    pub path: Option<String>,
    /// `tag#id.class` label.
    pub element: String,
    /// Ranked candidates.
    pub candidates: Vec<SelectorCandidate>,
}

impl ElementReport {
    /// Generate candidates for `node`.
    #[must_use]
    pub fn new(tree: &DomTree, generator: &Generator<'_>, node: NodeId) -> Self {
        let path = tree.path_of(node).map(|indices| {
            indices
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("/")
        });
        Self {
            path,
            element: element_label(tree, node),
            candidates: generator.generate(node),
        }
    }

    /// Numbered candidate list, highest specificity first.
    #[must_use]
    pub fn render(&self, palette: Palette) -> String {
        let mut out = String::new();
        let header = match &self.path {
            Some(path) if !path.is_empty() => format!("=== {} ({path}) ===", self.element),
            _ => format!("=== {} ===", self.element),
        };
        let _ = writeln!(out, "{}", palette.paint(&header, Style::new().bold()));

        if let Some(parent) = self.candidates.first().and_then(|c| c.parent.as_ref()) {
            let mut line = format!("parent: {parent}");
            if !parent.attributes.is_empty() {
                let _ = write!(line, "  {}", parent.attributes.join(" "));
            }
            let _ = writeln!(out, "{}", palette.paint(&line, Style::new().dimmed()));
        }

        for (rank, candidate) in self.candidates.iter().enumerate() {
            let kind = candidate.kind.to_string();
            let label = format!("{kind:<width$}", width = LABEL_WIDTH);
            let _ = writeln!(
                out,
                "{:>3}. {} {}",
                rank + 1,
                palette.paint(&label, Style::new().magenta()),
                palette.weight(candidate.specificity)
            );
            let _ = writeln!(out, "     {}", palette.paint(&candidate.selector, Style::new().bold()));
            let _ = writeln!(out, "     {}", candidate.description);
        }
        out.push('\n');
        out
    }
}

fn element_label(tree: &DomTree, node: NodeId) -> String {
    let Some(element) = tree.as_element(node) else {
        return String::from("#node");
    };
    let mut label = element.local_name();
    if let Some(id) = element.id() {
        let _ = write!(label, "#{id}");
    }
    for class in element.classes() {
        let _ = write!(label, ".{class}");
    }
    label
}
