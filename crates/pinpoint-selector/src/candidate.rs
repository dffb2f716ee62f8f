//! Generated selector candidates and the metadata they carry.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::specificity::SpecificityWeight;

/// Which strategy produced a candidate. `Display` is the human-readable
/// type label shown next to the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum CandidateKind {
    /// `#id`, `.a.b` or `tag`.
    #[strum(to_string = "Basic")]
    Basic,
    /// Levels from the document root down to the element.
    #[strum(to_string = "Full path")]
    FullPath,
    /// `tag[data-x="v"]`.
    #[strum(to_string = "By attributes")]
    Attributes,
    /// `parent > :nth-child(n)`.
    #[strum(to_string = "nth-child")]
    NthChild,
    /// `basic::before`.
    #[strum(to_string = "Pseudo ::before")]
    Before,
    /// `basic::after`.
    #[strum(to_string = "Pseudo ::after")]
    After,
    /// `basic:hover`.
    #[strum(to_string = "Hover")]
    Hover,
    /// `basic:visited`.
    #[strum(to_string = "Visited link")]
    Visited,
    /// `parent tag`.
    #[strum(to_string = "Via parent")]
    ViaParent,
    /// `parent > tag`.
    #[strum(to_string = "Direct child")]
    DirectChild,
    /// `previous + tag`.
    #[strum(to_string = "Adjacent sibling")]
    AdjacentSibling,
    /// `tag:has(child)`.
    #[strum(to_string = ":has() - contains child")]
    HasChild,
    /// `tag:has(childTag)`.
    #[strum(to_string = ":has() - contains tag")]
    HasTag,
    /// `tag:not(sibling)`.
    #[strum(to_string = ":not() - excludes sibling")]
    NotSibling,
    /// `tag:not(.class)`.
    #[strum(to_string = ":not() - without class")]
    NotClass,
    /// `:where(basic)`.
    #[strum(to_string = ":where() - zero specificity")]
    Where,
    /// `:is(parent) tag`.
    #[strum(to_string = ":is() - modern alternative")]
    Is,
    /// `tag:nth-of-type(n)`.
    #[strum(to_string = ":nth-of-type()")]
    NthOfType,
    /// `basic:first-child`.
    #[strum(to_string = ":first-child")]
    FirstChild,
    /// `basic:last-child`.
    #[strum(to_string = ":last-child")]
    LastChild,
    /// `basic:only-child`.
    #[strum(to_string = ":only-child")]
    OnlyChild,
    /// `basic:empty`.
    #[strum(to_string = ":empty")]
    Empty,
    /// `basic:disabled`.
    #[strum(to_string = ":disabled")]
    Disabled,
    /// `basic:enabled`.
    #[strum(to_string = ":enabled")]
    Enabled,
    /// `basic:focus`.
    #[strum(to_string = ":focus")]
    Focus,
    /// `parent:focus-within tag`.
    #[strum(to_string = ":focus-within")]
    FocusWithin,
    /// `basic:checked`.
    #[strum(to_string = ":checked")]
    Checked,
    /// `basic:required`.
    #[strum(to_string = ":required")]
    Required,
    /// `basic:optional`.
    #[strum(to_string = ":optional")]
    Optional,
    /// `basic:valid`.
    #[strum(to_string = ":valid")]
    Valid,
    /// `basic:invalid`.
    #[strum(to_string = ":invalid")]
    Invalid,
}

impl Serialize for CandidateKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Snapshot of the element a candidate is anchored under.
///
/// Attributes are limited to `data-*`, `type`, `role` and `aria-label`,
/// rendered as `name="value"`, at most three of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParentSummary {
    /// Lower-cased tag name.
    pub tag: String,
    /// The id, if any.
    pub id: Option<String>,
    /// Class tokens; `None` rather than an empty list.
    pub classes: Option<Vec<String>>,
    /// Notable attributes.
    pub attributes: Vec<String>,
}

impl ParentSummary {
    /// Shortest way to point at the parent: classes, then id, then tag.
    #[must_use]
    pub fn selector(&self) -> String {
        if let Some(classes) = self.classes.as_ref().filter(|c| !c.is_empty()) {
            return format!(".{}", classes.join("."));
        }
        if let Some(id) = &self.id {
            return format!("#{id}");
        }
        self.tag.clone()
    }
}

impl fmt::Display for ParentSummary {
    /// `tag #id .a.b`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)?;
        if let Some(id) = &self.id {
            write!(f, " #{id}")?;
        }
        if let Some(classes) = &self.classes {
            write!(f, " .{}", classes.join("."))?;
        }
        Ok(())
    }
}

/// One synthesized selector plus its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorCandidate {
    /// Strategy label.
    #[serde(rename = "type")]
    pub kind: CandidateKind,
    /// The selector text, unescaped.
    pub selector: String,
    /// One-line explanation.
    pub description: String,
    /// Weight used for ranking.
    pub specificity: SpecificityWeight,
    /// The element's parent, unless it is the document root or body.
    pub parent: Option<ParentSummary>,
}
