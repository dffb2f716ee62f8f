//! Lexical specificity scoring.
//!
//! [§ 17 Calculating Specificity](https://www.w3.org/TR/selectors-4/#specificity-rules)
//! "A selector's specificity is calculated for a given element as follows:
//!  - count the number of ID selectors in the selector (= A)
//!  - count the number of class selectors, attributes selectors, and pseudo-classes in the selector (= B)
//!  - count the number of type selectors and pseudo-elements in the selector (= C)"
//!
//! NOTE: This is not a selector parser. The input is any string, and the weight
//! is an approximation built from a fixed, ordered set of pattern classifiers:
//!
//! 1. the generated-content pseudo-elements (`::before`, `::after`,
//!    `::first-letter`, `::first-line`) are removed and score nothing;
//! 2. bracketed attribute tokens count toward B and are removed;
//! 3. `#id` tokens count toward A;
//! 4. `.class` tokens and single-colon pseudo-classes (with their argument
//!    list) count toward B;
//! 5. with ids, classes and pseudo-class names removed, every remaining
//!    identifier that is not one of [`EXCLUDED_KEYWORDS`] counts toward C.
//!
//! Identifiers inside pseudo-class arguments are still counted in step 5, so
//! `div:has(span)` is `(0,0,1,2)`. Unparseable fragments match nothing and
//! contribute 0. Keep these rules as they are: callers compare weights
//! produced by exactly this scan.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Words that look like identifiers but never name an element.
pub const EXCLUDED_KEYWORDS: &[&str] = &["and", "or", "not", "from", "to", "of"];

static PSEUDO_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"::(before|after|first-letter|first-line)").expect("pseudo-element pattern")
});
static ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]+\]").expect("attribute pattern"));
static ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#[\w-]+").expect("id pattern"));
static CLASS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.[\w-]+").expect("class pattern"));
static PSEUDO_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"::?[\w-]+(\([^)]*\))?").expect("pseudo-class pattern"));
static PSEUDO_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"::?[\w-]+").expect("pseudo-class name pattern"));
static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z][A-Za-z0-9]*(?:-[A-Za-z0-9]+)*\b").expect("identifier pattern")
});

/// The `(inline, ids, classes, elements)` weight of a selector.
///
/// Field order is the comparison order, so the derived `Ord` is the
/// lexicographic cascade order: `(0,1,0,0) > (0,0,9,9)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct SpecificityWeight {
    /// Declarations from a `style` attribute. Always 0 for generated selectors.
    pub inline: u32,
    /// ID selectors.
    pub ids: u32,
    /// Class selectors, attribute selectors and pseudo-classes.
    pub classes: u32,
    /// Type selectors.
    pub elements: u32,
}

impl SpecificityWeight {
    /// `(0,0,0,0)`, the weight of anything wrapped in `:where()`.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Create a weight from its four components.
    #[must_use]
    pub const fn new(inline: u32, ids: u32, classes: u32, elements: u32) -> Self {
        Self {
            inline,
            ids,
            classes,
            elements,
        }
    }

    /// Coarse bucket used when presenting a weight.
    #[must_use]
    pub const fn tier(self) -> SpecificityTier {
        if self.inline > 0 {
            SpecificityTier::VeryHigh
        } else if self.ids > 1 {
            SpecificityTier::High
        } else if self.ids == 1 {
            SpecificityTier::Medium
        } else if self.classes > 0 {
            SpecificityTier::Low
        } else {
            SpecificityTier::VeryLow
        }
    }
}

impl fmt::Display for SpecificityWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{},{},{})",
            self.inline, self.ids, self.classes, self.elements
        )
    }
}

/// Presentation buckets for [`SpecificityWeight`], highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum_macros::Display, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpecificityTier {
    /// `(1,x,x,x)`: inline styles.
    #[strum(to_string = "very high")]
    VeryHigh,
    /// `(0,2+,x,x)`: several ids.
    #[strum(to_string = "high")]
    High,
    /// `(0,1,x,x)`: one id.
    #[strum(to_string = "medium")]
    Medium,
    /// `(0,0,1+,x)`: classes, attributes, pseudo-classes.
    #[strum(to_string = "low")]
    Low,
    /// `(0,0,0,x)`: elements only.
    #[strum(to_string = "very low")]
    VeryLow,
}

/// Score an arbitrary selector string. Never fails.
///
/// ```
/// use pinpoint_selector::{SpecificityWeight, specificity_of};
///
/// assert_eq!(specificity_of("#id.class:hover"), SpecificityWeight::new(0, 1, 2, 0));
/// assert_eq!(specificity_of("div::before"), SpecificityWeight::new(0, 0, 0, 1));
/// ```
#[must_use]
pub fn specificity_of(selector: &str) -> SpecificityWeight {
    let without_pseudo_elements = PSEUDO_ELEMENT.replace_all(selector, "");

    let attributes = count(&ATTRIBUTE, &without_pseudo_elements);
    let scan = ATTRIBUTE.replace_all(&without_pseudo_elements, " ");

    let ids = count(&ID, &scan);
    let classes = count(&CLASS, &scan);
    let pseudo_classes = u32_from(
        PSEUDO_CLASS
            .find_iter(&scan)
            .filter(|m| !m.as_str().starts_with("::"))
            .count(),
    );

    let scan = ID.replace_all(&scan, " ");
    let scan = CLASS.replace_all(&scan, " ");
    let scan = PSEUDO_NAME.replace_all(&scan, " ");
    let elements = u32_from(
        IDENTIFIER
            .find_iter(&scan)
            .filter(|m| {
                !EXCLUDED_KEYWORDS
                    .iter()
                    .any(|keyword| m.as_str().eq_ignore_ascii_case(keyword))
            })
            .count(),
    );

    SpecificityWeight {
        inline: 0,
        ids,
        classes: classes
            .saturating_add(attributes)
            .saturating_add(pseudo_classes),
        elements,
    }
}

fn count(pattern: &Regex, haystack: &str) -> u32 {
    u32_from(pattern.find_iter(haystack).count())
}

fn u32_from(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
