//! Ordering of generated candidates.

use std::cmp::Reverse;
use std::collections::HashSet;

use crate::candidate::SelectorCandidate;

/// Sort by specificity, highest first, comparing `inline`, then `ids`, then
/// `classes`, then `elements`. The sort is stable: equal weights keep
/// emission order. Nothing is removed.
#[must_use]
pub fn rank(mut candidates: Vec<SelectorCandidate>) -> Vec<SelectorCandidate> {
    candidates.sort_by_key(|candidate| Reverse(candidate.specificity));
    candidates
}

/// Keep only the first candidate for each distinct selector text.
#[must_use]
pub fn dedupe(mut candidates: Vec<SelectorCandidate>) -> Vec<SelectorCandidate> {
    let mut seen = HashSet::new();
    candidates.retain(|candidate| seen.insert(candidate.selector.clone()));
    candidates
}
