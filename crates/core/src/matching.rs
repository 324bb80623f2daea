//! Cache hit-gate policy.
//!
//! A similarity query returns the nearest stored template regardless of
//! what it is; the hit gate decides whether that neighbour is reusable.
//! The policy is deliberately coarse: the match counts as a hit only when
//! the candidate's `component` equals the intent's `component` exactly
//! (case-sensitive). Similarity score, purpose, style, and fields are not
//! consulted -- the gate exists to stop near neighbours from a different
//! component family, nothing more. Tightening it is a visible change to
//! this one function, not a tuning knob.

use crate::intent::Intent;

/// Number of neighbours fetched per resolution query.
pub const DEFAULT_TOP_K: usize = 1;

/// Decide whether a retrieved neighbour counts as a cache hit for the
/// given intent.
pub fn is_template_hit(intent: &Intent, candidate_component: &str) -> bool {
    intent.component == candidate_component
}
