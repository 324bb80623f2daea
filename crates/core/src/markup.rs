//! Sanitation of raw model output.
//!
//! Generation services are asked for bare JSON or bare HTML but routinely
//! wrap their answer in a Markdown code fence anyway. [`strip_code_fence`]
//! removes one level of fencing and surrounding whitespace; everything
//! inside the fence is returned verbatim.

use once_cell::sync::Lazy;
use regex::Regex;

/// Leading fence with an optional language tag (` ```json `, ` ```html `,
/// or a bare ` ``` `), including the trailing newline if present.
static LEADING_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^```[a-zA-Z]*[ \t]*\r?\n?").expect("valid regex"));

/// Trailing fence, optionally preceded by a newline.
static TRAILING_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r?\n?```\s*$").expect("valid regex"));

/// Strip one level of Markdown code-fence wrapping from model output.
///
/// Input is trimmed first so fences preceded by stray whitespace are still
/// recognized. Unfenced input passes through (trimmed) unchanged.
pub fn strip_code_fence(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_leading = LEADING_FENCE.replace(trimmed, "");
    let without_trailing = TRAILING_FENCE.replace(&without_leading, "");
    without_trailing.trim().to_string()
}
