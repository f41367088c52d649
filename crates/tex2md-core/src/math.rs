//! Interior cleanup for inline math spans.
//!
//! Inline math is the one construct whose content survives conversion;
//! everything else in the pipeline either rewrites structure or deletes
//! content. The interior still carries commands (`\mathbf{v}`, `\left(`)
//! that mean nothing outside the original toolchain, so those are stripped
//! while the mathematical symbols and bare text are kept.

use regex::Regex;
use std::sync::LazyLock;

static RE_BRACED_COMMAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\[a-zA-Z]+\{([^}]*)\}").expect("valid braced command regex"));
static RE_BARE_COMMAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\[a-zA-Z]+").expect("valid bare command regex"));
static RE_LEFT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\left").expect("valid left regex"));
static RE_RIGHT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\right").expect("valid right regex"));
static RE_TEXT_WRAPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\text\{([^}]*)\}").expect("valid text wrapper regex"));

/// Strip markup commands from the interior of one inline math span.
///
/// Commands with a brace-delimited argument unwrap to their bare content in
/// a single scan; a command newly exposed by unwrapping its enclosing
/// command is not revisited, so deeply nested commands can leave residue.
/// Remaining bare commands are deleted outright.
pub fn clean_math(span: &str) -> String {
    let cleaned = RE_BRACED_COMMAND.replace_all(span, "$1");
    let cleaned = RE_BARE_COMMAND.replace_all(&cleaned, "");
    // Delimiter sizing carries no meaning in plain text.
    let cleaned = RE_LEFT.replace_all(&cleaned, "");
    let cleaned = RE_RIGHT.replace_all(&cleaned, "");
    let cleaned = RE_TEXT_WRAPPER.replace_all(&cleaned, "$1");
    cleaned.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn braced_command_unwraps_to_argument() {
        assert_eq!(clean_math(r"\mathbf{v}"), "v");
        assert_eq!(clean_math(r"\mathbf{p} = m\vec{v}"), "p = mv");
    }

    #[test]
    fn bare_commands_are_deleted() {
        assert_eq!(clean_math(r"\left( x \right)"), "( x )");
        assert_eq!(clean_math(r"x \leq y"), "x  y");
    }

    #[test]
    fn plain_content_is_untouched() {
        assert_eq!(clean_math("x = y + z"), "x = y + z");
    }

    #[test]
    fn result_is_trimmed() {
        assert_eq!(clean_math(r" \alpha x "), "x");
    }

    #[test]
    fn nested_commands_resolve_one_level_only() {
        // Single scan: the outer command unwraps, the exposed inner one is
        // then treated as a bare command and deleted.
        assert_eq!(clean_math(r"\mathbf{\vec{v}}"), "{v}");
    }
}
