//! Rewrite rule primitives.

use regex::{Captures, Regex};

/// Replacement half of a [`Rule`].
pub(crate) enum Action {
    /// Static replacement template; may reference capture groups (`$1`).
    Template(&'static str),
    /// Replacement computed from the match.
    Rewrite(fn(&Captures) -> String),
}

/// One find-and-replace step of the pipeline.
///
/// Rules are immutable once built and each runs exactly once per document,
/// in sequence. A rule must never reintroduce a pattern matched by an
/// earlier rule; there is no fixed-point iteration to catch it if it does.
pub(crate) struct Rule {
    pattern: Regex,
    action: Action,
}

impl Rule {
    pub(crate) fn replace(pattern: &str, template: &'static str) -> Self {
        Self {
            pattern: compile(pattern),
            action: Action::Template(template),
        }
    }

    /// A rule that deletes every match.
    pub(crate) fn strip(pattern: &str) -> Self {
        Self::replace(pattern, "")
    }

    pub(crate) fn rewrite(pattern: &str, replacer: fn(&Captures) -> String) -> Self {
        Self {
            pattern: compile(pattern),
            action: Action::Rewrite(replacer),
        }
    }

    /// Apply this rule once across the whole buffer.
    pub(crate) fn apply(&self, text: &str) -> String {
        match &self.action {
            Action::Template(template) => self.pattern.replace_all(text, *template).into_owned(),
            Action::Rewrite(replacer) => self.pattern.replace_all(text, *replacer).into_owned(),
        }
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid rewrite pattern")
}
