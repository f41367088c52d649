//! The document-level rewrite pipeline.
//!
//! A document is converted by running every stage once, in order, over a
//! single buffer; each stage's output is the next stage's input. The order
//! is load-bearing:
//!
//! - labeled headings are matched before plain headings, otherwise the
//!   label identifier leaks into the heading line;
//! - custom decorative commands are stripped before the catch-all could
//!   mis-scope them;
//! - the catch-all runs last so it cannot consume syntax an earlier stage
//!   depends on.

use crate::math::clean_math;
use crate::rules::Rule;
use regex::Captures;
use std::sync::LazyLock;

/// Literal substituted for every collapsed block-math environment.
pub const EQN_PLACEHOLDER: &str = "<EQN HERE>";

static PIPELINE: LazyLock<Pipeline> = LazyLock::new(Pipeline::new);

/// Convert one LaTeX document to Markdown using the shared stage list.
///
/// Deterministic and infallible: unmatched or malformed markup is left for
/// the catch-all or passed through verbatim, never reported.
pub fn convert(text: &str) -> String {
    PIPELINE.convert(text)
}

/// Ordered list of rewrite rules applied over a document buffer.
///
/// The stage list is immutable after construction and safe to share across
/// threads; conversions do not share any other state.
pub struct Pipeline {
    stages: Vec<Rule>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    pub fn new() -> Self {
        let stages = vec![
            // Document preamble and wrapper
            Rule::strip(r"\\documentclass\[.*?\]\{.*?\}"),
            Rule::strip(r"\\begin\{document\}"),
            Rule::strip(r"\\end\{document\}"),
            // Same-line comments after an unescaped %. The regex crate has
            // no lookbehind, so the preceding character is captured and
            // re-emitted.
            Rule::replace(r"(?m)(^|[^\\])%.*$", "$1"),
            // Custom decorative commands
            Rule::strip(r"\\myCover\{.*?\}"),
            Rule::strip(r"\\myChapterCover\{\}"),
            Rule::strip(r"\\newpage"),
            // Sectioning commands become headings. The labeled variant must
            // come first; `\s*` lets the label sit on the next line.
            Rule::replace(r"\\section\{(.*?)\}\s*\\label\{.*?\}", "# $1"),
            Rule::replace(r"\\section\{(.*?)\}", "# $1"),
            Rule::replace(r"\\subsection\{(.*?)\}\s*\\label\{.*?\}", "## $1"),
            Rule::replace(r"\\subsection\{(.*?)\}", "## $1"),
            Rule::replace(r"\\subsubsection\{(.*?)\}\s*\\label\{.*?\}", "### $1"),
            Rule::replace(r"\\subsubsection\{(.*?)\}", "### $1"),
            // Anchors not adjacent to a heading
            Rule::strip(r"\\label\{.*?\}"),
            // Citations and cross-references leave no residue; the optional
            // tilde swallows a preceding non-breaking space.
            Rule::strip(r"~?\\cite\{.*?\}"),
            Rule::strip(r"~?\\Cref\{.*?\}"),
            Rule::strip(r"~?\\cref\{.*?\}"),
            // A block math environment collapses to a single placeholder,
            // however many lines it spans.
            Rule::replace(r"(?s)\\begin\{equation\}.*?\\end\{equation\}", EQN_PLACEHOLDER),
            Rule::replace(r"(?s)\\begin\{align\}.*?\\end\{align\}", EQN_PLACEHOLDER),
            Rule::replace(r"(?s)\\begin\{split\}.*?\\end\{split\}", EQN_PLACEHOLDER),
            // Inline math keeps its delimiters and its cleaned interior
            Rule::rewrite(r"\$([^$]*)\$", |caps: &Captures| {
                format!("${}$", clean_math(&caps[1]))
            }),
            // Inline styling unwraps to its bare argument
            Rule::replace(r"\\textit\{([^}]*)\}", "$1"),
            Rule::replace(r"\\textbf\{([^}]*)\}", "$1"),
            Rule::replace(r"\\text\{([^}]*)\}", "$1"),
            // Figures and tables have no representation here; they are
            // dropped with their content.
            Rule::strip(r"(?s)\\begin\{figure\}.*?\\end\{figure\}"),
            Rule::strip(r"(?s)\\begin\{table\}.*?\\end\{table\}"),
            Rule::strip(r"(?s)\\begin\{tabulary\}.*?\\end\{tabulary\}"),
            // Standalone layout commands
            Rule::strip(r"\\centering"),
            Rule::strip(r"\\includegraphics\[.*?\]\{.*?\}"),
            Rule::strip(r"\\caption\{.*?\}"),
            Rule::strip(r"\\toprule"),
            Rule::strip(r"\\midrule"),
            Rule::strip(r"\\bottomrule"),
            // Math notation outside inline spans
            Rule::strip(r"\\tensor\[.*?\]\{.*?\}\{.*?\}"),
            Rule::replace(r"\\mathbf\{([^}]*)\}", "$1"),
            Rule::replace(r"\\vec\{([^}]*)\}", "$1"),
            // Whitespace normalization: runs of blank lines collapse to one
            // blank line, then every line loses leading and trailing
            // horizontal whitespace.
            Rule::replace(r"\n\s*\n\s*\n", "\n\n"),
            Rule::strip(r"(?m)^[ \t]+"),
            Rule::strip(r"(?m)[ \t]+$"),
            // Catch-all for anything not handled above: first commands with
            // a brace-delimited argument, then bare command tokens.
            Rule::strip(r"\\[a-zA-Z]+\{.*?\}"),
            Rule::strip(r"\\[a-zA-Z]+"),
        ];
        Self { stages }
    }

    /// Run every stage once, in order, over the buffer.
    pub fn convert(&self, text: &str) -> String {
        let mut buffer = text.to_string();
        for stage in &self.stages {
            buffer = stage.apply(&buffer);
        }
        buffer.trim().to_string()
    }
}
