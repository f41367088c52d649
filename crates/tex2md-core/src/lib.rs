//! tex2md-core: Core library for converting LaTeX documents to Markdown
//!
//! This crate provides:
//! - An ordered rewrite pipeline over a whole document buffer
//! - Inline math span cleanup
//!
//! There is no lexer or parser here. LaTeX is rewritten textually: each
//! stage is one find-and-replace rule applied exactly once over the whole
//! buffer, and stage order is what keeps the rules from corrupting each
//! other's input. Unrecognized commands are deleted by a final catch-all
//! rather than reported — unmatched markup is a no-op, never an error.

pub mod math;
pub mod pipeline;
mod rules;

pub use math::clean_math;
pub use pipeline::{EQN_PLACEHOLDER, Pipeline, convert};
