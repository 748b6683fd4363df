//! Tree building from the semantic token stream
//!
//! This module folds tokens into the Document Model. It has two parts:
//!
//! 1. Directive table - a static, read-only map from directive names to what they do
//! 2. Document builder - one cursor over the open Song/Paragraph/Line/Pair, mutated per token
//!
//! Callers normally go through `parsing::parse_text`, which wires the tokenizer to the builder.

pub mod builder;
pub mod directives;

pub use builder::DocumentBuilder;
pub use directives::{lookup, parse_directive, DirectiveKind};
