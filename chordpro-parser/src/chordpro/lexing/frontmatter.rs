//! Front-matter detection
//!
//!     Runs once, at offset zero, before the tokenizer loop starts. Leading blank lines are
//!     skipped; if the first non-blank line is a fence (`---` for YAML, `+++` for TOML, trailing
//!     whitespace allowed) every following line is captured verbatim up to and including the
//!     matching closing fence line. An unclosed block runs to the end of the input and is still
//!     returned as is.
//!
//!     The block is opaque: nothing inside it is interpreted.
//!
//!     Lines are split on `\n`; a `\r` before it is treated as trailing whitespace of the line.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static FENCE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(---|\+\+\+)\s*$").unwrap());

/// A detected front-matter block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frontmatter {
    /// The block text, both fence lines and their line breaks included.
    pub text: String,
    /// Byte offset of the opening fence.
    pub start: usize,
    /// Byte offset where normal tokenization resumes.
    pub end: usize,
}

/// Returns the fence marker if `line` is a fence line.
fn fence_of(line: &str) -> Option<&str> {
    let content = line.strip_suffix('\n').unwrap_or(line);
    FENCE_REGEX
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Lines of `source` with their starting byte offsets, line breaks kept.
fn lines_with_offsets(source: &str) -> impl Iterator<Item = (usize, &str)> {
    source.split_inclusive('\n').scan(0, |offset, line| {
        let start = *offset;
        *offset += line.len();
        Some((start, line))
    })
}

/// Detect the front-matter block at the start of `source`.
pub fn extract_frontmatter(source: &str) -> Option<Frontmatter> {
    let mut lines = lines_with_offsets(source);

    let (start, opening) = lines.by_ref().find(|(_, line)| !line.trim().is_empty())?;
    let fence = fence_of(opening)?;

    for (line_start, line) in lines {
        if fence_of(line) == Some(fence) {
            let end = line_start + line.len();
            debug!(fence, start, end, "front matter detected");
            return Some(Frontmatter {
                text: source[start..end].to_string(),
                start,
                end,
            });
        }
    }

    debug!(fence, start, "front matter not closed, taking the rest of the input");
    Some(Frontmatter {
        text: source[start..].to_string(),
        start,
        end: source.len(),
    })
}
