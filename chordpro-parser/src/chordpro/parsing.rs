//! Parsing entry points
//!
//!     Parsing runs two stages, strictly one way:
//!         1. Lexing: the tokenizer turns source text into semantic tokens, front matter first.
//!            See [lexing](crate::chordpro::lexing).
//!         2. Building: the document builder folds the tokens into a [File].
//!            See [building](crate::chordpro::building).
//!
//!     Parsing is total. Malformed content never fails the call: a fatal lex error is stored on
//!     the song that was open when it happened and the tree built up to that point is returned.
//!     Song-count policies (exactly one song, for instance) belong to the caller.
//!
//! Front Matter
//!
//!     [FrontmatterPolicy] decides where `File::frontmatter` comes from. `Detect` reads the
//!     fenced block at the top of the source, `Ignore` skips detection so a fence is read as
//!     lyrics, and `Preserve` stores caller-supplied text while still consuming the source's
//!     own block.

use crate::chordpro::ast::File;
use crate::chordpro::building::DocumentBuilder;
use crate::chordpro::lexing::Tokenizer;
use crate::chordpro::token::Token;

/// Where the parsed File's front matter comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FrontmatterPolicy {
    #[default]
    Detect,
    Ignore,
    Preserve(String),
}

/// Options for [parse_with].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub frontmatter: FrontmatterPolicy,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frontmatter(mut self, policy: FrontmatterPolicy) -> Self {
        self.frontmatter = policy;
        self
    }
}

/// Parse a song sheet with front-matter detection.
pub fn parse_text(source: &str) -> File {
    parse_with(source, &ParseOptions::default())
}

/// Parse a song sheet with explicit options.
pub fn parse_with(source: &str, options: &ParseOptions) -> File {
    match &options.frontmatter {
        FrontmatterPolicy::Detect => DocumentBuilder::build(Tokenizer::new(source)),
        FrontmatterPolicy::Ignore => {
            DocumentBuilder::build(Tokenizer::without_frontmatter(source))
        }
        FrontmatterPolicy::Preserve(text) => {
            let tokens = Tokenizer::new(source)
                .filter(|item| !matches!(item, Ok((Token::Frontmatter(_), _))));
            let mut builder = DocumentBuilder::new();
            builder.set_frontmatter(text.clone());
            builder.feed(tokens);
            builder.finish()
        }
    }
}
