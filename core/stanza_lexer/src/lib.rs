//! Pull lexer for the stanza configuration language.
//!
//! The lexer is invoked once per token: it scans from the end of the previous
//! token, skips whitespace and comments (line comments `//`, `#`, `;` and
//! nesting block comments `/* */`), and appends the next token to the shared
//! [`TokenList`](stanza_model::TokenList). Tokens are context-sensitive: tag
//! tokens are recognized only in the file header (before the first non-tag
//! token), and `!` directives only at the start of a line.
//!
//! Lexical errors are reported through the
//! [`Diagnostics`](stanza_diagnostic::Diagnostics) channel and never abort
//! the scan; the lexer keeps producing tokens so multiple errors surface in
//! one pass. A `Panic` tail report or the configured error limit stops it.

mod escape;
mod lexer;
mod number;
mod tag_header;
mod trivia;

pub use lexer::Lexer;
pub use number::Radix;
pub use tag_header::{parse_tag_header, TagSigil};
