//! Data model for the stanza configuration core.
//!
//! This crate defines the types the lexer produces and the evaluator consumes:
//! source [`Span`]s, [`Token`]s with their decoded payloads, and the
//! context-side model of typed [`Value`]s grouped into [`Variable`]s and
//! [`Section`]s.
//!
//! The token stream is an arena ([`TokenList`]) with a cursor index instead of
//! an intrusive doubly linked list; `unlex` is a cursor decrement and reverse
//! iteration is plain slice indexing.

mod section;
mod span;
mod token;
mod value;
mod variable;

pub use section::Section;
pub use span::Span;
pub use token::{Token, TokenFlags, TokenId, TokenKind, TokenList, TokenValue};
pub use value::{FloatValue, Value, ValueType};
pub use variable::{ModelError, Variable};
