//! Token representation and the token arena.
//!
//! A [`Token`] is a span into the source buffer plus a [`TokenKind`], a set of
//! [`TokenFlags`], and an optional decoded payload ([`TokenValue`]). Tokens
//! live in a [`TokenList`]: an append-only arena with a cursor index that
//! replaces the original intrusive doubly linked list. The cursor supports
//! one-step `unlex` (decrement without discarding), so a subsequent lex hands
//! back the identical arena entry.

use bitflags::bitflags;

use crate::value::FloatValue;
use crate::Span;
use std::fmt;

bitflags! {
    /// Per-token metadata flags.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct TokenFlags: u8 {
        /// First token on its line.
        const START = 1 << 0;
        /// First token in the file.
        const FILE_START = 1 << 1;
        /// Token was introduced by a `!` directive marker.
        const DIRECTIVE = 1 << 2;
        /// Numeric literal exceeded the 64-bit range; the decoded value
        /// saturated at the last pre-overflow accumulation.
        const OVERFLOWED = 1 << 3;
        /// Numeric literal is negative; the signed slot is populated.
        const SIGNED = 1 << 4;
        /// Numeric literal has a fractional or exponent part; the structured
        /// float slot is populated.
        const FLOAT = 1 << 5;
        /// Token carries a decoded payload (owned string or numeric value).
        const PROCESSED = 1 << 6;
    }
}

// Compile-time assertion: TokenFlags is exactly 1 byte.
const _: () = assert!(std::mem::size_of::<TokenFlags>() == 1);

/// Token kinds for the configuration language.
///
/// Compound punctuation kinds correspond to the two-byte source sequences
/// `<=`, `>=`, `==`, `!=`, `+=`, `.=`, `:=`, `?=`; their byte pairs are
/// recoverable via [`TokenKind::pair`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    /// A byte no rule matched; consumed one byte at a time.
    Invalid,
    /// End of the source buffer.
    Eof,

    // Single-byte punctuation
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    LParen,
    RParen,
    Lt,
    Gt,
    Eq,

    // Compound punctuation
    LtEq,
    GtEq,
    EqEq,
    NotEq,
    PlusEq,
    DotEq,
    ColonEq,
    QuestionEq,

    /// File-header tag: sigil (`*`, `+`, `-`, `~`) plus a non-whitespace run.
    Tag,
    /// Bare non-whitespace run.
    Name,
    /// `"`-delimited string literal.
    String,
    /// Numeric literal.
    Number,
}

impl TokenKind {
    /// Map a single punctuation byte to its kind.
    pub fn from_single(byte: u8) -> Option<TokenKind> {
        match byte {
            b'[' => Some(TokenKind::LBracket),
            b']' => Some(TokenKind::RBracket),
            b'{' => Some(TokenKind::LBrace),
            b'}' => Some(TokenKind::RBrace),
            b'(' => Some(TokenKind::LParen),
            b')' => Some(TokenKind::RParen),
            b'<' => Some(TokenKind::Lt),
            b'>' => Some(TokenKind::Gt),
            b'=' => Some(TokenKind::Eq),
            _ => None,
        }
    }

    /// Map a two-byte punctuation pair to its kind.
    pub fn from_pair(first: u8, second: u8) -> Option<TokenKind> {
        if second != b'=' {
            return None;
        }
        match first {
            b'<' => Some(TokenKind::LtEq),
            b'>' => Some(TokenKind::GtEq),
            b'=' => Some(TokenKind::EqEq),
            b'!' => Some(TokenKind::NotEq),
            b'+' => Some(TokenKind::PlusEq),
            b'.' => Some(TokenKind::DotEq),
            b':' => Some(TokenKind::ColonEq),
            b'?' => Some(TokenKind::QuestionEq),
            _ => None,
        }
    }

    /// The `(first, second)` byte pair of a compound punctuation kind.
    pub fn pair(&self) -> Option<(u8, u8)> {
        match self {
            TokenKind::LtEq => Some((b'<', b'=')),
            TokenKind::GtEq => Some((b'>', b'=')),
            TokenKind::EqEq => Some((b'=', b'=')),
            TokenKind::NotEq => Some((b'!', b'=')),
            TokenKind::PlusEq => Some((b'+', b'=')),
            TokenKind::DotEq => Some((b'.', b'=')),
            TokenKind::ColonEq => Some((b':', b'=')),
            TokenKind::QuestionEq => Some((b'?', b'=')),
            _ => None,
        }
    }

    /// The byte of a single-byte punctuation kind.
    pub fn single(&self) -> Option<u8> {
        match self {
            TokenKind::LBracket => Some(b'['),
            TokenKind::RBracket => Some(b']'),
            TokenKind::LBrace => Some(b'{'),
            TokenKind::RBrace => Some(b'}'),
            TokenKind::LParen => Some(b'('),
            TokenKind::RParen => Some(b')'),
            TokenKind::Lt => Some(b'<'),
            TokenKind::Gt => Some(b'>'),
            TokenKind::Eq => Some(b'='),
            _ => None,
        }
    }
}

/// Decoded payload attached to a processed token.
///
/// Unifies the original split between the token record and its owned-memory
/// pointer: a token either has no payload, owns a decoded string, or holds
/// the decoded numeric in the slot matching its flags.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum TokenValue {
    /// No decoded payload; the raw span is sufficient.
    #[default]
    None,
    /// Owned decoded string (escapes resolved).
    Str(Box<str>),
    /// Non-negative integer.
    Unsigned(u64),
    /// Negative integer.
    Signed(i64),
    /// Structured float.
    Float(FloatValue),
}

/// A token with its span, flags, and decoded payload.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub flags: TokenFlags,
    pub value: TokenValue,
}

impl Token {
    /// Create a token with empty flags and no payload.
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token {
            kind,
            span,
            flags: TokenFlags::empty(),
            value: TokenValue::None,
        }
    }

    /// Attach flags.
    #[must_use]
    pub fn with_flags(mut self, flags: TokenFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Attach a decoded payload and mark the token processed.
    #[must_use]
    pub fn with_value(mut self, value: TokenValue) -> Self {
        self.value = value;
        self.flags |= TokenFlags::PROCESSED;
        self
    }

    /// Slice this token's lexeme out of the source text.
    pub fn slice<'s>(&self, source: &'s str) -> &'s str {
        &source[self.span.to_range()]
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.span)?;
        if !self.flags.is_empty() {
            write!(f, " [{:?}]", self.flags)?;
        }
        if self.value != TokenValue::None {
            write!(f, " = {:?}", self.value)?;
        }
        Ok(())
    }
}

/// Index of a token in its [`TokenList`] arena.
///
/// Ids are never invalidated: the arena is append-only.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct TokenId(u32);

impl TokenId {
    /// Position of the token in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Append-only token arena with a lex cursor.
///
/// The cursor is the index of the next token to hand out. While the cursor is
/// behind the tail (after `unlex`), lexing returns already-stored tokens
/// instead of scanning new ones; at the tail, the lexer scans, pushes, and
/// the cursor moves past the new entry.
#[derive(Clone, Debug, Default)]
pub struct TokenList {
    tokens: Vec<Token>,
    cursor: usize,
}

impl TokenList {
    /// Create an empty list with the cursor at the (empty) tail.
    pub fn new() -> Self {
        TokenList::default()
    }

    /// Number of tokens stored.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if no token has been stored.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns `true` when the cursor sits at the tail (no lookahead pending).
    pub fn at_tail(&self) -> bool {
        self.cursor == self.tokens.len()
    }

    /// Current cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Look up a token by id.
    pub fn get(&self, id: TokenId) -> Option<&Token> {
        self.tokens.get(id.index())
    }

    /// Mutable lookup by id.
    pub fn get_mut(&mut self, id: TokenId) -> Option<&mut Token> {
        self.tokens.get_mut(id.index())
    }

    /// Append a token at the tail and advance the cursor past it.
    ///
    /// The caller receives the id of the new entry; it is also the token the
    /// current lex invocation returns.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "token count bounded by source length, which fits in u32"
    )]
    pub fn push(&mut self, token: Token) -> TokenId {
        let id = TokenId(self.tokens.len() as u32);
        self.tokens.push(token);
        self.cursor = self.tokens.len();
        id
    }

    /// Hand out the next existing token if the cursor is behind the tail.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "cursor < len <= u32::MAX"
    )]
    pub fn cursor_next(&mut self) -> Option<TokenId> {
        if self.cursor < self.tokens.len() {
            let id = TokenId(self.cursor as u32);
            self.cursor += 1;
            Some(id)
        } else {
            None
        }
    }

    /// Move the cursor back one token without discarding it.
    ///
    /// Returns `false` if the cursor is already at the head.
    pub fn unlex(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Last stored token, if any.
    pub fn last(&self) -> Option<&Token> {
        self.tokens.last()
    }

    /// Id of the last stored token, if any.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "token count bounded by source length, which fits in u32"
    )]
    pub fn last_id(&self) -> Option<TokenId> {
        if self.tokens.is_empty() {
            None
        } else {
            Some(TokenId(self.tokens.len() as u32 - 1))
        }
    }

    /// Iterate stored tokens in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Drop all tokens and reset the cursor. Used when the source buffer is
    /// replaced; positions are recomputed on the next lex.
    pub fn clear(&mut self) {
        self.tokens.clear();
        self.cursor = 0;
    }
}

impl std::ops::Index<TokenId> for TokenList {
    type Output = Token;

    fn index(&self, id: TokenId) -> &Token {
        &self.tokens[id.index()]
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
