//! The pull lexer.
//!
//! State lives in the shared [`TokenList`] and [`Diagnostics`], so the lexer
//! itself carries only its radix mode and whether the error-limit report has
//! been emitted. Scanning always resumes from the end of the last stored
//! token, which makes unlex (a cursor decrement in the token list) free.

use stanza_diagnostic::{Diagnostics, Location, MessageId, Report, Severity};
use stanza_lexer_core::{Cursor, LineInfo, SourceBuffer};
use stanza_model::{Span, Token, TokenFlags, TokenId, TokenKind, TokenList, TokenValue};

use crate::escape;
use crate::number::{self, Radix};
use crate::trivia;

/// Bytes allowed inside a `Name` run.
///
/// Liberal enough for keys, paths, and removal/metadata statements
/// (`-name`, `name("desc")` stops at the paren); structural punctuation,
/// quotes, and whitespace terminate the run. Everything ASCII outside this
/// set lexes as `Invalid`.
fn is_name_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
        || byte >= 0x80
        || matches!(
            byte,
            b'_' | b'-' | b'.' | b'/' | b'$' | b'+' | b'*' | b'~' | b'!' | b'?' | b':' | b','
                | b'\''
        )
}

/// Pull lexer over a [`SourceBuffer`].
///
/// Call [`next_token`](Lexer::next_token) repeatedly; each call returns the
/// id of the next token in the list, appending a new one when the list
/// cursor is at the tail. Returns `None` after a `Panic` report or once the
/// error limit has been reached.
#[derive(Clone, Debug, Default)]
pub struct Lexer {
    default_radix: Radix,
    limit_reported: bool,
}

impl Lexer {
    pub fn new() -> Self {
        Lexer::default()
    }

    /// Lexer with a fixed numeric radix instead of C-style prefixes.
    pub fn with_radix(default_radix: Radix) -> Self {
        Lexer {
            default_radix,
            limit_reported: false,
        }
    }

    /// Produce the next token.
    ///
    /// After an `unlex` the stored token is handed out again without
    /// rescanning. At end of input an `Eof` token is appended once and then
    /// returned on every further call.
    pub fn next_token(
        &mut self,
        source: &SourceBuffer,
        tokens: &mut TokenList,
        diags: &mut Diagnostics,
    ) -> Option<TokenId> {
        if diags.tail_severity() == Some(Severity::Panic) {
            return None;
        }
        if diags.error_limit_reached() {
            if !self.limit_reported {
                self.limit_reported = true;
                let _ = diags.submit(
                    Report::new(Severity::Normal, MessageId::TooManyErrors)
                        .with_arg(diags.max_errors().to_string()),
                );
            }
            return None;
        }
        if !tokens.at_tail() {
            return tokens.cursor_next();
        }
        if tokens.last().map(|t| t.kind) == Some(TokenKind::Eof) {
            return tokens.last_id();
        }

        let mut cursor = source.cursor();
        cursor.set_pos(tokens.last().map_or(0, |t| t.span.end));

        let mut flags = TokenFlags::empty();
        if tokens.is_empty() {
            flags |= TokenFlags::START | TokenFlags::FILE_START;
        }

        let trivia = trivia::skip(&mut cursor);
        if trivia.saw_newline {
            flags |= TokenFlags::START;
        }
        if let Some(open_pos) = trivia.open_comment {
            submit_at(
                diags,
                source,
                Report::new(Severity::Warning, MessageId::LexerOpenComment),
                open_pos,
            );
        }

        // A `!` at line start marks the following token as a directive.
        if flags.contains(TokenFlags::START) && !cursor.is_eof() && cursor.current() == b'!' {
            flags |= TokenFlags::DIRECTIVE;
            cursor.advance();
            cursor.eat_while(|b| b == b' ' || b == b'\t');
        }

        if cursor.is_eof() {
            let end = source.len();
            let token = Token::new(TokenKind::Eof, Span::new(end, end)).with_flags(flags);
            return Some(tokens.push(token));
        }

        let at_tag_position = tokens.last().map_or(true, |t| t.kind == TokenKind::Tag);
        let token = self.dispatch(&mut cursor, at_tag_position, source, diags);
        Some(tokens.push(token.with_flags(flags)))
    }

    fn dispatch(
        &self,
        cursor: &mut Cursor<'_>,
        at_tag_position: bool,
        source: &SourceBuffer,
        diags: &mut Diagnostics,
    ) -> Token {
        let start = cursor.pos();
        let b = cursor.current();
        let next = cursor.peek();

        // Tag tokens exist only in the file header: at the very first token
        // or immediately after another tag.
        if at_tag_position && matches!(b, b'*' | b'+' | b'-' | b'~') && next > 0x20 {
            cursor.advance();
            cursor.eat_while(|x| x > 0x20);
            return Token::new(TokenKind::Tag, Span::new(start, cursor.pos()));
        }

        if b == b'"' {
            return scan_string(cursor, source, diags);
        }

        if b.is_ascii_digit() || (matches!(b, b'+' | b'-') && next.is_ascii_digit()) {
            let scanned = number::scan_number(cursor, self.default_radix);
            return Token::new(TokenKind::Number, Span::new(start, cursor.pos()))
                .with_flags(scanned.flags)
                .with_value(scanned.value);
        }

        if let Some(kind) = TokenKind::from_pair(b, next) {
            cursor.advance_n(2);
            return Token::new(kind, Span::new(start, cursor.pos()));
        }
        if let Some(kind) = TokenKind::from_single(b) {
            cursor.advance();
            return Token::new(kind, Span::new(start, cursor.pos()));
        }

        if is_name_byte(b) {
            cursor.eat_while(is_name_byte);
            return Token::new(TokenKind::Name, Span::new(start, cursor.pos()));
        }

        // Nothing matched: consume one byte as Invalid.
        cursor.advance();
        submit_at(
            diags,
            source,
            Report::new(Severity::Warning, MessageId::LexerInvalidToken)
                .with_arg(char::from(b).to_string()),
            start,
        );
        Token::new(TokenKind::Invalid, Span::new(start, cursor.pos()))
    }
}

/// Scan a `"`-delimited string literal. The token span includes both quotes;
/// an unterminated literal runs to end of input.
fn scan_string(cursor: &mut Cursor<'_>, source: &SourceBuffer, diags: &mut Diagnostics) -> Token {
    let start = cursor.pos();
    cursor.advance();
    let content_start = cursor.pos();
    let mut saw_escape = false;

    let content_end = loop {
        match cursor.skip_to_string_delim(b'"') {
            0 => break cursor.pos(),
            b'"' => {
                let end = cursor.pos();
                cursor.advance();
                break end;
            }
            b'\\' => {
                saw_escape = true;
                cursor.advance();
                if !cursor.is_eof() {
                    cursor.advance();
                }
            }
            // Strings may span lines; a newline is ordinary content.
            _ => cursor.advance(),
        }
    };

    let mut token = Token::new(TokenKind::String, Span::new(start, cursor.pos()));
    if saw_escape {
        let content = cursor.slice(content_start, content_end);
        match escape::unescape_string(content) {
            Ok(unescaped) => {
                for invalid in &unescaped.invalid {
                    submit_at(
                        diags,
                        source,
                        Report::new(Severity::Warning, MessageId::LexerInvalidEscape)
                            .with_arg(format!("\\{}", invalid.escape)),
                        content_start + invalid.offset,
                    );
                }
                if let Some(decoded) = unescaped.decoded {
                    token = token.with_value(TokenValue::Str(decoded.into_boxed_str()));
                }
            }
            Err(bytes) => {
                diags.raise_oom(bytes);
                token.kind = TokenKind::Invalid;
            }
        }
    }
    token
}

/// Submit a report located at `pos`, resolving line and column on demand.
fn submit_at(diags: &mut Diagnostics, source: &SourceBuffer, report: Report, pos: u32) {
    let info = LineInfo::resolve(source.as_str(), pos);
    let mut location = Location::at(info.line, info.column);
    location.line_text = Some(info.text.to_owned());
    let _ = diags.submit(report.with_location(location));
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
