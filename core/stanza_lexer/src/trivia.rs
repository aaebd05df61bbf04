//! Whitespace and comment skipping.
//!
//! Trivia is every byte `<= 0x20` plus four comment forms: `// ...`,
//! `# ...`, and `; ...` to end of line, and `/* ... */` which nests. The
//! skip loop alternates whitespace and comment passes until a pass makes no
//! progress, tracking whether a newline was crossed (the next token gets the
//! `START` flag) and whether a block comment was left open at end of input.

use stanza_lexer_core::Cursor;

/// Outcome of one trivia skip.
pub(crate) struct Trivia {
    /// A `\n` or `\r` was crossed; the next token starts a line.
    pub saw_newline: bool,
    /// Byte position of a `/*` that never closed. The cursor is left at end
    /// of input when this is set.
    pub open_comment: Option<u32>,
}

/// Skip whitespace and comments, leaving the cursor on the first token byte
/// (or at end of input).
pub(crate) fn skip(cursor: &mut Cursor<'_>) -> Trivia {
    let mut trivia = Trivia {
        saw_newline: false,
        open_comment: None,
    };

    loop {
        let before = cursor.pos();

        while !cursor.is_eof() && cursor.current() <= 0x20 {
            if matches!(cursor.current(), b'\n' | b'\r') {
                trivia.saw_newline = true;
            }
            cursor.advance();
        }

        match (cursor.current(), cursor.peek()) {
            (b'#' | b';', _) | (b'/', b'/') => {
                // Body runs to the newline, which the whitespace pass eats.
                cursor.eat_until_newline_or_eof();
            }
            (b'/', b'*') => skip_block_comment(cursor, &mut trivia),
            _ => {}
        }

        if cursor.pos() == before {
            break;
        }
    }
    trivia
}

/// Skip a (possibly nested) block comment. On an unterminated comment the
/// cursor ends at end of input and the opening position is recorded.
fn skip_block_comment(cursor: &mut Cursor<'_>, trivia: &mut Trivia) {
    let open_pos = cursor.pos();
    cursor.advance_n(2);
    let mut depth = 1u32;
    while depth > 0 && !cursor.is_eof() {
        match (cursor.current(), cursor.peek()) {
            (b'/', b'*') => {
                depth += 1;
                cursor.advance_n(2);
            }
            (b'*', b'/') => {
                depth -= 1;
                cursor.advance_n(2);
            }
            (b'\n' | b'\r', _) => {
                trivia.saw_newline = true;
                cursor.advance();
            }
            _ => cursor.advance(),
        }
    }
    if depth > 0 {
        trivia.open_comment = Some(open_pos);
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
