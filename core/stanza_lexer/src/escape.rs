//! String escape decoding.
//!
//! Valid escapes: `\\` `\'` `\"` `\?` `\a` `\b` `\f` `\n` `\r` `\t` `\v`.
//! An unknown escape decodes to `_` and is reported back to the lexer so it
//! can emit a diagnostic. `\xXX` and `\uXXXX` are reserved for later.

/// An unrecognized escape encountered while decoding.
pub(crate) struct InvalidEscape {
    /// Byte offset of the backslash within the content slice.
    pub offset: u32,
    /// The character following the backslash (`\\` for a trailing one).
    pub escape: char,
}

/// Result of decoding a string literal's content.
pub(crate) struct Unescaped {
    /// Owned decoded text, or `None` when no escape was present and the raw
    /// span suffices.
    pub decoded: Option<String>,
    pub invalid: Vec<InvalidEscape>,
}

/// Escapes valid in string literals.
fn resolve_escape(c: char) -> Option<char> {
    match c {
        '\\' => Some('\\'),
        '\'' => Some('\''),
        '"' => Some('"'),
        '?' => Some('?'),
        'a' => Some('\x07'),
        'b' => Some('\x08'),
        'f' => Some('\x0C'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        'v' => Some('\x0B'),
        _ => None,
    }
}

/// Decode the content between a string literal's quotes.
///
/// Fast path: content without a backslash needs no owned buffer. On
/// allocation failure the attempted byte count is returned so the caller can
/// raise OOM.
#[allow(
    clippy::cast_possible_truncation,
    reason = "content offsets bounded by the u32-sized source buffer"
)]
pub(crate) fn unescape_string(content: &str) -> Result<Unescaped, usize> {
    if !content.contains('\\') {
        return Ok(Unescaped {
            decoded: None,
            invalid: Vec::new(),
        });
    }

    let mut result = String::new();
    result
        .try_reserve(content.len())
        .map_err(|_| content.len())?;
    let mut invalid = Vec::new();

    let mut chars = content.char_indices();
    while let Some((i, c)) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some((_, esc)) => {
                if let Some(resolved) = resolve_escape(esc) {
                    result.push(resolved);
                } else {
                    result.push('_');
                    invalid.push(InvalidEscape {
                        offset: i as u32,
                        escape: esc,
                    });
                }
            }
            None => {
                // Trailing backslash at end of content.
                result.push('_');
                invalid.push(InvalidEscape {
                    offset: i as u32,
                    escape: '\\',
                });
            }
        }
    }

    Ok(Unescaped {
        decoded: Some(result),
        invalid,
    })
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
