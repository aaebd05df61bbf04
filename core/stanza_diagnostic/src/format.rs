//! Bounded, allocation-free message formatting.
//!
//! Templates are printf-like with numbered parameters:
//!
//! - `%1`..`%9` substitute the corresponding argument string.
//! - `%%` emits a literal `%`.
//! - `%sN` pluralizes the preceding word: if argument N is the literal `"1"`
//!   nothing is emitted, otherwise an `s` is appended.
//! - `word%SNpluralform%` emits `word` when argument N is `"1"`, otherwise
//!   replaces `word` with `pluralform`.
//! - Any other specifier emits `[???]` literally.
//!
//! The formatter writes into a caller-supplied buffer and returns `None` on
//! overflow. It never allocates, so it is usable on the out-of-memory path.
//! The word needed by the plural forms is tracked as a boundary index while
//! writing; the formatter never scans backward.

/// Output writer that tracks the start of the most recent word.
struct Writer<'a> {
    out: &'a mut [u8],
    written: usize,
    word_start: usize,
}

impl Writer<'_> {
    fn push(&mut self, byte: u8) -> Option<()> {
        if self.written >= self.out.len() {
            return None;
        }
        self.out[self.written] = byte;
        self.written += 1;
        if byte.is_ascii_whitespace() {
            self.word_start = self.written;
        }
        Some(())
    }

    fn push_str(&mut self, text: &str) -> Option<()> {
        for byte in text.bytes() {
            self.push(byte)?;
        }
        Some(())
    }

    /// Drop everything written since the last word boundary.
    fn truncate_to_word(&mut self) {
        self.written = self.word_start;
    }
}

/// Argument for digit `'1'`..`'9'`; missing arguments substitute as empty.
fn arg_at<'a>(args: &[&'a str], digit: u8) -> &'a str {
    args.get(usize::from(digit - b'1')).copied().unwrap_or("")
}

/// Format `template` with `args` into `out`.
///
/// Returns the formatted text as a view into `out`, or `None` if the
/// buffer was too small.
pub fn format_message<'a>(template: &str, args: &[&str], out: &'a mut [u8]) -> Option<&'a str> {
    let written = format_into(template, args, out)?;
    // The writer only commits whole UTF-8 sequences or fails the entire
    // format, so the prefix is always valid.
    std::str::from_utf8(&out[..written]).ok()
}

fn format_into(template: &str, args: &[&str], out: &mut [u8]) -> Option<usize> {
    let bytes = template.as_bytes();
    let mut w = Writer {
        out,
        written: 0,
        word_start: 0,
    };

    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b != b'%' {
            w.push(b)?;
            i += 1;
            continue;
        }
        match bytes.get(i + 1).copied() {
            Some(b'%') => {
                w.push(b'%')?;
                i += 2;
            }
            Some(digit @ b'1'..=b'9') => {
                w.push_str(arg_at(args, digit))?;
                i += 2;
            }
            Some(b's') if matches!(bytes.get(i + 2), Some(b'1'..=b'9')) => {
                let digit = bytes[i + 2];
                if arg_at(args, digit) != "1" {
                    w.push(b's')?;
                }
                i += 3;
            }
            Some(b'S') if matches!(bytes.get(i + 2), Some(b'1'..=b'9')) => {
                let digit = bytes[i + 2];
                let body = i + 3;
                match bytes[body..].iter().position(|&b| b == b'%') {
                    Some(end) => {
                        if arg_at(args, digit) != "1" {
                            w.truncate_to_word();
                            w.push_str(&template[body..body + end])?;
                        }
                        i = body + end + 1;
                    }
                    None => {
                        // No closing percent: malformed specifier.
                        w.push_str("[???]")?;
                        i = body;
                    }
                }
            }
            _ => {
                w.push_str("[???]")?;
                i += if i + 1 < bytes.len() { 2 } else { 1 };
            }
        }
    }
    Some(w.written)
}
