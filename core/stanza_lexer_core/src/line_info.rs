//! On-demand line and column resolution for diagnostics.
//!
//! Diagnostics are rare relative to tokens, so no line table is built up
//! front. When a report needs a location, [`LineInfo::resolve`] walks the
//! source once, recognizing `\n`, `\r`, and `\r\n` as line terminators.

/// Resolved line, column, and line text for a byte offset.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LineInfo<'a> {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number (byte column within the line).
    pub column: u32,
    /// Text of the line containing the offset, without its terminator.
    pub text: &'a str,
}

impl<'a> LineInfo<'a> {
    /// Resolve `offset` (a byte index into `source`) to its line, column,
    /// and containing line text.
    ///
    /// Offsets at or past the end of the source resolve to the last line,
    /// one column past its final byte. `\r\n` counts as a single terminator.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "positions derive from a source bounded by u32::MAX bytes"
    )]
    pub fn resolve(source: &'a str, offset: u32) -> Self {
        let bytes = source.as_bytes();
        let target = (offset as usize).min(bytes.len());

        let mut line = 1u32;
        let mut line_start = 0usize;
        let mut i = 0usize;
        while i < target {
            match bytes[i] {
                b'\n' => {
                    line += 1;
                    i += 1;
                    line_start = i;
                }
                b'\r' => {
                    line += 1;
                    i += 1;
                    // \r\n is a single terminator.
                    if i < target && bytes[i] == b'\n' {
                        i += 1;
                    }
                    line_start = i;
                }
                _ => i += 1,
            }
        }

        let line_end = bytes[line_start..]
            .iter()
            .position(|&b| b == b'\n' || b == b'\r')
            .map_or(bytes.len(), |p| line_start + p);

        Self {
            line,
            column: (target - line_start) as u32 + 1,
            text: &source[line_start..line_end],
        }
    }
}
