//! Sentinel-terminated source buffer for zero-bounds-check scanning.
//!
//! The buffer guarantees a `0x00` sentinel byte after the source content,
//! allowing the lexer to detect EOF without explicit bounds checking. The
//! total buffer size is rounded up to the next 64-byte boundary, which also
//! provides safe padding for `peek()` and `peek2()` near the end.
//!
//! Raw byte input goes through [`decode_to_utf8`](crate::decode_to_utf8)
//! first, so the content stored here is always valid UTF-8 with the BOM
//! stripped. Allocation is fallible: every growth path goes through
//! `try_reserve` and surfaces [`SourceError::OutOfMemory`] instead of
//! aborting.

use crate::encoding::decode_to_utf8;
use crate::Cursor;

/// Cache line size in bytes, used for buffer alignment padding.
const CACHE_LINE: usize = 64;

/// Error raised while building a [`SourceBuffer`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SourceError {
    /// The allocator refused the request; `bytes` is the size that failed.
    OutOfMemory {
        /// Number of bytes the failed allocation asked for.
        bytes: usize,
    },
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfMemory { bytes } => {
                write!(f, "out of memory allocating {bytes} bytes for source")
            }
        }
    }
}

impl std::error::Error for SourceError {}

/// Sentinel-terminated source buffer.
///
/// # Layout
///
/// ```text
/// [source_bytes..., 0x00, padding_zeros...]
///  ^                ^     ^
///  0                |     rounded up to 64-byte boundary
///              source_len (sentinel)
/// ```
///
/// The sentinel byte at `source_len` is always `0x00`, as is every padding
/// byte after it, so `peek()` and `peek2()` are safe at any position.
#[derive(Clone, Debug, Default)]
pub struct SourceBuffer {
    /// Owned buffer: `[source_bytes..., 0x00 sentinel, 0x00 padding...]`.
    buf: Vec<u8>,
    /// Length of the actual source content (excludes sentinel and padding).
    source_len: u32,
}

/// Size assertion: Vec<u8> = 24, u32 = 4, + padding = 32 on 64-bit platforms.
const _: () = assert!(std::mem::size_of::<SourceBuffer>() <= 32);

impl SourceBuffer {
    /// Create an empty buffer. `cursor()` on an empty buffer is immediately
    /// at EOF.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sentinel-terminated buffer from UTF-8 text.
    ///
    /// Copies the text into a 64-byte-rounded buffer with a `0x00` sentinel
    /// appended. Sources longer than `u32::MAX` bytes are rejected as
    /// [`SourceError::OutOfMemory`] with the requested size.
    pub fn from_str(source: &str) -> Result<Self, SourceError> {
        let source_bytes = source.as_bytes();
        let source_len = source_bytes.len();

        if u32::try_from(source_len).is_err() {
            return Err(SourceError::OutOfMemory { bytes: source_len });
        }

        // Round up to the next 64-byte boundary (minimum: source + sentinel).
        let padded_len = (source_len + 1 + CACHE_LINE - 1) & !(CACHE_LINE - 1);

        let mut buf = Vec::new();
        buf.try_reserve_exact(padded_len)
            .map_err(|_| SourceError::OutOfMemory { bytes: padded_len })?;
        buf.extend_from_slice(source_bytes);
        // Sentinel plus zero padding up to the rounded length.
        buf.resize(padded_len, 0);

        #[allow(
            clippy::cast_possible_truncation,
            reason = "source_len checked against u32::MAX above"
        )]
        Ok(Self {
            buf,
            source_len: source_len as u32,
        })
    }

    /// Create a buffer from raw bytes in any supported encoding.
    ///
    /// Detects the BOM, converts to UTF-8, and strips the BOM. See
    /// [`decode_to_utf8`](crate::decode_to_utf8) for the conversion rules.
    pub fn from_bytes(raw: &[u8]) -> Result<Self, SourceError> {
        Self::from_str(&decode_to_utf8(raw))
    }

    /// Returns the source content as text (without sentinel or padding).
    #[allow(
        unsafe_code,
        reason = "content was validated or lossily converted to UTF-8 at construction"
    )]
    pub fn as_str(&self) -> &str {
        // SAFETY: `from_str` copies from `&str` and `from_bytes` routes through
        // `decode_to_utf8`, so `buf[..source_len]` is always valid UTF-8.
        unsafe { std::str::from_utf8_unchecked(&self.buf[..self.source_len as usize]) }
    }

    /// Returns the source bytes (without sentinel or padding).
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.source_len as usize]
    }

    /// Create a [`Cursor`] positioned at byte 0.
    pub fn cursor(&self) -> Cursor<'_> {
        if self.buf.is_empty() {
            // The empty buffer has no sentinel byte of its own.
            Cursor::new(EMPTY_SENTINEL, 0)
        } else {
            Cursor::new(&self.buf, self.source_len)
        }
    }

    /// Length of the source content in bytes (excludes sentinel and padding).
    pub fn len(&self) -> u32 {
        self.source_len
    }

    /// Returns `true` if the source content is empty.
    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }
}

/// Static sentinel region backing cursors over an empty default buffer.
static EMPTY_SENTINEL: &[u8] = &[0; CACHE_LINE];

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
