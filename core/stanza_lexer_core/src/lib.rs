//! Low-level source handling for the stanza configuration core.
//!
//! Provides the sentinel-terminated [`SourceBuffer`] (with multi-encoding
//! ingestion), the copyable byte [`Cursor`] the lexer scans with, and the
//! on-demand line/column [`LineInfo`] resolver used when diagnostics are
//! emitted.
//!
//! This crate is standalone: it depends on nothing else in the workspace.

mod cursor;
mod encoding;
mod line_info;
mod source_buffer;

pub use cursor::Cursor;
pub use encoding::{decode_to_utf8, detect_encoding, Encoding};
pub use line_info::LineInfo;
pub use source_buffer::{SourceBuffer, SourceError};
