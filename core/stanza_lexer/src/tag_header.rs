//! Tag header parsing for the evaluator.
//!
//! A file header is a run of tag tokens. Each tag is a sigil followed by a
//! comma-separated list of tag names; the sigil decides whether the file
//! activates, deactivates, or gates on those tags.

/// Semantics of a tag token's leading sigil.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TagSigil {
    /// `*` — activate the first inactive tag in the list.
    Activate,
    /// `~` — deactivate the first active tag in the list.
    Deactivate,
    /// `+` — require any tag in the list to be active.
    RequireActive,
    /// `-` — require any tag in the list to be inactive.
    RequireInactive,
}

impl TagSigil {
    /// Map a sigil byte to its semantics.
    pub fn from_byte(byte: u8) -> Option<TagSigil> {
        match byte {
            b'*' => Some(TagSigil::Activate),
            b'~' => Some(TagSigil::Deactivate),
            b'+' => Some(TagSigil::RequireActive),
            b'-' => Some(TagSigil::RequireInactive),
            _ => None,
        }
    }

    /// The source byte for this sigil.
    pub fn byte(self) -> u8 {
        match self {
            TagSigil::Activate => b'*',
            TagSigil::Deactivate => b'~',
            TagSigil::RequireActive => b'+',
            TagSigil::RequireInactive => b'-',
        }
    }
}

/// Parse a tag token's lexeme (sigil included) into its sigil and tag names.
///
/// Empty list entries are dropped, so `*a,,b` yields `["a", "b"]`. Returns
/// `None` when the text does not start with a sigil byte.
pub fn parse_tag_header(text: &str) -> Option<(TagSigil, Vec<&str>)> {
    let sigil = TagSigil::from_byte(*text.as_bytes().first()?)?;
    let names = text[1..].split(',').filter(|n| !n.is_empty()).collect();
    Some((sigil, names))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
