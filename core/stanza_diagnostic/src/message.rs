use std::fmt;

/// Stable message ids for all core diagnostics.
///
/// Ids are stable across releases so localization tables can key on them:
/// - 0..=99: runtime/resource messages
/// - 100..=199: lexer messages
///
/// The evaluator reserves its own ranges above these.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MessageId {
    /// Allocation failed; argument 1 is the attempted byte count.
    OutOfMemory = 0,
    /// The configured error limit was reached; argument 1 is the limit.
    TooManyErrors = 1,

    /// Byte that starts no token; argument 1 is the offending character.
    LexerInvalidToken = 100,
    /// Numeric literal exceeded the representable range.
    LexerOverflow = 101,
    /// Block comment still open at end of input.
    LexerOpenComment = 102,
    /// Unrecognized escape sequence; argument 1 is the sequence.
    LexerInvalidEscape = 103,
}

impl MessageId {
    /// Default English template for this message.
    ///
    /// Templates use the numbered-parameter syntax of
    /// [`format_message`](crate::format_message).
    pub fn template(self) -> &'static str {
        match self {
            MessageId::OutOfMemory => "Ran out of memory while allocating %1 byte%s1",
            MessageId::TooManyErrors => "Exiting because the limit of %1 error%s1 was reached",
            MessageId::LexerInvalidToken => "Invalid character '%1'",
            MessageId::LexerOverflow => "Number is too large",
            MessageId::LexerOpenComment => "Multi-line comment never closes",
            MessageId::LexerInvalidEscape => "Invalid escape sequence '%1' in string",
        }
    }

    /// Numeric id, stable for localization tables.
    pub fn code(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M{:04}", self.code())
    }
}
