use std::fmt;

/// Severity level for reports, ordered from most severe (lowest ordinal)
/// to least.
///
/// `Silent` suppresses a report entirely; it doubles as the "not raised"
/// sentinel for the embedded out-of-memory report.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Severity {
    /// Unrecoverable failure (out of memory). Lexing stops.
    Panic = 0,
    Error = 1,
    Warning = 2,
    Remark = 3,
    Normal = 4,
    Verbose = 5,
    /// Suppressed entirely.
    Silent = 6,
}

impl Severity {
    /// Prompt string prefixed to rendered messages.
    pub fn prompt(self) -> &'static str {
        match self {
            Severity::Panic => "error: (fatal) ",
            Severity::Error => "error: ",
            Severity::Warning => "warning: ",
            Severity::Remark => "remark: ",
            Severity::Normal | Severity::Verbose | Severity::Silent => "",
        }
    }

    /// Returns `true` for severities counted against the error limit.
    pub fn counts_as_error(self) -> bool {
        self <= Severity::Error
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Panic => "panic",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Remark => "remark",
            Severity::Normal => "normal",
            Severity::Verbose => "verbose",
            Severity::Silent => "silent",
        };
        f.write_str(name)
    }
}
