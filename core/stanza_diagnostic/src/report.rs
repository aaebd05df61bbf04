use smallvec::SmallVec;

use crate::{MessageId, Severity};

/// Maximum number of argument strings a report may carry.
pub const MAX_ARGS: usize = 4;

/// Source location attached to a report.
///
/// `line` and `column` are 1-based; a zero column is omitted from rendered
/// output. `filename` is inherited from the owning configuration at
/// submission time when unset.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Location {
    pub filename: Option<String>,
    pub line: u32,
    pub column: u32,
    /// Text of the offending line, captured at submission.
    pub line_text: Option<String>,
}

impl Location {
    /// Location with line and column but no filename yet.
    pub fn at(line: u32, column: u32) -> Self {
        Location {
            filename: None,
            line,
            column,
            line_text: None,
        }
    }

    /// Returns `true` when no position information is present.
    pub fn is_unset(&self) -> bool {
        self.line == 0 && self.filename.is_none()
    }
}

/// A single diagnostic report.
///
/// Built by the emitting component, then handed to
/// [`Diagnostics::submit`](crate::Diagnostics::submit), which applies the
/// severity policies and takes ownership. Reports are self-contained after
/// submission: arguments and location text are owned copies.
#[derive(Clone, Debug, Eq, PartialEq)]
#[must_use = "reports should be submitted, not silently dropped"]
pub struct Report {
    pub severity: Severity,
    pub id: MessageId,
    /// Message template; `None` resolves to the id's default at submission.
    pub template: Option<&'static str>,
    /// Positional arguments for `%1`..`%9` in the template.
    pub args: SmallVec<[String; MAX_ARGS]>,
    pub location: Location,
}

impl Report {
    /// Create a report with no arguments and an unset location.
    pub fn new(severity: Severity, id: MessageId) -> Self {
        Report {
            severity,
            id,
            template: None,
            args: SmallVec::new(),
            location: Location::default(),
        }
    }

    /// Append a positional argument. Arguments beyond [`MAX_ARGS`] are
    /// dropped.
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        if self.args.len() < MAX_ARGS {
            self.args.push(arg.into());
        }
        self
    }

    /// Attach a source location.
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Override the default template for this message id.
    pub fn with_template(mut self, template: &'static str) -> Self {
        self.template = Some(template);
        self
    }

    /// The template this report will render with.
    pub fn effective_template(&self) -> &'static str {
        self.template.unwrap_or_else(|| self.id.template())
    }
}
