use crate::{format_message, MessageId, Report, Severity};

/// Size of the scratch ring used to render the out-of-memory byte count.
const SCRATCH_LEN: usize = 128;

/// Rendering buffer size for a single formatted message.
const RENDER_LEN: usize = 512;

/// Per-configuration diagnostic state.
///
/// Owns the report list, the error/warning counters, the severity policies,
/// and a pre-allocated out-of-memory report. Raising OOM requires no
/// allocation: the embedded report's severity is flipped from `Silent` to
/// `Panic` in place and the byte count is rendered into a fixed scratch
/// buffer.
#[derive(Clone, Debug)]
pub struct Diagnostics {
    reports: Vec<Report>,
    /// Embedded OOM report; `Silent` means "not raised".
    oom: Report,
    /// Scratch bytes holding the rendered OOM byte count.
    scratch: [u8; SCRATCH_LEN],
    scratch_len: usize,
    errors: u32,
    warnings: u32,
    /// `u32::MAX` means unlimited.
    max_errors: u32,
    /// Effective severity applied to `Warning` reports.
    warning_severity: Severity,
    /// Reports less severe than this are dropped before linking.
    min_severity: Severity,
    /// Inherited by reports that carry a line but no filename.
    filename: Option<String>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics {
            reports: Vec::new(),
            oom: Report::new(Severity::Silent, MessageId::OutOfMemory),
            scratch: [0; SCRATCH_LEN],
            scratch_len: 0,
            errors: 0,
            warnings: 0,
            max_errors: u32::MAX,
            warning_severity: Severity::Warning,
            min_severity: Severity::Normal,
            filename: None,
        }
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn set_filename(&mut self, filename: impl Into<String>) {
        self.filename = Some(filename.into());
    }

    pub fn max_errors(&self) -> u32 {
        self.max_errors
    }

    /// Set the error limit. `u32::MAX` disables the limit.
    pub fn set_max_errors(&mut self, max: u32) {
        self.max_errors = max;
    }

    pub fn warning_severity(&self) -> Severity {
        self.warning_severity
    }

    /// Remap `Warning` reports, e.g. to `Error` to promote warnings or to
    /// `Silent` to hush them.
    pub fn set_warning_severity(&mut self, severity: Severity) {
        self.warning_severity = severity;
    }

    pub fn min_severity(&self) -> Severity {
        self.min_severity
    }

    /// Reports less severe than `severity` are dropped before linking.
    pub fn set_min_severity(&mut self, severity: Severity) {
        self.min_severity = severity;
    }

    /// The severity a report of `severity` would be linked with.
    pub fn effective_severity(&self, severity: Severity) -> Severity {
        if severity == Severity::Warning {
            self.warning_severity
        } else {
            severity
        }
    }

    /// Submit a report, applying the severity policies and counters.
    ///
    /// Returns `true` if the report was linked. Dropped reports (filtered by
    /// the minimum-severity policy) and allocation failures return `false`;
    /// the latter also raises the embedded OOM report.
    pub fn submit(&mut self, mut report: Report) -> bool {
        let effective = self.effective_severity(report.severity);
        // A Silent minimum suppresses everything; otherwise drop reports
        // less severe than the minimum. Silent reports are never linked.
        if self.min_severity == Severity::Silent || effective > self.min_severity {
            return false;
        }

        let payload: usize = std::mem::size_of::<Report>()
            + report.args.iter().map(String::len).sum::<usize>();
        if self.reports.try_reserve(1).is_err() {
            self.raise_oom(payload);
            return false;
        }

        report.severity = effective;
        if report.location.filename.is_none() && report.location.line != 0 {
            report.location.filename = self.filename.clone();
        }
        report.template = Some(report.effective_template());
        self.reports.push(report);

        if effective.counts_as_error() {
            self.errors += 1;
        }
        if effective == Severity::Warning {
            self.warnings += 1;
        }
        true
    }

    /// Raise the embedded out-of-memory report.
    ///
    /// Idempotent: once raised, further signals are ignored. `bytes` is the
    /// size of the allocation that failed, rendered into the scratch buffer
    /// so the report needs no owned argument.
    #[cold]
    pub fn raise_oom(&mut self, bytes: usize) {
        if self.oom_raised() {
            return;
        }
        self.render_scratch(bytes);
        self.oom.severity = Severity::Panic;
        self.oom.template = Some(MessageId::OutOfMemory.template());
        self.errors += 1;
    }

    /// Returns `true` once the embedded OOM report has been raised.
    pub fn oom_raised(&self) -> bool {
        self.oom.severity != Severity::Silent
    }

    /// Linked reports in submission order, the raised OOM report last.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Report> {
        let oom = self.oom_raised().then_some(&self.oom);
        self.reports.iter().chain(oom)
    }

    /// Number of linked reports, including a raised OOM report.
    pub fn len(&self) -> usize {
        self.reports.len() + usize::from(self.oom_raised())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Severity of the most recently linked report.
    ///
    /// A raised OOM report is always considered the tail.
    pub fn tail_severity(&self) -> Option<Severity> {
        if self.oom_raised() {
            return Some(Severity::Panic);
        }
        self.reports.last().map(|r| r.severity)
    }

    pub fn error_count(&self) -> u32 {
        self.errors
    }

    pub fn warning_count(&self) -> u32 {
        self.warnings
    }

    /// Returns `true` once the error counter has reached the configured
    /// limit. The lexer emits one final report and stops when this trips.
    pub fn error_limit_reached(&self) -> bool {
        self.max_errors != u32::MAX && self.errors >= self.max_errors
    }

    /// Render one report as a terminal line (without trailing newline):
    /// `<filename>(<line>:<col>): <prompt><message>`.
    ///
    /// The location is omitted when the report has no filename; the column
    /// is omitted when zero.
    pub fn render_report(&self, report: &Report) -> String {
        use std::fmt::Write as _;

        let mut line = String::new();
        if let Some(filename) = &report.location.filename {
            let _ = if report.location.column != 0 {
                write!(
                    line,
                    "{filename}({}:{}): ",
                    report.location.line, report.location.column
                )
            } else {
                write!(line, "{filename}({}): ", report.location.line)
            };
        }
        line.push_str(report.severity.prompt());

        let template = report.effective_template();
        let mut buf = [0u8; RENDER_LEN];
        let scratch = self.scratch_str();
        let formatted = if report.id == MessageId::OutOfMemory && report.args.is_empty() {
            // The OOM report's only argument lives in the scratch buffer.
            format_message(template, &[scratch], &mut buf)
        } else {
            let mut args = [""; crate::MAX_ARGS];
            for (slot, arg) in args.iter_mut().zip(&report.args) {
                *slot = arg.as_str();
            }
            format_message(template, &args[..report.args.len()], &mut buf)
        };
        line.push_str(formatted.unwrap_or(template));
        line
    }

    /// Render every linked report, one line each.
    pub fn render_all(&self) -> Vec<String> {
        self.iter().map(|r| self.render_report(r)).collect()
    }

    fn render_scratch(&mut self, mut bytes: usize) {
        let mut tmp = [0u8; 20];
        let mut i = tmp.len();
        loop {
            i -= 1;
            #[allow(
                clippy::cast_possible_truncation,
                reason = "value is a single decimal digit"
            )]
            {
                tmp[i] = b'0' + (bytes % 10) as u8;
            }
            bytes /= 10;
            if bytes == 0 {
                break;
            }
        }
        let digits = &tmp[i..];
        self.scratch[..digits.len()].copy_from_slice(digits);
        self.scratch_len = digits.len();
    }

    fn scratch_str(&self) -> &str {
        std::str::from_utf8(&self.scratch[..self.scratch_len]).unwrap_or("")
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
