//! Diagnostic subsystem for the stanza configuration core.
//!
//! Reports carry a [`Severity`], a stable [`MessageId`] (for localization),
//! up to four argument strings, and a resolved source [`Location`]. The
//! per-configuration [`Diagnostics`] state owns the report list, the
//! error/warning counters, the severity policies, and a pre-raised
//! out-of-memory report that can be emitted without allocating.
//!
//! Message templates use numbered parameters (`%1`..`%9`) with pluralization
//! markers; see [`format_message`].

mod format;
mod message;
mod report;
mod severity;
mod state;

pub use format::format_message;
pub use message::MessageId;
pub use report::{Location, Report, MAX_ARGS};
pub use severity::Severity;
pub use state::Diagnostics;
