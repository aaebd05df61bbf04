//! Configuration façade: the outward surface of the stanza core.
//!
//! A [`Configuration`] bundles one source buffer with its token stream,
//! diagnostic state, and lexer, and forwards the severity and error-limit
//! policies. A [`Context`] is the shared evaluation container: it owns the
//! section tree and tracks which configurations are attached to it, so that
//! whichever side is destroyed first can sever the link cleanly.

mod configuration;
mod context;

pub use configuration::{ConfigError, Configuration};
pub use context::{ConfigId, Context, SharedContext};
