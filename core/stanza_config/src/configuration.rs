//! The per-source configuration object.
//!
//! Owns the source buffer, the token stream, the lexer state, and the
//! diagnostic state, and forwards the severity/error-limit policies. A
//! configuration may be attached to a shared [`Context`]; dropping either
//! side severs the link.

use std::rc::Weak;

use stanza_diagnostic::{Diagnostics, Report, Severity};
use stanza_lexer::{Lexer, Radix};
use stanza_lexer_core::{SourceBuffer, SourceError};
use stanza_model::{Token, TokenId, TokenList};
use thiserror::Error;
use tracing::{debug, trace};

use crate::context::{ConfigId, Context, SharedContext};

/// Error raised by configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Building the source buffer failed.
    #[error("source ingestion failed: {0}")]
    Source(#[from] SourceError),
    /// Reading source bytes from a stream failed.
    #[error("source read failed: {0}")]
    Io(#[from] std::io::Error),
}

/// One configuration: source, tokens, diagnostics, and policies.
///
/// Freshly initialized state carries zeroed counters, an unlimited error
/// limit, warning severity `Warning`, minimum severity `Normal`, and no
/// context attachment.
#[derive(Debug, Default)]
pub struct Configuration {
    id: Option<ConfigId>,
    source: SourceBuffer,
    tokens: TokenList,
    lexer: Lexer,
    radix: Radix,
    diags: Diagnostics,
    context: Option<Weak<std::cell::RefCell<Context>>>,
}

impl Configuration {
    pub fn new() -> Self {
        Configuration::default()
    }

    /// This configuration's registry identity. Assigned lazily on first
    /// context attachment.
    pub fn id(&self) -> Option<ConfigId> {
        self.id
    }

    // === Context attachment ===

    /// Create a fresh context with this configuration attached.
    pub fn create_context(&mut self) -> SharedContext {
        let ctx = Context::shared();
        self.attach_context(&ctx);
        ctx
    }

    /// Attach to `ctx`, detaching from any previous context first.
    pub fn attach_context(&mut self, ctx: &SharedContext) {
        self.detach_context();
        let id = *self.id.get_or_insert_with(ConfigId::next);
        ctx.borrow_mut().attach(id);
        self.context = Some(std::rc::Rc::downgrade(ctx));
    }

    /// Detach from the current context, if any. Safe to call when the
    /// context has already been dropped or finished.
    pub fn detach_context(&mut self) {
        if let (Some(weak), Some(id)) = (self.context.take(), self.id) {
            if let Some(ctx) = weak.upgrade() {
                ctx.borrow_mut().detach(id);
            }
        }
    }

    /// The attached context, if it is still alive and still lists this
    /// configuration in its registry.
    pub fn context(&self) -> Option<SharedContext> {
        let ctx = self.context.as_ref()?.upgrade()?;
        let id = self.id?;
        let attached = ctx.borrow().is_attached(id);
        attached.then(|| std::rc::Rc::clone(&ctx))
    }

    // === Source buffer ===

    /// Replace the source with UTF-8 text. Discards all tokens; byte offsets
    /// of previously lexed tokens are not preserved.
    pub fn set_source_str(&mut self, text: &str) -> Result<(), ConfigError> {
        self.replace_source(SourceBuffer::from_str(text)?);
        Ok(())
    }

    /// Replace the source with raw bytes in any supported encoding
    /// (BOM-detected UTF-8/16/32, converted lossily to UTF-8).
    pub fn set_source_bytes(&mut self, raw: &[u8]) -> Result<(), ConfigError> {
        self.replace_source(SourceBuffer::from_bytes(raw)?);
        Ok(())
    }

    /// Replace the source by draining a reader to completion.
    pub fn set_source_reader(&mut self, mut reader: impl std::io::Read) -> Result<(), ConfigError> {
        let mut raw = Vec::new();
        reader.read_to_end(&mut raw)?;
        self.set_source_bytes(&raw)
    }

    fn replace_source(&mut self, source: SourceBuffer) {
        debug!(len = source.len(), "source buffer replaced");
        self.source = source;
        self.tokens.clear();
        self.lexer = Lexer::with_radix(self.radix);
    }

    /// The source content as text.
    pub fn source(&self) -> &str {
        self.source.as_str()
    }

    /// Length of the source content in bytes.
    pub fn source_len(&self) -> u32 {
        self.source.len()
    }

    // === Policies ===

    pub fn filename(&self) -> Option<&str> {
        self.diags.filename()
    }

    /// Set the filename reported in diagnostic locations.
    pub fn set_filename(&mut self, filename: impl Into<String>) {
        self.diags.set_filename(filename);
    }

    pub fn max_errors(&self) -> u32 {
        self.diags.max_errors()
    }

    /// Set the error limit. `u32::MAX` disables the limit.
    pub fn set_max_errors(&mut self, max: u32) {
        self.diags.set_max_errors(max);
    }

    pub fn warning_severity(&self) -> Severity {
        self.diags.warning_severity()
    }

    /// Remap the severity applied to `Warning` reports.
    pub fn set_warning_severity(&mut self, severity: Severity) {
        self.diags.set_warning_severity(severity);
    }

    pub fn min_severity(&self) -> Severity {
        self.diags.min_severity()
    }

    /// Reports less severe than this are dropped before linking.
    pub fn set_min_severity(&mut self, severity: Severity) {
        self.diags.set_min_severity(severity);
    }

    pub fn radix(&self) -> Radix {
        self.radix
    }

    /// Set the numeric radix mode for subsequent lexing.
    pub fn set_radix(&mut self, radix: Radix) {
        self.radix = radix;
        self.lexer = Lexer::with_radix(radix);
    }

    // === Lexing ===

    /// Produce the next token, appending to the token stream or handing back
    /// an unlexed one. Returns `None` after a fatal report or once the error
    /// limit has been reached.
    pub fn lex(&mut self) -> Option<TokenId> {
        let id = self
            .lexer
            .next_token(&self.source, &mut self.tokens, &mut self.diags);
        match id {
            Some(id) => {
                trace!(index = id.index(), kind = ?self.tokens[id].kind, "lex");
            }
            None => {
                debug!(
                    errors = self.diags.error_count(),
                    limit = self.diags.max_errors(),
                    "lexing stopped"
                );
            }
        }
        id
    }

    /// Move the token cursor back one token; the next [`lex`](Self::lex)
    /// hands the same token out again.
    pub fn unlex(&mut self) -> bool {
        self.tokens.unlex()
    }

    /// The token stream lexed so far.
    pub fn tokens(&self) -> &TokenList {
        &self.tokens
    }

    /// Look up a token by id.
    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.tokens.get(id)
    }

    // === Diagnostics ===

    /// Diagnostic state: counters, policies, and linked reports.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diags
    }

    /// Mutable diagnostic state, for callers that submit their own reports.
    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diags
    }

    /// Linked reports in submission order; reversible for backward walks.
    pub fn reports(&self) -> impl DoubleEndedIterator<Item = &Report> {
        self.diags.iter()
    }

    pub fn error_count(&self) -> u32 {
        self.diags.error_count()
    }

    pub fn warning_count(&self) -> u32 {
        self.diags.warning_count()
    }

    /// Render one report as a terminal line.
    pub fn render_report(&self, report: &Report) -> String {
        self.diags.render_report(report)
    }

    /// Render every linked report, one line each.
    pub fn render_all(&self) -> Vec<String> {
        self.diags.render_all()
    }
}

impl Drop for Configuration {
    fn drop(&mut self) {
        self.detach_context();
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
