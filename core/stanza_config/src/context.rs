//! Shared evaluation context.
//!
//! A context owns the section tree produced by evaluation and a compact
//! registry of the configurations attached to it. Contexts are shared
//! single-threaded via `Rc<RefCell<_>>`; callers that thread them add their
//! own locking.
//!
//! Sub-context hierarchies (parent/children) are structurally present but no
//! caller links them yet; [`Context::link_child`] is the reserved operation.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use stanza_model::{Section, Token};
use tracing::debug;

/// Shared handle to a [`Context`].
pub type SharedContext = Rc<RefCell<Context>>;

/// Identity of a [`Configuration`](crate::Configuration), used by the
/// context registry. Ids are process-unique and never reused.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ConfigId(u64);

impl ConfigId {
    pub(crate) fn next() -> ConfigId {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        ConfigId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Evaluation container: sections plus attached-configuration registry.
#[derive(Debug, Default)]
pub struct Context {
    sections: Vec<Section>,
    /// Compact registry of attached configurations; removal swaps with the
    /// last entry, so order is not meaningful.
    configs: Vec<ConfigId>,
    parent: Option<Weak<RefCell<Context>>>,
    children: Vec<SharedContext>,
}

impl Context {
    pub fn new() -> Self {
        Context::default()
    }

    /// Create an empty context behind a shared handle.
    pub fn shared() -> SharedContext {
        Rc::new(RefCell::new(Context::new()))
    }

    /// Register an attached configuration. Attaching twice is a no-op.
    pub(crate) fn attach(&mut self, id: ConfigId) {
        if !self.configs.contains(&id) {
            debug!(?id, "context attach");
            self.configs.push(id);
        }
    }

    /// Remove a configuration from the registry by swapping with the last
    /// entry. Detaching an id that is not registered is a no-op.
    pub(crate) fn detach(&mut self, id: ConfigId) {
        if let Some(index) = self.configs.iter().position(|&c| c == id) {
            debug!(?id, "context detach");
            self.configs.swap_remove(index);
        }
    }

    /// Returns `true` while `id` is registered with this context.
    pub fn is_attached(&self, id: ConfigId) -> bool {
        self.configs.contains(&id)
    }

    /// Ids of the attached configurations, in registry order.
    pub fn configurations(&self) -> &[ConfigId] {
        &self.configs
    }

    /// Create a named section at the tail of the section list.
    pub fn add_section(&mut self, name: impl Into<String>) -> &mut Section {
        self.sections.push(Section::new(name));
        // Just pushed, so the list is non-empty.
        let last = self.sections.len() - 1;
        &mut self.sections[last]
    }

    /// Create a section named by a token's lexeme.
    pub fn add_section_for_token(&mut self, token: &Token, source: &str) -> &mut Section {
        self.add_section(token.slice(source))
    }

    /// Create the unnamed global section at the tail of the section list.
    pub fn add_global_section(&mut self) -> &mut Section {
        self.sections.push(Section::global());
        let last = self.sections.len() - 1;
        &mut self.sections[last]
    }

    /// Sections in creation order. Names are not unique; the evaluator
    /// resolves duplicates by position.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Mutable access to the section list.
    pub fn sections_mut(&mut self) -> &mut [Section] {
        &mut self.sections
    }

    pub fn first_section(&self) -> Option<&Section> {
        self.sections.first()
    }

    pub fn last_section(&self) -> Option<&Section> {
        self.sections.last()
    }

    /// Parent context, if this context has been linked as a child.
    pub fn parent(&self) -> Option<SharedContext> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    /// Child contexts in link order.
    pub fn children(&self) -> &[SharedContext] {
        &self.children
    }

    /// Link `child` under `parent`. Reserved: no caller links sub-contexts
    /// yet, but [`Context::finish`] already tears linked children down.
    pub fn link_child(parent: &SharedContext, child: &SharedContext) {
        child.borrow_mut().parent = Some(Rc::downgrade(parent));
        parent.borrow_mut().children.push(Rc::clone(child));
    }

    /// Tear the context down: unlink from any parent, finish every child
    /// recursively, clear the configuration registry, and drop all sections.
    ///
    /// Attached configurations observe the teardown through the registry:
    /// their context accessor reports detachment once their id is gone.
    pub fn finish(ctx: &SharedContext) {
        debug!("context finish");
        let (parent, children) = {
            let mut inner = ctx.borrow_mut();
            inner.configs.clear();
            inner.sections.clear();
            (inner.parent.take(), std::mem::take(&mut inner.children))
        };
        if let Some(parent) = parent.and_then(|weak| weak.upgrade()) {
            parent
                .borrow_mut()
                .children
                .retain(|child| !Rc::ptr_eq(child, ctx));
        }
        for child in children {
            Context::finish(&child);
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
