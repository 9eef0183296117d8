//! Back-references from states to the machine that owns them.
//!
//! A state never holds its machine. It receives an [`Owner`] handle when the
//! pool is built and a [`Context`] on every hook and handler call. Both are
//! non-owning: the machine always outlives its states.

use crate::core::index::Member;
use crate::core::pool::StatePool;
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_MACHINE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a machine instance.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct MachineId(u64);

impl MachineId {
    pub(crate) fn next() -> Self {
        Self(NEXT_MACHINE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MachineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fsm#{}", self.0)
    }
}

/// Weak handle to the machine owning a pool of type `P`.
///
/// Handed to every state through [`State::attach`](crate::State::attach)
/// before any lifecycle hook runs. It contributes nothing to the machine's
/// lifetime and cannot be used to reach another machine's pool.
///
/// An `Owner` identifies the machine; it does not drive it. A state requests
/// transitions on its own machine through the [`Context`] passed to its hooks
/// and handlers, whose [`Context::owner`] equals the `Owner` given at attach.
pub struct Owner<P> {
    id: MachineId,
    name: &'static str,
    _pool: PhantomData<fn() -> P>,
}

impl<P> Owner<P> {
    pub(crate) fn new(id: MachineId, name: &'static str) -> Self {
        Self {
            id,
            name,
            _pool: PhantomData,
        }
    }

    /// Identity of the owning machine.
    pub fn id(&self) -> MachineId {
        self.id
    }

    /// Name the owning machine was configured with.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<P> Clone for Owner<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for Owner<P> {}

impl<P> PartialEq for Owner<P> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<P> Eq for Owner<P> {}

impl<P> fmt::Debug for Owner<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Owner")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

/// The machine-side view handed to hooks and event handlers.
///
/// Built fresh for every hook or handler call from the machine's identity and
/// current-state cursor; the machine never stores it. Handlers cannot move
/// the cursor directly: [`Context::transit`] records a request, and the
/// engine reads back only that request once the call returns. Swapping or
/// overwriting a context therefore cannot change which machine a pool
/// belongs to or which state is current.
pub struct Context<P> {
    owner: Owner<P>,
    current: Option<usize>,
    pending: Option<usize>,
}

impl<P: StatePool> Context<P> {
    pub(crate) fn new(owner: Owner<P>, current: Option<usize>) -> Self {
        Self {
            owner,
            current,
            pending: None,
        }
    }

    /// Handle to the machine this context belongs to.
    pub fn owner(&self) -> Owner<P> {
        self.owner
    }

    /// Request a transition to `S` on the owning machine.
    ///
    /// Applied once the current hook or handler returns. When several
    /// requests are made in one call, the last one wins.
    pub fn transit<S: Member<P>>(&mut self) {
        self.pending = Some(S::INDEX);
    }

    /// Whether `S` was current when this hook or handler was called.
    pub fn is_current<S: Member<P>>(&self) -> bool {
        self.current == Some(S::INDEX)
    }

    /// Declared name of the state current when this call started.
    pub fn current_name(&self) -> Option<&'static str> {
        self.current.and_then(|index| P::NAMES.get(index).copied())
    }

    /// Whether a transition request is waiting to be applied.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The transition request left in this context, if any.
    pub(crate) fn into_pending(self) -> Option<usize> {
        self.pending
    }
}

impl<P: StatePool> fmt::Debug for Context<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("owner", &self.owner)
            .field("current", &self.current_name())
            .field("pending", &self.pending.and_then(|index| P::NAMES.get(index)))
            .finish()
    }
}
