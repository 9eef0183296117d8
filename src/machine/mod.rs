//! The machine: owns a state pool and drives transitions and dispatch.
//!
//! All operations are synchronous and run to completion on the caller's
//! thread. Nothing here allocates.

mod error;

pub use error::MachineError;

use crate::builder::MachineBuilder;
use crate::core::{Context, Dispatch, Exposes, MachineId, Member, Owner, StatePool};
use std::fmt;

/// Name used by machines constructed without one.
pub const DEFAULT_NAME: &str = "fsm";

/// How a machine reports operations attempted before initialization.
///
/// Either way the operation is a no-op; only the log level differs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UninitializedPolicy {
    /// Log at `debug`. Suits control loops that may start dispatching
    /// before the initial state is chosen.
    #[default]
    Silent,

    /// Log at `warn`.
    Warn,
}

/// Outcome of a transition request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transit {
    /// The current state changed; leave and enter hooks ran.
    Moved,

    /// The target was already current; no hook ran.
    Unchanged,

    /// No initial state was set; nothing happened.
    Uninitialized,
}

impl Transit {
    /// Whether the current state changed.
    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Moved)
    }
}

/// Outcome of an event dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatched {
    /// The current state's handler ran.
    Delivered,

    /// No initial state was set; no handler ran.
    Uninitialized,
}

impl Dispatched {
    /// Whether a handler ran.
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

/// A finite state machine over the fixed pool `P`.
///
/// The machine owns one instance of every state declared in `P` for its
/// whole lifetime. It starts with no current state; call
/// [`set_initial_state`](Self::set_initial_state) before dispatching.
///
/// # Example
///
/// ```rust
/// use tfsm::{state_pool, Context, Machine, React, State, Transit};
///
/// struct Arrived;
///
/// #[derive(Default)]
/// struct Travelling;
/// impl State<Trip> for Travelling {}
/// impl React<Trip, Arrived> for Travelling {
///     fn react(&mut self, _event: Arrived, ctx: &mut Context<Trip>) {
///         ctx.transit::<Parked>();
///     }
/// }
///
/// #[derive(Default)]
/// struct Parked;
/// impl State<Trip> for Parked {}
/// impl React<Trip, Arrived> for Parked {}
///
/// state_pool! {
///     struct Trip {
///         travelling: Travelling,
///         parked: Parked,
///     }
/// }
///
/// let mut machine = Machine::<Trip>::named("trip");
/// machine.set_initial_state::<Travelling>();
/// machine.dispatch(Arrived);
/// assert_eq!(machine.current_name(), Some("Parked"));
/// assert_eq!(machine.transit::<Parked>(), Transit::Unchanged);
/// ```
pub struct Machine<P> {
    states: P,
    owner: Owner<P>,
    current: Option<usize>,
    pending: Option<usize>,
    policy: UninitializedPolicy,
}

impl<P: StatePool> Machine<P> {
    /// Construct a machine named [`DEFAULT_NAME`].
    pub fn new() -> Self {
        Self::named(DEFAULT_NAME)
    }

    /// Construct a machine with a name used in log output and errors.
    pub fn named(name: &'static str) -> Self {
        Self::with_policy(name, UninitializedPolicy::default())
    }

    /// Start configuring a machine.
    pub fn builder() -> MachineBuilder<P> {
        MachineBuilder::new()
    }

    /// Builds the pool in declaration order, then attaches every state to
    /// the new machine. No lifecycle hook runs here.
    pub(crate) fn with_policy(name: &'static str, policy: UninitializedPolicy) -> Self {
        let owner = Owner::new(MachineId::next(), name);
        let mut states = P::default();
        states.for_each_mut(&mut |state| state.attach(owner));
        log::debug!("{}: constructed {} with {} states", name, owner.id(), P::LEN);

        Self {
            states,
            owner,
            current: None,
            pending: None,
            policy,
        }
    }

    /// Process-unique identity of this machine.
    pub fn id(&self) -> MachineId {
        self.owner.id()
    }

    /// Name used in log output and errors.
    pub fn name(&self) -> &'static str {
        self.owner.name()
    }

    /// The back-reference handed to this machine's states.
    pub fn owner(&self) -> Owner<P> {
        self.owner
    }

    /// How operations before initialization are reported.
    pub fn policy(&self) -> UninitializedPolicy {
        self.policy
    }

    /// Whether an initial state has been set.
    pub fn is_initialized(&self) -> bool {
        self.current.is_some()
    }

    /// Whether `S` is the current state.
    pub fn is_in<S: Member<P>>(&self) -> bool {
        self.current == Some(S::INDEX)
    }

    /// Pool index of the current state.
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Declared name of the current state.
    pub fn current_name(&self) -> Option<&'static str> {
        self.current.map(name_of::<P>)
    }

    /// The pool's instance of `S`, current or not.
    pub fn state<S: Member<P>>(&self) -> &S {
        S::slot(&self.states)
    }

    /// Mutable access to the pool's instance of `S`.
    pub fn state_mut<S: Member<P>>(&mut self) -> &mut S {
        S::slot_mut(&mut self.states)
    }

    /// Make `S` current and run its enter hook.
    ///
    /// Meant for initialization. Calling it again re-enters `S` without
    /// running the leave hook of whatever was current.
    pub fn set_initial_state<S: Member<P>>(&mut self) {
        log::debug!("{}: initial state [{}]", self.name(), name_of::<P>(S::INDEX));
        self.enter(S::INDEX);
        self.settle();
    }

    /// Move to `S`, running the leave hook of the current state and then
    /// the enter hook of `S`.
    ///
    /// Does nothing when `S` is already current, or when no initial state
    /// was set.
    pub fn transit<S: Member<P>>(&mut self) -> Transit {
        let outcome = self.switch(S::INDEX);
        if outcome == Transit::Uninitialized {
            self.report_uninitialized("transit");
        }
        self.settle();
        outcome
    }

    /// Like [`transit`](Self::transit), but fails when no initial state was
    /// set.
    pub fn try_transit<S: Member<P>>(&mut self) -> Result<Transit, MachineError> {
        self.ensure_initialized("transit")?;
        Ok(self.transit::<S>())
    }

    /// Deliver `event` to the current state's [`React`](crate::React)
    /// handler.
    ///
    /// A transition requested by the handler is applied before this
    /// returns. Does nothing when no initial state was set.
    pub fn dispatch<E>(&mut self, event: E) -> Dispatched
    where
        P: Dispatch<E>,
    {
        let Some(index) = self.current else {
            self.report_uninitialized("dispatch");
            return Dispatched::Uninitialized;
        };

        log::trace!(
            "{}: [{}] received {}",
            self.name(),
            name_of::<P>(index),
            std::any::type_name::<E>()
        );
        let mut ctx = self.context();
        self.states.deliver(index, event, &mut ctx);
        self.absorb(ctx);
        self.settle();
        Dispatched::Delivered
    }

    /// Like [`dispatch`](Self::dispatch), but fails when no initial state
    /// was set.
    pub fn try_dispatch<E>(&mut self, event: E) -> Result<Dispatched, MachineError>
    where
        P: Dispatch<E>,
    {
        self.ensure_initialized("dispatch")?;
        Ok(self.dispatch(event))
    }

    /// Hand the current state to `handle` through the capability `C`.
    ///
    /// `C` is a trait object listed under `expose:` when the pool was
    /// declared.
    pub fn dispatch_as<C, F>(&mut self, handle: F) -> Dispatched
    where
        C: ?Sized,
        P: Exposes<C>,
        F: FnOnce(&mut C, &mut Context<P>),
    {
        let Some(index) = self.current else {
            self.report_uninitialized("dispatch");
            return Dispatched::Uninitialized;
        };

        let mut ctx = self.context();
        if let Some(state) = self.states.slot_as(index) {
            handle(state, &mut ctx);
        }
        self.absorb(ctx);
        self.settle();
        Dispatched::Delivered
    }

    /// Run the reset hook of every state, in declaration order.
    ///
    /// The current state stays current and no enter or leave hook runs.
    pub fn reset(&mut self) {
        log::debug!("{}: resetting {} states", self.name(), P::LEN);
        self.states.for_each_mut(&mut |state| state.reset());
    }

    /// A fresh view of this machine for one hook or handler call.
    fn context(&self) -> Context<P> {
        Context::new(self.owner, self.current)
    }

    /// Keeps the transition request left in `ctx`; the rest is discarded.
    fn absorb(&mut self, ctx: Context<P>) {
        if let Some(target) = ctx.into_pending() {
            self.pending = Some(target);
        }
    }

    fn enter(&mut self, index: usize) {
        self.current = Some(index);
        let mut ctx = self.context();
        if let Some(state) = self.states.slot_mut(index) {
            log::trace!("{}: enter [{}]", self.owner.name(), name_of::<P>(index));
            state.on_enter(&mut ctx);
        }
        self.absorb(ctx);
    }

    fn switch(&mut self, target: usize) -> Transit {
        let Some(current) = self.current else {
            return Transit::Uninitialized;
        };
        if current == target {
            return Transit::Unchanged;
        }

        log::debug!(
            "{}: [{}] -> [{}]",
            self.name(),
            name_of::<P>(current),
            name_of::<P>(target)
        );
        let mut ctx = self.context();
        if let Some(state) = self.states.slot_mut(current) {
            log::trace!("{}: leave [{}]", self.owner.name(), name_of::<P>(current));
            state.on_leave(&mut ctx);
        }
        self.absorb(ctx);
        self.enter(target);
        Transit::Moved
    }

    /// Applies transitions requested from hooks and handlers until none
    /// remain.
    fn settle(&mut self) {
        while let Some(target) = self.pending.take() {
            self.switch(target);
        }
    }

    fn report_uninitialized(&self, operation: &'static str) {
        match self.policy {
            UninitializedPolicy::Silent => {
                log::debug!("{}: {} ignored, no initial state", self.name(), operation)
            }
            UninitializedPolicy::Warn => {
                log::warn!("{}: {} ignored, no initial state", self.name(), operation)
            }
        }
    }

    fn ensure_initialized(&self, operation: &'static str) -> Result<(), MachineError> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(MachineError::Uninitialized {
                machine: self.name(),
                operation,
            })
        }
    }
}

impl<P: StatePool> Default for Machine<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: StatePool> fmt::Debug for Machine<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("name", &self.name())
            .field("id", &self.id())
            .field("current", &self.current_name())
            .field("states", &P::NAMES)
            .finish()
    }
}

fn name_of<P: StatePool>(index: usize) -> &'static str {
    P::NAMES.get(index).copied().unwrap_or("<unknown>")
}
