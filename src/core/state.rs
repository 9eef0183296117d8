//! Lifecycle and event-handling traits implemented by state types.

use crate::core::context::{Context, Owner};

/// A behavioral mode of a machine whose pool is `P`.
///
/// Every hook defaults to a no-op. The trait is object safe: the engine
/// calls hooks through `&mut dyn State<P>`.
///
/// # Example
///
/// ```rust
/// use tfsm::{state_pool, Context, Machine, State};
///
/// #[derive(Default)]
/// struct Docked {
///     entries: u32,
/// }
///
/// impl State<Rover> for Docked {
///     fn on_enter(&mut self, _ctx: &mut Context<Rover>) {
///         self.entries += 1;
///     }
///
///     fn reset(&mut self) {
///         self.entries = 0;
///     }
/// }
///
/// state_pool! {
///     struct Rover {
///         docked: Docked,
///     }
/// }
///
/// let mut machine = Machine::<Rover>::new();
/// machine.set_initial_state::<Docked>();
/// assert_eq!(machine.state::<Docked>().entries, 1);
/// ```
pub trait State<P> {
    /// Receives the back-reference to the owning machine.
    ///
    /// Called once per state while the machine is being constructed, after
    /// every state has been created and before any other hook. The [`Owner`]
    /// only identifies the machine; transitions are requested through the
    /// [`Context`] handed to the other hooks and to event handlers.
    fn attach(&mut self, _owner: Owner<P>) {}

    /// Called when the state becomes current.
    fn on_enter(&mut self, _ctx: &mut Context<P>) {}

    /// Called when the state stops being current.
    fn on_leave(&mut self, _ctx: &mut Context<P>) {}

    /// Clears the state's private bookkeeping.
    ///
    /// Runs on every state of the pool, current or not. Must not assume the
    /// state is current.
    fn reset(&mut self) {}
}

/// Capability to handle events of type `E`.
///
/// A pool can dispatch `E` only when every declared state implements
/// `React<P, E>`. States that ignore the event opt in with an empty impl.
pub trait React<P, E> {
    /// Handles `event` while this state is current. Does nothing by default.
    fn react(&mut self, _event: E, _ctx: &mut Context<P>) {}
}
