//! The fixed heterogeneous pool holding one instance of every state type.
//!
//! Pools are plain structs generated by [`state_pool!`](crate::state_pool),
//! one field per declared state. Nothing in here allocates; membership is
//! fixed when the struct is defined.

use crate::core::context::Context;
use crate::core::state::State;

/// A build-time-sized aggregate of state instances.
pub trait StatePool: Default + Sized {
    /// Declared type names, in declaration order.
    const NAMES: &'static [&'static str];

    /// Number of declared states.
    const LEN: usize = Self::NAMES.len();

    /// Lifecycle view of the slot at `index`.
    fn slot_mut(&mut self, index: usize) -> Option<&mut dyn State<Self>>;

    /// Visits every slot in declaration order.
    fn for_each_mut(&mut self, visit: &mut dyn FnMut(&mut dyn State<Self>));
}

/// Routes events of type `E` to the slot at a given index.
///
/// Implemented for a pool only when all of its states implement
/// [`React<P, E>`](crate::React), so routing never needs a runtime check.
pub trait Dispatch<E>: StatePool {
    /// Delivers `event` to the slot at `index`. Returns `false` when no such
    /// slot exists.
    fn deliver(&mut self, index: usize, event: E, ctx: &mut Context<Self>) -> bool;
}

/// Exposes every slot through the capability object `C`.
///
/// Generated for each capability listed under `expose:` in
/// [`state_pool!`](crate::state_pool); the generated code only compiles if
/// every declared state implements the capability.
pub trait Exposes<C: ?Sized>: StatePool {
    /// The slot at `index` viewed as `C`.
    fn slot_as(&mut self, index: usize) -> Option<&mut C>;
}
