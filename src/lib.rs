//! tfsm: a fixed-pool finite state machine runtime
//!
//! A machine is declared over a list of state types known at build time. It
//! owns exactly one instance of each, keeps one of them current, routes events
//! to it and moves between states with ordered leave/enter hooks. Nothing is
//! allocated after construction and nothing is looked up at runtime by type.
//!
//! # Core Concepts
//!
//! - **State**: a type implementing [`State`], with optional enter, leave and
//!   reset hooks
//! - **Pool**: a struct declared with [`state_pool!`] holding one instance of
//!   every state; duplicate or undeclared state types fail to compile
//! - **Dispatch**: events reach the current state through [`React`], or through
//!   a capability trait object exposed by the pool
//! - **Transition**: [`Machine::transit`] from outside, [`Context::transit`]
//!   from inside a hook or handler
//!
//! # Example
//!
//! ```rust
//! use tfsm::{state_pool, Context, Machine, React, State};
//!
//! struct Bump;
//!
//! #[derive(Default)]
//! struct Forward {
//!     entered: u32,
//! }
//!
//! impl State<Robot> for Forward {
//!     fn on_enter(&mut self, _ctx: &mut Context<Robot>) {
//!         self.entered += 1;
//!     }
//! }
//!
//! impl React<Robot, Bump> for Forward {
//!     fn react(&mut self, _event: Bump, ctx: &mut Context<Robot>) {
//!         ctx.transit::<Reverse>();
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Reverse;
//! impl State<Robot> for Reverse {}
//! impl React<Robot, Bump> for Reverse {}
//!
//! state_pool! {
//!     struct Robot {
//!         forward: Forward,
//!         reverse: Reverse,
//!     }
//! }
//!
//! let mut machine = Machine::<Robot>::new();
//! machine.dispatch(Bump); // no initial state yet: ignored
//! machine.set_initial_state::<Forward>();
//! machine.dispatch(Bump);
//! assert!(machine.is_in::<Reverse>());
//! assert_eq!(machine.state::<Forward>().entered, 1);
//! ```

pub mod builder;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use crate::builder::MachineBuilder;
pub use crate::core::{
    index_of, Context, Dispatch, Exposes, MachineId, Member, Owner, React, State, StatePool,
};
pub use crate::machine::{Dispatched, Machine, MachineError, Transit, UninitializedPolicy};
