//! Core engine types.
//!
//! This module contains the pieces every machine is made of:
//! - Lifecycle and event-handling traits via `State` and `React`
//! - Build-time type indexing via `Member`
//! - The fixed state pool and its dispatch traits
//! - The non-owning back-reference from states to their machine

mod context;
mod index;
mod pool;
mod state;

pub use context::{Context, MachineId, Owner};
pub use index::{index_of, Member};
pub use pool::{Dispatch, Exposes, StatePool};
pub use state::{React, State};
