//! Construction of pools and machines.
//!
//! [`state_pool!`](crate::state_pool) declares the fixed set of states a
//! machine owns; [`MachineBuilder`] configures the machine around it.

pub mod machine;
pub mod macros;

pub use machine::MachineBuilder;
