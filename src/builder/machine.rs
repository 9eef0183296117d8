//! Builder for configuring machines.

use crate::core::{Member, StatePool};
use crate::machine::{Machine, UninitializedPolicy, DEFAULT_NAME};
use std::fmt;

/// Builder for constructing machines with a fluent API.
///
/// ```
/// use tfsm::{state_pool, Machine, State, UninitializedPolicy};
///
/// #[derive(Default)]
/// struct Standby;
/// impl State<Pump> for Standby {}
///
/// state_pool! {
///     struct Pump {
///         standby: Standby,
///     }
/// }
///
/// let machine = Machine::<Pump>::builder()
///     .name("pump")
///     .on_uninitialized(UninitializedPolicy::Warn)
///     .initial::<Standby>()
///     .build();
///
/// assert_eq!(machine.name(), "pump");
/// assert!(machine.is_in::<Standby>());
/// ```
pub struct MachineBuilder<P> {
    name: &'static str,
    policy: UninitializedPolicy,
    initial: Option<fn(&mut Machine<P>)>,
}

impl<P: StatePool> MachineBuilder<P> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            name: DEFAULT_NAME,
            policy: UninitializedPolicy::default(),
            initial: None,
        }
    }

    /// Set the name used in log output and errors.
    pub fn name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Set how operations before initialization are reported.
    pub fn on_uninitialized(mut self, policy: UninitializedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Enter `S` as soon as the machine is built.
    ///
    /// Without this the machine starts uninitialized.
    pub fn initial<S: Member<P>>(mut self) -> Self {
        let enter: fn(&mut Machine<P>) = Machine::<P>::set_initial_state::<S>;
        self.initial = Some(enter);
        self
    }

    /// Build the machine. States are attached before the initial state, if
    /// any, is entered.
    pub fn build(self) -> Machine<P> {
        let mut machine = Machine::with_policy(self.name, self.policy);
        if let Some(enter_initial) = self.initial {
            enter_initial(&mut machine);
        }
        machine
    }
}

impl<P: StatePool> Default for MachineBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> fmt::Debug for MachineBuilder<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MachineBuilder")
            .field("name", &self.name)
            .field("policy", &self.policy)
            .field("initial", &self.initial.is_some())
            .finish()
    }
}
