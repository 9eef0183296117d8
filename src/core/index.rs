//! Build-time position of a state type within its pool.
//!
//! [`state_pool!`](crate::state_pool) implements [`Member`] once for every
//! declared type, numbering them in declaration order. Uniqueness comes from
//! coherence: listing a type twice produces two implementations of the same
//! trait for the same type, which the compiler rejects.
//!
//! ```compile_fail
//! use tfsm::{state_pool, State};
//!
//! #[derive(Default)]
//! struct Idle;
//! impl State<Pool> for Idle {}
//!
//! #[derive(Default)]
//! struct Busy;
//! impl State<Pool> for Busy {}
//!
//! state_pool! {
//!     struct Pool {
//!         idle: Idle,
//!         busy: Busy,
//!         idle_again: Idle,
//!     }
//! }
//! ```
//!
//! A type that was never declared has no `Member` implementation, so naming it
//! as a target does not compile either:
//!
//! ```compile_fail
//! use tfsm::{state_pool, Machine, State};
//!
//! #[derive(Default)]
//! struct Idle;
//! impl State<Pool> for Idle {}
//!
//! #[derive(Default)]
//! struct Stray;
//! impl State<Pool> for Stray {}
//!
//! state_pool! {
//!     struct Pool {
//!         idle: Idle,
//!     }
//! }
//!
//! let mut machine = Machine::<Pool>::new();
//! machine.set_initial_state::<Stray>();
//! ```

use crate::core::state::State;

/// A state type declared in pool `P`, with its zero-based position.
pub trait Member<P>: State<P> + Sized {
    /// Position of `Self` in the declared list of `P`.
    const INDEX: usize;

    /// The pool slot holding the instance of `Self`.
    fn slot(pool: &P) -> &Self;

    /// Mutable access to the same slot.
    fn slot_mut(pool: &mut P) -> &mut Self;
}

/// Position of `S` in the declared list of `P`, usable in const contexts.
pub const fn index_of<S: Member<P>, P>() -> usize {
    S::INDEX
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pool::StatePool;
    use crate::state_pool;

    #[derive(Default)]
    struct First;
    impl State<Trio> for First {}

    #[derive(Default)]
    struct Second {
        value: u32,
    }
    impl State<Trio> for Second {}

    #[derive(Default)]
    struct Third;
    impl State<Trio> for Third {}

    state_pool! {
        struct Trio {
            first: First,
            second: Second,
            third: Third,
        }
    }

    const SECOND: usize = index_of::<Second, Trio>();

    #[test]
    fn indices_follow_declaration_order() {
        assert_eq!(<First as Member<Trio>>::INDEX, 0);
        assert_eq!(SECOND, 1);
        assert_eq!(index_of::<Third, Trio>(), 2);
    }

    #[test]
    fn indices_are_within_pool_len() {
        assert_eq!(Trio::LEN, 3);
        assert!(index_of::<Third, Trio>() < Trio::LEN);
    }

    #[test]
    fn slot_accessors_reach_the_declared_field() {
        let mut pool = Trio::default();
        Second::slot_mut(&mut pool).value = 7;
        assert_eq!(Second::slot(&pool).value, 7);
    }
}
