//! Property-based tests for the machine engine.
//!
//! These tests use proptest to drive a machine with random operation
//! sequences and compare every hook count against a plain model.

use proptest::prelude::*;
use tfsm::{state_pool, Context, Machine, React, State, Transit};

/// Requests a transition to the state at the given index.
struct Hop(usize);

#[derive(Default, Clone, Copy, Debug, PartialEq)]
struct Counts {
    enters: u32,
    leaves: u32,
    resets: u32,
}

#[derive(Default)]
struct Node<const N: usize> {
    counts: Counts,
}

impl<const N: usize> State<Tri> for Node<N> {
    fn on_enter(&mut self, _ctx: &mut Context<Tri>) {
        self.counts.enters += 1;
    }

    fn on_leave(&mut self, _ctx: &mut Context<Tri>) {
        self.counts.leaves += 1;
    }

    fn reset(&mut self) {
        self.counts.resets += 1;
    }
}

impl<const N: usize> React<Tri, Hop> for Node<N> {
    fn react(&mut self, event: Hop, ctx: &mut Context<Tri>) {
        request(ctx, event.0);
    }
}

state_pool! {
    struct Tri {
        a: Node<0>,
        b: Node<1>,
        c: Node<2>,
    }
}

fn request(ctx: &mut Context<Tri>, target: usize) {
    match target {
        0 => ctx.transit::<Node<0>>(),
        1 => ctx.transit::<Node<1>>(),
        _ => ctx.transit::<Node<2>>(),
    }
}

fn init(machine: &mut Machine<Tri>, target: usize) {
    match target {
        0 => machine.set_initial_state::<Node<0>>(),
        1 => machine.set_initial_state::<Node<1>>(),
        _ => machine.set_initial_state::<Node<2>>(),
    }
}

fn transit(machine: &mut Machine<Tri>, target: usize) -> Transit {
    match target {
        0 => machine.transit::<Node<0>>(),
        1 => machine.transit::<Node<1>>(),
        _ => machine.transit::<Node<2>>(),
    }
}

fn observed(machine: &Machine<Tri>) -> [Counts; 3] {
    [
        machine.state::<Node<0>>().counts,
        machine.state::<Node<1>>().counts,
        machine.state::<Node<2>>().counts,
    ]
}

#[derive(Clone, Debug)]
enum Op {
    Init(usize),
    Transit(usize),
    Hop(usize),
    Reset,
}

#[derive(Default)]
struct Model {
    current: Option<usize>,
    counts: [Counts; 3],
}

impl Model {
    fn move_to(&mut self, target: usize) -> Transit {
        match self.current {
            None => Transit::Uninitialized,
            Some(current) if current == target => Transit::Unchanged,
            Some(current) => {
                self.counts[current].leaves += 1;
                self.counts[target].enters += 1;
                self.current = Some(target);
                Transit::Moved
            }
        }
    }
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => (0..3usize).prop_map(Op::Init),
        4 => (0..3usize).prop_map(Op::Transit),
        4 => (0..3usize).prop_map(Op::Hop),
        1 => Just(Op::Reset),
    ]
}

proptest! {
    #[test]
    fn machine_matches_model(ops in prop::collection::vec(arbitrary_op(), 0..40)) {
        let mut machine = Machine::<Tri>::new();
        let mut model = Model::default();

        for op in ops {
            match op {
                Op::Init(target) => {
                    init(&mut machine, target);
                    model.current = Some(target);
                    model.counts[target].enters += 1;
                }
                Op::Transit(target) => {
                    let outcome = transit(&mut machine, target);
                    prop_assert_eq!(outcome, model.move_to(target));
                }
                Op::Hop(target) => {
                    let delivered = machine.dispatch(Hop(target)).is_delivered();
                    prop_assert_eq!(delivered, model.current.is_some());
                    model.move_to(target);
                }
                Op::Reset => {
                    machine.reset();
                    for counts in model.counts.iter_mut() {
                        counts.resets += 1;
                    }
                }
            }

            prop_assert_eq!(machine.current_index(), model.current);
            prop_assert_eq!(observed(&machine), model.counts);
        }
    }

    #[test]
    fn only_the_current_state_is_entered_and_not_left(
        start in 0..3usize,
        targets in prop::collection::vec(0..3usize, 0..30)
    ) {
        let mut machine = Machine::<Tri>::new();
        init(&mut machine, start);

        for target in targets {
            transit(&mut machine, target);
        }

        let current = machine.current_index();
        for (index, counts) in observed(&machine).iter().enumerate() {
            let open = counts.enters - counts.leaves;
            prop_assert_eq!(open, u32::from(Some(index) == current));
        }
    }

    #[test]
    fn repeated_transit_to_same_state_is_idempotent(
        start in 0..3usize,
        target in 0..3usize,
        repeats in 1..10usize
    ) {
        let mut machine = Machine::<Tri>::new();
        init(&mut machine, start);
        transit(&mut machine, target);
        let settled = observed(&machine);

        for _ in 0..repeats {
            prop_assert_eq!(transit(&mut machine, target), Transit::Unchanged);
        }
        prop_assert_eq!(observed(&machine), settled);
    }

    #[test]
    fn operations_before_initialization_touch_nothing(
        targets in prop::collection::vec(0..3usize, 1..10)
    ) {
        let mut machine = Machine::<Tri>::new();

        for target in targets {
            prop_assert_eq!(transit(&mut machine, target), Transit::Uninitialized);
            prop_assert!(!machine.dispatch(Hop(target)).is_delivered());
        }

        prop_assert_eq!(machine.current_index(), None);
        prop_assert_eq!(observed(&machine), [Counts::default(); 3]);
    }
}
