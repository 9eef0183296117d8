//! Macro declaring a fixed state pool.

/// Declare a state pool: a struct with one field per state type.
///
/// Generates the struct, its `Default` implementation (states are created in
/// declaration order), [`StatePool`](crate::StatePool), one
/// [`Member`](crate::Member) implementation per state, a generic
/// [`Dispatch`](crate::Dispatch) implementation and one
/// [`Exposes`](crate::Exposes) implementation per capability listed under
/// `expose:`.
///
/// Every state must implement `Default` and [`State`](crate::State) for the
/// pool. Declaring the same type twice is a compile error.
///
/// # Example
///
/// ```
/// use tfsm::{state_pool, Context, Machine, React, State};
///
/// struct Obstacle;
///
/// trait Telemetry {
///     fn label(&self) -> &'static str;
/// }
///
/// #[derive(Default)]
/// struct Cruising;
/// impl State<Drive> for Cruising {}
/// impl React<Drive, Obstacle> for Cruising {
///     fn react(&mut self, _event: Obstacle, ctx: &mut Context<Drive>) {
///         ctx.transit::<Braking>();
///     }
/// }
/// impl Telemetry for Cruising {
///     fn label(&self) -> &'static str {
///         "cruising"
///     }
/// }
///
/// #[derive(Default)]
/// struct Braking;
/// impl State<Drive> for Braking {}
/// impl React<Drive, Obstacle> for Braking {}
/// impl Telemetry for Braking {
///     fn label(&self) -> &'static str {
///         "braking"
///     }
/// }
///
/// state_pool! {
///     pub struct Drive {
///         cruising: Cruising,
///         braking: Braking,
///     }
///     expose: [dyn Telemetry]
/// }
///
/// let mut machine = Machine::<Drive>::new();
/// machine.set_initial_state::<Cruising>();
/// machine.dispatch(Obstacle);
/// assert!(machine.is_in::<Braking>());
///
/// let mut label = "";
/// machine.dispatch_as::<dyn Telemetry, _>(|state, _ctx| label = state.label());
/// assert_eq!(label, "braking");
/// ```
#[macro_export]
macro_rules! state_pool {
    (@members $pool:ident, $index:expr;) => {};

    (@members $pool:ident, $index:expr; $field:ident : $ty:ty $(, $rest_field:ident : $rest_ty:ty)*) => {
        impl $crate::Member<$pool> for $ty {
            const INDEX: usize = $index;

            fn slot(pool: &$pool) -> &Self {
                &pool.$field
            }

            fn slot_mut(pool: &mut $pool) -> &mut Self {
                &mut pool.$field
            }
        }

        $crate::state_pool!(@members $pool, $index + 1; $($rest_field : $rest_ty),*);
    };

    (@expose $pool:ident [$($field:ident : $ty:ty),*]) => {};

    (@expose $pool:ident [$($field:ident : $ty:ty),*] $cap:path $(, $rest:path)*) => {
        impl $crate::Exposes<dyn $cap + 'static> for $pool {
            fn slot_as(&mut self, index: usize) -> ::core::option::Option<&mut (dyn $cap + 'static)> {
                $(
                    if index == <$ty as $crate::Member<$pool>>::INDEX {
                        return ::core::option::Option::Some(&mut self.$field);
                    }
                )*
                ::core::option::Option::None
            }
        }

        $crate::state_pool!(@expose $pool [$($field : $ty),*] $($rest),*);
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $pool:ident {
            $($field:ident : $ty:ty),+ $(,)?
        }
        $(expose: [$(dyn $cap:path),* $(,)?])?
    ) => {
        $(#[$meta])*
        $vis struct $pool {
            $($field: $ty),+
        }

        impl ::core::default::Default for $pool {
            fn default() -> Self {
                Self {
                    $($field: <$ty as ::core::default::Default>::default()),+
                }
            }
        }

        impl $crate::StatePool for $pool {
            const NAMES: &'static [&'static str] = &[$(stringify!($ty)),+];

            fn slot_mut(&mut self, index: usize) -> ::core::option::Option<&mut dyn $crate::State<Self>> {
                $(
                    if index == <$ty as $crate::Member<$pool>>::INDEX {
                        return ::core::option::Option::Some(&mut self.$field);
                    }
                )+
                ::core::option::Option::None
            }

            fn for_each_mut(&mut self, visit: &mut dyn FnMut(&mut dyn $crate::State<Self>)) {
                $(visit(&mut self.$field);)+
            }
        }

        impl<E> $crate::Dispatch<E> for $pool
        where
            $($ty: $crate::React<$pool, E>,)+
        {
            fn deliver(&mut self, index: usize, event: E, ctx: &mut $crate::Context<Self>) -> bool {
                $(
                    if index == <$ty as $crate::Member<$pool>>::INDEX {
                        <$ty as $crate::React<$pool, E>>::react(&mut self.$field, event, ctx);
                        return true;
                    }
                )+
                false
            }
        }

        $crate::state_pool!(@members $pool, 0usize; $($field : $ty),+);
        $crate::state_pool!(@expose $pool [$($field : $ty),+] $($($cap),*)?);
    };
}

#[cfg(test)]
mod tests {
    use crate::{Context, Machine, Member, React, State, StatePool};

    struct Tick;

    #[derive(Default)]
    struct Solo {
        ticks: u32,
    }

    impl State<SoloPool> for Solo {}

    impl React<SoloPool, Tick> for Solo {
        fn react(&mut self, _event: Tick, _ctx: &mut Context<SoloPool>) {
            self.ticks += 1;
        }
    }

    state_pool! {
        /// A pool with a single state.
        #[allow(dead_code)]
        struct SoloPool {
            solo: Solo
        }
    }

    #[test]
    fn single_state_pool_without_trailing_comma() {
        assert_eq!(SoloPool::NAMES, &["Solo"]);
        assert_eq!(<Solo as Member<SoloPool>>::INDEX, 0);

        let mut machine = Machine::<SoloPool>::new();
        machine.set_initial_state::<Solo>();
        machine.dispatch(Tick);
        machine.dispatch(Tick);
        assert_eq!(machine.state::<Solo>().ticks, 2);
    }

    #[test]
    fn default_creates_states_in_declaration_order() {
        use std::cell::RefCell;

        thread_local! {
            static CREATED: RefCell<Vec<&'static str>> = RefCell::new(Vec::new());
        }

        struct Noisy<const N: usize>;
        impl<const N: usize> Default for Noisy<N> {
            fn default() -> Self {
                CREATED.with(|created| created.borrow_mut().push(["zero", "one", "two"][N]));
                Noisy
            }
        }
        impl<const N: usize> State<Ordered> for Noisy<N> {}

        state_pool! {
            struct Ordered {
                zero: Noisy<0>,
                one: Noisy<1>,
                two: Noisy<2>,
            }
        }

        let _pool = Ordered::default();
        CREATED.with(|created| assert_eq!(*created.borrow(), vec!["zero", "one", "two"]));
    }

    #[test]
    fn visibility_and_multiple_capabilities() {
        trait Named {
            fn name(&self) -> &'static str;
        }
        trait Weighted {
            fn weight(&self) -> u32;
        }

        #[derive(Default)]
        pub struct Light;
        impl State<Scale> for Light {}
        impl Named for Light {
            fn name(&self) -> &'static str {
                "light"
            }
        }
        impl Weighted for Light {
            fn weight(&self) -> u32 {
                1
            }
        }

        state_pool! {
            pub struct Scale {
                light: Light,
            }
            expose: [dyn Named, dyn Weighted,]
        }

        let mut machine = Machine::<Scale>::new();
        machine.set_initial_state::<Light>();

        let mut seen = (None, None);
        machine.dispatch_as::<dyn Named, _>(|state, _ctx| seen.0 = Some(state.name()));
        machine.dispatch_as::<dyn Weighted, _>(|state, _ctx| seen.1 = Some(state.weight()));
        assert_eq!(seen, (Some("light"), Some(1)));
    }
}
