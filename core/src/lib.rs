//! # Todos Core
//!
//! Core traits and types for the todos reducer architecture.
//!
//! This crate provides the fundamental abstractions for building small,
//! deterministic UI state machines using the Reducer pattern.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for a feature
//! - **Action**: All possible inputs to a reducer (user intents and internal follow-ups)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies via traits
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - Unidirectional Data Flow
//! - Explicit Effects (no hidden timers)
//! - Dependency Injection via Environment
//!
//! ## Example
//!
//! ```
//! use todos_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct CounterState {
//!     count: i64,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CounterState,
//!         action: CounterAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<CounterAction>; 4]> {
//!         match action {
//!             CounterAction::Increment => state.count += 1,
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let mut state = CounterState::default();
//! let _ = CounterReducer.reduce(&mut state, CounterAction::Increment, &());
//! assert_eq!(state.count, 1);
//! ```

// Re-export commonly used types
pub use serde::{Deserialize, Serialize};
pub use smallvec::{smallvec, SmallVec};

/// Reducer composition utilities (`combine_reducers`, `if_let`, `for_each`)
pub mod composition;

/// Declarative macros for constructing effects
pub mod effect_macros;

/// Ordered collections of uniquely identified elements
pub mod identified;

pub use identified::{Identifiable, IdentifiedVec, IndexSet};

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Updates state in place
        /// 2. Returns effect descriptions to be executed
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// Effects to be executed by the runtime
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution) and are composable and cancellable.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;
    use std::time::Duration;

    /// Identifier used to group cancellable effects
    ///
    /// Effects wrapped in [`Effect::Cancellable`] are registered under their
    /// id, so later effects can cancel them by the same id. Ids are plain
    /// static names, typically declared as constants next to the reducer:
    ///
    /// ```
    /// use todos_core::effect::EffectId;
    ///
    /// const SEARCH_ID: EffectId = EffectId::new("search.debounce");
    /// assert_eq!(SEARCH_ID.name(), "search.debounce");
    /// ```
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct EffectId(&'static str);

    impl EffectId {
        /// Create an effect id from a static name
        #[must_use]
        pub const fn new(name: &'static str) -> Self {
            Self(name)
        }

        /// The name this id was created with
        #[must_use]
        pub const fn name(&self) -> &'static str {
            self.0
        }
    }

    impl std::fmt::Display for EffectId {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.0)
        }
    }

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects in parallel
        Parallel(Vec<Effect<Action>>),

        /// Run effects sequentially
        Sequential(Vec<Effect<Action>>),

        /// Delayed action (for debounces, simulated latency)
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after delay
            action: Box<Action>,
        },

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),

        /// Run `effect` registered under `id` so it can be cancelled later
        ///
        /// With `cancel_in_flight` set, every effect still running under the
        /// same id is cancelled before this one starts, so at most one is
        /// ever in flight.
        Cancellable {
            /// Cancellation key
            id: EffectId,
            /// Cancel in-flight effects with the same id first
            cancel_in_flight: bool,
            /// The wrapped effect
            effect: Box<Effect<Action>>,
        },

        /// Cancel every in-flight effect registered under the id
        Cancel(EffectId),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
                Effect::Cancellable {
                    id,
                    cancel_in_flight,
                    effect,
                } => f
                    .debug_struct("Effect::Cancellable")
                    .field("id", id)
                    .field("cancel_in_flight", cancel_in_flight)
                    .field("effect", effect)
                    .finish(),
                Effect::Cancel(id) => f.debug_tuple("Effect::Cancel").field(id).finish(),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Combine effects to run in parallel
        #[must_use]
        pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Parallel(effects)
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }

        /// Returns true for [`Effect::None`]
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }

        /// Register this effect under `id` so it can be cancelled
        ///
        /// ```
        /// use std::time::Duration;
        /// use todos_core::effect::{Effect, EffectId};
        ///
        /// const DEBOUNCE: EffectId = EffectId::new("debounce");
        ///
        /// let effect = Effect::Delay {
        ///     duration: Duration::from_secs(1),
        ///     action: Box::new("sort"),
        /// }
        /// .cancellable(DEBOUNCE, true);
        ///
        /// assert!(matches!(effect, Effect::Cancellable { cancel_in_flight: true, .. }));
        /// ```
        #[must_use]
        pub fn cancellable(self, id: EffectId, cancel_in_flight: bool) -> Effect<Action> {
            Effect::Cancellable {
                id,
                cancel_in_flight,
                effect: Box::new(self),
            }
        }

        /// Transform the actions this effect produces
        ///
        /// Used to lift a child reducer's effects into its parent's action type.
        #[must_use]
        pub fn map<B, F>(self, f: F) -> Effect<B>
        where
            F: Fn(Action) -> B + Clone + Send + Sync + 'static,
            Action: Send + 'static,
            B: Send + 'static,
        {
            match self {
                Effect::None => Effect::None,
                Effect::Parallel(effects) => {
                    Effect::Parallel(effects.into_iter().map(|e| e.map(f.clone())).collect())
                },
                Effect::Sequential(effects) => {
                    Effect::Sequential(effects.into_iter().map(|e| e.map(f.clone())).collect())
                },
                Effect::Delay { duration, action } => Effect::Delay {
                    duration,
                    action: Box::new(f(*action)),
                },
                Effect::Future(fut) => Effect::Future(Box::pin(async move { fut.await.map(f) })),
                Effect::Cancellable {
                    id,
                    cancel_in_flight,
                    effect,
                } => Effect::Cancellable {
                    id,
                    cancel_in_flight,
                    effect: Box::new(effect.map(f)),
                },
                Effect::Cancel(id) => Effect::Cancel(id),
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use uuid::Uuid;

    /// Identifier generator - abstracts id creation for testability
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Production - random v4 UUIDs
    /// struct UuidGenerator;
    /// impl IdGenerator for UuidGenerator {
    ///     fn next_id(&self) -> Uuid {
    ///         Uuid::new_v4()
    ///     }
    /// }
    ///
    /// // Test - predictable, incrementing ids
    /// let ids = SequentialIdGenerator::new();
    /// assert_eq!(ids.next_id(), Uuid::from_u128(0));
    /// ```
    pub trait IdGenerator: Send + Sync {
        /// Produce a fresh identifier
        fn next_id(&self) -> Uuid;
    }

    /// Production id generator backed by random v4 UUIDs
    #[derive(Debug, Clone, Copy, Default)]
    pub struct UuidGenerator;

    impl IdGenerator for UuidGenerator {
        fn next_id(&self) -> Uuid {
            Uuid::new_v4()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::effect::{Effect, EffectId};
    use super::environment::{IdGenerator, UuidGenerator};
    use std::time::Duration;

    #[derive(Clone, Debug, PartialEq)]
    enum Child {
        Tick,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum Parent {
        Child(Child),
    }

    const ID: EffectId = EffectId::new("tests.id");

    #[test]
    fn uuid_generator_produces_distinct_ids() {
        let ids = UuidGenerator;
        assert_ne!(ids.next_id(), ids.next_id());
    }

    #[test]
    fn map_rewrites_delayed_action() {
        let effect = Effect::Delay {
            duration: Duration::from_millis(5),
            action: Box::new(Child::Tick),
        }
        .map(Parent::Child);

        match effect {
            Effect::Delay { duration, action } => {
                assert_eq!(duration, Duration::from_millis(5));
                assert_eq!(*action, Parent::Child(Child::Tick));
            },
            other => unreachable!("unexpected effect {other:?}"),
        }
    }

    #[test]
    fn map_preserves_cancellation_metadata() {
        let effect = Effect::Delay {
            duration: Duration::from_secs(1),
            action: Box::new(Child::Tick),
        }
        .cancellable(ID, true)
        .map(Parent::Child);

        assert!(matches!(
            effect,
            Effect::Cancellable {
                id: ID,
                cancel_in_flight: true,
                ..
            }
        ));
        assert!(matches!(
            Effect::<Child>::Cancel(ID).map(Parent::Child),
            Effect::Cancel(ID)
        ));
    }

    #[tokio::test]
    async fn map_wraps_future_output() {
        let effect = Effect::Future(Box::pin(async { Some(Child::Tick) })).map(Parent::Child);

        let Effect::Future(fut) = effect else {
            unreachable!("map must keep the future variant");
        };
        assert_eq!(fut.await, Some(Parent::Child(Child::Tick)));
    }

    #[test]
    fn effect_id_display_uses_name() {
        assert_eq!(ID.to_string(), "tests.id");
        assert!(Effect::<Child>::None.is_none());
    }
}
