//! Ergonomic testing utilities for reducers
//!
//! This module provides a fluent API for testing reducers with readable Given-When-Then syntax.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use todos_core::{effect::Effect, reducer::Reducer};

/// Type alias for state assertion functions
type StateAssertion<S> = Box<dyn FnOnce(&S)>;

/// Type alias for effect assertion functions
type EffectAssertion<A> = Box<dyn FnOnce(&[Effect<A>])>;

/// Fluent API for testing reducers with Given-When-Then syntax
///
/// Several actions may be queued with repeated `when_action` calls; they are
/// reduced in order and effect assertions see the effects of the last one.
///
/// # Example
///
/// ```ignore
/// use todos_testing::ReducerTest;
///
/// ReducerTest::new(TodosReducer::new())
///     .with_env(test_environment())
///     .given_state(TodosState::mock())
///     .when_action(TodosAction::ClearCompletedButtonTapped)
///     .then_state(|state| {
///         assert_eq!(state.todos.len(), 2);
///     })
///     .then_effects(|effects| {
///         assertions::assert_no_effects(effects);
///     })
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    environment: Option<E>,
    initial_state: Option<S>,
    actions: Vec<A>,
    state_assertions: Vec<StateAssertion<S>>,
    effect_assertions: Vec<EffectAssertion<A>>,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    /// Create a new reducer test with the given reducer
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            actions: Vec::new(),
            state_assertions: Vec::new(),
            effect_assertions: Vec::new(),
        }
    }

    /// Set the environment for the test
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// Set the initial state (Given)
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Queue an action to reduce (When)
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.actions.push(action);
        self
    }

    /// Add an assertion about the resulting state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the effects of the last action (Then)
    #[must_use]
    pub fn then_effects<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&[Effect<A>]) + 'static,
    {
        self.effect_assertions.push(Box::new(assertion));
        self
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if initial state, action, or environment is not set,
    /// or if any assertions fail.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let mut state = self
            .initial_state
            .expect("Initial state must be set with given_state()");

        assert!(
            !self.actions.is_empty(),
            "At least one action must be set with when_action()"
        );

        let env = self
            .environment
            .expect("Environment must be set with with_env()");

        let mut effects = Vec::new();
        for action in self.actions {
            effects = self.reducer.reduce(&mut state, action, &env).into_vec();
        }

        for assertion in self.state_assertions {
            assertion(&state);
        }

        for assertion in self.effect_assertions {
            assertion(&effects);
        }
    }
}

/// Helper assertions for effects
pub mod assertions {
    use std::time::Duration;
    use todos_core::effect::{Effect, EffectId};

    /// Assert that there are no effects
    ///
    /// # Panics
    ///
    /// Panics if any effect other than `Effect::None` is present.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().all(Effect::is_none),
            "Expected no effects, but found {}: {:?}",
            effects.len(),
            effects
        );
    }

    /// Assert the number of effects
    ///
    /// # Panics
    ///
    /// Panics if the number of effects doesn't match expected.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(
            effects.len(),
            expected,
            "Expected {} effects, but found {}",
            expected,
            effects.len()
        );
    }

    /// Assert that a plain (non-cancellable) delay of `duration` delivers
    /// an action matching `expected`
    ///
    /// # Panics
    ///
    /// Panics if no such delay is found.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_has_delay_effect<A, F>(effects: &[Effect<A>], duration: Duration, expected: F)
    where
        A: std::fmt::Debug,
        F: Fn(&A) -> bool,
    {
        assert!(
            effects.iter().any(|e| matches!(
                e,
                Effect::Delay { duration: d, action } if *d == duration && expected(action)
            )),
            "Expected a {duration:?} delay with a matching action, found {effects:?}"
        );
    }

    /// Assert that a cancellable effect registered under `id` is present,
    /// with the given `cancel_in_flight` flag, wrapping a delay of `duration`
    ///
    /// # Panics
    ///
    /// Panics if no such cancellable effect is found.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_has_cancellable_delay<A: std::fmt::Debug>(
        effects: &[Effect<A>],
        id: EffectId,
        cancel_in_flight: bool,
        duration: Duration,
    ) {
        assert!(
            effects.iter().any(|e| match e {
                Effect::Cancellable {
                    id: found,
                    cancel_in_flight: flag,
                    effect,
                } => {
                    *found == id
                        && *flag == cancel_in_flight
                        && matches!(**effect, Effect::Delay { duration: d, .. } if d == duration)
                },
                _ => false,
            }),
            "Expected cancellable {duration:?} delay under {id}, found {effects:?}"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use todos_core::effect::{Effect, EffectId};
    use todos_core::reducer::Reducer;

    #[derive(Clone, Debug, PartialEq)]
    struct TestState {
        count: i32,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Increment,
        Decrement,
        Later,
        Debounce,
    }

    struct TestReducer;

    struct TestEnv;

    const TICK: EffectId = EffectId::new("tests.tick");

    impl Reducer for TestReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = TestEnv;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> smallvec::SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                TestAction::Increment => {
                    state.count += 1;
                    smallvec::smallvec![Effect::None]
                },
                TestAction::Decrement => {
                    state.count -= 1;
                    smallvec::smallvec![]
                },
                TestAction::Later => smallvec::smallvec![Effect::Delay {
                    duration: Duration::from_millis(100),
                    action: Box::new(TestAction::Increment),
                }],
                TestAction::Debounce => smallvec::smallvec![Effect::Delay {
                    duration: Duration::from_secs(1),
                    action: Box::new(TestAction::Decrement),
                }
                .cancellable(TICK, true)],
            }
        }
    }

    #[test]
    fn test_reducer_test_increment() {
        ReducerTest::new(TestReducer)
            .with_env(TestEnv)
            .given_state(TestState { count: 0 })
            .when_action(TestAction::Increment)
            .then_state(|state| {
                assert_eq!(state.count, 1);
            })
            .then_effects(|effects| {
                assertions::assert_no_effects(effects);
            })
            .run();
    }

    #[test]
    fn test_reducer_test_runs_actions_in_order() {
        ReducerTest::new(TestReducer)
            .with_env(TestEnv)
            .given_state(TestState { count: 5 })
            .when_action(TestAction::Decrement)
            .when_action(TestAction::Decrement)
            .when_action(TestAction::Later)
            .then_state(|state| {
                assert_eq!(state.count, 3);
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_delay_effect(effects, Duration::from_millis(100), |a| {
                    *a == TestAction::Increment
                });
            })
            .run();
    }

    #[test]
    fn test_cancellable_assertion() {
        ReducerTest::new(TestReducer)
            .with_env(TestEnv)
            .given_state(TestState { count: 0 })
            .when_action(TestAction::Debounce)
            .then_effects(|effects| {
                assertions::assert_has_cancellable_delay(
                    effects,
                    TICK,
                    true,
                    Duration::from_secs(1),
                );
            })
            .run();
    }

    #[test]
    #[should_panic(expected = "Expected no effects")]
    fn test_assert_no_effects_rejects_delay() {
        let effects = [Effect::Delay {
            duration: Duration::from_millis(1),
            action: Box::new(TestAction::Increment),
        }];
        assertions::assert_no_effects(&effects);
    }

    #[test]
    fn test_assertions_no_effects() {
        assertions::assert_no_effects::<TestAction>(&[Effect::None]);
        assertions::assert_no_effects::<TestAction>(&[]);
    }
}
