//! Reducer composition utilities
//!
//! This module provides utilities for composing reducers in various ways:
//! - **`combine_reducers`**: Run multiple reducers on the same state/action
//! - **`if_let`**: Run a child reducer on optional child state, when present
//! - **`for_each`**: Run a child reducer on one element of an [`IdentifiedVec`]
//!
//! `if_let` and `for_each` also translate actions: they pull the child action
//! out of the parent action and lift the child's effects back into the
//! parent's action type with [`Effect::map`].

use crate::effect::Effect;
use crate::identified::{Identifiable, IdentifiedVec};
use crate::reducer::Reducer;
use smallvec::SmallVec;

/// Combines multiple reducers that operate on the same state and action types.
///
/// Each reducer is run in sequence, and all effects are collected and concatenated.
/// This is useful when you want to split reducer logic across multiple implementations.
///
/// # Examples
///
/// ```
/// use todos_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
/// use todos_core::composition::combine_reducers;
///
/// #[derive(Clone)]
/// struct AppState {
///     counter: i32,
///     logged: bool,
/// }
///
/// #[derive(Clone)]
/// enum AppAction {
///     Increment,
///     Log,
/// }
///
/// struct CounterReducer;
/// struct LoggingReducer;
///
/// impl Reducer for CounterReducer {
///     type State = AppState;
///     type Action = AppAction;
///     type Environment = ();
///
///     fn reduce(
///         &self,
///         state: &mut AppState,
///         action: AppAction,
///         _env: &(),
///     ) -> SmallVec<[Effect<AppAction>; 4]> {
///         if matches!(action, AppAction::Increment) {
///             state.counter += 1;
///         }
///         smallvec![Effect::None]
///     }
/// }
///
/// impl Reducer for LoggingReducer {
///     type State = AppState;
///     type Action = AppAction;
///     type Environment = ();
///
///     fn reduce(
///         &self,
///         state: &mut AppState,
///         action: AppAction,
///         _env: &(),
///     ) -> SmallVec<[Effect<AppAction>; 4]> {
///         if matches!(action, AppAction::Log) {
///             state.logged = true;
///         }
///         smallvec![Effect::None]
///     }
/// }
///
/// let combined = combine_reducers(vec![Box::new(CounterReducer), Box::new(LoggingReducer)]);
///
/// let mut state = AppState { counter: 0, logged: false };
/// let _ = combined.reduce(&mut state, AppAction::Increment, &());
/// assert_eq!(state.counter, 1);
/// ```
#[must_use]
pub fn combine_reducers<S, A, E>(
    reducers: Vec<Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>>,
) -> CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    CombinedReducer { reducers }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    reducers: Vec<Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>>,
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut all_effects = SmallVec::new();

        for reducer in &self.reducers {
            let effects = reducer.reduce(state, action.clone(), env);
            all_effects.extend(effects);
        }

        all_effects
    }
}

/// Runs a child reducer on optional child state.
///
/// When the parent action carries a child action (`to_child_action` returns
/// `Some`) and the child state is present, the child reducer runs on it and
/// its effects are lifted with `from_child_action`. Otherwise nothing
/// happens: a child action arriving after the child state was dismissed is
/// dropped.
///
/// # Examples
///
/// ```
/// use todos_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
/// use todos_core::composition::if_let;
///
/// struct Rename;
///
/// impl Reducer for Rename {
///     type State = String;
///     type Action = String;
///     type Environment = ();
///
///     fn reduce(
///         &self,
///         state: &mut String,
///         name: String,
///         _env: &(),
///     ) -> SmallVec<[Effect<String>; 4]> {
///         *state = name;
///         SmallVec::new()
///     }
/// }
///
/// #[derive(Clone)]
/// enum Action {
///     Sheet(String),
///     Other,
/// }
///
/// let reducer = if_let(
///     Rename,
///     |sheet: &mut Option<String>| sheet,
///     |action: Action| match action {
///         Action::Sheet(name) => Some(name),
///         Action::Other => None,
///     },
///     Action::Sheet,
/// );
///
/// let mut sheet = Some(String::from("draft"));
/// let _ = reducer.reduce(&mut sheet, Action::Sheet("final".into()), &());
/// assert_eq!(sheet.as_deref(), Some("final"));
///
/// let mut closed: Option<String> = None;
/// let _ = reducer.reduce(&mut closed, Action::Sheet("ignored".into()), &());
/// assert!(closed.is_none());
/// ```
pub fn if_let<S, ChildS, A, ChildA, E, R>(
    reducer: R,
    child_state: fn(&mut S) -> &mut Option<ChildS>,
    to_child_action: fn(A) -> Option<ChildA>,
    from_child_action: fn(ChildA) -> A,
) -> IfLetReducer<S, ChildS, A, ChildA, E, R>
where
    R: Reducer<State = ChildS, Action = ChildA, Environment = E>,
{
    IfLetReducer {
        reducer,
        child_state,
        to_child_action,
        from_child_action,
    }
}

/// A reducer for optional child state.
///
/// Created by [`if_let`].
pub struct IfLetReducer<S, ChildS, A, ChildA, E, R>
where
    R: Reducer<State = ChildS, Action = ChildA, Environment = E>,
{
    reducer: R,
    child_state: fn(&mut S) -> &mut Option<ChildS>,
    to_child_action: fn(A) -> Option<ChildA>,
    from_child_action: fn(ChildA) -> A,
}

impl<S, ChildS, A, ChildA, E, R> Reducer for IfLetReducer<S, ChildS, A, ChildA, E, R>
where
    R: Reducer<State = ChildS, Action = ChildA, Environment = E>,
    A: Send + 'static,
    ChildA: Send + 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let Some(child_action) = (self.to_child_action)(action) else {
            return SmallVec::new();
        };
        let Some(child) = (self.child_state)(state).as_mut() else {
            return SmallVec::new();
        };

        self.reducer
            .reduce(child, child_action, env)
            .into_iter()
            .map(|effect| effect.map(self.from_child_action))
            .collect()
    }
}

/// Runs a child reducer on the element of an [`IdentifiedVec`] an action
/// is addressed to.
///
/// `to_element_action` extracts `(id, child action)` from the parent action.
/// When no element has that id the action is dropped. Child effects are
/// lifted with `from_element_action`, re-addressed to the same id.
///
/// # Examples
///
/// ```
/// use todos_core::{effect::Effect, reducer::Reducer, Identifiable, IdentifiedVec, SmallVec};
/// use todos_core::composition::for_each;
///
/// #[derive(Clone, Debug)]
/// struct Row {
///     id: u8,
///     hits: u32,
/// }
///
/// impl Identifiable for Row {
///     type Id = u8;
///     fn id(&self) -> &u8 {
///         &self.id
///     }
/// }
///
/// struct Hit;
///
/// impl Reducer for Hit {
///     type State = Row;
///     type Action = ();
///     type Environment = ();
///
///     fn reduce(&self, row: &mut Row, _action: (), _env: &()) -> SmallVec<[Effect<()>; 4]> {
///         row.hits += 1;
///         SmallVec::new()
///     }
/// }
///
/// #[derive(Clone)]
/// enum Action {
///     Row(u8),
/// }
///
/// let reducer = for_each(
///     Hit,
///     |rows: &mut IdentifiedVec<Row>| rows,
///     |action: Action| match action {
///         Action::Row(id) => Some((id, ())),
///     },
///     |id: u8, (): ()| Action::Row(id),
/// );
///
/// let mut rows: IdentifiedVec<Row> = [Row { id: 1, hits: 0 }, Row { id: 2, hits: 0 }]
///     .into_iter()
///     .collect();
/// let _ = reducer.reduce(&mut rows, Action::Row(2), &());
/// assert_eq!(rows.get(&2).map(|r| r.hits), Some(1));
/// assert_eq!(rows.get(&1).map(|r| r.hits), Some(0));
/// ```
pub fn for_each<S, T, A, ChildA, E, R>(
    reducer: R,
    elements: fn(&mut S) -> &mut IdentifiedVec<T>,
    to_element_action: fn(A) -> Option<(T::Id, ChildA)>,
    from_element_action: fn(T::Id, ChildA) -> A,
) -> ForEachReducer<S, T, A, ChildA, E, R>
where
    T: Identifiable,
    R: Reducer<State = T, Action = ChildA, Environment = E>,
{
    ForEachReducer {
        reducer,
        elements,
        to_element_action,
        from_element_action,
    }
}

/// A reducer for the elements of an identified collection.
///
/// Created by [`for_each`].
pub struct ForEachReducer<S, T, A, ChildA, E, R>
where
    T: Identifiable,
    R: Reducer<State = T, Action = ChildA, Environment = E>,
{
    reducer: R,
    elements: fn(&mut S) -> &mut IdentifiedVec<T>,
    to_element_action: fn(A) -> Option<(T::Id, ChildA)>,
    from_element_action: fn(T::Id, ChildA) -> A,
}

impl<S, T, A, ChildA, E, R> Reducer for ForEachReducer<S, T, A, ChildA, E, R>
where
    T: Identifiable,
    T::Id: Send + Sync + 'static,
    R: Reducer<State = T, Action = ChildA, Environment = E>,
    A: Send + 'static,
    ChildA: Send + 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let Some((id, child_action)) = (self.to_element_action)(action) else {
            return SmallVec::new();
        };
        let Some(element) = (self.elements)(state).get_mut(&id) else {
            return SmallVec::new();
        };

        let lift = self.from_element_action;
        self.reducer
            .reduce(element, child_action, env)
            .into_iter()
            .map(|effect| {
                let id = id.clone();
                effect.map(move |child| lift(id.clone(), child))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smallvec;
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct TestState {
        counter: i32,
        name: String,
    }

    #[derive(Clone)]
    enum TestAction {
        Increment,
        Decrement,
        SetName(String),
    }

    struct CounterReducer;

    impl Reducer for CounterReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                TestAction::Increment => {
                    state.counter += 1;
                    smallvec![Effect::None]
                },
                TestAction::Decrement => {
                    state.counter -= 1;
                    smallvec![Effect::None]
                },
                TestAction::SetName(_) => smallvec![Effect::None],
            }
        }
    }

    struct NameReducer;

    impl Reducer for NameReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            if let TestAction::SetName(name) = action {
                state.name = name;
            }
            smallvec![Effect::None]
        }
    }

    #[test]
    fn test_combine_reducers() {
        let combined = combine_reducers(vec![Box::new(CounterReducer), Box::new(NameReducer)]);

        let mut state = TestState::default();

        let _ = combined.reduce(&mut state, TestAction::Increment, &());
        assert_eq!(state.counter, 1);

        let _ = combined.reduce(&mut state, TestAction::SetName("Alice".to_string()), &());
        assert_eq!(state.name, "Alice");

        let effects = combined.reduce(&mut state, TestAction::Decrement, &());
        assert_eq!(state.counter, 0);
        assert_eq!(state.name, "Alice");
        assert_eq!(effects.len(), 2);
    }

    // Child reducer that schedules a delayed echo of every action it sees
    struct EchoReducer;

    #[derive(Clone, Debug, PartialEq)]
    struct Item {
        id: u8,
        value: i32,
    }

    impl Identifiable for Item {
        type Id = u8;

        fn id(&self) -> &u8 {
            &self.id
        }
    }

    impl Reducer for EchoReducer {
        type State = Item;
        type Action = i32;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Item,
            action: i32,
            _env: &(),
        ) -> SmallVec<[Effect<i32>; 4]> {
            state.value += action;
            smallvec![Effect::Delay {
                duration: Duration::from_millis(1),
                action: Box::new(action),
            }]
        }
    }

    #[derive(Clone, Debug, PartialEq)]
    enum ListAction {
        Element(u8, i32),
        Sheet(i32),
        Unrelated,
    }

    #[derive(Default)]
    struct ListState {
        items: IdentifiedVec<Item>,
        sheet: Option<Item>,
    }

    fn list_state() -> ListState {
        ListState {
            items: [Item { id: 1, value: 0 }, Item { id: 2, value: 0 }]
                .into_iter()
                .collect(),
            sheet: None,
        }
    }

    fn element_reducer() -> impl Reducer<State = ListState, Action = ListAction, Environment = ()> {
        for_each(
            EchoReducer,
            |state: &mut ListState| &mut state.items,
            |action: ListAction| match action {
                ListAction::Element(id, delta) => Some((id, delta)),
                _ => None,
            },
            ListAction::Element,
        )
    }

    fn sheet_reducer() -> impl Reducer<State = ListState, Action = ListAction, Environment = ()> {
        if_let(
            EchoReducer,
            |state: &mut ListState| &mut state.sheet,
            |action: ListAction| match action {
                ListAction::Sheet(delta) => Some(delta),
                _ => None,
            },
            ListAction::Sheet,
        )
    }

    #[test]
    fn for_each_targets_element_and_lifts_effects() {
        let reducer = element_reducer();
        let mut state = list_state();

        let effects = reducer.reduce(&mut state, ListAction::Element(2, 5), &());

        assert_eq!(state.items.get(&2).map(|i| i.value), Some(5));
        assert_eq!(state.items.get(&1).map(|i| i.value), Some(0));
        assert_eq!(effects.len(), 1);
        match &effects[0] {
            Effect::Delay { action, .. } => assert_eq!(**action, ListAction::Element(2, 5)),
            other => unreachable!("unexpected effect {other:?}"),
        }
    }

    #[test]
    fn for_each_ignores_unknown_id() {
        let reducer = element_reducer();
        let mut state = list_state();

        let effects = reducer.reduce(&mut state, ListAction::Element(9, 5), &());

        assert!(effects.is_empty());
        assert!(state.items.iter().all(|i| i.value == 0));
    }

    #[test]
    fn for_each_ignores_other_actions() {
        let reducer = element_reducer();
        let mut state = list_state();
        assert!(reducer.reduce(&mut state, ListAction::Unrelated, &()).is_empty());
    }

    #[test]
    fn if_let_runs_only_when_present() {
        let reducer = sheet_reducer();
        let mut state = list_state();

        let effects = reducer.reduce(&mut state, ListAction::Sheet(3), &());
        assert!(effects.is_empty());
        assert!(state.sheet.is_none());

        state.sheet = Some(Item { id: 7, value: 1 });
        let effects = reducer.reduce(&mut state, ListAction::Sheet(3), &());
        assert_eq!(state.sheet.as_ref().map(|i| i.value), Some(4));
        match &effects[0] {
            Effect::Delay { action, .. } => assert_eq!(**action, ListAction::Sheet(3)),
            other => unreachable!("unexpected effect {other:?}"),
        }
    }
}
