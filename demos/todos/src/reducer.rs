//! Reducer logic for the todo list.
//!
//! [`TodoReducer`] edits one item. [`TodosReducer`] owns the list: it runs
//! `TodoReducer` on the add sheet's pending item and on each row, then
//! handles the list-level intents and schedules resorts.

use crate::environment::TodosEnvironment;
use crate::types::{
    PresentationAction, TodoAction, TodoId, TodoState, TodoStateBinding, TodosAction, TodosState,
};
use std::marker::PhantomData;
use todos_core::composition::{combine_reducers, for_each, if_let, CombinedReducer};
use todos_core::effect::{Effect, EffectId};
use todos_core::{cancellable, delay, reducer::Reducer, smallvec, SmallVec};

/// Cancellation id of the debounced resort that follows a completion toggle
pub const TODO_COMPLETION_ID: EffectId = EffectId::new("todos.completion");

/// Reducer for a single todo
///
/// Applies field bindings and never produces effects. Generic over the
/// environment so it can be embedded in any parent.
pub struct TodoReducer<E> {
    _environment: PhantomData<fn() -> E>,
}

impl<E> TodoReducer<E> {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _environment: PhantomData,
        }
    }
}

impl<E> Default for TodoReducer<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for TodoReducer<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TodoReducer")
    }
}

impl<E> Reducer for TodoReducer<E> {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TodoAction::Binding(binding) => state.apply_binding(binding),
        }
        SmallVec::new()
    }
}

/// Draws allowed before begin-add gives up on finding an unused id
const MAX_ID_DRAWS: usize = 8;

/// Draw an id that no listed todo uses yet
///
/// A colliding id would make the later `ReceiveTodo` a duplicate and lose
/// the new todo, so collisions are re-drawn.
fn fresh_id(state: &TodosState, env: &TodosEnvironment) -> Option<TodoId> {
    (0..MAX_ID_DRAWS)
        .map(|_| TodoId::from_uuid(env.ids.next_id()))
        .find(|id| !state.todos.contains(id))
}

/// List-level intents, run after the child reducers
struct ListReducer;

impl Reducer for ListReducer {
    type State = TodosState;
    type Action = TodosAction;
    type Environment = TodosEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TodosAction::AddTodoButtonTapped => {
                match fresh_id(state, env) {
                    Some(id) => state.add_todo = Some(TodoState::new(id)),
                    None => tracing::warn!(
                        attempts = MAX_ID_DRAWS,
                        "Id generator kept returning ids already in the list"
                    ),
                }
                SmallVec::new()
            },

            TodosAction::AddTodo(PresentationAction::Dismiss) => {
                state.add_todo = None;
                SmallVec::new()
            },

            // Edits inside the sheet belong to the child reducer
            TodosAction::AddTodo(PresentationAction::Presented(_)) => SmallVec::new(),

            TodosAction::ClearCompletedButtonTapped => {
                state.todos.retain(|todo| !todo.is_complete);
                SmallVec::new()
            },

            TodosAction::Delete(offsets) => {
                state.todos.remove_at_offsets(&offsets);
                SmallVec::new()
            },

            TodosAction::EditModeChanged(edit_mode) => {
                state.edit_mode = edit_mode;
                SmallVec::new()
            },

            TodosAction::Move(source, destination) => {
                state.todos.move_offsets(&source, destination);
                smallvec![delay! {
                    duration: env.config.move_sort_delay,
                    action: TodosAction::SortCompletedTodos
                }]
            },

            TodosAction::SaveTodoButtonTapped => {
                let Some(todo) = state.add_todo.clone() else {
                    tracing::debug!("Save tapped with no pending todo");
                    return SmallVec::new();
                };
                smallvec![delay! {
                    duration: env.config.save_delay,
                    action: TodosAction::ReceiveTodo(todo)
                }]
            },

            TodosAction::ReceiveTodo(todo) => {
                let id = todo.id();
                if !state.todos.insert(todo, 0) {
                    tracing::warn!(%id, "Received todo already in the list");
                }
                state.add_todo = None;
                SmallVec::new()
            },

            TodosAction::SortCompletedTodos => {
                state.todos.sort_by(|a, b| a.is_complete.cmp(&b.is_complete));
                SmallVec::new()
            },

            TodosAction::Todo {
                id,
                action: TodoAction::Binding(TodoStateBinding::IsComplete(_)),
            } if state.todos.contains(&id) => {
                smallvec![cancellable! {
                    id: TODO_COMPLETION_ID,
                    cancel_in_flight: true,
                    effect: delay! {
                        duration: env.config.completion_sort_delay,
                        action: TodosAction::SortCompletedTodos
                    }
                }]
            },

            TodosAction::Todo { .. } => SmallVec::new(),
        }
    }
}

/// Reducer for the todo list
///
/// Composed of:
/// 1. `TodoReducer` on the pending todo while the add sheet is open
/// 2. `TodoReducer` on the row an action is addressed to
/// 3. The list intents
pub struct TodosReducer {
    inner: CombinedReducer<TodosState, TodosAction, TodosEnvironment>,
}

impl TodosReducer {
    /// Creates a new `TodosReducer`
    #[must_use]
    pub fn new() -> Self {
        let add_todo = if_let(
            TodoReducer::<TodosEnvironment>::new(),
            |state: &mut TodosState| &mut state.add_todo,
            |action: TodosAction| match action {
                TodosAction::AddTodo(PresentationAction::Presented(action)) => Some(action),
                _ => None,
            },
            |action: TodoAction| TodosAction::AddTodo(PresentationAction::Presented(action)),
        );

        let rows = for_each(
            TodoReducer::<TodosEnvironment>::new(),
            |state: &mut TodosState| &mut state.todos,
            |action: TodosAction| match action {
                TodosAction::Todo { id, action } => Some((id, action)),
                _ => None,
            },
            |id: TodoId, action: TodoAction| TodosAction::Todo { id, action },
        );

        Self {
            inner: combine_reducers(vec![
                Box::new(add_todo),
                Box::new(rows),
                Box::new(ListReducer),
            ]),
        }
    }
}

impl Default for TodosReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TodosReducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TodosReducer")
    }
}

impl Reducer for TodosReducer {
    type State = TodosState;
    type Action = TodosAction;
    type Environment = TodosEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        tracing::debug!(
            action = action.action_name(),
            follow_up = action.is_follow_up(),
            "Reducing todos action"
        );
        self.inner.reduce(state, action, env)
    }
}
