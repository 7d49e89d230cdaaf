//! Domain types for the todo list.
//!
//! A todo list is an ordered collection of items, an optional item being
//! composed in the "add todo" sheet, and the list's edit mode.

use serde::{Deserialize, Serialize};
use todos_core::{Identifiable, IdentifiedVec, IndexSet};
use todos_macros::{Action, BindableState};
use uuid::Uuid;

/// Unique identifier for a todo item
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(Uuid);

impl TodoId {
    /// Creates a `TodoId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo item
///
/// The id is fixed at creation; `description` and `is_complete` are the
/// fields the row and the add sheet bind to.
#[derive(BindableState, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    id: TodoId,
    /// What needs doing
    #[binding]
    pub description: String,
    /// Whether it is done
    #[binding]
    pub is_complete: bool,
}

impl TodoState {
    /// A blank, incomplete todo
    #[must_use]
    pub const fn new(id: TodoId) -> Self {
        Self {
            id,
            description: String::new(),
            is_complete: false,
        }
    }

    /// A todo with the given fields
    #[must_use]
    pub fn with_description(id: TodoId, description: impl Into<String>, is_complete: bool) -> Self {
        Self {
            id,
            description: description.into(),
            is_complete,
        }
    }

    /// This todo's identifier
    #[must_use]
    pub const fn id(&self) -> TodoId {
        self.id
    }
}

impl Identifiable for TodoState {
    type Id = TodoId;

    fn id(&self) -> &TodoId {
        &self.id
    }
}

/// Actions on a single todo
#[derive(Clone, Debug, PartialEq)]
pub enum TodoAction {
    /// A bound field changed
    Binding(TodoStateBinding),
}

/// Actions delivered to a presented child (sheet, alert, ...)
#[derive(Clone, Debug, PartialEq)]
pub enum PresentationAction<A> {
    /// An action from inside the presented child
    Presented(A),
    /// The child was dismissed
    Dismiss,
}

/// Whether the list shows its reorder and delete controls
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditMode {
    /// Rows are displayed normally
    #[default]
    Inactive,
    /// Rows can be moved and deleted
    Active,
}

/// State of the todo list
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodosState {
    /// The todo being composed in the add sheet, while it is open
    pub add_todo: Option<TodoState>,
    /// Whether reorder/delete controls are shown
    pub edit_mode: EditMode,
    /// Todos in display order
    pub todos: IdentifiedVec<TodoState>,
}

/// Fixed id of the seeded "Check Mail" todo
pub const CHECK_MAIL_ID: TodoId =
    TodoId::from_uuid(Uuid::from_u128(0xDEAD_BEEF_DEAD_BEEF_DEAD_BEED_DEAD_BEEF));
/// Fixed id of the seeded "Buy Milk" todo
pub const BUY_MILK_ID: TodoId =
    TodoId::from_uuid(Uuid::from_u128(0xCAFE_BEEF_CAFE_BEEF_CAFE_BEEF_CAFE_BEEF));
/// Fixed id of the seeded "Call Mom" todo
pub const CALL_MOM_ID: TodoId =
    TodoId::from_uuid(Uuid::from_u128(0xD00D_CAFE_D00D_CAFE_D00D_CAFE_D00D_CAFE));

/// The three demo todos: two open, one done
#[must_use]
pub fn seed_todos() -> IdentifiedVec<TodoState> {
    [
        TodoState::with_description(CHECK_MAIL_ID, "Check Mail", false),
        TodoState::with_description(BUY_MILK_ID, "Buy Milk", false),
        TodoState::with_description(CALL_MOM_ID, "Call Mom", true),
    ]
    .into_iter()
    .collect()
}

impl TodosState {
    /// A list holding `todos`, nothing being added, not editing
    #[must_use]
    pub fn with_todos(todos: impl IntoIterator<Item = TodoState>) -> Self {
        Self {
            todos: todos.into_iter().collect(),
            ..Self::default()
        }
    }

    /// The seeded demo list
    #[must_use]
    pub fn mock() -> Self {
        Self {
            todos: seed_todos(),
            ..Self::default()
        }
    }

    /// Returns the number of todos
    #[must_use]
    pub fn count(&self) -> usize {
        self.todos.len()
    }

    /// Returns the number of completed todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.is_complete).count()
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&TodoState> {
        self.todos.get(&id)
    }
}

/// What the list view observes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TodosViewState {
    /// Current edit mode
    pub edit_mode: EditMode,
    /// True when there is nothing to clear
    pub is_clear_completed_button_disabled: bool,
}

impl From<&TodosState> for TodosViewState {
    fn from(state: &TodosState) -> Self {
        Self {
            edit_mode: state.edit_mode,
            is_clear_completed_button_disabled: !state.todos.iter().any(|t| t.is_complete),
        }
    }
}

/// Actions on the todo list
#[derive(Action, Clone, Debug, PartialEq)]
pub enum TodosAction {
    /// Open the add sheet with a blank todo
    #[intent]
    AddTodoButtonTapped,

    /// Something happened in the add sheet
    #[intent]
    AddTodo(PresentationAction<TodoAction>),

    /// Remove every completed todo
    #[intent]
    ClearCompletedButtonTapped,

    /// Remove the todos at these offsets
    #[intent]
    Delete(IndexSet),

    /// Switch edit mode
    #[intent]
    EditModeChanged(EditMode),

    /// Move the todos at these offsets before the todo at the destination
    #[intent]
    Move(IndexSet, usize),

    /// Save the todo in the add sheet
    #[intent]
    SaveTodoButtonTapped,

    /// A saved todo came back
    #[follow_up]
    ReceiveTodo(TodoState),

    /// Move completed todos below open ones
    SortCompletedTodos,

    /// Something happened in one row
    #[intent]
    Todo {
        /// Row the action is addressed to
        id: TodoId,
        /// What happened
        action: TodoAction,
    },
}

impl TodosAction {
    /// Set the completion flag of the todo with `id`
    #[must_use]
    pub const fn toggle(id: TodoId, is_complete: bool) -> Self {
        Self::Todo {
            id,
            action: TodoAction::Binding(TodoStateBinding::IsComplete(is_complete)),
        }
    }

    /// Edit the description of the todo in the add sheet
    #[must_use]
    pub fn edit_pending_description(description: impl Into<String>) -> Self {
        Self::AddTodo(PresentationAction::Presented(TodoAction::Binding(
            TodoStateBinding::Description(description.into()),
        )))
    }
}
