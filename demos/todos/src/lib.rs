//! Todo list built from reducers.
//!
//! - A single todo is edited through field bindings (`TodoReducer`)
//! - The list (`TodosReducer`) adds todos through a sheet, deletes, moves,
//!   clears completed todos, and keeps completed todos below open ones
//! - Saving is simulated with a short delay; resorting after a completion
//!   toggle is debounced so rapid toggles resort once
//!
//! # Quick Start
//!
//! ```no_run
//! use todos::{TodosAction, TodosEnvironment, TodosReducer, TodosState};
//! use todos_runtime::Store;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Store::new(TodosState::mock(), TodosReducer::new(), TodosEnvironment::live());
//!
//! store.send(TodosAction::AddTodoButtonTapped).await?;
//! store.send(TodosAction::edit_pending_description("Buy eggs")).await?;
//! store.send(TodosAction::SaveTodoButtonTapped).await?;
//!
//! let count = store.state(TodosState::count).await;
//! println!("Todos: {count}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod environment;
pub mod reducer;
pub mod types;

// Re-export commonly used types
pub use config::TodosConfig;
pub use environment::TodosEnvironment;
pub use reducer::{TodoReducer, TodosReducer, TODO_COMPLETION_ID};
pub use types::{
    seed_todos, EditMode, PresentationAction, TodoAction, TodoId, TodoState, TodoStateBinding,
    TodosAction, TodosState, TodosViewState,
};
