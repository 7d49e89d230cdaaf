//! Scripted demo of the todo list.
//!
//! Runs a fixed session against a store seeded with the demo todos and
//! prints the list after each step. Set `RUST_LOG` to see reducer and
//! effect traces.

use std::time::Duration;
use todos::types::{BUY_MILK_ID, CHECK_MAIL_ID};
use todos::{EditMode, TodosAction, TodosEnvironment, TodosReducer, TodosState, TodosViewState};
use todos_core::IndexSet;
use todos_runtime::Store;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

type TodosStore = Store<TodosState, TodosAction, TodosEnvironment, TodosReducer>;

fn print_list(title: &str, state: &TodosState) {
    let view = TodosViewState::from(state);
    println!("\n{title}");
    for todo in &state.todos {
        let status = if todo.is_complete { "✓" } else { " " };
        println!("  [{status}] {}", todo.description);
    }
    println!(
        "  ({} of {} done, clear completed {})",
        state.completed_count(),
        state.count(),
        if view.is_clear_completed_button_disabled { "disabled" } else { "enabled" }
    );
}

async fn show(store: &TodosStore, title: &str) {
    let state = store.state(Clone::clone).await;
    print_list(title, &state);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todos=debug,todos_runtime=info".into()),
        )
        .with(fmt::layer())
        .init();

    println!("=== Todos ===");

    let env = TodosEnvironment::live();
    let config = env.config;
    let store = Store::new(TodosState::mock(), TodosReducer::new(), env);
    show(&store, "Seeded list:").await;

    // Add a todo through the sheet and wait for the simulated save
    store.send(TodosAction::AddTodoButtonTapped).await?;
    store
        .send(TodosAction::edit_pending_description("Buy eggs"))
        .await?;
    let received = store
        .send_and_wait_for(
            TodosAction::SaveTodoButtonTapped,
            |action| matches!(action, TodosAction::ReceiveTodo(_)),
            config.save_delay + Duration::from_secs(1),
        )
        .await?;
    tracing::info!(action = received.action_name(), "Save completed");
    show(&store, "After saving \"Buy eggs\":").await;

    // Toggle quickly; only the last toggle's debounce resorts
    store.send(TodosAction::toggle(CHECK_MAIL_ID, true)).await?;
    store.send(TodosAction::toggle(CHECK_MAIL_ID, false)).await?;
    let mut handle = store.send(TodosAction::toggle(CHECK_MAIL_ID, true)).await?;
    show(&store, "Toggled \"Check Mail\" (not yet resorted):").await;
    handle.wait().await;
    show(&store, "After the completion debounce:").await;

    // Drag "Buy Milk" to the top in edit mode
    store
        .send(TodosAction::EditModeChanged(EditMode::Active))
        .await?;
    let from = store
        .state(|s| s.todos.index_of(&BUY_MILK_ID))
        .await
        .into_iter()
        .collect::<IndexSet>();
    let mut handle = store.send(TodosAction::Move(from, 0)).await?;
    handle.wait().await;
    store
        .send(TodosAction::EditModeChanged(EditMode::Inactive))
        .await?;
    show(&store, "After moving \"Buy Milk\" to the top:").await;

    store.send(TodosAction::ClearCompletedButtonTapped).await?;
    show(&store, "After clearing completed:").await;

    store.shutdown_with_default_timeout().await?;
    println!("\n=== Demo Complete ===");
    Ok(())
}
