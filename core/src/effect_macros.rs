//! Declarative macros for ergonomic effect construction
//!
//! These macros reduce boilerplate when creating `Effect` variants inside
//! reducers, particularly delayed follow-ups and debounced (cancellable) work.

/// Create an `Effect::Delay` for scheduling delayed actions
///
/// # Example
///
/// ```rust,ignore
/// use todos_core::delay;
/// use std::time::Duration;
///
/// delay! {
///     duration: Duration::from_millis(100),
///     action: TodosAction::SortCompletedTodos
/// }
/// ```
#[macro_export]
macro_rules! delay {
    (
        duration: $duration:expr,
        action: $action:expr
    ) => {
        $crate::effect::Effect::Delay {
            duration: $duration,
            action: ::std::boxed::Box::new($action),
        }
    };
}

/// Create an `Effect::Cancellable` wrapping another effect
///
/// # Example
///
/// ```rust,ignore
/// use todos_core::{cancellable, delay};
///
/// cancellable! {
///     id: TODO_COMPLETION_ID,
///     cancel_in_flight: true,
///     effect: delay! {
///         duration: Duration::from_secs(1),
///         action: TodosAction::SortCompletedTodos
///     }
/// }
/// ```
#[macro_export]
macro_rules! cancellable {
    (
        id: $id:expr,
        cancel_in_flight: $cancel_in_flight:expr,
        effect: $effect:expr
    ) => {
        $crate::effect::Effect::Cancellable {
            id: $id,
            cancel_in_flight: $cancel_in_flight,
            effect: ::std::boxed::Box::new($effect),
        }
    };
}
