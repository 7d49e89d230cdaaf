//! # Todos Testing
//!
//! Testing utilities and helpers for the todos reducer architecture.
//!
//! This crate provides:
//! - Deterministic implementations of Environment traits
//! - A Given/When/Then builder for reducers
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use todos_testing::{ReducerTest, SequentialIdGenerator};
//!
//! ReducerTest::new(TodosReducer::new())
//!     .with_env(TodosEnvironment::new(Arc::new(SequentialIdGenerator::new())))
//!     .given_state(TodosState::default())
//!     .when_action(TodosAction::AddTodoButtonTapped)
//!     .then_state(|state| assert!(state.add_todo.is_some()))
//!     .run();
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use todos_core::environment::IdGenerator;
use uuid::Uuid;

pub mod reducer_test;

/// Deterministic implementations of Environment traits
pub mod mocks {
    use super::{AtomicU64, IdGenerator, Ordering, Uuid};

    /// Id generator yielding `Uuid::from_u128(0)`, `Uuid::from_u128(1)`, ...
    ///
    /// # Example
    ///
    /// ```
    /// use todos_core::environment::IdGenerator;
    /// use todos_testing::mocks::SequentialIdGenerator;
    /// use uuid::Uuid;
    ///
    /// let ids = SequentialIdGenerator::new();
    /// assert_eq!(ids.next_id(), Uuid::from_u128(0));
    /// assert_eq!(ids.next_id(), Uuid::from_u128(1));
    /// ```
    #[derive(Debug, Default)]
    pub struct SequentialIdGenerator {
        next: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Start counting at zero
        #[must_use]
        pub const fn new() -> Self {
            Self::starting_at(0)
        }

        /// Start counting at `first`
        #[must_use]
        pub const fn starting_at(first: u64) -> Self {
            Self {
                next: AtomicU64::new(first),
            }
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self) -> Uuid {
            Uuid::from_u128(u128::from(self.next.fetch_add(1, Ordering::SeqCst)))
        }
    }

    /// Id generator that always yields the same id
    #[derive(Debug, Clone, Copy)]
    pub struct FixedIdGenerator {
        id: Uuid,
    }

    impl FixedIdGenerator {
        /// Always produce `id`
        #[must_use]
        pub const fn new(id: Uuid) -> Self {
            Self { id }
        }
    }

    impl IdGenerator for FixedIdGenerator {
        fn next_id(&self) -> Uuid {
            self.id
        }
    }
}

// Re-export commonly used items
pub use mocks::{FixedIdGenerator, SequentialIdGenerator};
pub use reducer_test::{assertions, ReducerTest};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids_count_up() {
        let ids = SequentialIdGenerator::starting_at(7);
        assert_eq!(ids.next_id(), Uuid::from_u128(7));
        assert_eq!(ids.next_id(), Uuid::from_u128(8));
    }

    #[test]
    fn test_fixed_id_repeats() {
        let id = Uuid::from_u128(42);
        let ids = FixedIdGenerator::new(id);
        assert_eq!(ids.next_id(), id);
        assert_eq!(ids.next_id(), id);
    }
}
