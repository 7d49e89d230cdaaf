//! Dependencies injected into the todo reducers.

use crate::config::TodosConfig;
use std::sync::Arc;
use todos_core::environment::{IdGenerator, UuidGenerator};

/// Environment for the todo list reducer
#[derive(Clone)]
pub struct TodosEnvironment {
    /// Source of ids for new todos
    pub ids: Arc<dyn IdGenerator>,
    /// Timing of follow-up effects
    pub config: TodosConfig,
}

impl TodosEnvironment {
    /// Creates an environment with default timings
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            ids,
            config: TodosConfig::default(),
        }
    }

    /// Replace the timing configuration
    #[must_use]
    pub fn with_config(mut self, config: TodosConfig) -> Self {
        self.config = config;
        self
    }

    /// Random v4 ids and timings read from the process environment
    #[must_use]
    pub fn live() -> Self {
        Self::new(Arc::new(UuidGenerator)).with_config(TodosConfig::from_env())
    }
}

impl std::fmt::Debug for TodosEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodosEnvironment")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
