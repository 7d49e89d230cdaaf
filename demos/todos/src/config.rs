//! Timing configuration for the todo list.
//!
//! Defaults reproduce the interactive feel of the app: a short simulated
//! save, a short pause before resorting after a drag, and a one second
//! debounce before completed todos sink to the bottom.

use std::env;
use std::time::Duration;

/// Environment variable overriding [`TodosConfig::save_delay`], in milliseconds
pub const SAVE_DELAY_VAR: &str = "TODOS_SAVE_DELAY_MS";
/// Environment variable overriding [`TodosConfig::move_sort_delay`], in milliseconds
pub const MOVE_SORT_DELAY_VAR: &str = "TODOS_MOVE_SORT_DELAY_MS";
/// Environment variable overriding [`TodosConfig::completion_sort_delay`], in milliseconds
pub const COMPLETION_SORT_DELAY_VAR: &str = "TODOS_COMPLETION_SORT_DELAY_MS";

/// Delays used by the list reducer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodosConfig {
    /// Simulated latency between saving a new todo and receiving it back
    pub save_delay: Duration,
    /// Wait after a move before completed todos are resorted
    pub move_sort_delay: Duration,
    /// Debounce after a completion toggle before completed todos are resorted
    pub completion_sort_delay: Duration,
}

impl TodosConfig {
    /// Set the save latency
    #[must_use]
    pub const fn with_save_delay(mut self, delay: Duration) -> Self {
        self.save_delay = delay;
        self
    }

    /// Set the post-move resort delay
    #[must_use]
    pub const fn with_move_sort_delay(mut self, delay: Duration) -> Self {
        self.move_sort_delay = delay;
        self
    }

    /// Set the completion resort debounce
    #[must_use]
    pub const fn with_completion_sort_delay(mut self, delay: Duration) -> Self {
        self.completion_sort_delay = delay;
        self
    }

    /// Load configuration from the process environment
    ///
    /// Unset or unparsable variables fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, falling back to the defaults
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let millis = |key: &str, default: Duration| {
            lookup(key)
                .and_then(|s| s.trim().parse::<u64>().ok())
                .map_or(default, Duration::from_millis)
        };

        Self {
            save_delay: millis(SAVE_DELAY_VAR, defaults.save_delay),
            move_sort_delay: millis(MOVE_SORT_DELAY_VAR, defaults.move_sort_delay),
            completion_sort_delay: millis(
                COMPLETION_SORT_DELAY_VAR,
                defaults.completion_sort_delay,
            ),
        }
    }
}

impl Default for TodosConfig {
    fn default() -> Self {
        Self {
            save_delay: Duration::from_millis(100),
            move_sort_delay: Duration::from_millis(100),
            completion_sort_delay: Duration::from_secs(1),
        }
    }
}
