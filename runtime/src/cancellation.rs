//! Registry of in-flight cancellable effects
//!
//! Every effect started through `Effect::Cancellable` is spawned as its own
//! task and its abort handle is recorded here under the effect's
//! [`EffectId`]. Cancelling an id aborts every task recorded under it.
//!
//! Entries carry a per-registry token so a finishing task removes only its
//! own entry, never a newer one registered under the same id.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use todos_core::effect::EffectId;
use tokio::task::AbortHandle;

/// Token identifying one registered task
pub(crate) type CancellationToken = u64;

/// Abort handles of running cancellable effects, keyed by [`EffectId`]
#[derive(Debug, Default)]
pub(crate) struct CancellationRegistry {
    next_token: CancellationToken,
    in_flight: HashMap<EffectId, Vec<(CancellationToken, AbortHandle)>>,
}

impl CancellationRegistry {
    /// Reserve a token for a task about to be registered
    pub(crate) fn next_token(&mut self) -> CancellationToken {
        let token = self.next_token;
        self.next_token = self.next_token.wrapping_add(1);
        token
    }

    /// Record a running task under `id`
    pub(crate) fn register(&mut self, id: EffectId, token: CancellationToken, handle: AbortHandle) {
        self.in_flight.entry(id).or_default().push((token, handle));
    }

    /// Forget a task that finished on its own
    pub(crate) fn deregister(&mut self, id: EffectId, token: CancellationToken) {
        if let Some(entries) = self.in_flight.get_mut(&id) {
            entries.retain(|(t, _)| *t != token);
            if entries.is_empty() {
                self.in_flight.remove(&id);
            }
        }
    }

    /// Abort every task registered under `id`, returning how many were aborted
    pub(crate) fn cancel(&mut self, id: EffectId) -> usize {
        let Some(entries) = self.in_flight.remove(&id) else {
            return 0;
        };
        for (_, handle) in &entries {
            handle.abort();
        }
        entries.len()
    }

    /// Number of tasks registered under `id`
    pub(crate) fn in_flight(&self, id: EffectId) -> usize {
        self.in_flight.get(&id).map_or(0, Vec::len)
    }
}

/// Lock the registry, recovering from a poisoned mutex
///
/// The registry holds no invariants a panicking holder could break halfway,
/// so the inner value is still usable.
pub(crate) fn lock(registry: &Mutex<CancellationRegistry>) -> MutexGuard<'_, CancellationRegistry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}
