//! # Todos Runtime
//!
//! Runtime implementation for the todos reducer architecture.
//!
//! This crate provides the Store runtime that coordinates reducer execution
//! and effect handling.
//!
//! ## Core Components
//!
//! - **Store**: The runtime that manages state and executes effects
//! - **Effect Executor**: Executes effect descriptions and feeds actions back to reducers
//! - **Cancellation Registry**: Tracks cancellable effects by id so they can be
//!   aborted (debounces, cancel-in-flight)
//!
//! ## Example
//!
//! ```ignore
//! use todos_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use todos_core::{effect::Effect, reducer::Reducer};
use tokio::sync::{watch, RwLock};

mod cancellation;

use cancellation::CancellationRegistry;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// A spawned effect task failed (it panicked)
        ///
        /// This error is logged but does not halt the store.
        /// Effects are fire-and-forget operations.
        #[error("Effect task failed: {0}")]
        TaskJoinError(#[from] tokio::task::JoinError),

        /// Store is shutting down and not accepting new actions
        ///
        /// This error is returned when `send()` is called after shutdown initiated.
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Shutdown timed out waiting for effects to complete
        ///
        /// Some effects were still running when the timeout elapsed.
        #[error("Shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),

        /// Timeout waiting for a matching action
        ///
        /// Returned by `send_and_wait_for` when the timeout expires before
        /// a matching action is received.
        #[error("Timeout waiting for action")]
        Timeout,

        /// Action broadcast channel closed
        #[error("Action broadcast channel closed")]
        ChannelClosed,
    }
}

pub use error::StoreError;

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use todos_runtime::StoreConfig;
///
/// let config = StoreConfig::default()
///     .with_broadcast_capacity(64)
///     .with_shutdown_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.broadcast_capacity, 64);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Capacity of the channel that broadcasts effect-produced actions
    pub broadcast_capacity: usize,
    /// Default timeout for graceful shutdown
    pub default_shutdown_timeout: Duration,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(broadcast_capacity: usize, default_shutdown_timeout: Duration) -> Self {
        Self {
            broadcast_capacity,
            default_shutdown_timeout,
        }
    }

    /// Set the action broadcast capacity
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = capacity;
        self
    }

    /// Set the default shutdown timeout
    #[must_use]
    pub const fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.default_shutdown_timeout = timeout;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            broadcast_capacity: 16,
            default_shutdown_timeout: Duration::from_secs(30),
        }
    }
}

/// Handle for tracking effect completion
///
/// Returned by [`Store::send()`] to allow waiting for the effects that action
/// started. Effects cancelled before they finish count as complete.
///
/// # Example
///
/// ```ignore
/// let mut handle = store.send(Action::Start).await?;
/// handle.wait_with_timeout(Duration::from_secs(5)).await?;
/// // All effects from Action::Start are now complete
/// ```
#[derive(Clone)]
pub struct EffectHandle {
    effects: Arc<AtomicUsize>,
    completion: watch::Receiver<()>,
}

impl EffectHandle {
    /// Create a new effect handle and the tracking context feeding it
    fn new() -> (Self, EffectTracking) {
        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = watch::channel(());

        let handle = Self {
            effects: Arc::clone(&counter),
            completion: rx,
        };

        let tracking = EffectTracking {
            counter,
            notifier: tx,
        };

        (handle, tracking)
    }

    /// Create a handle that's already complete
    ///
    /// Useful for initialization in loops where you need a `last_handle`.
    #[must_use]
    pub fn completed() -> Self {
        let (tx, rx) = watch::channel(());
        let _ = tx.send(());

        Self {
            effects: Arc::new(AtomicUsize::new(0)),
            completion: rx,
        }
    }

    /// Number of effects still running
    #[must_use]
    pub fn pending(&self) -> usize {
        self.effects.load(Ordering::SeqCst)
    }

    /// Wait for all effects to complete
    pub async fn wait(&mut self) {
        while self.effects.load(Ordering::SeqCst) > 0 {
            if self.completion.changed().await.is_err() {
                // Every tracker is gone, so nothing can still be running
                break;
            }
        }
    }

    /// Wait for all effects to complete with a timeout
    ///
    /// # Errors
    ///
    /// Returns `Err(())` if the timeout expires before all effects complete.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), ()> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| ())
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("pending_effects", &self.effects.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

/// Internal: Effect tracking context passed through effect execution
struct EffectTracking {
    counter: Arc<AtomicUsize>,
    notifier: watch::Sender<()>,
}

impl EffectTracking {
    /// Increment the effect counter (effect started)
    fn increment(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }

    /// Decrement the effect counter (effect completed)
    fn decrement(&self) {
        if self.counter.fetch_sub(1, Ordering::SeqCst) == 1 {
            let _ = self.notifier.send(());
        }
    }
}

impl Clone for EffectTracking {
    fn clone(&self) -> Self {
        Self {
            counter: Arc::clone(&self.counter),
            notifier: self.notifier.clone(),
        }
    }
}

/// Internal: RAII guard that decrements effect counter on drop
///
/// Ensures the effect counter is always decremented, even if the effect
/// panics or its task is aborted.
struct DecrementGuard(EffectTracking);

impl Drop for DecrementGuard {
    fn drop(&mut self) {
        self.0.decrement();
    }
}

/// Guard that decrements an atomic counter on drop (for shutdown tracking)
struct AtomicCounterGuard(Arc<AtomicUsize>);

impl Drop for AtomicCounterGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Label used for effect metrics
const fn effect_kind<A>(effect: &Effect<A>) -> &'static str {
    match effect {
        Effect::None => "none",
        Effect::Parallel(_) => "parallel",
        Effect::Sequential(_) => "sequential",
        Effect::Delay { .. } => "delay",
        Effect::Future(_) => "future",
        Effect::Cancellable { .. } => "cancellable",
        Effect::Cancel(_) => "cancel",
    }
}

/// Store runtime for coordinating reducer execution and effect handling.
pub mod store {
    use super::{
        cancellation, effect_kind, Arc, AtomicBool, AtomicCounterGuard, AtomicUsize,
        CancellationRegistry, DecrementGuard, Duration, Effect, EffectHandle, EffectTracking,
        Mutex, Ordering, Reducer, RwLock, StoreConfig, StoreError,
    };
    use futures::future::{BoxFuture, FutureExt};
    use todos_core::effect::EffectId;
    use tokio::sync::broadcast;
    use tokio::task::JoinHandle;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock`; the reducer runs under the write lock, so
    ///    actions never interleave mid-mutation)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop and cancellation)
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: Arc<R>,
        environment: Arc<E>,
        default_shutdown_timeout: Duration,
        shutdown: Arc<AtomicBool>,
        pending_effects: Arc<AtomicUsize>,
        cancellations: Arc<Mutex<CancellationRegistry>>,
        /// Broadcasts every action produced by effects to observers.
        action_broadcast: broadcast::Sender<A>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + Clone + 'static,
        S: Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses [`StoreConfig::default`].
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new Store with custom configuration
        ///
        /// # Example
        ///
        /// ```ignore
        /// let config = StoreConfig::default()
        ///     .with_shutdown_timeout(Duration::from_secs(60));
        ///
        /// let store = Store::with_config(MyState::default(), MyReducer, env, config);
        /// ```
        #[must_use]
        pub fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            let (action_broadcast, _) = broadcast::channel(config.broadcast_capacity.max(1));

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer: Arc::new(reducer),
                environment: Arc::new(environment),
                default_shutdown_timeout: config.default_shutdown_timeout,
                shutdown: Arc::new(AtomicBool::new(false)),
                pending_effects: Arc::new(AtomicUsize::new(0)),
                cancellations: Arc::new(Mutex::new(CancellationRegistry::default())),
                action_broadcast,
            }
        }

        /// Initiate graceful shutdown of the store
        ///
        /// This method:
        /// 1. Sets the shutdown flag (rejecting new actions)
        /// 2. Waits for pending effects to complete (with timeout)
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownTimeout`] if the timeout expires before all
        /// pending effects complete.
        pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
            tracing::info!("Initiating graceful shutdown");
            metrics::counter!("store.shutdown.initiated").increment(1);

            self.shutdown.store(true, Ordering::Release);

            let start = tokio::time::Instant::now();
            let poll_interval = Duration::from_millis(100);

            loop {
                let pending = self.pending_effects.load(Ordering::Acquire);

                if pending == 0 {
                    tracing::info!("All effects completed, shutdown successful");
                    metrics::counter!("store.shutdown.completed").increment(1);
                    return Ok(());
                }

                if start.elapsed() >= timeout {
                    tracing::error!(
                        pending_effects = pending,
                        "Shutdown timeout: {} effects still running", pending
                    );
                    metrics::counter!("store.shutdown.timeout").increment(1);
                    return Err(StoreError::ShutdownTimeout(pending));
                }

                tracing::debug!(
                    pending_effects = pending,
                    elapsed_ms = start.elapsed().as_millis(),
                    "Waiting for effects to complete"
                );

                tokio::time::sleep(poll_interval.min(timeout)).await;
            }
        }

        /// Shut down using the configured default timeout
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownTimeout`] if effects outlive the timeout.
        pub async fn shutdown_with_default_timeout(&self) -> Result<(), StoreError> {
            self.shutdown(self.default_shutdown_timeout).await
        }

        /// Send an action to the store
        ///
        /// 1. Acquires write lock on state
        /// 2. Calls reducer with (state, action, environment)
        /// 3. Hands returned effects to the executor
        ///
        /// Cancellations requested by the effects (`Effect::Cancel`, or
        /// `Effect::Cancellable` with `cancel_in_flight`) take place before
        /// this method returns. Everything else runs in spawned tasks, so
        /// `send()` returns after starting effects, not after they finish.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
        ///
        /// # Panics
        ///
        /// If the reducer panics, the panic will propagate.
        /// Reducers should be pure functions that do not panic.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError> {
            self.dispatch(action, false).await
        }

        /// Reduce `action` and execute its effects
        ///
        /// A follow-up is broadcast while the write lock is still held, right
        /// after it has been reduced. Observers therefore never see an action
        /// whose state change is missing, and a follow-up aborted before it
        /// reached the reducer is never broadcast.
        async fn dispatch(&self, action: A, follow_up: bool) -> Result<EffectHandle, StoreError> {
            if self.shutdown.load(Ordering::Acquire) {
                tracing::warn!("Rejected action: store is shutting down");
                metrics::counter!("store.shutdown.rejected_actions").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            tracing::debug!("Processing action");
            metrics::counter!("store.commands.total").increment(1);

            let (handle, tracking) = EffectHandle::new();

            let effects = {
                let mut state = self.state.write().await;
                tracing::trace!("Acquired write lock on state");

                let span = tracing::debug_span!("reducer_execution");
                let _enter = span.enter();

                let broadcast = follow_up.then(|| action.clone());
                let start = std::time::Instant::now();
                let effects = self.reducer.reduce(&mut *state, action, &self.environment);
                metrics::histogram!("store.reducer.duration_seconds")
                    .record(start.elapsed().as_secs_f64());

                tracing::trace!("Reducer completed, returned {} effects", effects.len());

                // Note: Precision loss acceptable for metrics (effect counts < 2^52)
                #[allow(clippy::cast_precision_loss)]
                metrics::histogram!("store.effects.count").record(effects.len() as f64);

                if let Some(action) = broadcast {
                    // No receivers is fine
                    let _ = self.action_broadcast.send(action);
                }

                effects
            };

            for effect in effects {
                self.execute_effect_internal(effect, &tracking);
            }
            tracing::debug!("Action processing completed, returning handle");

            Ok(handle)
        }

        /// Send an action and wait for a matching action produced by effects
        ///
        /// Subscribes to the action broadcast before sending, so a follow-up
        /// produced immediately is not missed.
        ///
        /// # Errors
        ///
        /// - [`StoreError::Timeout`]: Timeout expired before matching action received
        /// - [`StoreError::ChannelClosed`]: Action broadcast channel closed
        /// - [`StoreError::ShutdownInProgress`]: Store is shutting down
        pub async fn send_and_wait_for<F>(
            &self,
            action: A,
            predicate: F,
            timeout: Duration,
        ) -> Result<A, StoreError>
        where
            F: Fn(&A) -> bool,
        {
            let mut rx = self.action_broadcast.subscribe();

            self.send(action).await?;

            tokio::time::timeout(timeout, async {
                loop {
                    match rx.recv().await {
                        Ok(action) if predicate(&action) => return Ok(action),
                        Ok(_) => {},
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::warn!(
                                skipped,
                                "Action observer lagged, {} actions skipped",
                                skipped
                            );
                        },
                        Err(broadcast::error::RecvError::Closed) => {
                            return Err(StoreError::ChannelClosed);
                        },
                    }
                }
            })
            .await
            .map_err(|_| StoreError::Timeout)?
        }

        /// Subscribe to all actions produced by effects
        ///
        /// Only follow-up actions are broadcast, not the actions passed to
        /// [`Store::send`] directly. Each is broadcast after it has been reduced.
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let count = store.state(|s| s.todos.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Number of effects currently running, across all actions
        #[must_use]
        pub fn pending_effects(&self) -> usize {
            self.pending_effects.load(Ordering::Acquire)
        }

        /// Number of cancellable effects currently registered under `id`
        #[must_use]
        pub fn in_flight(&self, id: EffectId) -> usize {
            cancellation::lock(&self.cancellations).in_flight(id)
        }

        /// Execute an effect with tracking
        ///
        /// # Effect Types
        ///
        /// - `None`: No-op
        /// - `Parallel`: Each child is executed independently
        /// - `Cancel`: Aborts everything registered under the id, immediately
        /// - `Cancellable`: Optionally cancels in-flight effects with the same
        ///   id, then spawns and registers the wrapped effect
        /// - `Future`, `Delay`, `Sequential`: Spawned and driven to completion
        ///
        /// # Error Handling Strategy
        ///
        /// Effects are fire-and-forget. A panicking effect task is isolated
        /// in its spawned task; the guards keep the counters right.
        #[tracing::instrument(skip(self, effect, tracking), name = "execute_effect")]
        fn execute_effect_internal(&self, effect: Effect<A>, tracking: &EffectTracking) {
            let kind = effect_kind(&effect);
            metrics::counter!("store.effects.executed", "type" => kind).increment(1);

            match effect {
                Effect::None => {
                    tracing::trace!("Executing Effect::None (no-op)");
                },
                Effect::Parallel(effects) => {
                    tracing::trace!("Executing Effect::Parallel with {} effects", effects.len());
                    for effect in effects {
                        self.execute_effect_internal(effect, tracking);
                    }
                },
                Effect::Cancel(id) => {
                    tracing::trace!(%id, "Executing Effect::Cancel");
                    self.cancel_effects(id);
                },
                Effect::Cancellable {
                    id,
                    cancel_in_flight,
                    effect,
                } => {
                    tracing::trace!(%id, cancel_in_flight, "Executing Effect::Cancellable");
                    // Detached: the registry holds the abort handle
                    drop(self.spawn_cancellable(id, cancel_in_flight, *effect, tracking));
                },
                effect @ (Effect::Future(_) | Effect::Delay { .. } | Effect::Sequential(_)) => {
                    tracing::trace!("Spawning Effect::{}", kind);
                    self.spawn_effect(effect, tracking);
                },
            }
        }

        /// Start tracking one spawned effect
        fn track(&self, tracking: &EffectTracking) -> (DecrementGuard, AtomicCounterGuard) {
            tracking.increment();
            self.pending_effects.fetch_add(1, Ordering::SeqCst);
            (
                DecrementGuard(tracking.clone()),
                AtomicCounterGuard(Arc::clone(&self.pending_effects)),
            )
        }

        /// Spawn a task driving `effect` to completion
        fn spawn_effect(&self, effect: Effect<A>, tracking: &EffectTracking) {
            let guards = self.track(tracking);
            let store = self.clone();
            let tracking = tracking.clone();

            tokio::spawn(async move {
                let _guards = guards;
                store.run_effect(effect, &tracking).await;
            });
        }

        /// Spawn a task driving `effect` and register it under `id`
        ///
        /// With `cancel_in_flight`, effects already registered under `id` are
        /// aborted under the same registry lock that registers the new one, so
        /// concurrent senders leave at most one effect per id.
        fn spawn_cancellable(
            &self,
            id: EffectId,
            cancel_in_flight: bool,
            effect: Effect<A>,
            tracking: &EffectTracking,
        ) -> JoinHandle<()> {
            let store = self.clone();
            let registry = Arc::clone(&self.cancellations);

            // Held across spawn so the task cannot deregister before it is registered
            let mut cancellations = cancellation::lock(&self.cancellations);
            if cancel_in_flight {
                let cancelled = cancellations.cancel(id);
                record_cancelled(id, cancelled);
            }

            let guards = self.track(tracking);
            let tracking = tracking.clone();
            let token = cancellations.next_token();

            let handle = tokio::spawn(async move {
                let _guards = guards;
                store.run_effect(effect, &tracking).await;
                cancellation::lock(&registry).deregister(id, token);
            });

            cancellations.register(id, token, handle.abort_handle());
            tracing::trace!(%id, token, "Registered cancellable effect");
            handle
        }

        /// Abort every effect registered under `id`
        fn cancel_effects(&self, id: EffectId) {
            let cancelled = cancellation::lock(&self.cancellations).cancel(id);
            record_cancelled(id, cancelled);
        }

        /// Drive an effect to completion inside the current task
        fn run_effect<'a>(
            &'a self,
            effect: Effect<A>,
            tracking: &'a EffectTracking,
        ) -> BoxFuture<'a, ()> {
            async move {
                match effect {
                    Effect::None => {},
                    Effect::Future(fut) => {
                        if let Some(action) = fut.await {
                            tracing::trace!("Effect::Future produced an action, sending to store");
                            self.feed_back(action).await;
                        } else {
                            tracing::trace!("Effect::Future completed with no action");
                        }
                    },
                    Effect::Delay { duration, action } => {
                        tokio::time::sleep(duration).await;
                        tracing::trace!("Effect::Delay completed, sending action");
                        self.feed_back(*action).await;
                    },
                    Effect::Parallel(effects) => {
                        futures::future::join_all(
                            effects.into_iter().map(|effect| self.run_effect(effect, tracking)),
                        )
                        .await;
                    },
                    Effect::Sequential(effects) => {
                        let effect_count = effects.len();
                        for (idx, effect) in effects.into_iter().enumerate() {
                            tracing::trace!(
                                "Executing sequential effect {} of {}",
                                idx + 1,
                                effect_count
                            );
                            self.run_effect(effect, tracking).await;
                        }
                        tracing::trace!("Effect::Sequential completed");
                    },
                    Effect::Cancellable {
                        id,
                        cancel_in_flight,
                        effect,
                    } => {
                        let handle =
                            self.spawn_cancellable(id, cancel_in_flight, *effect, tracking);
                        match handle.await {
                            Ok(()) => {},
                            Err(error) if error.is_cancelled() => {
                                tracing::trace!(%id, "Nested cancellable effect was cancelled");
                            },
                            Err(error) => {
                                let error = StoreError::from(error);
                                tracing::error!(%id, %error, "Nested cancellable effect failed");
                            },
                        }
                    },
                    Effect::Cancel(id) => self.cancel_effects(id),
                }
            }
            .boxed()
        }

        /// Send an effect-produced action back into the store
        async fn feed_back(&self, action: A) {
            if let Err(error) = self.dispatch(action, true).await {
                tracing::debug!(%error, "Follow-up action dropped");
            }
        }
    }

    fn record_cancelled(id: EffectId, cancelled: usize) {
        if cancelled > 0 {
            tracing::debug!(%id, cancelled, "Cancelled in-flight effects");
            metrics::counter!("store.effects.cancelled").increment(cancelled as u64);
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: Arc::clone(&self.reducer),
                environment: Arc::clone(&self.environment),
                default_shutdown_timeout: self.default_shutdown_timeout,
                shutdown: Arc::clone(&self.shutdown),
                pending_effects: Arc::clone(&self.pending_effects),
                cancellations: Arc::clone(&self.cancellations),
                action_broadcast: self.action_broadcast.clone(),
            }
        }
    }
}

// Re-export for convenience
pub use store::Store;
