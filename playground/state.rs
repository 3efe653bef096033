use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use nn_playground::{Network, NetworkError, NetworkSpec, TrainConfig};

/// The single network served by the playground plus the parameters it was
/// built and is trained with.
pub struct PlaygroundState {
    pub spec: NetworkSpec,
    pub config: TrainConfig,
    pub network: Network,
    /// Number of `/step` calls since the last rebuild.
    pub step: usize,
    /// Mean batch error of every step since the last rebuild.
    pub loss_history: Vec<f64>,
}

impl PlaygroundState {
    pub fn new(spec: NetworkSpec) -> Result<Self, NetworkError> {
        let network = Network::build(&spec)?;
        Ok(PlaygroundState {
            spec,
            config: TrainConfig::default(),
            network,
            step: 0,
            loss_history: Vec::new(),
        })
    }

    /// Swaps in a network freshly built from `spec` and clears the step
    /// history. Building happens outside the lock, in the caller.
    pub fn install(&mut self, spec: NetworkSpec, network: Network) {
        self.network = network;
        self.spec = spec;
        self.step = 0;
        self.loss_history.clear();
    }
}

/// Shared state type — an `Arc<Mutex<PlaygroundState>>` passed to every
/// handler. The mutex serialises all engine calls.
pub type SharedState = Arc<Mutex<PlaygroundState>>;

/// Locks the shared state, recovering the guard from a poisoned lock.
pub fn lock_state(state: &SharedState) -> MutexGuard<'_, PlaygroundState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
