use serde::{Serialize, Deserialize};

/// Per-step hyperparameters passed to `update_weights`.
///
/// Kept apart from `NetworkSpec` because changing them does not require a
/// rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub learning_rate: f64,
    #[serde(default)]
    pub regularization_rate: f64,
}

impl TrainConfig {
    pub fn new(learning_rate: f64, regularization_rate: f64) -> Self {
        TrainConfig { learning_rate, regularization_rate }
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig { learning_rate: 0.03, regularization_rate: 0.0 }
    }
}
