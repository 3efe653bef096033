use serde::{Serialize, Deserialize};

use crate::loss::mse::MseLoss;
use crate::loss::sum_squares::SumSquaresLoss;

/// Selects which output error drives back-propagation.
///
/// - `SumSquares` — ½·Σ(o - t)²; derivative `o - t`. The default.
/// - `Mse`        — (1/N)·Σ(o - t)²; derivative `(2/N)·(o - t)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossType {
    #[default]
    SumSquares,
    Mse,
}

impl LossType {
    /// Aggregate error over a whole output vector. Informational only.
    pub fn error(&self, outputs: &[f64], targets: &[f64]) -> f64 {
        match self {
            LossType::SumSquares => SumSquaresLoss::loss(outputs, targets),
            LossType::Mse => MseLoss::loss(outputs, targets),
        }
    }

    /// ∂Error/∂output for one output node; `n` is the output-layer width.
    pub fn derivative(&self, output: f64, target: f64, n: usize) -> f64 {
        match self {
            LossType::SumSquares => SumSquaresLoss::derivative(output, target),
            LossType::Mse => MseLoss::derivative(output, target, n),
        }
    }
}
