/// Half sum-of-squares error, the default output error of the engine.
pub struct SumSquaresLoss;

impl SumSquaresLoss {
    /// Scalar error: ½·Σ(output - target)²
    pub fn loss(outputs: &[f64], targets: &[f64]) -> f64 {
        0.5 * outputs.iter().zip(targets.iter())
            .map(|(o, t)| (o - t).powi(2))
            .sum::<f64>()
    }

    /// Per-output gradient: output - target
    pub fn derivative(output: f64, target: f64) -> f64 {
        output - target
    }
}
