pub struct MseLoss;

impl MseLoss {
    /// Scalar MSE: mean((output - target)²)
    pub fn loss(outputs: &[f64], targets: &[f64]) -> f64 {
        let n = outputs.len() as f64;
        if n == 0.0 {
            return 0.0;
        }
        outputs.iter().zip(targets.iter())
            .map(|(o, t)| (o - t).powi(2))
            .sum::<f64>() / n
    }

    /// Per-output gradient: (2 / n)·(output - target), where `n` is the
    /// output-layer width.
    pub fn derivative(output: f64, target: f64, n: usize) -> f64 {
        2.0 / n as f64 * (output - target)
    }
}
