use serde::{Serialize, Deserialize};

/// Element-wise activation applied to a node's total input.
///
/// Hidden layers share one activation and the output layer may use another;
/// both are picked when the network is built and never change afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationFunction {
    Tanh,
    #[serde(rename = "relu")]
    ReLU,
    Sigmoid,
    Linear,
}

impl ActivationFunction {
    /// Activation value for a total input `x`.
    pub fn output(&self, x: f64) -> f64 {
        match self {
            // f64::tanh saturates to ±1 instead of overflowing.
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::ReLU => x.max(0.0),
            ActivationFunction::Sigmoid => sigmoid(x),
            ActivationFunction::Linear => x,
        }
    }

    /// Derivative of the activation evaluated at the total input `x`.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
            ActivationFunction::ReLU => if x <= 0.0 { 0.0 } else { 1.0 },
            ActivationFunction::Sigmoid => {
                let s = sigmoid(x);
                s * (1.0 - s)
            }
            ActivationFunction::Linear => 1.0,
        }
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn tanh_saturates_at_extremes() {
        let tanh = ActivationFunction::Tanh;
        assert_eq!(tanh.output(1e6), 1.0);
        assert_eq!(tanh.output(-1e6), -1.0);
        assert_eq!(tanh.derivative(1e6), 0.0);
        assert_abs_diff_eq!(tanh.derivative(0.0), 1.0);
    }

    #[test]
    fn relu_derivative_is_zero_at_origin() {
        let relu = ActivationFunction::ReLU;
        assert_eq!(relu.output(-2.0), 0.0);
        assert_eq!(relu.output(3.5), 3.5);
        assert_eq!(relu.derivative(0.0), 0.0);
        assert_eq!(relu.derivative(-1.0), 0.0);
        assert_eq!(relu.derivative(0.1), 1.0);
    }

    #[test]
    fn sigmoid_midpoint_and_tails() {
        let sig = ActivationFunction::Sigmoid;
        assert_abs_diff_eq!(sig.output(0.0), 0.5);
        assert_abs_diff_eq!(sig.derivative(0.0), 0.25);
        assert_abs_diff_eq!(sig.output(-1000.0), 0.0);
        assert_abs_diff_eq!(sig.output(1000.0), 1.0);
    }

    #[test]
    fn linear_is_identity() {
        let lin = ActivationFunction::Linear;
        assert_eq!(lin.output(-7.25), -7.25);
        assert_eq!(lin.derivative(123.0), 1.0);
    }

    #[test]
    fn derivatives_match_finite_differences() {
        let h = 1e-6;
        for act in [ActivationFunction::Tanh, ActivationFunction::Sigmoid, ActivationFunction::Linear] {
            for &x in &[-2.0, -0.3, 0.7, 1.9] {
                let numeric = (act.output(x + h) - act.output(x - h)) / (2.0 * h);
                assert_abs_diff_eq!(act.derivative(x), numeric, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn serde_names_are_snake_case() {
        let json = serde_json::to_string(&ActivationFunction::ReLU).unwrap();
        assert_eq!(json, "\"relu\"");
        let back: ActivationFunction = serde_json::from_str("\"sigmoid\"").unwrap();
        assert_eq!(back, ActivationFunction::Sigmoid);
    }
}
