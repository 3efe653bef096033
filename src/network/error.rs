use std::fmt;

/// Which end of the network a vector was checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerRole {
    Input,
    Output,
}

impl fmt::Display for LayerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerRole::Input => f.write_str("input"),
            LayerRole::Output => f.write_str("output"),
        }
    }
}

/// Errors produced by the network engine.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// Invalid construction parameters. The build is abandoned.
    Configuration(String),
    /// A forward input or back-prop target vector has the wrong length.
    /// Raised before any node is touched.
    DimensionMismatch {
        layer: LayerRole,
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(msg) => write!(f, "invalid network configuration: {msg}"),
            Self::DimensionMismatch { layer, expected, actual } => write!(
                f,
                "dimension mismatch: {layer} layer has {expected} nodes, got {actual} values"
            ),
        }
    }
}

impl std::error::Error for NetworkError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let e = NetworkError::DimensionMismatch { layer: LayerRole::Output, expected: 1, actual: 3 };
        assert_eq!(e.to_string(), "dimension mismatch: output layer has 1 nodes, got 3 values");
        let e = NetworkError::Configuration("shape needs at least 2 layers".into());
        assert!(e.to_string().contains("at least 2 layers"));
    }
}
