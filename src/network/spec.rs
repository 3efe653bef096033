use std::collections::HashSet;

use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::loss::loss_type::LossType;
use crate::network::error::NetworkError;
use crate::regularization::regularization::Regularization;

/// Everything needed to build a `Network`.
///
/// Changing any field means rebuilding the network from scratch; there is no
/// incremental patching of an existing graph.
///
/// Fields:
/// - `shape`             — node count per layer, input first, output last
/// - `randomize`         — seed weights in [-0.5, 0.5) and biases at 0.1;
///                         otherwise everything starts at 0
/// - `activation`        — used by every hidden layer
/// - `output_activation` — used by the last layer
/// - `regularization`    — shared by every link, or `None`
/// - `loss`              — output error used by `back_prop`
/// - `input_ids`         — optional ids for the input nodes (e.g. feature names)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub shape: Vec<usize>,
    #[serde(default = "default_randomize")]
    pub randomize: bool,
    #[serde(default = "default_activation")]
    pub activation: ActivationFunction,
    #[serde(default = "default_activation")]
    pub output_activation: ActivationFunction,
    #[serde(default)]
    pub regularization: Option<Regularization>,
    #[serde(default)]
    pub loss: LossType,
    #[serde(default)]
    pub input_ids: Option<Vec<String>>,
}

/// Upper bound on links in one network. Far beyond the small topologies the
/// engine is meant for, low enough that building never exhausts memory.
pub const MAX_LINKS: usize = 1 << 20;

fn default_randomize() -> bool {
    true
}

fn default_activation() -> ActivationFunction {
    ActivationFunction::Tanh
}

impl NetworkSpec {
    pub fn new(shape: Vec<usize>) -> NetworkSpec {
        NetworkSpec {
            shape,
            randomize: default_randomize(),
            activation: default_activation(),
            output_activation: default_activation(),
            regularization: None,
            loss: LossType::default(),
            input_ids: None,
        }
    }

    pub fn with_randomize(mut self, randomize: bool) -> NetworkSpec {
        self.randomize = randomize;
        self
    }

    pub fn with_activation(mut self, activation: ActivationFunction) -> NetworkSpec {
        self.activation = activation;
        self
    }

    pub fn with_output_activation(mut self, activation: ActivationFunction) -> NetworkSpec {
        self.output_activation = activation;
        self
    }

    pub fn with_regularization(mut self, regularization: Option<Regularization>) -> NetworkSpec {
        self.regularization = regularization;
        self
    }

    pub fn with_loss(mut self, loss: LossType) -> NetworkSpec {
        self.loss = loss;
        self
    }

    pub fn with_input_ids<S: Into<String>>(mut self, ids: impl IntoIterator<Item = S>) -> NetworkSpec {
        self.input_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    /// Checks the shape and input ids without building anything.
    pub fn validate(&self) -> Result<(), NetworkError> {
        if self.shape.len() < 2 {
            return Err(NetworkError::Configuration(format!(
                "shape needs at least 2 layers, got {}",
                self.shape.len()
            )));
        }
        if let Some(layer) = self.shape.iter().position(|&size| size == 0) {
            return Err(NetworkError::Configuration(format!("layer {layer} has no nodes")));
        }
        self.graph_size()?;
        if let Some(ids) = &self.input_ids {
            if ids.len() != self.shape[0] {
                return Err(NetworkError::Configuration(format!(
                    "{} input ids given for an input layer of {} nodes",
                    ids.len(),
                    self.shape[0]
                )));
            }
            let mut seen = HashSet::new();
            if let Some(dup) = ids.iter().find(|id| !seen.insert(id.as_str())) {
                return Err(NetworkError::Configuration(format!("duplicate input id {dup:?}")));
            }
        }
        Ok(())
    }

    /// Node and link counts of the network this spec builds.
    ///
    /// Fails if either count overflows or exceeds `MAX_LINKS`.
    pub fn graph_size(&self) -> Result<(usize, usize), NetworkError> {
        let too_large = || NetworkError::Configuration(format!("shape {:?} is too large", self.shape));
        let nodes = self.shape.iter()
            .try_fold(0usize, |acc, &size| acc.checked_add(size))
            .ok_or_else(too_large)?;
        let links = self.shape.windows(2)
            .try_fold(0usize, |acc, w| w[0].checked_mul(w[1]).and_then(|n| acc.checked_add(n)))
            .ok_or_else(too_large)?;
        if links > MAX_LINKS || nodes > MAX_LINKS {
            return Err(too_large());
        }
        Ok((nodes, links))
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> std::io::Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
