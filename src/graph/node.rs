use serde::Serialize;

use crate::activation::activation::ActivationFunction;
use crate::graph::link::LinkId;

/// Handle of a node in `Network`'s node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One computational unit.
///
/// `inputs` and `outputs` hold handles into the network's link arena; the
/// links themselves are owned by the network.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    /// `"<layer>-<index>"` unless the input layer was given explicit ids.
    pub id: String,
    pub inputs: Vec<LinkId>,
    pub outputs: Vec<LinkId>,
    pub bias: f64,
    /// Weighted sum of inputs plus bias, from the last forward pass.
    pub total_input: f64,
    pub output: f64,
    /// ∂Error/∂output
    pub output_der: f64,
    /// ∂Error/∂total_input
    pub input_der: f64,
    /// Sum of `input_der` since the last weight update.
    pub acc_input_der: f64,
    pub num_accumulated_ders: usize,
    pub activation: ActivationFunction,
}

impl Node {
    pub(crate) fn new(id: String, activation: ActivationFunction, bias: f64) -> Node {
        Node {
            id,
            inputs: Vec::new(),
            outputs: Vec::new(),
            bias,
            total_input: 0.0,
            output: 0.0,
            output_der: 0.0,
            input_der: 0.0,
            acc_input_der: 0.0,
            num_accumulated_ders: 0,
            activation,
        }
    }

    /// True between a `back_prop` and the `update_weights` that consumes it.
    pub fn is_accumulating(&self) -> bool {
        self.num_accumulated_ders > 0
    }

    pub(crate) fn accumulate(&mut self) {
        self.acc_input_der += self.input_der;
        self.num_accumulated_ders += 1;
    }

    pub(crate) fn reset_accumulator(&mut self) {
        self.acc_input_der = 0.0;
        self.num_accumulated_ders = 0;
    }
}
