use log::{debug, info, trace, warn};
use rand::Rng;
use serde::Serialize;

use crate::graph::link::{Link, LinkId};
use crate::graph::node::{Node, NodeId};
use crate::loss::loss_type::LossType;
use crate::network::error::{LayerRole, NetworkError};
use crate::network::spec::NetworkSpec;

/// A layered, fully connected feed-forward graph.
///
/// Nodes and links live in two arenas and refer to each other through
/// `NodeId` / `LinkId` handles. `layers` lists node handles per layer in
/// insertion order, which is also forward traversal order.
///
/// A training cycle is `forward_prop` → `back_prop` → `update_weights`.
/// Calling `forward_prop`/`back_prop` several times before one
/// `update_weights` averages the gradients over that mini-batch.
///
/// Extreme learning rates can drive weights to non-finite values; the engine
/// lets them propagate and only logs a warning.
#[derive(Debug, Clone, Serialize)]
pub struct Network {
    nodes: Vec<Node>,
    links: Vec<Link>,
    layers: Vec<Vec<NodeId>>,
    loss: LossType,
}

impl Network {
    /// Builds a network, seeding random weights from the thread RNG.
    pub fn build(spec: &NetworkSpec) -> Result<Network, NetworkError> {
        Network::build_with_rng(spec, &mut rand::thread_rng())
    }

    /// Builds a network, seeding random weights from `rng`.
    ///
    /// Links are appended to each destination's `inputs` in source order and
    /// to each source's `outputs` in destination order.
    pub fn build_with_rng<R: Rng + ?Sized>(spec: &NetworkSpec, rng: &mut R) -> Result<Network, NetworkError> {
        spec.validate()?;

        let (node_count, link_count) = spec.graph_size()?;
        let mut nodes = Vec::with_capacity(node_count);
        let mut links = Vec::with_capacity(link_count);
        let mut layers: Vec<Vec<NodeId>> = Vec::with_capacity(spec.shape.len());
        let last = spec.shape.len() - 1;

        for (layer_idx, &size) in spec.shape.iter().enumerate() {
            let activation = if layer_idx == last { spec.output_activation } else { spec.activation };
            let mut layer = Vec::with_capacity(size);

            for i in 0..size {
                let id = match (&spec.input_ids, layer_idx) {
                    (Some(ids), 0) => ids[i].clone(),
                    _ => format!("{layer_idx}-{i}"),
                };
                let bias = if spec.randomize { 0.1 } else { 0.0 };
                let node_id = NodeId(nodes.len());
                nodes.push(Node::new(id, activation, bias));

                if layer_idx > 0 {
                    for &source in &layers[layer_idx - 1] {
                        let weight = if spec.randomize { rng.gen::<f64>() - 0.5 } else { 0.0 };
                        let link_id = LinkId(links.len());
                        let id = format!("{}->{}", nodes[source.0].id, nodes[node_id.0].id);
                        links.push(Link::new(id, source, node_id, weight, spec.regularization));
                        nodes[source.0].outputs.push(link_id);
                        nodes[node_id.0].inputs.push(link_id);
                    }
                }
                layer.push(node_id);
            }
            layers.push(layer);
        }

        debug!(
            "built network {:?}: {} nodes, {} links, regularization {:?}",
            spec.shape,
            nodes.len(),
            links.len(),
            spec.regularization
        );
        Ok(Network { nodes, links, layers, loss: spec.loss })
    }

    // -----------------------------------------------------------------------
    // Training cycle
    // -----------------------------------------------------------------------

    /// Runs a forward pass and returns the output layer's values.
    ///
    /// Input nodes take `inputs` directly as their output, bypassing their
    /// activation. Fails without touching any node if the length is wrong.
    pub fn forward_prop(&mut self, inputs: &[f64]) -> Result<Vec<f64>, NetworkError> {
        let expected = self.input_size();
        if inputs.len() != expected {
            return Err(NetworkError::DimensionMismatch {
                layer: LayerRole::Input,
                expected,
                actual: inputs.len(),
            });
        }
        trace!("forward_prop {:?}", inputs);

        for (&id, &value) in self.layers[0].iter().zip(inputs) {
            self.nodes[id.0].output = value;
        }
        for layer in &self.layers[1..] {
            for &id in layer {
                let node = &self.nodes[id.0];
                let weighted: f64 = node.inputs.iter()
                    .map(|&l| {
                        let link = &self.links[l.0];
                        link.weight * self.nodes[link.source.0].output
                    })
                    .sum();
                let total_input = node.bias + weighted;
                let output = node.activation.output(total_input);

                let node = &mut self.nodes[id.0];
                node.total_input = total_input;
                node.output = output;
            }
        }
        Ok(self.outputs())
    }

    /// Back-propagates the error against `targets` and accumulates the
    /// derivatives consumed by `update_weights`.
    ///
    /// Uses the `total_input`/`output` left by the last `forward_prop`.
    /// Dead links neither receive nor propagate gradient.
    pub fn back_prop(&mut self, targets: &[f64]) -> Result<(), NetworkError> {
        let expected = self.output_size();
        if targets.len() != expected {
            return Err(NetworkError::DimensionMismatch {
                layer: LayerRole::Output,
                expected,
                actual: targets.len(),
            });
        }
        trace!("back_prop {:?}", targets);

        let n = expected;
        let last = self.layers.len() - 1;
        for (&id, &target) in self.layers[last].iter().zip(targets) {
            let node = &mut self.nodes[id.0];
            node.output_der = self.loss.derivative(node.output, target, n);
        }

        for layer_idx in (1..self.layers.len()).rev() {
            let layer = &self.layers[layer_idx];

            for &id in layer {
                let node = &mut self.nodes[id.0];
                node.input_der = node.output_der * node.activation.derivative(node.total_input);
                node.accumulate();
            }

            for &id in layer {
                let node = &self.nodes[id.0];
                for &l in &node.inputs {
                    let link = &mut self.links[l.0];
                    if link.is_dead {
                        continue;
                    }
                    link.error_der = node.input_der * self.nodes[link.source.0].output;
                    link.accumulate();
                }
            }

            // The input layer has no output_der to feed.
            if layer_idx == 1 {
                continue;
            }
            for &id in &self.layers[layer_idx - 1] {
                let output_der: f64 = self.nodes[id.0].outputs.iter()
                    .map(|&l| &self.links[l.0])
                    .filter(|link| !link.is_dead)
                    .map(|link| link.weight * self.nodes[link.dest.0].input_der)
                    .sum();
                self.nodes[id.0].output_der = output_der;
            }
        }
        Ok(())
    }

    /// Applies the accumulated, averaged derivatives to every bias and live
    /// weight, then resets all accumulators.
    ///
    /// Nodes and links with nothing accumulated are left alone. Under L1 a
    /// weight whose sign flips during the regularization step is set to 0 and
    /// its link is marked dead for good.
    pub fn update_weights(&mut self, learning_rate: f64, regularization_rate: f64) {
        trace!("update_weights lr={learning_rate} reg_rate={regularization_rate}");
        for layer in &self.layers[1..] {
            for &id in layer {
                let node = &mut self.nodes[id.0];
                if node.is_accumulating() {
                    node.bias -= learning_rate * node.acc_input_der / node.num_accumulated_ders as f64;
                    node.reset_accumulator();
                    if !node.bias.is_finite() {
                        warn!("bias of node {} became {}", node.id, node.bias);
                    }
                }

                for &l in &node.inputs {
                    let link = &mut self.links[l.0];
                    if link.apply_update(learning_rate, regularization_rate) {
                        info!("link {} pruned by L1 regularization", link.id);
                    }
                    if !link.weight.is_finite() {
                        warn!("weight of link {} became {}", link.id, link.weight);
                    }
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Read surface
    // -----------------------------------------------------------------------

    /// Aggregate error of the current outputs against `targets`.
    pub fn error(&self, targets: &[f64]) -> Result<f64, NetworkError> {
        let expected = self.output_size();
        if targets.len() != expected {
            return Err(NetworkError::DimensionMismatch {
                layer: LayerRole::Output,
                expected,
                actual: targets.len(),
            });
        }
        Ok(self.loss.error(&self.outputs(), targets))
    }

    /// Visits every node in layer-then-index order.
    pub fn for_each_node<F>(&self, skip_input_layer: bool, mut visit: F)
    where
        F: FnMut(&Node),
    {
        let start = if skip_input_layer { 1 } else { 0 };
        for layer in &self.layers[start..] {
            for &id in layer {
                visit(&self.nodes[id.0]);
            }
        }
    }

    /// Mutable form of `for_each_node`. Editing derivative or accumulator
    /// fields between `back_prop` and `update_weights` corrupts the update.
    pub fn for_each_node_mut<F>(&mut self, skip_input_layer: bool, mut visit: F)
    where
        F: FnMut(&mut Node),
    {
        let start = if skip_input_layer { 1 } else { 0 };
        for layer in &self.layers[start..] {
            for &id in layer {
                visit(&mut self.nodes[id.0]);
            }
        }
    }

    pub fn layers(&self) -> &[Vec<NodeId>] {
        &self.layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn input_size(&self) -> usize {
        self.layers[0].len()
    }

    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1].len()
    }

    pub fn loss_type(&self) -> LossType {
        self.loss
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn link(&self, id: LinkId) -> &Link {
        &self.links[id.0]
    }

    pub fn link_mut(&mut self, id: LinkId) -> &mut Link {
        &mut self.links[id.0]
    }

    /// All links, grouped by destination node in forward order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn find_node(&self, id: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.id == id).map(NodeId)
    }

    pub fn output_nodes(&self) -> impl Iterator<Item = &Node> {
        self.layers[self.layers.len() - 1].iter().map(move |&id| &self.nodes[id.0])
    }

    /// Output-layer values from the last forward pass.
    pub fn outputs(&self) -> Vec<f64> {
        self.output_nodes().map(|n| n.output).collect()
    }
}
