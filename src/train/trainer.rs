use log::debug;

use crate::network::error::{LayerRole, NetworkError};
use crate::network::network::Network;
use crate::train::train_config::TrainConfig;

/// One forward → back → update cycle on a single example.
///
/// Returns the error of the prediction made before the update.
pub fn train_step(
    network: &mut Network,
    input: &[f64],
    target: &[f64],
    config: &TrainConfig,
) -> Result<f64, NetworkError> {
    check_width(LayerRole::Output, network.output_size(), target.len())?;
    network.forward_prop(input)?;
    let error = network.error(target)?;
    network.back_prop(target)?;
    network.update_weights(config.learning_rate, config.regularization_rate);
    Ok(error)
}

/// Accumulates derivatives over every example in the batch, then applies a
/// single averaged weight update.
///
/// Every example is checked before the first forward pass, so a malformed
/// batch leaves the network untouched. Returns the mean pre-update error.
pub fn train_batch(
    network: &mut Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    config: &TrainConfig,
) -> Result<f64, NetworkError> {
    if inputs.is_empty() {
        return Err(NetworkError::Configuration("batch is empty".to_owned()));
    }
    if inputs.len() != targets.len() {
        return Err(NetworkError::Configuration(format!(
            "{} inputs but {} targets",
            inputs.len(),
            targets.len()
        )));
    }
    check_examples(network, inputs, targets)?;

    let mut total_error = 0.0;
    for (input, target) in inputs.iter().zip(targets) {
        network.forward_prop(input)?;
        total_error += network.error(target)?;
        network.back_prop(target)?;
    }
    network.update_weights(config.learning_rate, config.regularization_rate);

    let mean = total_error / inputs.len() as f64;
    debug!("trained batch of {}: mean error {mean:.6}", inputs.len());
    Ok(mean)
}

/// Mean error over a dataset using forward passes only.
///
/// Like `train_batch`, rejects a malformed dataset before any forward pass.
pub fn eval_loss(
    network: &mut Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
) -> Result<f64, NetworkError> {
    if inputs.len() != targets.len() {
        return Err(NetworkError::Configuration(format!(
            "{} inputs but {} targets",
            inputs.len(),
            targets.len()
        )));
    }
    if inputs.is_empty() {
        return Ok(0.0);
    }
    check_examples(network, inputs, targets)?;
    let mut total = 0.0;
    for (input, target) in inputs.iter().zip(targets) {
        network.forward_prop(input)?;
        total += network.error(target)?;
    }
    Ok(total / inputs.len() as f64)
}

fn check_examples(network: &Network, inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<(), NetworkError> {
    for (input, target) in inputs.iter().zip(targets) {
        check_width(LayerRole::Input, network.input_size(), input.len())?;
        check_width(LayerRole::Output, network.output_size(), target.len())?;
    }
    Ok(())
}

fn check_width(layer: LayerRole, expected: usize, actual: usize) -> Result<(), NetworkError> {
    if expected == actual {
        Ok(())
    } else {
        Err(NetworkError::DimensionMismatch { layer, expected, actual })
    }
}
