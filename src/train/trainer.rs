use crate::{
    error::{NetworkError, Result},
    loss::loss_type::LossType,
    network::network::Network,
    optim::sgd::Sgd,
};

/// Runs one epoch over `inputs` in order, one update per sample, and returns
/// the mean MSE of the outputs seen before each update.
pub fn train_network(
    network: &mut Network,
    inputs: &[Vec<f64>],
    expected_outputs: &[Vec<f64>],
    optimizer: &Sgd,
) -> Result<f64> {
    check_dataset(network, inputs, expected_outputs)?;
    let order: Vec<usize> = (0..inputs.len()).collect();
    train_epoch(network, inputs, expected_outputs, &order, optimizer, LossType::Mse)
}

/// Rejects a dataset the network cannot train on before any weight moves:
/// mismatched sample/label counts, no samples, or any sample or label whose
/// width differs from the network's input or output size.
pub(crate) fn check_dataset(network: &Network, inputs: &[Vec<f64>], expected_outputs: &[Vec<f64>]) -> Result<()> {
    NetworkError::check_len("training labels", inputs.len(), expected_outputs.len())?;
    if inputs.is_empty() {
        return Err(NetworkError::Configuration("no training samples".into()));
    }
    let spec = network.spec();
    for input in inputs {
        NetworkError::check_len("input", spec.input_size, input.len())?;
    }
    for expected in expected_outputs {
        NetworkError::check_len("expected output", spec.output_size, expected.len())?;
    }
    Ok(())
}

/// One pass over the samples listed in `order`. The dataset must already
/// have passed `check_dataset`.
pub(crate) fn train_epoch(
    network: &mut Network,
    inputs: &[Vec<f64>],
    expected_outputs: &[Vec<f64>],
    order: &[usize],
    optimizer: &Sgd,
    loss_type: LossType,
) -> Result<f64> {
    let mut total_loss = 0.0;
    for &idx in order {
        let expected = &expected_outputs[idx];
        optimizer.step(network, &inputs[idx], expected)?;
        // The cached outputs still hold the forward pass that drove this update.
        total_loss += loss_type.loss(network.output_activations(), expected);
    }

    Ok(total_loss / order.len() as f64)
}
