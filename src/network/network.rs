use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::activation::ActivationFunction;
use crate::error::{NetworkError, Result};
use crate::layers::dense::Layer;
use crate::math::Matrix;
use crate::network::spec::NetworkSpec;
use crate::network::weights_file::{read_weights, write_weights};

/// Single-hidden-layer feed-forward network with a sigmoid output layer.
///
/// Owns both weight matrices and the activations of the most recent forward
/// pass. Instances are fully independent of each other.
#[derive(Debug, Clone)]
pub struct Network {
    spec: NetworkSpec,
    hidden: Layer,
    output: Layer,
}

impl Network {
    /// Builds a network with weights drawn from the thread-local RNG.
    pub fn new(spec: NetworkSpec) -> Result<Network> {
        Network::with_rng(spec, &mut rand::thread_rng())
    }

    /// Builds a network whose initial weights are fully determined by `seed`.
    pub fn with_seed(spec: NetworkSpec, seed: u64) -> Result<Network> {
        Network::with_rng(spec, &mut ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn with_rng<R: Rng + ?Sized>(spec: NetworkSpec, rng: &mut R) -> Result<Network> {
        spec.validate()?;
        let hidden = Layer::new(spec.hidden_size, spec.input_size, spec.hidden_activation, spec.weight_init, rng);
        let output = Layer::new(spec.output_size, spec.hidden_size, ActivationFunction::Sigmoid, spec.weight_init, rng);
        Ok(Network { spec, hidden, output })
    }

    /// Builds a network from explicit row-major weights.
    pub fn from_weights(spec: NetworkSpec, input_hidden: Vec<f64>, hidden_output: Vec<f64>) -> Result<Network> {
        spec.validate()?;
        let hidden_weights = checked_matrix(
            "input→hidden weights",
            spec.hidden_size,
            spec.input_size,
            input_hidden,
        )?;
        let output_weights = checked_matrix(
            "hidden→output weights",
            spec.output_size,
            spec.hidden_size,
            hidden_output,
        )?;
        Ok(Network {
            hidden: Layer::with_weights(hidden_weights, spec.hidden_activation),
            output: Layer::with_weights(output_weights, ActivationFunction::Sigmoid),
            spec,
        })
    }

    pub fn spec(&self) -> &NetworkSpec {
        &self.spec
    }

    /// Input→hidden weights, index `h * input_size + i`.
    pub fn input_hidden_weights(&self) -> &[f64] {
        &self.hidden.weights.data
    }

    /// Hidden→output weights, index `o * hidden_size + h`.
    pub fn hidden_output_weights(&self) -> &[f64] {
        &self.output.weights.data
    }

    /// Hidden activations of the most recent forward pass.
    pub fn hidden_activations(&self) -> &[f64] {
        &self.hidden.neurons
    }

    /// Output activations of the most recent forward pass.
    pub fn output_activations(&self) -> &[f64] {
        &self.output.neurons
    }

    /// True when every weight is a finite number.
    pub fn is_finite(&self) -> bool {
        self.hidden.weights.is_finite() && self.output.weights.is_finite()
    }

    /// Runs inference and returns the output activations, each in (0, 1).
    ///
    /// The hidden and output activations are cached for a following `train`.
    pub fn forward(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        NetworkError::check_len("input", self.spec.input_size, input.len())?;
        Ok(self.propagate(input).to_vec())
    }

    /// One stochastic gradient step on a single labeled example.
    ///
    /// Output errors are `expected - actual`; hidden errors are those errors
    /// pulled back through the hidden→output weights (before they are
    /// updated) and scaled by the hidden activation's derivative. Both weight
    /// matrices then move by `learning_rate * error * incoming activation`.
    pub fn train(&mut self, input: &[f64], expected: &[f64], learning_rate: f64) -> Result<()> {
        NetworkError::check_len("input", self.spec.input_size, input.len())?;
        NetworkError::check_len("expected output", self.spec.output_size, expected.len())?;

        self.propagate(input);

        let output_error: Vec<f64> = expected.iter().zip(&self.output.neurons)
            .map(|(want, got)| want - got)
            .collect();
        let hidden_error = self.hidden.local_gradient(&self.output.back_propagate(&output_error));

        self.output.apply_delta(&output_error, &self.hidden.neurons, learning_rate);
        self.hidden.apply_delta(&hidden_error, input, learning_rate);
        Ok(())
    }

    /// Writes all weights to `path` in the plain-text weight format.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| NetworkError::io(path, e))?;
        write_weights(file, &[self.input_hidden_weights(), self.hidden_output_weights()])
            .map_err(|e| NetworkError::io(path, e))?;
        debug!(path = %path.display(), weights = self.spec.weight_count(), "saved weights");
        Ok(())
    }

    /// Replaces all weights with the contents of `path`.
    ///
    /// The file must hold exactly as many finite numbers as this topology has
    /// weights. On any error the current weights are left unchanged.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| NetworkError::io(path, e))?;
        let weights = read_weights(BufReader::new(file), self.spec.weight_count()).map_err(|e| match e {
            NetworkError::Format(msg) => NetworkError::Format(format!("{}: {msg}", path.display())),
            other => other,
        })?;

        let (input_hidden, hidden_output) = weights.split_at(self.spec.input_hidden_len());
        self.hidden.weights.data.copy_from_slice(input_hidden);
        self.output.weights.data.copy_from_slice(hidden_output);
        debug!(path = %path.display(), weights = weights.len(), "loaded weights");
        Ok(())
    }

    fn propagate(&mut self, input: &[f64]) -> &[f64] {
        let hidden = self.hidden.feed_from(input);
        self.output.feed_from(hidden)
    }
}

fn checked_matrix(what: &'static str, rows: usize, cols: usize, data: Vec<f64>) -> Result<Matrix> {
    NetworkError::check_len(what, rows * cols, data.len())?;
    if let Some(idx) = data.iter().position(|w| !w.is_finite()) {
        return Err(NetworkError::Format(format!("{what}: weight {idx} is not finite")));
    }
    Ok(Matrix { rows, cols, data })
}
