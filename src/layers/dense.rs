use rand::Rng;

use crate::activation::ActivationFunction;
use crate::math::{Matrix, WeightInit};

/// One fully connected layer without biases.
///
/// `weights` has one row per neuron of this layer and one column per neuron
/// feeding into it. `neurons` caches the activations of the most recent
/// `feed_from` call for use by backprop.
#[derive(Debug, Clone)]
pub struct Layer {
    pub neurons: Vec<f64>,
    pub weights: Matrix,
    pub activator: ActivationFunction,
}

impl Layer {
    pub fn new<R: Rng + ?Sized>(
        size: usize,
        input_size: usize,
        activation: ActivationFunction,
        init: WeightInit,
        rng: &mut R,
    ) -> Layer {
        Layer::with_weights(Matrix::random(size, input_size, init, rng), activation)
    }

    pub fn with_weights(weights: Matrix, activation: ActivationFunction) -> Layer {
        Layer {
            neurons: vec![0.0; weights.rows],
            weights,
            activator: activation,
        }
    }

    /// Computes `activation(W · input)` and overwrites the cached neurons.
    /// The caller is responsible for checking `input.len()`.
    pub fn feed_from(&mut self, input: &[f64]) -> &[f64] {
        let z = self.weights.mul_vec(input);
        for (neuron, sum) in self.neurons.iter_mut().zip(z) {
            *neuron = self.activator.function(sum);
        }
        &self.neurons
    }

    /// Error signal for the layer below: `Wᵀ · delta`, i.e. each input unit
    /// receives the weighted sum of this layer's errors.
    pub fn back_propagate(&self, delta: &[f64]) -> Vec<f64> {
        self.weights.transpose_mul_vec(delta)
    }

    /// Scales a back-propagated error by the derivative of this layer's
    /// activation at the cached neuron values.
    pub fn local_gradient(&self, upstream: &[f64]) -> Vec<f64> {
        upstream.iter().zip(&self.neurons)
            .map(|(e, a)| e * self.activator.derivative(*a))
            .collect()
    }

    /// Delta-rule update `W[j][k] += lr * delta[j] * inputs[k]`.
    pub fn apply_delta(&mut self, delta: &[f64], inputs: &[f64], lr: f64) {
        self.weights.add_outer(lr, delta, inputs);
    }
}
