use crate::error::Result;
use crate::network::network::Network;

/// Plain stochastic gradient descent: a fixed learning rate, one example per
/// step, no momentum and no weight decay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies one weight update for a single labeled example.
    pub fn step(&self, network: &mut Network, input: &[f64], expected: &[f64]) -> Result<()> {
        network.train(input, expected, self.learning_rate)
    }
}
