use serde::{Serialize, Deserialize};

/// Loss reported by the training loop.
///
/// The update rule in `Network::train` is fixed; this only selects the metric
/// shown in `EpochStats`.
///
/// - `Mse`                — mean squared error of the output vector.
/// - `BinaryCrossEntropy` — the loss the delta rule actually descends for a
///   sigmoid output layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossType {
    #[default]
    Mse,
    BinaryCrossEntropy,
}

impl LossType {
    pub fn loss(&self, predicted: &[f64], expected: &[f64]) -> f64 {
        match self {
            LossType::Mse => super::MseLoss::loss(predicted, expected),
            LossType::BinaryCrossEntropy => super::BceLoss::loss(predicted, expected),
        }
    }
}
