use crate::error::{NetworkError, Result};
use crate::loss::loss_type::LossType;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`        — total number of full passes over the training data
/// - `learning_rate` — step size of every single-example update
/// - `loss_type`     — metric reported in `EpochStats` (does not affect updates)
/// - `shuffle_seed`  — when set, sample order is shuffled every epoch with a
///                     RNG seeded from this value; otherwise samples are
///                     visited in the order given
/// - `log_every`     — emit an `info` event every this many epochs (0 = only
///                     the final epoch)
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    pub epochs: usize,
    pub learning_rate: f64,
    pub loss_type: LossType,
    pub shuffle_seed: Option<u64>,
    pub log_every: usize,
}

impl TrainConfig {
    /// Creates a config that visits samples in order and logs ten times per run.
    pub fn new(epochs: usize, learning_rate: f64) -> Self {
        TrainConfig {
            epochs,
            learning_rate,
            loss_type: LossType::default(),
            shuffle_seed: None,
            log_every: (epochs / 10).max(1),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.epochs == 0 {
            return Err(NetworkError::Configuration("epochs must be positive".into()));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(NetworkError::Configuration(format!(
                "learning rate must be a positive finite number, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_degenerate_settings() {
        assert!(TrainConfig::new(10, 0.1).validate().is_ok());
        assert!(TrainConfig::new(0, 0.1).validate().is_err());
        assert!(TrainConfig::new(10, 0.0).validate().is_err());
        assert!(TrainConfig::new(10, -0.5).validate().is_err());
        assert!(TrainConfig::new(10, f64::NAN).validate().is_err());
    }

    #[test]
    fn log_interval_is_never_zero_by_default() {
        assert_eq!(TrainConfig::new(5, 0.1).log_every, 1);
        assert_eq!(TrainConfig::new(20000, 0.1).log_every, 2000);
    }
}
