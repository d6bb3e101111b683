use std::time::Instant;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::error::{NetworkError, Result};
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::{check_dataset, train_epoch};

/// Trains `network` for `config.epochs` epochs and returns the statistics of
/// the **last completed epoch**.
///
/// # Arguments
/// - `network`      — mutable reference to the network; modified in place
/// - `train_inputs` — training samples, each a `Vec<f64>` of length `input_size`
/// - `train_labels` — corresponding targets, same length as `train_inputs`
/// - `config`       — epochs, learning rate, reported loss, ordering, logging
///
/// # Errors
/// - `Configuration` for zero epochs, a bad learning rate or no samples
/// - `DimensionMismatch` for a sample or label of the wrong length; every
///   sample is checked before the first epoch, so the weights are untouched
/// - `Diverged` as soon as an epoch leaves a non-finite weight behind
pub fn train_loop(
    network: &mut Network,
    train_inputs: &[Vec<f64>],
    train_labels: &[Vec<f64>],
    config: &TrainConfig,
) -> Result<EpochStats> {
    config.validate()?;
    check_dataset(network, train_inputs, train_labels)?;

    let optimizer = Sgd::new(config.learning_rate);
    let mut order: Vec<usize> = (0..train_inputs.len()).collect();
    let mut rng = config.shuffle_seed.map(ChaCha8Rng::seed_from_u64);

    info!(
        samples = train_inputs.len(),
        epochs = config.epochs,
        learning_rate = config.learning_rate,
        shuffle = rng.is_some(),
        "training started"
    );

    let mut last = None;
    for epoch in 1..=config.epochs {
        let t_start = Instant::now();

        if let Some(rng) = rng.as_mut() {
            order.shuffle(rng);
        }

        let train_loss = train_epoch(
            network,
            train_inputs,
            train_labels,
            &order,
            &optimizer,
            config.loss_type,
        )?;

        if !network.is_finite() {
            warn!(epoch, "non-finite weights, stopping");
            return Err(NetworkError::Diverged { epoch });
        }

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };

        let milestone = config.log_every > 0 && epoch % config.log_every == 0;
        if milestone || epoch == config.epochs {
            info!(epoch, loss = stats.train_loss, "epoch finished");
        } else {
            debug!(epoch, loss = stats.train_loss, "epoch finished");
        }

        last = Some(stats);
    }

    // epochs >= 1 is enforced by validate()
    last.ok_or_else(|| NetworkError::Configuration("epochs must be positive".into()))
}
