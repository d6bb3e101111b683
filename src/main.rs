//! xshape CLI
//!
//! Trains the X detector from a JSON training plan and scores new bitmaps.
//!
//! ```text
//! xshape train  --plan demos/plan.json --weights weights.txt
//! xshape detect --weights weights.txt demos/detection.txt
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use xshape_nn::{resolve_spec, spec_path, train_loop, BitmapLoader, Network, TrainingPlan};

#[derive(Parser)]
#[command(name = "xshape")]
#[command(about = "Teach a small neural network to recognize an X in a bitmap")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train on the plan's labeled bitmaps and save the weights
    Train {
        /// Training plan (JSON)
        #[arg(short, long)]
        plan: PathBuf,

        /// Where to write the trained weights
        #[arg(short, long, default_value = "weights.txt")]
        weights: PathBuf,

        /// Override the plan's epoch count
        #[arg(short, long)]
        epochs: Option<usize>,

        /// Override the plan's learning rate
        #[arg(short, long)]
        learning_rate: Option<f64>,

        /// Seed for the initial weights (overrides the plan)
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Score a bitmap with previously trained weights
    Detect {
        /// Bitmap to classify (text bitmap or image)
        bitmap: PathBuf,

        /// Trained weights
        #[arg(short, long, default_value = "weights.txt")]
        weights: PathBuf,

        /// Training plan to take the topology from when no spec file sits
        /// next to the weights
        #[arg(short, long)]
        plan: Option<PathBuf>,

        /// Scores at or above this value are reported as an X
        #[arg(short, long, default_value = "0.5")]
        threshold: f64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train { plan, weights, epochs, learning_rate, seed } => {
            let mut plan = TrainingPlan::load_json(&plan)
                .with_context(|| format!("reading plan {}", plan.display()))?;
            if let Some(epochs) = epochs {
                plan.epochs = epochs;
            }
            if let Some(lr) = learning_rate {
                plan.learning_rate = lr;
            }
            if seed.is_some() {
                plan.seed = seed;
            }
            plan.validate()?;
            train(&plan, &weights)
        }
        Commands::Detect { bitmap, weights, plan, threshold } => detect(&bitmap, &weights, plan.as_deref(), threshold),
    }
}

fn train(plan: &TrainingPlan, weights: &Path) -> Result<()> {
    let (inputs, labels) = plan.load_samples().context("loading training bitmaps")?;

    let mut network = match plan.seed {
        Some(seed) => Network::with_seed(plan.network.clone(), seed)?,
        None => Network::new(plan.network.clone())?,
    };

    let stats = train_loop(&mut network, &inputs, &labels, &plan.train_config())?;
    info!(epochs = stats.epoch, loss = stats.train_loss, "training finished");

    network
        .save(weights)
        .with_context(|| format!("saving weights to {}", weights.display()))?;
    plan.network.save_json(spec_path(weights))?;

    println!("Network trained; weights saved to {}.", weights.display());
    Ok(())
}

fn detect(bitmap: &Path, weights: &Path, plan: Option<&Path>, threshold: f64) -> Result<()> {
    let spec = resolve_spec(weights, plan).context("finding the network topology")?;
    let mut network = Network::new(spec.clone())?;
    network
        .load(weights)
        .with_context(|| format!("loading weights from {}", weights.display()))?;
    info!(path = %weights.display(), "weights loaded");

    let input = BitmapLoader::for_input_size(spec.input_size)
        .load(bitmap)
        .with_context(|| format!("reading bitmap {}", bitmap.display()))?;
    let output = network.forward(&input)?;

    let score = output[0];
    println!("score: {score:.6}");
    if score >= threshold {
        println!("verdict: X");
    } else {
        println!("verdict: not X");
    }
    Ok(())
}
