use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};
use tracing::{info, warn};

use crate::activation::ActivationFunction;
use crate::bitmap::BitmapLoader;
use crate::error::{NetworkError, Result};
use crate::network::spec::NetworkSpec;
use crate::train::train_config::TrainConfig;

/// One labeled bitmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Bitmap file, relative to the plan file's directory unless absolute.
    pub bitmap: PathBuf,
    /// Expected score: `1.0` for the target shape, `0.0` otherwise.
    pub label: f64,
}

/// Everything the `xshape` binary needs to train and run a detector.
///
/// Stored as JSON:
///
/// ```json
/// {
///   "network": { "input_size": 100, "hidden_size": 30, "output_size": 1,
///                "hidden_activation": "ReLU" },
///   "samples": [ { "bitmap": "training1.txt", "label": 1.0 } ],
///   "epochs": 20000,
///   "learning_rate": 0.01
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingPlan {
    pub network: NetworkSpec,
    pub samples: Vec<Sample>,
    pub epochs: usize,
    pub learning_rate: f64,
    /// Seed for weight initialization; random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Directory sample paths are resolved against. Set by `load_json`.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl TrainingPlan {
    /// The classic setup: 10×10 bitmaps, 30 ReLU hidden units, one output,
    /// an X in `training1.txt` and two other shapes, 20000 epochs at 0.01.
    pub fn reference() -> TrainingPlan {
        TrainingPlan {
            network: NetworkSpec::new(100, 30, 1).with_activation(ActivationFunction::ReLU),
            samples: vec![
                Sample { bitmap: "training1.txt".into(), label: 1.0 },
                Sample { bitmap: "training2.txt".into(), label: 0.0 },
                Sample { bitmap: "training3.txt".into(), label: 0.0 },
            ],
            epochs: 20_000,
            learning_rate: 0.01,
            seed: None,
            base_dir: PathBuf::new(),
        }
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<TrainingPlan> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| NetworkError::io(path, e))?;
        let reader = std::io::BufReader::new(file);
        let mut plan: TrainingPlan = serde_json::from_reader(reader)
            .map_err(|e| NetworkError::Format(format!("{}: {e}", path.display())))?;
        plan.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        plan.validate()?;
        info!(path = %path.display(), samples = plan.samples.len(), "loaded training plan");
        Ok(plan)
    }

    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|e| NetworkError::io(path, e))?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| NetworkError::Format(format!("{}: {e}", path.display())))
    }

    pub fn validate(&self) -> Result<()> {
        self.network.validate()?;
        self.train_config().validate()?;
        if self.samples.is_empty() {
            return Err(NetworkError::Configuration("training plan has no samples".into()));
        }
        if self.network.output_size != 1 {
            return Err(NetworkError::Configuration(format!(
                "samples carry a single label but output_size is {}",
                self.network.output_size
            )));
        }
        Ok(())
    }

    pub fn train_config(&self) -> TrainConfig {
        TrainConfig::new(self.epochs, self.learning_rate)
    }

    pub fn loader(&self) -> BitmapLoader {
        BitmapLoader::for_input_size(self.network.input_size)
    }

    /// Resolves `path` against the plan's directory.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Loads every sample bitmap, returning inputs and single-element labels.
    pub fn load_samples(&self) -> Result<(Vec<Vec<f64>>, Vec<Vec<f64>>)> {
        let loader = self.loader();
        let mut inputs = Vec::with_capacity(self.samples.len());
        let mut labels = Vec::with_capacity(self.samples.len());
        for sample in &self.samples {
            inputs.push(loader.load(self.resolve(&sample.bitmap))?);
            labels.push(vec![sample.label]);
        }
        Ok((inputs, labels))
    }
}

/// Where the topology of a weight file is stored: `weights.txt` ->
/// `weights.spec.json`.
pub fn spec_path(weights: impl AsRef<Path>) -> PathBuf {
    weights.as_ref().with_extension("spec.json")
}

/// Finds the topology to load `weights` into.
///
/// The spec file written next to the weights wins; the plan's network is only
/// used when there is no spec file. A plan that disagrees with an existing
/// spec file is logged and ignored.
pub fn resolve_spec(weights: impl AsRef<Path>, plan: Option<&Path>) -> Result<NetworkSpec> {
    let from_weights = spec_path(weights);
    let from_plan = plan.map(TrainingPlan::load_json).transpose()?.map(|p| p.network);

    match (from_weights.exists(), from_plan) {
        (true, plan_spec) => {
            let spec = NetworkSpec::load_json(&from_weights)?;
            if plan_spec.is_some_and(|p| p != spec) {
                warn!(spec = %from_weights.display(), "plan topology differs from the weights' spec; using the spec file");
            }
            Ok(spec)
        }
        (false, Some(spec)) => Ok(spec),
        (false, None) => Err(NetworkError::Configuration(format!(
            "no {} found; pass a plan so the network topology is known",
            from_weights.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_plan_is_valid() {
        let plan = TrainingPlan::reference();
        assert!(plan.validate().is_ok());
        assert_eq!(plan.network.weight_count(), 3030);
        assert_eq!(plan.loader(), BitmapLoader::new(10, 10));
    }

    #[test]
    fn json_round_trip_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        let mut plan = TrainingPlan::reference();
        plan.seed = Some(7);
        plan.save_json(&path).unwrap();

        let loaded = TrainingPlan::load_json(&path).unwrap();
        assert_eq!(loaded.seed, Some(7));
        assert_eq!(loaded.samples, plan.samples);
        assert_eq!(loaded.resolve("training1.txt"), dir.path().join("training1.txt"));
    }

    #[test]
    fn plans_without_samples_or_epochs_are_rejected() {
        let mut plan = TrainingPlan::reference();
        plan.samples.clear();
        assert!(matches!(plan.validate(), Err(NetworkError::Configuration(_))));

        let mut plan = TrainingPlan::reference();
        plan.epochs = 0;
        assert!(matches!(plan.validate(), Err(NetworkError::Configuration(_))));
    }

    #[test]
    fn malformed_json_is_a_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        std::fs::write(&path, "{ \"network\": ").unwrap();
        assert!(matches!(TrainingPlan::load_json(&path), Err(NetworkError::Format(_))));
    }

    #[test]
    fn samples_load_through_the_bitmap_loader() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "1001").unwrap();
        std::fs::write(dir.path().join("b.txt"), "0110").unwrap();
        std::fs::write(
            dir.path().join("plan.json"),
            r#"{
                "network": { "input_size": 4, "hidden_size": 2, "output_size": 1 },
                "samples": [ { "bitmap": "a.txt", "label": 1.0 }, { "bitmap": "b.txt", "label": 0.0 } ],
                "epochs": 10,
                "learning_rate": 0.1
            }"#,
        )
        .unwrap();

        let plan = TrainingPlan::load_json(dir.path().join("plan.json")).unwrap();
        let (inputs, labels) = plan.load_samples().unwrap();
        assert_eq!(inputs, vec![vec![1.0, 0.0, 0.0, 1.0], vec![0.0, 1.0, 1.0, 0.0]]);
        assert_eq!(labels, vec![vec![1.0], vec![0.0]]);
    }

    #[test]
    fn spec_file_sits_next_to_the_weights() {
        assert_eq!(spec_path("out/weights.txt"), PathBuf::from("out/weights.spec.json"));
        assert_eq!(spec_path("weights"), PathBuf::from("weights.spec.json"));
    }

    fn sigmoid_plan(dir: &Path) -> PathBuf {
        let mut plan = TrainingPlan::reference();
        plan.network = NetworkSpec::new(100, 8, 1);
        let path = dir.join("plan.json");
        plan.save_json(&path).unwrap();
        path
    }

    #[test]
    fn spec_file_wins_over_the_plan() {
        let dir = tempfile::tempdir().unwrap();
        let weights = dir.path().join("weights.txt");
        let saved = NetworkSpec::new(100, 30, 1).with_activation(ActivationFunction::ReLU);
        saved.save_json(spec_path(&weights)).unwrap();
        let plan = sigmoid_plan(dir.path());

        assert_eq!(resolve_spec(&weights, Some(&plan)).unwrap(), saved);
        assert_eq!(resolve_spec(&weights, None).unwrap(), saved);
    }

    #[test]
    fn plan_is_used_when_no_spec_file_exists() {
        let dir = tempfile::tempdir().unwrap();
        let plan = sigmoid_plan(dir.path());
        let spec = resolve_spec(dir.path().join("weights.txt"), Some(&plan)).unwrap();
        assert_eq!(spec, NetworkSpec::new(100, 8, 1));
    }

    #[test]
    fn missing_spec_and_plan_is_a_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_spec(dir.path().join("weights.txt"), None).unwrap_err();
        assert!(matches!(err, NetworkError::Configuration(ref msg) if msg.contains("weights.spec.json")));
    }
}
