use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::activation::ActivationFunction;
use crate::error::{NetworkError, Result};
use crate::math::WeightInit;

/// Architecture of a single-hidden-layer network.
///
/// The three sizes are fixed for the life of a `Network`. The spec can be
/// stored as JSON next to a weight file so the weights can later be loaded
/// into a network of the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub input_size: usize,
    pub hidden_size: usize,
    pub output_size: usize,
    /// Non-linearity of the hidden layer. The output layer is always sigmoid.
    #[serde(default)]
    pub hidden_activation: ActivationFunction,
    #[serde(default)]
    pub weight_init: WeightInit,
}

impl NetworkSpec {
    pub fn new(input_size: usize, hidden_size: usize, output_size: usize) -> NetworkSpec {
        NetworkSpec {
            input_size,
            hidden_size,
            output_size,
            hidden_activation: ActivationFunction::default(),
            weight_init: WeightInit::default(),
        }
    }

    pub fn with_activation(mut self, activation: ActivationFunction) -> NetworkSpec {
        self.hidden_activation = activation;
        self
    }

    pub fn with_weight_init(mut self, init: WeightInit) -> NetworkSpec {
        self.weight_init = init;
        self
    }

    /// Rejects any layer of size zero.
    pub fn validate(&self) -> Result<()> {
        for (name, size) in [
            ("input_size", self.input_size),
            ("hidden_size", self.hidden_size),
            ("output_size", self.output_size),
        ] {
            if size == 0 {
                return Err(NetworkError::Configuration(format!("{name} must be positive")));
            }
        }
        Ok(())
    }

    pub fn input_hidden_len(&self) -> usize {
        self.input_size * self.hidden_size
    }

    pub fn hidden_output_len(&self) -> usize {
        self.hidden_size * self.output_size
    }

    /// Number of weights in a weight file for this architecture.
    pub fn weight_count(&self) -> usize {
        self.input_hidden_len() + self.hidden_output_len()
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|e| NetworkError::io(path, e))?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| NetworkError::Format(format!("{}: {e}", path.display())))
    }

    /// Deserializes and validates a spec written by `save_json`.
    pub fn load_json(path: impl AsRef<Path>) -> Result<NetworkSpec> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| NetworkError::io(path, e))?;
        let reader = std::io::BufReader::new(file);
        let spec: NetworkSpec = serde_json::from_reader(reader)
            .map_err(|e| NetworkError::Format(format!("{}: {e}", path.display())))?;
        spec.validate()?;
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sizes_are_configuration_errors() {
        for spec in [
            NetworkSpec::new(0, 3, 1),
            NetworkSpec::new(4, 0, 1),
            NetworkSpec::new(4, 3, 0),
        ] {
            assert!(matches!(spec.validate(), Err(NetworkError::Configuration(_))));
        }
        assert!(NetworkSpec::new(4, 3, 1).validate().is_ok());
    }

    #[test]
    fn weight_count_covers_both_matrices() {
        let spec = NetworkSpec::new(100, 30, 1);
        assert_eq!(spec.input_hidden_len(), 3000);
        assert_eq!(spec.hidden_output_len(), 30);
        assert_eq!(spec.weight_count(), 3030);
    }

    #[test]
    fn json_defaults_optional_fields() {
        let spec: NetworkSpec =
            serde_json::from_str(r#"{"input_size": 4, "hidden_size": 2, "output_size": 1}"#).unwrap();
        assert_eq!(spec.hidden_activation, ActivationFunction::Sigmoid);
        assert_eq!(spec.weight_init, WeightInit::Symmetric);
    }

    #[test]
    fn json_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spec.json");
        let spec = NetworkSpec::new(100, 30, 1)
            .with_activation(ActivationFunction::ReLU)
            .with_weight_init(WeightInit::Positive);

        spec.save_json(&path).unwrap();
        assert_eq!(NetworkSpec::load_json(&path).unwrap(), spec);
    }

    #[test]
    fn load_json_rejects_zero_sizes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spec.json");
        std::fs::write(&path, r#"{"input_size": 0, "hidden_size": 2, "output_size": 1}"#).unwrap();
        assert!(matches!(NetworkSpec::load_json(&path), Err(NetworkError::Configuration(_))));
    }
}
