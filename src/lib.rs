pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;
pub mod bitmap;
pub mod plan;

// Convenience re-exports
pub use error::{NetworkError, Result};
pub use math::matrix::{Matrix, WeightInit};
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use network::network::Network;
pub use network::spec::NetworkSpec;
pub use loss::loss_type::LossType;
pub use optim::sgd::Sgd;
pub use train::{train_loop, train_network, EpochStats, TrainConfig};
pub use bitmap::loader::BitmapLoader;
pub use plan::{resolve_spec, spec_path, Sample, TrainingPlan};
