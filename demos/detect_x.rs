use std::path::Path;

use xshape_nn::{train_loop, ActivationFunction, Network, NetworkSpec, TrainingPlan};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let demos = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos");
    let plan = TrainingPlan::load_json(demos.join("plan.json"))?;
    let (inputs, labels) = plan.load_samples()?;

    for activation in [ActivationFunction::ReLU, ActivationFunction::Sigmoid] {
        let spec = NetworkSpec { hidden_activation: activation, ..plan.network.clone() };
        let mut network = Network::with_seed(spec, 42)?;

        let stats = train_loop(&mut network, &inputs, &labels, &plan.train_config())?;
        println!("{activation:?}: final loss = {:.6}", stats.train_loss);

        for (sample, input) in plan.samples.iter().zip(&inputs) {
            let score = network.forward(input)?[0];
            println!("  {} (label {}) -> {score:.4}", sample.bitmap.display(), sample.label);
        }

        let unseen = plan.loader().load(demos.join("detection.txt"))?;
        println!("  detection.txt -> {:.4}", network.forward(&unseen)?[0]);
    }

    Ok(())
}
