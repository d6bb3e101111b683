use serde::{Serialize, Deserialize};
use std::f64::consts::E;

/// Non-linearity applied at the hidden layer.
///
/// The output layer is always `Sigmoid`, so only the hidden layer is
/// configurable. Each variant pairs its function with the derivative
/// expressed in terms of the *activated* value, which is what backprop has
/// on hand after a forward pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ActivationFunction {
    #[default]
    Sigmoid,
    ReLU,
}

impl ActivationFunction {
    /// Element-wise activation of a pre-activation sum.
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => sigmoid(x),
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
        }
    }

    /// Derivative evaluated on an already activated value `a = function(x)`.
    ///
    /// - Sigmoid: `a * (1 - a)`
    /// - ReLU: `1` when `a > 0`, otherwise `0`
    pub fn derivative(&self, a: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => a * (1.0 - a),
            ActivationFunction::ReLU => if a > 0.0 { 1.0 } else { 0.0 },
        }
    }
}

/// Logistic function `1 / (1 + e^-x)`.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + E.powf(-x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sigmoid_is_centered_at_half() {
        assert_relative_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(4.0) > 0.98 && sigmoid(4.0) < 1.0);
        assert!(sigmoid(-4.0) < 0.02 && sigmoid(-4.0) > 0.0);
    }

    #[test]
    fn sigmoid_derivative_uses_activated_value() {
        let act = ActivationFunction::Sigmoid;
        let a = act.function(0.3);
        assert_relative_eq!(act.derivative(a), a * (1.0 - a));
        assert_relative_eq!(act.derivative(0.5), 0.25);
    }

    #[test]
    fn relu_branch_point() {
        let act = ActivationFunction::ReLU;
        assert_eq!(act.function(-2.5), 0.0);
        assert_eq!(act.function(0.0), 0.0);
        assert_eq!(act.function(1.75), 1.75);

        assert_eq!(act.derivative(0.0), 0.0);
        assert_eq!(act.derivative(-0.1), 0.0);
        assert_eq!(act.derivative(1e-9), 1.0);
        assert_eq!(act.derivative(3.0), 1.0);
    }

    #[test]
    fn serializes_by_variant_name() {
        let json = serde_json::to_string(&ActivationFunction::ReLU).unwrap();
        assert_eq!(json, "\"ReLU\"");
        let back: ActivationFunction = serde_json::from_str("\"Sigmoid\"").unwrap();
        assert_eq!(back, ActivationFunction::Sigmoid);
    }
}
