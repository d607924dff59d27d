//! Loss functions

use crate::autograd::{BackwardOp, Tensor};
use ndarray::Array1;
use std::cell::RefCell;
use std::rc::Rc;

/// Trait for loss functions
pub trait LossFn {
    /// Compute the scalar loss for a batch of predictions
    fn forward(&self, predictions: &Tensor, targets: &Tensor) -> Tensor;

    /// Loss function name
    fn name(&self) -> &'static str;
}

/// Binary cross-entropy on raw logits, **sum** reduction.
///
/// Per element the numerically stable form is
/// `max(x, 0) - x·t + ln(1 + e^(-|x|))`, which never exponentiates a large
/// positive value. The gradient w.r.t. the logits is `σ(x) - t`, scaled by
/// whatever upstream gradient reaches the scalar result.
#[derive(Debug, Default)]
pub struct BceWithLogitsLoss;

impl BceWithLogitsLoss {
    /// Create the loss
    pub fn new() -> Self {
        Self
    }
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

impl LossFn for BceWithLogitsLoss {
    fn forward(&self, predictions: &Tensor, targets: &Tensor) -> Tensor {
        assert_eq!(predictions.len(), targets.len(), "predictions/targets length mismatch");

        let total: f32 = predictions
            .data()
            .iter()
            .zip(targets.data().iter())
            .map(|(&x, &t)| x.max(0.0) - x * t + (-x.abs()).exp().ln_1p())
            .sum();

        let requires_grad = predictions.requires_grad();
        let mut result = Tensor::new(Array1::from(vec![total]), requires_grad);

        if requires_grad {
            let backward_op = Rc::new(BceBackward {
                logits: predictions.clone(),
                targets: targets.data().clone(),
                result_grad: result.grad_cell(),
            });
            result.set_backward_op(backward_op);
        }

        result
    }

    fn name(&self) -> &'static str {
        "bce_with_logits"
    }
}

struct BceBackward {
    logits: Tensor,
    targets: Array1<f32>,
    result_grad: Rc<RefCell<Option<Array1<f32>>>>,
}

impl BackwardOp for BceBackward {
    fn backward(&self) {
        if let Some(grad) = self.result_grad.borrow().as_ref() {
            // Scalar result: one upstream value scales every element
            let g = grad[0];

            if self.logits.requires_grad() {
                let grad_logits: Vec<f32> = self
                    .logits
                    .data()
                    .iter()
                    .zip(self.targets.iter())
                    .map(|(&x, &t)| g * (sigmoid(x) - t))
                    .collect();
                self.logits.accumulate_grad(Array1::from(grad_logits));
            }

            if let Some(op) = self.logits.backward_op() {
                op.backward();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autograd::{backward, scale};
    use approx::assert_relative_eq;

    fn reference_bce(x: f32, t: f32) -> f32 {
        let s = sigmoid(x);
        -(t * s.ln() + (1.0 - t) * (1.0 - s).ln())
    }

    #[test]
    fn test_bce_matches_reference_formula() {
        let loss = BceWithLogitsLoss::new();
        let logits = Tensor::from_vec(vec![0.5, -1.2, 3.0], false);
        let targets = Tensor::from_vec(vec![1.0, 0.0, 1.0], false);

        let result = loss.forward(&logits, &targets);
        let expected = reference_bce(0.5, 1.0) + reference_bce(-1.2, 0.0) + reference_bce(3.0, 1.0);
        assert_relative_eq!(result.data()[0], expected, epsilon = 1e-5);
    }

    #[test]
    fn test_bce_sum_reduction_scales_with_batch() {
        let loss = BceWithLogitsLoss::new();
        let one = loss.forward(
            &Tensor::from_vec(vec![0.7], false),
            &Tensor::from_vec(vec![1.0], false),
        );
        let four = loss.forward(
            &Tensor::from_vec(vec![0.7; 4], false),
            &Tensor::from_vec(vec![1.0; 4], false),
        );
        assert_relative_eq!(four.data()[0], 4.0 * one.data()[0], epsilon = 1e-5);
    }

    #[test]
    fn test_bce_stable_for_extreme_logits() {
        let loss = BceWithLogitsLoss::new();
        let logits = Tensor::from_vec(vec![100.0, -100.0], false);
        let targets = Tensor::from_vec(vec![1.0, 0.0], false);

        let result = loss.forward(&logits, &targets);
        assert!(result.data()[0].is_finite());
        assert!(result.data()[0] < 1e-3, "correct confident predictions cost ~0");
    }

    #[test]
    fn test_bce_gradient_is_sigmoid_minus_target() {
        let loss = BceWithLogitsLoss::new();
        let logits = Tensor::from_vec(vec![0.5, -1.0], true);
        let targets = Tensor::from_vec(vec![1.0, 0.0], false);

        let result = loss.forward(&logits, &targets);
        backward(&result);

        let grad = logits.grad().expect("logit grad");
        assert_relative_eq!(grad[0], sigmoid(0.5) - 1.0, epsilon = 1e-6);
        assert_relative_eq!(grad[1], sigmoid(-1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_bce_gradient_scales_with_upstream() {
        // The halved discriminator loss must halve the logit gradients
        let loss = BceWithLogitsLoss::new();
        let logits = Tensor::from_vec(vec![0.5], true);
        let targets = Tensor::from_vec(vec![1.0], false);

        let result = loss.forward(&logits, &targets);
        let halved = scale(&result, 0.5);
        backward(&halved);

        let grad = logits.grad().expect("logit grad");
        assert_relative_eq!(grad[0], 0.5 * (sigmoid(0.5) - 1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_bce_recurses_into_logit_producer() {
        // Gradient must flow through the op that produced the logits
        let raw = Tensor::from_vec(vec![1.0], true);
        let logits = scale(&raw, 2.0);
        let targets = Tensor::from_vec(vec![0.0], false);

        let loss = BceWithLogitsLoss::new();
        let result = loss.forward(&logits, &targets);
        backward(&result);

        let grad = raw.grad().expect("producer grad");
        assert_relative_eq!(grad[0], 2.0 * sigmoid(2.0), epsilon = 1e-5);
    }

    #[test]
    fn test_bce_matches_finite_difference() {
        let eps = 1e-3f32;
        let loss = BceWithLogitsLoss::new();
        for &(x0, t) in &[(0.3f32, 1.0f32), (-1.7, 0.0), (2.2, 0.0)] {
            let logits = Tensor::from_vec(vec![x0], true);
            let targets = Tensor::from_vec(vec![t], false);
            let result = loss.forward(&logits, &targets);
            backward(&result);
            let analytic = logits.grad().expect("grad")[0];

            let eval = |x: f32| {
                loss.forward(
                    &Tensor::from_vec(vec![x], false),
                    &Tensor::from_vec(vec![t], false),
                )
                .data()[0]
            };
            let numeric = (eval(x0 + eps) - eval(x0 - eps)) / (2.0 * eps);
            assert_relative_eq!(analytic, numeric, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_bce_no_grad_when_logits_constant() {
        let loss = BceWithLogitsLoss::new();
        let logits = Tensor::from_vec(vec![0.5], false);
        let targets = Tensor::from_vec(vec![1.0], false);
        let result = loss.forward(&logits, &targets);
        assert!(!result.requires_grad());
        assert!(result.backward_op().is_none());
    }

    #[test]
    fn test_loss_name() {
        assert_eq!(BceWithLogitsLoss::new().name(), "bce_with_logits");
    }

    mod bce_proptest {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn bce_is_finite_and_non_negative(
                x in -50.0f32..50.0,
                t in prop::bool::ANY,
            ) {
                let loss = BceWithLogitsLoss::new();
                let target = if t { 1.0 } else { 0.0 };
                let result = loss.forward(
                    &Tensor::from_vec(vec![x], false),
                    &Tensor::from_vec(vec![target], false),
                );
                prop_assert!(result.data()[0].is_finite());
                prop_assert!(result.data()[0] >= 0.0);
            }

            #[test]
            fn sigmoid_symmetry(x in -30.0f32..30.0) {
                prop_assert!((sigmoid(x) + sigmoid(-x) - 1.0).abs() < 1e-5);
            }
        }
    }
}
