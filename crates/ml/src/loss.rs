//! Categorical cross-entropy against a probability output.

use crate::Tensor;

/// Probabilities are clipped into `[EPSILON, 1 - EPSILON]` before the log.
pub const EPSILON: f32 = 1e-7;

/// `-Σ target_i · ln(pred_i)`.
#[must_use]
pub fn categorical_cross_entropy(pred: &Tensor, target: &Tensor) -> f32 {
    pred.data
        .iter()
        .zip(&target.data)
        .map(|(&p, &t)| -t * p.clamp(EPSILON, 1.0 - EPSILON).ln())
        .sum()
}

/// Gradient of [`categorical_cross_entropy`] w.r.t. `pred`.
#[must_use]
pub fn categorical_cross_entropy_grad(pred: &Tensor, target: &Tensor) -> Tensor {
    let data = pred
        .data
        .iter()
        .zip(&target.data)
        .map(|(&p, &t)| -t / p.clamp(EPSILON, 1.0 - EPSILON))
        .collect();
    Tensor::from_vec(pred.shape.clone(), data)
}
