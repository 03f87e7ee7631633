//! # Trainable Function Approximators
//!
//! The policy only needs two things from its model: a forward pass and a
//! single-sample fit toward a target vector. [`Approximator`] names exactly
//! that, so any numeric backend can stand behind a policy. [`Mlp`] is the
//! built-in implementation: one sigmoid hidden layer and a softmax output,
//! fitted with categorical cross-entropy.

use crate::error::MlError;
use crate::loss::{categorical_cross_entropy, categorical_cross_entropy_grad};
use crate::nn::{Dense, Sequential, Sigmoid, Softmax};
use crate::optim::{Adam, Optimizer};
use crate::Tensor;

/// A vector-to-vector function that can be nudged toward a target.
pub trait Approximator {
    fn input_dim(&self) -> usize;
    fn output_dim(&self) -> usize;

    /// Forward pass for one sample.
    ///
    /// # Errors
    ///
    /// [`MlError::ShapeMismatch`] when `input.len() != input_dim()`, or
    /// [`MlError::NonFinite`] when the output contains NaN or infinity.
    fn predict(&self, input: &[f32]) -> Result<Vec<f32>, MlError>;

    /// Runs `epochs` update steps on the single sample `(input, target)` and
    /// returns the loss measured before the last step.
    ///
    /// # Errors
    ///
    /// [`MlError::ShapeMismatch`] on dimension mismatch, or
    /// [`MlError::NonFinite`] when the loss or gradients blow up. A failing
    /// epoch leaves the parameters as they were before that epoch.
    fn fit(&mut self, input: &[f32], target: &[f32], epochs: usize) -> Result<f32, MlError>;
}

/// `input → Dense → Sigmoid → Dense → Softmax`.
pub struct Mlp {
    net: Sequential,
    optimizer: Box<dyn Optimizer>,
    input_dim: usize,
    hidden_dim: usize,
    output_dim: usize,
}

impl Mlp {
    pub const DEFAULT_LEARNING_RATE: f32 = 0.01;

    /// Randomly initialised network trained with Adam at
    /// [`Mlp::DEFAULT_LEARNING_RATE`].
    ///
    /// # Errors
    ///
    /// [`MlError::InvalidDimensions`] when any dimension is zero.
    pub fn new(
        input_dim: usize,
        hidden_dim: usize,
        output_dim: usize,
        rng: &mut fastrand::Rng,
    ) -> Result<Self, MlError> {
        Self::with_optimizer(
            input_dim,
            hidden_dim,
            output_dim,
            Box::new(Adam::new(Self::DEFAULT_LEARNING_RATE)),
            rng,
        )
    }

    /// # Errors
    ///
    /// [`MlError::InvalidDimensions`] when any dimension is zero.
    pub fn with_optimizer(
        input_dim: usize,
        hidden_dim: usize,
        output_dim: usize,
        optimizer: Box<dyn Optimizer>,
        rng: &mut fastrand::Rng,
    ) -> Result<Self, MlError> {
        if input_dim == 0 || hidden_dim == 0 || output_dim == 0 {
            return Err(MlError::InvalidDimensions("every layer needs at least one unit"));
        }
        let mut net = Sequential::new();
        net.push(Dense::xavier(input_dim, hidden_dim, rng));
        net.push(Sigmoid);
        net.push(Dense::xavier(hidden_dim, output_dim, rng));
        net.push(Softmax);
        Ok(Self { net, optimizer, input_dim, hidden_dim, output_dim })
    }

    #[must_use]
    pub fn hidden_dim(&self) -> usize {
        self.hidden_dim
    }

    /// Total number of trainable scalars.
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.net.params().iter().map(|p| p.len()).sum()
    }

    /// Flattened copy of every parameter, in layer order.
    #[must_use]
    pub fn parameters(&self) -> Vec<f32> {
        self.net.params().iter().flat_map(|p| p.data.iter().copied()).collect()
    }

    fn check_len(expected: usize, actual: usize) -> Result<(), MlError> {
        if expected == actual {
            Ok(())
        } else {
            Err(MlError::ShapeMismatch { expected, actual })
        }
    }
}

impl Approximator for Mlp {
    fn input_dim(&self) -> usize {
        self.input_dim
    }

    fn output_dim(&self) -> usize {
        self.output_dim
    }

    fn predict(&self, input: &[f32]) -> Result<Vec<f32>, MlError> {
        Self::check_len(self.input_dim, input.len())?;
        let x = Tensor::from_vec(vec![self.input_dim], input.to_vec());
        let (out, _) = self.net.forward(&x);
        if !out.is_finite() {
            return Err(MlError::NonFinite("network output"));
        }
        Ok(out.data)
    }

    fn fit(&mut self, input: &[f32], target: &[f32], epochs: usize) -> Result<f32, MlError> {
        Self::check_len(self.input_dim, input.len())?;
        Self::check_len(self.output_dim, target.len())?;
        if !input.iter().chain(target).all(|v| v.is_finite()) {
            return Err(MlError::NonFinite("training sample"));
        }
        let x = Tensor::from_vec(vec![self.input_dim], input.to_vec());
        let t = Tensor::from_vec(vec![self.output_dim], target.to_vec());

        let mut loss = 0.0;
        for _ in 0..epochs.max(1) {
            let (pred, activations) = self.net.forward(&x);
            loss = categorical_cross_entropy(&pred, &t);
            if !loss.is_finite() {
                return Err(MlError::NonFinite("loss"));
            }
            let grad_out = categorical_cross_entropy_grad(&pred, &t);
            let (_, grads) = self.net.backward(&activations, &grad_out);
            if !grads.iter().all(Tensor::is_finite) {
                return Err(MlError::NonFinite("gradient"));
            }
            let mut params = self.net.params_mut();
            self.optimizer.step(&mut params, &grads);
        }
        tracing::trace!(loss, epochs, "fit step");
        Ok(loss)
    }
}
