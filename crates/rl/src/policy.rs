//! # Driving Policy
//!
//! Maps a sensor reading to a discrete action. The reading is scaled into a
//! feature vector, pushed through the [`Approximator`], and the most probable
//! action is taken, except when the exploration roll says to act at random.
//!
//! The optional [`SecondGuess`] heuristic deliberately picks the *least*
//! probable action now and then when the network is unsure of its favourite.
//! It is off unless configured.

use ml::{Adam, Approximator, MlError, Mlp};
use serde::{Deserialize, Serialize};

use crate::error::RlError;

/// Index of a discrete action, in `[0, action_count)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionIndex(pub usize);

impl ActionIndex {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Low-confidence substitution: when the best action's probability is below
/// `confidence_threshold`, take the least probable action with probability
/// `probability`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SecondGuess {
    pub confidence_threshold: f32,
    pub probability: f32,
}

impl Default for SecondGuess {
    fn default() -> Self {
        Self { confidence_threshold: 0.7, probability: 0.3 }
    }
}

pub struct Policy<A: Approximator = Mlp> {
    model: A,
    input_scale: f32,
    second_guess: Option<SecondGuess>,
    rng: fastrand::Rng,
}

impl Policy<Mlp> {
    /// A sigmoid-hidden, softmax-output network sized for `ray_count` inputs
    /// and `action_count` outputs, trained with Adam at `learning_rate`, with
    /// inputs scaled by `1 / max_length`.
    ///
    /// # Errors
    ///
    /// Fails when any dimension is zero, `max_length` is not positive or the
    /// learning rate is not a positive number.
    pub fn mlp(
        ray_count: usize,
        hidden_units: usize,
        action_count: usize,
        max_length: f32,
        learning_rate: f32,
        seed: u64,
    ) -> Result<Self, RlError> {
        if !max_length.is_finite() || max_length <= 0.0 {
            return Err(RlError::InvalidConfig("max_length must be positive and finite"));
        }
        if !learning_rate.is_finite() || learning_rate <= 0.0 {
            return Err(RlError::InvalidConfig("learning_rate must be positive"));
        }
        let mut rng = fastrand::Rng::with_seed(seed);
        let optimizer = Box::new(Adam::new(learning_rate));
        let model =
            Mlp::with_optimizer(ray_count, hidden_units, action_count, optimizer, &mut rng)?;
        Self::new(model, 1.0 / max_length, rng)
    }
}

impl<A: Approximator> Policy<A> {
    /// # Errors
    ///
    /// Fails when the model has no outputs or `input_scale` is not finite.
    pub fn new(model: A, input_scale: f32, rng: fastrand::Rng) -> Result<Self, RlError> {
        if model.output_dim() == 0 {
            return Err(RlError::InvalidConfig("action_count must be >= 1"));
        }
        if !input_scale.is_finite() {
            return Err(RlError::InvalidConfig("input_scale must be finite"));
        }
        Ok(Self { model, input_scale, second_guess: None, rng })
    }

    #[must_use]
    pub fn with_second_guess(mut self, second_guess: SecondGuess) -> Self {
        self.second_guess = Some(second_guess);
        self
    }

    #[must_use]
    pub fn second_guess(&self) -> Option<SecondGuess> {
        self.second_guess
    }

    #[must_use]
    pub fn action_count(&self) -> usize {
        self.model.output_dim()
    }

    #[must_use]
    pub fn input_dim(&self) -> usize {
        self.model.input_dim()
    }

    #[must_use]
    pub fn model(&self) -> &A {
        &self.model
    }

    pub(crate) fn model_mut(&mut self) -> &mut A {
        &mut self.model
    }

    /// Reading scaled into the model's input space.
    #[must_use]
    pub fn features(&self, reading: &[f32]) -> Vec<f32> {
        reading.iter().map(|d| d * self.input_scale).collect()
    }

    /// Forward pass: one probability per action.
    ///
    /// # Errors
    ///
    /// Propagates the model's shape or numeric failure.
    pub fn probabilities(&self, reading: &[f32]) -> Result<Vec<f32>, MlError> {
        self.model.predict(&self.features(reading))
    }

    /// Picks an action for `reading`.
    ///
    /// With probability `exploration_rate` the action is uniformly random;
    /// otherwise it is the most probable one (subject to [`SecondGuess`]). A
    /// failed forward pass is logged and answered with a random action, so
    /// the result is always a valid index.
    pub fn decide(&mut self, reading: &[f32], exploration_rate: f32) -> ActionIndex {
        let count = self.action_count();
        if self.rng.f32() < exploration_rate {
            return ActionIndex(self.rng.usize(..count));
        }

        let probs = match self.probabilities(reading) {
            Ok(probs) => probs,
            Err(err) => {
                tracing::warn!(%err, "forward pass failed; acting randomly");
                return ActionIndex(self.rng.usize(..count));
            }
        };

        let best = argmax(&probs);
        if let Some(guess) = self.second_guess {
            if probs[best] < guess.confidence_threshold && self.rng.f32() < guess.probability {
                let worst = argmin(&probs);
                tracing::trace!(best, worst, confidence = probs[best], "second-guessing");
                return ActionIndex(worst);
            }
        }
        ActionIndex(best)
    }
}

/// First index of the largest value.
fn argmax(values: &[f32]) -> usize {
    values
        .iter()
        .enumerate()
        .fold((0, f32::NEG_INFINITY), |(bi, bv), (i, &v)| if v > bv { (i, v) } else { (bi, bv) })
        .0
}

/// First index of the smallest value.
fn argmin(values: &[f32]) -> usize {
    values
        .iter()
        .enumerate()
        .fold((0, f32::INFINITY), |(bi, bv), (i, &v)| if v < bv { (i, v) } else { (bi, bv) })
        .0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmax_prefers_first_of_ties() {
        assert_eq!(argmax(&[0.2, 0.4, 0.4]), 1);
        assert_eq!(argmin(&[0.3, 0.1, 0.1]), 1);
    }
}
