//! # Online Trainer
//!
//! One sample in, one update out. Each call builds a target vector from the
//! policy's current output, the action that was taken and the reward that
//! followed, then fits the model toward it. There is no replay buffer and no
//! batching; the sample is dropped after the update.
//!
//! Training is best effort. [`Trainer::train`] logs and swallows failures so
//! the control loop never stops on a bad step; [`Trainer::try_train`] exposes
//! the error.

use ml::Approximator;
use serde::{Deserialize, Serialize};

use crate::error::TrainError;
use crate::policy::{ActionIndex, Policy};

/// How the fit target is built from the reward.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TargetStrategy {
    /// Current output with `reward` added to the chosen action; one epoch.
    #[default]
    Nudge,
    /// Every action at `base` (default `1 / action_count`), the chosen one at
    /// `base + reward`; one epoch.
    SoftUniform {
        #[serde(default)]
        base: Option<f32>,
    },
    /// One-hot on the chosen action, repeated
    /// `clamp(round(|reward| * scale), 1, max_epochs)` times, whatever the
    /// reward sign. With `spread_negative`, a negative reward instead spreads
    /// the mass evenly over the other actions.
    OneHot {
        scale: f32,
        max_epochs: usize,
        #[serde(default)]
        spread_negative: bool,
    },
}

impl TargetStrategy {
    pub const ONE_HOT: TargetStrategy =
        TargetStrategy::OneHot { scale: 5.0, max_epochs: 3, spread_negative: false };
}

/// Fit target for one sample.
#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    /// One component per action, each in `[0, 1]`.
    pub values: Vec<f32>,
    pub epochs: usize,
}

/// Builds the target for `action` given the policy output `probabilities`.
///
/// # Errors
///
/// [`TrainError::NonFiniteReward`] for NaN or infinite rewards and
/// [`TrainError::ActionOutOfRange`] when `action` has no probability.
pub fn build_target(
    strategy: TargetStrategy,
    probabilities: &[f32],
    action: ActionIndex,
    reward: f32,
) -> Result<Target, TrainError> {
    if !reward.is_finite() {
        return Err(TrainError::NonFiniteReward(reward));
    }
    let count = probabilities.len();
    let a = action.index();
    if a >= count {
        return Err(TrainError::ActionOutOfRange { index: a, count });
    }

    let (mut values, epochs) = match strategy {
        TargetStrategy::Nudge => {
            let mut values = probabilities.to_vec();
            values[a] += reward;
            (values, 1)
        }
        TargetStrategy::SoftUniform { base } => {
            #[allow(clippy::cast_precision_loss)]
            let base = base.unwrap_or(1.0 / count as f32);
            let mut values = vec![base; count];
            values[a] = base + reward;
            (values, 1)
        }
        TargetStrategy::OneHot { scale, max_epochs, spread_negative } => {
            let mut values = vec![0.0; count];
            if reward >= 0.0 || !spread_negative {
                values[a] = 1.0;
            } else if count > 1 {
                #[allow(clippy::cast_precision_loss)]
                let share = 1.0 / (count - 1) as f32;
                for (i, v) in values.iter_mut().enumerate() {
                    if i != a {
                        *v = share;
                    }
                }
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let repeats = (reward.abs() * scale).round() as usize;
            (values, repeats.clamp(1, max_epochs.max(1)))
        }
    };

    for v in &mut values {
        *v = if v.is_finite() { (*v).clamp(0.0, 1.0) } else { 0.0 };
    }
    Ok(Target { values, epochs })
}

/// One observation/decision/outcome triple.
#[derive(Copy, Clone, Debug)]
pub struct TrainingSample<'a> {
    pub reading: &'a [f32],
    pub action: ActionIndex,
    pub reward: f32,
}

#[derive(Debug, Default)]
pub struct Trainer {
    strategy: TargetStrategy,
    updates: u64,
    failures: u64,
}

impl Trainer {
    #[must_use]
    pub fn new(strategy: TargetStrategy) -> Self {
        Self { strategy, updates: 0, failures: 0 }
    }

    #[must_use]
    pub fn strategy(&self) -> TargetStrategy {
        self.strategy
    }

    /// Successful updates so far.
    #[must_use]
    pub fn updates(&self) -> u64 {
        self.updates
    }

    /// Skipped updates so far.
    #[must_use]
    pub fn failures(&self) -> u64 {
        self.failures
    }

    /// Runs one update and returns the loss.
    ///
    /// # Errors
    ///
    /// Any [`TrainError`]; the policy is left unchanged when the target cannot
    /// be built, and as of the last good epoch when the model fails.
    pub fn try_train<A: Approximator>(
        &mut self,
        policy: &mut Policy<A>,
        sample: &TrainingSample<'_>,
    ) -> Result<f32, TrainError> {
        let probabilities = policy.probabilities(sample.reading)?;
        let target = build_target(self.strategy, &probabilities, sample.action, sample.reward)?;
        let features = policy.features(sample.reading);
        let loss = policy.model_mut().fit(&features, &target.values, target.epochs)?;
        self.updates += 1;
        Ok(loss)
    }

    /// Like [`Trainer::try_train`], but a failure is logged and dropped.
    pub fn train<A: Approximator>(
        &mut self,
        policy: &mut Policy<A>,
        sample: &TrainingSample<'_>,
    ) -> Option<f32> {
        match self.try_train(policy, sample) {
            Ok(loss) => Some(loss),
            Err(err) => {
                self.failures += 1;
                tracing::warn!(
                    %err,
                    action = sample.action.index(),
                    reward = sample.reward,
                    "training step skipped"
                );
                None
            }
        }
    }
}
