//! # Control Loop
//!
//! [`Driver::tick`] runs one sense/decide/act/learn cycle against a
//! [`DrivingWorld`]:
//!
//! 1. cast the sensor fan from the world's current pose,
//! 2. ask the policy for an action at this tick's exploration rate,
//! 3. actuate it and read the resulting adherence,
//! 4. map adherence to a reward, resetting the world when the car left the
//!    track,
//! 5. train on `(reading, action, reward)` before returning.
//!
//! Training completes inside the tick, so the next decision always sees the
//! updated weights.

use ml::{Approximator, Mlp};
use physics::{cast_sensors, SensorConfig, SensorReading};

use crate::config::DriverConfig;
use crate::env::{Adherence, DrivingWorld};
use crate::error::RlError;
use crate::policy::{ActionIndex, Policy};
use crate::reward::{Exploration, RewardShaping};
use crate::trainer::{Trainer, TrainingSample};

/// What happened during one tick.
#[derive(Clone, Debug)]
pub struct TickReport {
    /// Zero-based tick number.
    pub tick: u64,
    pub reading: SensorReading,
    pub action: ActionIndex,
    pub adherence: Adherence,
    pub reward: f32,
    /// The world was put back at its start after this tick.
    pub reset: bool,
    /// Training loss, `None` when the update was skipped.
    pub loss: Option<f32>,
}

/// Running totals across ticks.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DriveStats {
    pub ticks: u64,
    pub resets: u64,
    /// Ticks survived in the current run.
    pub ticks_since_reset: u64,
    /// Longest run so far.
    pub best_run: u64,
    pub total_reward: f64,
}

impl DriveStats {
    fn record(&mut self, reward: f32, reset: bool) {
        self.ticks += 1;
        self.total_reward += f64::from(reward);
        self.ticks_since_reset += 1;
        self.best_run = self.best_run.max(self.ticks_since_reset);
        if reset {
            self.resets += 1;
            self.ticks_since_reset = 0;
        }
    }
}

pub struct Driver<A: Approximator = Mlp> {
    policy: Policy<A>,
    trainer: Trainer,
    sensor: SensorConfig,
    reward: RewardShaping,
    exploration: Exploration,
    stats: DriveStats,
}

impl Driver<Mlp> {
    /// Builds the default network, sensor fan and trainer from `config`.
    ///
    /// # Errors
    ///
    /// Any validation failure from [`DriverConfig::validate`] or the model.
    pub fn from_config(config: &DriverConfig) -> Result<Self, RlError> {
        config.validate()?;
        let sensor = config.sensor.build()?;
        let mut policy = Policy::mlp(
            sensor.ray_count(),
            config.hidden_units,
            config.action_space().len(),
            sensor.max_length(),
            config.learning_rate,
            config.seed,
        )?;
        if let Some(guess) = config.second_guess {
            policy = policy.with_second_guess(guess);
        }
        tracing::debug!(
            rays = sensor.ray_count(),
            hidden = config.hidden_units,
            actions = policy.action_count(),
            strategy = ?config.strategy,
            "driver configured"
        );
        Self::new(policy, Trainer::new(config.strategy), sensor, config.reward, config.exploration)
    }
}

impl<A: Approximator> Driver<A> {
    /// # Errors
    ///
    /// [`RlError::DimensionMismatch`] when the policy input size differs from
    /// the sensor ray count.
    pub fn new(
        policy: Policy<A>,
        trainer: Trainer,
        sensor: SensorConfig,
        reward: RewardShaping,
        exploration: Exploration,
    ) -> Result<Self, RlError> {
        if policy.input_dim() != sensor.ray_count() {
            return Err(RlError::DimensionMismatch {
                what: "sensor rays",
                expected: policy.input_dim(),
                actual: sensor.ray_count(),
            });
        }
        Ok(Self { policy, trainer, sensor, reward, exploration, stats: DriveStats::default() })
    }

    /// Checks that `world` accepts exactly the actions the policy emits.
    ///
    /// # Errors
    ///
    /// [`RlError::DimensionMismatch`] on differing action counts.
    pub fn check_world<W: DrivingWorld + ?Sized>(&self, world: &W) -> Result<(), RlError> {
        if world.action_count() == self.policy.action_count() {
            Ok(())
        } else {
            Err(RlError::DimensionMismatch {
                what: "actions",
                expected: self.policy.action_count(),
                actual: world.action_count(),
            })
        }
    }

    pub fn tick<W: DrivingWorld + ?Sized>(&mut self, world: &mut W) -> TickReport {
        let tick = self.stats.ticks;
        let reading = cast_sensors(&world.pose(), world.obstacles(), &self.sensor);

        let rate = self.exploration.rate_at(tick);
        let action = self.policy.decide(&reading, rate);
        world.actuate(action);

        let adherence = world.adherence();
        let reward = self.reward.reward(adherence);
        let reset = RewardShaping::requires_reset(adherence);
        if reset {
            let run = self.stats.ticks_since_reset + 1;
            tracing::info!(tick, run, "left the track; resetting");
            world.reset();
        }

        let sample = TrainingSample { reading: &reading, action, reward };
        let loss = self.trainer.train(&mut self.policy, &sample);
        self.stats.record(reward, reset);
        tracing::debug!(tick, action = action.index(), reward, ?loss, "tick");

        TickReport { tick, reading, action, adherence, reward, reset, loss }
    }

    #[must_use]
    pub fn policy(&self) -> &Policy<A> {
        &self.policy
    }

    #[must_use]
    pub fn trainer(&self) -> &Trainer {
        &self.trainer
    }

    #[must_use]
    pub fn sensor(&self) -> &SensorConfig {
        &self.sensor
    }

    #[must_use]
    pub fn stats(&self) -> DriveStats {
        self.stats
    }
}
