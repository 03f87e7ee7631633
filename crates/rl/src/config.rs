//! # Driver Configuration
//!
//! Everything needed to build a [`crate::Driver`] and the car it steers, with
//! defaults matching the simulator's stock settings: five rays thirty degrees
//! apart reaching 300 units, a five-unit hidden layer, three steering actions
//! and a constant 0.2 exploration rate. Deserialises from JSON; missing fields
//! keep their defaults.

use physics::{ActionSpace, CarParams, FanOrder, KinematicCar, Pose, SensorConfig};
use serde::{Deserialize, Serialize};

use crate::error::RlError;
use crate::policy::SecondGuess;
use crate::reward::{Exploration, RewardShaping};
use crate::trainer::TargetStrategy;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FanSetting {
    #[default]
    CenterOut,
    Sweep,
}

impl From<FanSetting> for FanOrder {
    fn from(fan: FanSetting) -> Self {
        match fan {
            FanSetting::CenterOut => FanOrder::CenterOut,
            FanSetting::Sweep => FanOrder::Sweep,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionSetting {
    #[default]
    Steering,
    SteeringThrottle,
}

impl From<ActionSetting> for ActionSpace {
    fn from(actions: ActionSetting) -> Self {
        match actions {
            ActionSetting::Steering => ActionSpace::Steering,
            ActionSetting::SteeringThrottle => ActionSpace::SteeringThrottle,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorSettings {
    pub ray_count: usize,
    /// Angle between neighbouring rays, in degrees. When absent the fan is
    /// spread evenly over a half circle, `180 / (ray_count + 1)` degrees apart.
    pub angle_spread_deg: Option<f32>,
    pub max_length: f32,
    pub front_offset: f32,
    pub fan: FanSetting,
}

impl Default for SensorSettings {
    fn default() -> Self {
        Self {
            ray_count: 5,
            angle_spread_deg: None,
            max_length: SensorConfig::DEFAULT_MAX_LENGTH,
            front_offset: SensorConfig::DEFAULT_FRONT_OFFSET,
            fan: FanSetting::default(),
        }
    }
}

impl SensorSettings {
    /// # Errors
    ///
    /// Propagates [`physics::PhysicsError::InvalidSensorConfig`].
    pub fn build(&self) -> Result<SensorConfig, RlError> {
        let config = match self.angle_spread_deg {
            Some(degrees) => {
                SensorConfig::new(self.ray_count, degrees.to_radians(), self.max_length)?
            }
            None => SensorConfig::evenly_spaced(self.ray_count, self.max_length)?,
        };
        Ok(config.with_front_offset(self.front_offset)?.with_fan(self.fan.into()))
    }
}

/// Handling of the car driven by the runtime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarSettings {
    pub speed: f32,
    pub turn_speed: f32,
    pub min_turn_speed: f32,
    pub air_friction: f32,
}

impl Default for CarSettings {
    fn default() -> Self {
        let params = CarParams::default();
        Self {
            speed: params.speed,
            turn_speed: params.turn_speed,
            min_turn_speed: params.min_turn_speed,
            air_friction: params.air_friction,
        }
    }
}

impl CarSettings {
    /// # Errors
    ///
    /// [`RlError::InvalidConfig`] for non-finite values, a non-positive
    /// `min_turn_speed` or an `air_friction` outside `[0, 1]`.
    pub fn params(&self) -> Result<CarParams, RlError> {
        let values = [self.speed, self.turn_speed, self.min_turn_speed, self.air_friction];
        if !values.iter().all(|v| v.is_finite()) {
            return Err(RlError::InvalidConfig("car settings must be finite"));
        }
        if self.min_turn_speed <= 0.0 {
            return Err(RlError::InvalidConfig("min_turn_speed must be positive"));
        }
        if !(0.0..=1.0).contains(&self.air_friction) {
            return Err(RlError::InvalidConfig("air_friction must be within [0, 1]"));
        }
        Ok(CarParams {
            speed: self.speed,
            turn_speed: self.turn_speed,
            min_turn_speed: self.min_turn_speed,
            air_friction: self.air_friction,
            ..CarParams::default()
        })
    }

    /// A car with these settings at the default spawn.
    ///
    /// # Errors
    ///
    /// As [`CarSettings::params`].
    pub fn build(&self) -> Result<KinematicCar, RlError> {
        let spawn = Pose::new(KinematicCar::DEFAULT_SPAWN, KinematicCar::DEFAULT_HEADING);
        Ok(KinematicCar::new(self.params()?, spawn))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Seeds weight initialisation and exploration.
    pub seed: u64,
    pub sensor: SensorSettings,
    pub hidden_units: usize,
    pub learning_rate: f32,
    pub actions: ActionSetting,
    pub exploration: Exploration,
    pub second_guess: Option<SecondGuess>,
    pub reward: RewardShaping,
    pub strategy: TargetStrategy,
    pub car: CarSettings,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            sensor: SensorSettings::default(),
            hidden_units: 5,
            learning_rate: ml::Mlp::DEFAULT_LEARNING_RATE,
            actions: ActionSetting::default(),
            exploration: Exploration::default(),
            second_guess: None,
            reward: RewardShaping::default(),
            strategy: TargetStrategy::default(),
            car: CarSettings::default(),
        }
    }
}

impl DriverConfig {
    /// # Errors
    ///
    /// Returns [`RlError::InvalidConfig`] for out-of-range rates, car settings
    /// or a zero-sized network, or the sensor validation error.
    pub fn validate(&self) -> Result<(), RlError> {
        self.sensor.build()?;
        self.car.params()?;
        if self.hidden_units == 0 {
            return Err(RlError::InvalidConfig("hidden_units must be >= 1"));
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(RlError::InvalidConfig("learning_rate must be positive"));
        }
        let unit = 0.0..=1.0;
        if !unit.contains(&self.exploration.start) || !unit.contains(&self.exploration.min) {
            return Err(RlError::InvalidConfig("exploration rates must be within [0, 1]"));
        }
        if !unit.contains(&self.exploration.decay) {
            return Err(RlError::InvalidConfig("exploration decay must be within [0, 1]"));
        }
        if let Some(guess) = self.second_guess {
            if !unit.contains(&guess.confidence_threshold) || !unit.contains(&guess.probability) {
                return Err(RlError::InvalidConfig("second_guess values must be within [0, 1]"));
            }
        }
        if !self.reward.on_track.is_finite() || !self.reward.off_track.is_finite() {
            return Err(RlError::InvalidConfig("rewards must be finite"));
        }
        if let TargetStrategy::OneHot { scale, max_epochs, .. } = self.strategy {
            if !scale.is_finite() || max_epochs == 0 {
                return Err(RlError::InvalidConfig(
                    "one-hot needs a finite scale and max_epochs >= 1",
                ));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn action_space(&self) -> ActionSpace {
        self.actions.into()
    }
}
