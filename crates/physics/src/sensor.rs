//! # Ray-Fan Sensor
//!
//! Casts a fan of rays from a point just ahead of the body and reports, per
//! ray, the distance to the nearest obstacle segment. The result is the fixed
//! length observation vector the policy consumes.
//!
//! Every ray is tested against every segment, so a cast costs
//! `ray_count × obstacles.len()` intersection tests. That is fine for tracks
//! with tens of road sides; larger maps would need a spatial partition.

use std::f32::consts::PI;
use std::ops::Deref;

use crate::error::PhysicsError;
use crate::types::{Pose, Ray, Segment};

/// How ray directions are laid out around the heading.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FanOrder {
    /// Front-centre first, then alternating sides moving outwards:
    /// `h, h - s, h + s, h - 2s, h + 2s, ...`. Built by accumulating
    /// `i * spread` with an alternating sign, which is how the simulator has
    /// always ordered its rays.
    #[default]
    CenterOut,
    /// Monotonic sweep `h + (i - (n - 1) / 2) * s`.
    Sweep,
}

/// Validated ray-fan configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SensorConfig {
    ray_count: usize,
    angle_spread: f32,
    max_length: f32,
    front_offset: f32,
    fan: FanOrder,
}

impl SensorConfig {
    /// Distance of the ray origin ahead of the pose.
    pub const DEFAULT_FRONT_OFFSET: f32 = 10.0;
    pub const DEFAULT_MAX_LENGTH: f32 = 300.0;

    /// Creates a configuration with the default front offset and fan order.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidSensorConfig`] when `ray_count` is zero,
    /// `max_length` is not a positive finite number or `angle_spread` is not
    /// finite.
    pub fn new(ray_count: usize, angle_spread: f32, max_length: f32) -> Result<Self, PhysicsError> {
        if ray_count == 0 {
            return Err(PhysicsError::InvalidSensorConfig("ray_count must be >= 1"));
        }
        if !max_length.is_finite() || max_length <= 0.0 {
            return Err(PhysicsError::InvalidSensorConfig("max_length must be positive and finite"));
        }
        if !angle_spread.is_finite() {
            return Err(PhysicsError::InvalidSensorConfig("angle_spread must be finite"));
        }
        Ok(Self {
            ray_count,
            angle_spread,
            max_length,
            front_offset: Self::DEFAULT_FRONT_OFFSET,
            fan: FanOrder::default(),
        })
    }

    /// Spacing of `π / (ray_count + 1)`, which spreads the fan over a half
    /// circle regardless of the ray count.
    ///
    /// # Errors
    ///
    /// Same as [`SensorConfig::new`].
    pub fn evenly_spaced(ray_count: usize, max_length: f32) -> Result<Self, PhysicsError> {
        #[allow(clippy::cast_precision_loss)]
        let spread = PI / (ray_count as f32 + 1.0);
        Self::new(ray_count, spread, max_length)
    }

    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidSensorConfig`] for a negative or
    /// non-finite offset.
    pub fn with_front_offset(mut self, front_offset: f32) -> Result<Self, PhysicsError> {
        if !front_offset.is_finite() || front_offset < 0.0 {
            return Err(PhysicsError::InvalidSensorConfig("front_offset must be >= 0 and finite"));
        }
        self.front_offset = front_offset;
        Ok(self)
    }

    #[must_use]
    pub fn with_fan(mut self, fan: FanOrder) -> Self {
        self.fan = fan;
        self
    }

    #[must_use]
    pub fn ray_count(&self) -> usize {
        self.ray_count
    }

    #[must_use]
    pub fn angle_spread(&self) -> f32 {
        self.angle_spread
    }

    #[must_use]
    pub fn max_length(&self) -> f32 {
        self.max_length
    }

    #[must_use]
    pub fn front_offset(&self) -> f32 {
        self.front_offset
    }

    #[must_use]
    pub fn fan(&self) -> FanOrder {
        self.fan
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            ray_count: 5,
            angle_spread: PI / 6.0,
            max_length: Self::DEFAULT_MAX_LENGTH,
            front_offset: Self::DEFAULT_FRONT_OFFSET,
            fan: FanOrder::default(),
        }
    }
}

/// Distances measured by one cast, in fan order.
///
/// Always holds exactly `ray_count` values, each within `[0, max_length]`.
#[derive(Clone, Debug, PartialEq)]
pub struct SensorReading {
    distances: Vec<f32>,
    max_length: f32,
}

impl SensorReading {
    /// Wraps externally measured distances, clamping each into
    /// `[0, max_length]`. Non-finite values read as `max_length`.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidSensorConfig`] for an empty reading or
    /// a non-positive `max_length`.
    pub fn new(distances: Vec<f32>, max_length: f32) -> Result<Self, PhysicsError> {
        if distances.is_empty() {
            return Err(PhysicsError::InvalidSensorConfig("ray_count must be >= 1"));
        }
        if !max_length.is_finite() || max_length <= 0.0 {
            return Err(PhysicsError::InvalidSensorConfig("max_length must be positive and finite"));
        }
        let distances = distances
            .into_iter()
            .map(|d| if d.is_finite() { d.clamp(0.0, max_length) } else { max_length })
            .collect();
        Ok(Self { distances, max_length })
    }

    #[must_use]
    pub fn max_length(&self) -> f32 {
        self.max_length
    }

    /// Shortest distance in the reading.
    #[must_use]
    pub fn min_distance(&self) -> f32 {
        self.distances.iter().copied().fold(self.max_length, f32::min)
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<f32> {
        self.distances
    }
}

impl Deref for SensorReading {
    type Target = [f32];

    fn deref(&self) -> &[f32] {
        &self.distances
    }
}

/// Ray directions for `pose` in fan order.
#[must_use]
pub fn ray_angles(pose: &Pose, config: &SensorConfig) -> Vec<f32> {
    let spread = config.angle_spread;
    let n = config.ray_count;
    match config.fan {
        FanOrder::CenterOut => {
            let mut angle = pose.heading;
            let mut sign = 1.0_f32;
            (0..n)
                .map(|i| {
                    #[allow(clippy::cast_precision_loss)]
                    let step = i as f32 * spread * sign;
                    angle += step;
                    sign = -sign;
                    angle
                })
                .collect()
        }
        FanOrder::Sweep => {
            #[allow(clippy::cast_precision_loss)]
            let center = (n as f32 - 1.0) * 0.5;
            (0..n)
                .map(|i| {
                    #[allow(clippy::cast_precision_loss)]
                    let offset = i as f32 - center;
                    pose.heading + offset * spread
                })
                .collect()
        }
    }
}

/// Rays cast for `pose`, in fan order.
#[must_use]
pub fn rays(pose: &Pose, config: &SensorConfig) -> Vec<Ray> {
    let origin = pose.ahead(config.front_offset);
    ray_angles(pose, config)
        .into_iter()
        .map(|angle| Ray::new(origin, angle, config.max_length))
        .collect()
}

/// Casts the configured fan against `obstacles`.
///
/// Each entry is the distance from the ray origin to the closest segment the
/// ray crosses, or `max_length` when it crosses none.
#[must_use]
pub fn cast_sensors(pose: &Pose, obstacles: &[Segment], config: &SensorConfig) -> SensorReading {
    let distances = rays(pose, config)
        .iter()
        .map(|ray| ray.nearest_hit(obstacles))
        .collect();
    SensorReading { distances, max_length: config.max_length }
}
