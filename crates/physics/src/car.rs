//! Kinematic car body
//!
//! A rigid rectangle driven by direct velocity control. It reproduces the
//! simulator's handling model: accelerating snaps the velocity to the heading,
//! letting go bleeds speed through air friction, and the turn rate is scaled
//! down at low speed so a parked car cannot spin in place.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;

use crate::error::PhysicsError;
use crate::types::{rectangle_edges, Pose, Segment};

/// Handling and body parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct CarParams {
    /// Acceleration setting; the commanded speed is `speed * 10` per step.
    pub speed: f32,
    /// Maximum heading change per step, in radians.
    pub turn_speed: f32,
    /// Speed below which the turn rate is scaled down linearly.
    pub min_turn_speed: f32,
    /// Fraction of velocity lost per step while coasting.
    pub air_friction: f32,
    /// Body length along the heading.
    pub length: f32,
    /// Body width across the heading.
    pub width: f32,
}

impl Default for CarParams {
    fn default() -> Self {
        Self {
            speed: 0.5,
            turn_speed: 0.05,
            min_turn_speed: 10.0,
            air_friction: 0.1,
            length: 80.0,
            width: 40.0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Steer {
    Left,
    Straight,
    Right,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Throttle {
    Accelerate,
    Coast,
    Reverse,
}

/// One control input for a single step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Command {
    pub steer: Steer,
    pub throttle: Throttle,
}

impl Command {
    #[must_use]
    pub const fn new(steer: Steer, throttle: Throttle) -> Self {
        Self { steer, throttle }
    }
}

const STEERING: [Command; 3] = [
    Command::new(Steer::Left, Throttle::Accelerate),
    Command::new(Steer::Straight, Throttle::Accelerate),
    Command::new(Steer::Right, Throttle::Accelerate),
];

const STEERING_THROTTLE: [Command; 6] = [
    Command::new(Steer::Left, Throttle::Accelerate),
    Command::new(Steer::Straight, Throttle::Accelerate),
    Command::new(Steer::Right, Throttle::Accelerate),
    Command::new(Steer::Left, Throttle::Coast),
    Command::new(Steer::Straight, Throttle::Coast),
    Command::new(Steer::Right, Throttle::Coast),
];

/// Mapping from a discrete action index to a [`Command`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ActionSpace {
    /// Left, straight, right; always accelerating.
    #[default]
    Steering,
    /// The three steering choices, each either accelerating or coasting.
    SteeringThrottle,
}

impl ActionSpace {
    #[must_use]
    pub fn commands(self) -> &'static [Command] {
        match self {
            ActionSpace::Steering => &STEERING,
            ActionSpace::SteeringThrottle => &STEERING_THROTTLE,
        }
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.commands().len()
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.commands().is_empty()
    }

    /// # Errors
    ///
    /// Returns [`PhysicsError::ActionOutOfRange`] when `index >= self.len()`.
    pub fn command(self, index: usize) -> Result<Command, PhysicsError> {
        self.commands()
            .get(index)
            .copied()
            .ok_or(PhysicsError::ActionOutOfRange { index, count: self.len() })
    }
}

/// A car moved one step at a time by [`Command`]s.
#[derive(Clone, Debug)]
pub struct KinematicCar {
    pub params: CarParams,
    pose: Pose,
    velocity: Vec2,
    spawn: Pose,
}

impl KinematicCar {
    /// Spawn point used by the track editor.
    pub const DEFAULT_SPAWN: Vec2 = Vec2::new(400.0, 300.0);
    /// Facing up the screen.
    pub const DEFAULT_HEADING: f32 = -FRAC_PI_2;

    #[must_use]
    pub fn new(params: CarParams, spawn: Pose) -> Self {
        Self { params, pose: spawn, velocity: Vec2::ZERO, spawn }
    }

    #[must_use]
    pub fn pose(&self) -> Pose {
        self.pose
    }

    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Puts the car back at its spawn pose, at rest.
    pub fn reset(&mut self) {
        self.pose = self.spawn;
        self.velocity = Vec2::ZERO;
    }

    /// Advances the body by one step under `command`.
    pub fn step(&mut self, command: Command) {
        let forward = self.pose.forward();
        let commanded = self.params.speed * 10.0;
        match command.throttle {
            Throttle::Accelerate => self.velocity = forward * commanded,
            Throttle::Reverse => self.velocity = -forward * commanded,
            Throttle::Coast => self.velocity *= 1.0 - self.params.air_friction,
        }

        let speed = self.velocity.length();
        let turn_rate = if speed > 0.1 {
            let factor = (speed / self.params.min_turn_speed).min(1.0);
            match command.steer {
                Steer::Left => -self.params.turn_speed * factor,
                Steer::Straight => 0.0,
                Steer::Right => self.params.turn_speed * factor,
            }
        } else {
            0.0
        };

        self.pose.position += self.velocity;
        self.pose.heading += turn_rate;
        self.pose.speed = speed;
    }

    /// Edges of the body rectangle at the current pose.
    #[must_use]
    pub fn outline(&self) -> [Segment; 4] {
        let (length, width) = (self.params.length, self.params.width);
        rectangle_edges(self.pose.position, length, width, self.pose.heading)
    }

    /// Whether any body edge crosses an obstacle segment.
    #[must_use]
    pub fn overlaps(&self, obstacles: &[Segment]) -> bool {
        let outline = self.outline();
        outline
            .iter()
            .any(|edge| obstacles.iter().any(|seg| edge.intersects(seg)))
    }
}

impl Default for KinematicCar {
    fn default() -> Self {
        Self::new(
            CarParams::default(),
            Pose::new(Self::DEFAULT_SPAWN, Self::DEFAULT_HEADING),
        )
    }
}
