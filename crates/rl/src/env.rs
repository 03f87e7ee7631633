//! Collaborators the control loop drives.
//!
//! [`DrivingWorld`] is everything the loop needs from the outside: where the
//! body is, what it can hit, how to apply an action and whether the body is
//! still on the track. [`CarTrackEnv`] is the ready-made world built from a
//! [`KinematicCar`] and a set of road-side segments.

use physics::{ActionSpace, KinematicCar, Pose, Segment};

use crate::policy::ActionIndex;

/// Whether the body is still within the track after an action.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Adherence {
    OnTrack,
    /// Left the track; the world is reset after the reward is taken.
    OffTrack,
    /// Continuous signal in `[-1, 1]`; negative is bad. Never triggers a reset.
    Score(f32),
}

/// The world seen by [`crate::Driver`].
pub trait DrivingWorld {
    /// Pose of the controlled body, refreshed every tick.
    fn pose(&self) -> Pose;

    /// Static boundary segments for this tick.
    fn obstacles(&self) -> &[Segment];

    /// Number of actions [`DrivingWorld::actuate`] understands.
    fn action_count(&self) -> usize;

    /// Applies `action` and advances the body.
    fn actuate(&mut self, action: ActionIndex);

    fn adherence(&self) -> Adherence;

    /// Puts the body back at its start.
    fn reset(&mut self);
}

/// A kinematic car on a track of road sides.
#[derive(Clone, Debug)]
pub struct CarTrackEnv {
    car: KinematicCar,
    actions: ActionSpace,
    obstacles: Vec<Segment>,
}

impl CarTrackEnv {
    #[must_use]
    pub fn new(car: KinematicCar, actions: ActionSpace, obstacles: Vec<Segment>) -> Self {
        Self { car, actions, obstacles }
    }

    #[must_use]
    pub fn car(&self) -> &KinematicCar {
        &self.car
    }

    #[must_use]
    pub fn actions(&self) -> ActionSpace {
        self.actions
    }

    /// Swaps in a new track and puts the car back at its spawn.
    pub fn set_obstacles(&mut self, obstacles: Vec<Segment>) {
        self.obstacles = obstacles;
        self.car.reset();
    }
}

impl DrivingWorld for CarTrackEnv {
    fn pose(&self) -> Pose {
        self.car.pose()
    }

    fn obstacles(&self) -> &[Segment] {
        &self.obstacles
    }

    fn action_count(&self) -> usize {
        self.actions.len()
    }

    fn actuate(&mut self, action: ActionIndex) {
        match self.actions.command(action.index()) {
            Ok(command) => self.car.step(command),
            Err(err) => tracing::warn!(%err, "ignoring action"),
        }
    }

    fn adherence(&self) -> Adherence {
        if self.car.overlaps(&self.obstacles) {
            Adherence::OffTrack
        } else {
            Adherence::OnTrack
        }
    }

    fn reset(&mut self) {
        self.car.reset();
    }
}
