//! # Online Driving Agent
//!
//! Ties sensing, decision and learning into a single control loop.
//!
//! - [`Policy`] turns a [`physics::SensorReading`] into an [`ActionIndex`],
//!   with epsilon-style exploration and an optional [`SecondGuess`].
//! - [`Trainer`] fits the policy online toward a target built by the chosen
//!   [`TargetStrategy`].
//! - [`Driver`] runs one tick at a time against any [`DrivingWorld`];
//!   [`CarTrackEnv`] is the stock world of a [`physics::KinematicCar`] among
//!   road-side segments.
//! - [`DriverConfig`] describes all of the above as serde data.

pub mod config;
pub mod driver;
pub mod env;
pub mod error;
pub mod policy;
pub mod reward;
pub mod trainer;

pub use config::{ActionSetting, CarSettings, DriverConfig, FanSetting, SensorSettings};
pub use driver::{DriveStats, Driver, TickReport};
pub use env::{Adherence, CarTrackEnv, DrivingWorld};
pub use error::{RlError, TrainError};
pub use policy::{ActionIndex, Policy, SecondGuess};
pub use reward::{Exploration, RewardShaping};
pub use trainer::{build_target, Target, TargetStrategy, Trainer, TrainingSample};
