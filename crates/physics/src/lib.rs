#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Planar Physics and Sensing
//!
//! The geometric layer of the driving agent. It knows nothing about learning;
//! it answers two questions for the layers above it: *how far can the car see
//! along each ray*, and *where does the car end up after a command*.
//!
//! ## Key Components
//!
//! -   **Geometry:** [`intersect`] solves a segment/segment crossing with the
//!     parametric determinant method. Parallel pairs are a miss, never an
//!     error.
//! -   **Sensing:** [`cast_sensors`] sweeps a fan of rays configured by a
//!     [`SensorConfig`] from a point just ahead of a [`Pose`] and returns a
//!     [`SensorReading`] with one clamped distance per ray.
//! -   **Body:** [`KinematicCar`] is a velocity-controlled rectangle driven by
//!     [`Command`]s. [`ActionSpace`] maps discrete action indices to commands.
//!
//! ## Usage
//!
//! ```rust
//! use glam::Vec2;
//! use physics::{cast_sensors, Pose, Segment, SensorConfig};
//!
//! let wall = Segment::new(Vec2::new(100.0, -50.0), Vec2::new(100.0, 50.0));
//! let pose = Pose::new(Vec2::ZERO, 0.0);
//! let config = SensorConfig::new(1, 0.0, 300.0)?.with_front_offset(0.0)?;
//! let reading = cast_sensors(&pose, &[wall], &config);
//! assert!((reading[0] - 100.0).abs() < 1e-3);
//! # Ok::<(), physics::PhysicsError>(())
//! ```

pub mod car;
pub mod error;
pub mod geometry;
pub mod sensor;
pub mod types;

pub use car::{ActionSpace, CarParams, Command, KinematicCar, Steer, Throttle};
pub use error::PhysicsError;
pub use geometry::intersect;
pub use sensor::{cast_sensors, ray_angles, rays, FanOrder, SensorConfig, SensorReading};
pub use types::{rectangle_edges, Pose, Ray, Segment};
