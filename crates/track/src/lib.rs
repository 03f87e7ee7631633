#![deny(clippy::all, clippy::pedantic)]
//! Road-side tracks.
//!
//! A track is an ordered list of [`RoadSide`]s, each a `length × ROAD_WIDTH`
//! rectangle centred at `position` and rotated by `angle` (radians). On disk
//! it is a bare JSON array:
//!
//! ```json
//! [{ "position": { "x": 400.0, "y": 250.0 }, "length": 120.0, "angle": 1.57 }]
//! ```
//!
//! [`Track::segments`] flattens the sides into the obstacle segments the
//! sensors and the car collide with.

mod error;

use std::f32::consts::TAU;
use std::fs;
use std::path::Path;

use glam::Vec2;
use physics::{rectangle_edges, KinematicCar, Segment};
use serde::{Deserialize, Serialize};

pub use error::TrackError;

/// Thickness of every road side.
pub const ROAD_WIDTH: f32 = 20.0;
/// Drags shorter than this are discarded by [`Track::add_side_between`].
pub const MIN_SIDE_LENGTH: f32 = 50.0;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl From<Vec2> for Point {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Point> for Vec2 {
    fn from(p: Point) -> Self {
        Vec2::new(p.x, p.y)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoadSide {
    pub position: Point,
    pub length: f32,
    pub angle: f32,
}

impl RoadSide {
    /// Side spanning the drag from `start` to `end`.
    #[must_use]
    pub fn between(start: Vec2, end: Vec2) -> Self {
        let delta = end - start;
        Self {
            position: ((start + end) * 0.5).into(),
            length: delta.length(),
            angle: delta.y.atan2(delta.x),
        }
    }

    #[must_use]
    pub fn edges(&self) -> [Segment; 4] {
        rectangle_edges(self.position.into(), self.length, ROAD_WIDTH, self.angle)
    }

    fn check(&self, index: usize) -> Result<(), TrackError> {
        let finite = [self.position.x, self.position.y, self.length, self.angle]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(TrackError::InvalidSide { index, reason: "non-finite value" });
        }
        if self.length <= 0.0 {
            return Err(TrackError::InvalidSide { index, reason: "length must be positive" });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Track {
    sides: Vec<RoadSide>,
}

impl Track {
    #[must_use]
    pub fn new(sides: Vec<RoadSide>) -> Self {
        Self { sides }
    }

    #[must_use]
    pub fn sides(&self) -> &[RoadSide] {
        &self.sides
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sides.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sides.is_empty()
    }

    /// Parses a JSON array of road sides.
    ///
    /// # Errors
    ///
    /// [`TrackError::Json`] on malformed input, [`TrackError::InvalidSide`]
    /// for non-finite values or non-positive lengths.
    pub fn from_json(json: &str) -> Result<Self, TrackError> {
        let track: Track = serde_json::from_str(json)?;
        for (index, side) in track.sides.iter().enumerate() {
            side.check(index)?;
        }
        Ok(track)
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// [`TrackError::Json`] if serialisation fails.
    pub fn to_json(&self) -> Result<String, TrackError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// # Errors
    ///
    /// [`TrackError::Io`] when the file cannot be read, otherwise as
    /// [`Track::from_json`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TrackError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|source| TrackError::Io { path: path.to_path_buf(), source })?;
        let track = Self::from_json(&json)?;
        tracing::info!(sides = track.len(), path = %path.display(), "track loaded");
        Ok(track)
    }

    /// # Errors
    ///
    /// [`TrackError::Io`] when the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), TrackError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        fs::write(path, json)
            .map_err(|source| TrackError::Io { path: path.to_path_buf(), source })?;
        tracing::info!(sides = self.len(), path = %path.display(), "track saved");
        Ok(())
    }

    /// Adds the side dragged from `start` to `end` unless it is shorter than
    /// [`MIN_SIDE_LENGTH`]. Returns whether it was kept.
    pub fn add_side_between(&mut self, start: Vec2, end: Vec2) -> bool {
        let side = RoadSide::between(start, end);
        if side.length < MIN_SIDE_LENGTH {
            tracing::debug!(length = side.length, "road side too short; discarded");
            return false;
        }
        self.sides.push(side);
        true
    }

    /// Removes and returns the most recent side.
    pub fn undo(&mut self) -> Option<RoadSide> {
        self.sides.pop()
    }

    /// Four edges per side, in side order.
    #[must_use]
    pub fn segments(&self) -> Vec<Segment> {
        self.sides.iter().flat_map(RoadSide::edges).collect()
    }

    /// Closed elliptical circuit whose right-hand straight runs vertically
    /// through [`KinematicCar::DEFAULT_SPAWN`], so a freshly spawned car
    /// starts mid-lane facing along it.
    #[must_use]
    pub fn builtin_oval() -> Self {
        const CORNERS: usize = 12;
        const LANE_HALF_WIDTH: f32 = 50.0;
        let radii = Vec2::new(150.0, 200.0);
        let centre = KinematicCar::DEFAULT_SPAWN - Vec2::new(radii.x, 0.0);

        let ring = |r: Vec2| -> Vec<Vec2> {
            (0..CORNERS)
                .map(|i| {
                    #[allow(clippy::cast_precision_loss)]
                    let theta = i as f32 * TAU / CORNERS as f32;
                    centre + Vec2::from_angle(theta) * r
                })
                .collect()
        };

        let mut sides = Vec::with_capacity(2 * CORNERS);
        for wall in [ring(radii - LANE_HALF_WIDTH), ring(radii + LANE_HALF_WIDTH)] {
            for (i, &start) in wall.iter().enumerate() {
                sides.push(RoadSide::between(start, wall[(i + 1) % wall.len()]));
            }
        }
        Self { sides }
    }
}
