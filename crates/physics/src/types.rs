//! # Planar Types
//!
//! Value types shared by the geometry, sensing and body modules. Positions use
//! [`glam::Vec2`]; angles are radians measured from the +x axis, with +y
//! pointing down the screen the way the track editor lays things out.

use glam::Vec2;

use crate::geometry::intersect;

/// Position, heading and forward speed of the controlled body.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec2,
    /// Heading in radians.
    pub heading: f32,
    /// Forward velocity magnitude.
    pub speed: f32,
}

impl Pose {
    #[must_use]
    pub const fn new(position: Vec2, heading: f32) -> Self {
        Self { position, heading, speed: 0.0 }
    }

    /// Unit vector along the heading.
    #[must_use]
    pub fn forward(&self) -> Vec2 {
        Vec2::from_angle(self.heading)
    }

    /// Point `offset` units ahead of the pose along its heading.
    #[must_use]
    pub fn ahead(&self, offset: f32) -> Vec2 {
        self.position + self.forward() * offset
    }
}

/// One edge of a static boundary.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    #[must_use]
    pub const fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Whether the two segments cross or touch.
    #[must_use]
    pub fn intersects(&self, other: &Segment) -> bool {
        intersect(self.start, self.end, other.start, other.end).is_some()
    }
}

/// Closed polygon edges of a `length` × `width` rectangle centred at `center`
/// and rotated by `angle`.
#[must_use]
pub fn rectangle_edges(center: Vec2, length: f32, width: f32, angle: f32) -> [Segment; 4] {
    let half_x = Vec2::from_angle(angle) * (length * 0.5);
    let half_y = Vec2::from_angle(angle).perp() * (width * 0.5);
    let corners = [
        center - half_x - half_y,
        center + half_x - half_y,
        center + half_x + half_y,
        center - half_x + half_y,
    ];
    [
        Segment::new(corners[0], corners[1]),
        Segment::new(corners[1], corners[2]),
        Segment::new(corners[2], corners[3]),
        Segment::new(corners[3], corners[0]),
    ]
}

/// A sensing ray. Built per cast and dropped right after.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec2,
    /// Direction in radians.
    pub angle: f32,
    pub max_length: f32,
}

impl Ray {
    #[must_use]
    pub const fn new(origin: Vec2, angle: f32, max_length: f32) -> Self {
        Self { origin, angle, max_length }
    }

    /// Far end of the ray at full length.
    #[must_use]
    pub fn end(&self) -> Vec2 {
        self.origin + Vec2::from_angle(self.angle) * self.max_length
    }

    /// Distance from the origin to the nearest segment hit, or `max_length`
    /// when nothing is hit.
    #[must_use]
    pub fn nearest_hit(&self, obstacles: &[Segment]) -> f32 {
        let end = self.end();
        obstacles
            .iter()
            .filter_map(|seg| intersect(self.origin, end, seg.start, seg.end))
            .map(|hit| hit.distance(self.origin))
            .fold(self.max_length, f32::min)
            .clamp(0.0, self.max_length)
    }
}
