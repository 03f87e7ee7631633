//! Ray/segment intersection.

use glam::Vec2;

/// Intersection point of segment `ray_start → ray_end` with segment
/// `seg_start → seg_end`, solved with the parametric determinant form.
///
/// Returns `None` when the lines are parallel (`denom == 0`, compared exactly)
/// or when either parameter falls outside `[0, 1]`. Near-parallel pairs can
/// miss; callers treat a miss as the ray reaching full length.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn intersect(ray_start: Vec2, ray_end: Vec2, seg_start: Vec2, seg_end: Vec2) -> Option<Vec2> {
    let (x1, y1) = (ray_start.x, ray_start.y);
    let (x2, y2) = (ray_end.x, ray_end.y);
    let (x3, y3) = (seg_start.x, seg_start.y);
    let (x4, y4) = (seg_end.x, seg_end.y);

    let denom = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
    if denom == 0.0 {
        return None;
    }

    let t = ((x1 - x3) * (y3 - y4) - (y1 - y3) * (x3 - x4)) / denom;
    let u = -((x1 - x2) * (y1 - y3) - (y1 - y2) * (x1 - x3)) / denom;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(Vec2::new(x1 + t * (x2 - x1), y1 + t * (y2 - y1)))
    } else {
        None
    }
}
