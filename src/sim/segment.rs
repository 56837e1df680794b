//! Closest point on a line segment

use glam::DVec2;

use super::vector::dot;

/// Closest point on the segment `start..end` to `point`
///
/// Projects onto the infinite line and clamps the projection parameter to
/// `[0, 1]`, so endpoints are returned when the foot of the perpendicular falls
/// outside the segment. A zero-length segment returns `start`.
pub fn closest_point(point: DVec2, start: DVec2, end: DVec2) -> DVec2 {
    let line = end - start;
    let line_len_sq = dot(line, line);

    if line_len_sq == 0.0 {
        return start;
    }

    let t = (dot(point - start, line) / line_len_sq).clamp(0.0, 1.0);
    start + line * t
}
