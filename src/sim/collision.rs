//! Collision detection and response against the boundary edges
//!
//! Only the single nearest edge is considered each tick. The ball is far
//! smaller than the square, so it is assumed to threaten at most one edge at
//! a time; near a vertex this can pick either adjacent edge.

use glam::DVec2;

use super::boundary::Edge;
use super::segment::closest_point;
use super::state::Body;
use super::vector::{distance, dot, magnitude, normalize, perpendicular};
use crate::consts::{CONTACT_BUFFER, PUSH_OUT_MARGIN};

/// The edge closest to a point, with the contact normal toward that point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestEdge {
    /// Index into the edge array
    pub edge_index: usize,
    /// Closest point on the edge
    pub point: DVec2,
    /// Distance from the query point to `point`
    pub distance: f64,
    /// Unit normal pointing from the edge toward the query point
    pub normal: DVec2,
}

/// A resolved contact (for logging and inspection)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub edge_index: usize,
    pub normal: DVec2,
    /// Center-to-edge distance when the contact was detected
    pub distance: f64,
    pub velocity_before: DVec2,
    pub velocity_after: DVec2,
    /// How far the body was pushed along the normal (0 if it was not overlapping)
    pub push_out: f64,
}

/// Find the edge nearest to `position`
///
/// Ties keep the lowest edge index. Returns `None` only when no distance
/// compares below infinity (empty input or non-finite position).
pub fn nearest_edge(position: DVec2, edges: &[Edge]) -> Option<NearestEdge> {
    let mut best: Option<NearestEdge> = None;
    let mut min_distance = f64::INFINITY;

    for (edge_index, edge) in edges.iter().enumerate() {
        let point = closest_point(position, edge.start, edge.end);
        let dist = distance(position, point);

        if dist < min_distance {
            min_distance = dist;

            let normal = if dist > 0.0 {
                (position - point) / dist
            } else {
                // Center sits on the edge: fall back to the edge perpendicular
                normalize(perpendicular(edge.delta()))
            };

            best = Some(NearestEdge {
                edge_index,
                point,
                distance: dist,
                normal,
            });
        }
    }

    best
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: DVec2, normal: DVec2) -> DVec2 {
    velocity - 2.0 * dot(velocity, normal) * normal
}

/// Rescale `velocity` to the given speed; a zero vector is returned unchanged
#[inline]
pub fn rescale_to_speed(velocity: DVec2, speed: f64) -> DVec2 {
    let current = magnitude(velocity);
    if current == 0.0 {
        return velocity;
    }
    velocity * speed / current
}

/// Resolve a body against the boundary edges, returning the contact if one fired
///
/// Contact fires when the nearest edge is closer than `radius + CONTACT_BUFFER`.
/// The velocity is reflected about the contact normal and rescaled to the
/// body's reference speed. An overlapping body is pushed out along the normal
/// by the overlap plus `PUSH_OUT_MARGIN`.
pub fn resolve_contact(body: &mut Body, edges: &[Edge]) -> Option<Contact> {
    let nearest = nearest_edge(body.position, edges)?;

    if nearest.distance >= body.radius + CONTACT_BUFFER {
        return None;
    }

    let velocity_before = body.velocity;
    let reflected = reflect_velocity(body.velocity, nearest.normal);
    body.velocity = rescale_to_speed(reflected, body.reference_speed);

    let overlap = body.radius - nearest.distance;
    let push_out = if overlap > 0.0 {
        let push = overlap + PUSH_OUT_MARGIN;
        body.position += nearest.normal * push;
        push
    } else {
        0.0
    };

    Some(Contact {
        edge_index: nearest.edge_index,
        normal: nearest.normal,
        distance: nearest.distance,
        velocity_before,
        velocity_after: body.velocity,
        push_out,
    })
}

/// Resolve a body against the boundary edges
///
/// Returns whether a correction was applied.
#[inline]
pub fn resolve(body: &mut Body, edges: &[Edge]) -> bool {
    resolve_contact(body, edges).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::boundary::{edges_of, square_vertices};
    use crate::sim::state::Color;

    /// Axis-aligned square spanning [0, 100] x [0, 100]
    fn unit_box_edges() -> [Edge; 4] {
        edges_of(&[
            DVec2::new(0.0, 0.0),
            DVec2::new(100.0, 0.0),
            DVec2::new(100.0, 100.0),
            DVec2::new(0.0, 100.0),
        ])
    }

    fn body_at(position: DVec2, velocity: DVec2) -> Body {
        Body::new(position, velocity, 10.0, Color::YELLOW)
    }

    #[test]
    fn test_nearest_edge_picks_closest() {
        let edges = unit_box_edges();
        let nearest = nearest_edge(DVec2::new(50.0, 12.0), &edges).unwrap();
        assert_eq!(nearest.edge_index, 0);
        assert_eq!(nearest.point, DVec2::new(50.0, 0.0));
        assert_eq!(nearest.distance, 12.0);
        assert_eq!(nearest.normal, DVec2::new(0.0, 1.0));
    }

    #[test]
    fn test_nearest_edge_tie_keeps_first() {
        let edges = unit_box_edges();
        // Equidistant from all four edges
        let nearest = nearest_edge(DVec2::new(50.0, 50.0), &edges).unwrap();
        assert_eq!(nearest.edge_index, 0);
    }

    #[test]
    fn test_zero_distance_uses_edge_perpendicular() {
        let edges = unit_box_edges();
        let nearest = nearest_edge(DVec2::new(40.0, 0.0), &edges).unwrap();
        assert_eq!(nearest.distance, 0.0);
        // Edge 0 runs +x, its perpendicular (-dy, dx) is +y (into the box)
        assert_eq!(nearest.normal, DVec2::new(0.0, 1.0));
    }

    #[test]
    fn test_nearest_edge_empty() {
        assert!(nearest_edge(DVec2::ZERO, &[]).is_none());
    }

    #[test]
    fn test_no_contact_outside_threshold() {
        let edges = unit_box_edges();
        let mut body = body_at(DVec2::new(50.0, 11.0), DVec2::new(0.0, -3.0));
        let before = body.clone();
        assert!(!resolve(&mut body, &edges));
        assert_eq!(body.position, before.position);
        assert_eq!(body.velocity, before.velocity);
    }

    #[test]
    fn test_contact_inside_buffer_reflects_without_push() {
        let edges = unit_box_edges();
        // 10.5 from the edge: inside radius + 1, but not overlapping
        let mut body = body_at(DVec2::new(50.0, 10.5), DVec2::new(2.0, -3.0));
        let contact = resolve_contact(&mut body, &edges).unwrap();
        assert_eq!(contact.push_out, 0.0);
        assert_eq!(body.position, DVec2::new(50.0, 10.5));
        assert!((body.velocity - DVec2::new(2.0, 3.0)).length() < 1e-12);
    }

    #[test]
    fn test_overlap_pushes_out_by_overlap_plus_margin() {
        let edges = unit_box_edges();
        let mut body = body_at(DVec2::new(50.0, 4.0), DVec2::new(0.0, -5.0));
        let contact = resolve_contact(&mut body, &edges).unwrap();
        assert_eq!(contact.push_out, 7.0);
        assert_eq!(body.position, DVec2::new(50.0, 11.0));
        assert_eq!(body.velocity, DVec2::new(0.0, 5.0));
    }

    #[test]
    fn test_reflection_law() {
        let edges = unit_box_edges();
        let velocity = DVec2::new(3.0, -4.0);
        let mut body = body_at(DVec2::new(30.0, 9.0), velocity);
        let contact = resolve_contact(&mut body, &edges).unwrap();

        let n = contact.normal;
        let t = perpendicular(n);
        assert!((dot(body.velocity, n) + dot(velocity, n)).abs() < 1e-12);
        assert!((dot(body.velocity, t) - dot(velocity, t)).abs() < 1e-12);
    }

    #[test]
    fn test_speed_restored_to_reference() {
        let edges = unit_box_edges();
        let mut body = body_at(DVec2::new(50.0, 5.0), DVec2::new(3.0, -4.0));
        // Drifted speed gets pulled back to the reference speed on contact
        body.velocity *= 1.25;
        assert!(resolve(&mut body, &edges));
        assert!((body.speed() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_rescale_zero_velocity_is_skipped() {
        assert_eq!(rescale_to_speed(DVec2::ZERO, 5.0), DVec2::ZERO);
    }

    #[test]
    fn test_reflect_velocity() {
        // Ball moving right, hits vertical wall (normal pointing left)
        let reflected = reflect_velocity(DVec2::new(100.0, 0.0), DVec2::new(-1.0, 0.0));
        assert_eq!(reflected, DVec2::new(-100.0, 0.0));
    }

    #[test]
    fn test_corner_approach_resolves_against_one_edge() {
        let edges = edges_of(&square_vertices(DVec2::ZERO, 100.0, 45.0));
        // Near the bottom-left corner, slightly closer to the left edge
        let inradius = 100.0 / std::f64::consts::SQRT_2;
        let mut body = body_at(
            DVec2::new(-inradius + 6.0, -inradius + 7.0),
            DVec2::new(-3.0, -3.0),
        );
        let contact = resolve_contact(&mut body, &edges).unwrap();
        // Left edge normal points +x
        assert!((contact.normal - DVec2::new(1.0, 0.0)).length() < 1e-9);
        assert!(body.velocity.x > 0.0);
        assert!(body.velocity.y < 0.0);
    }
}
