//! Small 2D geometry helpers shared by the sweep
//!
//! Everything here operates on `glam::DVec2`; the sweep is defined entirely in
//! f64 to keep breakpoint positions stable near-degenerate configurations.

use glam::DVec2;

/// Rotate a vector 90 degrees counter-clockwise
///
/// The perpendicular of the separation between two foci is the direction their
/// shared Voronoi edge grows in. For a breakpoint with left focus `l` and right
/// focus `r`, `perpendicular(r - l)` is its direction of travel as the sweep
/// advances.
#[inline]
pub fn perpendicular(v: DVec2) -> DVec2 {
    DVec2::new(-v.y, v.x)
}

/// Intersect two rays, each given by an origin and a direction
///
/// Solves the 2x2 linear system for the crossing point of the underlying lines,
/// then rejects crossings that lie behind either ray's origin. The behind check
/// is done per axis and per ray: a mathematically valid *line* intersection that
/// is not a valid *ray* intersection would otherwise schedule spurious circle
/// events.
///
/// Returns `None` for parallel rays or behind-the-origin crossings.
pub fn ray_intersection(
    origin_a: DVec2,
    dir_a: DVec2,
    origin_b: DVec2,
    dir_b: DVec2,
) -> Option<DVec2> {
    let det = -dir_a.x * dir_b.y + dir_a.y * dir_b.x;
    if det == 0.0 {
        return None;
    }

    let delta = origin_b - origin_a;
    let t = (-delta.x * dir_b.y + delta.y * dir_b.x) / det;
    let hit = origin_a + dir_a * t;

    // Four sign checks: the hit must lie ahead of both origins on both axes.
    if (hit.x - origin_a.x) * dir_a.x < 0.0 || (hit.y - origin_a.y) * dir_a.y < 0.0 {
        return None;
    }
    if (hit.x - origin_b.x) * dir_b.x < 0.0 || (hit.y - origin_b.y) * dir_b.y < 0.0 {
        return None;
    }

    Some(hit)
}
