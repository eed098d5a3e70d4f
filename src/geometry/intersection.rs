//! Parametric line-segment intersection

use glam::DVec2;

/// Interior crossing of segments `p0 → p0 + s1` and `p2 → p2 + s2`
///
/// Solves `p0 + t·s1 = p2 + s·s2` and reports a crossing only for strictly
/// interior parameters, so segments that merely share an endpoint never
/// intersect.
///
/// Parallel and collinear segments have a zero denominator and are reported as
/// not intersecting, even when they overlap along a shared line.
pub fn line_intersection(p0: DVec2, s1: DVec2, p2: DVec2, s2: DVec2) -> Option<DVec2> {
    let denominator = s1.perp_dot(s2);
    if denominator == 0.0 {
        return None;
    }

    let offset = p0 - p2;
    let s = s1.perp_dot(offset) / denominator;
    let t = s2.perp_dot(offset) / denominator;

    let interior = |value: f64| value > 0.0 && value < 1.0;
    (interior(s) && interior(t)).then(|| p0 + s1 * t)
}
