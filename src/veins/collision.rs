//! Breadth-first self-intersection detection across all primary veins

use crate::geometry::intersection::line_intersection;
use crate::veins::segment::Segment;
use glam::DVec2;

// Same-vein segments closer than this share an endpoint rather than cross
const ADJACENT_GENERATION_SPAN: u32 = 2;

/// Finds the shallowest genuine crossing between any two segments of a network
///
/// Segments are visited level by level across every vein at once. Each newly
/// visited segment is tested against all previously visited ones before the
/// traversal descends, so a crossing near the roots is reported without ever
/// touching the deeper generations.
#[derive(Debug, Default, Clone, Copy)]
pub struct CollisionDetector;

impl CollisionDetector {
    /// First crossing point in traversal order, if any
    pub fn detect(roots: &[Segment]) -> Option<DVec2> {
        let mut accumulator: Vec<&Segment> = Vec::new();
        let mut frontier: Vec<&Segment> = roots.iter().collect();

        while !frontier.is_empty() {
            let mut next_frontier = Vec::new();
            for &segment in &frontier {
                for &visited in &accumulator {
                    if Self::are_adjacent(segment, visited) {
                        continue;
                    }
                    if let Some(point) = segment_intersection(segment, visited) {
                        return Some(point);
                    }
                }
                accumulator.push(segment);
                next_frontier.extend(segment.children.iter());
            }
            frontier = next_frontier;
        }

        None
    }

    /// Whether two segments of the same vein are too close in the chain to cross
    pub const fn are_adjacent(a: &Segment, b: &Segment) -> bool {
        a.root_index == b.root_index
            && a.generation.abs_diff(b.generation) < ADJACENT_GENERATION_SPAN
    }
}

/// Interior crossing point of two segments
pub fn segment_intersection(a: &Segment, b: &Segment) -> Option<DVec2> {
    line_intersection(a.position, a.extent(), b.position, b.extent())
}
