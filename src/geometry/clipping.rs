//! Half-plane clipping of arbitrary simple polygons
//!
//! Clipping a concave polygon can split it into several pieces. Each piece is
//! returned as its own ring, rebuilt by pairing the boundary's crossings along
//! the clip line, so no edge of the result runs outside the input.

use crate::geometry::polygon::Polygon;
use crate::io::configuration::GEOMETRY_EPSILON;
use glam::DVec2;

/// Closed half-plane `{x : (x - origin)·normal <= 0}`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfPlane {
    /// Any point on the boundary line
    pub origin: DVec2,
    /// Outward normal; points on this side are removed
    pub normal: DVec2,
}

impl HalfPlane {
    /// Points at least as close to `keep` as to `other`
    pub fn bisector(keep: DVec2, other: DVec2) -> Self {
        Self {
            origin: (keep + other) * 0.5,
            normal: other - keep,
        }
    }

    /// Unnormalized signed distance; non-positive values are kept
    pub fn side(&self, point: DVec2) -> f64 {
        (point - self.origin).dot(self.normal)
    }

    /// Coordinate of a point along the boundary line
    fn along(&self, point: DVec2) -> f64 {
        self.normal.perp().dot(point)
    }

    fn crossing(&self, start: DVec2, end: DVec2) -> DVec2 {
        let (start_side, end_side) = (self.side(start), self.side(end));
        start.lerp(end, start_side / (start_side - end_side))
    }
}

/// Boundary run that enters the half-plane, stays inside, then leaves it
struct Chain {
    points: Vec<DVec2>,
}

impl Chain {
    fn entry(&self) -> Option<DVec2> {
        self.points.first().copied()
    }

    fn exit(&self) -> Option<DVec2> {
        self.points.last().copied()
    }
}

/// Clip `polygon` to the half-plane, returning every remaining piece
///
/// A polygon entirely inside comes back unchanged as a single piece; one
/// entirely outside yields no pieces.
pub fn clip_polygon(polygon: &Polygon, plane: &HalfPlane) -> Vec<Polygon> {
    let points = polygon.points();
    let Some(start) = points.iter().position(|&point| plane.side(point) > 0.0) else {
        return if polygon.len() < 3 {
            Vec::new()
        } else {
            vec![polygon.clone()]
        };
    };

    let chains = collect_chains(points, start, plane);
    if chains.is_empty() {
        return Vec::new();
    }

    // Unpairable crossings only arise from boundary points on the clip line;
    // the chains are then joined in boundary order
    link_chains(&chains, plane).map_or_else(
        || {
            let joined = chains.into_iter().flat_map(|chain| chain.points).collect();
            finish_piece(joined).into_iter().collect()
        },
        |rings| rings.into_iter().filter_map(finish_piece).collect(),
    )
}

/// Clip `polygon` by every half-plane in turn
pub fn clip_by_all<'a>(
    polygon: &Polygon,
    planes: impl IntoIterator<Item = &'a HalfPlane>,
) -> Vec<Polygon> {
    let mut pieces = vec![polygon.clone()];
    for plane in planes {
        if pieces.is_empty() {
            break;
        }
        pieces = pieces
            .iter()
            .flat_map(|piece| clip_polygon(piece, plane))
            .collect();
    }
    pieces
}

/// Drop consecutive coincident points, including across the closing edge
pub fn dedup_vertices(mut points: Vec<DVec2>) -> Vec<DVec2> {
    let tolerance = GEOMETRY_EPSILON * GEOMETRY_EPSILON;
    points.dedup_by(|next, previous| next.distance_squared(*previous) < tolerance);
    while points.len() > 1 {
        match (points.first(), points.last()) {
            (Some(first), Some(last)) if first.distance_squared(*last) < tolerance => {
                points.pop();
            }
            _ => break,
        }
    }
    points
}

// Walk starts at an outside vertex, so every chain is complete
fn collect_chains(points: &[DVec2], start: usize, plane: &HalfPlane) -> Vec<Chain> {
    let mut chains = Vec::new();
    let mut current: Option<Vec<DVec2>> = None;
    let ring = points.iter().chain(points).copied().skip(start);

    for (from, to) in ring.clone().zip(ring.skip(1)).take(points.len()) {
        let from_inside = plane.side(from) <= 0.0;
        let to_inside = plane.side(to) <= 0.0;
        match (from_inside, to_inside) {
            (false, true) => current = Some(vec![plane.crossing(from, to), to]),
            (true, true) => {
                if let Some(chain) = current.as_mut() {
                    chain.push(to);
                }
            }
            (true, false) => {
                if let Some(mut chain) = current.take() {
                    chain.push(plane.crossing(from, to));
                    let chain = dedup_open(chain);
                    // A vertex touching the line from outside leaves a single point
                    if chain.len() > 1 {
                        chains.push(Chain { points: chain });
                    }
                }
            }
            (false, false) => {}
        }
    }
    chains
}

// Inside intervals of the clip line pair up consecutive crossings
fn link_chains(chains: &[Chain], plane: &HalfPlane) -> Option<Vec<Vec<DVec2>>> {
    let mut crossings: Vec<(f64, usize, bool)> = Vec::with_capacity(chains.len() * 2);
    for (index, chain) in chains.iter().enumerate() {
        crossings.push((plane.along(chain.entry()?), index, true));
        crossings.push((plane.along(chain.exit()?), index, false));
    }
    crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut next = vec![None; chains.len()];
    for pair in crossings.chunks(2) {
        match pair {
            [(_, exit, false), (_, entry, true)] | [(_, entry, true), (_, exit, false)] => {
                *next.get_mut(*exit)? = Some(*entry);
            }
            _ => return None,
        }
    }

    let mut visited = vec![false; chains.len()];
    let mut rings = Vec::new();
    for first in 0..chains.len() {
        if visited.get(first).copied().unwrap_or(true) {
            continue;
        }
        let mut ring = Vec::new();
        let mut current = first;
        loop {
            *visited.get_mut(current)? = true;
            ring.extend_from_slice(&chains.get(current)?.points);
            current = (*next.get(current)?)?;
            if current == first {
                break;
            }
            if visited.get(current).copied().unwrap_or(true) {
                return None;
            }
        }
        rings.push(ring);
    }
    Some(rings)
}

fn dedup_open(mut points: Vec<DVec2>) -> Vec<DVec2> {
    let tolerance = GEOMETRY_EPSILON * GEOMETRY_EPSILON;
    points.dedup_by(|next, previous| next.distance_squared(*previous) < tolerance);
    points
}

fn finish_piece(points: Vec<DVec2>) -> Option<Polygon> {
    let piece = Polygon::new(dedup_vertices(points));
    (piece.len() >= 3 && piece.area() >= GEOMETRY_EPSILON).then_some(piece)
}
