//! Simple polygons with the measurements cross-vein synthesis relies on
//!
//! Polygons are stored as open rings: the closing edge from the last point
//! back to the first is implicit. Orientation is preserved by every operation
//! but never required, so area-like quantities are reported as magnitudes.

use crate::geometry::intersection::line_intersection;
use crate::io::configuration::GEOMETRY_EPSILON;
use crate::io::error::{Result, geometry_error};
use glam::DVec2;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Minimum corner (inclusive)
    pub min: DVec2,
    /// Maximum corner (inclusive)
    pub max: DVec2,
}

impl Bounds {
    /// Smallest box containing every point, or `None` for an empty sequence
    pub fn from_points(points: impl IntoIterator<Item = DVec2>) -> Option<Self> {
        points.into_iter().fold(None, |bounds, point| {
            Some(match bounds {
                None => Self {
                    min: point,
                    max: point,
                },
                Some(Self { min, max }) => Self {
                    min: min.min(point),
                    max: max.max(point),
                },
            })
        })
    }

    /// Check if a point lies inside or on the box
    pub fn contains(&self, point: DVec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Width and height
    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    /// The box as a four-point polygon
    pub fn to_polygon(&self) -> Polygon {
        Polygon::rectangle(self.min, self.max)
    }
}

/// Closed polygon boundary stored as an open ring of points
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    points: Vec<DVec2>,
}

impl Polygon {
    /// Wrap a point sequence; the closing edge is implicit
    pub const fn new(points: Vec<DVec2>) -> Self {
        Self { points }
    }

    /// Axis-aligned rectangle spanning two corners
    pub fn rectangle(min: DVec2, max: DVec2) -> Self {
        Self::new(vec![
            min,
            DVec2::new(max.x, min.y),
            max,
            DVec2::new(min.x, max.y),
        ])
    }

    /// Boundary points without the repeated closing point
    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    /// Consume the polygon, returning its points
    pub fn into_points(self) -> Vec<DVec2> {
        self.points
    }

    /// Number of boundary points
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the polygon has no points at all
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Every edge as `(start, end)`, including the implicit closing edge
    pub fn edges(&self) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
        self.points
            .iter()
            .copied()
            .zip(self.points.iter().copied().cycle().skip(1))
    }

    /// Boundary points followed by the first point again, for polyline renderers
    pub fn closed_ring(&self) -> impl Iterator<Item = DVec2> + '_ {
        self.points.iter().chain(self.points.first()).copied()
    }

    /// Shoelace area, positive for counterclockwise rings
    pub fn signed_area(&self) -> f64 {
        0.5 * self.edges().map(|(a, b)| a.perp_dot(b)).sum::<f64>()
    }

    /// Enclosed area
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Area centroid, or `None` when the polygon encloses no area
    pub fn centroid(&self) -> Option<DVec2> {
        let signed_area = self.signed_area();
        if signed_area.abs() < GEOMETRY_EPSILON {
            return None;
        }
        let weighted = self
            .edges()
            .map(|(a, b)| (a + b) * a.perp_dot(b))
            .fold(DVec2::ZERO, |sum, term| sum + term);
        Some(weighted / (6.0 * signed_area))
    }

    /// Polar second moment `∫ |x - center|² dA` over the enclosed area
    pub fn second_moment_about(&self, center: DVec2) -> f64 {
        let moment: f64 = self
            .edges()
            .map(|(a, b)| {
                let (a, b) = (a - center, b - center);
                let cross = a.perp_dot(b);
                let x_terms = a.x.mul_add(a.x, a.x.mul_add(b.x, b.x * b.x));
                let y_terms = a.y.mul_add(a.y, a.y.mul_add(b.y, b.y * b.y));
                cross * (x_terms + y_terms)
            })
            .sum();
        (moment / 12.0).abs()
    }

    /// Bounding box of the boundary points
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.points.iter().copied())
    }

    /// Even-odd containment test
    ///
    /// Points exactly on the boundary may land on either side.
    pub fn contains(&self, point: DVec2) -> bool {
        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.y > point.y) != (b.y > point.y) {
                let crossing_x = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if point.x < crossing_x {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Check that the polygon is usable as a sampling or clipping region
    ///
    /// # Errors
    ///
    /// Returns an error naming `operation` if the polygon has fewer than three
    /// points, a non-finite coordinate, no enclosed area, or two non-adjacent
    /// edges that cross
    pub fn validate(&self, operation: &'static str) -> Result<()> {
        if self.points.len() < 3 {
            return Err(geometry_error(
                operation,
                &format!("polygon has {} points, at least 3 required", self.len()),
            ));
        }
        if !self.points.iter().all(|point| point.is_finite()) {
            return Err(geometry_error(operation, &"polygon has non-finite coordinates"));
        }
        if self.area() < GEOMETRY_EPSILON {
            return Err(geometry_error(operation, &"polygon encloses no area"));
        }
        if let Some(crossing) = self.first_self_intersection() {
            return Err(geometry_error(
                operation,
                &format!(
                    "polygon crosses itself at ({:.3}, {:.3})",
                    crossing.x, crossing.y
                ),
            ));
        }
        Ok(())
    }

    fn first_self_intersection(&self) -> Option<DVec2> {
        let edges: Vec<(DVec2, DVec2)> = self.edges().collect();
        let last = edges.len().saturating_sub(1);
        for (i, &(a0, a1)) in edges.iter().enumerate() {
            for (j, &(b0, b1)) in edges.iter().enumerate().skip(i + 2) {
                // The closing edge shares a vertex with the first one
                if i == 0 && j == last {
                    continue;
                }
                if let Some(point) = line_intersection(a0, a1 - a0, b0, b1 - b0) {
                    return Some(point);
                }
            }
        }
        None
    }
}

impl From<Vec<DVec2>> for Polygon {
    fn from(points: Vec<DVec2>) -> Self {
        Self::new(points)
    }
}

/// Disjoint polygon pieces treated as one area
///
/// A Voronoi cell clipped to a concave region can fall apart into several
/// pieces. Each piece is a ring of its own, so drawing them never crosses
/// the gaps between pieces.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiPolygon {
    pieces: Vec<Polygon>,
}

impl MultiPolygon {
    /// Wrap a set of non-overlapping pieces
    pub const fn new(pieces: Vec<Polygon>) -> Self {
        Self { pieces }
    }

    /// Every piece as its own ring
    pub fn pieces(&self) -> &[Polygon] {
        &self.pieces
    }

    /// Number of pieces
    pub const fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Whether nothing remains
    pub const fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Total enclosed area
    pub fn area(&self) -> f64 {
        self.pieces.iter().map(Polygon::area).sum()
    }

    /// Area-weighted centroid of all pieces, or `None` when there is no area
    pub fn centroid(&self) -> Option<DVec2> {
        let (weighted, area) = self
            .pieces
            .iter()
            .filter_map(|piece| piece.centroid().map(|centroid| (centroid, piece.area())))
            .fold((DVec2::ZERO, 0.0), |(sum, total), (centroid, area)| {
                (sum + centroid * area, total + area)
            });
        (area >= GEOMETRY_EPSILON).then(|| weighted / area)
    }

    /// Polar second moment `∫ |x - center|² dA` summed over the pieces
    pub fn second_moment_about(&self, center: DVec2) -> f64 {
        self.pieces
            .iter()
            .map(|piece| piece.second_moment_about(center))
            .sum()
    }

    /// Whether any piece contains the point
    pub fn contains(&self, point: DVec2) -> bool {
        self.pieces.iter().any(|piece| piece.contains(point))
    }

    /// Bounding box over every piece
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.pieces.iter().flat_map(|piece| piece.points().iter().copied()))
    }
}

impl From<Polygon> for MultiPolygon {
    fn from(piece: Polygon) -> Self {
        Self::new(vec![piece])
    }
}
