//! Clipped Voronoi tessellation and Lloyd relaxation of inhibitory centers
//!
//! Each cell is the clip region cut by the perpendicular bisectors between
//! its site and the site's Delaunay neighbors. Those neighbors alone bound
//! the unclipped Voronoi cell, so the cells partition the region exactly.
//! In a concave region a cell may consist of several disjoint pieces.

use crate::geometry::{MultiPolygon, Polygon};
use crate::geometry::clipping::{HalfPlane, clip_by_all};
use crate::io::configuration::MAX_LLOYD_ITERATIONS;
use crate::io::error::{Result, geometry_error, invalid_parameter};
use glam::DVec2;
use spade::handles::FixedVertexHandle;
use spade::{DelaunayTriangulation, Point2, Triangulation};
use std::collections::HashMap;

/// Tessellates point sets clipped to a region polygon
#[derive(Debug, Default, Clone, Copy)]
pub struct VoronoiSynthesizer;

impl VoronoiSynthesizer {
    /// One cell per input point, each the point's Voronoi cell intersected with `clip_region`
    ///
    /// Sites outside the region produce empty cells so indices stay aligned
    /// with `points`. A cell cut apart by the region's concavities keeps each
    /// piece as a separate ring.
    ///
    /// # Errors
    ///
    /// Returns an error if `clip_region` is malformed or a site cannot be triangulated
    pub fn tessellate(points: &[DVec2], clip_region: &Polygon) -> Result<Vec<MultiPolygon>> {
        clip_region.validate("voronoi tessellation")?;
        if points.is_empty() {
            return Ok(Vec::new());
        }

        let neighbors = delaunay_neighbors(points)?;
        let cells = points
            .iter()
            .zip(&neighbors)
            .map(|(&site, adjacent)| {
                let planes: Vec<HalfPlane> = adjacent
                    .iter()
                    .filter_map(|&other| points.get(other))
                    .map(|&other| HalfPlane::bisector(site, other))
                    .collect();
                MultiPolygon::new(clip_by_all(clip_region, &planes))
            })
            .collect();

        Ok(cells)
    }

    /// Move every point to its cell's centroid, `iterations` times
    ///
    /// Zero iterations returns the points unchanged. Points whose cell is
    /// empty stay where they are.
    ///
    /// # Errors
    ///
    /// Returns an error if `iterations` exceeds [`MAX_LLOYD_ITERATIONS`] or any
    /// tessellation fails
    pub fn relax(points: &[DVec2], clip_region: &Polygon, iterations: usize) -> Result<Vec<DVec2>> {
        if iterations > MAX_LLOYD_ITERATIONS {
            return Err(invalid_parameter(
                "lloyd_iterations",
                &iterations,
                &format!("at most {MAX_LLOYD_ITERATIONS} iterations are supported"),
            ));
        }

        let mut current = points.to_vec();
        for _ in 0..iterations {
            let cells = Self::tessellate(&current, clip_region)?;
            current = current
                .iter()
                .zip(&cells)
                .map(|(&site, cell)| cell.centroid().unwrap_or(site))
                .collect();
        }
        Ok(current)
    }

    /// Sum over cells of `∫ |x - site|² dA`, which relaxation never increases
    pub fn quantization_energy(points: &[DVec2], cells: &[MultiPolygon]) -> f64 {
        points
            .iter()
            .zip(cells)
            .map(|(&site, cell)| cell.second_moment_about(site))
            .sum()
    }

    /// Sum of squared distances from each site to its cell centroid
    pub fn centroid_displacement(points: &[DVec2], cells: &[MultiPolygon]) -> f64 {
        points
            .iter()
            .zip(cells)
            .filter_map(|(&site, cell)| cell.centroid().map(|c| c.distance_squared(site)))
            .sum()
    }
}

/// Indices of each point's Delaunay neighbors
///
/// Falls back to every other point when the triangulation is degenerate
/// (fewer than three sites, all sites collinear, or coincident sites).
fn delaunay_neighbors(points: &[DVec2]) -> Result<Vec<Vec<usize>>> {
    let all_others = || -> Vec<Vec<usize>> {
        (0..points.len())
            .map(|i| (0..points.len()).filter(|&j| j != i).collect())
            .collect()
    };

    if points.len() < 3 {
        return Ok(all_others());
    }

    let mut triangulation: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();
    let mut handles = Vec::with_capacity(points.len());
    for point in points {
        let handle = triangulation
            .insert(Point2::new(point.x, point.y))
            .map_err(|e| {
                geometry_error(
                    "voronoi tessellation",
                    &format!("cannot triangulate site ({}, {}): {e:?}", point.x, point.y),
                )
            })?;
        handles.push(handle);
    }

    if triangulation.num_vertices() != points.len() || triangulation.all_vertices_on_line() {
        return Ok(all_others());
    }

    let index_of: HashMap<FixedVertexHandle, usize> = handles
        .iter()
        .enumerate()
        .map(|(index, &handle)| (handle, index))
        .collect();

    Ok(handles
        .iter()
        .map(|&handle| {
            triangulation
                .vertex(handle)
                .out_edges()
                .filter_map(|edge| index_of.get(&edge.to().fix()).copied())
                .collect()
        })
        .collect())
}
