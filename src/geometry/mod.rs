//! Planar geometry primitives shared by vein validation and cross-vein synthesis

/// Half-plane clipping of simple polygons
pub mod clipping;
/// Parametric segment intersection
pub mod intersection;
/// Simple polygons, bounding boxes and their measurements
pub mod polygon;

pub use polygon::{Bounds, MultiPolygon, Polygon};
