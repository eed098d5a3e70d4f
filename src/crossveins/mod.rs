//! Secondary cross-vein synthesis between adjacent primary veins

/// Interveinal region boundaries and per-region synthesis
pub mod region;
/// Inhibitory center placement strategies
pub mod sampling;
/// Clipped Voronoi tessellation with Lloyd relaxation
pub mod voronoi;
