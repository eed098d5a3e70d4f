//! Primary vein generation and validation

/// Breadth-first collision gate
pub mod collision;
/// Polynomial-field vein tree construction
pub mod generator;
/// Network aggregate exposed to renderers and searches
pub mod network;
/// Segment tree data structure
pub mod segment;

pub use network::VeinNetwork;
pub use segment::Segment;
