//! Procedural insect wing venation from a compact polynomial parameter set
//!
//! Primary veins grow as segment trees whose directions are polynomial fields
//! over vein index and generation. Networks are gated on self-intersection,
//! and the regions between adjacent veins can be filled with Voronoi
//! cross-veins seeded by Poisson disk or midline sampling.

#![forbid(unsafe_code)]

/// Cross-vein synthesis between adjacent primary veins
pub mod crossveins;
/// Polygon primitives, clipping and segment intersection
pub mod geometry;
/// Input/output operations, configuration and error handling
pub mod io;
/// Randomized parameter search
pub mod search;
/// Primary vein generation and collision detection
pub mod veins;

pub use io::error::{Result, VenationError};
pub use io::parameters::ParameterSet;
pub use veins::network::VeinNetwork;
