//! Randomized exploration of the parameter space

/// Bounded generate-and-test loop
pub mod executor;
/// Parameter ranges and random draws
pub mod space;
