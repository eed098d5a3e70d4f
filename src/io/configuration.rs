//! Generation constants and runtime configuration defaults

// Cross-vein sampling defaults
/// Minimum spacing between inhibitory centers
pub const DEFAULT_MIN_DISTANCE: f64 = 30.0;
/// Number of inhibitory centers the sampler tries to place per region
pub const DEFAULT_TARGET_COUNT: usize = 100;
/// Consecutive rejected candidates before the sampler gives up
pub const DEFAULT_MAX_FAILED_ATTEMPTS: usize = 100;

/// Inhibitory centers per unit of region area for midline sampling
pub const DEFAULT_MIDLINE_DENSITY: f64 = 0.000_845;

// Relaxation beyond this point no longer moves centers visibly
/// Maximum Lloyd relaxation iterations
pub const MAX_LLOYD_ITERATIONS: usize = 50;

// Keeps a runaway generation polynomial from exhausting memory
/// Maximum evaluated generation threshold for any vein
pub const MAX_GENERATIONS_LIMIT: f64 = 1000.0;

/// Tolerance for zero-area and coincident-point checks
pub const GEOMETRY_EPSILON: f64 = 1e-9;

// Randomized parameter search
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;
/// Default number of parameter draws before the search gives up
pub const DEFAULT_SEARCH_ATTEMPTS: usize = 1000;

// Canvas the network is expected to fit inside
/// Default canvas width in pixels
pub const DEFAULT_CANVAS_WIDTH: u32 = 1600;
/// Default canvas height in pixels
pub const DEFAULT_CANVAS_HEIGHT: u32 = 900;
/// Inset from the canvas edge used as the containment target
pub const CANVAS_MARGIN: f64 = 10.0;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Output settings
/// Directory for rendered captures
pub const OUTPUT_DIRECTORY: &str = "output";
/// Prefix of rendered capture filenames
pub const CAPTURE_PREFIX: &str = "venation_";
/// Suffix of rendered capture filenames
pub const CAPTURE_SUFFIX: &str = ".png";
/// Highest capture index probed when choosing the next filename
pub const MAX_CAPTURE_INDEX: usize = 999;
/// Radius of inhibitory center dots in rendered output
pub const CENTER_MARKER_RADIUS: i32 = 2;
/// Radius of the intersection marker ring in rendered output
pub const INTERSECTION_MARKER_RADIUS: i32 = 10;
