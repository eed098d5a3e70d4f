//! Tests for generation constants and defaults

#[cfg(test)]
mod tests {
    use venation::io::configuration::{
        CANVAS_MARGIN, CAPTURE_PREFIX, CAPTURE_SUFFIX, DEFAULT_CANVAS_HEIGHT,
        DEFAULT_CANVAS_WIDTH, DEFAULT_MAX_FAILED_ATTEMPTS, DEFAULT_MIDLINE_DENSITY,
        DEFAULT_MIN_DISTANCE, DEFAULT_SEARCH_ATTEMPTS, DEFAULT_SEED, DEFAULT_TARGET_COUNT,
        GEOMETRY_EPSILON, MAX_CAPTURE_INDEX, MAX_GENERATIONS_LIMIT, MAX_LLOYD_ITERATIONS,
    };

    // Tests sampler defaults
    // Verified by changing constant values
    #[test]
    fn test_sampler_defaults() {
        assert_eq!(DEFAULT_MIN_DISTANCE, 30.0);
        assert_eq!(DEFAULT_TARGET_COUNT, 100);
        assert_eq!(DEFAULT_MAX_FAILED_ATTEMPTS, 100);
        assert_eq!(DEFAULT_MIDLINE_DENSITY, 0.000_845);
    }

    // Tests work limits
    // Verified by raising the relaxation cap
    #[test]
    fn test_limits() {
        assert_eq!(MAX_LLOYD_ITERATIONS, 50);
        assert_eq!(MAX_GENERATIONS_LIMIT, 1000.0);
        assert_eq!(DEFAULT_SEARCH_ATTEMPTS, 1000);
        assert!(GEOMETRY_EPSILON > 0.0 && GEOMETRY_EPSILON < 1e-6);
    }

    // Tests seed value is correct
    // Verified by changing seed value
    #[test]
    fn test_default_seed() {
        assert_eq!(DEFAULT_SEED, 42);
    }

    // Tests the canvas margin leaves a usable area
    // Verified by making the margin exceed half the height
    #[test]
    fn test_canvas() {
        assert_eq!((DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT), (1600, 900));
        assert!(CANVAS_MARGIN * 2.0 < f64::from(DEFAULT_CANVAS_HEIGHT));
    }

    // Tests capture naming settings
    // Verified by changing the suffix
    #[test]
    fn test_capture_naming() {
        assert_eq!(CAPTURE_SUFFIX, ".png");
        assert!(!CAPTURE_PREFIX.is_empty());
        assert_eq!(MAX_CAPTURE_INDEX, 999);
    }
}
