//! Tests for parameter ranges and random parameter draws

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use venation::VenationError;
    use venation::io::parameters::PARAMETER_NAMES;
    use venation::search::space::{ParameterKind, ParameterRange, ParameterSpace};

    // Tests the default space covers every generator parameter
    // Verified by removing a range from the default space
    #[test]
    fn test_default_space_covers_parameters() {
        let space = ParameterSpace::default();

        assert_eq!(space.ranges().len(), 31);
        for range in space.ranges() {
            assert!(PARAMETER_NAMES.contains(&range.name));
            assert!(range.min <= range.max);
        }
        assert!(space.range("root_segment_len_factor").is_none());
    }

    // Tests slider steps are a hundredth of the range, integers at least one
    // Verified by skipping the integer floor
    #[test]
    fn test_slider_step() {
        let space = ParameterSpace::default();
        let step = |name: &str| space.range(name).map(ParameterRange::slider_step);

        assert_eq!(step("root_segment_pos_const_x"), Some(19.0));
        assert_eq!(step("alpha"), Some(2.0));
        assert_eq!(step("max_generations_const"), Some(1.0));
        assert_eq!(step("num_root_segments"), Some(0.0));
        let linear = step("segment_dir_linear_x").unwrap_or_default();
        assert!((linear - 0.02).abs() < 1e-12);
    }

    // Tests drawn values stay inside their ranges and integers are whole
    // Verified by scaling draws by the upper bound only
    #[test]
    fn test_sample_flat_respects_ranges() {
        let space = ParameterSpace::default();
        let mut rng = StdRng::seed_from_u64(4);

        for _ in 0..50 {
            let document = space.sample_flat(&mut rng);
            for range in space.ranges() {
                let value = document.get(range.name).copied().unwrap_or(f64::NAN);
                assert!(value >= range.min && value <= range.max);
                if range.kind == ParameterKind::Integer {
                    assert_eq!(value.fract(), 0.0);
                }
            }
        }
    }

    // Tests inverted ranges are rejected at construction
    // Verified by removing the ordering check
    #[test]
    fn test_inverted_range_rejected() {
        let result = ParameterSpace::new(vec![ParameterRange {
            name: "segment_len_factor",
            kind: ParameterKind::Float,
            min: 1.0,
            max: 0.5,
        }]);

        assert!(matches!(
            result,
            Err(VenationError::InvalidParameter {
                parameter: "segment_len_factor",
                ..
            })
        ));
    }

    // Tests pinned ranges always draw the pinned value
    // Verified by pinning only the lower bound
    #[test]
    fn test_pin() {
        let mut space = ParameterSpace::default();
        assert!(space.pin("root_segment_len", 42.0));
        assert!(!space.pin("not_a_parameter", 1.0));

        let mut rng = StdRng::seed_from_u64(8);
        let document = space.sample_flat(&mut rng);
        assert_eq!(document.get("root_segment_len"), Some(&42.0));
    }

    // Tests parameter sets drawn from a narrow space validate
    // Verified by skipping from_flat conversion
    #[test]
    fn test_sample_parameter_set() {
        let space = ParameterSpace::new(vec![
            ParameterRange {
                name: "root_segment_len",
                kind: ParameterKind::Float,
                min: 10.0,
                max: 20.0,
            },
            ParameterRange {
                name: "num_root_segments",
                kind: ParameterKind::Integer,
                min: 3.0,
                max: 6.0,
            },
        ])
        .ok();
        let mut rng = StdRng::seed_from_u64(12);

        let parameters = space.and_then(|space| space.sample(&mut rng).ok());
        let Some(parameters) = parameters else {
            unreachable!("narrow space draws valid parameters");
        };
        assert!((10.0..=20.0).contains(&parameters.root_segment.length));
        assert!((3..=6).contains(&parameters.num_root_segments));
    }
}
