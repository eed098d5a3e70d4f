//! Tests for polynomial-field vein tree construction

#[cfg(test)]
mod tests {
    use glam::DVec2;
    use venation::VenationError;
    use venation::io::parameters::ParameterSet;
    use venation::veins::generator::{PrimaryVeinGenerator, generate};

    // Tests one tree is built per root index, in order
    // Verified by generating num_root_segments - 1 veins
    #[test]
    fn test_root_count_and_order() {
        let parameters = ParameterSet::default();
        let roots = generate(&parameters).unwrap_or_default();

        assert_eq!(roots.len(), 12);
        for (offset, root) in roots.iter().enumerate() {
            assert_eq!(root.root_index, offset + 1);
            assert_eq!(root.generation, 0);
        }
    }

    // Tests root placement follows the position polynomial
    // Verified by using zero-based indices
    #[test]
    fn test_root_positions() {
        let parameters = ParameterSet::default();
        let generator = PrimaryVeinGenerator::new(&parameters);

        let first = generator.root_segment(1).ok().map(|root| root.position);
        let third = generator.root_segment(3).ok().map(|root| root.position);

        assert_eq!(first, Some(DVec2::new(60.0, 310.0)));
        assert_eq!(third, Some(DVec2::new(70.0, 330.0)));
    }

    // Tests every segment direction has unit length
    // Verified by skipping normalization
    #[test]
    fn test_directions_are_unit() {
        let mut parameters = ParameterSet::default();
        parameters.segment_direction.linear = DVec2::new(0.3, -0.2);
        parameters.segment_direction.index_generation = DVec2::new(0.01, 0.02);

        let roots = generate(&parameters).unwrap_or_default();
        assert!(!roots.is_empty());
        for root in &roots {
            root.for_each(&mut |segment| {
                assert!((segment.direction.length() - 1.0).abs() < 1e-12);
            });
        }
    }

    // Tests chain length and geometric length decay
    // Verified by multiplying by the root length factor instead
    #[test]
    fn test_generation_count_and_decay() {
        let parameters = ParameterSet::default();
        let roots = generate(&parameters).unwrap_or_default();
        let Some(root) = roots.first() else {
            unreachable!("default parameters produce veins");
        };

        let spine: Vec<_> = root.spine().collect();
        assert_eq!(spine.len(), 13);
        assert_eq!(root.tip().generation, 12);

        for pair in spine.windows(2) {
            if let [parent, child] = pair {
                assert!((child.length - parent.length * 0.95).abs() < 1e-9);
                assert!((child.position - parent.endpoint()).length() < 1e-9);
            }
        }
    }

    // Tests a fractional threshold adds children while generation is below it
    // Verified by comparing with <= instead of <
    #[test]
    fn test_fractional_threshold() {
        let mut parameters = ParameterSet::default();
        parameters.max_generations.constant = 2.5;
        let roots = generate(&parameters).unwrap_or_default();
        assert!(roots.iter().all(|root| root.depth() == 3));

        parameters.max_generations.constant = 0.0;
        let roots = generate(&parameters).unwrap_or_default();
        assert!(roots.iter().all(|root| root.count() == 1));
    }

    // Tests generation is a pure function of its parameters
    // Verified by injecting random jitter into directions
    #[test]
    fn test_generation_is_deterministic() {
        let parameters = ParameterSet::default();
        let first = generate(&parameters).ok();
        let second = generate(&parameters).ok();
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    // Tests a vanishing root direction reports the offending vein
    // Verified by substituting a fallback direction
    #[test]
    fn test_degenerate_root_direction() {
        let mut parameters = ParameterSet::default();
        parameters.root_segment.direction.constant = DVec2::new(3.0, 0.0);
        parameters.root_segment.direction.linear = DVec2::new(-1.0, 0.0);

        let result = generate(&parameters);
        assert!(matches!(
            result,
            Err(VenationError::DegenerateDirection {
                root_index: 3,
                generation: 0,
            })
        ));
    }

    // Tests a vanishing child direction reports its generation
    // Verified by only checking root directions
    #[test]
    fn test_degenerate_child_direction() {
        let mut parameters = ParameterSet::default();
        parameters.root_segment.direction.constant = DVec2::new(2.0, 2.0);
        parameters.segment_direction.linear = DVec2::new(-1.0, -1.0);

        let result = PrimaryVeinGenerator::new(&parameters).generate_vein(1);
        assert!(matches!(
            result,
            Err(VenationError::DegenerateDirection {
                root_index: 1,
                generation: 2,
            })
        ));
    }

    // Tests invalid parameters are rejected before generation
    // Verified by skipping validation in generate
    #[test]
    fn test_invalid_parameters_rejected() {
        let mut parameters = ParameterSet::default();
        parameters.root_segment.length = 0.0;
        assert!(matches!(
            generate(&parameters),
            Err(VenationError::InvalidParameter { .. })
        ));
    }
}
