//! Tests for breadth-first collision detection

#[cfg(test)]
mod tests {
    use glam::DVec2;
    use venation::veins::Segment;
    use venation::veins::collision::{CollisionDetector, segment_intersection};

    fn segment(from: DVec2, to: DVec2, root_index: usize, generation: u32) -> Segment {
        let extent = to - from;
        Segment {
            position: from,
            direction: extent.normalize_or_zero(),
            length: extent.length(),
            root_index,
            generation,
            children: Vec::new(),
        }
    }

    fn polyline(points: &[DVec2], root_index: usize) -> Segment {
        let mut segments: Vec<Segment> = points
            .windows(2)
            .zip(0..)
            .filter_map(|(pair, generation)| match pair {
                [from, to] => Some(segment(*from, *to, root_index, generation)),
                _ => None,
            })
            .collect();

        let mut subtree = segments.pop().unwrap_or_else(|| unreachable!());
        while let Some(mut parent) = segments.pop() {
            parent.children.push(subtree);
            subtree = parent;
        }
        subtree
    }

    // Tests crossing roots of different veins are detected at the crossing point
    // Verified by skipping pairs from different veins
    #[test]
    fn test_detects_crossing_roots() {
        let roots = vec![
            segment(DVec2::ZERO, DVec2::new(10.0, 10.0), 1, 0),
            segment(DVec2::new(0.0, 10.0), DVec2::new(10.0, 0.0), 2, 0),
        ];

        let point = CollisionDetector::detect(&roots).unwrap_or(DVec2::NAN);
        assert!((point - DVec2::new(5.0, 5.0)).length() < 1e-9);
    }

    // Tests parallel veins never collide
    // Verified by treating zero denominators as crossings
    #[test]
    fn test_parallel_veins_do_not_collide() {
        let roots = vec![
            polyline(&[DVec2::ZERO, DVec2::new(10.0, 0.0), DVec2::new(20.0, 0.0)], 1),
            polyline(
                &[
                    DVec2::new(0.0, 5.0),
                    DVec2::new(10.0, 5.0),
                    DVec2::new(20.0, 5.0),
                ],
                2,
            ),
        ];
        assert_eq!(CollisionDetector::detect(&roots), None);
    }

    // Tests consecutive segments of one vein are skipped even when they fold back
    // Verified by testing adjacent generations
    #[test]
    fn test_adjacent_generations_skipped() {
        let a = segment(DVec2::ZERO, DVec2::new(10.0, 0.0), 1, 3);
        let b = segment(DVec2::new(5.0, -5.0), DVec2::new(5.0, 5.0), 1, 4);
        let c = segment(DVec2::new(5.0, -5.0), DVec2::new(5.0, 5.0), 1, 5);
        let d = segment(DVec2::new(5.0, -5.0), DVec2::new(5.0, 5.0), 2, 4);

        assert!(CollisionDetector::are_adjacent(&a, &b));
        assert!(!CollisionDetector::are_adjacent(&a, &c));
        assert!(!CollisionDetector::are_adjacent(&a, &d));
        assert!(segment_intersection(&a, &b).is_some());
    }

    // Tests a vein curling back over itself is reported
    // Verified by skipping all same-vein pairs
    #[test]
    fn test_self_crossing_vein() {
        let root = polyline(
            &[
                DVec2::new(0.0, 0.0),
                DVec2::new(10.0, 0.0),
                DVec2::new(10.0, 10.0),
                DVec2::new(5.0, 10.0),
                DVec2::new(5.0, -5.0),
            ],
            1,
        );

        let point = CollisionDetector::detect(&[root]).unwrap_or(DVec2::NAN);
        assert!((point - DVec2::new(5.0, 0.0)).length() < 1e-9);
    }

    // Tests the shallowest crossing is reported first
    // Verified by traversing depth-first
    #[test]
    fn test_reports_shallowest_crossing() {
        let roots = vec![
            polyline(
                &[
                    DVec2::new(0.0, 0.0),
                    DVec2::new(10.0, 0.0),
                    DVec2::new(30.0, 20.0),
                ],
                1,
            ),
            polyline(
                &[
                    DVec2::new(0.0, 30.0),
                    DVec2::new(20.0, 30.0),
                    DVec2::new(20.0, -10.0),
                ],
                2,
            ),
            polyline(&[DVec2::new(2.0, -5.0), DVec2::new(2.0, 5.0)], 3),
        ];

        let point = CollisionDetector::detect(&roots).unwrap_or(DVec2::NAN);
        assert!((point - DVec2::new(2.0, 0.0)).length() < 1e-9);
    }

    // Tests an empty network has no collision
    // Verified by returning the origin for empty input
    #[test]
    fn test_empty_network() {
        assert_eq!(CollisionDetector::detect(&[]), None);
    }
}
