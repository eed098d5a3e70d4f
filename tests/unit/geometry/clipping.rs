//! Tests for half-plane clipping

#[cfg(test)]
mod tests {
    use glam::DVec2;
    use venation::geometry::Polygon;
    use venation::geometry::clipping::{HalfPlane, clip_by_all, clip_polygon, dedup_vertices};

    // Tests clipping a square by its vertical bisector keeps the left half
    // Verified by flipping the kept side
    #[test]
    fn test_clip_square_in_half() {
        let square = Polygon::rectangle(DVec2::ZERO, DVec2::splat(2.0));
        let plane = HalfPlane::bisector(DVec2::new(0.0, 1.0), DVec2::new(2.0, 1.0));

        let clipped = clip_polygon(&square, &plane);

        assert_eq!(clipped.len(), 1);
        let Some(half) = clipped.first() else {
            unreachable!("one piece remains");
        };
        assert!((half.area() - 2.0).abs() < 1e-12);
        assert!(half.points().iter().all(|p| p.x <= 1.0 + 1e-12));
    }

    // Tests a polygon entirely outside the half-plane becomes empty
    // Verified by returning the input unchanged
    #[test]
    fn test_clip_removes_everything() {
        let square = Polygon::rectangle(DVec2::new(5.0, 5.0), DVec2::new(6.0, 6.0));
        let plane = HalfPlane {
            origin: DVec2::ZERO,
            normal: DVec2::X,
        };

        assert!(clip_polygon(&square, &plane).is_empty());
    }

    fn u_shape() -> Polygon {
        Polygon::new(vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(3.0, 0.0),
            DVec2::new(3.0, 3.0),
            DVec2::new(2.0, 3.0),
            DVec2::new(2.0, 1.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(1.0, 3.0),
            DVec2::new(0.0, 3.0),
        ])
    }

    // Tests a cut through both arms of a U returns each arm as its own ring
    // Verified by joining the pieces with a bridge along the clip line
    #[test]
    fn test_clip_splits_concave_polygon() {
        let plane = HalfPlane {
            origin: DVec2::new(0.0, 2.0),
            normal: DVec2::new(0.0, -1.0),
        };

        let pieces = clip_polygon(&u_shape(), &plane);

        assert_eq!(pieces.len(), 2);
        for piece in &pieces {
            assert!((piece.area() - 1.0).abs() < 1e-12);
            let Some(bounds) = piece.bounds() else {
                unreachable!("pieces have points");
            };
            // No edge spans the notch between the arms
            assert!(bounds.size().x <= 1.0 + 1e-12);
            assert!(!piece.contains(DVec2::new(1.5, 2.5)));
        }
    }

    // Tests a cut below the notch keeps the base in one piece
    // Verified by splitting at every pair of crossings
    #[test]
    fn test_clip_concave_polygon_connected() {
        let plane = HalfPlane {
            origin: DVec2::new(0.0, 2.0),
            normal: DVec2::new(0.0, 1.0),
        };

        let pieces = clip_polygon(&u_shape(), &plane);

        assert_eq!(pieces.len(), 1);
        let area: f64 = pieces.iter().map(Polygon::area).sum();
        assert!((area - 5.0).abs() < 1e-12);
    }

    // Tests successive clips intersect all half-planes
    // Verified by clipping only the first plane
    #[test]
    fn test_clip_by_all() {
        let square = Polygon::rectangle(DVec2::ZERO, DVec2::splat(4.0));
        let planes = [
            HalfPlane {
                origin: DVec2::new(2.0, 0.0),
                normal: DVec2::X,
            },
            HalfPlane {
                origin: DVec2::new(0.0, 1.0),
                normal: DVec2::Y,
            },
        ];

        let clipped = clip_by_all(&square, &planes);
        assert_eq!(clipped.len(), 1);
        let area: f64 = clipped.iter().map(Polygon::area).sum();
        assert!((area - 2.0).abs() < 1e-12);
    }

    // Tests duplicate vertices collapse, including across the closing edge
    // Verified by only removing interior duplicates
    #[test]
    fn test_dedup_vertices() {
        let points = vec![
            DVec2::ZERO,
            DVec2::ZERO,
            DVec2::X,
            DVec2::ONE,
            DVec2::ZERO,
        ];
        assert_eq!(dedup_vertices(points), vec![DVec2::ZERO, DVec2::X, DVec2::ONE]);
    }

    // Tests the bisector side function is zero on the boundary
    // Verified by placing the origin at the kept point
    #[test]
    fn test_bisector_side() {
        let plane = HalfPlane::bisector(DVec2::ZERO, DVec2::new(4.0, 0.0));
        assert!(plane.side(DVec2::new(2.0, 7.0)).abs() < 1e-12);
        assert!(plane.side(DVec2::new(1.0, 0.0)) < 0.0);
        assert!(plane.side(DVec2::new(3.0, 0.0)) > 0.0);
    }
}
