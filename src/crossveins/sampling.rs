//! Placement of inhibitory centers inside an interveinal region

use crate::geometry::Polygon;
use crate::io::configuration::{
    DEFAULT_MAX_FAILED_ATTEMPTS, DEFAULT_MIDLINE_DENSITY, DEFAULT_MIN_DISTANCE,
    DEFAULT_TARGET_COUNT,
};
use crate::io::error::{Result, geometry_error, invalid_parameter};
use crate::veins::segment::Segment;
use glam::DVec2;
use rand::Rng;

/// Rejection sampler that keeps accepted points at least `min_distance` apart
///
/// Candidates are drawn uniformly from the region's bounding box. Sampling
/// stops at `target_count` points, or early once `max_failed_attempts`
/// consecutive candidates have been rejected. Narrow regions routinely end
/// early; that is reported, not treated as an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoissonDiskSampler {
    /// Minimum distance between any two accepted points
    pub min_distance: f64,
    /// Number of points to stop at
    pub target_count: usize,
    /// Consecutive rejections tolerated before giving up
    pub max_failed_attempts: usize,
}

impl Default for PoissonDiskSampler {
    fn default() -> Self {
        Self {
            min_distance: DEFAULT_MIN_DISTANCE,
            target_count: DEFAULT_TARGET_COUNT,
            max_failed_attempts: DEFAULT_MAX_FAILED_ATTEMPTS,
        }
    }
}

/// Outcome of one sampling run
#[derive(Debug, Clone, PartialEq)]
pub struct SampleReport {
    /// Accepted points in acceptance order
    pub points: Vec<DVec2>,
    /// Total candidates drawn, accepted or not
    pub candidates: usize,
    /// Whether sampling stopped on consecutive failures before reaching the target
    pub exhausted: bool,
}

impl PoissonDiskSampler {
    /// Check sampler settings
    ///
    /// # Errors
    ///
    /// Returns an error if `min_distance` is negative or not finite
    pub fn validate(&self) -> Result<()> {
        if !self.min_distance.is_finite() || self.min_distance < 0.0 {
            return Err(invalid_parameter(
                "min_distance",
                &self.min_distance,
                &"must be a finite non-negative distance",
            ));
        }
        Ok(())
    }

    /// Sample well-spaced points strictly inside `region`
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid or the region is malformed
    pub fn sample<R: Rng>(&self, region: &Polygon, rng: &mut R) -> Result<SampleReport> {
        self.validate()?;
        region.validate("poisson disk sampling")?;
        let bounds = region
            .bounds()
            .ok_or_else(|| geometry_error("poisson disk sampling", &"region has no bounds"))?;

        let min_distance_sq = self.min_distance * self.min_distance;
        let mut points: Vec<DVec2> = Vec::with_capacity(self.target_count);
        let mut failed_attempts = 0;
        let mut candidates = 0;
        let mut exhausted = false;

        while points.len() < self.target_count {
            if failed_attempts >= self.max_failed_attempts {
                exhausted = true;
                tracing::debug!(
                    accepted = points.len(),
                    target = self.target_count,
                    candidates,
                    "sampler reached max failed attempts"
                );
                break;
            }

            let unit = DVec2::new(rng.random::<f64>(), rng.random::<f64>());
            let candidate = bounds.min + unit * bounds.size();
            candidates += 1;

            let crowded = points
                .iter()
                .any(|accepted| accepted.distance_squared(candidate) < min_distance_sq);
            if crowded || !region.contains(candidate) {
                failed_attempts += 1;
                continue;
            }

            points.push(candidate);
            failed_attempts = 0;
        }

        Ok(SampleReport {
            points,
            candidates,
            exhausted,
        })
    }
}

/// Deterministic placement along the midline between two bounding veins
///
/// Places `floor(area × density)` centers halfway between points at equal
/// fractions of each vein's length, skipping both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MidlineSampler {
    /// Centers per unit of region area
    pub density: f64,
}

impl Default for MidlineSampler {
    fn default() -> Self {
        Self {
            density: DEFAULT_MIDLINE_DENSITY,
        }
    }
}

impl MidlineSampler {
    /// Check sampler settings
    ///
    /// # Errors
    ///
    /// Returns an error if `density` is negative or not finite
    pub fn validate(&self) -> Result<()> {
        if !self.density.is_finite() || self.density < 0.0 {
            return Err(invalid_parameter(
                "midline_density",
                &self.density,
                &"must be a finite non-negative density",
            ));
        }
        Ok(())
    }

    /// Centers for the region bounded by `vein_a` and `vein_b`
    ///
    /// Midpoints that fall outside `region` are dropped.
    pub fn sample(&self, region: &Polygon, vein_a: &Segment, vein_b: &Segment) -> Vec<DVec2> {
        let count = (region.area() * self.density).floor() as usize;
        let line_a = vein_a.spine_points();
        let line_b = vein_b.spine_points();
        let length_a = polyline_length(&line_a);
        let length_b = polyline_length(&line_b);

        let centers: Vec<DVec2> = (1..=count)
            .map(|k| k as f64 / (count + 1) as f64)
            .map(|fraction| {
                let a = point_along(&line_a, fraction * length_a);
                let b = point_along(&line_b, fraction * length_b);
                (a + b) * 0.5
            })
            .filter(|center| region.contains(*center))
            .collect();

        if centers.len() < count {
            tracing::debug!(
                requested = count,
                placed = centers.len(),
                "midline centers fell outside the region"
            );
        }
        centers
    }
}

/// How a region's inhibitory centers are seeded
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SamplingStrategy {
    /// Random rejection sampling with a minimum spacing
    Poisson(PoissonDiskSampler),
    /// Deterministic midpoints between the bounding veins
    Midline(MidlineSampler),
}

impl Default for SamplingStrategy {
    fn default() -> Self {
        Self::Poisson(PoissonDiskSampler::default())
    }
}

impl SamplingStrategy {
    /// Check the selected sampler's settings
    ///
    /// # Errors
    ///
    /// Propagates the selected sampler's validation error
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Poisson(sampler) => sampler.validate(),
            Self::Midline(sampler) => sampler.validate(),
        }
    }

    /// Seed points for the region bounded by `vein_a` and `vein_b`
    ///
    /// # Errors
    ///
    /// Returns an error if Poisson sampling rejects the region as malformed
    pub fn sample<R: Rng>(
        &self,
        region: &Polygon,
        vein_a: &Segment,
        vein_b: &Segment,
        rng: &mut R,
    ) -> Result<Vec<DVec2>> {
        match self {
            Self::Poisson(sampler) => Ok(sampler.sample(region, rng)?.points),
            Self::Midline(sampler) => Ok(sampler.sample(region, vein_a, vein_b)),
        }
    }
}

/// Total length of an open polyline
pub fn polyline_length(points: &[DVec2]) -> f64 {
    points
        .windows(2)
        .map(|pair| match pair {
            [a, b] => a.distance(*b),
            _ => 0.0,
        })
        .sum()
}

/// Point at arc length `distance` along an open polyline, clamped to its ends
pub fn point_along(points: &[DVec2], distance: f64) -> DVec2 {
    let mut remaining = distance.max(0.0);
    for pair in points.windows(2) {
        if let [a, b] = pair {
            let length = a.distance(*b);
            if remaining <= length && length > 0.0 {
                return a.lerp(*b, remaining / length);
            }
            remaining -= length;
        }
    }
    points.last().copied().unwrap_or(DVec2::ZERO)
}
