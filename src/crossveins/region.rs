//! Interveinal regions and the cross-vein geometry synthesized inside them

use crate::crossveins::sampling::SamplingStrategy;
use crate::crossveins::voronoi::VoronoiSynthesizer;
use crate::geometry::{MultiPolygon, Polygon};
use crate::io::configuration::MAX_LLOYD_ITERATIONS;
use crate::io::error::{Result, invalid_parameter};
use crate::veins::segment::Segment;
use glam::DVec2;
use rand::Rng;

/// Settings for synthesizing cross-veins in every interveinal region
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CrossVeinConfig {
    /// How inhibitory centers are seeded
    pub strategy: SamplingStrategy,
    /// Lloyd relaxation iterations applied to the seeds; zero disables relaxation
    pub lloyd_iterations: usize,
}

impl CrossVeinConfig {
    /// Check every setting
    ///
    /// # Errors
    ///
    /// Returns an error if the sampler settings are invalid or
    /// `lloyd_iterations` exceeds [`MAX_LLOYD_ITERATIONS`]
    pub fn validate(&self) -> Result<()> {
        self.strategy.validate()?;
        if self.lloyd_iterations > MAX_LLOYD_ITERATIONS {
            return Err(invalid_parameter(
                "lloyd_iterations",
                &self.lloyd_iterations,
                &format!("must be in 0..={MAX_LLOYD_ITERATIONS}"),
            ));
        }
        Ok(())
    }
}

/// Derives the closed boundary between two adjacent primary veins
#[derive(Debug, Default, Clone, Copy)]
pub struct InterveinalRegionBuilder;

impl InterveinalRegionBuilder {
    /// Walk `vein_a` root to tip, then `vein_b` tip to root
    ///
    /// The veins must not cross each other; simplicity of the result is not
    /// re-checked here.
    pub fn build(vein_a: &Segment, vein_b: &Segment) -> Polygon {
        let mut points = vein_a.spine_points();
        points.extend(vein_b.spine_points().into_iter().rev());
        Polygon::new(points)
    }
}

/// Area between two adjacent primary veins with its inhibitory centers and Voronoi cells
#[derive(Debug, Clone, PartialEq)]
pub struct InterveinalRegion {
    boundary: Polygon,
    inhibitory_centers: Vec<DVec2>,
    cells: Vec<MultiPolygon>,
}

impl InterveinalRegion {
    /// Build the boundary, seed it, optionally relax the seeds and tessellate
    ///
    /// # Errors
    ///
    /// Returns an error if the boundary is malformed or any geometry step fails
    pub fn synthesize<R: Rng>(
        vein_a: &Segment,
        vein_b: &Segment,
        config: &CrossVeinConfig,
        rng: &mut R,
    ) -> Result<Self> {
        let boundary = InterveinalRegionBuilder::build(vein_a, vein_b);
        boundary.validate("interveinal region")?;

        let seeds = config.strategy.sample(&boundary, vein_a, vein_b, rng)?;
        let inhibitory_centers =
            VoronoiSynthesizer::relax(&seeds, &boundary, config.lloyd_iterations)?;
        let cells = VoronoiSynthesizer::tessellate(&inhibitory_centers, &boundary)?;

        tracing::debug!(
            veins = ?(vein_a.root_index, vein_b.root_index),
            area = boundary.area(),
            centers = inhibitory_centers.len(),
            "synthesized interveinal region"
        );

        Ok(Self {
            boundary,
            inhibitory_centers,
            cells,
        })
    }

    /// Closed boundary polygon
    pub const fn boundary(&self) -> &Polygon {
        &self.boundary
    }

    /// Seed points after relaxation
    pub fn inhibitory_centers(&self) -> &[DVec2] {
        &self.inhibitory_centers
    }

    /// Voronoi cells, one per inhibitory center, clipped to the boundary
    pub fn cells(&self) -> &[MultiPolygon] {
        &self.cells
    }
}
