//! Aggregate of primary veins, their collision state and derived cross-veins

use crate::crossveins::region::{CrossVeinConfig, InterveinalRegion};
use crate::geometry::Polygon;
use crate::io::error::{Result, WithContext};
use crate::io::parameters::ParameterSet;
use crate::veins::collision::CollisionDetector;
use crate::veins::generator::PrimaryVeinGenerator;
use crate::veins::segment::Segment;
use glam::DVec2;
use rand::Rng;

/// Complete result of one network build
///
/// Construction is atomic: a network either holds every vein of its
/// parameter set or is never returned. Interveinal regions stay empty until
/// [`VeinNetwork::generate_cross_veins`] is called explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct VeinNetwork {
    roots: Vec<Segment>,
    tips: Vec<Segment>,
    first_intersection: Option<DVec2>,
    regions: Vec<InterveinalRegion>,
    alpha: u8,
}

impl VeinNetwork {
    /// Generate every primary vein and run the collision gate
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid or a direction degenerates
    pub fn build(parameters: &ParameterSet) -> Result<Self> {
        let roots = PrimaryVeinGenerator::new(parameters).generate()?;
        let mut network = Self::from_roots(roots);
        network.alpha = parameters.alpha;

        tracing::debug!(
            veins = network.roots.len(),
            segments = network.segment_count(),
            collision = network.has_collision(),
            "built vein network"
        );
        Ok(network)
    }

    /// Wrap already generated vein trees, deriving tips and collision state
    pub fn from_roots(roots: Vec<Segment>) -> Self {
        let tips = roots.iter().map(|root| root.tip().clone()).collect();
        let first_intersection = CollisionDetector::detect(&roots);
        Self {
            roots,
            tips,
            first_intersection,
            regions: Vec::new(),
            alpha: u8::MAX,
        }
    }

    /// Root segment of every vein in index order
    pub fn roots(&self) -> &[Segment] {
        &self.roots
    }

    /// Leaf reached from each root along first children
    pub fn tips(&self) -> &[Segment] {
        &self.tips
    }

    /// Shallowest crossing found by the collision gate
    pub const fn first_intersection(&self) -> Option<DVec2> {
        self.first_intersection
    }

    /// Whether any two segments genuinely cross
    pub const fn has_collision(&self) -> bool {
        self.first_intersection.is_some()
    }

    /// Whether every root start and tip end lies inside `bounds`
    pub fn is_contained_by(&self, bounds: &Polygon) -> bool {
        self.roots.iter().all(|root| bounds.contains(root.position))
            && self.tips.iter().all(|tip| bounds.contains(tip.endpoint()))
    }

    /// Total number of segments across all veins
    pub fn segment_count(&self) -> usize {
        self.roots.iter().map(Segment::count).sum()
    }

    /// Deepest generation grown by the vein at zero-based `position`
    pub fn max_generations(&self, position: usize) -> Option<u32> {
        self.roots.get(position).map(Segment::depth)
    }

    /// Display alpha carried over from the parameter set
    pub const fn alpha(&self) -> u8 {
        self.alpha
    }

    /// Cross-vein regions, empty until generated
    pub fn regions(&self) -> &[InterveinalRegion] {
        &self.regions
    }

    /// Synthesize an interveinal region between every pair of adjacent veins
    ///
    /// Replaces any previously generated regions. On failure the existing
    /// regions are left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or any region's
    /// geometry is malformed; the error names the failing region
    pub fn generate_cross_veins<R: Rng>(
        &mut self,
        config: &CrossVeinConfig,
        rng: &mut R,
    ) -> Result<()> {
        config.validate()?;

        let mut regions = Vec::with_capacity(self.roots.len().saturating_sub(1));
        for (index, pair) in self.roots.windows(2).enumerate() {
            if let [vein_a, vein_b] = pair {
                let region =
                    InterveinalRegion::synthesize(vein_a, vein_b, config, rng).with_region(index)?;
                regions.push(region);
            }
        }

        tracing::info!(
            regions = regions.len(),
            centers = regions
                .iter()
                .map(|region| region.inhibitory_centers().len())
                .sum::<usize>(),
            "generated cross-veins"
        );
        self.regions = regions;
        Ok(())
    }
}
