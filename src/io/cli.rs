//! Command-line interface for building, searching and exporting vein networks

use crate::crossveins::region::CrossVeinConfig;
use crate::crossveins::sampling::{MidlineSampler, PoissonDiskSampler, SamplingStrategy};
use crate::geometry::Polygon;
use crate::io::configuration::{
    CANVAS_MARGIN, CAPTURE_PREFIX, CAPTURE_SUFFIX, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH,
    DEFAULT_MIN_DISTANCE, DEFAULT_SEARCH_ATTEMPTS, DEFAULT_SEED, OUTPUT_DIRECTORY,
};
use crate::io::error::Result;
use crate::io::image::{export_network_as_png, next_capture_path};
use crate::io::parameters::ParameterSet;
use crate::io::progress::SearchProgress;
use crate::search::executor::RandomizedSearch;
use crate::search::space::ParameterSpace;
use crate::veins::network::VeinNetwork;
use clap::{Parser, ValueEnum};
use glam::DVec2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// How inhibitory centers are seeded inside each region
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SamplerChoice {
    /// Randomized rejection sampling with a minimum spacing
    Poisson,
    /// Deterministic midpoints between the bounding veins
    Midline,
}

#[derive(Parser)]
#[command(name = "venation")]
#[command(
    author,
    version,
    about = "Generate insect wing vein networks and export them as PNG"
)]
/// Command-line arguments for network generation
// Independent feature switches map directly onto flags
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Random seed for reproducible sampling and search
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Parameter override as `name=value`, repeatable
    #[arg(short, long = "param", value_name = "NAME=VALUE", value_parser = parse_override)]
    pub params: Vec<(String, f64)>,

    /// Search random parameter sets for a collision-free network
    #[arg(long)]
    pub search: bool,

    /// Maximum candidates drawn by the search
    #[arg(short, long, default_value_t = DEFAULT_SEARCH_ATTEMPTS)]
    pub attempts: usize,

    /// Synthesize Voronoi cross-veins between adjacent veins
    #[arg(short, long)]
    pub cross_veins: bool,

    /// Inhibitory center placement strategy
    #[arg(long, value_enum, default_value_t = SamplerChoice::Poisson)]
    pub sampler: SamplerChoice,

    /// Lloyd relaxation iterations (0 disables)
    #[arg(short, long, default_value_t = 0)]
    pub relax: usize,

    /// Minimum spacing between Poisson-sampled centers
    #[arg(long, default_value_t = DEFAULT_MIN_DISTANCE)]
    pub min_distance: f64,

    /// Canvas width in pixels
    #[arg(short = 'W', long, default_value_t = DEFAULT_CANVAS_WIDTH)]
    pub width: u32,

    /// Canvas height in pixels
    #[arg(short = 'H', long, default_value_t = DEFAULT_CANVAS_HEIGHT)]
    pub height: u32,

    /// Output PNG path (defaults to the next free capture in `output/`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Overrides as a flat parameter document; later duplicates win
    pub fn parameter_overrides(&self) -> BTreeMap<String, f64> {
        self.params.iter().cloned().collect()
    }

    /// Cross-vein settings selected on the command line
    pub fn cross_vein_config(&self) -> CrossVeinConfig {
        let strategy = match self.sampler {
            SamplerChoice::Poisson => SamplingStrategy::Poisson(PoissonDiskSampler {
                min_distance: self.min_distance,
                ..PoissonDiskSampler::default()
            }),
            SamplerChoice::Midline => SamplingStrategy::Midline(MidlineSampler::default()),
        };
        CrossVeinConfig {
            strategy,
            lloyd_iterations: self.relax,
        }
    }

    /// Canvas inset by the margin, used as the containment target
    pub fn bounds(&self) -> Polygon {
        let size = DVec2::new(f64::from(self.width), f64::from(self.height));
        Polygon::rectangle(DVec2::splat(CANVAS_MARGIN), size - CANVAS_MARGIN)
    }

    /// Destination of the rendered snapshot
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            next_capture_path(Path::new(OUTPUT_DIRECTORY), CAPTURE_PREFIX, CAPTURE_SUFFIX)
        })
    }
}

fn parse_override(argument: &str) -> std::result::Result<(String, f64), String> {
    let (name, value) = argument
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, found `{argument}`"))?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid value for `{name}`: {e}"))?;
    Ok((name.trim().to_string(), value))
}

/// Builds or searches for a network and exports it according to CLI arguments
pub struct NetworkRunner {
    cli: Cli,
    rng: StdRng,
}

impl NetworkRunner {
    /// Create a runner seeded from the CLI arguments
    pub fn new(cli: Cli) -> Self {
        let rng = StdRng::seed_from_u64(cli.seed);
        Self { cli, rng }
    }

    /// Produce a network and export it
    ///
    /// Returns the written path, or `None` if the search accepted no candidate.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid, cross-vein synthesis
    /// fails outside a search, or the snapshot cannot be written
    pub fn run(&mut self) -> Result<Option<PathBuf>> {
        let network = if self.cli.search {
            match self.search()? {
                Some(network) => network,
                None => return Ok(None),
            }
        } else {
            self.build()?
        };

        let output_path = self.cli.output_path();
        export_network_as_png(&network, self.cli.width, self.cli.height, &output_path)?;
        Ok(Some(output_path))
    }

    fn build(&mut self) -> Result<VeinNetwork> {
        let parameters = ParameterSet::from_flat(&self.cli.parameter_overrides())?;
        let mut network = VeinNetwork::build(&parameters)?;

        if let Some(point) = network.first_intersection() {
            tracing::warn!(x = point.x, y = point.y, "primary veins intersect");
        } else if self.cli.cross_veins {
            network.generate_cross_veins(&self.cli.cross_vein_config(), &mut self.rng)?;
        }
        Ok(network)
    }

    fn search(&mut self) -> Result<Option<VeinNetwork>> {
        let mut space = ParameterSpace::default();
        for (name, value) in self.cli.parameter_overrides() {
            if !space.pin(&name, value) {
                tracing::warn!(parameter = %name, "no search range for override, ignoring");
            }
        }

        let search = RandomizedSearch {
            space,
            max_attempts: self.cli.attempts,
            bounds: self.cli.bounds(),
            cross_veins: self.cli.cross_veins.then(|| self.cli.cross_vein_config()),
        };

        let mut progress = self
            .cli
            .should_show_progress()
            .then(|| SearchProgress::new(search.max_attempts));
        let outcome = search.run(&mut self.rng, |attempt, rejection| {
            if let Some(progress) = progress.as_mut() {
                progress.observe(attempt, rejection);
            }
        })?;
        if let Some(progress) = &progress {
            progress.finish(outcome.accepted.is_some());
        }

        match outcome.accepted {
            Some((parameters, network)) => {
                tracing::info!(
                    attempts = outcome.attempts,
                    parameters = ?parameters.to_flat(),
                    "search accepted a network"
                );
                Ok(Some(network))
            }
            None => {
                tracing::warn!(
                    attempts = outcome.attempts,
                    tally = ?outcome.tally,
                    "search found no acceptable network"
                );
                Ok(None)
            }
        }
    }
}
