//! Bounded generate-and-test search for collision-free networks

use crate::crossveins::region::CrossVeinConfig;
use crate::geometry::Polygon;
use crate::io::configuration::DEFAULT_SEARCH_ATTEMPTS;
use crate::io::error::{Result, VenationError};
use crate::io::parameters::ParameterSet;
use crate::search::space::ParameterSpace;
use crate::veins::network::VeinNetwork;
use rand::Rng;

/// Reason a candidate parameter set was discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Drawn values failed parameter validation
    InvalidParameter,
    /// A summed direction vector vanished
    DegenerateDirection,
    /// Two primary veins cross
    Collision,
    /// A root or tip falls outside the search bounds
    OutOfBounds,
    /// Cross-vein synthesis hit malformed geometry
    MalformedGeometry,
}

impl Rejection {
    fn from_error(error: &VenationError) -> Option<Self> {
        match error {
            VenationError::InvalidParameter { .. } => Some(Self::InvalidParameter),
            VenationError::DegenerateDirection { .. } => Some(Self::DegenerateDirection),
            VenationError::MalformedGeometry { .. } => Some(Self::MalformedGeometry),
            VenationError::ImageExport { .. } | VenationError::FileSystem { .. } => None,
        }
    }
}

/// Count of rejected candidates per reason
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RejectionTally {
    /// Parameter validation failures
    pub invalid: usize,
    /// Vanishing direction vectors
    pub degenerate: usize,
    /// Crossing primary veins
    pub collision: usize,
    /// Networks escaping the bounds
    pub out_of_bounds: usize,
    /// Cross-vein geometry failures
    pub geometry: usize,
}

impl RejectionTally {
    /// Add one rejection
    pub const fn record(&mut self, rejection: Rejection) {
        match rejection {
            Rejection::InvalidParameter => self.invalid += 1,
            Rejection::DegenerateDirection => self.degenerate += 1,
            Rejection::Collision => self.collision += 1,
            Rejection::OutOfBounds => self.out_of_bounds += 1,
            Rejection::MalformedGeometry => self.geometry += 1,
        }
    }

    /// Total number of rejected candidates
    pub const fn total(&self) -> usize {
        self.invalid + self.degenerate + self.collision + self.out_of_bounds + self.geometry
    }
}

/// Result of a bounded search
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// First accepted parameter set with its network, if any
    pub accepted: Option<(ParameterSet, VeinNetwork)>,
    /// Number of candidates drawn, including the accepted one
    pub attempts: usize,
    /// Why the other candidates were discarded
    pub tally: RejectionTally,
}

/// Repeats draw, build and check until a candidate passes or attempts run out
#[derive(Debug, Clone)]
pub struct RandomizedSearch {
    /// Ranges candidates are drawn from
    pub space: ParameterSpace,
    /// Upper bound on drawn candidates
    pub max_attempts: usize,
    /// Every root start and tip end must lie inside this polygon
    pub bounds: Polygon,
    /// When set, cross-vein synthesis must also succeed
    pub cross_veins: Option<CrossVeinConfig>,
}

impl RandomizedSearch {
    /// Search the default parameter space within `bounds`
    pub fn new(bounds: Polygon) -> Self {
        Self {
            space: ParameterSpace::default(),
            max_attempts: DEFAULT_SEARCH_ATTEMPTS,
            bounds,
            cross_veins: None,
        }
    }

    /// Run the search, reporting each attempt to `observer`
    ///
    /// The observer receives the one-based attempt number and the rejection
    /// reason, or `None` for the accepted candidate.
    ///
    /// # Errors
    ///
    /// Returns an error before the first draw if the cross-vein settings are
    /// invalid. Candidate failures never error; only failures that are not
    /// tied to the drawn parameters are returned.
    pub fn run<R: Rng>(
        &self,
        rng: &mut R,
        mut observer: impl FnMut(usize, Option<Rejection>),
    ) -> Result<SearchOutcome> {
        self.cross_veins
            .as_ref()
            .map(CrossVeinConfig::validate)
            .transpose()?;
        let mut tally = RejectionTally::default();

        for attempt in 1..=self.max_attempts {
            match self.evaluate(rng)? {
                Ok(accepted) => {
                    observer(attempt, None);
                    tracing::info!(attempt, rejected = tally.total(), "accepted candidate");
                    return Ok(SearchOutcome {
                        accepted: Some(accepted),
                        attempts: attempt,
                        tally,
                    });
                }
                Err(rejection) => {
                    tally.record(rejection);
                    observer(attempt, Some(rejection));
                }
            }
        }

        tracing::info!(
            attempts = self.max_attempts,
            ?tally,
            "search exhausted without an accepted candidate"
        );
        Ok(SearchOutcome {
            accepted: None,
            attempts: self.max_attempts,
            tally,
        })
    }

    /// Build and check one candidate
    fn evaluate<R: Rng>(
        &self,
        rng: &mut R,
    ) -> Result<std::result::Result<(ParameterSet, VeinNetwork), Rejection>> {
        let candidate = self.space.sample(rng).and_then(|parameters| {
            let mut network = VeinNetwork::build(&parameters)?;
            if network.has_collision() {
                return Ok(Err(Rejection::Collision));
            }
            if !network.is_contained_by(&self.bounds) {
                return Ok(Err(Rejection::OutOfBounds));
            }
            if let Some(config) = &self.cross_veins {
                network.generate_cross_veins(config, rng)?;
            }
            Ok(Ok((parameters, network)))
        });

        match candidate {
            Ok(result) => Ok(result),
            Err(error) => match Rejection::from_error(&error) {
                Some(rejection) => {
                    if rejection == Rejection::MalformedGeometry {
                        tracing::warn!(%error, "rejected candidate with malformed geometry");
                    }
                    Ok(Err(rejection))
                }
                None => Err(error),
            },
        }
    }
}
