//! Named numeric ranges of every tunable parameter and uniform draws over them

use crate::io::error::{Result, invalid_parameter};
use crate::io::parameters::ParameterSet;
use rand::Rng;
use std::collections::BTreeMap;

/// Whether a parameter takes integer or real values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    /// Drawn values are rounded to the nearest integer
    Integer,
    /// Drawn values are used as-is
    Float,
}

/// Inclusive range a single parameter is drawn from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterRange {
    /// Flat parameter name
    pub name: &'static str,
    /// Integer or real valued
    pub kind: ParameterKind,
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

impl ParameterRange {
    const fn int(name: &'static str, min: f64, max: f64) -> Self {
        Self {
            name,
            kind: ParameterKind::Integer,
            min,
            max,
        }
    }

    const fn float(name: &'static str, min: f64, max: f64) -> Self {
        Self {
            name,
            kind: ParameterKind::Float,
            min,
            max,
        }
    }

    /// Increment used by slider-style editors: a hundredth of the range
    ///
    /// Integer parameters step by at least one. A collapsed range has no step.
    pub fn slider_step(&self) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 {
            return 0.0;
        }
        let step = span / 100.0;
        match self.kind {
            ParameterKind::Integer => step.floor().max(1.0),
            ParameterKind::Float => step,
        }
    }

    /// Uniform draw from the range
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        let t: f64 = rng.random();
        let value = (self.max - self.min).mul_add(t, self.min);
        match self.kind {
            ParameterKind::Integer => value.round(),
            ParameterKind::Float => value,
        }
    }
}

/// Ranges for every parameter a randomized search varies
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpace {
    ranges: Vec<ParameterRange>,
}

impl Default for ParameterSpace {
    fn default() -> Self {
        use ParameterRange as P;
        Self {
            ranges: vec![
                P::int("alpha", 0.0, 255.0),
                P::int("num_root_segments", 12.0, 12.0),
                P::int("root_segment_pos_const_x", 0.0, 1920.0),
                P::int("root_segment_pos_const_y", 0.0, 1080.0),
                P::float("root_segment_pos_linear_x", -30.0, 30.0),
                P::float("root_segment_pos_linear_y", -30.0, 30.0),
                P::float("root_segment_pos_quadratic_x", -5.0, 5.0),
                P::float("root_segment_pos_quadratic_y", -5.0, 5.0),
                P::float("root_segment_len", 0.0, 100.0),
                P::float("root_segment_dir_const_x", 0.0, 10.0),
                P::float("root_segment_dir_const_y", -10.0, 10.0),
                P::float("root_segment_dir_linear_x", -5.0, 5.0),
                P::float("root_segment_dir_linear_y", -5.0, 5.0),
                P::float("root_segment_dir_quadratic_x", -0.5, 0.5),
                P::float("root_segment_dir_quadratic_y", -0.5, 0.5),
                P::float("segment_dir_linear_x", -1.0, 1.0),
                P::float("segment_dir_linear_y", -1.0, 1.0),
                P::float("segment_dir_quadratic_x", -0.1, 0.1),
                P::float("segment_dir_quadratic_y", -0.1, 0.1),
                P::float("segment_dir_a_x", -0.01, 0.01),
                P::float("segment_dir_a_y", -0.01, 0.01),
                P::float("segment_dir_b_x", -0.05, 0.05),
                P::float("segment_dir_b_y", -0.05, 0.05),
                P::float("segment_dir_c_x", -0.05, 0.05),
                P::float("segment_dir_c_y", -0.05, 0.05),
                P::float("segment_dir_d_x", -0.1, 0.1),
                P::float("segment_dir_d_y", -0.1, 0.1),
                P::float("segment_len_factor", 0.2, 1.2),
                P::int("max_generations_const", 0.0, 100.0),
                P::float("max_generations_linear", -10.0, 10.0),
                P::float("max_generations_quadratic", -1.0, 1.0),
            ],
        }
    }
}

impl ParameterSpace {
    /// Build a space from explicit ranges
    ///
    /// # Errors
    ///
    /// Returns an error if any range is inverted or has a non-finite bound
    pub fn new(ranges: Vec<ParameterRange>) -> Result<Self> {
        for range in &ranges {
            if !range.min.is_finite() || !range.max.is_finite() {
                return Err(invalid_parameter(
                    range.name,
                    &format!("[{}, {}]", range.min, range.max),
                    &"range bounds must be finite",
                ));
            }
            if range.max < range.min {
                return Err(invalid_parameter(
                    range.name,
                    &format!("[{}, {}]", range.min, range.max),
                    &"range upper bound is below its lower bound",
                ));
            }
        }
        Ok(Self { ranges })
    }

    /// Every range in declaration order
    pub fn ranges(&self) -> &[ParameterRange] {
        &self.ranges
    }

    /// Range registered for `name`
    pub fn range(&self, name: &str) -> Option<&ParameterRange> {
        self.ranges.iter().find(|range| range.name == name)
    }

    /// Collapse the range for `name` to a single value
    ///
    /// Returns `false` if no range is registered under `name`.
    pub fn pin(&mut self, name: &str, value: f64) -> bool {
        self.ranges
            .iter_mut()
            .find(|range| range.name == name)
            .map(|range| {
                range.min = value;
                range.max = value;
            })
            .is_some()
    }

    /// Draw one value per range into a flat document
    pub fn sample_flat<R: Rng>(&self, rng: &mut R) -> BTreeMap<String, f64> {
        self.ranges
            .iter()
            .map(|range| (range.name.to_string(), range.sample(rng)))
            .collect()
    }

    /// Draw a parameter set; parameters without a range keep their defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the drawn values fail [`ParameterSet::from_flat`] validation
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Result<ParameterSet> {
        ParameterSet::from_flat(&self.sample_flat(rng))
    }
}
